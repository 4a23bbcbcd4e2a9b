use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog product.
///
/// `id` is `None` until the repository assigns one and never changes after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1, nullable)]
    pub id: Option<i64>,
    #[serde(default)]
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Adjustable LED desk lamp")]
    pub description: String,
    #[serde(default)]
    #[schema(example = 39.9)]
    pub price: f64,
}

impl Product {
    /// A product that has not been saved yet
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrite the mutable fields, keeping `id`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
    }
}

/// Body of `POST /api/products`. An `id` in the body is ignored.
///
/// Every field is optional: a missing text field is stored as `""` and a
/// missing price as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<CreateProduct> for Product {
    fn from(input: CreateProduct) -> Self {
        Product::new(input.name, input.description, input.price)
    }
}

/// Body of `PUT /api/products/{id}`. The path id wins over any `id` in the body.
///
/// Defaults match [`CreateProduct`], so omitted fields are overwritten with
/// `""` or `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
}
