use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{entity, error::ProductResult, models::Product, repository::ProductRepository};

/// PostgreSQL-backed ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn save(&self, product: Product) -> ProductResult<Product> {
        let has_id = product.id.is_some();
        let active_model: entity::ActiveModel = product.into();

        if !has_id {
            let model = active_model.insert(&self.db).await?;
            tracing::info!(product_id = model.id, "Created product");
            return Ok(model.into());
        }

        let model = match active_model.clone().update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = model.id, "Updated product");
                model
            }
            Err(DbErr::RecordNotUpdated) => {
                let model = active_model.insert(&self.db).await?;
                tracing::info!(product_id = model.id, "Created product with explicit id");
                model
            }
            Err(e) => return Err(e.into()),
        };

        Ok(model.into())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }

        Ok(())
    }
}
