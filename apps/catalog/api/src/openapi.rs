use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Create, list, fetch, replace and delete catalog products"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = crate::api::PRODUCTS_PATH, api = domain_products::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
