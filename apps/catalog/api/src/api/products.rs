use axum::Router;
use domain_products::{
    InMemoryProductRepository, PgProductRepository, ProductService, handlers,
};
use tracing::info;

use crate::state::AppState;

/// Products routes over Postgres when a pool is configured, otherwise over a
/// process-local store that lives as long as the router.
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => {
            info!("Serving products from PostgreSQL");
            handlers::router(ProductService::new(PgProductRepository::new(db.clone())))
        }
        None => {
            info!("DATABASE_URL not set, serving products from memory");
            handlers::router(ProductService::new(InMemoryProductRepository::new()))
        }
    }
}
