use axum::{Router, routing::get};
use axum_helpers::server::{create_router, health_router};

use crate::state::AppState;

pub mod health;
pub mod products;

pub const PRODUCTS_PATH: &str = "/products";

/// API routes without the `/api` prefix, which `create_router` adds.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest(PRODUCTS_PATH, products::router(state))
}

/// `/ready` with the storage check applied.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The full application: API, docs, middleware, `/health` and `/ready`.
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<crate::openapi::ApiDoc>(routes(state), &state.config.cors)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn in_memory_state() -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                cors: CorsConfig::default(),
                database: None,
                environment: Environment::Development,
            },
            db: None,
        }
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_app_info() {
        let app = app(&in_memory_state()).unwrap();

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "catalog_api");
    }

    #[tokio::test]
    async fn test_ready_with_in_memory_store() {
        let app = app(&in_memory_state()).unwrap();

        let response = app.oneshot(get_request("/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_products_are_served_under_api_prefix() {
        let app = app(&in_memory_state()).unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Item A", "description": "", "price": 1.5 }).to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response.into_body()).await;
        assert_eq!(created["id"], 1);

        let response = app.oneshot(get_request("/api/products/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = json_body(response.into_body()).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_store_is_shared_between_requests() {
        let app = app(&in_memory_state()).unwrap();

        for name in ["A", "B"] {
            let request = Request::builder()
                .method("POST")
                .uri("/api/products")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "name": name }).to_string()))
                .unwrap();
            app.clone().oneshot(request).await.unwrap();
        }

        let response = app.oneshot(get_request("/api/products")).await.unwrap();
        let body = json_body(response.into_body()).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_openapi_document_lists_product_paths() {
        let app = app(&in_memory_state()).unwrap();

        let response = app
            .oneshot(get_request("/api-docs/openapi.json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert!(body["paths"].get("/products/{id}").is_some());
        assert!(body["paths"].get("/products/demo").is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let app = app(&in_memory_state()).unwrap();

        let response = app.oneshot(get_request("/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
