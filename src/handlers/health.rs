// src/handlers/health.rs
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use http::StatusCode;
use serde_json::json;

use crate::state::AppState;

// GET / - API description
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to the Products REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/products": "List all products (with pagination)",
            "GET /api/products/{id}": "Get a specific product by ID",
            "GET /api/products/stats": "Get product statistics",
            "GET /api/departments": "List all departments",
            "GET /api/departments/{id}": "Get a specific department by ID",
            "GET /api/departments/{id}/products": "List products in a department",
            "GET /health": "API health check",
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// GET /health - Database connectivity check
pub async fn health_check(State(AppState { db_pool }): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&db_pool)
        .await
    {
        Ok(product_count) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "product_count": product_count,
                "timestamp": Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "database": "error",
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{get_json, seed_catalog, test_app};
    use http::StatusCode;

    #[tokio::test]
    async fn healthy_with_product_count() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        let (status, body) = get_json(&app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["product_count"], 8);
    }

    #[tokio::test]
    async fn unhealthy_when_pool_is_closed() {
        let (app, pool) = test_app().await;
        pool.close().await;

        let (status, body) = get_json(&app, "/health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "unhealthy");
    }

    #[tokio::test]
    async fn closed_pool_surfaces_as_generic_500() {
        let (app, pool) = test_app().await;
        pool.close().await;

        let (status, body) = get_json(&app, "/api/products").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let (app, _pool) = test_app().await;

        let (status, body) = get_json(&app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["endpoints"]["GET /api/products"].is_string());
    }
}
