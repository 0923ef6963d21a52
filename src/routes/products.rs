use axum::{routing::get, Router};

use crate::handlers::product::{get_product, get_product_stats, list_products};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/stats", get(get_product_stats))
        .route("/products/{product_id}", get(get_product))
}
