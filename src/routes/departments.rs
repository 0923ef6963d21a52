use axum::{routing::get, Router};

use crate::handlers::department::{get_department, list_department_products, list_departments};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments))
        .route("/departments/{department_id}", get(get_department))
        .route("/departments/{department_id}/products", get(list_department_products))
}
