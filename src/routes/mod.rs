pub mod departments;
pub mod products;

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::handlers::health::{health_check, index};
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(departments::routes())
}

/// Full application: `/api` resources, index, health and the optional frontend under `/app`.
pub fn build_app(app_state: AppState, frontend_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .nest("/api", create_router())
        .route("/", get(index))
        .route("/health", get(health_check));

    if let Some(dir) = frontend_dir {
        if dir.is_dir() {
            tracing::info!(dir = %dir.display(), "Serving frontend under /app");
            app = app.nest_service("/app", ServeDir::new(dir));
        } else {
            tracing::warn!(dir = %dir.display(), "Frontend directory not found, static files disabled");
        }
    }

    with_layers(app).with_state(app_state)
}

/// Panics become a JSON 500 inside the trace span; CORS wraps everything.
fn with_layers(app: Router<AppState>) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
