// src/error.rs
use std::any::Any;

use axum::{response::{IntoResponse, Response}, Json};
use http::StatusCode;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    InvalidParameter(String),
    NotFound { entity: &'static str, id: i64 },
}

impl AppError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        AppError::InvalidParameter(msg.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "database error: {e}"),
            AppError::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            AppError::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
        }
    }
}

impl std::error::Error for AppError {}

fn capitalize(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            // Handlers log the store detail with their own context
            AppError::DatabaseError(e) => {
                tracing::debug!(error = %e, "Database error mapped to 500");
                internal_error_body()
            }
            AppError::InvalidParameter(msg) => json!({
                "error": "Bad Request",
                "message": msg,
                "status_code": status.as_u16(),
            }),
            AppError::NotFound { entity, id } => {
                let title = capitalize(entity);
                let mut body = json!({
                    "error": format!("{title} not found"),
                    "message": format!("{title} with ID {id} does not exist"),
                    "status_code": status.as_u16(),
                });
                body[format!("{entity}_id")] = json!(id);
                body
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal_error_body() -> serde_json::Value {
    json!({
        "error": "Internal Server Error",
        "message": "An internal server error occurred",
        "status_code": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
    })
}

/// Turns a handler panic into the same 500 body a store failure gets.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "Handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(internal_error_body())).into_response()
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_names_the_requested_id() {
        let (status, body) = body_json(AppError::not_found("product", 999999)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["product_id"], 999999);
        assert_eq!(body["error"], "Product not found");
        assert_eq!(body["message"], "Product with ID 999999 does not exist");
    }

    #[tokio::test]
    async fn database_errors_are_not_echoed() {
        let (status, body) = body_json(AppError::DatabaseError(sqlx::Error::PoolTimedOut)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal server error occurred");
        assert!(!body.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn panic_payload_is_not_echoed() {
        let response = panic_response(Box::new(String::from("index out of bounds: secret")));
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["status_code"], 500);
        assert!(!body.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn invalid_parameter_is_bad_request() {
        let (status, body) = body_json(AppError::invalid_parameter("page must be >= 1")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "page must be >= 1");
    }
}
