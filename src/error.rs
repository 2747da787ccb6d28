use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    RateLimited { reset_in: Duration },
    Auth(String),
    Upstream(String),
    NotImplemented(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reset_in_ms: Option<u64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, reset_in_ms) = match self {
            ApiError::RateLimited { reset_in } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Try again later.".to_string(),
                Some(reset_in.as_millis() as u64),
            ),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Upstream(msg) => {
                // Log the real cause server-side, return a generic message
                tracing::error!("Upstream error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream service unavailable".to_string(),
                    None,
                )
            }
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg, None),
        };

        let body = ErrorBody {
            error: message,
            reset_in_ms,
        };

        (status, axum::Json(body)).into_response()
    }
}
