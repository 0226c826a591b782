//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use saga::CheckoutError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Checkout pipeline error.
    Checkout(CheckoutError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match &err {
        CheckoutError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CheckoutError::PriceNotFound(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        // The order may already have committed; 502 tells the client the
        // downstream broker, not their request, is at fault.
        CheckoutError::Publish(_) => {
            tracing::error!(error = %err, "publish failed after order commit");
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
        _ => {
            tracing::error!(error = %err, "checkout failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}
