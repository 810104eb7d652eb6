//! # Error Response Handling
//!
//! Converts [`AppError`] values into Axum HTTP responses using the
//! standard JSON error envelope.

use axum::{body::Body, http::StatusCode, response::Response};

use crate::{response::ApiResponse, AppError};

/// Error handler that converts errors to HTTP responses.
#[derive(Clone)]
pub struct ErrorHandler {
    /// Whether to include error details in response.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let code = err.code();
        let message = if self.include_details || status != StatusCode::INTERNAL_SERVER_ERROR {
            err.message()
        }
        else {
            // Never leak internal failure details to clients
            "Internal server error".to_string()
        };

        let response = ApiResponse::<()>::error(code, message);
        let body = serde_json::to_string(&response)
            .unwrap_or_else(|_| format!(r#"{{"success":false,"code":"{}"}}"#, code));

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap_or_default()
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.code(), message = %self.message(), "request failed");
        }
        let handler = ErrorHandler::new(false);
        handler.to_response(&self)
    }
}
