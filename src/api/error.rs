//! Mapping of [`Error`] onto HTTP responses.
//!
//! Client errors carry their message in the `error` field. Server errors are
//! logged in full and answered with a generic body so storage paths and parse
//! details never leak to the caller.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::any::Any;
use tracing::{error, warn};

/// Body message for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl Error {
    /// Narrowest HTTP status describing this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::StorageCorrupt { .. }
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Config { .. }
            | Self::Transport(_)
            | Self::Api { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
            return internal_error_response();
        }
        warn!("Request rejected ({}): {}", status, self);
        error_response(status, &self.to_string())
    }
}

/// `{"error": message}` with the given status.
#[must_use]
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Generic 500 body, used for every server-side failure.
#[must_use]
pub fn internal_error_response() -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

/// Converts a handler panic into the generic 500 response.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {}", detail);
    internal_error_response()
}

/// JSON 404 for paths outside the route table.
pub async fn route_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = Error::NotFound {
            resource: "Product",
            id: "x".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        let io = Error::Io(std::io::Error::other("disk"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_panic_payloads_map_to_500() {
        let from_str = panic_response(Box::new("boom"));
        let from_string = panic_response(Box::new(String::from("boom")));
        assert_eq!(from_str.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(from_string.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
