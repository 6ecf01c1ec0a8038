//! HTTP error responses.
//!
//! Every failure leaves the server as `{"success": false, "error", "details"}`
//! with a status chosen by error kind: bad input is 400, a failed upstream
//! collaborator is 502 and unreadable reference data is 500.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Result type alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// An error on its way to becoming an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// 400 with `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Attaches a detail string.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Status code for a domain error.
pub fn status_for(err: &seatwise_core::Error) -> StatusCode {
    use seatwise_core::Error;
    match err {
        Error::Validation { .. } | Error::UnknownStandard { .. } => StatusCode::BAD_REQUEST,
        Error::Upstream { .. } | Error::Timeout { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<seatwise_core::Error> for ApiError {
    fn from(err: seatwise_core::Error) -> Self {
        let status = status_for(&err);
        let message = match status {
            StatusCode::BAD_REQUEST => err.to_string(),
            StatusCode::BAD_GATEWAY => "Upstream service failed".to_string(),
            _ => "Internal server error".to_string(),
        };
        if status.is_server_error() {
            tracing::error!(error = %err, status = status.as_u16(), "Request failed");
        }
        Self {
            status,
            message,
            details: (!status.is_client_error()).then(|| err.to_string()),
        }
    }
}

impl From<seatwise_client::Error> for ApiError {
    fn from(err: seatwise_client::Error) -> Self {
        seatwise_core::Error::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid JSON request body").with_details(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.message,
            "details": self.details,
        }));
        (self.status, body).into_response()
    }
}
