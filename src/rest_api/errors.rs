//! # REST API Errors
//!
//! Every failure a handler can return, with its status code and the
//! `ErrorKey` clients match on. Bodies look like:
//!
//! ```json
//! { "ErrorMessage": "No matching icecream with id 7 found", "ErrorKey": "ICECREAM_NOT_FOUND" }
//! ```

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKey {
    GenericError,
    DuplicateIcecream,
    IcecreamNotFound,
    IcecreamNameConflict,
    IcecreamIdMismatch,
}

impl ErrorKey {
    /// Returns the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::GenericError => "GENERIC_ERROR",
            ErrorKey::DuplicateIcecream => "DUPLICATE_ICECREAM",
            ErrorKey::IcecreamNotFound => "ICECREAM_NOT_FOUND",
            ErrorKey::IcecreamNameConflict => "ICECREAM_NAME_CONFLICT",
            ErrorKey::IcecreamIdMismatch => "ICECREAM_ID_MISMATCH",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body or path could not be parsed
    #[error("Unable to process the request. {0}")]
    InvalidRequest(String),

    /// A field is out of range
    #[error("Unable to process the request. {0}")]
    Validation(#[from] ValidationError),

    /// Create with a name that is taken by a different product
    #[error("Unable to process the request. Icecream with same name {0} exist")]
    DuplicateRecord(String),

    /// No product at this id
    #[error("No matching icecream with id {0} found")]
    NotFound(i64),

    /// Replace body names a different id than the path
    #[error("Path id {path_id} doesn't match the id in body of the update {body_id}")]
    IdMismatch { path_id: i64, body_id: i64 },

    /// Rename onto a name held by another product
    #[error("New name {0} conflicts with existing name in different ice cream")]
    NameConflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failed or timed out
    #[error("Sorry, unable to process the request. {0}")]
    Store(#[from] StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            RestError::NameConflict(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            RestError::DuplicateRecord(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error key reported to clients
    pub fn error_key(&self) -> ErrorKey {
        match self {
            RestError::DuplicateRecord(_) => ErrorKey::DuplicateIcecream,
            RestError::NotFound(_) => ErrorKey::IcecreamNotFound,
            RestError::NameConflict(_) => ErrorKey::IcecreamNameConflict,
            RestError::IdMismatch { .. } => ErrorKey::IcecreamIdMismatch,
            RestError::InvalidRequest(_) | RestError::Validation(_) | RestError::Store(_) => {
                ErrorKey::GenericError
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,

    #[serde(rename = "ErrorKey")]
    pub error_key: ErrorKey,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            error_message: err.to_string(),
            error_key: err.error_key(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, key = %self.error_key(), "request failed");
        } else {
            tracing::debug!(error = %self, key = %self.error_key(), "request rejected");
        }

        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
