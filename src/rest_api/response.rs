//! # Response Formatting
//!
//! Outcomes whose status code depends on what the operation found.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::model::IceCream;

/// Result of a create request
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// A new product was stored
    Created(IceCream),

    /// An identical product already existed and was returned unchanged
    AlreadyExists(IceCream),
}

impl CreateOutcome {
    /// 201 for a new product, 200 for an idempotent repeat
    pub fn status_code(&self) -> StatusCode {
        match self {
            CreateOutcome::Created(_) => StatusCode::CREATED,
            CreateOutcome::AlreadyExists(_) => StatusCode::OK,
        }
    }

    pub fn product(&self) -> &IceCream {
        match self {
            CreateOutcome::Created(p) | CreateOutcome::AlreadyExists(p) => p,
        }
    }

    pub fn into_product(self) -> IceCream {
        match self {
            CreateOutcome::Created(p) | CreateOutcome::AlreadyExists(p) => p,
        }
    }
}

impl IntoResponse for CreateOutcome {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_product())).into_response()
    }
}
