//! Extractors that report failures as [`RestError`] so malformed input
//! gets the same JSON error body as every other failure.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::errors::{RestError, RestResult};
use crate::model::validate_id;

/// `axum::Json` with a [`RestError`] rejection
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(RestError::InvalidRequest(rejection.body_text())),
        }
    }
}

/// Parse the `{id}` path segment. Ids must be positive.
pub fn parse_id(raw: &str) -> RestResult<i64> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| RestError::InvalidRequest(format!("Invalid ice cream id: {}", raw)))?;
    validate_id(id)?;
    Ok(id)
}
