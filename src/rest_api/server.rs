//! # Ice Cream Routes
//!
//! Axum handlers for `/icecream` and `/icecream/{id}`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::errors::RestResult;
use super::extract::{parse_id, JsonBody};
use super::facade::IceCreamFacade;
use super::response::CreateOutcome;
use super::selector::Selectors;
use crate::model::{CreateIceCreamParams, IceCream, PatchIceCreamParams, ReplaceIceCreamParams};

/// Shared state type
type FacadeState = Arc<IceCreamFacade>;

/// Build the ice cream router
pub fn icecream_routes(facade: FacadeState) -> Router {
    Router::new()
        .route("/icecream", get(list_handler).post(create_handler))
        .route(
            "/icecream/:id",
            get(get_handler)
                .put(replace_handler)
                .patch(patch_handler)
                .delete(delete_handler),
        )
        .with_state(facade)
}

/// List, optionally filtered by `id` and `name`
async fn list_handler(
    State(facade): State<FacadeState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> RestResult<Json<Vec<IceCream>>> {
    let selectors = Selectors::parse(pairs);
    let products = facade.list(&selectors).await?;
    Ok(Json(products))
}

/// Create handler; 201 or 200 depending on the outcome
async fn create_handler(
    State(facade): State<FacadeState>,
    JsonBody(params): JsonBody<CreateIceCreamParams>,
) -> RestResult<CreateOutcome> {
    facade.create(params).await
}

async fn get_handler(
    State(facade): State<FacadeState>,
    Path(raw_id): Path<String>,
) -> RestResult<Json<IceCream>> {
    let id = parse_id(&raw_id)?;
    Ok(Json(facade.get(id).await?))
}

async fn replace_handler(
    State(facade): State<FacadeState>,
    Path(raw_id): Path<String>,
    JsonBody(params): JsonBody<ReplaceIceCreamParams>,
) -> RestResult<Json<IceCream>> {
    let id = parse_id(&raw_id)?;
    Ok(Json(facade.replace(id, params).await?))
}

async fn patch_handler(
    State(facade): State<FacadeState>,
    Path(raw_id): Path<String>,
    JsonBody(params): JsonBody<PatchIceCreamParams>,
) -> RestResult<Json<IceCream>> {
    let id = parse_id(&raw_id)?;
    Ok(Json(facade.patch(id, params).await?))
}

async fn delete_handler(
    State(facade): State<FacadeState>,
    Path(raw_id): Path<String>,
) -> RestResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    facade.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
