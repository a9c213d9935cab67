//! Heartbeat and Health Routes

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Greeting returned by `GET /`
pub const HEARTBEAT_MESSAGE: &str = "Welcome to your icecream cart! We offer thousands of flavors.";

/// Heartbeat response
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub health: String,
}

/// `GET /` and `GET /health`
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(heartbeat_handler))
        .route("/health", get(health_handler))
}

async fn heartbeat_handler() -> impl IntoResponse {
    let response = HeartbeatResponse {
        message: HEARTBEAT_MESSAGE.to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness only; the store is not consulted.
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        health: "OK".to_string(),
    };

    (StatusCode::OK, Json(response))
}
