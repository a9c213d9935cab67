//! # HTTP Server Module
//!
//! Combines the endpoint routers into one Axum server.
//!
//! # Endpoints
//!
//! - `/` - Heartbeat
//! - `/health` - Health check
//! - `/icecream`, `/icecream/{id}` - Product inventory

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
