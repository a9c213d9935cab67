//! icecream-cart - inventory service for an ice cream cart
//!
//! Products are kept in a [`store::RecordStore`] (Postgres or in-memory)
//! and served over a JSON REST API built on axum.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod model;
pub mod rest_api;
pub mod store;
