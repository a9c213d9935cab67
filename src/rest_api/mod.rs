//! # Ice Cream REST API
//!
//! HTTP endpoints for the product inventory. Handlers parse the request,
//! hand it to [`IceCreamFacade`], and turn the outcome into a status code
//! and JSON body.

pub mod errors;
pub mod extract;
pub mod facade;
pub mod response;
pub mod selector;
pub mod server;

pub use errors::{ErrorKey, ErrorResponse, RestError, RestResult};
pub use facade::IceCreamFacade;
pub use response::CreateOutcome;
pub use selector::Selectors;
pub use server::icecream_routes;
