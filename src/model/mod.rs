//! # Ice Cream Model
//!
//! The product record, the request payloads that create or change it,
//! and the field rules every write must satisfy.

mod icecream;
mod params;
mod validation;

pub use icecream::{normalize_description, IceCream, IceCreamFields, NO_DESCRIPTION};
pub use params::{CreateIceCreamParams, PatchIceCreamParams, ReplaceIceCreamParams};
pub use validation::{
    validate_id, ValidationError, ValidationResult, MAX_DESCRIPTION_LEN, MAX_NAME_LEN,
};
