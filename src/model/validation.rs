//! Field-level rules for ice cream records.

use thiserror::Error;

/// Maximum name length in characters
pub const MAX_NAME_LEN: usize = 60;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 600;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A field outside its allowed range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Name must be at most {max} characters, got {len}")]
    NameTooLong { len: usize, max: usize },

    #[error("Description must be at most {max} characters, got {len}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("The price must be a number greater than zero, got {0}")]
    InvalidPrice(f64),

    #[error("The quantity must be an integer greater than zero, got {0}")]
    InvalidQuantity(i64),

    #[error("The Id must be an integer greater than zero, got {0}")]
    InvalidId(i64),
}

pub(crate) fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> ValidationResult<()> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

pub(crate) fn validate_price(price: f64) -> ValidationResult<()> {
    // NaN fails the comparison too
    if !(price.is_finite() && price > 0.0) {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

pub(crate) fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Ids supplied in request bodies must be positive.
pub fn validate_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::InvalidId(id));
    }
    Ok(())
}
