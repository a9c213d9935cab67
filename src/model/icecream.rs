//! Product record types.

use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationResult};

/// Description reported for products stored without one
pub const NO_DESCRIPTION: &str = "(no description yet)";

/// An ice cream product as stored and served.
///
/// Equality covers every field, `on_display` included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IceCream {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub on_display: bool,
    pub description: String,
}

impl IceCream {
    /// Everything except the identity
    pub fn fields(&self) -> IceCreamFields {
        IceCreamFields {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            on_display: self.on_display,
            description: self.description.clone(),
        }
    }

    /// True when `fields` would not change this product.
    pub fn matches(&self, fields: &IceCreamFields) -> bool {
        self.name == fields.name
            && self.price == fields.price
            && self.quantity == fields.quantity
            && self.on_display == fields.on_display
            && self.description == fields.description
    }
}

/// The mutable part of a product.
///
/// Stores receive this on insert (they assign the id) and on update.
#[derive(Debug, Clone, PartialEq)]
pub struct IceCreamFields {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub on_display: bool,
    pub description: String,
}

impl IceCreamFields {
    /// Attach an identity
    pub fn with_id(self, id: i64) -> IceCream {
        IceCream {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            on_display: self.on_display,
            description: self.description,
        }
    }

    /// Check name, price, quantity and description bounds.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_name(&self.name)?;
        validation::validate_price(self.price)?;
        validation::validate_quantity(self.quantity)?;
        validation::validate_description(&self.description)
    }
}

/// Replace a missing or empty description with [`NO_DESCRIPTION`].
pub fn normalize_description(description: Option<String>) -> String {
    match description {
        Some(d) if !d.is_empty() => d,
        _ => NO_DESCRIPTION.to_string(),
    }
}
