//! Request payloads.
//!
//! Keys are PascalCase on the wire (`Name`, `OnDisplay`, ...), with
//! lower and camel case accepted as aliases.

use serde::Deserialize;

use super::icecream::{normalize_description, IceCream, IceCreamFields};
use super::validation::{validate_id, ValidationResult};

/// Body of `POST /icecream`. The store assigns the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateIceCreamParams {
    #[serde(alias = "name")]
    pub name: String,

    #[serde(alias = "price")]
    pub price: f64,

    #[serde(alias = "quantity")]
    pub quantity: i64,

    #[serde(default, alias = "onDisplay", alias = "on_display")]
    pub on_display: bool,

    #[serde(default, alias = "description")]
    pub description: Option<String>,
}

impl CreateIceCreamParams {
    pub fn into_fields(self) -> IceCreamFields {
        IceCreamFields {
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            on_display: self.on_display,
            description: normalize_description(self.description),
        }
    }
}

/// Body of `PUT /icecream/{id}`: a complete product including its id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplaceIceCreamParams {
    #[serde(alias = "id")]
    pub id: i64,

    #[serde(alias = "name")]
    pub name: String,

    #[serde(alias = "price")]
    pub price: f64,

    #[serde(alias = "quantity")]
    pub quantity: i64,

    /// Accepted for shape compatibility; replace keeps the stored flag.
    #[serde(default, alias = "onDisplay", alias = "on_display")]
    pub on_display: Option<bool>,

    #[serde(default, alias = "description")]
    pub description: Option<String>,
}

impl ReplaceIceCreamParams {
    /// Check the body on its own, before any lookup.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_id(self.id)?;
        IceCreamFields {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            on_display: self.on_display.unwrap_or_default(),
            description: normalize_description(self.description.clone()),
        }
        .validate()
    }

    /// Overwrite `current` with this body, keeping its id and display flag.
    pub fn replace(self, current: &IceCream) -> IceCreamFields {
        IceCreamFields {
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            on_display: current.on_display,
            description: normalize_description(self.description),
        }
    }
}

/// Body of `PATCH /icecream/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatchIceCreamParams {
    #[serde(default, alias = "name")]
    pub name: Option<String>,

    #[serde(default, alias = "price")]
    pub price: Option<f64>,

    #[serde(default, alias = "quantity")]
    pub quantity: Option<i64>,

    #[serde(default, alias = "onDisplay", alias = "on_display")]
    pub on_display: Option<bool>,

    #[serde(default, alias = "description")]
    pub description: Option<String>,
}

impl PatchIceCreamParams {
    /// Merge the supplied fields over `current`.
    pub fn apply(&self, current: &IceCream) -> IceCreamFields {
        let mut fields = current.fields();
        if let Some(name) = &self.name {
            fields.name = name.clone();
        }
        if let Some(price) = self.price {
            fields.price = price;
        }
        if let Some(quantity) = self.quantity {
            fields.quantity = quantity;
        }
        if let Some(on_display) = self.on_display {
            fields.on_display = on_display;
        }
        if let Some(description) = &self.description {
            fields.description = normalize_description(Some(description.clone()));
        }
        fields
    }
}
