//! Item Value Type
//!
//! A purchasable food item with a quantity. Items have no identity of their
//! own beyond the catalog id they were picked from.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult};

/// How an item's quantity is measured
///
/// Serialized as the short labels shown in the UI ("Kg" / "Un"); these tags
/// are part of the persisted record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Weight in kilograms
    #[serde(rename = "Kg")]
    Weight,
    /// Number of units
    #[default]
    #[serde(rename = "Un")]
    Count,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Weight => "Kg",
            Unit::Count => "Un",
        }
    }

    /// The other unit
    pub fn toggled(self) -> Self {
        match self {
            Unit::Weight => Unit::Count,
            Unit::Count => Unit::Weight,
        }
    }
}

/// A food item with quantity, as stored inside a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable catalog key (e.g. "apple")
    pub id: String,
    /// Display name
    pub name: String,
    /// Catalog category key
    pub category: String,
    /// Always >= 1; whole for `Unit::Count`
    pub quantity: f64,
    pub unit: Unit,
}

impl Item {
    /// Create an item with quantity 1
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>, unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            quantity: 1.0,
            unit,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Check the quantity invariant
    pub fn validate(&self) -> DomainResult<()> {
        validate_quantity(&self.id, self.quantity, self.unit)
    }
}

/// Quantities must be finite and at least 1, and whole when counted in units.
/// Bad values are rejected, never clamped or rounded.
pub fn validate_quantity(item_id: &str, quantity: f64, unit: Unit) -> DomainResult<()> {
    if !quantity.is_finite() || quantity < 1.0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity for '{}' must be at least 1, got {}",
            item_id, quantity
        )));
    }
    if unit == Unit::Count && quantity.fract() != 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity for '{}' must be a whole number of {}, got {}",
            item_id,
            unit.as_str(),
            quantity
        )));
    }
    Ok(())
}
