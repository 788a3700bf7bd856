//! Order model.
//!
//! An order requests a quantity of good output of one recipe. The requested
//! quantity is net of yield losses; the gross quantity actually produced is
//! derived via [`Recipe::gross_quantity`](super::Recipe::gross_quantity).

use serde::{Deserialize, Serialize};

/// A production order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: String,
    /// Recipe to produce.
    pub recipe_id: String,
    /// Requested good-output quantity (≥ 0).
    pub quantity: f64,
}

impl Order {
    /// Creates a new order.
    pub fn new(id: impl Into<String>, recipe_id: impl Into<String>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            recipe_id: recipe_id.into(),
            quantity,
        }
    }
}
