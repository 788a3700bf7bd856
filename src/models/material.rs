//! Raw material model.
//!
//! A material is a stocked input consumed by recipes. Discrete materials
//! (pieces) are counted in whole units; continuous materials (mass, volume)
//! in fractional quantities.

use serde::{Deserialize, Serialize};

/// Unit of measure for materials and recipe outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Discrete pieces.
    Piece,
    /// Kilograms.
    Kilogram,
    /// Grams.
    Gram,
    /// Liters.
    Liter,
    /// Milliliters.
    Milliliter,
}

impl Unit {
    /// Whether quantities in this unit are whole-valued.
    ///
    /// Discrete quantities are rounded up wherever yield losses would
    /// otherwise produce a fractional piece count.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Unit::Piece)
    }

    /// Short display symbol (e.g. "kg", "pc").
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Piece => "pc",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Liter => "L",
            Unit::Milliliter => "mL",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A stocked raw material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique material identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Unit of measure.
    pub unit: Unit,
    /// Available stock quantity (non-negative).
    pub stock: f64,
}

impl Material {
    /// Creates a new material with the given stock.
    pub fn new(id: impl Into<String>, unit: Unit, stock: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            unit,
            stock,
        }
    }

    /// Sets the material name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builder() {
        let m = Material::new("flour", Unit::Kilogram, 250.0).with_name("Flour 00");
        assert_eq!(m.id, "flour");
        assert_eq!(m.name, "Flour 00");
        assert_eq!(m.unit, Unit::Kilogram);
        assert!((m.stock - 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_discreteness() {
        assert!(Unit::Piece.is_discrete());
        assert!(!Unit::Kilogram.is_discrete());
        assert!(!Unit::Liter.is_discrete());
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Unit::Piece.to_string(), "pc");
        assert_eq!(Unit::Milliliter.to_string(), "mL");
    }
}
