//! Factory snapshot: the immutable input to a planning call.
//!
//! A snapshot is an explicitly passed catalog of materials, recipes, machines,
//! and orders. Planning never mutates it, so independent planning calls may
//! share one snapshot by reference. Maps are `BTreeMap`-backed so iteration
//! order — and therefore model construction — is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Machine, Material, Order, Recipe};

/// An immutable snapshot of factory state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactorySnapshot {
    /// Materials by id.
    pub materials: BTreeMap<String, Material>,
    /// Recipes by id.
    pub recipes: BTreeMap<String, Recipe>,
    /// Machines by id.
    pub machines: BTreeMap<String, Machine>,
    /// Orders, in submission order.
    pub orders: Vec<Order>,
}

impl FactorySnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.insert(material.id.clone(), material);
        self
    }

    /// Adds a recipe.
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.insert(recipe.id.clone(), recipe);
        self
    }

    /// Adds a machine.
    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machines.insert(machine.id.clone(), machine);
        self
    }

    /// Adds an order.
    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Looks up a material.
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Looks up a recipe.
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Looks up a machine.
    pub fn machine(&self, id: &str) -> Option<&Machine> {
        self.machines.get(id)
    }

    /// Whether the snapshot holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MachineRecipeParams, Unit};

    #[test]
    fn test_snapshot_builder() {
        let snapshot = FactorySnapshot::new()
            .with_material(Material::new("flour", Unit::Kilogram, 100.0))
            .with_recipe(
                Recipe::new("bread", 1.0, Unit::Piece)
                    .with_ingredient("flour", 0.5)
                    .with_machine("oven-1", MachineRecipeParams::new(10.0, 50.0)),
            )
            .with_machine(Machine::new("oven-1", 8.0).with_recipe("bread"))
            .with_order(Order::new("ord-1", "bread", 10.0));

        assert!(snapshot.material("flour").is_some());
        assert!(snapshot.recipe("bread").is_some());
        assert!(snapshot.machine("oven-1").is_some());
        assert_eq!(snapshot.orders.len(), 1);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = FactorySnapshot::new();
        assert!(snapshot.is_empty());
        assert!(snapshot.material("x").is_none());
    }
}
