//! Machine model.
//!
//! A machine is a production resource with a power profile and a daily
//! working-hour limit. Which recipes it can run is declared on both the
//! machine and the recipe; `validation` enforces that the two views agree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Power draw (kW) of a machine in each operating state.
///
/// Energy charged to a task is draw × time spent in the state; idle time
/// between tasks is charged to no task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerProfile {
    /// Draw while idle (kW).
    pub idle_kw: f64,
    /// Draw while loading (kW).
    pub loading_kw: f64,
    /// Draw while producing (kW).
    pub producing_kw: f64,
}

impl PowerProfile {
    /// Creates a power profile from the three state draws.
    pub fn new(idle_kw: f64, loading_kw: f64, producing_kw: f64) -> Self {
        Self {
            idle_kw,
            loading_kw,
            producing_kw,
        }
    }
}

/// A production machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Power draw per operating state.
    pub power: PowerProfile,
    /// Maximum working hours per day.
    pub max_hours_per_day: f64,
    /// Recipes this machine can run (must mirror `Recipe::machines`).
    pub recipes: BTreeSet<String>,
}

impl Machine {
    /// Creates a new machine with the given daily working-hour limit.
    pub fn new(id: impl Into<String>, max_hours_per_day: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            power: PowerProfile::default(),
            max_hours_per_day,
            recipes: BTreeSet::new(),
        }
    }

    /// Sets the machine name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the power profile.
    pub fn with_power(mut self, power: PowerProfile) -> Self {
        self.power = power;
        self
    }

    /// Declares a recipe this machine can run.
    pub fn with_recipe(mut self, recipe_id: impl Into<String>) -> Self {
        self.recipes.insert(recipe_id.into());
        self
    }

    /// Whether this machine declares the given recipe.
    pub fn supports(&self, recipe_id: &str) -> bool {
        self.recipes.contains(recipe_id)
    }

    /// Daily working-hour limit in seconds.
    #[inline]
    pub fn working_seconds(&self) -> f64 {
        self.max_hours_per_day * 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_builder() {
        let m = Machine::new("oven-1", 8.0)
            .with_name("Deck Oven 1")
            .with_power(PowerProfile::new(0.2, 2.0, 2.4))
            .with_recipe("bread")
            .with_recipe("pizza");

        assert_eq!(m.id, "oven-1");
        assert!(m.supports("bread"));
        assert!(!m.supports("cake"));
        assert!((m.power.producing_kw - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_working_seconds() {
        let m = Machine::new("m", 8.0);
        assert!((m.working_seconds() - 28_800.0).abs() < 1e-9);
    }
}
