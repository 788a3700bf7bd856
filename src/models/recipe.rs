//! Recipe model.
//!
//! A recipe describes how one unit of good output is produced: the materials
//! it consumes, the fraction of gross production that survives as good output
//! (yield), and the per-machine operating parameters of every machine able to
//! run it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Unit;

/// How a specific machine runs a specific recipe.
///
/// All times are in seconds. `unit_time_s` is the per-unit processing time;
/// `batch_capacity` is the largest quantity one batch run can hold before the
/// machine must unload and reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRecipeParams {
    /// Processing time per output unit (s).
    pub unit_time_s: f64,
    /// Loading time (s).
    pub loading_s: f64,
    /// Unloading time (s).
    pub unloading_s: f64,
    /// Maximum quantity per batch run.
    pub batch_capacity: f64,
}

impl MachineRecipeParams {
    /// Creates parameters with the given per-unit rate and batch capacity.
    pub fn new(unit_time_s: f64, batch_capacity: f64) -> Self {
        Self {
            unit_time_s,
            loading_s: 0.0,
            unloading_s: 0.0,
            batch_capacity,
        }
    }

    /// Sets the loading time.
    pub fn with_loading(mut self, loading_s: f64) -> Self {
        self.loading_s = loading_s;
        self
    }

    /// Sets the unloading time.
    pub fn with_unloading(mut self, unloading_s: f64) -> Self {
        self.unloading_s = unloading_s;
        self
    }
}

/// A recipe: material requirements, yield, and eligible machines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Material id → quantity consumed per unit of gross output.
    pub ingredients: BTreeMap<String, f64>,
    /// Fraction of gross production that is good output, in (0, 1].
    pub yield_rate: f64,
    /// Unit of the produced output.
    pub output_unit: Unit,
    /// Machine id → operating parameters on that machine.
    pub machines: BTreeMap<String, MachineRecipeParams>,
}

impl Recipe {
    /// Creates a new recipe with the given yield rate.
    pub fn new(id: impl Into<String>, yield_rate: f64, output_unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            ingredients: BTreeMap::new(),
            yield_rate,
            output_unit,
            machines: BTreeMap::new(),
        }
    }

    /// Sets the recipe name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a material requirement (quantity per unit of gross output).
    pub fn with_ingredient(mut self, material_id: impl Into<String>, per_unit: f64) -> Self {
        self.ingredients.insert(material_id.into(), per_unit);
        self
    }

    /// Declares a machine able to run this recipe.
    pub fn with_machine(
        mut self,
        machine_id: impl Into<String>,
        params: MachineRecipeParams,
    ) -> Self {
        self.machines.insert(machine_id.into(), params);
        self
    }

    /// Operating parameters on a given machine, if it can run this recipe.
    pub fn params_for(&self, machine_id: &str) -> Option<&MachineRecipeParams> {
        self.machines.get(machine_id)
    }

    /// Gross quantity that must be produced so that `requested` units of
    /// good output remain after yield losses.
    ///
    /// Discrete outputs are rounded up to whole units; a fractional piece
    /// cannot be produced.
    pub fn gross_quantity(&self, requested: f64) -> f64 {
        if requested <= 0.0 {
            return 0.0;
        }
        let gross = requested / self.yield_rate;
        if self.output_unit.is_discrete() {
            gross.ceil()
        } else {
            gross
        }
    }
}
