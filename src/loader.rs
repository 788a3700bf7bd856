//! Factory data loading.
//!
//! Reads per-entity JSON files from a data directory and assembles a
//! validated [`FactorySnapshot`]. All structural and value validation happens
//! here, at the boundary: the planning engine receives only snapshots whose
//! values are in range and whose references resolve.
//!
//! Expected files: `materials.json`, `recipes.json`, `machines.json`,
//! `orders.json`, each holding a JSON array of the corresponding entity.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::models::{FactorySnapshot, Machine, Material, Order, Recipe};
use crate::validation::validate_snapshot;

/// A data-loading failure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data is structurally valid but logically wrong.
    #[error("invalid data: {0}")]
    Invalid(String),
}

/// Loads a snapshot from a data directory.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<FactorySnapshot, LoadError> {
    let dir = dir.as_ref();
    let materials: Vec<Material> = read_entities(&dir.join("materials.json"))?;
    let recipes: Vec<Recipe> = read_entities(&dir.join("recipes.json"))?;
    let machines: Vec<Machine> = read_entities(&dir.join("machines.json"))?;
    let orders: Vec<Order> = read_entities(&dir.join("orders.json"))?;

    let snapshot = build_snapshot(materials, recipes, machines, orders)?;
    info!(
        materials = snapshot.materials.len(),
        recipes = snapshot.recipes.len(),
        machines = snapshot.machines.len(),
        orders = snapshot.orders.len(),
        "factory data loaded"
    );
    Ok(snapshot)
}

/// Assembles and validates a snapshot from entity lists.
///
/// Checks value ranges, duplicate identifiers, and referential integrity;
/// the first violation fails the whole load.
pub fn build_snapshot(
    materials: Vec<Material>,
    recipes: Vec<Recipe>,
    machines: Vec<Machine>,
    orders: Vec<Order>,
) -> Result<FactorySnapshot, LoadError> {
    let mut snapshot = FactorySnapshot::new();

    for material in materials {
        if material.stock < 0.0 {
            return Err(LoadError::Invalid(format!(
                "material '{}' has negative stock",
                material.id
            )));
        }
        if snapshot.materials.contains_key(&material.id) {
            return Err(LoadError::Invalid(format!(
                "duplicate material '{}'",
                material.id
            )));
        }
        snapshot = snapshot.with_material(material);
    }

    for recipe in recipes {
        if !(recipe.yield_rate > 0.0 && recipe.yield_rate <= 1.0) {
            return Err(LoadError::Invalid(format!(
                "recipe '{}' has yield rate outside (0, 1]",
                recipe.id
            )));
        }
        for (machine_id, params) in &recipe.machines {
            if params.unit_time_s <= 0.0 || params.batch_capacity <= 0.0 {
                return Err(LoadError::Invalid(format!(
                    "recipe '{}' on machine '{machine_id}' needs a positive rate and batch capacity",
                    recipe.id
                )));
            }
            if params.loading_s < 0.0 || params.unloading_s < 0.0 {
                return Err(LoadError::Invalid(format!(
                    "recipe '{}' on machine '{machine_id}' has negative load times",
                    recipe.id
                )));
            }
        }
        for (material_id, per_unit) in &recipe.ingredients {
            if *per_unit <= 0.0 {
                return Err(LoadError::Invalid(format!(
                    "recipe '{}' requires a positive quantity of '{material_id}'",
                    recipe.id
                )));
            }
        }
        if snapshot.recipes.contains_key(&recipe.id) {
            return Err(LoadError::Invalid(format!("duplicate recipe '{}'", recipe.id)));
        }
        snapshot = snapshot.with_recipe(recipe);
    }

    for machine in machines {
        if machine.max_hours_per_day <= 0.0 {
            return Err(LoadError::Invalid(format!(
                "machine '{}' needs positive working hours",
                machine.id
            )));
        }
        let p = &machine.power;
        if p.idle_kw < 0.0 || p.loading_kw < 0.0 || p.producing_kw < 0.0 {
            return Err(LoadError::Invalid(format!(
                "machine '{}' has a negative power draw",
                machine.id
            )));
        }
        if snapshot.machines.contains_key(&machine.id) {
            return Err(LoadError::Invalid(format!(
                "duplicate machine '{}'",
                machine.id
            )));
        }
        snapshot = snapshot.with_machine(machine);
    }

    for order in orders {
        if order.quantity < 0.0 {
            return Err(LoadError::Invalid(format!(
                "order '{}' has negative quantity",
                order.id
            )));
        }
        snapshot = snapshot.with_order(order);
    }

    if let Err(errors) = validate_snapshot(&snapshot) {
        let summary = errors
            .iter()
            .take(3)
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(LoadError::Invalid(summary));
    }

    Ok(snapshot)
}

fn read_entities<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MachineRecipeParams, PowerProfile, Unit};
    use std::fs;

    fn valid_parts() -> (Vec<Material>, Vec<Recipe>, Vec<Machine>, Vec<Order>) {
        (
            vec![Material::new("flour", Unit::Kilogram, 100.0)],
            vec![Recipe::new("bread", 0.9, Unit::Piece)
                .with_ingredient("flour", 0.5)
                .with_machine("oven", MachineRecipeParams::new(10.0, 50.0))],
            vec![Machine::new("oven", 8.0)
                .with_power(PowerProfile::new(0.1, 1.0, 2.0))
                .with_recipe("bread")],
            vec![Order::new("ord-1", "bread", 20.0)],
        )
    }

    #[test]
    fn test_build_snapshot_valid() {
        let (m, r, mc, o) = valid_parts();
        let snapshot = build_snapshot(m, r, mc, o).unwrap();
        assert_eq!(snapshot.orders.len(), 1);
        assert!(snapshot.recipe("bread").is_some());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let (mut m, r, mc, o) = valid_parts();
        m[0].stock = -1.0;
        let err = build_snapshot(m, r, mc, o).unwrap_err();
        assert!(err.to_string().contains("negative stock"));
    }

    #[test]
    fn test_yield_out_of_range_rejected() {
        let (m, mut r, mc, o) = valid_parts();
        r[0].yield_rate = 1.5;
        let err = build_snapshot(m, r, mc, o).unwrap_err();
        assert!(err.to_string().contains("yield rate"));

        let (m, mut r, mc, o) = valid_parts();
        r[0].yield_rate = 0.0;
        assert!(build_snapshot(m, r, mc, o).is_err());
    }

    #[test]
    fn test_duplicate_machine_rejected() {
        let (m, r, mut mc, o) = valid_parts();
        mc.push(Machine::new("oven", 10.0).with_recipe("bread"));
        let err = build_snapshot(m, r, mc, o).unwrap_err();
        assert!(err.to_string().contains("duplicate machine"));
    }

    #[test]
    fn test_broken_reference_rejected() {
        let (m, r, mc, mut o) = valid_parts();
        o.push(Order::new("ord-2", "cake", 5.0));
        let err = build_snapshot(m, r, mc, o).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
        assert!(err.to_string().contains("cake"));
    }

    #[test]
    fn test_load_dir_round_trip() {
        let (m, r, mc, o) = valid_parts();
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("materials.json"),
            serde_json::to_string_pretty(&m).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("recipes.json"),
            serde_json::to_string_pretty(&r).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("machines.json"),
            serde_json::to_string_pretty(&mc).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("orders.json"),
            serde_json::to_string_pretty(&o).unwrap(),
        )
        .unwrap();

        let snapshot = load_dir(dir.path()).unwrap();
        assert_eq!(snapshot.orders.len(), 1);
        assert!((snapshot.material("flour").unwrap().stock - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("materials.json"), "not json").unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }
}
