//! Synthetic factory data generation.
//!
//! Produces random materials, recipes, machines, and orders for testing and
//! demos. Counts are configurable and default to small random ranges; a
//! fixed RNG seed reproduces the same factory. Generated snapshots always
//! satisfy the loader's validation rules (consistent eligibility views,
//! in-range values); they are not guaranteed to be *schedulable* — scarce
//! stock or tight working hours are legitimate test inputs.

use std::fs;
use std::path::Path;

use rand::prelude::IndexedRandom;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::loader::LoadError;
use crate::models::{
    FactorySnapshot, Machine, MachineRecipeParams, Material, Order, PowerProfile, Recipe, Unit,
};

const MATERIAL_NAMES: &[&str] = &[
    "Flour", "Sugar", "Butter", "Eggs", "Milk", "Cream", "Chocolate", "Vanilla", "Salt", "Yeast",
    "Honey", "Oil", "Cocoa", "Almonds", "Hazelnuts", "Cinnamon", "Raisins", "Coconut",
];

const MATERIAL_VARIANTS: &[&str] = &["00", "Type 1", "Type 2", "Premium", "Organic", "Fine"];

const PRODUCT_NAMES: &[&str] = &[
    "Sourdough Loaf", "Baguette", "Croissant", "Brioche", "Ciabatta", "Focaccia", "Pretzel",
    "Biscuit", "Muffin", "Shortbread", "Panettone", "Grissini",
];

const MACHINE_NAMES: &[&str] = &["Mixer", "Oven", "Press", "Extruder", "Proofer", "Kneader"];

const UNITS: &[Unit] = &[
    Unit::Piece,
    Unit::Kilogram,
    Unit::Gram,
    Unit::Liter,
    Unit::Milliliter,
];

/// Counts and bounds for generation. `None` counts pick a random range.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of materials (default: random 5–15).
    pub materials: Option<usize>,
    /// Number of recipes (default: random 3–10).
    pub recipes: Option<usize>,
    /// Number of machines (default: random 2–5).
    pub machines: Option<usize>,
    /// Number of orders (default: random 2–8).
    pub orders: Option<usize>,
    /// Smallest order quantity to request.
    pub min_quantity: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            materials: None,
            recipes: None,
            machines: None,
            orders: None,
            min_quantity: 10.0,
        }
    }
}

/// Generates a random factory snapshot.
pub fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> FactorySnapshot {
    let material_count = config.materials.unwrap_or_else(|| rng.random_range(5..=15));
    let recipe_count = config.recipes.unwrap_or_else(|| rng.random_range(3..=10));
    let machine_count = config.machines.unwrap_or_else(|| rng.random_range(2..=5));
    let order_count = config.orders.unwrap_or_else(|| rng.random_range(2..=8));

    let materials = generate_materials(material_count, rng);
    let mut machines = generate_machines(machine_count, rng);
    let recipes = generate_recipes(recipe_count, &materials, &machines, rng);

    // Mirror recipe eligibility onto the machines' redundant view.
    for recipe in &recipes {
        for machine_id in recipe.machines.keys() {
            if let Some(machine) = machines.iter_mut().find(|m| &m.id == machine_id) {
                machine.recipes.insert(recipe.id.clone());
            }
        }
    }

    let orders = generate_orders(order_count, &recipes, config.min_quantity, rng);

    info!(
        materials = materials.len(),
        recipes = recipes.len(),
        machines = machines.len(),
        orders = orders.len(),
        "generated factory data"
    );

    let mut snapshot = FactorySnapshot::new();
    for m in materials {
        snapshot = snapshot.with_material(m);
    }
    for r in recipes {
        snapshot = snapshot.with_recipe(r);
    }
    for m in machines {
        snapshot = snapshot.with_machine(m);
    }
    for o in orders {
        snapshot = snapshot.with_order(o);
    }
    snapshot
}

/// Writes a snapshot to the loader's per-entity file layout.
pub fn save_dir(snapshot: &FactorySnapshot, dir: impl AsRef<Path>) -> Result<(), LoadError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| LoadError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let materials: Vec<_> = snapshot.materials.values().collect();
    let recipes: Vec<_> = snapshot.recipes.values().collect();
    let machines: Vec<_> = snapshot.machines.values().collect();

    write_json(&dir.join("materials.json"), &materials)?;
    write_json(&dir.join("recipes.json"), &recipes)?;
    write_json(&dir.join("machines.json"), &machines)?;
    write_json(&dir.join("orders.json"), &snapshot.orders)?;
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), LoadError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, text).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn generate_materials<R: Rng>(count: usize, rng: &mut R) -> Vec<Material> {
    let mut materials = Vec::with_capacity(count);
    let mut used = std::collections::HashSet::new();

    for i in 0..count {
        let base = MATERIAL_NAMES.choose(rng).copied().unwrap_or("Flour");
        let name = if rng.random_bool(0.5) {
            let variant = MATERIAL_VARIANTS.choose(rng).copied().unwrap_or("00");
            format!("{base} {variant}")
        } else {
            base.to_string()
        };
        if !used.insert(name.clone()) {
            // Name collision: fall back to an indexed variant.
            let name = format!("{base} #{i}");
            used.insert(name.clone());
            materials.push(random_material(i, name, rng));
            continue;
        }
        materials.push(random_material(i, name, rng));
    }
    materials
}

fn random_material<R: Rng>(index: usize, name: String, rng: &mut R) -> Material {
    let unit = *UNITS.choose(rng).unwrap_or(&Unit::Kilogram);
    let stock = if unit.is_discrete() {
        rng.random_range(500..=5000) as f64
    } else {
        rng.random_range(100.0..=2000.0)
    };
    Material::new(format!("material-{}", index + 1), unit, stock).with_name(name)
}

fn generate_machines<R: Rng>(count: usize, rng: &mut R) -> Vec<Machine> {
    (0..count)
        .map(|i| {
            let base = MACHINE_NAMES.choose(rng).copied().unwrap_or("Press");
            Machine::new(
                format!("machine-{}", i + 1),
                rng.random_range(8..=16) as f64,
            )
            .with_name(format!("{base} {}", i + 1))
            .with_power(PowerProfile::new(
                rng.random_range(0.1..=0.5),
                rng.random_range(0.5..=2.0),
                rng.random_range(1.0..=5.0),
            ))
        })
        .collect()
}

fn generate_recipes<R: Rng>(
    count: usize,
    materials: &[Material],
    machines: &[Machine],
    rng: &mut R,
) -> Vec<Recipe> {
    (0..count)
        .map(|i| {
            let name = PRODUCT_NAMES.choose(rng).copied().unwrap_or("Loaf");
            let output_unit = if rng.random_bool(0.7) {
                Unit::Piece
            } else {
                Unit::Kilogram
            };
            let mut recipe = Recipe::new(
                format!("recipe-{}", i + 1),
                rng.random_range(0.75..=1.0),
                output_unit,
            )
            .with_name(format!("{name} {}", i + 1));

            // 1–3 distinct ingredients.
            let mut pool: Vec<&Material> = materials.iter().collect();
            pool.shuffle(rng);
            for material in pool.iter().take(rng.random_range(1..=pool.len().clamp(1, 3))) {
                let per_unit = if material.unit.is_discrete() {
                    rng.random_range(1..=3) as f64
                } else {
                    rng.random_range(0.05..=1.0)
                };
                recipe = recipe.with_ingredient(material.id.clone(), per_unit);
            }

            // Non-empty random subset of machines can run it.
            let mut machine_pool: Vec<&Machine> = machines.iter().collect();
            machine_pool.shuffle(rng);
            for machine in machine_pool
                .iter()
                .take(rng.random_range(1..=machine_pool.len().max(1)))
            {
                recipe = recipe.with_machine(
                    machine.id.clone(),
                    MachineRecipeParams::new(
                        rng.random_range(0.5..=5.0),
                        rng.random_range(50..=500) as f64,
                    )
                    .with_loading(rng.random_range(30.0..=120.0))
                    .with_unloading(rng.random_range(30.0..=120.0)),
                );
            }
            recipe
        })
        .collect()
}

fn generate_orders<R: Rng>(
    count: usize,
    recipes: &[Recipe],
    min_quantity: f64,
    rng: &mut R,
) -> Vec<Order> {
    (0..count)
        .filter_map(|i| {
            let recipe = recipes.choose(rng)?;
            let mut quantity = rng.random_range(min_quantity..=min_quantity * 4.0);
            if recipe.output_unit.is_discrete() {
                quantity = quantity.round().max(1.0);
            }
            Some(Order::new(
                format!("order-{}", i + 1),
                recipe.id.clone(),
                quantity,
            ))
        })
        .collect()
}
