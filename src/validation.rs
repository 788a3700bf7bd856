//! Snapshot integrity checks.
//!
//! The loader validates structure and values before a snapshot reaches the
//! engine; the engine re-validates the logical relationships defensively.
//! Detects:
//! - Orders referencing undefined recipes
//! - Recipes referencing undefined materials or machines
//! - Disagreement between a machine's recipe set and the recipes'
//!   eligible-machine sets (the two views must be consistent)
//! - Duplicate order identifiers

use crate::models::FactorySnapshot;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An order references a recipe that doesn't exist.
    UnknownRecipe,
    /// A recipe ingredient references a material that doesn't exist.
    UnknownMaterial,
    /// A recipe's eligible-machine set references a machine that doesn't exist.
    UnknownMachine,
    /// Machine and recipe disagree on eligibility.
    InconsistentEligibility,
    /// Two orders share the same ID.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the logical consistency of a factory snapshot.
///
/// Checks:
/// 1. Every order's recipe exists
/// 2. Every recipe ingredient's material exists
/// 3. Every machine id in a recipe's eligible set exists
/// 4. Machine↔recipe eligibility views agree in both directions
/// 5. No duplicate order IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &FactorySnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut order_ids = HashSet::new();
    for order in &snapshot.orders {
        if !order_ids.insert(order.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate order ID: {}", order.id),
            ));
        }
        if !snapshot.recipes.contains_key(&order.recipe_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRecipe,
                format!(
                    "Order '{}' references unknown recipe '{}'",
                    order.id, order.recipe_id
                ),
            ));
        }
    }

    for recipe in snapshot.recipes.values() {
        for material_id in recipe.ingredients.keys() {
            if !snapshot.materials.contains_key(material_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownMaterial,
                    format!(
                        "Recipe '{}' references unknown material '{}'",
                        recipe.id, material_id
                    ),
                ));
            }
        }

        for machine_id in recipe.machines.keys() {
            match snapshot.machine(machine_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownMachine,
                    format!(
                        "Recipe '{}' references unknown machine '{}'",
                        recipe.id, machine_id
                    ),
                )),
                Some(machine) if !machine.supports(&recipe.id) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InconsistentEligibility,
                        format!(
                            "Recipe '{}' lists machine '{}' but the machine does not list the recipe",
                            recipe.id, machine_id
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    // Reverse direction: a machine claiming a recipe the recipe doesn't claim.
    for machine in snapshot.machines.values() {
        for recipe_id in &machine.recipes {
            match snapshot.recipe(recipe_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRecipe,
                    format!(
                        "Machine '{}' references unknown recipe '{}'",
                        machine.id, recipe_id
                    ),
                )),
                Some(recipe) if !recipe.machines.contains_key(&machine.id) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InconsistentEligibility,
                        format!(
                            "Machine '{}' lists recipe '{}' but the recipe does not list the machine",
                            machine.id, recipe_id
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
