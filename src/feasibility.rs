//! Feasibility filtering.
//!
//! Prunes (order, machine) pairs that cannot possibly produce, before any
//! model is built. A candidate survives when its machine can run the order's
//! recipe and — assuming this order were the sole consumer — stock covers the
//! gross material requirement. Cross-order contention over shared materials
//! is a joint property and is left to the aggregate stock constraints in the
//! model builder.
//!
//! An order whose eligible set comes out empty is a hard input error,
//! reported here with its reason rather than discovered later as an opaque
//! solver infeasibility.

use tracing::debug;

use crate::config::PlanConfig;
use crate::error::{InfeasibleReason, PlanError, Result};
use crate::models::{EnergyBreakdown, FactorySnapshot, TimeBreakdown};
use crate::timing;

/// A surviving (order, machine) pairing with its precomputed figures.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Order this candidate would fulfill.
    pub order_id: String,
    /// Recipe being produced.
    pub recipe_id: String,
    /// Machine the task would run on.
    pub machine_id: String,
    /// Gross quantity to produce (yield-adjusted).
    pub gross_quantity: f64,
    /// Number of batch runs.
    pub batches: u32,
    /// Time breakdown under the configured charge policy.
    pub time: TimeBreakdown,
    /// Energy breakdown on this machine.
    pub energy: EnergyBreakdown,
}

impl Candidate {
    /// Total task duration on this machine (s).
    #[inline]
    pub fn duration_s(&self) -> f64 {
        self.time.total_s()
    }
}

/// An order together with its non-empty candidate set.
#[derive(Debug, Clone)]
pub struct OrderCandidates {
    /// The order.
    pub order_id: String,
    /// Eligible machines, in deterministic (machine id) order.
    pub candidates: Vec<Candidate>,
}

/// Computes the eligible candidate set for every order.
///
/// # Errors
/// [`PlanError::InvalidReference`] if an order names an undefined recipe
/// (normally caught earlier by `validation`), and
/// [`PlanError::InfeasibleInput`] if any order ends with no candidate.
pub fn eligible_candidates(
    snapshot: &FactorySnapshot,
    config: &PlanConfig,
) -> Result<Vec<OrderCandidates>> {
    let mut result = Vec::with_capacity(snapshot.orders.len());

    for order in &snapshot.orders {
        let recipe = snapshot.recipe(&order.recipe_id).ok_or_else(|| {
            PlanError::InvalidReference(format!(
                "order '{}' references unknown recipe '{}'",
                order.id, order.recipe_id
            ))
        })?;

        if recipe.machines.is_empty() {
            return Err(PlanError::InfeasibleInput {
                order_id: order.id.clone(),
                reason: InfeasibleReason::NoCapableMachine,
            });
        }

        let gross = recipe.gross_quantity(order.quantity);
        let shortfall = first_stock_shortfall(snapshot, recipe, gross);
        let mut candidates = Vec::new();
        let mut stock_rejections = 0usize;

        for (machine_id, params) in &recipe.machines {
            let machine = snapshot.machine(machine_id).ok_or_else(|| {
                PlanError::InvalidReference(format!(
                    "recipe '{}' references unknown machine '{}'",
                    recipe.id, machine_id
                ))
            })?;

            if let Some((material_id, need, stock)) = shortfall {
                debug!(
                    order = %order.id,
                    machine = %machine_id,
                    material = %material_id,
                    need,
                    stock,
                    "candidate rejected: material shortfall"
                );
                stock_rejections += 1;
                continue;
            }

            let time = timing::evaluate(params, gross, config.charge_policy);
            let energy = timing::energy(&machine.power, &time);

            debug!(
                order = %order.id,
                machine = %machine_id,
                gross,
                duration_s = time.total_s(),
                "candidate accepted"
            );

            candidates.push(Candidate {
                order_id: order.id.clone(),
                recipe_id: recipe.id.clone(),
                machine_id: machine_id.clone(),
                gross_quantity: gross,
                batches: timing::batch_count(gross, params.batch_capacity),
                time,
                energy,
            });
        }

        if candidates.is_empty() {
            let reason = if stock_rejections > 0 {
                InfeasibleReason::InsufficientMaterial
            } else {
                InfeasibleReason::NoCapableMachine
            };
            return Err(PlanError::InfeasibleInput {
                order_id: order.id.clone(),
                reason,
            });
        }

        result.push(OrderCandidates {
            order_id: order.id.clone(),
            candidates,
        });
    }

    Ok(result)
}

/// First material whose stock cannot cover the gross requirement, if any.
///
/// Sole-consumer check: the order is assumed to be the only draw on stock.
fn first_stock_shortfall<'a>(
    snapshot: &'a FactorySnapshot,
    recipe: &'a crate::models::Recipe,
    gross: f64,
) -> Option<(&'a str, f64, f64)> {
    for (material_id, per_unit) in &recipe.ingredients {
        let stock = snapshot
            .material(material_id)
            .map(|m| m.stock)
            .unwrap_or(0.0);
        let need = gross * per_unit;
        if need > stock + 1e-9 {
            return Some((material_id.as_str(), need, stock));
        }
    }
    None
}
