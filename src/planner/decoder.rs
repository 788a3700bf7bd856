//! Schedule decoding.
//!
//! Converts a solved assignment into a [`Schedule`]: picks each order's
//! chosen machine from the assignment binaries, takes start times from the
//! solved continuous variables, and recomputes durations and energies
//! through the timing model rather than trusting solver-side arithmetic, so
//! reported figures always agree with an independent recomputation.
//!
//! Decoding is deterministic for a fixed assignment: no assignment logic
//! runs here, and per-machine task lists are ordered by start time with the
//! order id as tie-break.

use crate::config::PlanConfig;
use crate::error::{PlanError, Result};
use crate::milp::VariableValues;
use crate::models::{FactorySnapshot, Schedule, Task};
use crate::timing;

use super::builder::PlanModel;

/// Decodes solver output into a concrete schedule.
pub fn decode(
    snapshot: &FactorySnapshot,
    model: &PlanModel,
    values: &VariableValues,
    config: &PlanConfig,
) -> Result<Schedule> {
    let mut schedule = Schedule::new();

    for order in &model.orders {
        let candidate = order
            .candidates
            .iter()
            .find(|c| {
                values.is_set(
                    model.vars.assignment[&(order.order_id.clone(), c.machine_id.clone())],
                )
            })
            .ok_or_else(|| {
                PlanError::Solver(format!(
                    "assignment missing for order '{}'",
                    order.order_id
                ))
            })?;

        let recipe = snapshot.recipe(&candidate.recipe_id).ok_or_else(|| {
            PlanError::InvalidReference(format!("unknown recipe '{}'", candidate.recipe_id))
        })?;
        let machine = snapshot.machine(&candidate.machine_id).ok_or_else(|| {
            PlanError::InvalidReference(format!("unknown machine '{}'", candidate.machine_id))
        })?;
        let params = recipe.params_for(&candidate.machine_id).ok_or_else(|| {
            PlanError::InvalidReference(format!(
                "recipe '{}' has no parameters for machine '{}'",
                recipe.id, machine.id
            ))
        })?;

        // Recomputed, not read back from the model's coefficients.
        let time = timing::evaluate(params, candidate.gross_quantity, config.charge_policy);
        let energy = timing::energy(&machine.power, &time);

        // Solver round-off can leave a start at −1e-12; clamp to the day start.
        let start_s = values.value(model.vars.start[&order.order_id]).max(0.0);

        schedule
            .machines
            .entry(candidate.machine_id.clone())
            .or_default()
            .push(Task {
                order_id: order.order_id.clone(),
                recipe_id: candidate.recipe_id.clone(),
                machine_id: candidate.machine_id.clone(),
                quantity: candidate.gross_quantity,
                batches: timing::batch_count(candidate.gross_quantity, params.batch_capacity),
                start_s,
                end_s: start_s + time.total_s(),
                time,
                energy,
            });
    }

    for tasks in schedule.machines.values_mut() {
        tasks.sort_by(|a, b| {
            a.start_s
                .total_cmp(&b.start_s)
                .then_with(|| a.order_id.cmp(&b.order_id))
        });
    }

    schedule.makespan_s = schedule.tasks().map(|t| t.end_s).fold(0.0, f64::max);
    schedule.total_energy_kj = schedule.tasks().map(Task::energy_kj).sum();

    Ok(schedule)
}
