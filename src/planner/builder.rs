//! Optimization model builder.
//!
//! Translates filtered (order, machine) candidates into a mixed-integer
//! linear program:
//!
//! - one binary assignment variable per candidate (an order runs whole on
//!   exactly one machine — no splitting),
//! - continuous start/end variables per order task,
//! - one sequencing binary per order pair that shares a candidate machine,
//!   driving big-M disjunctions that forbid overlap on a shared machine,
//! - aggregate material rows capping cross-order consumption at stock,
//! - per-candidate working-hour caps,
//! - a makespan variable bounded below by every task end.
//!
//! Task durations and energies enter as constant coefficients from the
//! timing model; the solver never re-derives them.
//!
//! The objective is makespan plus a small multiple of total assigned time,
//! which breaks ties among equal-makespan assignments toward less total
//! machine time without disturbing the primary goal.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{InfeasibleReason, PlanError, Result};
use crate::feasibility::OrderCandidates;
use crate::milp::{Comparison, LinearExpr, MilpModel, Sense, VarId};
use crate::models::FactorySnapshot;

/// Weight of the total-time tie-break term in the objective.
const TIE_BREAK_EPSILON: f64 = 1e-4;

/// Slack tolerated when comparing a duration against a working-hour cap.
const HOURS_TOLERANCE_S: f64 = 1e-6;

/// Where each decision variable lives in the model.
#[derive(Debug, Clone)]
pub struct PlanVars {
    /// (order id, machine id) → assignment binary.
    pub assignment: BTreeMap<(String, String), VarId>,
    /// Order id → task start (s).
    pub start: BTreeMap<String, VarId>,
    /// Order id → task end (s).
    pub end: BTreeMap<String, VarId>,
    /// (earlier order id, later order id) → sequencing binary
    /// (1 = first order precedes second on a shared machine).
    pub sequencing: BTreeMap<(String, String), VarId>,
    /// Makespan variable.
    pub makespan: VarId,
}

/// A built optimization model plus the candidate data needed to decode it.
#[derive(Debug, Clone)]
pub struct PlanModel {
    /// The solver-facing program.
    pub milp: MilpModel,
    /// Variable layout.
    pub vars: PlanVars,
    /// Candidates that made it into the model, per order.
    pub orders: Vec<OrderCandidates>,
    /// Big-M horizon: the largest machine working-day (s).
    pub horizon_s: f64,
}

/// Builds the assignment-and-timing program from filtered candidates.
///
/// Candidates whose lone-task duration already exceeds their machine's daily
/// working hours can never be scheduled and are dropped with a warning; an
/// order emptied this way is an input error, reported before any solve.
pub fn build_model(
    snapshot: &FactorySnapshot,
    orders: Vec<OrderCandidates>,
) -> Result<PlanModel> {
    let orders = drop_over_hour_candidates(snapshot, orders)?;

    let horizon_s = orders
        .iter()
        .flat_map(|o| &o.candidates)
        .filter_map(|c| snapshot.machine(&c.machine_id))
        .map(|m| m.working_seconds())
        .fold(0.0f64, f64::max);

    let mut milp = MilpModel::new();
    let mut assignment = BTreeMap::new();
    let mut start = BTreeMap::new();
    let mut end = BTreeMap::new();
    let mut sequencing = BTreeMap::new();

    for order in &orders {
        for candidate in &order.candidates {
            let x = milp.add_binary();
            assignment.insert((order.order_id.clone(), candidate.machine_id.clone()), x);
        }
        start.insert(order.order_id.clone(), milp.add_continuous(0.0, horizon_s));
        end.insert(order.order_id.clone(), milp.add_continuous(0.0, horizon_s));
    }
    let makespan = milp.add_continuous(0.0, horizon_s);

    // Each order is assigned to exactly one eligible machine.
    for order in &orders {
        let mut sum = LinearExpr::new();
        for candidate in &order.candidates {
            sum = sum.plus(
                assignment[&(order.order_id.clone(), candidate.machine_id.clone())],
                1.0,
            );
        }
        milp.add_constraint(sum, Comparison::Equal, 1.0);
    }

    // End = start + assigned duration.
    for order in &orders {
        let mut expr = LinearExpr::term(end[&order.order_id], 1.0).plus(start[&order.order_id], -1.0);
        for candidate in &order.candidates {
            expr = expr.plus(
                assignment[&(order.order_id.clone(), candidate.machine_id.clone())],
                -candidate.duration_s(),
            );
        }
        milp.add_constraint(expr, Comparison::Equal, 0.0);
    }

    // Working hours: end ≤ H_m when assigned to machine m
    // (end + M·x ≤ H_m + M).
    for order in &orders {
        for candidate in &order.candidates {
            let hours_s = snapshot
                .machine(&candidate.machine_id)
                .map(|m| m.working_seconds())
                .unwrap_or(horizon_s);
            let x = assignment[&(order.order_id.clone(), candidate.machine_id.clone())];
            let expr = LinearExpr::term(end[&order.order_id], 1.0).plus(x, horizon_s);
            milp.add_constraint(expr, Comparison::LessOrEqual, hours_s + horizon_s);
        }
    }

    // Aggregate material consumption across all orders stays within stock.
    for (material_id, row) in material_rows(snapshot, &orders, &assignment) {
        let stock = snapshot
            .material(&material_id)
            .map(|m| m.stock)
            .unwrap_or(0.0);
        milp.add_constraint(row, Comparison::LessOrEqual, stock);
    }

    // No two tasks overlap on a shared machine: big-M disjunction driven by
    // one sequencing binary per order pair.
    for i in 0..orders.len() {
        for j in (i + 1)..orders.len() {
            let (first, second) = (&orders[i], &orders[j]);
            let shared: Vec<&str> = first
                .candidates
                .iter()
                .map(|c| c.machine_id.as_str())
                .filter(|m| second.candidates.iter().any(|c| c.machine_id == *m))
                .collect();
            if shared.is_empty() {
                continue;
            }

            let y = milp.add_binary();
            sequencing.insert((first.order_id.clone(), second.order_id.clone()), y);

            for machine_id in shared {
                let x_first = assignment[&(first.order_id.clone(), machine_id.to_string())];
                let x_second = assignment[&(second.order_id.clone(), machine_id.to_string())];

                // y = 1 → first ends before second starts.
                let expr = LinearExpr::term(end[&first.order_id], 1.0)
                    .plus(start[&second.order_id], -1.0)
                    .plus(y, horizon_s)
                    .plus(x_first, horizon_s)
                    .plus(x_second, horizon_s);
                milp.add_constraint(expr, Comparison::LessOrEqual, 3.0 * horizon_s);

                // y = 0 → second ends before first starts.
                let expr = LinearExpr::term(end[&second.order_id], 1.0)
                    .plus(start[&first.order_id], -1.0)
                    .plus(y, -horizon_s)
                    .plus(x_first, horizon_s)
                    .plus(x_second, horizon_s);
                milp.add_constraint(expr, Comparison::LessOrEqual, 2.0 * horizon_s);
            }
        }
    }

    // Makespan bounds every task end.
    for order in &orders {
        let expr = LinearExpr::term(end[&order.order_id], 1.0).plus(makespan, -1.0);
        milp.add_constraint(expr, Comparison::LessOrEqual, 0.0);
    }

    // Minimize makespan, tie-broken by total assigned time.
    let mut objective = LinearExpr::term(makespan, 1.0);
    for order in &orders {
        for candidate in &order.candidates {
            objective = objective.plus(
                assignment[&(order.order_id.clone(), candidate.machine_id.clone())],
                TIE_BREAK_EPSILON * candidate.duration_s(),
            );
        }
    }
    milp.set_objective(objective, Sense::Minimize);

    debug!(
        orders = orders.len(),
        variables = milp.variable_count(),
        constraints = milp.constraint_count(),
        horizon_s,
        "model built"
    );

    Ok(PlanModel {
        milp,
        vars: PlanVars {
            assignment,
            start,
            end,
            sequencing,
            makespan,
        },
        orders,
        horizon_s,
    })
}

/// Drops candidates whose single-task duration exceeds the machine's day.
fn drop_over_hour_candidates(
    snapshot: &FactorySnapshot,
    orders: Vec<OrderCandidates>,
) -> Result<Vec<OrderCandidates>> {
    let mut filtered = Vec::with_capacity(orders.len());

    for mut order in orders {
        order.candidates.retain(|candidate| {
            let hours_s = snapshot
                .machine(&candidate.machine_id)
                .map(|m| m.working_seconds())
                .unwrap_or(0.0);
            let fits = candidate.duration_s() <= hours_s + HOURS_TOLERANCE_S;
            if !fits {
                warn!(
                    order = %candidate.order_id,
                    machine = %candidate.machine_id,
                    duration_s = candidate.duration_s(),
                    hours_s,
                    "candidate excluded: task cannot fit one working day"
                );
            }
            fits
        });

        if order.candidates.is_empty() {
            return Err(PlanError::InfeasibleInput {
                order_id: order.order_id,
                reason: InfeasibleReason::ExceedsWorkingHours,
            });
        }
        filtered.push(order);
    }

    Ok(filtered)
}

/// One linear row per material consumed by any candidate:
/// `Σ gross × per-unit × x[order, machine]`.
fn material_rows(
    snapshot: &FactorySnapshot,
    orders: &[OrderCandidates],
    assignment: &BTreeMap<(String, String), VarId>,
) -> BTreeMap<String, LinearExpr> {
    let mut rows: BTreeMap<String, LinearExpr> = BTreeMap::new();

    for order in orders {
        for candidate in &order.candidates {
            let Some(recipe) = snapshot.recipe(&candidate.recipe_id) else {
                continue;
            };
            let x = assignment[&(order.order_id.clone(), candidate.machine_id.clone())];
            for (material_id, per_unit) in &recipe.ingredients {
                rows.entry(material_id.clone())
                    .or_default()
                    .terms
                    .push((x, candidate.gross_quantity * per_unit));
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::feasibility::eligible_candidates;
    use crate::models::{Machine, MachineRecipeParams, Material, Order, Recipe, Unit};

    fn snapshot_two_orders_one_machine() -> FactorySnapshot {
        FactorySnapshot::new()
            .with_recipe(
                Recipe::new("widget", 1.0, Unit::Piece)
                    .with_machine("press", MachineRecipeParams::new(1.0, 100.0)),
            )
            .with_machine(Machine::new("press", 8.0).with_recipe("widget"))
            .with_order(Order::new("a", "widget", 50.0))
            .with_order(Order::new("b", "widget", 80.0))
    }

    fn build(snapshot: &FactorySnapshot) -> Result<PlanModel> {
        let candidates = eligible_candidates(snapshot, &PlanConfig::new())?;
        build_model(snapshot, candidates)
    }

    #[test]
    fn test_variable_layout() {
        let snapshot = snapshot_two_orders_one_machine();
        let model = build(&snapshot).unwrap();

        // x ×2, start/end ×2 each, one shared-machine pair binary, makespan.
        assert_eq!(model.vars.assignment.len(), 2);
        assert_eq!(model.vars.start.len(), 2);
        assert_eq!(model.vars.end.len(), 2);
        assert_eq!(model.vars.sequencing.len(), 1);
        assert_eq!(model.milp.variable_count(), 8);
    }

    #[test]
    fn test_constraint_layout() {
        let snapshot = snapshot_two_orders_one_machine();
        let model = build(&snapshot).unwrap();

        // 2 assignment + 2 linkage + 2 hours + 2 disjunction + 2 makespan;
        // no materials in this recipe.
        assert_eq!(model.milp.constraint_count(), 10);
    }

    #[test]
    fn test_horizon_is_largest_working_day() {
        let snapshot = FactorySnapshot::new()
            .with_recipe(
                Recipe::new("widget", 1.0, Unit::Piece)
                    .with_machine("small", MachineRecipeParams::new(1.0, 100.0))
                    .with_machine("large", MachineRecipeParams::new(1.0, 100.0)),
            )
            .with_machine(Machine::new("small", 4.0).with_recipe("widget"))
            .with_machine(Machine::new("large", 12.0).with_recipe("widget"))
            .with_order(Order::new("a", "widget", 10.0));

        let model = build(&snapshot).unwrap();
        assert!((model.horizon_s - 12.0 * 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_material_row_coefficients() {
        let snapshot = FactorySnapshot::new()
            .with_material(Material::new("steel", Unit::Kilogram, 500.0))
            .with_recipe(
                Recipe::new("widget", 1.0, Unit::Piece)
                    .with_ingredient("steel", 2.0)
                    .with_machine("press", MachineRecipeParams::new(1.0, 100.0)),
            )
            .with_machine(Machine::new("press", 8.0).with_recipe("widget"))
            .with_order(Order::new("a", "widget", 100.0));

        let model = build(&snapshot).unwrap();
        // One material row: 100 × 2.0 × x ≤ 500.
        let row = model
            .milp
            .constraints
            .iter()
            .find(|c| (c.rhs - 500.0).abs() < 1e-9)
            .expect("material row present");
        assert_eq!(row.op, Comparison::LessOrEqual);
        assert_eq!(row.expr.terms.len(), 1);
        assert!((row.expr.terms[0].1 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_over_hours_candidate_dropped() {
        // 1 s/unit × 40 000 units > 8 h on "slow"; "fast" at 0.1 s/unit fits.
        let snapshot = FactorySnapshot::new()
            .with_recipe(
                Recipe::new("widget", 1.0, Unit::Piece)
                    .with_machine("slow", MachineRecipeParams::new(1.0, 100_000.0))
                    .with_machine("fast", MachineRecipeParams::new(0.1, 100_000.0)),
            )
            .with_machine(Machine::new("slow", 8.0).with_recipe("widget"))
            .with_machine(Machine::new("fast", 8.0).with_recipe("widget"))
            .with_order(Order::new("a", "widget", 40_000.0));

        let model = build(&snapshot).unwrap();
        assert_eq!(model.orders[0].candidates.len(), 1);
        assert_eq!(model.orders[0].candidates[0].machine_id, "fast");
    }

    #[test]
    fn test_no_machine_fits_working_day() {
        let snapshot = FactorySnapshot::new()
            .with_recipe(
                Recipe::new("widget", 1.0, Unit::Piece)
                    .with_machine("slow", MachineRecipeParams::new(1.0, 100_000.0)),
            )
            .with_machine(Machine::new("slow", 8.0).with_recipe("widget"))
            .with_order(Order::new("a", "widget", 40_000.0));

        match build(&snapshot).unwrap_err() {
            PlanError::InfeasibleInput { order_id, reason } => {
                assert_eq!(order_id, "a");
                assert_eq!(reason, InfeasibleReason::ExceedsWorkingHours);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_disjoint_machines_need_no_sequencing() {
        let snapshot = FactorySnapshot::new()
            .with_recipe(
                Recipe::new("widget", 1.0, Unit::Piece)
                    .with_machine("press-1", MachineRecipeParams::new(1.0, 100.0)),
            )
            .with_recipe(
                Recipe::new("gear", 1.0, Unit::Piece)
                    .with_machine("press-2", MachineRecipeParams::new(1.0, 100.0)),
            )
            .with_machine(Machine::new("press-1", 8.0).with_recipe("widget"))
            .with_machine(Machine::new("press-2", 8.0).with_recipe("gear"))
            .with_order(Order::new("a", "widget", 10.0))
            .with_order(Order::new("b", "gear", 10.0));

        let model = build(&snapshot).unwrap();
        assert!(model.vars.sequencing.is_empty());
    }
}
