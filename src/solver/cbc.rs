//! CBC backend for the solver adapter.
//!
//! Translates a [`MilpModel`](crate::milp::MilpModel) into a `good_lp`
//! problem on the COIN-OR CBC solver, forwards the caller's time budget to
//! CBC's own wall-clock limit, and maps the solve result back onto the
//! adapter's outcome contract.
//!
//! CBC does not report a MIP gap through this interface, so optimality is
//! classified by the budget: a solve that returns inside the budget is
//! `Optimal`, one that exhausts it but still produced an incumbent is
//! `Feasible` with an unknown gap.

use std::time::{Duration, Instant};

use good_lp::constraint::{eq, geq, leq};
use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{variable, Expression, ProblemVariables, Solution, SolverModel, Variable};
use tracing::debug;

use super::{MilpSolver, SolveOutcome};
use crate::error::{PlanError, Result};
use crate::milp::{Comparison, LinearExpr, MilpModel, Sense, VarKind, VariableValues};

/// COIN-OR CBC solver via `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CbcSolver;

impl CbcSolver {
    /// Creates a CBC solver.
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant);
    for (var, coeff) in &expr.terms {
        out += handles[var.0] * *coeff;
    }
    out
}

impl MilpSolver for CbcSolver {
    fn solve(&self, model: &MilpModel, time_limit: Duration) -> Result<SolveOutcome> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables
            .iter()
            .map(|kind| match kind {
                VarKind::Binary => vars.add(variable().binary()),
                VarKind::Continuous { min, max } => {
                    let mut def = variable().min(*min);
                    if max.is_finite() {
                        def = def.max(*max);
                    }
                    vars.add(def)
                }
            })
            .collect();

        let objective = to_expression(&model.objective, &handles);
        let mut problem = match model.sense {
            Sense::Minimize => vars.minimise(objective.clone()).using(coin_cbc),
            Sense::Maximize => vars.maximise(objective.clone()).using(coin_cbc),
        };
        problem.set_parameter("log", "0");
        problem.set_parameter("seconds", &format!("{:.3}", time_limit.as_secs_f64()));

        for constraint in &model.constraints {
            let lhs = to_expression(&constraint.expr, &handles);
            let c = match constraint.op {
                Comparison::LessOrEqual => leq(lhs, constraint.rhs),
                Comparison::Equal => eq(lhs, constraint.rhs),
                Comparison::GreaterOrEqual => geq(lhs, constraint.rhs),
            };
            problem = problem.with(c);
        }

        debug!(
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            budget_s = time_limit.as_secs_f64(),
            "invoking CBC"
        );

        let started = Instant::now();
        match problem.solve() {
            Ok(solution) => {
                let values =
                    VariableValues::new(handles.iter().map(|h| solution.value(*h)).collect());
                let objective = model.objective.eval(&values);
                if started.elapsed() < time_limit {
                    Ok(SolveOutcome::Optimal { values, objective })
                } else {
                    Ok(SolveOutcome::Feasible {
                        values,
                        objective,
                        gap: None,
                    })
                }
            }
            Err(good_lp::ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
            Err(good_lp::ResolutionError::Unbounded) => Ok(SolveOutcome::Unbounded),
            Err(other) => {
                if started.elapsed() >= time_limit {
                    Ok(SolveOutcome::TimedOut)
                } else {
                    Err(PlanError::Solver(other.to_string()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::{Comparison, LinearExpr, MilpModel, Sense};

    const BUDGET: Duration = Duration::from_secs(10);

    #[test]
    fn test_continuous_minimum() {
        // min x + y  s.t.  x + y ≥ 10, x ≤ 6, y ≤ 6 → objective 10.
        let mut model = MilpModel::new();
        let x = model.add_continuous(0.0, 6.0);
        let y = model.add_continuous(0.0, 6.0);
        model.add_constraint(
            LinearExpr::term(x, 1.0).plus(y, 1.0),
            Comparison::GreaterOrEqual,
            10.0,
        );
        model.set_objective(LinearExpr::term(x, 1.0).plus(y, 1.0), Sense::Minimize);

        match CbcSolver::new().solve(&model, BUDGET).unwrap() {
            SolveOutcome::Optimal { objective, .. } => {
                assert!((objective - 10.0).abs() < 1e-6);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_binary_selection() {
        // Pick exactly one of two binaries; the cheaper one wins.
        let mut model = MilpModel::new();
        let a = model.add_binary();
        let b = model.add_binary();
        model.add_constraint(
            LinearExpr::term(a, 1.0).plus(b, 1.0),
            Comparison::Equal,
            1.0,
        );
        model.set_objective(LinearExpr::term(a, 5.0).plus(b, 3.0), Sense::Minimize);

        match CbcSolver::new().solve(&model, BUDGET).unwrap() {
            SolveOutcome::Optimal { values, objective } => {
                assert!(!values.is_set(a));
                assert!(values.is_set(b));
                assert!((objective - 3.0).abs() < 1e-6);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_infeasible_model() {
        let mut model = MilpModel::new();
        let x = model.add_continuous(0.0, 3.0);
        model.add_constraint(LinearExpr::term(x, 1.0), Comparison::GreaterOrEqual, 5.0);
        model.set_objective(LinearExpr::term(x, 1.0), Sense::Minimize);

        match CbcSolver::new().solve(&model, BUDGET).unwrap() {
            SolveOutcome::Infeasible => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_maximization() {
        let mut model = MilpModel::new();
        let x = model.add_continuous(0.0, 7.5);
        model.set_objective(LinearExpr::term(x, 2.0), Sense::Maximize);

        match CbcSolver::new().solve(&model, BUDGET).unwrap() {
            SolveOutcome::Optimal { values, objective } => {
                assert!((values.value(x) - 7.5).abs() < 1e-6);
                assert!((objective - 15.0).abs() < 1e-6);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
