//! Solver adapter.
//!
//! The planner talks to optimization backends through [`MilpSolver`], a
//! single capability with variant outcomes. Any correct integer/linear
//! solver satisfies the contract; callers must not assume determinism of
//! tie-breaking among equal-objective solutions.
//!
//! Infeasible, unbounded, and timed-out solves carry no assignment and must
//! be propagated as failures — never silently turned into an empty schedule.

mod cbc;

pub use cbc::CbcSolver;

use std::time::Duration;

use crate::error::Result;
use crate::milp::{MilpModel, VariableValues};

/// Outcome of one solve call.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// Proven-optimal assignment.
    Optimal {
        /// Solved variable values.
        values: VariableValues,
        /// Objective value.
        objective: f64,
    },
    /// Feasible but not proven-optimal assignment (budget exhausted).
    Feasible {
        /// Solved variable values.
        values: VariableValues,
        /// Objective value of the incumbent.
        objective: f64,
        /// Relative optimality gap, when the backend reports one.
        gap: Option<f64>,
    },
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective can be improved without bound.
    Unbounded,
    /// The time budget expired with no feasible assignment found.
    TimedOut,
}

impl SolveOutcome {
    /// The usable assignment, if this outcome carries one.
    pub fn values(&self) -> Option<&VariableValues> {
        match self {
            SolveOutcome::Optimal { values, .. } | SolveOutcome::Feasible { values, .. } => {
                Some(values)
            }
            _ => None,
        }
    }
}

/// A mixed-integer linear programming backend.
///
/// `solve` blocks for at most roughly `time_limit`; on expiry it returns
/// [`SolveOutcome::TimedOut`] (or a best-found [`SolveOutcome::Feasible`])
/// rather than blocking indefinitely.
pub trait MilpSolver {
    /// Solves the model within the given wall-clock budget.
    fn solve(&self, model: &MilpModel, time_limit: Duration) -> Result<SolveOutcome>;
}
