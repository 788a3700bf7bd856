//! Planning error types.
//!
//! Input infeasibility is detected and surfaced before any solver call;
//! solver-level failures are surfaced as-is. The engine never degrades a
//! failure into a partial or empty-but-successful schedule.

use thiserror::Error;

/// Why an order has no eligible machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// No machine can run the order's recipe.
    NoCapableMachine,
    /// Every capable machine was rejected for lack of material stock.
    InsufficientMaterial,
    /// The task exceeds every capable machine's daily working hours.
    ExceedsWorkingHours,
}

impl std::fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            InfeasibleReason::NoCapableMachine => "no capable machine",
            InfeasibleReason::InsufficientMaterial => "insufficient material stock",
            InfeasibleReason::ExceedsWorkingHours => {
                "exceeds all machines' working-hour capacity"
            }
        };
        f.write_str(msg)
    }
}

/// A planning failure.
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    /// The snapshot references an undefined entity.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// An order has no eligible machine after feasibility filtering.
    #[error("order '{order_id}' cannot be scheduled: {reason}")]
    InfeasibleInput {
        order_id: String,
        reason: InfeasibleReason,
    },

    /// Each order is individually schedulable, but no joint schedule exists.
    #[error("no feasible schedule exists for the combined orders")]
    SolverInfeasible,

    /// The optimization model is unbounded.
    #[error("the optimization model is unbounded")]
    Unbounded,

    /// The solver exhausted its time budget without finding any schedule.
    #[error("solver exhausted its time budget without finding a schedule")]
    TimedOut,

    /// The solver failed outside its outcome contract.
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanError>;
