//! Planning pipeline.
//!
//! One synchronous pass per request over an immutable snapshot:
//! validate → filter → build → solve → decode. The solver call is the only
//! long-running step and carries the caller's time budget; everything before
//! it fails fast, everything after it is deterministic bookkeeping.
//!
//! Independent planning calls may run concurrently: the planner takes
//! `&self` and never mutates the snapshot.

pub mod builder;
pub mod decoder;

use std::time::{Duration, Instant};

use tracing::info;

use crate::config::PlanConfig;
use crate::error::{PlanError, Result};
use crate::feasibility;
use crate::models::{FactorySnapshot, Schedule};
use crate::solver::{CbcSolver, MilpSolver, SolveOutcome};
use crate::validation::validate_snapshot;

/// How good the returned schedule is proven to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanStatus {
    /// Proven minimum makespan.
    Optimal,
    /// Feasible schedule; optimality not proven within the time budget.
    Feasible {
        /// Relative optimality gap, when the solver reports one.
        gap: Option<f64>,
    },
}

/// A successful planning result.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Solution quality.
    pub status: PlanStatus,
    /// The decoded schedule.
    pub schedule: Schedule,
}

/// The planning engine.
pub struct Planner {
    config: PlanConfig,
    solver: Box<dyn MilpSolver>,
}

impl Planner {
    /// Creates a planner with the default configuration and the CBC solver.
    pub fn new() -> Self {
        Self {
            config: PlanConfig::new(),
            solver: Box::new(CbcSolver::new()),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Swaps the solver backend.
    pub fn with_solver(mut self, solver: impl MilpSolver + 'static) -> Self {
        self.solver = Box::new(solver);
        self
    }

    /// Plans all orders in the snapshot within the given solver time budget.
    ///
    /// # Errors
    /// - [`PlanError::InvalidReference`] — the snapshot is internally
    ///   inconsistent (defensive re-validation).
    /// - [`PlanError::InfeasibleInput`] — some order has no eligible machine;
    ///   reported per order, before any solve.
    /// - [`PlanError::SolverInfeasible`] — orders are individually
    ///   schedulable but jointly over-constrained.
    /// - [`PlanError::TimedOut`] — the budget expired with no schedule found.
    pub fn plan(&self, snapshot: &FactorySnapshot, time_limit: Duration) -> Result<Plan> {
        let started = Instant::now();

        if let Err(errors) = validate_snapshot(snapshot) {
            let summary = errors
                .iter()
                .take(3)
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PlanError::InvalidReference(summary));
        }

        if snapshot.is_empty() {
            info!("no orders to plan");
            return Ok(Plan {
                status: PlanStatus::Optimal,
                schedule: Schedule::new(),
            });
        }

        info!(
            orders = snapshot.orders.len(),
            machines = snapshot.machines.len(),
            "planning started"
        );

        let candidates = feasibility::eligible_candidates(snapshot, &self.config)?;
        info!(
            candidates = candidates.iter().map(|o| o.candidates.len()).sum::<usize>(),
            "feasibility filtering complete"
        );

        let model = builder::build_model(snapshot, candidates)?;

        let outcome = self.solver.solve(&model.milp, time_limit)?;
        let (values, status) = match outcome {
            SolveOutcome::Optimal { values, objective } => {
                info!(objective, "solver proved optimality");
                (values, PlanStatus::Optimal)
            }
            SolveOutcome::Feasible {
                values,
                objective,
                gap,
            } => {
                info!(objective, ?gap, "solver returned a feasible incumbent");
                (values, PlanStatus::Feasible { gap })
            }
            SolveOutcome::Infeasible => return Err(PlanError::SolverInfeasible),
            SolveOutcome::Unbounded => return Err(PlanError::Unbounded),
            SolveOutcome::TimedOut => return Err(PlanError::TimedOut),
        };

        let schedule = decoder::decode(snapshot, &model, &values, &self.config)?;
        info!(
            makespan_s = schedule.makespan_s,
            total_energy_kj = schedule.total_energy_kj,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "planning complete"
        );

        Ok(Plan { status, schedule })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}
