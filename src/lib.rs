//! Factory production planning engine.
//!
//! Assigns recipe executions (fulfilling orders) to machines and times,
//! minimizing makespan while respecting machine capability, material stock,
//! batch limits, yield losses, and daily working hours, and reporting
//! per-task and total energy consumption.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Material`, `Recipe`, `Machine`, `Order`,
//!   `FactorySnapshot`, and the output types `Task` and `Schedule`
//! - **`validation`**: Snapshot integrity checks (references, eligibility
//!   consistency)
//! - **`feasibility`**: Pre-solve pruning of (order, machine) pairs
//! - **`timing`**: Pure time/energy math for a quantity on a machine
//! - **`milp`**: Solver-agnostic optimization model types
//! - **`planner`**: Model builder, schedule decoder, and the `Planner`
//!   pipeline
//! - **`solver`**: The `MilpSolver` capability and its CBC backend
//! - **`loader`** / **`generator`** / **`report`**: Data boundary
//!   collaborators — JSON loading, synthetic data, text rendering
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use factory_plan::models::{
//!     FactorySnapshot, Machine, MachineRecipeParams, Order, PowerProfile, Recipe, Unit,
//! };
//! use factory_plan::planner::Planner;
//!
//! let snapshot = FactorySnapshot::new()
//!     .with_recipe(
//!         Recipe::new("biscuit", 1.0, Unit::Piece).with_machine(
//!             "press",
//!             MachineRecipeParams::new(0.5, 1000.0)
//!                 .with_loading(60.0)
//!                 .with_unloading(60.0),
//!         ),
//!     )
//!     .with_machine(
//!         Machine::new("press", 8.0)
//!             .with_power(PowerProfile::new(0.0, 2.0, 2.4))
//!             .with_recipe("biscuit"),
//!     )
//!     .with_order(Order::new("ord-1", "biscuit", 1500.0));
//!
//! let plan = Planner::new().plan(&snapshot, Duration::from_secs(30))?;
//! println!("makespan: {} s", plan.schedule.makespan_s);
//! # Ok::<(), factory_plan::error::PlanError>(())
//! ```

pub mod config;
pub mod error;
pub mod feasibility;
pub mod generator;
pub mod loader;
pub mod logging;
pub mod milp;
pub mod models;
pub mod planner;
pub mod report;
pub mod solver;
pub mod timing;
pub mod validation;

pub use config::{ChargePolicy, PlanConfig};
pub use error::{InfeasibleReason, PlanError};
pub use models::{FactorySnapshot, Schedule, Task};
pub use planner::{Plan, PlanStatus, Planner};
