//! Planning domain models.
//!
//! Immutable value definitions of the factory world — materials, recipes,
//! machines, orders — and the output types the planner produces. Behavior is
//! limited to invariant-preserving derivations (gross quantities, working
//! seconds, aggregate queries); all planning logic lives above this layer.

mod machine;
mod material;
mod order;
mod recipe;
mod schedule;
mod snapshot;

pub use machine::{Machine, PowerProfile};
pub use material::{Material, Unit};
pub use order::Order;
pub use recipe::{MachineRecipeParams, Recipe};
pub use schedule::{EnergyBreakdown, Schedule, Task, TimeBreakdown};
pub use snapshot::FactorySnapshot;
