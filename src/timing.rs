//! Timing and energy model.
//!
//! Pure functions mapping (machine parameters, quantity) to elapsed time and
//! energy. Nothing here inspects solver state; the model builder injects
//! these values as constant coefficients, and the schedule decoder calls the
//! same functions again so displayed figures can never drift from the model.
//!
//! # Conventions
//!
//! - Producing time is `quantity × unit_time`: batching groups work into
//!   load/unload cycles but never changes total unit-processing time.
//! - Loading/unloading are charged once per task or once per batch,
//!   according to [`ChargePolicy`].
//! - Energy follows the machine state occupied: loading time draws the
//!   loading rate, producing time the producing rate, and unloading holds
//!   the machine in its idle state, so unloading time draws the idle rate
//!   (no separate unloading draw exists). Idle time between tasks is
//!   charged to no task.
//! - Zero quantity yields zero batches, zero time, and zero energy.

use crate::config::ChargePolicy;
use crate::models::{EnergyBreakdown, MachineRecipeParams, PowerProfile, TimeBreakdown};

/// Number of batch runs needed for `quantity` at the given capacity.
pub fn batch_count(quantity: f64, batch_capacity: f64) -> u32 {
    if quantity <= 0.0 {
        return 0;
    }
    (quantity / batch_capacity).ceil() as u32
}

/// Time breakdown for producing `quantity` under the given parameters.
pub fn evaluate(params: &MachineRecipeParams, quantity: f64, policy: ChargePolicy) -> TimeBreakdown {
    if quantity <= 0.0 {
        return TimeBreakdown::default();
    }

    let batches = batch_count(quantity, params.batch_capacity);
    let cycles = match policy {
        ChargePolicy::PerTask => 1.0,
        ChargePolicy::PerBatch => batches as f64,
    };

    TimeBreakdown {
        loading_s: cycles * params.loading_s,
        producing_s: quantity * params.unit_time_s,
        unloading_s: cycles * params.unloading_s,
    }
}

/// Energy breakdown for a task with the given time breakdown.
pub fn energy(power: &PowerProfile, time: &TimeBreakdown) -> EnergyBreakdown {
    EnergyBreakdown {
        idle_kj: power.idle_kw * time.unloading_s,
        loading_kj: power.loading_kw * time.loading_s,
        producing_kj: power.producing_kw * time.producing_s,
    }
}
