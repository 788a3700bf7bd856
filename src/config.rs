//! Planner configuration.

use serde::{Deserialize, Serialize};

/// When loading and unloading time (and their energy) are charged.
///
/// The source data is ambiguous on whether a multi-batch task pays one
/// load/unload cycle in total or one per batch; both conventions are
/// supported and fixed per planning call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargePolicy {
    /// Loading and unloading are charged once per task.
    #[default]
    PerTask,
    /// Loading and unloading are charged once per batch run.
    PerBatch,
}

/// Configuration for a planning call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Load/unload charge convention.
    pub charge_policy: ChargePolicy,
}

impl PlanConfig {
    /// Creates the default configuration (per-task charging).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the load/unload charge convention.
    pub fn with_charge_policy(mut self, policy: ChargePolicy) -> Self {
        self.charge_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_per_task() {
        assert_eq!(PlanConfig::new().charge_policy, ChargePolicy::PerTask);
    }

    #[test]
    fn test_with_charge_policy() {
        let cfg = PlanConfig::new().with_charge_policy(ChargePolicy::PerBatch);
        assert_eq!(cfg.charge_policy, ChargePolicy::PerBatch);
    }
}
