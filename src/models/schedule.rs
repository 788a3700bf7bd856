//! Schedule (solution) model.
//!
//! A schedule is the engine's output: per-machine, start-ordered task lists
//! with per-task time and energy accounting, plus the makespan and total
//! energy aggregates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time a task spends in each machine state (seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    /// Loading time (s).
    pub loading_s: f64,
    /// Producing time (s).
    pub producing_s: f64,
    /// Unloading time (s).
    pub unloading_s: f64,
}

impl TimeBreakdown {
    /// Total task duration (s).
    #[inline]
    pub fn total_s(&self) -> f64 {
        self.loading_s + self.producing_s + self.unloading_s
    }
}

/// Energy a task draws in each machine state (kJ).
///
/// Unload cycles hold the machine in its idle state, so unloading time
/// accrues to the idle bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    /// Energy drawn at the idle rate (kJ).
    pub idle_kj: f64,
    /// Energy drawn while loading (kJ).
    pub loading_kj: f64,
    /// Energy drawn while producing (kJ).
    pub producing_kj: f64,
}

impl EnergyBreakdown {
    /// Total task energy (kJ).
    #[inline]
    pub fn total_kj(&self) -> f64 {
        self.idle_kj + self.loading_kj + self.producing_kj
    }
}

/// One production run: an order's recipe executed on one machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Order being fulfilled.
    pub order_id: String,
    /// Recipe being produced.
    pub recipe_id: String,
    /// Machine the task runs on.
    pub machine_id: String,
    /// Gross quantity produced (after yield adjustment).
    pub quantity: f64,
    /// Number of batch runs the quantity splits into.
    pub batches: u32,
    /// Start time (s).
    pub start_s: f64,
    /// End time (s).
    pub end_s: f64,
    /// Time per machine state.
    pub time: TimeBreakdown,
    /// Energy per machine state.
    pub energy: EnergyBreakdown,
}

impl Task {
    /// Task duration (end − start) in seconds.
    #[inline]
    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }

    /// Total energy consumed (kJ).
    #[inline]
    pub fn energy_kj(&self) -> f64 {
        self.energy.total_kj()
    }
}

/// A complete production schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Machine id → tasks ordered by start time.
    pub machines: BTreeMap<String, Vec<Task>>,
    /// Latest task end time across all machines (s).
    pub makespan_s: f64,
    /// Sum of all tasks' energy (kJ).
    pub total_energy_kj: f64,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks on a given machine, ordered by start time.
    pub fn tasks_for_machine(&self, machine_id: &str) -> &[Task] {
        self.machines
            .get(machine_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over all tasks, grouped by machine.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.machines.values().flatten()
    }

    /// Finds the task fulfilling a given order.
    pub fn task_for_order(&self, order_id: &str) -> Option<&Task> {
        self.tasks().find(|t| t.order_id == order_id)
    }

    /// Number of scheduled tasks.
    pub fn task_count(&self) -> usize {
        self.machines.values().map(Vec::len).sum()
    }

    /// Latest end time among a machine's tasks, if it has any.
    pub fn machine_completion_s(&self, machine_id: &str) -> Option<f64> {
        self.tasks_for_machine(machine_id)
            .iter()
            .map(|t| t.end_s)
            .fold(None, |acc, end| Some(acc.map_or(end, |m: f64| m.max(end))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(order: &str, machine: &str, start: f64, end: f64, energy: f64) -> Task {
        Task {
            order_id: order.into(),
            recipe_id: "r".into(),
            machine_id: machine.into(),
            quantity: 10.0,
            batches: 1,
            start_s: start,
            end_s: end,
            time: TimeBreakdown {
                loading_s: 0.0,
                producing_s: end - start,
                unloading_s: 0.0,
            },
            energy: EnergyBreakdown {
                idle_kj: 0.0,
                loading_kj: 0.0,
                producing_kj: energy,
            },
        }
    }

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.machines.insert(
            "m1".into(),
            vec![
                make_task("o1", "m1", 0.0, 100.0, 50.0),
                make_task("o2", "m1", 100.0, 250.0, 75.0),
            ],
        );
        s.machines
            .insert("m2".into(), vec![make_task("o3", "m2", 0.0, 80.0, 40.0)]);
        s.makespan_s = 250.0;
        s.total_energy_kj = 165.0;
        s
    }

    #[test]
    fn test_breakdown_totals() {
        let t = TimeBreakdown {
            loading_s: 60.0,
            producing_s: 750.0,
            unloading_s: 60.0,
        };
        assert!((t.total_s() - 870.0).abs() < 1e-9);

        let e = EnergyBreakdown {
            idle_kj: 0.0,
            loading_kj: 120.0,
            producing_kj: 1800.0,
        };
        assert!((e.total_kj() - 1920.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_queries() {
        let s = sample_schedule();
        assert_eq!(s.task_count(), 3);
        assert_eq!(s.tasks_for_machine("m1").len(), 2);
        assert!(s.tasks_for_machine("m9").is_empty());
        assert_eq!(s.task_for_order("o3").unwrap().machine_id, "m2");
        assert!(s.task_for_order("o9").is_none());
    }

    #[test]
    fn test_machine_completion() {
        let s = sample_schedule();
        assert_eq!(s.machine_completion_s("m1"), Some(250.0));
        assert_eq!(s.machine_completion_s("m2"), Some(80.0));
        assert_eq!(s.machine_completion_s("m9"), None);
    }

    #[test]
    fn test_task_duration_and_energy() {
        let t = make_task("o1", "m1", 10.0, 110.0, 42.0);
        assert!((t.duration_s() - 100.0).abs() < 1e-12);
        assert!((t.energy_kj() - 42.0).abs() < 1e-12);
    }
}
