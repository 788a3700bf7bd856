//! Plan reporting.
//!
//! Renders a computed plan as human-readable text: a per-machine timeline
//! with per-task quantities, times, and energy, followed by the aggregate
//! figures. Pure formatting over the engine's structured output.

use std::fmt::Write;

use crate::models::FactorySnapshot;
use crate::planner::{Plan, PlanStatus};

/// Renders a plan as a text report.
pub fn render(plan: &Plan, snapshot: &FactorySnapshot) -> String {
    let mut out = String::new();

    let status = match plan.status {
        PlanStatus::Optimal => "optimal".to_string(),
        PlanStatus::Feasible { gap: Some(gap) } => format!("feasible, gap {:.2}%", gap * 100.0),
        PlanStatus::Feasible { gap: None } => "feasible".to_string(),
    };
    let _ = writeln!(out, "Production plan ({status})");
    let _ = writeln!(out, "  makespan:     {:.1} s", plan.schedule.makespan_s);
    let _ = writeln!(out, "  total energy: {:.1} kJ", plan.schedule.total_energy_kj);

    for (machine_id, tasks) in &plan.schedule.machines {
        let name = snapshot
            .machine(machine_id)
            .map(|m| m.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(machine_id);
        let _ = writeln!(out, "\n{name} [{machine_id}]");

        for task in tasks {
            let unit = snapshot
                .recipe(&task.recipe_id)
                .map(|r| r.output_unit.symbol())
                .unwrap_or("");
            let _ = writeln!(
                out,
                "  {:<12} {:<12} {:>10.1} {unit:<3} {:>2} batch(es)  {:>8.1} → {:>8.1} s  {:>9.1} kJ",
                task.order_id,
                task.recipe_id,
                task.quantity,
                task.batches,
                task.start_s,
                task.end_s,
                task.energy_kj(),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EnergyBreakdown, Machine, MachineRecipeParams, Order, Recipe, Schedule, Task,
        TimeBreakdown, Unit,
    };

    fn sample() -> (Plan, FactorySnapshot) {
        let snapshot = FactorySnapshot::new()
            .with_recipe(
                Recipe::new("biscuit", 1.0, Unit::Piece)
                    .with_machine("press", MachineRecipeParams::new(0.5, 1000.0)),
            )
            .with_machine(Machine::new("press", 8.0).with_name("Press 1").with_recipe("biscuit"))
            .with_order(Order::new("ord-1", "biscuit", 1500.0));

        let mut schedule = Schedule::new();
        schedule.machines.insert(
            "press".into(),
            vec![Task {
                order_id: "ord-1".into(),
                recipe_id: "biscuit".into(),
                machine_id: "press".into(),
                quantity: 1500.0,
                batches: 2,
                start_s: 0.0,
                end_s: 870.0,
                time: TimeBreakdown {
                    loading_s: 60.0,
                    producing_s: 750.0,
                    unloading_s: 60.0,
                },
                energy: EnergyBreakdown {
                    idle_kj: 0.0,
                    loading_kj: 120.0,
                    producing_kj: 1800.0,
                },
            }],
        );
        schedule.makespan_s = 870.0;
        schedule.total_energy_kj = 1920.0;

        (
            Plan {
                status: PlanStatus::Optimal,
                schedule,
            },
            snapshot,
        )
    }

    #[test]
    fn test_report_contains_totals_and_machines() {
        let (plan, snapshot) = sample();
        let text = render(&plan, &snapshot);
        assert!(text.contains("optimal"));
        assert!(text.contains("870.0 s"));
        assert!(text.contains("1920.0 kJ"));
        assert!(text.contains("Press 1 [press]"));
        assert!(text.contains("ord-1"));
        assert!(text.contains("pc"));
    }

    #[test]
    fn test_feasible_status_line() {
        let (mut plan, snapshot) = sample();
        plan.status = PlanStatus::Feasible { gap: Some(0.05) };
        let text = render(&plan, &snapshot);
        assert!(text.contains("feasible, gap 5.00%"));
    }
}
