//! Console and JSON output of a finished run.

use std::path::Path;

use anyhow::Context;
use lasernest_core::{NestingOutcome, OptimizationRun, RunSummary};
use lasernest_cutting::{CostBreakdown, ProductionSchedule};
use serde::Serialize;

/// Everything written by `--output`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub run: &'a OptimizationRun,
    pub summary: RunSummary,
    pub cost: CostBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ProductionSchedule>,
}

impl RunReport<'_> {
    /// Writes the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize run")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Prints the full report to stdout.
    pub fn print(&self) {
        print_summary(self.run, &self.summary);
        print_cost(&self.cost);
        if let Some(schedule) = &self.schedule {
            print_schedule(schedule);
        }
    }
}

fn print_summary(run: &OptimizationRun, summary: &RunSummary) {
    println!("\nNesting Result ({})", run.goal);
    println!("{:=<72}", "");
    println!(
        "{:<4} {:<20} {:>8} {:>10} {:>12} {:>12}",
        "#", "Sheet", "Parts", "Util %", "Waste m²", "Cut time s"
    );
    println!("{:-<72}", "");
    for layout in &run.layouts {
        println!(
            "{:<4} {:<20} {:>8} {:>10.1} {:>12.3} {:>12.1}",
            layout.index + 1,
            layout.sheet.id,
            layout.placed_count(),
            layout.utilization_percent,
            layout.waste_area / 1_000_000.0,
            layout.cutting_time_s
        );
    }
    println!("{:-<72}", "");
    println!(
        "Sheets: {}  Placed: {}/{}  Utilization: {:.1}%  Time: {}ms",
        summary.total_sheets,
        summary.total_placed,
        summary.total_requested,
        summary.overall_utilization_percent,
        run.computation_time_ms
    );
    for (id, count) in &summary.sheets_by_spec {
        println!("  {:<20} x{}", id, count);
    }
    println!("Stopped: {:?}", run.termination);

    for warning in &run.stock_warnings {
        println!(
            "WARNING: sheet {} used {} times, {} in stock",
            warning.sheet_id, warning.used, warning.available
        );
    }

    if let NestingOutcome::Partial { shortfall } = run.outcome() {
        println!("\nUnplaced parts:");
        for entry in shortfall {
            println!(
                "  {:<20} {}/{} placed, {} remaining",
                entry.part_id, entry.placed, entry.requested, entry.remaining
            );
        }
    }
}

fn print_cost(cost: &CostBreakdown) {
    println!("\nCost");
    println!("{:-<40}", "");
    println!("  Material:      {:>12.2}", cost.material_cost);
    println!("  Machine:       {:>12.2}", cost.machine_cost);
    println!("  Total:         {:>12.2}", cost.total_cost);
    println!("  Waste value:   {:>12.2}", cost.waste_value);
    println!("  Per part:      {:>12.2}", cost.cost_per_part);
    println!("  Per m²:        {:>12.2}", cost.cost_per_m2);
}

fn print_schedule(schedule: &ProductionSchedule) {
    println!("\nSchedule");
    println!("{:-<40}", "");
    println!(
        "  Machine hours: {:.2} (cutting {:.2}, handling {:.2})",
        schedule.machine_hours, schedule.cutting_hours, schedule.handling_hours
    );
    println!(
        "  Working days:  {} ({:.1} sheets/day)",
        schedule.working_days, schedule.sheets_per_day
    );
    for sheet in &schedule.sheets {
        println!(
            "  day {:<3} {:<20} {:>7.2}h - {:>7.2}h",
            sheet.day, sheet.sheet_id, sheet.start_hour, sheet.end_hour
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasernest_core::{Part, SheetSpec};
    use lasernest_cutting::{CuttingParameters, ScheduleParameters};
    use lasernest_d2::optimize;

    #[test]
    fn test_report_json_fields() {
        let parts = vec![Part::new("A", 100.0, 100.0, "al", 1.0).with_quantity(2)];
        let sheets = vec![SheetSpec::new("S", 500.0, 500.0, "al", 1.0, 30.0)];
        let cutting = CuttingParameters::default();
        let run = optimize(
            &parts,
            &sheets,
            &Default::default(),
            &cutting,
            Default::default(),
            5,
        )
        .unwrap();

        let report = RunReport {
            run: &run,
            summary: run.summary(),
            cost: CostBreakdown::from_run(&run, &cutting),
            schedule: Some(
                ProductionSchedule::project(&run, &cutting, &ScheduleParameters::default()).unwrap(),
            ),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["summary"]["total_placed"], 2);
        assert_eq!(value["run"]["termination"], "completed");
        assert_eq!(value["run"]["layouts"][0]["placements"][0]["rotation"], "0");
        assert!(value["schedule"]["machine_hours"].as_f64().unwrap() > 0.0);
    }
}
