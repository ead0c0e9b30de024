//! Cost breakdown for a finished run.

use lasernest_core::OptimizationRun;

use crate::config::CuttingParameters;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Material and machine cost of an optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostBreakdown {
    /// Sum of sheet prices.
    pub material_cost: f64,
    /// Machine time (cutting plus sheet handling) at the hourly rate.
    pub machine_cost: f64,
    /// `material_cost + machine_cost`.
    pub total_cost: f64,
    /// Share of the material cost lost to offcuts.
    pub waste_value: f64,
    /// Total cost divided by placed instances (0 when nothing was placed).
    pub cost_per_part: f64,
    /// Total cost per square meter of placed parts (0 when nothing was placed).
    pub cost_per_m2: f64,
    /// Placed area over purchased area, percent.
    pub material_efficiency_percent: f64,
}

impl CostBreakdown {
    /// Prices the sheets and machine time of a run.
    pub fn from_run(run: &OptimizationRun, params: &CuttingParameters) -> Self {
        let summary = run.summary();
        let handling_s = params.sheet_handling_time_s * summary.total_sheets as f64;
        let machine_hours = (summary.total_cutting_time_s + handling_s) / 3600.0;
        let machine_cost = machine_hours * params.machine_hourly_rate;
        let total_cost = summary.total_cost + machine_cost;

        let placed = run.placed_count();
        let used_m2: f64 = run.layouts.iter().map(|l| l.used_area).sum::<f64>() / 1_000_000.0;

        Self {
            material_cost: summary.total_cost,
            machine_cost,
            total_cost,
            waste_value: summary.total_waste_value,
            cost_per_part: if placed > 0 {
                total_cost / placed as f64
            } else {
                0.0
            },
            cost_per_m2: if used_m2 > 0.0 {
                total_cost / used_m2
            } else {
                0.0
            },
            material_efficiency_percent: summary.overall_utilization_percent,
        }
    }
}
