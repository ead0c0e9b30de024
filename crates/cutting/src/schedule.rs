//! Production schedule projection.
//!
//! Projects the sheets of a run onto working shifts, one machine, sheets cut
//! in run order. Machine time per sheet is the estimated cutting time plus
//! sheet handling, stretched by the shop's efficiency factor.

use lasernest_core::{Error, OptimizationRun, Result};

use crate::config::CuttingParameters;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shop calendar used for the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleParameters {
    /// Length of one shift (h).
    pub hours_per_shift: f64,
    /// Shifts worked per day.
    pub shifts_per_day: u32,
    /// Share of shift time the machine is productive (0, 1].
    pub efficiency: f64,
}

impl Default for ScheduleParameters {
    fn default() -> Self {
        Self {
            hours_per_shift: 8.0,
            shifts_per_day: 1,
            efficiency: 0.85,
        }
    }
}

impl ScheduleParameters {
    /// Creates parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shift length.
    pub fn with_hours_per_shift(mut self, hours: f64) -> Self {
        self.hours_per_shift = hours;
        self
    }

    /// Sets the number of shifts per day.
    pub fn with_shifts_per_day(mut self, shifts: u32) -> Self {
        self.shifts_per_day = shifts;
        self
    }

    /// Sets the efficiency factor.
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Productive machine hours available per day.
    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_shift * self.shifts_per_day as f64
    }

    /// Rejects an empty calendar or an efficiency outside (0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(self.hours_per_shift.is_finite() && self.hours_per_shift > 0.0 && self.hours_per_shift <= 24.0) {
            return Err(Error::InvalidConfig(format!(
                "hours_per_shift must be in (0, 24], got {}",
                self.hours_per_shift
            )));
        }
        if self.shifts_per_day == 0 || self.hours_per_day() > 24.0 {
            return Err(Error::InvalidConfig(format!(
                "{} shifts of {} h do not fit in a day",
                self.shifts_per_day, self.hours_per_shift
            )));
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "efficiency must be in (0, 1], got {}",
                self.efficiency
            )));
        }
        Ok(())
    }
}

/// One sheet on the projected timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledSheet {
    /// Index of the sheet in the run.
    pub sheet_index: usize,
    /// Sheet spec identifier.
    pub sheet_id: String,
    /// Start, in productive hours from the beginning of the job.
    pub start_hour: f64,
    /// End, in productive hours from the beginning of the job.
    pub end_hour: f64,
    /// 1-based working day on which the sheet finishes.
    pub day: u32,
}

/// Projected machine load for a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductionSchedule {
    /// Beam-on time over all sheets (h).
    pub cutting_hours: f64,
    /// Sheet loading and unloading (h).
    pub handling_hours: f64,
    /// Cutting plus handling, divided by efficiency (h).
    pub machine_hours: f64,
    /// Working days needed (at least 1 when any sheet is scheduled).
    pub working_days: u32,
    /// Average sheets finished per working day.
    pub sheets_per_day: f64,
    /// Per-sheet timeline in run order.
    pub sheets: Vec<ScheduledSheet>,
}

impl ProductionSchedule {
    /// Projects the sheets of `run` onto the shop calendar.
    pub fn project(
        run: &OptimizationRun,
        cutting: &CuttingParameters,
        calendar: &ScheduleParameters,
    ) -> Result<Self> {
        calendar.validate()?;
        let hours_per_day = calendar.hours_per_day();

        let mut sheets = Vec::with_capacity(run.layouts.len());
        let mut clock = 0.0_f64;
        let mut cutting_hours = 0.0;
        let mut handling_hours = 0.0;

        for layout in &run.layouts {
            let cut_h = layout.cutting_time_s / 3600.0;
            let handle_h = cutting.sheet_handling_time_s / 3600.0;
            cutting_hours += cut_h;
            handling_hours += handle_h;

            let start_hour = clock;
            clock += (cut_h + handle_h) / calendar.efficiency;
            sheets.push(ScheduledSheet {
                sheet_index: layout.index,
                sheet_id: layout.sheet.id.clone(),
                start_hour,
                end_hour: clock,
                day: day_of(clock, hours_per_day),
            });
        }

        let working_days = if sheets.is_empty() {
            0
        } else {
            day_of(clock, hours_per_day)
        };
        let sheets_per_day = if working_days > 0 {
            sheets.len() as f64 / working_days as f64
        } else {
            0.0
        };

        Ok(Self {
            cutting_hours,
            handling_hours,
            machine_hours: clock,
            working_days,
            sheets_per_day,
            sheets,
        })
    }
}

/// 1-based day on which `hour` of productive time falls.
fn day_of(hour: f64, hours_per_day: f64) -> u32 {
    ((hour / hours_per_day - 1e-9).ceil() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lasernest_core::{OptimizationGoal, SheetLayout, SheetSpec};

    fn run_with_cut_times(times: &[f64]) -> OptimizationRun {
        let mut run = OptimizationRun::new(OptimizationGoal::Balanced);
        for (i, &t) in times.iter().enumerate() {
            let spec = SheetSpec::new(format!("S{}", i), 1000.0, 1000.0, "al", 1.0, 10.0);
            run.layouts.push(SheetLayout::new(i, spec, Vec::new(), t));
        }
        run
    }

    #[test]
    fn test_projection() {
        // Three sheets of 3 h cutting + 1 h handling on 8 h days at full efficiency.
        let run = run_with_cut_times(&[10_800.0, 10_800.0, 10_800.0]);
        let cutting = CuttingParameters::default().with_sheet_handling_time(3600.0);
        let calendar = ScheduleParameters::new().with_efficiency(1.0);

        let schedule = ProductionSchedule::project(&run, &cutting, &calendar).unwrap();
        assert_relative_eq!(schedule.cutting_hours, 9.0);
        assert_relative_eq!(schedule.handling_hours, 3.0);
        assert_relative_eq!(schedule.machine_hours, 12.0);
        assert_eq!(schedule.working_days, 2);
        assert_relative_eq!(schedule.sheets_per_day, 1.5);

        let days: Vec<u32> = schedule.sheets.iter().map(|s| s.day).collect();
        assert_eq!(days, vec![1, 1, 2]);
        assert_relative_eq!(schedule.sheets[1].start_hour, 4.0);
        assert_relative_eq!(schedule.sheets[1].end_hour, 8.0);
    }

    #[test]
    fn test_efficiency_stretches_time() {
        let run = run_with_cut_times(&[3600.0]);
        let cutting = CuttingParameters::default().with_sheet_handling_time(0.0);
        let calendar = ScheduleParameters::new().with_efficiency(0.5);

        let schedule = ProductionSchedule::project(&run, &cutting, &calendar).unwrap();
        assert_relative_eq!(schedule.machine_hours, 2.0);
        assert_eq!(schedule.working_days, 1);
    }

    #[test]
    fn test_two_shifts() {
        let run = run_with_cut_times(&[36_000.0]);
        let cutting = CuttingParameters::default().with_sheet_handling_time(0.0);
        let calendar = ScheduleParameters::new()
            .with_shifts_per_day(2)
            .with_efficiency(1.0);

        let schedule = ProductionSchedule::project(&run, &cutting, &calendar).unwrap();
        assert_eq!(schedule.working_days, 1);
    }

    #[test]
    fn test_empty_run() {
        let run = OptimizationRun::new(OptimizationGoal::Balanced);
        let schedule = ProductionSchedule::project(
            &run,
            &CuttingParameters::default(),
            &ScheduleParameters::default(),
        )
        .unwrap();
        assert_eq!(schedule.working_days, 0);
        assert!(schedule.sheets.is_empty());
    }

    #[test]
    fn test_invalid_calendar() {
        let run = OptimizationRun::new(OptimizationGoal::Balanced);
        let cutting = CuttingParameters::default();
        assert!(ProductionSchedule::project(
            &run,
            &cutting,
            &ScheduleParameters::new().with_efficiency(0.0)
        )
        .is_err());
        assert!(ProductionSchedule::project(
            &run,
            &cutting,
            &ScheduleParameters::new().with_shifts_per_day(4)
        )
        .is_err());
    }
}
