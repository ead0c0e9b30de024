//! Optimization run representation.

use crate::catalog::{PartId, SheetSpec};
use crate::geometry::Rect;
use crate::goal::OptimizationGoal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation of a placed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// As specified: length along X.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "0"))]
    Deg0,
    /// Turned a quarter: length along Y.
    #[cfg_attr(feature = "serde", serde(rename = "90"))]
    Deg90,
}

/// One instance of a part placed on a sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedInstance {
    /// Part this instance belongs to.
    pub part_id: PartId,
    /// 0-based instance number of this part across the whole run.
    pub instance: u32,
    /// Lower-left corner X (mm).
    pub x: f64,
    /// Lower-left corner Y (mm).
    pub y: f64,
    /// Footprint extent along X after rotation (mm).
    pub width: f64,
    /// Footprint extent along Y after rotation (mm).
    pub height: f64,
    /// Applied rotation.
    pub rotation: Rotation,
}

impl PlacedInstance {
    /// Occupied rectangle on the sheet.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Rectangle grown by half the spacing on each side.
    ///
    /// Two instances respect a clearance of `spacing` exactly when these
    /// envelopes do not overlap.
    pub fn spacing_envelope(&self, spacing: f64) -> Rect {
        self.rect().inflate(spacing / 2.0)
    }
}

/// A single opened sheet with its placements and derived metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetLayout {
    /// 0-based position of this sheet in the run.
    pub index: usize,
    /// Stock template the sheet was cut from.
    pub sheet: SheetSpec,
    /// Placements in insertion order.
    pub placements: Vec<PlacedInstance>,
    /// Sum of placed footprints (mm²).
    pub used_area: f64,
    /// `used_area / sheet area`, percent.
    pub utilization_percent: f64,
    /// `sheet area - used_area` (mm²).
    pub waste_area: f64,
    /// Estimated cutting time (s).
    pub cutting_time_s: f64,
    /// Price of the sheet.
    pub material_cost: f64,
    /// Share of the sheet price lost to waste.
    pub waste_value: f64,
}

impl SheetLayout {
    /// Builds a layout and derives its area and cost metrics.
    pub fn new(
        index: usize,
        sheet: SheetSpec,
        placements: Vec<PlacedInstance>,
        cutting_time_s: f64,
    ) -> Self {
        let sheet_area = sheet.area();
        let used_area: f64 = placements.iter().map(|p| p.width * p.height).sum();
        let (utilization_percent, waste_fraction) = if sheet_area > 0.0 {
            let fraction = (used_area / sheet_area).clamp(0.0, 1.0);
            (fraction * 100.0, 1.0 - fraction)
        } else {
            (0.0, 0.0)
        };
        let waste_area = (sheet_area - used_area).max(0.0);
        let material_cost = sheet.unit_cost;

        Self {
            index,
            placements,
            used_area,
            utilization_percent,
            waste_area,
            cutting_time_s,
            material_cost,
            waste_value: material_cost * waste_fraction,
            sheet,
        }
    }

    /// Number of placed instances.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Number of placed instances of one part.
    pub fn count_of(&self, part_id: &str) -> usize {
        self.placements
            .iter()
            .filter(|p| p.part_id == part_id)
            .count()
    }
}

/// Requested versus placed quantity for one part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartFulfillment {
    /// Part identifier.
    pub part_id: PartId,
    /// Quantity requested at the start of the run.
    pub requested: u32,
    /// Instances placed across all sheets.
    pub placed: u32,
    /// Quantity left over at the end of the run.
    pub remaining: u32,
}

impl PartFulfillment {
    /// Returns true if every requested instance was placed.
    pub fn is_satisfied(&self) -> bool {
        self.remaining == 0
    }
}

/// A sheet spec used more often than its stock allows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StockWarning {
    /// Sheet spec identifier.
    pub sheet_id: String,
    /// Sheets in stock.
    pub available: u32,
    /// Sheets used by the run.
    pub used: u32,
}

/// Why the sheet loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// All parts were placed.
    #[default]
    Completed,
    /// The sheet cap was reached with parts remaining.
    SheetLimitReached,
    /// No remaining part fits any selectable sheet.
    NoCompatibleSheet,
    /// The caller cancelled the run.
    Cancelled,
    /// The time limit expired.
    TimeLimitExceeded,
}

/// Whether every requested instance was nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestingOutcome {
    /// All requested quantities were placed.
    Complete,
    /// Some quantities are left over.
    Partial {
        /// Parts with a remaining quantity.
        shortfall: Vec<PartFulfillment>,
    },
}

impl NestingOutcome {
    /// Returns true for [`NestingOutcome::Complete`].
    pub fn is_complete(&self) -> bool {
        matches!(self, NestingOutcome::Complete)
    }
}

/// Aggregate figures over all sheets of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    /// Sheets opened.
    pub total_sheets: usize,
    /// Sum of sheet prices.
    pub total_cost: f64,
    /// Sum of estimated cutting times (s).
    pub total_cutting_time_s: f64,
    /// Total placed area over total sheet area, percent.
    pub overall_utilization_percent: f64,
    /// Sum of waste areas (mm²).
    pub total_waste_area: f64,
    /// Sum of waste values.
    pub total_waste_value: f64,
    /// Instances requested.
    pub total_requested: u32,
    /// Instances placed.
    pub total_placed: u32,
    /// Sheets used per spec id, in first-use order.
    pub sheets_by_spec: Vec<(String, u32)>,
}

/// Result of one optimization call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationRun {
    /// Sheets in the order they were opened.
    pub layouts: Vec<SheetLayout>,
    /// Requested versus placed counts, in input order.
    pub fulfillment: Vec<PartFulfillment>,
    /// Specs used beyond their stock.
    pub stock_warnings: Vec<StockWarning>,
    /// Why the run stopped.
    pub termination: Termination,
    /// Goal used to rank sheets.
    pub goal: OptimizationGoal,
    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl OptimizationRun {
    /// Creates an empty run for the given goal.
    pub fn new(goal: OptimizationGoal) -> Self {
        Self {
            layouts: Vec::new(),
            fulfillment: Vec::new(),
            stock_warnings: Vec::new(),
            termination: Termination::default(),
            goal,
            computation_time_ms: 0,
        }
    }

    /// Number of sheets opened.
    pub fn total_sheets(&self) -> usize {
        self.layouts.len()
    }

    /// Number of placed instances over all sheets.
    pub fn placed_count(&self) -> usize {
        self.layouts.iter().map(SheetLayout::placed_count).sum()
    }

    /// Returns true if every requested instance was placed.
    pub fn all_placed(&self) -> bool {
        self.fulfillment.iter().all(PartFulfillment::is_satisfied)
    }

    /// Fulfillment entry for a part.
    pub fn fulfillment_of(&self, part_id: &str) -> Option<&PartFulfillment> {
        self.fulfillment.iter().find(|f| f.part_id == part_id)
    }

    /// Complete or partial, with the shortfall listed.
    pub fn outcome(&self) -> NestingOutcome {
        let shortfall: Vec<PartFulfillment> = self
            .fulfillment
            .iter()
            .filter(|f| !f.is_satisfied())
            .cloned()
            .collect();
        if shortfall.is_empty() {
            NestingOutcome::Complete
        } else {
            NestingOutcome::Partial { shortfall }
        }
    }

    /// Aggregates sheet metrics.
    pub fn summary(&self) -> RunSummary {
        let total_sheet_area: f64 = self.layouts.iter().map(|l| l.sheet.area()).sum();
        let total_used_area: f64 = self.layouts.iter().map(|l| l.used_area).sum();
        let overall_utilization_percent = if total_sheet_area > 0.0 {
            (total_used_area / total_sheet_area * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        let mut sheets_by_spec: Vec<(String, u32)> = Vec::new();
        for layout in &self.layouts {
            match sheets_by_spec.iter_mut().find(|(id, _)| *id == layout.sheet.id) {
                Some((_, count)) => *count += 1,
                None => sheets_by_spec.push((layout.sheet.id.clone(), 1)),
            }
        }

        RunSummary {
            total_sheets: self.layouts.len(),
            total_cost: self.layouts.iter().map(|l| l.material_cost).sum(),
            total_cutting_time_s: self.layouts.iter().map(|l| l.cutting_time_s).sum(),
            overall_utilization_percent,
            total_waste_area: self.layouts.iter().map(|l| l.waste_area).sum(),
            total_waste_value: self.layouts.iter().map(|l| l.waste_value).sum(),
            total_requested: self.fulfillment.iter().map(|f| f.requested).sum(),
            total_placed: self.fulfillment.iter().map(|f| f.placed).sum(),
            sheets_by_spec,
        }
    }
}
