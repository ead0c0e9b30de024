//! # LaserNest 2D
//!
//! Rectangular multi-sheet nesting for laser-cut sheet metal.
//!
//! Parts are placed one instance at a time with a first-fit grid scan,
//! sheet after sheet, until every requested quantity is placed or no
//! further sheet can be opened. Sheets are chosen from a stock catalog by
//! an [`OptimizationGoal`].
//!
//! ## Quick Start
//!
//! ```rust
//! use lasernest_d2::{
//!     optimize, CuttingParameters, NestingConstraints, OptimizationGoal, Part, SheetSpec,
//! };
//!
//! let parts = vec![
//!     Part::new("bracket", 200.0, 100.0, "mild_steel", 2.0).with_quantity(12),
//!     Part::new("plate", 400.0, 300.0, "mild_steel", 2.0).with_quantity(2),
//! ];
//! let sheets = vec![SheetSpec::new("MS-2", 1250.0, 2500.0, "mild_steel", 2.0, 85.0)];
//!
//! let run = optimize(
//!     &parts,
//!     &sheets,
//!     &NestingConstraints::default(),
//!     &CuttingParameters::for_material("mild_steel", 2.0),
//!     OptimizationGoal::MaterialUsage,
//!     10,
//! )
//! .unwrap();
//!
//! assert!(run.all_placed());
//! println!("{} sheets, {:.1}% utilization",
//!     run.total_sheets(),
//!     run.summary().overall_utilization_percent);
//! ```
//!
//! ## Cancellation
//!
//! [`SheetNester`] takes a [`RunConfig`] with a time limit and exposes a
//! [`CancellationToken`] that can be triggered from another thread.

pub mod budget;
pub mod filler;
pub mod nester;
pub mod ordering;
pub mod placement;
pub mod selection;

pub use budget::Budget;
pub use filler::{fill_sheet, FillOutcome};
pub use nester::{optimize, SheetNester};
pub use ordering::placement_order;
pub use placement::{find_placement, fits_within, orientations, scan_grid, Occupancy, PlacementCandidate};
pub use selection::{compatible_area, select_sheet, SelectionContext, SheetSelection};

// Re-export core types
pub use lasernest_core::{
    CancellationToken, Error, NestingConstraints, NestingOutcome, OptimizationGoal,
    OptimizationRun, Part, PartFulfillment, PlacedInstance, Priority, Rect, Result, Rotation,
    RunConfig, RunSummary, SheetLayout, SheetSpec, StockPolicy, StockWarning, Termination,
};
pub use lasernest_cutting::CuttingParameters;
