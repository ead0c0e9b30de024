//! # LaserNest Core
//!
//! Shared types for the LaserNest sheet nesting planner.
//!
//! This crate holds everything the placement engine and the reporting layer
//! agree on, without any placement logic of its own.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Rect`], [`overlaps`], [`area`]
//! - **Catalog**: [`Part`], [`SheetSpec`], [`Priority`] with normalization and validation
//! - **Configuration**: [`NestingConstraints`], [`RunConfig`], [`StockPolicy`]
//! - **Scoring**: [`OptimizationGoal`] ranks candidate sheets
//! - **Results**: [`OptimizationRun`], [`SheetLayout`], [`PlacedInstance`]
//!
//! ## Configuration
//!
//! ```rust
//! use lasernest_core::{NestingConstraints, OptimizationGoal, RunConfig};
//!
//! let constraints = NestingConstraints::new()
//!     .with_spacing(3.0)
//!     .with_margin(10.0);
//! let config = RunConfig::new()
//!     .with_goal(OptimizationGoal::CostMinimization)
//!     .with_max_sheets(20);
//! assert!(constraints.validate().is_ok());
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod goal;
pub mod result;
pub mod solver;

// Re-exports
pub use catalog::{
    normalize_material, validate_parts, validate_sheets, Part, PartId, Priority, SheetSpec,
    THICKNESS_TOLERANCE,
};
pub use error::{Error, Result};
pub use geometry::{area, overlaps, Rect};
pub use goal::{OptimizationGoal, SheetCandidate, MIN_SCORING_COST};
pub use result::{
    NestingOutcome, OptimizationRun, PartFulfillment, PlacedInstance, Rotation, RunSummary,
    SheetLayout, StockWarning, Termination,
};
pub use solver::{CancellationToken, NestingConstraints, RunConfig, StockPolicy};
