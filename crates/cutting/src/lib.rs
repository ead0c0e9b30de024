//! Cutting time, cost and schedule estimation for nested sheets.
//!
//! Every placed part is a rectangle cut as one closed contour, so the
//! estimate reduces to contour length over feed rate plus a fixed pierce and
//! lead-in/lead-out overhead per contour. On top of the per-sheet estimate
//! this crate prices a finished run and projects it onto a shop calendar:
//!
//! - [`estimate_placements`]: cutting effort of one sheet
//! - [`CostBreakdown`]: material versus machine cost
//! - [`ProductionSchedule`]: machine hours, working days, per-sheet timeline

pub mod config;
pub mod cost;
pub mod result;
pub mod schedule;
pub mod time;

pub use config::{table_speed, CuttingParameters};
pub use cost::CostBreakdown;
pub use result::CuttingEstimate;
pub use schedule::{ProductionSchedule, ScheduleParameters, ScheduledSheet};
pub use time::{contour_estimate, estimate_placements, instance_cutting_time};
