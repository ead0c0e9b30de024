//! Run configuration and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::goal::OptimizationGoal;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometric constraints applied to every sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NestingConstraints {
    /// Minimum clearance between two placed parts (mm).
    pub min_spacing: f64,

    /// Unused border kept along every sheet edge (mm).
    pub edge_margin: f64,

    /// Stride of the positional grid scan (mm).
    pub grid_step: f64,
}

impl Default for NestingConstraints {
    fn default() -> Self {
        Self {
            min_spacing: 5.0,
            edge_margin: 10.0,
            grid_step: 5.0,
        }
    }
}

impl NestingConstraints {
    /// Creates constraints with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the part-to-part clearance.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Sets the edge margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.edge_margin = margin;
        self
    }

    /// Sets the grid scan stride.
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    /// Rejects non-positive or non-finite values.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_spacing.is_finite() && self.min_spacing > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_spacing must be positive, got {}",
                self.min_spacing
            )));
        }
        if !(self.edge_margin.is_finite() && self.edge_margin > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "edge_margin must be positive, got {}",
                self.edge_margin
            )));
        }
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "grid_step must be positive, got {}",
                self.grid_step
            )));
        }
        Ok(())
    }
}

/// How sheet stock counts are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StockPolicy {
    /// Exhausted specs stay selectable; each overdraw is reported as a warning.
    #[default]
    Advisory,
    /// Exhausted specs are never selected.
    Strict,
}

/// Parameters of one optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Objective used to rank candidate sheets.
    pub goal: OptimizationGoal,

    /// Maximum number of sheets the run may open.
    pub max_sheets: u32,

    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,

    /// Stock enforcement.
    pub stock_policy: StockPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            goal: OptimizationGoal::default(),
            max_sheets: 50,
            time_limit_ms: 30_000,
            stock_policy: StockPolicy::default(),
        }
    }
}

impl RunConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the optimization goal.
    pub fn with_goal(mut self, goal: OptimizationGoal) -> Self {
        self.goal = goal;
        self
    }

    /// Sets the sheet cap.
    pub fn with_max_sheets(mut self, max_sheets: u32) -> Self {
        self.max_sheets = max_sheets;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the stock policy.
    pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// Rejects a zero sheet cap.
    pub fn validate(&self) -> Result<()> {
        if self.max_sheets == 0 {
            return Err(Error::InvalidConfig("max_sheets must be at least 1".into()));
        }
        Ok(())
    }
}

/// Shared flag used to stop a running optimization from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints() {
        let c = NestingConstraints::default();
        assert_eq!(c.min_spacing, 5.0);
        assert_eq!(c.edge_margin, 10.0);
        assert_eq!(c.grid_step, 5.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_non_positive_constraints_rejected() {
        assert!(NestingConstraints::new().with_spacing(0.0).validate().is_err());
        assert!(NestingConstraints::new().with_margin(-1.0).validate().is_err());
        assert!(NestingConstraints::new()
            .with_grid_step(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new()
            .with_goal(OptimizationGoal::SheetCount)
            .with_max_sheets(3)
            .with_time_limit(0)
            .with_stock_policy(StockPolicy::Strict);

        assert_eq!(config.goal, OptimizationGoal::SheetCount);
        assert_eq!(config.max_sheets, 3);
        assert_eq!(config.time_limit_ms, 0);
        assert_eq!(config.stock_policy, StockPolicy::Strict);
        assert!(config.validate().is_ok());
        assert!(config.with_max_sheets(0).validate().is_err());
    }

    #[test]
    fn test_cancellation_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
