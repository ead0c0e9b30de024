//! Sheet scoring objectives.
//!
//! Each objective ranks a candidate sheet from the same four inputs: the
//! sheet specification, the total area of remaining parts it can take, its
//! area and its price. Higher scores win.
//!
//! | Goal | Score |
//! |------|-------|
//! | `MaterialUsage` | estimated utilization, percent |
//! | `CostMinimization` | utilization / cost |
//! | `SheetCount` | utilization × sheet area |
//! | `Balanced` | 50 × utilization + 50 × (1 / cost) |
//!
//! Utilization here is the estimated fraction of the sheet the compatible
//! parts would cover, capped at 1.0.

use std::fmt;
use std::str::FromStr;

use crate::catalog::SheetSpec;
use crate::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Floor applied to sheet prices before dividing by them.
pub const MIN_SCORING_COST: f64 = 0.01;

/// Objective used to pick the next sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptimizationGoal {
    /// Maximize the covered fraction of each sheet.
    MaterialUsage,
    /// Prefer cheap sheets that fill well.
    CostMinimization,
    /// Prefer large sheets that absorb more parts each.
    SheetCount,
    /// Linear blend of utilization and price.
    #[default]
    Balanced,
}

/// Inputs to a sheet score.
#[derive(Debug, Clone, Copy)]
pub struct SheetCandidate<'a> {
    /// The candidate specification.
    pub spec: &'a SheetSpec,
    /// Area of all remaining parts this sheet could take (mm²).
    pub compatible_area: f64,
    /// Sheet area (mm²).
    pub sheet_area: f64,
    /// Sheet price.
    pub sheet_cost: f64,
}

impl<'a> SheetCandidate<'a> {
    /// Builds a candidate from a spec and the compatible part area.
    pub fn new(spec: &'a SheetSpec, compatible_area: f64) -> Self {
        Self {
            spec,
            compatible_area,
            sheet_area: spec.area(),
            sheet_cost: spec.unit_cost,
        }
    }

    /// Estimated covered fraction, in `[0, 1]`.
    pub fn estimated_utilization(&self) -> f64 {
        if self.sheet_area <= 0.0 {
            return 0.0;
        }
        (self.compatible_area / self.sheet_area).clamp(0.0, 1.0)
    }
}

impl OptimizationGoal {
    /// All goals, in declaration order.
    pub const ALL: [OptimizationGoal; 4] = [
        OptimizationGoal::MaterialUsage,
        OptimizationGoal::CostMinimization,
        OptimizationGoal::SheetCount,
        OptimizationGoal::Balanced,
    ];

    /// Scores a candidate sheet; higher is better.
    pub fn score(&self, candidate: &SheetCandidate<'_>) -> f64 {
        let utilization = candidate.estimated_utilization();
        let cost = candidate.sheet_cost.max(MIN_SCORING_COST);
        match self {
            Self::MaterialUsage => utilization * 100.0,
            Self::CostMinimization => utilization / cost,
            Self::SheetCount => utilization * candidate.sheet_area,
            Self::Balanced => 50.0 * utilization + 50.0 * (1.0 / cost),
        }
    }

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaterialUsage => "material_usage",
            Self::CostMinimization => "cost_minimization",
            Self::SheetCount => "sheet_count",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationGoal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s.trim().to_lowercase().replace('-', "_"))
            .ok_or_else(|| Error::InvalidConfig(format!("unknown optimization goal '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sheet(cost: f64) -> SheetSpec {
        SheetSpec::new("S", 1000.0, 1000.0, "al", 1.0, cost)
    }

    #[test]
    fn test_estimated_utilization_is_capped() {
        let spec = sheet(10.0);
        assert_relative_eq!(SheetCandidate::new(&spec, 250_000.0).estimated_utilization(), 0.25);
        assert_relative_eq!(SheetCandidate::new(&spec, 5e9).estimated_utilization(), 1.0);
    }

    #[test]
    fn test_material_usage_score() {
        let spec = sheet(10.0);
        let candidate = SheetCandidate::new(&spec, 500_000.0);
        assert_relative_eq!(OptimizationGoal::MaterialUsage.score(&candidate), 50.0);
    }

    #[test]
    fn test_cost_minimization_prefers_cheaper() {
        let cheap = sheet(10.0);
        let pricey = sheet(20.0);
        let goal = OptimizationGoal::CostMinimization;
        let a = goal.score(&SheetCandidate::new(&cheap, 400_000.0));
        let b = goal.score(&SheetCandidate::new(&pricey, 400_000.0));
        assert_relative_eq!(a, 0.04);
        assert!(a > b);
    }

    #[test]
    fn test_sheet_count_prefers_larger() {
        let small = SheetSpec::new("small", 1000.0, 1000.0, "al", 1.0, 10.0);
        let large = SheetSpec::new("large", 3000.0, 1500.0, "al", 1.0, 10.0);
        let goal = OptimizationGoal::SheetCount;
        let a = goal.score(&SheetCandidate::new(&small, 2_000_000.0));
        let b = goal.score(&SheetCandidate::new(&large, 2_000_000.0));
        assert_relative_eq!(a, 1_000_000.0);
        assert_relative_eq!(b, 2_000_000.0);
    }

    #[test]
    fn test_balanced_blend() {
        let spec = sheet(25.0);
        let candidate = SheetCandidate::new(&spec, 500_000.0);
        assert_relative_eq!(OptimizationGoal::Balanced.score(&candidate), 25.0 + 2.0);
    }

    #[test]
    fn test_zero_cost_uses_floor() {
        let spec = sheet(0.0);
        let candidate = SheetCandidate::new(&spec, 100_000.0);
        let score = OptimizationGoal::CostMinimization.score(&candidate);
        assert!(score.is_finite());
        assert_relative_eq!(score, 0.1 / MIN_SCORING_COST);
    }

    #[test]
    fn test_parse_goal() {
        assert_eq!(
            "cost_minimization".parse::<OptimizationGoal>(),
            Ok(OptimizationGoal::CostMinimization)
        );
        assert_eq!(
            "Sheet-Count".parse::<OptimizationGoal>(),
            Ok(OptimizationGoal::SheetCount)
        );
        assert!("fastest".parse::<OptimizationGoal>().is_err());
        assert_eq!(OptimizationGoal::default().to_string(), "balanced");
    }
}
