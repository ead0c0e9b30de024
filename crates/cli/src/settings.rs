//! Shop defaults loaded from a TOML file.
//!
//! ```toml
//! [constraints]
//! min_spacing = 5.0
//! edge_margin = 10.0
//!
//! [run]
//! goal = "cost_minimization"
//! max_sheets = 20
//!
//! [schedule]
//! shifts_per_day = 2
//! ```
//!
//! Every section and key is optional.

use std::path::Path;

use anyhow::Context;
use lasernest_core::{NestingConstraints, RunConfig};
use lasernest_cutting::{CuttingParameters, ScheduleParameters};
use serde::{Deserialize, Serialize};

/// Defaults applied to every job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Geometric constraints.
    pub constraints: NestingConstraints,
    /// Machine parameters. Derived from the job's material when absent.
    pub cutting: Option<CuttingParameters>,
    /// Goal, sheet cap, time limit and stock policy.
    pub run: RunConfig,
    /// Shop calendar for the schedule projection.
    pub schedule: ScheduleParameters,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid settings TOML")
    }

    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }
}
