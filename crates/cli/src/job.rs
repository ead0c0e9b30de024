//! Nesting jobs read from JSON.

use std::path::Path;

use anyhow::Context;
use lasernest_core::{
    normalize_material, NestingConstraints, OptimizationGoal, Part, Priority, RunConfig,
    SheetSpec, StockPolicy,
};
use lasernest_cutting::{CuttingParameters, ScheduleParameters};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Parts, stock and optional per-job overrides of the shop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Parts to nest.
    pub parts: Vec<Part>,
    /// Sheet catalog.
    pub sheets: Vec<SheetSpec>,
    /// Replaces the configured constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<NestingConstraints>,
    /// Replaces the configured cutting parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutting: Option<CuttingParameters>,
    /// Replaces the configured goal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<OptimizationGoal>,
    /// Replaces the configured sheet cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sheets: Option<u32>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub goal: Option<OptimizationGoal>,
    pub max_sheets: Option<u32>,
    pub time_limit_ms: Option<u64>,
    pub strict_stock: bool,
}

/// Everything needed to run the nester.
#[derive(Debug, Clone)]
pub struct Plan {
    pub parts: Vec<Part>,
    pub sheets: Vec<SheetSpec>,
    pub constraints: NestingConstraints,
    pub cutting: CuttingParameters,
    pub run: RunConfig,
    pub schedule: ScheduleParameters,
}

impl Job {
    /// Parses a job from JSON text.
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("invalid job JSON")
    }

    /// Loads a job from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Layers settings, job values and command-line values, in that order.
    ///
    /// Without explicit cutting parameters the speed table is consulted for
    /// the material and thickness covering the most requested area.
    pub fn into_plan(self, settings: &Settings, overrides: &Overrides) -> Plan {
        let constraints = self.constraints.unwrap_or(settings.constraints);

        let cutting = self.cutting.or(settings.cutting).unwrap_or_else(|| {
            let groups = material_areas(&self.parts);
            if groups.len() > 1 {
                log::warn!(
                    "Job mixes {} material/thickness groups; cutting parameters follow the largest by area",
                    groups.len()
                );
            }
            groups
                .iter()
                .fold(None::<&(String, f64, f64)>, |best, group| match best {
                    Some(b) if b.2 >= group.2 => Some(b),
                    _ => Some(group),
                })
                .map(|(material, thickness, _)| CuttingParameters::for_material(material, *thickness))
                .unwrap_or_default()
        });

        let mut run = settings.run.clone();
        if let Some(goal) = overrides.goal.or(self.goal) {
            run.goal = goal;
        }
        if let Some(max_sheets) = overrides.max_sheets.or(self.max_sheets) {
            run.max_sheets = max_sheets;
        }
        if let Some(limit) = overrides.time_limit_ms {
            run.time_limit_ms = limit;
        }
        if overrides.strict_stock {
            run.stock_policy = StockPolicy::Strict;
        }

        Plan {
            parts: self.parts,
            sheets: self.sheets,
            constraints,
            cutting,
            run,
            schedule: settings.schedule,
        }
    }

    /// A small mixed job for trying the tool out.
    pub fn sample() -> Self {
        Self {
            parts: vec![
                Part::new("BRK-100", 180.0, 65.0, "mild_steel", 2.0)
                    .with_name("Mounting bracket")
                    .with_quantity(24)
                    .with_rotation(true),
                Part::new("PNL-200", 420.0, 310.0, "mild_steel", 2.0)
                    .with_name("Side panel")
                    .with_quantity(6)
                    .with_priority(Priority::High),
                Part::new("GUS-050", 95.0, 95.0, "mild_steel", 2.0)
                    .with_name("Gusset")
                    .with_quantity(30),
                Part::new("LID-300", 250.0, 250.0, "aluminum", 1.5)
                    .with_name("Cover lid")
                    .with_quantity(4)
                    .with_priority(Priority::Critical),
            ],
            sheets: vec![
                SheetSpec::new("MS2-1250x2500", 1250.0, 2500.0, "mild_steel", 2.0, 118.0)
                    .with_available(5),
                SheetSpec::new("MS2-1000x2000", 1000.0, 2000.0, "mild_steel", 2.0, 79.0)
                    .with_available(5),
                SheetSpec::new("AL15-1000x2000", 1000.0, 2000.0, "aluminum", 1.5, 96.0)
                    .with_available(2),
            ],
            constraints: None,
            cutting: None,
            goal: Some(OptimizationGoal::Balanced),
            max_sheets: None,
        }
    }
}

/// Requested area per (material, thickness), in first-seen order.
fn material_areas(parts: &[Part]) -> Vec<(String, f64, f64)> {
    let mut groups: Vec<(String, f64, f64)> = Vec::new();
    for part in parts {
        let material = normalize_material(&part.material);
        let area = part.area() * f64::from(part.quantity);
        match groups
            .iter_mut()
            .find(|(m, t, _)| *m == material && (*t - part.thickness).abs() < 1e-9)
        {
            Some(group) => group.2 += area,
            None => groups.push((material, part.thickness, area)),
        }
    }
    groups
}
