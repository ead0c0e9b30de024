//! Machine parameters for cutting time and cost estimation.

use lasernest_core::{normalize_material, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Laser cutting parameters used for time and cost estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CuttingParameters {
    /// Feed rate while cutting (mm/min).
    pub cutting_speed_mm_min: f64,

    /// Time to pierce the material before each contour (s).
    pub pierce_time_s: f64,

    /// Time spent on lead-in and lead-out moves per contour (s).
    pub lead_in_out_time_s: f64,

    /// Machine cost per hour, including operator and gas.
    pub machine_hourly_rate: f64,

    /// Time to load a sheet and unload the cut parts (s).
    pub sheet_handling_time_s: f64,
}

impl Default for CuttingParameters {
    fn default() -> Self {
        Self {
            cutting_speed_mm_min: 3000.0,
            pierce_time_s: 0.5,
            lead_in_out_time_s: 0.3,
            machine_hourly_rate: 90.0,
            sheet_handling_time_s: 300.0,
        }
    }
}

/// Typical fiber-laser feed rates (mm/min) by material and thickness (mm).
const SPEED_TABLE: &[(&str, &[(f64, f64)])] = &[
    (
        "mild_steel",
        &[(1.0, 10000.0), (2.0, 6000.0), (3.0, 4000.0), (5.0, 2500.0), (10.0, 1000.0), (20.0, 500.0)],
    ),
    (
        "stainless_steel",
        &[(1.0, 12000.0), (2.0, 7000.0), (3.0, 4500.0), (5.0, 2000.0), (10.0, 600.0)],
    ),
    (
        "aluminum",
        &[(1.0, 15000.0), (2.0, 8000.0), (3.0, 5000.0), (5.0, 2500.0), (10.0, 700.0)],
    ),
    (
        "copper",
        &[(1.0, 8000.0), (2.0, 4000.0), (3.0, 2200.0), (5.0, 1000.0)],
    ),
];

/// Looks up a feed rate for a material, interpolating linearly between
/// tabulated thicknesses and clamping outside the table.
pub fn table_speed(material: &str, thickness: f64) -> Option<f64> {
    let key = normalize_material(material);
    let key = match key.as_str() {
        "steel" | "carbon_steel" | "ms" => "mild_steel",
        "stainless" | "ss" => "stainless_steel",
        "aluminium" | "al" => "aluminum",
        other => other,
    };
    let (_, rows) = SPEED_TABLE.iter().find(|(name, _)| *name == key)?;
    let (first, last) = (rows.first()?, rows.last()?);
    if thickness <= first.0 {
        return Some(first.1);
    }
    if thickness >= last.0 {
        return Some(last.1);
    }
    rows.windows(2).find_map(|w| {
        let ((t0, s0), (t1, s1)) = (w[0], w[1]);
        (thickness >= t0 && thickness <= t1).then(|| s0 + (s1 - s0) * (thickness - t0) / (t1 - t0))
    })
}

impl CuttingParameters {
    /// Creates parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default parameters with the feed rate looked up for a material.
    ///
    /// Unknown materials keep the default feed rate. Pierce time grows with
    /// thickness, as thicker plate needs a longer pierce.
    pub fn for_material(material: &str, thickness: f64) -> Self {
        let base = Self::default();
        let speed = table_speed(material, thickness).unwrap_or(base.cutting_speed_mm_min);
        Self {
            cutting_speed_mm_min: speed,
            pierce_time_s: base.pierce_time_s + 0.1 * thickness.max(0.0),
            ..base
        }
    }

    /// Sets the cutting feed rate.
    pub fn with_cutting_speed(mut self, mm_per_min: f64) -> Self {
        self.cutting_speed_mm_min = mm_per_min;
        self
    }

    /// Sets the pierce time.
    pub fn with_pierce_time(mut self, seconds: f64) -> Self {
        self.pierce_time_s = seconds;
        self
    }

    /// Sets the combined lead-in/lead-out time.
    pub fn with_lead_in_out_time(mut self, seconds: f64) -> Self {
        self.lead_in_out_time_s = seconds;
        self
    }

    /// Sets the machine hourly rate.
    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.machine_hourly_rate = rate;
        self
    }

    /// Sets the per-sheet handling time.
    pub fn with_sheet_handling_time(mut self, seconds: f64) -> Self {
        self.sheet_handling_time_s = seconds;
        self
    }

    /// Feed rate in mm/s.
    pub fn cutting_speed_mm_s(&self) -> f64 {
        self.cutting_speed_mm_min / 60.0
    }

    /// Rejects a non-positive feed rate or negative times and rates.
    pub fn validate(&self) -> Result<()> {
        if !(self.cutting_speed_mm_min.is_finite() && self.cutting_speed_mm_min > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "cutting speed must be positive, got {}",
                self.cutting_speed_mm_min
            )));
        }
        let non_negative = [
            ("pierce_time_s", self.pierce_time_s),
            ("lead_in_out_time_s", self.lead_in_out_time_s),
            ("machine_hourly_rate", self.machine_hourly_rate),
            ("sheet_handling_time_s", self.sheet_handling_time_s),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
