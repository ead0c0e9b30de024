//! Part and sheet catalogs.
//!
//! Parts and sheet specifications arrive from the caller (order entry and
//! inventory). This module normalizes them and rejects malformed entries
//! before any placement work starts.

use std::collections::HashSet;

use crate::geometry::Rect;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identifier for a part.
pub type PartId = String;

/// Two thicknesses closer than this (mm) are treated as the same gauge.
pub const THICKNESS_TOLERANCE: f64 = 0.01;

/// Urgency tier of a part. Higher tiers are nested first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    /// Filler work.
    Low,
    /// Regular orders.
    #[default]
    Medium,
    /// Expedited orders.
    High,
    /// Line-down or contractual deadline.
    Critical,
}

/// A rectangular part to be cut.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    /// Unique identifier.
    pub id: PartId,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Nominal extent along the sheet's X axis (mm).
    pub length: f64,
    /// Nominal extent along the sheet's Y axis (mm).
    pub width: f64,
    /// Number of instances still to place.
    pub quantity: u32,
    /// Whether a 90° rotation is allowed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_rotation: bool,
    /// Material type, e.g. "mild_steel".
    pub material: String,
    /// Material thickness (mm).
    pub thickness: f64,
    /// Nesting priority.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: Priority,
}

impl Part {
    /// Creates a part with quantity 1, no rotation and medium priority.
    pub fn new(
        id: impl Into<PartId>,
        length: f64,
        width: f64,
        material: impl Into<String>,
        thickness: f64,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            length,
            width,
            quantity: 1,
            allow_rotation: false,
            material: material.into(),
            thickness,
            priority: Priority::default(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the quantity to place.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Allows or forbids 90° rotation.
    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Sets the priority tier.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Footprint of one instance.
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Footprint of all remaining instances.
    pub fn remaining_area(&self) -> f64 {
        self.area() * self.quantity as f64
    }

    /// Outline length of one instance.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }

    /// Unrotated footprint at the origin.
    pub fn footprint(&self) -> Rect {
        Rect::from_size(self.length, self.width)
    }

    /// Returns true once every instance has been placed.
    pub fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }

    /// Returns a copy with trimmed identifiers and a canonical material key.
    ///
    /// An empty name falls back to the id.
    pub fn normalized(&self) -> Part {
        let id = self.id.trim().to_string();
        let name = match self.name.trim() {
            "" => id.clone(),
            name => name.to_string(),
        };
        Part {
            id,
            name,
            material: normalize_material(&self.material),
            ..self.clone()
        }
    }

    /// Checks dimensions and thickness.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidGeometry("part id must not be empty".into()));
        }
        if !(self.length.is_finite() && self.length > 0.0)
            || !(self.width.is_finite() && self.width > 0.0)
        {
            return Err(Error::InvalidGeometry(format!(
                "part '{}' has non-positive dimensions {}x{}",
                self.id, self.length, self.width
            )));
        }
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "part '{}' has non-positive thickness {}",
                self.id, self.thickness
            )));
        }
        Ok(())
    }
}

/// A stock sheet template offered by inventory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetSpec {
    /// Catalog identifier.
    pub id: String,
    /// Extent along X (mm).
    pub length: f64,
    /// Extent along Y (mm).
    pub width: f64,
    /// Material thickness (mm).
    pub thickness: f64,
    /// Material type.
    pub material: String,
    /// Price of one sheet.
    pub unit_cost: f64,
    /// Sheets in stock.
    pub available: u32,
}

impl SheetSpec {
    /// Creates a sheet specification with one sheet in stock.
    pub fn new(
        id: impl Into<String>,
        length: f64,
        width: f64,
        material: impl Into<String>,
        thickness: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            width,
            thickness,
            material: material.into(),
            unit_cost,
            available: 1,
        }
    }

    /// Sets the number of sheets in stock.
    pub fn with_available(mut self, available: u32) -> Self {
        self.available = available;
        self
    }

    /// Sheet area (mm²).
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Full sheet rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.length, self.width)
    }

    /// Region where parts may be placed once `edge_margin` is reserved.
    pub fn usable_area(&self, edge_margin: f64) -> Rect {
        self.bounds().inflate(-edge_margin)
    }

    /// Returns true if the part is cut from this material and gauge.
    pub fn accepts(&self, part: &Part) -> bool {
        normalize_material(&self.material) == normalize_material(&part.material)
            && (self.thickness - part.thickness).abs() < THICKNESS_TOLERANCE
    }

    /// Returns a copy with a trimmed id and canonical material key.
    pub fn normalized(&self) -> SheetSpec {
        SheetSpec {
            id: self.id.trim().to_string(),
            material: normalize_material(&self.material),
            ..self.clone()
        }
    }

    /// Checks dimensions, thickness and cost.
    pub fn validate(&self) -> Result<()> {
        if !(self.length.is_finite() && self.length > 0.0)
            || !(self.width.is_finite() && self.width > 0.0)
        {
            return Err(Error::InvalidSheet(format!(
                "sheet '{}' has non-positive dimensions {}x{}",
                self.id, self.length, self.width
            )));
        }
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(Error::InvalidSheet(format!(
                "sheet '{}' has non-positive thickness {}",
                self.id, self.thickness
            )));
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(Error::InvalidSheet(format!(
                "sheet '{}' has negative cost {}",
                self.id, self.unit_cost
            )));
        }
        Ok(())
    }
}

/// Canonical material key: trimmed, lowercase, spaces and dashes as `_`.
pub fn normalize_material(material: &str) -> String {
    material
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Validates a part list: non-empty, unique ids, sane dimensions.
pub fn validate_parts(parts: &[Part]) -> Result<()> {
    if parts.is_empty() {
        return Err(Error::EmptyInput("part list is empty".into()));
    }
    let mut seen = HashSet::new();
    for part in parts {
        part.validate()?;
        if !seen.insert(part.id.trim()) {
            return Err(Error::DuplicatePart(part.id.trim().to_string()));
        }
    }
    Ok(())
}

/// Validates a sheet catalog: non-empty, sane dimensions and costs.
pub fn validate_sheets(sheets: &[SheetSpec]) -> Result<()> {
    if sheets.is_empty() {
        return Err(Error::EmptyInput("sheet catalog is empty".into()));
    }
    sheets.iter().try_for_each(SheetSpec::validate)
}
