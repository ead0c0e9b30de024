//! First-fit grid placement of one part instance.
//!
//! Candidate positions lie on a fixed grid of stride `grid_step`, starting at
//! the lower-left corner of the usable area (the sheet minus its edge
//! margin). Columns are scanned left to right and each column bottom to
//! top; the first position whose spacing envelope is clear of every
//! obstacle is accepted. The unrotated orientation is tried first and the rotated one
//! only if the whole unrotated scan fails.
//!
//! Spacing is enforced with envelopes: every placed rectangle is recorded as
//! an obstacle grown by half the spacing, and candidates are tested with the
//! same growth, so two accepted parts are always at least `min_spacing`
//! apart.

use lasernest_core::{NestingConstraints, Part, Rect, Rotation, SheetSpec};

/// Slack applied to floating-point comparisons (mm).
pub const GEOM_EPS: f64 = 1e-9;

/// A position found by the grid scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementCandidate {
    /// Lower-left corner X.
    pub x: f64,
    /// Lower-left corner Y.
    pub y: f64,
    /// Extent along X after rotation.
    pub width: f64,
    /// Extent along Y after rotation.
    pub height: f64,
    /// Orientation used.
    pub rotation: Rotation,
}

impl PlacementCandidate {
    /// Occupied rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Orientations to try for a part, in order.
///
/// Square parts and parts without rotation permission yield only the
/// unrotated footprint.
pub fn orientations(part: &Part) -> Vec<(f64, f64, Rotation)> {
    let footprint = part.footprint();
    let mut result = vec![(footprint.width, footprint.height, Rotation::Deg0)];
    if part.allow_rotation && (footprint.width - footprint.height).abs() > GEOM_EPS {
        let turned = footprint.transposed();
        result.push((turned.width, turned.height, Rotation::Deg90));
    }
    result
}

/// Returns true if some allowed orientation of `part` fits inside `usable`.
pub fn fits_within(part: &Part, usable: &Rect) -> bool {
    orientations(part)
        .into_iter()
        .any(|(w, h, _)| w <= usable.width + GEOM_EPS && h <= usable.height + GEOM_EPS)
}

/// Occupied regions of one sheet.
#[derive(Debug, Clone)]
pub struct Occupancy {
    usable: Rect,
    half_spacing: f64,
    obstacles: Vec<Rect>,
}

impl Occupancy {
    /// Creates an empty occupancy for a sheet.
    pub fn new(sheet: &SheetSpec, constraints: &NestingConstraints) -> Self {
        Self {
            usable: sheet.usable_area(constraints.edge_margin),
            half_spacing: constraints.min_spacing / 2.0,
            obstacles: Vec::new(),
        }
    }

    /// Region inside the edge margin.
    pub fn usable(&self) -> Rect {
        self.usable
    }

    /// Records a placed rectangle together with its spacing buffer.
    pub fn occupy(&mut self, rect: Rect) {
        self.obstacles.push(rect.inflate(self.half_spacing));
    }

    /// Returns the first obstacle the rectangle's envelope runs into.
    fn blocker(&self, rect: &Rect) -> Option<&Rect> {
        let envelope = rect.inflate(self.half_spacing - GEOM_EPS);
        self.obstacles.iter().find(|o| envelope.overlaps(o))
    }

    /// Returns true if a part could be placed at `rect` right now.
    pub fn is_free(&self, rect: &Rect) -> bool {
        self.usable.contains(rect, GEOM_EPS) && self.blocker(rect).is_none()
    }
}

/// Scans the grid for the first free position of a `width` x `height`
/// rectangle.
///
/// Returns `None` without scanning when the rectangle is larger than the
/// usable area.
pub fn scan_grid(occupancy: &Occupancy, width: f64, height: f64, step: f64) -> Option<(f64, f64)> {
    let usable = occupancy.usable;
    if width > usable.width + GEOM_EPS || height > usable.height + GEOM_EPS || step <= 0.0 {
        return None;
    }

    let last_col = ((usable.width - width).max(0.0) / step + GEOM_EPS).floor() as usize;
    let last_row = ((usable.height - height).max(0.0) / step + GEOM_EPS).floor() as usize;

    for col in 0..=last_col {
        let x = usable.x + col as f64 * step;
        let mut row = 0;
        while row <= last_row {
            let y = usable.y + row as f64 * step;
            let candidate = Rect::new(x, y, width, height);
            match occupancy.blocker(&candidate) {
                None => return Some((x, y)),
                Some(obstacle) => {
                    // Every row below the obstacle's top edge collides with it too.
                    let clear_y = obstacle.max_y() + occupancy.half_spacing;
                    let skip_to = ((clear_y - usable.y) / step - GEOM_EPS).ceil().max(0.0) as usize;
                    row = skip_to.max(row + 1);
                }
            }
        }
    }
    None
}

/// Finds the first valid placement of one instance of `part`.
///
/// Orientations are tried in order and the first one that yields a position
/// wins; orientations are not compared against each other.
pub fn find_placement(
    part: &Part,
    occupancy: &Occupancy,
    step: f64,
) -> Option<PlacementCandidate> {
    orientations(part)
        .into_iter()
        .find_map(|(width, height, rotation)| {
            scan_grid(occupancy, width, height, step).map(|(x, y)| PlacementCandidate {
                x,
                y,
                width,
                height,
                rotation,
            })
        })
}
