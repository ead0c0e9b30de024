//! Single-pass filling of one sheet.

use lasernest_core::{
    NestingConstraints, Part, PlacedInstance, SheetLayout, SheetSpec, Termination,
};
use lasernest_cutting::{estimate_placements, CuttingParameters};

use crate::budget::Budget;
use crate::placement::{find_placement, Occupancy};

/// Result of filling one sheet.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    /// Finished layout with derived metrics.
    pub layout: SheetLayout,
    /// Instances placed on this sheet, indexed like the parts slice.
    pub placed: Vec<u32>,
    /// Set when the budget ran out while filling.
    pub interrupted: Option<Termination>,
}

impl FillOutcome {
    /// Total instances placed on this sheet.
    pub fn placed_total(&self) -> u32 {
        self.placed.iter().sum()
    }
}

/// Fills one sheet with the remaining parts.
///
/// Parts are visited in `order`. For each part up to its remaining quantity
/// is placed one instance at a time; the first failed attempt ends that part
/// for this sheet. There is no backtracking. `instances_before` gives the
/// run-wide count already placed per part and seeds instance numbering.
#[allow(clippy::too_many_arguments)]
pub fn fill_sheet(
    index: usize,
    sheet: &SheetSpec,
    parts: &[Part],
    order: &[usize],
    instances_before: &[u32],
    constraints: &NestingConstraints,
    cutting: &CuttingParameters,
    budget: &Budget<'_>,
) -> FillOutcome {
    let mut occupancy = Occupancy::new(sheet, constraints);
    let mut placements: Vec<PlacedInstance> = Vec::new();
    let mut placed = vec![0u32; parts.len()];
    let mut interrupted = None;

    'parts: for &part_index in order {
        let part = &parts[part_index];
        if part.is_exhausted() || !sheet.accepts(part) {
            continue;
        }

        while placed[part_index] < part.quantity {
            if let Some(reason) = budget.check() {
                interrupted = Some(reason);
                break 'parts;
            }

            let Some(candidate) = find_placement(part, &occupancy, constraints.grid_step) else {
                break;
            };

            occupancy.occupy(candidate.rect());
            let before = instances_before.get(part_index).copied().unwrap_or(0);
            placements.push(PlacedInstance {
                part_id: part.id.clone(),
                instance: before + placed[part_index],
                x: candidate.x,
                y: candidate.y,
                width: candidate.width,
                height: candidate.height,
                rotation: candidate.rotation,
            });
            placed[part_index] += 1;
        }
    }

    let cutting_time_s = estimate_placements(&placements, cutting).total_time_s();
    let layout = SheetLayout::new(index, sheet.clone(), placements, cutting_time_s);

    FillOutcome {
        layout,
        placed,
        interrupted,
    }
}
