//! Choosing the next sheet to open.

use lasernest_core::{NestingConstraints, OptimizationGoal, Part, SheetCandidate, SheetSpec, StockPolicy};

use crate::placement::fits_within;

/// The sheet chosen for the next fill pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSelection {
    /// Index into the sheet catalog.
    pub spec_index: usize,
    /// Score under the active goal.
    pub score: f64,
    /// Area of remaining parts the sheet can take (mm²).
    pub compatible_area: f64,
    /// True if the spec's stock is already used up.
    pub overdraw: bool,
}

/// Inputs that stay fixed while the loop runs.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Sheet catalog.
    pub specs: &'a [SheetSpec],
    /// Geometric constraints.
    pub constraints: &'a NestingConstraints,
    /// Active objective.
    pub goal: OptimizationGoal,
    /// Stock enforcement.
    pub stock_policy: StockPolicy,
}

/// Area of remaining parts that `spec` accepts and that fit its usable area.
pub fn compatible_area(spec: &SheetSpec, parts: &[Part], constraints: &NestingConstraints) -> f64 {
    let usable = spec.usable_area(constraints.edge_margin);
    parts
        .iter()
        .filter(|p| !p.is_exhausted() && spec.accepts(p) && fits_within(p, &usable))
        .map(Part::remaining_area)
        .sum()
}

/// Picks the highest-scoring sheet able to take at least one remaining part.
///
/// `used` counts sheets already opened per spec and `excluded` marks specs
/// that are no longer considered in this run. Specs with stock left are
/// preferred; under [`StockPolicy::Advisory`] an exhausted spec is chosen
/// only when no stocked spec can take any remaining part. Ties go to the
/// spec listed first.
pub fn select_sheet(
    ctx: &SelectionContext<'_>,
    parts: &[Part],
    used: &[u32],
    excluded: &[bool],
) -> Option<SheetSelection> {
    let mut best_stocked: Option<SheetSelection> = None;
    let mut best_overdrawn: Option<SheetSelection> = None;

    for (index, spec) in ctx.specs.iter().enumerate() {
        if excluded.get(index).copied().unwrap_or(false) {
            continue;
        }
        let overdraw = used.get(index).copied().unwrap_or(0) >= spec.available;
        if overdraw && ctx.stock_policy == StockPolicy::Strict {
            continue;
        }

        let area = compatible_area(spec, parts, ctx.constraints);
        if area <= 0.0 {
            continue;
        }

        let score = ctx.goal.score(&SheetCandidate::new(spec, area));
        let candidate = SheetSelection {
            spec_index: index,
            score,
            compatible_area: area,
            overdraw,
        };
        let slot = if overdraw {
            &mut best_overdrawn
        } else {
            &mut best_stocked
        };
        if slot.map_or(true, |best| score > best.score) {
            *slot = Some(candidate);
        }
    }

    best_stocked.or(best_overdrawn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        specs: &'a [SheetSpec],
        constraints: &'a NestingConstraints,
        goal: OptimizationGoal,
        policy: StockPolicy,
    ) -> SelectionContext<'a> {
        SelectionContext {
            specs,
            constraints,
            goal,
            stock_policy: policy,
        }
    }

    #[test]
    fn test_compatible_area_filters() {
        let constraints = NestingConstraints::default();
        let spec = SheetSpec::new("S", 1000.0, 1000.0, "al", 2.0, 50.0);
        let parts = vec![
            Part::new("fits", 100.0, 100.0, "al", 2.0).with_quantity(3),
            Part::new("other_material", 100.0, 100.0, "steel", 2.0),
            Part::new("other_gauge", 100.0, 100.0, "al", 3.0),
            Part::new("too_big", 990.0, 100.0, "al", 2.0),
            Part::new("done", 100.0, 100.0, "al", 2.0).with_quantity(0),
        ];
        assert_eq!(compatible_area(&spec, &parts, &constraints), 30_000.0);
    }

    #[test]
    fn test_cheaper_sheet_wins_cost_minimization() {
        let constraints = NestingConstraints::default();
        let specs = vec![
            SheetSpec::new("pricey", 1000.0, 1000.0, "al", 1.0, 80.0).with_available(5),
            SheetSpec::new("cheap", 1000.0, 1000.0, "al", 1.0, 40.0).with_available(5),
        ];
        let parts = vec![Part::new("P", 200.0, 200.0, "al", 1.0).with_quantity(4)];
        let context = ctx(&specs, &constraints, OptimizationGoal::CostMinimization, StockPolicy::Advisory);

        let selection = select_sheet(&context, &parts, &[0, 0], &[false, false]).unwrap();
        assert_eq!(selection.spec_index, 1);
        assert!(!selection.overdraw);
    }

    #[test]
    fn test_ties_go_to_first_spec() {
        let constraints = NestingConstraints::default();
        let specs = vec![
            SheetSpec::new("A", 1000.0, 1000.0, "al", 1.0, 40.0),
            SheetSpec::new("B", 1000.0, 1000.0, "al", 1.0, 40.0),
        ];
        let parts = vec![Part::new("P", 200.0, 200.0, "al", 1.0)];
        let context = ctx(&specs, &constraints, OptimizationGoal::Balanced, StockPolicy::Advisory);
        let selection = select_sheet(&context, &parts, &[0, 0], &[false, false]).unwrap();
        assert_eq!(selection.spec_index, 0);
    }

    #[test]
    fn test_stocked_spec_preferred_over_overdraw() {
        let constraints = NestingConstraints::default();
        let specs = vec![
            SheetSpec::new("cheap", 1000.0, 1000.0, "al", 1.0, 10.0).with_available(1),
            SheetSpec::new("pricey", 1000.0, 1000.0, "al", 1.0, 90.0).with_available(1),
        ];
        let parts = vec![Part::new("P", 200.0, 200.0, "al", 1.0).with_quantity(50)];
        let context = ctx(&specs, &constraints, OptimizationGoal::CostMinimization, StockPolicy::Advisory);

        let selection = select_sheet(&context, &parts, &[1, 0], &[false, false]).unwrap();
        assert_eq!(selection.spec_index, 1);

        let selection = select_sheet(&context, &parts, &[1, 1], &[false, false]).unwrap();
        assert_eq!(selection.spec_index, 0);
        assert!(selection.overdraw);
    }

    #[test]
    fn test_strict_policy_skips_exhausted() {
        let constraints = NestingConstraints::default();
        let specs = vec![SheetSpec::new("S", 1000.0, 1000.0, "al", 1.0, 10.0).with_available(1)];
        let parts = vec![Part::new("P", 200.0, 200.0, "al", 1.0).with_quantity(50)];
        let context = ctx(&specs, &constraints, OptimizationGoal::Balanced, StockPolicy::Strict);

        assert!(select_sheet(&context, &parts, &[0], &[false]).is_some());
        assert!(select_sheet(&context, &parts, &[1], &[false]).is_none());
    }

    #[test]
    fn test_no_compatible_sheet() {
        let constraints = NestingConstraints::default();
        let specs = vec![SheetSpec::new("S", 500.0, 500.0, "al", 1.0, 10.0)];
        let parts = vec![Part::new("huge", 2000.0, 2000.0, "al", 1.0)];
        let context = ctx(&specs, &constraints, OptimizationGoal::Balanced, StockPolicy::Advisory);
        assert!(select_sheet(&context, &parts, &[0], &[false]).is_none());
    }

    #[test]
    fn test_excluded_spec_skipped() {
        let constraints = NestingConstraints::default();
        let specs = vec![
            SheetSpec::new("A", 1000.0, 1000.0, "al", 1.0, 10.0),
            SheetSpec::new("B", 1000.0, 1000.0, "al", 1.0, 20.0),
        ];
        let parts = vec![Part::new("P", 200.0, 200.0, "al", 1.0)];
        let context = ctx(&specs, &constraints, OptimizationGoal::CostMinimization, StockPolicy::Advisory);
        let selection = select_sheet(&context, &parts, &[0, 0], &[true, false]).unwrap();
        assert_eq!(selection.spec_index, 1);
    }
}
