//! Multi-sheet nesting loop.

use std::time::Instant;

use lasernest_core::{
    validate_parts, validate_sheets, CancellationToken, NestingConstraints, OptimizationGoal,
    OptimizationRun, Part, PartFulfillment, Result, RunConfig, SheetSpec, StockWarning,
    Termination,
};
use lasernest_cutting::CuttingParameters;

use crate::budget::Budget;
use crate::filler::fill_sheet;
use crate::ordering::placement_order;
use crate::selection::{select_sheet, SelectionContext, SheetSelection};

/// Outer loop states.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LoopState {
    Selecting,
    Filling(SheetSelection),
    Done,
    Aborted(Termination),
}

/// Sheet-by-sheet nester.
///
/// Each call to [`optimize`](Self::optimize) works on its own copy of the
/// part list, so one nester can be reused and several can run on separate
/// threads.
#[derive(Debug, Clone)]
pub struct SheetNester {
    constraints: NestingConstraints,
    cutting: CuttingParameters,
    config: RunConfig,
    token: CancellationToken,
}

impl SheetNester {
    /// Creates a nester.
    pub fn new(constraints: NestingConstraints, cutting: CuttingParameters, config: RunConfig) -> Self {
        Self {
            constraints,
            cutting,
            config,
            token: CancellationToken::new(),
        }
    }

    /// Uses an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Token that stops this nester when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Requests cancellation of a running [`optimize`](Self::optimize).
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Geometric constraints in use.
    pub fn constraints(&self) -> &NestingConstraints {
        &self.constraints
    }

    /// Run configuration in use.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Nests `parts` onto sheets drawn from `sheets`.
    ///
    /// Invalid input is rejected before any placement attempt. Running out
    /// of sheets, time or compatible stock is not an error: the run comes
    /// back with whatever was placed and a [`Termination`] explaining the
    /// stop, and [`OptimizationRun::outcome`] reports any shortfall.
    pub fn optimize(&self, parts: &[Part], sheets: &[SheetSpec]) -> Result<OptimizationRun> {
        self.constraints.validate()?;
        self.cutting.validate()?;
        self.config.validate()?;
        validate_parts(parts)?;
        validate_sheets(sheets)?;

        let start = Instant::now();
        let budget = Budget::start(self.config.time_limit_ms, &self.token);

        let mut remaining: Vec<Part> = parts.iter().map(Part::normalized).collect();
        let specs: Vec<SheetSpec> = sheets.iter().map(SheetSpec::normalized).collect();
        let requested: Vec<u32> = remaining.iter().map(|p| p.quantity).collect();
        let order = placement_order(&remaining);

        let ctx = SelectionContext {
            specs: &specs,
            constraints: &self.constraints,
            goal: self.config.goal,
            stock_policy: self.config.stock_policy,
        };

        let mut run = OptimizationRun::new(self.config.goal);
        let mut placed = vec![0u32; remaining.len()];
        let mut used = vec![0u32; specs.len()];
        let mut excluded = vec![false; specs.len()];
        let mut state = LoopState::Selecting;

        let termination = loop {
            state = match state {
                LoopState::Selecting => {
                    if remaining.iter().all(Part::is_exhausted) {
                        LoopState::Done
                    } else if let Some(reason) = budget.check() {
                        LoopState::Aborted(reason)
                    } else if run.layouts.len() >= self.config.max_sheets as usize {
                        log::warn!(
                            "Sheet limit of {} reached with parts remaining",
                            self.config.max_sheets
                        );
                        LoopState::Aborted(Termination::SheetLimitReached)
                    } else {
                        match select_sheet(&ctx, &remaining, &used, &excluded) {
                            Some(selection) => {
                                log::debug!(
                                    "Selected sheet {} (score {:.4}, compatible area {:.0} mm²)",
                                    specs[selection.spec_index].id,
                                    selection.score,
                                    selection.compatible_area
                                );
                                LoopState::Filling(selection)
                            }
                            None => LoopState::Aborted(Termination::NoCompatibleSheet),
                        }
                    }
                }
                LoopState::Filling(selection) => {
                    let spec = &specs[selection.spec_index];
                    let outcome = fill_sheet(
                        run.layouts.len(),
                        spec,
                        &remaining,
                        &order,
                        &placed,
                        &self.constraints,
                        &self.cutting,
                        &budget,
                    );

                    if outcome.placed_total() == 0 {
                        match outcome.interrupted {
                            Some(reason) => LoopState::Aborted(reason),
                            None => {
                                log::debug!("Sheet {} took no parts, excluding it", spec.id);
                                excluded[selection.spec_index] = true;
                                LoopState::Selecting
                            }
                        }
                    } else {
                        if selection.overdraw {
                            log::warn!(
                                "Sheet {} used beyond its stock of {}",
                                spec.id,
                                spec.available
                            );
                        }
                        for (index, count) in outcome.placed.iter().enumerate() {
                            remaining[index].quantity -= *count;
                            placed[index] += *count;
                        }
                        used[selection.spec_index] += 1;
                        log::debug!(
                            "Sheet #{} ({}): {} parts, {:.1}% utilization",
                            outcome.layout.index,
                            spec.id,
                            outcome.layout.placed_count(),
                            outcome.layout.utilization_percent
                        );
                        run.layouts.push(outcome.layout);

                        match outcome.interrupted {
                            Some(reason) => LoopState::Aborted(reason),
                            None => LoopState::Selecting,
                        }
                    }
                }
                LoopState::Done => break Termination::Completed,
                LoopState::Aborted(reason) => break reason,
            };
        };

        match termination {
            Termination::Cancelled => log::warn!("Nesting cancelled"),
            Termination::TimeLimitExceeded => {
                log::warn!("Nesting stopped after {} ms time limit", self.config.time_limit_ms)
            }
            _ => {}
        }

        run.stock_warnings = specs
            .iter()
            .zip(&used)
            .filter(|(spec, count)| **count > spec.available)
            .map(|(spec, &count)| StockWarning {
                sheet_id: spec.id.clone(),
                available: spec.available,
                used: count,
            })
            .collect();

        run.fulfillment = remaining
            .iter()
            .enumerate()
            .map(|(index, part)| PartFulfillment {
                part_id: part.id.clone(),
                requested: requested[index],
                placed: placed[index],
                remaining: part.quantity,
            })
            .collect();

        for entry in run.fulfillment.iter().filter(|f| !f.is_satisfied()) {
            log::warn!(
                "Part {}: {} of {} placed",
                entry.part_id,
                entry.placed,
                entry.requested
            );
        }

        run.termination = termination;
        run.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "Nesting finished ({:?}): {} sheets, {} of {} instances in {} ms",
            run.termination,
            run.total_sheets(),
            run.placed_count(),
            requested.iter().sum::<u32>(),
            run.computation_time_ms
        );

        Ok(run)
    }
}

/// Nests parts with a fixed goal and sheet cap.
///
/// Convenience wrapper over [`SheetNester`] with advisory stock and no time
/// limit.
pub fn optimize(
    parts: &[Part],
    sheet_specs: &[SheetSpec],
    constraints: &NestingConstraints,
    cutting_params: &CuttingParameters,
    goal: OptimizationGoal,
    max_sheets: u32,
) -> Result<OptimizationRun> {
    let config = RunConfig::new()
        .with_goal(goal)
        .with_max_sheets(max_sheets)
        .with_time_limit(0);
    SheetNester::new(*constraints, *cutting_params, config).optimize(parts, sheet_specs)
}
