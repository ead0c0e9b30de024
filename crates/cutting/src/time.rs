//! Cutting time estimation.
//!
//! Every placed rectangle is cut as one closed contour:
//!
//! ```text
//! t = perimeter / feed_rate + pierce_time + lead_in_out_time
//! ```
//!
//! Rapid traverse between contours is not modelled; the estimate is
//! intended for quoting, not for machine programming.

use lasernest_core::PlacedInstance;

use crate::config::CuttingParameters;
use crate::result::CuttingEstimate;

/// Estimate for cutting one closed contour of the given length.
pub fn contour_estimate(perimeter: f64, params: &CuttingParameters) -> CuttingEstimate {
    let speed = params.cutting_speed_mm_s();
    let cutting_time_s = if speed > 0.0 { perimeter / speed } else { 0.0 };
    CuttingEstimate {
        cut_distance_mm: perimeter,
        pierces: 1,
        cutting_time_s,
        overhead_time_s: params.pierce_time_s + params.lead_in_out_time_s,
    }
}

/// Total time (s) to cut one contour of the given length.
pub fn instance_cutting_time(perimeter: f64, params: &CuttingParameters) -> f64 {
    contour_estimate(perimeter, params).total_time_s()
}

/// Estimate for all instances placed on one sheet.
pub fn estimate_placements(
    placements: &[PlacedInstance],
    params: &CuttingParameters,
) -> CuttingEstimate {
    placements
        .iter()
        .fold(CuttingEstimate::new(), |mut total, placed| {
            total.accumulate(&contour_estimate(placed.rect().perimeter(), params));
            total
        })
}
