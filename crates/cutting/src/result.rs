//! Result types for cutting time estimation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cutting effort for a set of placed parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuttingEstimate {
    /// Total contour length cut (mm).
    pub cut_distance_mm: f64,

    /// Number of pierces (one per contour).
    pub pierces: usize,

    /// Time spent moving along contours (s).
    pub cutting_time_s: f64,

    /// Time spent piercing and on lead moves (s).
    pub overhead_time_s: f64,
}

impl CuttingEstimate {
    /// Creates an empty estimate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total beam-on time (s).
    pub fn total_time_s(&self) -> f64 {
        self.cutting_time_s + self.overhead_time_s
    }

    /// Adds another estimate into this one.
    pub fn accumulate(&mut self, other: &CuttingEstimate) {
        self.cut_distance_mm += other.cut_distance_mm;
        self.pierces += other.pierces;
        self.cutting_time_s += other.cutting_time_s;
        self.overhead_time_s += other.overhead_time_s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_estimate() {
        let estimate = CuttingEstimate::new();
        assert_eq!(estimate.pierces, 0);
        assert_eq!(estimate.total_time_s(), 0.0);
    }

    #[test]
    fn test_accumulate() {
        let mut total = CuttingEstimate::new();
        let one = CuttingEstimate {
            cut_distance_mm: 400.0,
            pierces: 1,
            cutting_time_s: 8.0,
            overhead_time_s: 0.8,
        };
        total.accumulate(&one);
        total.accumulate(&one);
        assert_eq!(total.pierces, 2);
        assert!((total.total_time_s() - 17.6).abs() < 1e-10);
    }
}
