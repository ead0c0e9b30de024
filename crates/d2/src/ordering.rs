//! Part ordering for the sheet loop.

use std::cmp::Ordering;

use lasernest_core::Part;

/// Returns part indices in nesting order.
///
/// Parts are sorted by priority tier (critical first), then by footprint
/// area (largest first). The sort is stable, so parts that tie keep their
/// input order. The order is computed once per run.
pub fn placement_order(parts: &[Part]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..parts.len()).collect();
    order.sort_by(|&a, &b| compare_parts(&parts[a], &parts[b]));
    order
}

fn compare_parts(a: &Part, b: &Part) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| {
        b.area()
            .partial_cmp(&a.area())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasernest_core::Priority;

    #[test]
    fn test_priority_before_area() {
        let parts = vec![
            Part::new("big_low", 500.0, 500.0, "al", 1.0).with_priority(Priority::Low),
            Part::new("small_critical", 10.0, 10.0, "al", 1.0).with_priority(Priority::Critical),
            Part::new("mid_high", 100.0, 100.0, "al", 1.0).with_priority(Priority::High),
            Part::new("big_medium", 400.0, 400.0, "al", 1.0),
        ];
        let order = placement_order(&parts);
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_area_breaks_ties() {
        let parts = vec![
            Part::new("small", 10.0, 10.0, "al", 1.0),
            Part::new("large", 100.0, 50.0, "al", 1.0),
            Part::new("medium", 50.0, 50.0, "al", 1.0),
        ];
        assert_eq!(placement_order(&parts), vec![1, 2, 0]);
    }

    #[test]
    fn test_stable_for_equal_parts() {
        let parts = vec![
            Part::new("first", 20.0, 10.0, "al", 1.0),
            Part::new("second", 10.0, 20.0, "al", 1.0),
            Part::new("third", 20.0, 10.0, "al", 1.0),
        ];
        assert_eq!(placement_order(&parts), vec![0, 1, 2]);
    }
}
