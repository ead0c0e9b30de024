//! Time limit and cancellation checks for a running optimization.

use std::time::Instant;

use lasernest_core::{CancellationToken, Termination};

/// Wall-clock limit plus an external cancellation flag.
#[derive(Debug)]
pub struct Budget<'a> {
    start: Instant,
    time_limit_ms: u64,
    token: &'a CancellationToken,
}

impl<'a> Budget<'a> {
    /// Starts the clock. A limit of 0 means unlimited.
    pub fn start(time_limit_ms: u64, token: &'a CancellationToken) -> Self {
        Self {
            start: Instant::now(),
            time_limit_ms,
            token,
        }
    }

    /// Milliseconds since the budget started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Returns the reason to stop, if any.
    pub fn check(&self) -> Option<Termination> {
        if self.token.is_cancelled() {
            return Some(Termination::Cancelled);
        }
        if self.time_limit_ms > 0 && self.elapsed_ms() >= self.time_limit_ms {
            return Some(Termination::TimeLimitExceeded);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_budget() {
        let token = CancellationToken::new();
        let budget = Budget::start(0, &token);
        assert_eq!(budget.check(), None);
    }

    #[test]
    fn test_cancelled_budget() {
        let token = CancellationToken::new();
        let budget = Budget::start(0, &token);
        token.cancel();
        assert_eq!(budget.check(), Some(Termination::Cancelled));
    }

    #[test]
    fn test_expired_budget() {
        let token = CancellationToken::new();
        let budget = Budget::start(1, &token);
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(budget.check(), Some(Termination::TimeLimitExceeded));
    }
}
