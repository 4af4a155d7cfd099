//! Optional wall-clock budget for a search.
//!
//! The deadline is checked on node entry; once it passes, the in-flight
//! iteration unwinds (restoring the board on the way out) and the last
//! completed iteration stands.

use std::time::{Duration, Instant};

/// Nodes visited between clock reads.
const CHECK_INTERVAL_NODES: u64 = 256;

#[derive(Debug, Clone, Copy)]
pub struct SearchDeadline {
    started: Instant,
    budget: Option<Duration>,
}

impl SearchDeadline {
    pub fn unbounded() -> Self {
        Self {
            started: Instant::now(),
            budget: None,
        }
    }

    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget: Some(budget),
        }
    }

    pub fn from_budget(budget: Option<Duration>) -> Self {
        match budget {
            Some(b) => Self::after(b),
            None => Self::unbounded(),
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.budget.is_some()
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn expired(&self) -> bool {
        match self.budget {
            Some(budget) => self.started.elapsed() >= budget,
            None => false,
        }
    }

    /// Cheap variant for hot paths: only reads the clock every few hundred nodes.
    #[inline]
    pub fn expired_at(&self, nodes: u64) -> bool {
        self.budget.is_some() && nodes % CHECK_INTERVAL_NODES == 0 && self.expired()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SearchDeadline;

    #[test]
    fn unbounded_deadline_never_expires() {
        let deadline = SearchDeadline::unbounded();
        assert!(!deadline.is_bounded());
        assert!(!deadline.expired());
        assert!(!deadline.expired_at(0));
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let deadline = SearchDeadline::after(Duration::ZERO);
        assert!(deadline.expired());
        assert!(deadline.expired_at(256));
        assert!(!deadline.expired_at(255));
    }
}
