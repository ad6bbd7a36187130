//! Poll-only counter
//!
//! Completion is recomputed on every query from the stored cycle start, with
//! no cached state and no callback. Use when the caller is content to poll
//! status each tick rather than receive a push notification.

use super::Counter;

/// Counter whose status is a pure function of the clock reading.
#[derive(Debug, Clone)]
pub struct SimpleCounter {
    time_count_start: f64,
    time_limit: f64,
}

impl SimpleCounter {
    /// Create a counter whose cycle starts now.
    pub fn new(now: f64, time_limit: f64) -> Self {
        debug_assert!(time_limit > 0.0);
        Self {
            time_count_start: now,
            time_limit,
        }
    }

    /// Create a counter whose cycle is already complete.
    ///
    /// Useful for cooldown-style logic that should be ready on first query.
    pub fn new_elapsed(now: f64, time_limit: f64) -> Self {
        let mut counter = Self::new(now, time_limit);
        counter.complete(now);
        counter
    }

    /// Force the cycle complete immediately. Idempotent; chains.
    pub fn complete(&mut self, now: f64) -> &mut Self {
        self.time_count_start = now - self.time_limit;
        self
    }
}

impl Counter for SimpleCounter {
    fn time_count(&self, now: f64) -> f64 {
        now - self.time_count_start
    }

    fn completed(&self, now: f64) -> bool {
        now >= self.time_count_start + self.time_limit
    }

    fn time_limit(&self) -> f64 {
        self.time_limit
    }

    fn recount(&mut self, now: f64, time_limit: Option<f64>) {
        if let Some(limit) = time_limit {
            debug_assert!(limit > 0.0);
            self.time_limit = limit;
        }
        self.time_count_start = now;
    }

    fn set_count_value(&mut self, now: f64, factor: f64) {
        self.time_count_start = now - factor * self.time_limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_counter_is_not_completed() {
        let counter = SimpleCounter::new(0.0, 10.0);
        assert!(!counter.completed(0.0));
        assert_eq!(counter.interpolant(0.0), 0.0);
        assert_eq!(counter.time_limit(), 10.0);
    }

    #[test]
    fn completes_exactly_at_the_deadline() {
        let counter = SimpleCounter::new(0.0, 10.0);
        assert!(!counter.completed(9.999));
        assert!(counter.completed(10.0));
        assert_eq!(counter.interpolant(10.0), 1.0);
    }

    #[test]
    fn interpolant_clamps_but_unclamped_does_not() {
        let counter = SimpleCounter::new(0.0, 10.0);
        assert_eq!(counter.interpolant(15.0), 1.0);
        assert_eq!(counter.interpolant_unclamped(15.0), 1.5);
        assert_eq!(counter.interpolant_unclamped(-5.0), -0.5);
    }

    #[test]
    fn recount_restarts_and_optionally_changes_limit() {
        let mut counter = SimpleCounter::new(0.0, 10.0);
        counter.recount(4.0, None);
        assert_eq!(counter.time_count(4.0), 0.0);
        assert_eq!(counter.time_limit(), 10.0);
        assert!(!counter.completed(4.0));

        counter.recount(5.0, Some(2.0));
        assert_eq!(counter.time_limit(), 2.0);
        assert!(counter.completed(7.0));
    }

    #[test]
    fn set_count_value_seeds_progress() {
        let mut counter = SimpleCounter::new(0.0, 10.0);
        counter.set_count_value(3.0, 0.5);
        assert_eq!(counter.interpolant(3.0), 0.5);
        assert_eq!(counter.time_count(3.0), 5.0);
    }

    #[test]
    fn complete_is_idempotent() {
        let mut counter = SimpleCounter::new(0.0, 10.0);
        counter.complete(1.0).complete(1.0);
        assert!(counter.completed(1.0));
        assert_eq!(counter.interpolant(1.0), 1.0);
    }

    #[test]
    fn new_elapsed_starts_completed() {
        let counter = SimpleCounter::new_elapsed(0.0, 10.0);
        assert!(counter.completed(0.0));
    }
}
