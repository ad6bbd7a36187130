//! Host-updated counter with a one-shot completion callback
//!
//! The host calls `update`/`fixed_update` once per tick; when the deadline
//! passes, the stored callback fires exactly once for the cycle. No
//! background task is involved, which makes this variant cheap enough for
//! large populations; pair it with
//! [`SemiAutoCounterHub`](super::SemiAutoCounterHub) to amortize the per-tick
//! hook.

use std::cell::RefCell;
use std::rc::Rc;

use super::Counter;

/// Shared handle to a [`SemiAutoCounter`], for hub membership and
/// self-scheduled wrappers.
pub type SharedCounter = Rc<RefCell<SemiAutoCounter>>;

type CompleteCallback = Box<dyn FnMut()>;

/// Update-driven countdown state machine.
///
/// States: running, paused, completed. The completion flag latches once per
/// cycle, so repeated `update` calls after the deadline are idempotent.
/// Correctness depends on the host calling `update`/`fixed_update` at least
/// once after the deadline; between ticks the counter is at rest.
pub struct SemiAutoCounter {
    time_count_start: f64,
    time_limit: f64,
    pause_save: f64,
    running: bool,
    complete_fired: bool,
    on_complete: Option<CompleteCallback>,
}

impl SemiAutoCounter {
    pub fn new(now: f64, time_limit: f64) -> Self {
        debug_assert!(time_limit > 0.0);
        Self {
            time_count_start: now,
            time_limit,
            pause_save: 0.0,
            running: true,
            complete_fired: false,
            on_complete: None,
        }
    }

    /// Set the completion callback. Single slot; a later call replaces the
    /// earlier callback.
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_on_complete(callback);
        self
    }

    /// Replace the completion callback after construction.
    pub fn set_on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Snapshot elapsed time and stop advancing. No-op while already paused.
    pub fn pause(&mut self, now: f64) -> &mut Self {
        if self.running {
            self.pause_save = now - self.time_count_start;
            self.running = false;
        }
        self
    }

    /// Continue from the paused elapsed time, losing none and double-counting
    /// none. No-op while already running.
    pub fn resume(&mut self, now: f64) -> &mut Self {
        if !self.running {
            self.time_count_start = now - self.pause_save;
            self.running = true;
        }
        self
    }

    /// Force the cycle complete immediately.
    ///
    /// With `invoke_callback` false the counter fast-forwards silently: the
    /// fired flag is latched either way, so no later `update` re-fires.
    pub fn complete(&mut self, now: f64, invoke_callback: bool) -> &mut Self {
        self.time_count_start = now - self.time_limit;
        self.pause_save = self.time_limit;
        if invoke_callback && !self.complete_fired {
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
        self.complete_fired = true;
        self
    }

    /// Per-tick completion check. Fires the callback exactly once per cycle,
    /// on the first call where the deadline has passed.
    pub fn update(&mut self, now: f64) {
        if self.complete_fired || !self.running || now < self.time_count_start + self.time_limit {
            return;
        }
        self.complete_fired = true;
        tracing::debug!(time_limit = self.time_limit, "countdown completed");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }

    /// Physics-phase variant of [`update`](Self::update); identical check, so
    /// hosts with split frame/physics loops can call whichever phase owns the
    /// counter.
    pub fn fixed_update(&mut self, now: f64) {
        self.update(now);
    }

    /// Wrap into the shared handle used by hubs and self-scheduled wrappers.
    pub fn into_shared(self) -> SharedCounter {
        Rc::new(RefCell::new(self))
    }
}

impl Counter for SemiAutoCounter {
    fn time_count(&self, now: f64) -> f64 {
        if self.running {
            now - self.time_count_start
        } else {
            self.pause_save
        }
    }

    /// Completion here means "the callback has fired (or been latched) for
    /// this cycle", not a live deadline comparison.
    fn completed(&self, _now: f64) -> bool {
        self.complete_fired
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
        self.complete_fired = false;
        self.pause_save = 0.0;
    }

    fn set_count_value(&mut self, now: f64, factor: f64) {
        if self.running {
            self.time_count_start = now - factor * self.time_limit;
        } else {
            self.pause_save = self.time_limit * factor;
        }
        // Rewinding to (or before) the start re-arms the completion callback.
        if factor <= 0.0 {
            self.complete_fired = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_callback() -> (Rc<Cell<u32>>, impl FnMut()) {
        let fires = Rc::new(Cell::new(0u32));
        let fires_cb = Rc::clone(&fires);
        (fires, move || fires_cb.set(fires_cb.get() + 1))
    }

    #[test]
    fn callback_fires_exactly_once() {
        let (fires, callback) = counting_callback();
        let mut counter = SemiAutoCounter::new(0.0, 5.0).on_complete(callback);

        counter.update(4.0);
        assert_eq!(fires.get(), 0);

        counter.update(5.0);
        assert_eq!(fires.get(), 1);
        assert!(counter.completed(5.0));

        // Further updates in the completed state are idempotent.
        counter.update(5.0);
        counter.update(6.0);
        counter.fixed_update(7.0);
        assert_eq!(fires.get(), 1);
    }

    #[test]
    fn recount_rearms_the_callback() {
        let (fires, callback) = counting_callback();
        let mut counter = SemiAutoCounter::new(0.0, 5.0).on_complete(callback);

        counter.update(5.0);
        assert_eq!(fires.get(), 1);

        counter.recount(5.0, None);
        assert!(!counter.completed(5.0));
        assert_eq!(counter.interpolant(5.0), 0.0);

        counter.update(10.0);
        assert_eq!(fires.get(), 2);
    }

    #[test]
    fn pause_freezes_elapsed_time() {
        let mut counter = SemiAutoCounter::new(0.0, 10.0);
        counter.pause(4.0);
        assert_eq!(counter.time_count(4.0), 4.0);
        assert_eq!(counter.time_count(9.0), 4.0);

        // No completion while paused, even past the deadline.
        counter.update(20.0);
        assert!(!counter.completed(20.0));
    }

    #[test]
    fn pause_resume_round_trip_preserves_elapsed() {
        let mut counter = SemiAutoCounter::new(0.0, 10.0);
        counter.pause(4.0).resume(4.0);
        assert!((counter.time_count(4.0) - 4.0).abs() < 1e-9);

        // Time paused does not count toward the cycle.
        counter.pause(6.0);
        counter.resume(9.0);
        assert!((counter.time_count(9.0) - 6.0).abs() < 1e-9);
        counter.update(13.0);
        assert!(counter.completed(13.0));
    }

    #[test]
    fn redundant_pause_and_resume_are_no_ops() {
        let mut counter = SemiAutoCounter::new(0.0, 10.0);
        counter.pause(4.0).pause(7.0);
        assert_eq!(counter.time_count(7.0), 4.0);

        counter.resume(8.0).resume(9.0);
        assert!((counter.time_count(9.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn complete_silently_suppresses_the_callback() {
        let (fires, callback) = counting_callback();
        let mut counter = SemiAutoCounter::new(0.0, 5.0).on_complete(callback);

        counter.complete(1.0, false);
        assert_eq!(fires.get(), 0);
        assert!(counter.completed(1.0));
        assert_eq!(counter.interpolant(1.0), 1.0);

        // The latched flag also blocks the update path.
        counter.update(10.0);
        assert_eq!(fires.get(), 0);
    }

    #[test]
    fn complete_invokes_the_callback_once() {
        let (fires, callback) = counting_callback();
        let mut counter = SemiAutoCounter::new(0.0, 5.0).on_complete(callback);

        counter.complete(1.0, true);
        assert_eq!(fires.get(), 1);

        counter.complete(2.0, true);
        assert_eq!(fires.get(), 1, "already-completed cycle must not re-fire");
    }

    #[test]
    fn set_count_value_while_running() {
        let mut counter = SemiAutoCounter::new(0.0, 10.0);
        counter.set_count_value(3.0, 0.5);
        assert_eq!(counter.interpolant(3.0), 0.5);
        assert_eq!(counter.time_count(3.0), 5.0);
    }

    #[test]
    fn set_count_value_while_paused_rewrites_the_snapshot() {
        let mut counter = SemiAutoCounter::new(0.0, 10.0);
        counter.pause(2.0);
        counter.set_count_value(2.0, 0.8);
        assert_eq!(counter.time_count(2.0), 8.0);

        counter.resume(2.0);
        counter.update(4.0);
        assert!(counter.completed(4.0));
    }

    #[test]
    fn rewinding_clears_the_completion_latch() {
        let (fires, callback) = counting_callback();
        let mut counter = SemiAutoCounter::new(0.0, 5.0).on_complete(callback);

        counter.update(5.0);
        assert_eq!(fires.get(), 1);

        counter.set_count_value(5.0, 0.0);
        assert!(!counter.completed(5.0));

        counter.update(10.0);
        assert_eq!(fires.get(), 2);
    }

    #[test]
    fn absent_callback_is_not_an_error() {
        let mut counter = SemiAutoCounter::new(0.0, 5.0);
        counter.update(6.0);
        assert!(counter.completed(6.0));
        counter.complete(7.0, true);
    }
}
