//! Self-scheduled counter
//!
//! Same contract and state machine as [`SemiAutoCounter`], with one
//! structural difference: instead of exposing `update`/`fixed_update` for the
//! host to call, the counter registers its own repeating task with a
//! [`TickScheduler`] at construction. The task performs the completion check
//! every tick; pausing only suppresses the check, the task keeps polling.
//!
//! Dropping the counter cancels the task, so the scheduler discards it on the
//! next pass; a task never outlives its owner.

use std::cell::RefCell;
use std::rc::Rc;

use crate::scheduler::{TaskHandle, TickScheduler};

use super::{Counter, SemiAutoCounter};

/// Counter that polls itself through a scheduler-registered repeating task.
pub struct AutoCounter {
    inner: Rc<RefCell<SemiAutoCounter>>,
    task: TaskHandle,
}

impl AutoCounter {
    /// Create the counter and register its polling task.
    pub fn new(scheduler: &mut TickScheduler, now: f64, time_limit: f64) -> Self {
        let inner = Rc::new(RefCell::new(SemiAutoCounter::new(now, time_limit)));
        let polled = Rc::clone(&inner);
        let task = scheduler.register(move |now| polled.borrow_mut().update(now));
        Self { inner, task }
    }

    /// Set the completion callback. Single slot; a later call replaces the
    /// earlier callback.
    ///
    /// The callback runs from inside the polling task and must not call back
    /// into this counter.
    pub fn on_complete(self, callback: impl FnMut() + 'static) -> Self {
        self.inner.borrow_mut().set_on_complete(callback);
        self
    }

    /// Replace the completion callback after construction.
    pub fn set_on_complete(&self, callback: impl FnMut() + 'static) {
        self.inner.borrow_mut().set_on_complete(callback);
    }

    /// Snapshot elapsed time and suppress the completion check.
    pub fn pause(&self, now: f64) -> &Self {
        self.inner.borrow_mut().pause(now);
        self
    }

    /// Continue from the paused elapsed time.
    pub fn resume(&self, now: f64) -> &Self {
        self.inner.borrow_mut().resume(now);
        self
    }

    /// Force the cycle complete immediately, optionally suppressing the
    /// callback.
    pub fn complete(&self, now: f64, invoke_callback: bool) -> &Self {
        self.inner.borrow_mut().complete(now, invoke_callback);
        self
    }
}

impl Counter for AutoCounter {
    fn time_count(&self, now: f64) -> f64 {
        self.inner.borrow().time_count(now)
    }

    fn completed(&self, now: f64) -> bool {
        self.inner.borrow().completed(now)
    }

    fn time_limit(&self) -> f64 {
        self.inner.borrow().time_limit()
    }

    fn recount(&mut self, now: f64, time_limit: Option<f64>) {
        self.inner.borrow_mut().recount(now, time_limit);
    }

    fn set_count_value(&mut self, now: f64, factor: f64) {
        self.inner.borrow_mut().set_count_value(now, factor);
    }
}

impl Drop for AutoCounter {
    fn drop(&mut self) {
        tracing::debug!("auto counter dropped, cancelling its polling task");
        self.task.cancel();
    }
}
