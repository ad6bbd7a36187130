//! Cooperative tick scheduler
//!
//! Self-driving components (`AutoCounter`, `SimpleCounterQueue`) register a
//! repeating task here instead of asking the host for a per-tick hook. The
//! host pumps `tick(now)` once per frame; every live task runs once per pump,
//! in registration order.
//!
//! Registration returns a [`TaskHandle`]. Cancelling the handle deregisters
//! the task on the next pass, so an owner dropping its handle-holder tears the
//! task down deterministically rather than leaving it polling forever.

use std::cell::Cell;
use std::rc::Rc;

/// Cancellation handle for a registered repeating task.
///
/// Cloneable; all clones refer to the same task. Cancelling is idempotent and
/// takes effect on the scheduler's next pass.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Slot {
    run: Box<dyn FnMut(f64)>,
    cancelled: Rc<Cell<bool>>,
}

/// Ordered collection of repeating per-tick tasks.
///
/// Tasks never block; each invocation does a bounded amount of work and
/// returns control to the host. All tasks run on the single logical timeline
/// that owns the scheduler.
#[derive(Default)]
pub struct TickScheduler {
    tasks: Vec<Slot>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repeating task. The task receives the clock reading passed
    /// to each `tick` call, for the lifetime of the returned handle.
    pub fn register(&mut self, task: impl FnMut(f64) + 'static) -> TaskHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.push(Slot {
            run: Box::new(task),
            cancelled: Rc::clone(&cancelled),
        });
        TaskHandle { cancelled }
    }

    /// Run every live task once, in registration order.
    ///
    /// Cancelled tasks are discarded during the pass without disturbing the
    /// remaining tasks. A task that cancels its own handle while running is
    /// discarded before the next pass.
    pub fn tick(&mut self, now: f64) {
        self.tasks.retain_mut(|slot| {
            if slot.cancelled.get() {
                return false;
            }
            (slot.run)(now);
            !slot.cancelled.get()
        });
    }

    /// Number of tasks still registered (cancelled tasks count until swept).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
