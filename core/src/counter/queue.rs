//! Staged counter queue
//!
//! Drives one [`SimpleCounter`] through an ordered sequence of stage limits
//! via a scheduler-registered repeating task. Each time the current stage's
//! deadline passes, the queue emits a stage-completed callback and re-arms
//! the counter with the next stage's limit.
//!
//! At most one stage advances per tick, even when several deadlines passed
//! since the last tick; backlog is not collapsed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::schedule::ScheduleDefinition;
use crate::scheduler::{TaskHandle, TickScheduler};

use super::{Counter, QueueError, SimpleCounter};

type StageCallback = Box<dyn FnMut(usize)>;

struct QueueState {
    stages: Vec<f64>,
    /// Current stage index; `stages.len()` denotes stopped/finished.
    cur_stage: usize,
    counter: SimpleCounter,
    on_stage_completed: Option<StageCallback>,
}

impl QueueState {
    fn stopped(&self) -> bool {
        self.cur_stage == self.stages.len()
    }

    fn tick(&mut self, now: f64) {
        if self.stopped() || !self.counter.completed(now) {
            return;
        }

        let stage = self.cur_stage;
        tracing::debug!(stage, "stage completed");
        if let Some(callback) = self.on_stage_completed.as_mut() {
            callback(stage);
        }

        self.cur_stage += 1;
        if !self.stopped() {
            self.counter.recount(now, Some(self.stages[self.cur_stage]));
        }
    }
}

/// Staged sequencing over one internal counter.
///
/// Constructs in the stopped state; [`play`](Self::play) arms a stage. The
/// repeating task is cancelled when the queue is dropped.
pub struct SimpleCounterQueue {
    state: Rc<RefCell<QueueState>>,
    task: TaskHandle,
}

impl SimpleCounterQueue {
    /// Create a queue over `stages` and register its polling task.
    ///
    /// Fails fast on an empty sequence or a non-positive stage limit.
    pub fn new(
        scheduler: &mut TickScheduler,
        now: f64,
        stages: Vec<f64>,
    ) -> Result<Self, QueueError> {
        if stages.is_empty() {
            return Err(QueueError::EmptyStages);
        }
        if let Some((stage, &limit)) = stages.iter().enumerate().find(|&(_, &s)| s <= 0.0) {
            return Err(QueueError::NonPositiveStage { stage, limit });
        }

        let cur_stage = stages.len();
        let state = Rc::new(RefCell::new(QueueState {
            counter: SimpleCounter::new(now, stages[0]),
            cur_stage,
            stages,
            on_stage_completed: None,
        }));

        let polled = Rc::clone(&state);
        let task = scheduler.register(move |now| polled.borrow_mut().tick(now));

        Ok(Self { state, task })
    }

    /// Create a queue from a loaded schedule definition.
    pub fn from_definition(
        scheduler: &mut TickScheduler,
        now: f64,
        definition: &ScheduleDefinition,
    ) -> Result<Self, QueueError> {
        Self::new(scheduler, now, definition.stages.clone())
    }

    /// Set the stage-completed callback. Single slot; receives the index of
    /// the stage that just finished.
    ///
    /// The callback runs from inside the polling task and must not call back
    /// into this queue.
    pub fn on_stage_completed(self, callback: impl FnMut(usize) + 'static) -> Self {
        self.state.borrow_mut().on_stage_completed = Some(Box::new(callback));
        self
    }

    /// Arm stage `stage` and restart the internal counter. Passing
    /// `stage == stage_count()` enters the stopped state without arming a
    /// timer; anything beyond that is an error.
    pub fn play(&self, now: f64, stage: usize) -> Result<(), QueueError> {
        let mut state = self.state.borrow_mut();
        let len = state.stages.len();
        if stage > len {
            return Err(QueueError::StageOutOfRange { stage, len });
        }

        state.cur_stage = stage;
        if stage < len {
            let limit = state.stages[stage];
            state.counter.recount(now, Some(limit));
        }
        Ok(())
    }

    /// Halt further advancement; the polling task becomes a no-op.
    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.cur_stage = state.stages.len();
    }

    /// Current stage index; equals [`stage_count`](Self::stage_count) when
    /// stopped.
    pub fn cur_stage(&self) -> usize {
        self.state.borrow().cur_stage
    }

    pub fn stage_count(&self) -> usize {
        self.state.borrow().stages.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.state.borrow().stopped()
    }

    /// Clamped progress ratio of the internal counter through the current
    /// stage. Meaningful only while playing.
    pub fn stage_interpolant(&self, now: f64) -> f64 {
        self.state.borrow().counter.interpolant(now)
    }
}

impl Drop for SimpleCounterQueue {
    fn drop(&mut self) {
        tracing::debug!("counter queue dropped, cancelling its polling task");
        self.task.cancel();
    }
}
