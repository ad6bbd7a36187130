//! Counter hub
//!
//! Owns a dynamic collection of shared [`SemiAutoCounter`] instances and
//! forwards a single external tick to all of them, amortizing the per-tick
//! host hook across the whole population.

use std::rc::Rc;

use super::SharedCounter;

/// Fan-out of one `update`/`fixed_update` call to many counters.
///
/// Membership only: counters are created and kept alive by callers; the hub
/// holds shared handles. No deduplication: a counter added twice is updated
/// twice per tick.
#[derive(Default)]
pub struct SemiAutoCounterHub {
    counters: Vec<SharedCounter>,
}

impl SemiAutoCounterHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub pre-populated with counters, in order.
    pub fn with_counters(counters: impl IntoIterator<Item = SharedCounter>) -> Self {
        Self {
            counters: counters.into_iter().collect(),
        }
    }

    /// Forward an update tick to every member, in insertion order.
    pub fn update(&mut self, now: f64) {
        for i in 0..self.counters.len() {
            self.counters[i].borrow_mut().update(now);
        }
    }

    /// Forward a physics-phase tick to every member, in insertion order.
    pub fn fixed_update(&mut self, now: f64) {
        for i in 0..self.counters.len() {
            self.counters[i].borrow_mut().fixed_update(now);
        }
    }

    /// Add a counter at the end of the pass order.
    pub fn add_counter(&mut self, counter: SharedCounter) {
        self.counters.push(counter);
    }

    /// Remove the first occurrence of `counter`, by identity. Returns whether
    /// a member was removed.
    pub fn remove_counter(&mut self, counter: &SharedCounter) -> bool {
        match self.counters.iter().position(|c| Rc::ptr_eq(c, counter)) {
            Some(index) => {
                self.counters.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
