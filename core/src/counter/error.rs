//! Error types for staged counter queues

use thiserror::Error;

/// Errors from [`SimpleCounterQueue`](super::SimpleCounterQueue) construction
/// and stage selection.
///
/// These are caller precondition violations, reported at the mutation
/// boundary rather than silently clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    #[error("stage queue requires at least one stage")]
    EmptyStages,

    #[error("stage limit {limit} at index {stage} is not positive")]
    NonPositiveStage { stage: usize, limit: f64 },

    #[error("stage {stage} is out of range for a queue of {len} stages")]
    StageOutOfRange { stage: usize, len: usize },
}
