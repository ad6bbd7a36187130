pub mod clock;
pub mod counter;
pub mod schedule;
pub mod scheduler;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::{
    AutoCounter, Counter, QueueError, SemiAutoCounter, SemiAutoCounterHub, SharedCounter,
    SimpleCounter, SimpleCounterQueue,
};
pub use schedule::{
    ScheduleDefinition, ScheduleError, ScheduleLibrary, load_schedules_from_dir,
    load_schedules_from_file,
};
pub use scheduler::{TaskHandle, TickScheduler};
