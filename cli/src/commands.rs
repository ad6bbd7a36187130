//! Command implementations

use std::path::Path;
use std::time::Duration;

use tickdown_core::{
    Clock, Counter, ManualClock, ScheduleDefinition, SemiAutoCounter, SemiAutoCounterHub,
    SimpleCounter, SimpleCounterQueue, SystemClock, TickScheduler, load_schedules_from_dir,
    load_schedules_from_file,
};

/// Drive one schedule from `path` through a real-time tick loop until it
/// finishes.
pub async fn run(path: &Path, schedule_id: Option<&str>, rate_hz: f64) -> Result<(), String> {
    if rate_hz <= 0.0 {
        return Err(format!("tick rate must be positive, got {rate_hz}"));
    }

    let definitions = load_schedules_from_file(path).map_err(|e| e.to_string())?;
    let definition = match schedule_id {
        Some(id) => definitions
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| format!("no schedule with id `{}` in {}", id, path.display()))?,
        None => definitions
            .first()
            .ok_or_else(|| format!("no schedules in {}", path.display()))?,
    };

    tracing::info!(
        id = %definition.id,
        name = %definition.name,
        stages = definition.stages.len(),
        "running schedule"
    );

    let clock = SystemClock::new();
    let mut scheduler = TickScheduler::new();

    let stage_count = definition.stages.len();
    let queue = SimpleCounterQueue::from_definition(&mut scheduler, clock.now(), definition)
        .map_err(|e| e.to_string())?
        .on_stage_completed(move |stage| {
            tracing::info!(stage, of = stage_count, "stage completed");
        });
    queue.play(clock.now(), 0).map_err(|e| e.to_string())?;

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / rate_hz));
    while !queue.is_stopped() {
        ticker.tick().await;
        scheduler.tick(clock.now());
    }

    tracing::info!("schedule finished");
    Ok(())
}

/// Load definitions from a file or directory and report what they contain.
pub fn validate(path: &Path) -> Result<(), String> {
    let definitions = if path.is_dir() {
        load_schedules_from_dir(path)
    } else {
        load_schedules_from_file(path)
    }
    .map_err(|e| e.to_string())?;

    for definition in &definitions {
        print_definition(definition);
    }
    println!("{} schedule(s) OK", definitions.len());
    Ok(())
}

fn print_definition(definition: &ScheduleDefinition) {
    let total: f64 = definition.stages.iter().sum();
    println!(
        "{} ({}): {} stages, {:.1}s total",
        definition.id,
        definition.name,
        definition.stages.len(),
        total
    );
}

/// Deterministic walkthrough of the counter family on a manual clock.
pub fn demo() -> Result<(), String> {
    let mut clock = ManualClock::new();
    let mut scheduler = TickScheduler::new();

    // Poll-only counter.
    let simple = SimpleCounter::new(clock.now(), 2.0);

    // A hub fanning one tick out to a small population.
    let mut hub = SemiAutoCounterHub::new();
    for i in 0..3 {
        let limit = 1.0 + i as f64;
        hub.add_counter(
            SemiAutoCounter::new(clock.now(), limit)
                .on_complete(move || println!("  hub counter with limit {limit:.0}s completed"))
                .into_shared(),
        );
    }

    // A staged queue on the scheduler.
    let queue = SimpleCounterQueue::new(&mut scheduler, clock.now(), vec![1.0, 2.0])
        .map_err(|e| e.to_string())?
        .on_stage_completed(|stage| println!("  queue stage {stage} completed"));
    queue.play(clock.now(), 0).map_err(|e| e.to_string())?;

    println!("stepping the clock in 0.5s increments:");
    for _ in 0..8 {
        clock.advance_by(0.5);
        let now = clock.now();
        println!(
            "t = {now:.1}s  simple interpolant {:.2}  queue stage {}",
            simple.interpolant(now),
            queue.cur_stage()
        );
        hub.update(now);
        scheduler.tick(now);
    }

    println!(
        "simple counter completed: {}",
        simple.completed(clock.now())
    );
    println!("queue stopped: {}", queue.is_stopped());
    Ok(())
}
