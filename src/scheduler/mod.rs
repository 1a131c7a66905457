//! Timetable construction engine.
//!
//! # Components
//!
//! - **`ConstraintIndex` / `ConflictTracker`**: lookup structures built once
//!   per run, and the run-local used-pair sets.
//! - **`TimetableScheduler`**: greedy placement in size order with bounded
//!   backtracking. Deterministic for identical inputs.
//! - **`ScheduleReport`**: placement summary and utilization.
//!
//! # Concurrency
//! A run is synchronous and CPU-bound. Runs share nothing, but the host
//! must not let two runs for the same planning period commit concurrently;
//! see [`GenerationGate`](crate::gate::GenerationGate).

mod index;
mod options;
mod report;
mod solver;

pub use index::{ConflictTracker, ConstraintIndex};
pub use options::SchedulerOptions;
pub use report::{ScheduleReport, UnschedulableEntry, Utilization, UtilizationReport};
pub use solver::{ScheduleRequest, TimetableScheduler};

use crate::error::Result;
use crate::models::{Course, Faculty, Room, ScheduleResult, TimeSlot};

/// Runs the scheduler once with the given options.
///
/// Shorthand for `TimetableScheduler::new().with_options(options).schedule(..)`.
pub fn run(
    courses: &[Course],
    rooms: &[Room],
    timeslots: &[TimeSlot],
    faculties: &[Faculty],
    options: SchedulerOptions,
) -> Result<ScheduleResult> {
    TimetableScheduler::new()
        .with_options(options)
        .schedule(courses, rooms, timeslots, faculties)
}
