//! Course timetabling engine.
//!
//! Assigns courses to weekly time slots and rooms so that no room is
//! double-booked, no faculty member teaches two classes at once, every
//! class fits its room, and faculty availability is respected. Courses
//! that cannot be placed are reported with a reason instead of failing
//! the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Faculty`, `Room`, `Course`, `TimeSlot`,
//!   `ScheduledClass`, `ScheduleResult`
//! - **`validation`**: Input integrity checks (unknown faculty, empty
//!   inventories, duplicate IDs/codes/keys, invalid sizes)
//! - **`scheduler`**: Constraint index, greedy solver with bounded
//!   backtracking, run reports
//! - **`loader`**: CSV import of entity tables, CSV export of placements
//! - **`grid`**: Weekday × hour timetable view
//! - **`gate`**: At most one in-flight run per planning period
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Course, Faculty, Room, TimeSlot};
//! use u_timetable::scheduler::{run, SchedulerOptions};
//!
//! let faculties = vec![Faculty::new(1, "Dr. Ada").with_availability("Mon-9")];
//! let rooms = vec![Room::new(1, "Room A", 30)];
//! let courses = vec![Course::new(1, "MATH101", 1).with_size(25)];
//! let slots = TimeSlot::standard_week();
//!
//! let result = run(&courses, &rooms, &slots, &faculties, SchedulerOptions::default()).unwrap();
//! assert_eq!(result.assignments[0].timeslot_id, 1);
//! ```

pub mod error;
pub mod gate;
pub mod grid;
pub mod loader;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
