//! Timetabling domain models.
//!
//! Provides the input entities supplied by the host application and the
//! output records produced by a scheduling run.
//!
//! # Entity Roles
//!
//! | Type | Role | Notes |
//! |------|------|-------|
//! | `Faculty` | input | Availability parsed once into a key set |
//! | `Room` | input | Capacity bounds course size |
//! | `Course` | input | Owned by exactly one faculty member |
//! | `TimeSlot` | input | Weekday × hour teaching period |
//! | `ScheduledClass` | output | Course → (slot, room) |
//! | `Unschedulable` | output | Course + reason code |

mod course;
mod faculty;
mod room;
mod schedule;
mod timeslot;

pub use course::{Course, CourseId, DEFAULT_COURSE_SIZE};
pub use faculty::{Availability, Faculty, FacultyId};
pub use room::{Room, RoomId};
pub use schedule::{ReasonCode, ScheduleResult, ScheduledClass, Unschedulable};
pub use timeslot::{ParseWeekdayError, SlotId, TimeSlot, Weekday, FIRST_HOUR, LAST_HOUR};
