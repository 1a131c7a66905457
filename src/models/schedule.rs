//! Schedule (solution) model.
//!
//! A scheduling run produces one `ScheduledClass` per placed course and
//! one `Unschedulable` entry per course that could not be placed.
//! Infeasibility is part of the result, not an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CourseId, RoomId, SlotId};

/// A course placed in a time slot and room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledClass {
    /// Placed course.
    pub course_id: CourseId,
    /// Assigned time slot.
    pub timeslot_id: SlotId,
    /// Assigned room.
    pub room_id: RoomId,
}

/// Why a course could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// No slot remained: availability was empty/unmatched, or every
    /// candidate slot was already taken.
    NoAvailableSlot,
    /// No room is large enough for the course.
    NoRoomCapacity,
    /// A fitting room was free, but only in slots where the faculty
    /// member already teaches, and backtracking could not move them.
    FacultyConflictUnresolved,
}

impl ReasonCode {
    /// Wire code (`"NO_AVAILABLE_SLOT"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::NoAvailableSlot => "NO_AVAILABLE_SLOT",
            ReasonCode::NoRoomCapacity => "NO_ROOM_CAPACITY",
            ReasonCode::FacultyConflictUnresolved => "FACULTY_CONFLICT_UNRESOLVED",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course that could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unschedulable {
    /// Course left out of the timetable.
    pub course_id: CourseId,
    /// Reason code.
    pub reason: ReasonCode,
}

/// Outcome of one scheduling run.
///
/// `assignments` and `unschedulable` are both listed in course order
/// (size descending, code ascending), not in the order placements were
/// committed, so identical inputs always produce identical results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Placed courses.
    pub assignments: Vec<ScheduledClass>,
    /// Courses that could not be placed, with reasons.
    pub unschedulable: Vec<Unschedulable>,
}

impl ScheduledClass {
    /// Creates a new placement.
    pub fn new(course_id: CourseId, timeslot_id: SlotId, room_id: RoomId) -> Self {
        Self {
            course_id,
            timeslot_id,
            room_id,
        }
    }
}

impl ScheduleResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every course was placed.
    pub fn is_complete(&self) -> bool {
        self.unschedulable.is_empty()
    }

    /// Number of placed courses.
    pub fn placed_count(&self) -> usize {
        self.assignments.len()
    }

    /// Total courses accounted for.
    pub fn course_count(&self) -> usize {
        self.assignments.len() + self.unschedulable.len()
    }

    /// Finds the placement of a course.
    pub fn assignment_for_course(&self, course_id: CourseId) -> Option<&ScheduledClass> {
        self.assignments.iter().find(|a| a.course_id == course_id)
    }

    /// Finds the unschedulable reason for a course.
    pub fn reason_for_course(&self, course_id: CourseId) -> Option<ReasonCode> {
        self.unschedulable
            .iter()
            .find(|u| u.course_id == course_id)
            .map(|u| u.reason)
    }

    /// Returns all placements in a room.
    pub fn assignments_for_room(&self, room_id: RoomId) -> Vec<&ScheduledClass> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Returns all placements in a time slot.
    pub fn assignments_in_slot(&self, timeslot_id: SlotId) -> Vec<&ScheduledClass> {
        self.assignments
            .iter()
            .filter(|a| a.timeslot_id == timeslot_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScheduleResult {
        ScheduleResult {
            assignments: vec![
                ScheduledClass::new(1, 10, 100),
                ScheduledClass::new(2, 10, 101),
                ScheduledClass::new(3, 11, 100),
            ],
            unschedulable: vec![Unschedulable {
                course_id: 4,
                reason: ReasonCode::NoRoomCapacity,
            }],
        }
    }

    #[test]
    fn test_counts() {
        let r = sample_result();
        assert_eq!(r.placed_count(), 3);
        assert_eq!(r.course_count(), 4);
        assert!(!r.is_complete());
        assert!(ScheduleResult::new().is_complete());
    }

    #[test]
    fn test_lookups() {
        let r = sample_result();
        assert_eq!(r.assignment_for_course(3).unwrap().timeslot_id, 11);
        assert!(r.assignment_for_course(4).is_none());
        assert_eq!(r.reason_for_course(4), Some(ReasonCode::NoRoomCapacity));
        assert_eq!(r.reason_for_course(1), None);
        assert_eq!(r.assignments_for_room(100).len(), 2);
        assert_eq!(r.assignments_in_slot(10).len(), 2);
    }

    #[test]
    fn test_reason_code_wire_format() {
        let json = serde_json::to_string(&ReasonCode::FacultyConflictUnresolved).unwrap();
        assert_eq!(json, r#""FACULTY_CONFLICT_UNRESOLVED""#);
        assert_eq!(ReasonCode::NoAvailableSlot.to_string(), "NO_AVAILABLE_SLOT");
        let back: ReasonCode = serde_json::from_str(r#""NO_ROOM_CAPACITY""#).unwrap();
        assert_eq!(back, ReasonCode::NoRoomCapacity);
    }
}
