//! Input validation for timetabling runs.
//!
//! Checks structural integrity of faculty, rooms, courses, and time slots
//! before scheduling. Detects:
//! - Duplicate IDs, course codes, and slot keys
//! - Courses referencing unknown faculty
//! - Empty room or time slot inventories
//! - Non-positive course sizes and room capacities
//! - Slots outside the teaching day
//!
//! Every problem is collected so the host can report them all at once.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Course, Faculty, Room, TimeSlot, FIRST_HOUR, LAST_HOUR};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same type share an ID.
    DuplicateId,
    /// Two courses share a code.
    DuplicateCode,
    /// Two time slots share a `weekday-hour` key.
    DuplicateSlotKey,
    /// A course references a faculty member that doesn't exist.
    UnknownFaculty,
    /// No time slots were supplied.
    NoTimeSlots,
    /// No rooms were supplied.
    NoRooms,
    /// A course has `size <= 0`.
    InvalidCourseSize,
    /// A room has `capacity < 1`.
    InvalidRoomCapacity,
    /// A slot hour lies outside the teaching day.
    InvalidTeachingHour,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling run.
///
/// Checks:
/// 1. At least one time slot and one room
/// 2. No duplicate faculty, room, course, or slot IDs
/// 3. No duplicate course codes or slot keys
/// 4. All courses reference an existing faculty member
/// 5. Course sizes are positive and room capacities at least 1
/// 6. Slot hours lie within `FIRST_HOUR..=LAST_HOUR`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    rooms: &[Room],
    timeslots: &[TimeSlot],
    faculties: &[Faculty],
) -> ValidationResult {
    let mut errors = Vec::new();

    if timeslots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTimeSlots,
            "No time slots supplied",
        ));
    }
    if rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRooms,
            "No rooms supplied",
        ));
    }

    let mut faculty_ids = HashSet::new();
    for f in faculties {
        if !faculty_ids.insert(f.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for r in rooms {
        if !room_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.capacity < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoomCapacity,
                format!("Room '{}' has capacity {} (must be >= 1)", r.name, r.capacity),
            ));
        }
    }

    let mut slot_ids = HashSet::new();
    let mut slot_keys = HashSet::new();
    for s in timeslots {
        if !slot_ids.insert(s.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate time slot ID: {}", s.id),
            ));
        }
        let key = s.key();
        if !s.is_teaching_hour() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeachingHour,
                format!("Time slot '{key}' is outside {FIRST_HOUR}..={LAST_HOUR}"),
            ));
        }
        if !slot_keys.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlotKey,
                format!("Duplicate time slot key: {}", s.key()),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    let mut course_codes = HashSet::new();
    for c in courses {
        if !course_ids.insert(c.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
        if !course_codes.insert(c.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate course code: {}", c.code),
            ));
        }
        if !faculty_ids.contains(&c.faculty_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFaculty,
                format!(
                    "Course '{}' references unknown faculty {}",
                    c.code, c.faculty_id
                ),
            ));
        }
        if c.size <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCourseSize,
                format!("Course '{}' has size {} (must be > 0)", c.code, c.size),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
