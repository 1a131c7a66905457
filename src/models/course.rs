//! Course model.
//!
//! A course is the unit being scheduled: one weekly class meeting taught
//! by a single faculty member to `size` students.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::FacultyId;

/// Course identifier.
pub type CourseId = u32;

/// Expected enrollment when none is recorded.
pub const DEFAULT_COURSE_SIZE: i32 = 30;

fn default_size() -> i32 {
    DEFAULT_COURSE_SIZE
}

/// A course to be placed in the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Unique course code (e.g. `"MATH101"`).
    pub code: String,
    /// Course title.
    pub title: String,
    /// Teaching faculty member.
    pub faculty_id: FacultyId,
    /// Expected enrollment (default: 30).
    #[serde(default = "default_size")]
    pub size: i32,
}

impl Course {
    /// Creates a course with the default size.
    pub fn new(id: CourseId, code: impl Into<String>, faculty_id: FacultyId) -> Self {
        Self {
            id,
            code: code.into(),
            title: String::new(),
            faculty_id,
            size: DEFAULT_COURSE_SIZE,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the expected enrollment.
    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Placement order: larger courses first, then code ascending.
    ///
    /// Large classes have the fewest fitting rooms, so placing them
    /// early avoids late dead-ends.
    pub fn placement_order(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| self.code.cmp(&other.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_defaults() {
        let c = Course::new(1, "MATH101", 7).with_title("Calculus I");
        assert_eq!(c.size, 30);
        assert_eq!(c.faculty_id, 7);
        assert_eq!(c.title, "Calculus I");
    }

    #[test]
    fn test_placement_order() {
        let mut courses = vec![
            Course::new(1, "B", 1).with_size(20),
            Course::new(2, "A", 1).with_size(20),
            Course::new(3, "C", 1).with_size(40),
        ];
        courses.sort_by(|a, b| a.placement_order(b));
        let codes: Vec<&str> = courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_size_defaults_when_missing() {
        let c: Course =
            serde_json::from_str(r#"{"id":1,"code":"X","title":"T","faculty_id":2}"#).unwrap();
        assert_eq!(c.size, DEFAULT_COURSE_SIZE);
    }
}
