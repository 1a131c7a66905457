//! Feasibility diagnostics for a completed run.
//!
//! Summarizes a [`ScheduleResult`] for operators: how many courses were
//! placed, which were not and why, and optionally how loaded each faculty
//! member and room is.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | placed / total courses |
//! | Faculty utilization | teaching slots / total slots |
//! | Room utilization | booked slots / total slots |
//!
//! Pure over its inputs; computing a report never changes the result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ScheduleRequest;
use crate::models::{CourseId, FacultyId, ReasonCode, RoomId, ScheduleResult};

/// Assigned slots out of the slots in the planning period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utilization {
    /// Slots with a class.
    pub assigned: usize,
    /// Slots in the planning period.
    pub total: usize,
}

impl Utilization {
    /// Fraction of slots used (0.0 when there are no slots).
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.assigned as f64 / self.total as f64
        }
    }
}

/// Per-faculty and per-room load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// Slots in the planning period.
    pub total_slots: usize,
    /// Load per faculty member, including idle ones.
    pub by_faculty: BTreeMap<FacultyId, Utilization>,
    /// Load per room, including empty ones.
    pub by_room: BTreeMap<RoomId, Utilization>,
}

/// An unplaced course with enough context to show an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnschedulableEntry {
    /// Unplaced course.
    pub course_id: CourseId,
    /// Its code, empty if the course is missing from the request.
    pub code: String,
    /// Why it was not placed.
    pub reason: ReasonCode,
}

/// Run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Courses in the request.
    pub total_courses: usize,
    /// Courses placed.
    pub placed: usize,
    /// Courses not placed, in result order.
    pub unschedulable: Vec<UnschedulableEntry>,
    /// Present when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<UtilizationReport>,
}

impl ScheduleReport {
    /// Summarizes a result against the request that produced it.
    ///
    /// # Arguments
    /// * `result` - Output of the scheduler.
    /// * `request` - The input entities (for codes, faculty, and slot counts).
    /// * `with_utilization` - Whether to compute per-faculty/per-room load.
    pub fn calculate(
        result: &ScheduleResult,
        request: &ScheduleRequest,
        with_utilization: bool,
    ) -> Self {
        let unschedulable = result
            .unschedulable
            .iter()
            .map(|u| UnschedulableEntry {
                course_id: u.course_id,
                code: request
                    .course(u.course_id)
                    .map(|c| c.code.clone())
                    .unwrap_or_default(),
                reason: u.reason,
            })
            .collect();

        let utilization = with_utilization.then(|| utilization(result, request));

        Self {
            total_courses: request.courses.len(),
            placed: result.placed_count(),
            unschedulable,
            utilization,
        }
    }

    /// Fraction of courses placed (1.0 when there are no courses).
    pub fn placement_rate(&self) -> f64 {
        if self.total_courses == 0 {
            1.0
        } else {
            self.placed as f64 / self.total_courses as f64
        }
    }

    /// Count of unplaced courses per reason.
    pub fn reason_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.unschedulable {
            *counts.entry(entry.reason.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

fn utilization(result: &ScheduleResult, request: &ScheduleRequest) -> UtilizationReport {
    let total = request.timeslots.len();
    let idle = Utilization { assigned: 0, total };

    let mut by_faculty: BTreeMap<FacultyId, Utilization> =
        request.faculties.iter().map(|f| (f.id, idle)).collect();
    let mut by_room: BTreeMap<RoomId, Utilization> =
        request.rooms.iter().map(|r| (r.id, idle)).collect();

    for a in &result.assignments {
        by_room.entry(a.room_id).or_insert(idle).assigned += 1;
        if let Some(course) = request.course(a.course_id) {
            by_faculty.entry(course.faculty_id).or_insert(idle).assigned += 1;
        }
    }

    UtilizationReport {
        total_slots: total,
        by_faculty,
        by_room,
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "placed {}/{} courses ({:.0}%)",
            self.placed,
            self.total_courses,
            self.placement_rate() * 100.0
        )?;
        for entry in &self.unschedulable {
            writeln!(f, "  unschedulable: {} ({})", entry.code, entry.reason)?;
        }
        if let Some(u) = &self.utilization {
            for (id, load) in &u.by_faculty {
                writeln!(f, "  faculty {id}: {}/{} slots", load.assigned, load.total)?;
            }
            for (id, load) in &u.by_room {
                writeln!(f, "  room {id}: {}/{} slots", load.assigned, load.total)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Faculty, Room, ScheduledClass, TimeSlot, Unschedulable, Weekday};

    fn sample_request() -> ScheduleRequest {
        ScheduleRequest::new(
            vec![
                Course::new(1, "MATH101", 1),
                Course::new(2, "PHYS205", 1),
                Course::new(3, "CHEM301", 2),
            ],
            vec![Room::new(1, "Room A", 30), Room::new(2, "Room B", 30)],
            vec![
                TimeSlot::new(1, Weekday::Mon, 9),
                TimeSlot::new(2, Weekday::Mon, 10),
                TimeSlot::new(3, Weekday::Tue, 9),
                TimeSlot::new(4, Weekday::Tue, 10),
            ],
            vec![Faculty::new(1, "Ada"), Faculty::new(2, "Bo"), Faculty::new(3, "Cy")],
        )
    }

    fn sample_result() -> ScheduleResult {
        ScheduleResult {
            assignments: vec![ScheduledClass::new(1, 1, 1), ScheduledClass::new(2, 2, 1)],
            unschedulable: vec![Unschedulable {
                course_id: 3,
                reason: ReasonCode::NoAvailableSlot,
            }],
        }
    }

    #[test]
    fn test_report_basic() {
        let report = ScheduleReport::calculate(&sample_result(), &sample_request(), false);
        assert_eq!(report.total_courses, 3);
        assert_eq!(report.placed, 2);
        assert_eq!(report.unschedulable[0].code, "CHEM301");
        assert!(report.utilization.is_none());
        assert!((report.placement_rate() - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(report.reason_counts()["NO_AVAILABLE_SLOT"], 1);
    }

    #[test]
    fn test_report_utilization() {
        let report = ScheduleReport::calculate(&sample_result(), &sample_request(), true);
        let u = report.utilization.unwrap();
        assert_eq!(u.total_slots, 4);
        assert_eq!(u.by_faculty[&1], Utilization { assigned: 2, total: 4 });
        assert_eq!(u.by_faculty[&2].assigned, 0);
        assert_eq!(u.by_faculty[&3].assigned, 0);
        assert!((u.by_room[&1].ratio() - 0.5).abs() < 1e-10);
        assert_eq!(u.by_room[&2].assigned, 0);
    }

    #[test]
    fn test_report_empty() {
        let report = ScheduleReport::calculate(
            &ScheduleResult::new(),
            &ScheduleRequest::default(),
            true,
        );
        assert_eq!(report.total_courses, 0);
        assert!((report.placement_rate() - 1.0).abs() < 1e-10);
        assert!((Utilization { assigned: 0, total: 0 }.ratio()).abs() < 1e-10);
    }

    #[test]
    fn test_report_display() {
        let report = ScheduleReport::calculate(&sample_result(), &sample_request(), false);
        let text = report.to_string();
        assert!(text.starts_with("placed 2/3 courses (67%)"));
        assert!(text.contains("CHEM301 (NO_AVAILABLE_SLOT)"));
    }

    #[test]
    fn test_report_does_not_mutate_result() {
        let result = sample_result();
        let before = result.clone();
        let _ = ScheduleReport::calculate(&result, &sample_request(), true);
        assert_eq!(result, before);
    }
}
