//! Greedy timetable solver with bounded backtracking.
//!
//! # Algorithm
//!
//! 1. Order courses by size (descending), then code (ascending).
//! 2. For each course, walk its allowed slots in scheduling order,
//!    skipping slots where its faculty member already teaches.
//! 3. In each slot, take the smallest free room that seats the course.
//! 4. If nothing fits, undo the most recent placement that shares a
//!    slot or room with the blocked course, place the blocked course,
//!    and re-place the undone one. A failed swap is reverted. At most
//!    `backtrack_depth` undos are tried per blocked course.
//! 5. A course still blocked is reported with a reason code. Slots its own
//!    faculty member already teaches in count as unavailable; the conflict
//!    is only "unresolved" if the depth budget ran out first.
//!
//! Each course moves `Pending → Placed` or `Pending → Unschedulable`
//! exactly once. A placed course displaced by backtracking is either
//! relocated or restored, never returned to pending.
//!
//! # Complexity
//! O(c · s · r) for the greedy pass over c courses, s slots, r rooms;
//! backtracking adds at most `backtrack_depth` extra searches per
//! blocked course.

use serde::{Deserialize, Serialize};

use super::{ConflictTracker, ConstraintIndex, SchedulerOptions};
use crate::error::Result;
use crate::models::{
    Course, CourseId, Faculty, FacultyId, ReasonCode, Room, RoomId, ScheduleResult, ScheduledClass,
    SlotId, TimeSlot, Unschedulable,
};

/// Input container for a scheduling run.
///
/// Holds the entities loaded fresh by the host for one planning period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Courses to place.
    pub courses: Vec<Course>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Teaching periods.
    pub timeslots: Vec<TimeSlot>,
    /// Faculty referenced by the courses.
    pub faculties: Vec<Faculty>,
}

impl ScheduleRequest {
    /// Creates a new request.
    pub fn new(
        courses: Vec<Course>,
        rooms: Vec<Room>,
        timeslots: Vec<TimeSlot>,
        faculties: Vec<Faculty>,
    ) -> Self {
        Self {
            courses,
            rooms,
            timeslots,
            faculties,
        }
    }

    /// Replaces the time slots with the standard Mon..Fri × 9..=16 week.
    pub fn with_standard_week(mut self) -> Self {
        self.timeslots = TimeSlot::standard_week();
        self
    }

    /// Finds a course by ID.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Finds a room by ID.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Finds a time slot by ID.
    pub fn timeslot(&self, id: SlotId) -> Option<&TimeSlot> {
        self.timeslots.iter().find(|s| s.id == id)
    }

    /// Finds a faculty member by ID.
    pub fn faculty(&self, id: FacultyId) -> Option<&Faculty> {
        self.faculties.iter().find(|f| f.id == id)
    }
}

/// Timetable solver.
///
/// Stateless between runs: every call builds its own index and conflict
/// tracker, so one scheduler can be reused and shared freely.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Faculty, Room, TimeSlot, Weekday};
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let faculties = vec![Faculty::new(1, "Dr. Ada").with_availability("Mon-9,Mon-10")];
/// let rooms = vec![Room::new(1, "Room A", 30)];
/// let slots = vec![
///     TimeSlot::new(1, Weekday::Mon, 9),
///     TimeSlot::new(2, Weekday::Mon, 10),
/// ];
/// let courses = vec![
///     Course::new(1, "MATH101", 1).with_size(25),
///     Course::new(2, "PHYS205", 1).with_size(20),
/// ];
///
/// let result = TimetableScheduler::new()
///     .schedule(&courses, &rooms, &slots, &faculties)
///     .unwrap();
/// assert_eq!(result.placed_count(), 2);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    options: SchedulerOptions,
}

impl TimetableScheduler {
    /// Creates a scheduler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options.
    pub fn with_options(mut self, options: SchedulerOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Places courses into (slot, room) pairs.
    ///
    /// # Errors
    /// [`Error::Configuration`](crate::Error::Configuration) on malformed
    /// input. Courses that cannot be placed are reported in the result.
    pub fn schedule(
        &self,
        courses: &[Course],
        rooms: &[Room],
        timeslots: &[TimeSlot],
        faculties: &[Faculty],
    ) -> Result<ScheduleResult> {
        let index = ConstraintIndex::build(courses, rooms, timeslots, faculties, &self.options)?;

        tracing::info!(
            courses = courses.len(),
            rooms = rooms.len(),
            timeslots = timeslots.len(),
            faculties = faculties.len(),
            backtrack_depth = self.options.backtrack_depth,
            "starting timetable run"
        );

        let mut run = Run::new(&index, courses, self.options.backtrack_depth);
        run.solve();
        let result = run.into_result();

        tracing::info!(
            placed = result.placed_count(),
            unschedulable = result.unschedulable.len(),
            "timetable run finished"
        );
        Ok(result)
    }

    /// Schedules from a request.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<ScheduleResult> {
        self.schedule(
            &request.courses,
            &request.rooms,
            &request.timeslots,
            &request.faculties,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CourseState {
    Pending,
    Placed,
    Unschedulable(ReasonCode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backtrack {
    Relocated,
    Exhausted { faculty_conflict_left: bool },
}

#[derive(Debug, Clone, Copy)]
struct Placement<'a> {
    slot: &'a TimeSlot,
    room: &'a Room,
}

/// Draft state of one run. Dropped without effect if the run is abandoned.
struct Run<'a> {
    index: &'a ConstraintIndex<'a>,
    /// Courses in placement order; every other vector is indexed by
    /// position in this one.
    courses: Vec<&'a Course>,
    states: Vec<CourseState>,
    placements: Vec<Option<Placement<'a>>>,
    /// Positions of placed courses, oldest commit first.
    commit_log: Vec<usize>,
    tracker: ConflictTracker,
    unschedulable: Vec<Unschedulable>,
    backtrack_depth: usize,
}

impl<'a> Run<'a> {
    fn new(index: &'a ConstraintIndex<'a>, courses: &'a [Course], backtrack_depth: usize) -> Self {
        let mut ordered: Vec<&Course> = courses.iter().collect();
        ordered.sort_by(|a, b| a.placement_order(b));
        let n = ordered.len();
        Self {
            index,
            courses: ordered,
            states: vec![CourseState::Pending; n],
            placements: vec![None; n],
            commit_log: Vec::with_capacity(n),
            tracker: ConflictTracker::new(),
            unschedulable: Vec::new(),
            backtrack_depth,
        }
    }

    fn solve(&mut self) {
        for pos in 0..self.courses.len() {
            debug_assert_eq!(self.states[pos], CourseState::Pending);
            let course = self.courses[pos];

            if let Some(p) = self.find_placement(pos) {
                self.place(pos, p);
                self.settle(pos, CourseState::Placed);
                continue;
            }

            let mut budget_cut_faculty_conflict = false;
            if !self.index.fitting_rooms(course.size).is_empty() {
                match self.backtrack(pos) {
                    Backtrack::Relocated => {
                        self.settle(pos, CourseState::Placed);
                        continue;
                    }
                    Backtrack::Exhausted {
                        faculty_conflict_left,
                    } => budget_cut_faculty_conflict = faculty_conflict_left,
                }
            }

            let reason = self.diagnose(pos, budget_cut_faculty_conflict);
            tracing::warn!(
                course_id = course.id,
                code = %course.code,
                reason = %reason,
                "course is unschedulable"
            );
            self.settle(pos, CourseState::Unschedulable(reason));
            self.unschedulable.push(Unschedulable {
                course_id: course.id,
                reason,
            });
        }
    }

    fn settle(&mut self, pos: usize, state: CourseState) {
        debug_assert_eq!(self.states[pos], CourseState::Pending);
        self.states[pos] = state;
    }

    /// First free (slot, room) for the course, or `None`.
    fn find_placement(&self, pos: usize) -> Option<Placement<'a>> {
        let course = self.courses[pos];
        let rooms = self.index.fitting_rooms(course.size);
        self.index
            .allowed_slots(course.faculty_id)
            .filter(|slot| self.tracker.is_faculty_free(course.faculty_id, slot.id))
            .find_map(|slot| {
                rooms
                    .iter()
                    .find(|room| self.tracker.is_room_free(room.id, slot.id))
                    .map(|&room| Placement { slot, room })
            })
    }

    fn place(&mut self, pos: usize, p: Placement<'a>) {
        self.tracker
            .commit(self.courses[pos].faculty_id, p.room.id, p.slot.id);
        self.placements[pos] = Some(p);
        self.commit_log.push(pos);
        tracing::debug!(
            course_id = self.courses[pos].id,
            slot = %p.slot.key(),
            room_id = p.room.id,
            "placed course"
        );
    }

    /// Removes a placement; returns it with its commit-log position.
    fn unplace(&mut self, pos: usize) -> Option<(Placement<'a>, usize)> {
        let p = self.placements[pos].take()?;
        self.tracker
            .release(self.courses[pos].faculty_id, p.room.id, p.slot.id);
        let log_pos = self.commit_log.iter().position(|&c| c == pos)?;
        self.commit_log.remove(log_pos);
        Some((p, log_pos))
    }

    /// Puts a placement back where it was in the commit log.
    fn restore(&mut self, pos: usize, p: Placement<'a>, log_pos: usize) {
        self.tracker
            .commit(self.courses[pos].faculty_id, p.room.id, p.slot.id);
        self.placements[pos] = Some(p);
        self.commit_log.insert(log_pos, pos);
    }

    /// Most recent placement, not yet tried, that holds a slot the blocked
    /// course may use and either shares its faculty or sits in a room the
    /// blocked course fits.
    fn find_blocker(&self, blocked: usize, tried: &[usize]) -> Option<usize> {
        let course = self.courses[blocked];
        self.commit_log.iter().rev().copied().find(|&other| {
            if tried.contains(&other) {
                return false;
            }
            let Some(p) = self.placements[other] else {
                return false;
            };
            self.index.is_allowed(course.faculty_id, p.slot)
                && (self.courses[other].faculty_id == course.faculty_id
                    || p.room.fits(course.size))
        })
    }

    /// Whether an untried placement by the blocked course's faculty member
    /// holds a slot the blocked course may use.
    fn has_untried_faculty_blocker(&self, blocked: usize, tried: &[usize]) -> bool {
        let course = self.courses[blocked];
        self.commit_log.iter().any(|&other| {
            !tried.contains(&other)
                && self.courses[other].faculty_id == course.faculty_id
                && self.placements[other]
                    .is_some_and(|p| self.index.is_allowed(course.faculty_id, p.slot))
        })
    }

    fn backtrack(&mut self, blocked: usize) -> Backtrack {
        let mut tried = Vec::with_capacity(self.backtrack_depth);

        for attempt in 1..=self.backtrack_depth {
            let Some(victim) = self.find_blocker(blocked, &tried) else {
                break;
            };
            tried.push(victim);
            let Some((original, log_pos)) = self.unplace(victim) else {
                break;
            };

            tracing::debug!(
                attempt,
                blocked = self.courses[blocked].id,
                undone = self.courses[victim].id,
                "backtracking"
            );

            if let Some(p) = self.find_placement(blocked) {
                self.place(blocked, p);
                if let Some(moved) = self.find_placement(victim) {
                    self.place(victim, moved);
                    tracing::debug!(
                        course_id = self.courses[victim].id,
                        from = %original.slot.key(),
                        to = %moved.slot.key(),
                        "relocated course"
                    );
                    return Backtrack::Relocated;
                }
                self.unplace(blocked);
            }
            self.restore(victim, original, log_pos);
        }
        Backtrack::Exhausted {
            faculty_conflict_left: tried.len() == self.backtrack_depth
                && self.has_untried_faculty_blocker(blocked, &tried),
        }
    }

    /// Names the constraint that eliminated every candidate.
    ///
    /// Slots taken by the course's own faculty member count as unavailable.
    /// A faculty conflict is only reported as unresolved when backtracking
    /// ran out of depth with a same-faculty placement still untried.
    fn diagnose(&self, pos: usize, budget_cut_faculty_conflict: bool) -> ReasonCode {
        let course = self.courses[pos];
        if self.index.fitting_rooms(course.size).is_empty() {
            ReasonCode::NoRoomCapacity
        } else if budget_cut_faculty_conflict {
            ReasonCode::FacultyConflictUnresolved
        } else {
            ReasonCode::NoAvailableSlot
        }
    }

    fn into_result(self) -> ScheduleResult {
        let assignments = self
            .courses
            .iter()
            .zip(&self.placements)
            .filter_map(|(course, placement)| {
                placement.map(|p| ScheduledClass::new(course.id, p.slot.id, p.room.id))
            })
            .collect();
        ScheduleResult {
            assignments,
            unschedulable: self.unschedulable,
        }
    }
}
