//! Constraint model and conflict index.
//!
//! Built once per run from the raw entity lists:
//! - slots in scheduling order (Mon..Fri, then hour) with a key lookup
//! - rooms ascending by capacity, for tightest-fit allocation
//! - per-faculty allowed slot positions, resolved from availability keys
//!
//! `ConflictTracker` holds the only mutable state of a run: the
//! `(room, slot)` and `(faculty, slot)` pairs already committed.
//!
//! # Complexity
//! Build is O(s log s + r log r + f·a) for s slots, r rooms, and f faculty
//! with a availability keys each. Lookups are O(1) or a binary search.

use std::collections::{HashMap, HashSet};

use super::SchedulerOptions;
use crate::error::Result;
use crate::models::{Availability, Course, Faculty, FacultyId, Room, RoomId, SlotId, TimeSlot};
use crate::validation::validate_input;

/// Read-only lookup structures for one scheduling run.
#[derive(Debug)]
pub struct ConstraintIndex<'a> {
    slots: Vec<&'a TimeSlot>,
    slot_index: HashMap<String, usize>,
    rooms: Vec<&'a Room>,
    availability: HashMap<FacultyId, &'a Availability>,
    allowed: HashMap<FacultyId, Vec<usize>>,
}

impl<'a> ConstraintIndex<'a> {
    /// Validates the input and builds the index.
    ///
    /// # Errors
    /// [`Error::Configuration`](crate::Error::Configuration) if the input
    /// fails [`validate_input`].
    pub fn build(
        courses: &'a [Course],
        rooms: &'a [Room],
        timeslots: &'a [TimeSlot],
        faculties: &'a [Faculty],
        options: &SchedulerOptions,
    ) -> Result<Self> {
        validate_input(courses, rooms, timeslots, faculties)?;

        let mut slots: Vec<&TimeSlot> = timeslots.iter().collect();
        slots.sort_by(|a, b| a.schedule_order(b));
        let slot_index: HashMap<String, usize> = slots
            .iter()
            .enumerate()
            .map(|(pos, s)| (s.key(), pos))
            .collect();

        let mut sorted_rooms: Vec<&Room> = rooms.iter().collect();
        sorted_rooms.sort_by_key(|r| (r.capacity, r.id));

        let mut availability = HashMap::with_capacity(faculties.len());
        let mut allowed = HashMap::with_capacity(faculties.len());
        for faculty in faculties {
            availability.insert(faculty.id, &faculty.availability);
            let positions = if faculty.availability.is_empty() {
                if options.allow_unconstrained_faculty {
                    (0..slots.len()).collect()
                } else {
                    Vec::new()
                }
            } else {
                let mut positions: Vec<usize> = Vec::with_capacity(faculty.availability.len());
                for key in faculty.availability.iter() {
                    match slot_index.get(key) {
                        Some(&pos) => positions.push(pos),
                        None => tracing::warn!(
                            faculty_id = faculty.id,
                            key = %key,
                            "availability key matches no time slot"
                        ),
                    }
                }
                positions.sort_unstable();
                positions
            };
            allowed.insert(faculty.id, positions);
        }

        Ok(Self {
            slots,
            slot_index,
            rooms: sorted_rooms,
            availability,
            allowed,
        })
    }

    /// Recorded availability of a faculty member.
    pub fn faculty_availability(&self, faculty_id: FacultyId) -> Option<&'a Availability> {
        self.availability.get(&faculty_id).copied()
    }

    /// All slots in scheduling order.
    pub fn slots(&self) -> &[&'a TimeSlot] {
        &self.slots
    }

    /// Looks up a slot by key (`"Mon-9"`).
    pub fn slot(&self, key: &str) -> Option<&'a TimeSlot> {
        self.slot_index.get(key).map(|&pos| self.slots[pos])
    }

    /// Rooms ascending by capacity (ties by id).
    pub fn rooms_by_capacity(&self) -> &[&'a Room] {
        &self.rooms
    }

    /// Rooms that seat `size` students, smallest first.
    pub fn fitting_rooms(&self, size: i32) -> &[&'a Room] {
        let start = self.rooms.partition_point(|r| r.capacity < size);
        &self.rooms[start..]
    }

    /// Slots the faculty member may teach in, in scheduling order.
    ///
    /// Empty availability resolves to every slot or none, depending on
    /// `allow_unconstrained_faculty`. Unknown faculty get no slots.
    pub fn allowed_slots(&self, faculty_id: FacultyId) -> impl Iterator<Item = &'a TimeSlot> + '_ {
        self.allowed
            .get(&faculty_id)
            .into_iter()
            .flatten()
            .map(move |&pos| self.slots[pos])
    }

    /// Whether the slot is among the faculty member's allowed slots.
    pub fn is_allowed(&self, faculty_id: FacultyId, slot: &TimeSlot) -> bool {
        let Some(&pos) = self.slot_index.get(&slot.key()) else {
            return false;
        };
        self.allowed
            .get(&faculty_id)
            .is_some_and(|positions| positions.binary_search(&pos).is_ok())
    }
}

/// Committed `(room, slot)` and `(faculty, slot)` pairs.
///
/// Run-local; never share one tracker across concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct ConflictTracker {
    rooms_used: HashSet<(RoomId, SlotId)>,
    faculty_used: HashSet<(FacultyId, SlotId)>,
}

impl ConflictTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the room is unbooked in the slot.
    #[inline]
    pub fn is_room_free(&self, room_id: RoomId, slot_id: SlotId) -> bool {
        !self.rooms_used.contains(&(room_id, slot_id))
    }

    /// Whether the faculty member is not teaching in the slot.
    #[inline]
    pub fn is_faculty_free(&self, faculty_id: FacultyId, slot_id: SlotId) -> bool {
        !self.faculty_used.contains(&(faculty_id, slot_id))
    }

    /// Marks both pairs used.
    pub fn commit(&mut self, faculty_id: FacultyId, room_id: RoomId, slot_id: SlotId) {
        self.rooms_used.insert((room_id, slot_id));
        self.faculty_used.insert((faculty_id, slot_id));
    }

    /// Frees both pairs.
    pub fn release(&mut self, faculty_id: FacultyId, room_id: RoomId, slot_id: SlotId) {
        self.rooms_used.remove(&(room_id, slot_id));
        self.faculty_used.remove(&(faculty_id, slot_id));
    }

    /// Number of committed placements.
    pub fn len(&self) -> usize {
        self.rooms_used.len()
    }

    /// Whether nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.rooms_used.is_empty()
    }
}
