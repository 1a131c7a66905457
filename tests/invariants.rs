//! Randomized checks of the guarantees every scheduling result must hold.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_timetable::models::{Course, Faculty, Room, ScheduleResult, TimeSlot};
use u_timetable::scheduler::{ScheduleRequest, SchedulerOptions, TimetableScheduler};

fn random_request(rng: &mut StdRng) -> ScheduleRequest {
    let week = TimeSlot::standard_week();
    let mut timeslots: Vec<TimeSlot> = week
        .iter()
        .filter(|_| rng.random_bool(0.4))
        .cloned()
        .collect();
    if timeslots.is_empty() {
        timeslots.push(week[0].clone());
    }

    let rooms: Vec<Room> = (1..=rng.random_range(1..=4))
        .map(|id| Room::new(id, format!("R{id}"), rng.random_range(10..=80)))
        .collect();

    let faculties: Vec<Faculty> = (1..=rng.random_range(1..=5))
        .map(|id| {
            let mut keys: Vec<String> = timeslots
                .iter()
                .filter(|_| rng.random_bool(0.3))
                .map(|s| s.key())
                .collect();
            if rng.random_bool(0.1) {
                keys.push("Sat-9".to_string());
            }
            Faculty::new(id, format!("F{id}")).with_slots(keys)
        })
        .collect();

    let faculty_count = faculties.len() as u32;
    let courses: Vec<Course> = (1..=rng.random_range(0..=25))
        .map(|id| {
            Course::new(id, format!("C{id:03}"), rng.random_range(1..=faculty_count))
                .with_size(rng.random_range(5..=90))
        })
        .collect();

    ScheduleRequest::new(courses, rooms, timeslots, faculties)
}

fn assert_invariants(
    request: &ScheduleRequest,
    result: &ScheduleResult,
    options: &SchedulerOptions,
) {
    let courses: HashMap<u32, &Course> = request.courses.iter().map(|c| (c.id, c)).collect();

    let mut room_slots = HashSet::new();
    let mut faculty_slots = HashSet::new();
    for a in &result.assignments {
        let course = courses[&a.course_id];
        let room = request.room(a.room_id).expect("assigned room exists");
        let slot = request.timeslot(a.timeslot_id).expect("assigned slot exists");
        let faculty = request.faculty(course.faculty_id).expect("faculty exists");

        assert!(
            room_slots.insert((a.timeslot_id, a.room_id)),
            "room {} double-booked at {}",
            room.name,
            slot.key()
        );
        assert!(
            faculty_slots.insert((a.timeslot_id, course.faculty_id)),
            "faculty {} double-booked at {}",
            faculty.name,
            slot.key()
        );
        assert!(room.capacity >= course.size, "{} does not fit {}", course.code, room.name);
        if faculty.availability.is_empty() {
            assert!(options.allow_unconstrained_faculty);
        } else {
            assert!(faculty.availability.contains(&slot.key()));
        }
    }

    assert_eq!(result.course_count(), request.courses.len());
    let mut seen = HashSet::new();
    for id in result
        .assignments
        .iter()
        .map(|a| a.course_id)
        .chain(result.unschedulable.iter().map(|u| u.course_id))
    {
        assert!(courses.contains_key(&id));
        assert!(seen.insert(id), "course {id} reported twice");
    }
}

#[test]
fn test_random_instances_hold_invariants() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let request = random_request(&mut rng);
        let options = SchedulerOptions::new()
            .with_backtrack_depth(rng.random_range(0..=3))
            .with_unconstrained_faculty(rng.random_bool(0.7));

        let scheduler = TimetableScheduler::new().with_options(options.clone());
        let result = scheduler.schedule_request(&request).unwrap();
        assert_invariants(&request, &result, &options);

        let again = scheduler.schedule_request(&request).unwrap();
        assert_eq!(result, again, "seed {seed} is not deterministic");
    }
}

#[test]
fn test_input_order_does_not_matter() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(1_000 + seed);
        let request = random_request(&mut rng);
        let mut shuffled = request.clone();
        shuffled.courses.reverse();
        shuffled.rooms.reverse();
        shuffled.timeslots.reverse();
        shuffled.faculties.reverse();

        let scheduler = TimetableScheduler::new();
        assert_eq!(
            scheduler.schedule_request(&request).unwrap(),
            scheduler.schedule_request(&shuffled).unwrap()
        );
    }
}

#[test]
fn test_backtracking_depths_hold_invariants() {
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(5_000 + seed);
        let request = random_request(&mut rng);
        for depth in [0, 1, 5] {
            let options = SchedulerOptions::new().with_backtrack_depth(depth);
            let result = TimetableScheduler::new()
                .with_options(options.clone())
                .schedule_request(&request)
                .unwrap();
            assert_invariants(&request, &result, &options);
        }
    }
}
