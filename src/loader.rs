//! CSV import and export.
//!
//! Reads the four entity tables a host keeps for a planning period and
//! writes placed classes back out.
//!
//! # File Layout
//!
//! | File | Columns |
//! |------|---------|
//! | `faculty.csv` | `id,name,availability` (availability quoted, comma-separated keys) |
//! | `rooms.csv` | `id,name,capacity` |
//! | `courses.csv` | `id,code,title,faculty_id,size` (size may be empty → 30) |
//! | `timeslots.csv` | `id,weekday,hour` (optional file) |
//!
//! Availability strings are parsed into sets here, once, so the scheduler
//! never sees the raw delimited form.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{
    Course, CourseId, Faculty, FacultyId, Room, ScheduleResult, SlotId, TimeSlot, Weekday,
    DEFAULT_COURSE_SIZE,
};
use crate::scheduler::ScheduleRequest;

/// Faculty table file name.
pub const FACULTY_FILE: &str = "faculty.csv";
/// Room table file name.
pub const ROOMS_FILE: &str = "rooms.csv";
/// Course table file name.
pub const COURSES_FILE: &str = "courses.csv";
/// Time slot table file name (optional).
pub const TIMESLOTS_FILE: &str = "timeslots.csv";

#[derive(Debug, Deserialize)]
struct FacultyRecord {
    id: FacultyId,
    name: String,
    #[serde(default)]
    availability: String,
}

#[derive(Debug, Deserialize)]
struct CourseRecord {
    id: CourseId,
    code: String,
    title: String,
    faculty_id: FacultyId,
    size: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct TimeSlotRecord {
    id: SlotId,
    weekday: String,
    hour: u8,
}

#[derive(Debug, Serialize)]
struct AssignmentRow<'a> {
    course_code: &'a str,
    course_title: &'a str,
    weekday: Weekday,
    hour: u8,
    room: &'a str,
}

/// Maps a row-level CSV failure to the file and line it came from.
fn invalid_record(file: &str, line: u64, e: &csv::Error) -> Error {
    let message = match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => e.to_string(),
    };
    Error::InvalidRecord {
        file: file.to_string(),
        line,
        message,
    }
}

/// Deserializes every row, keeping its 1-based line number.
///
/// Rows that are short, long, or hold values of the wrong type fail with
/// [`Error::InvalidRecord`] naming `file` and the line.
fn read_records<R: Read, T: DeserializeOwned>(reader: R, file: &str) -> Result<Vec<(u64, T)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line());
            invalid_record(file, line, &e)
        })?;
        let line = row.position().map_or(0, |p| p.line());
        let record = row
            .deserialize(Some(&headers))
            .map_err(|e| invalid_record(file, line, &e))?;
        records.push((line, record));
    }
    Ok(records)
}

/// Reads faculty rows.
pub fn read_faculties<R: Read>(reader: R) -> Result<Vec<Faculty>> {
    Ok(read_records::<_, FacultyRecord>(reader, FACULTY_FILE)?
        .into_iter()
        .map(|(_, r)| Faculty::new(r.id, r.name).with_availability(&r.availability))
        .collect())
}

/// Reads room rows.
pub fn read_rooms<R: Read>(reader: R) -> Result<Vec<Room>> {
    Ok(read_records::<_, Room>(reader, ROOMS_FILE)?
        .into_iter()
        .map(|(_, r)| r)
        .collect())
}

/// Reads course rows. An empty `size` column means 30.
pub fn read_courses<R: Read>(reader: R) -> Result<Vec<Course>> {
    Ok(read_records::<_, CourseRecord>(reader, COURSES_FILE)?
        .into_iter()
        .map(|(_, r)| {
            Course::new(r.id, r.code, r.faculty_id)
                .with_title(r.title)
                .with_size(r.size.unwrap_or(DEFAULT_COURSE_SIZE))
        })
        .collect())
}

/// Reads time slot rows. Weekdays may be short (`Mon`) or full (`Monday`).
pub fn read_timeslots<R: Read>(reader: R) -> Result<Vec<TimeSlot>> {
    read_records::<_, TimeSlotRecord>(reader, TIMESLOTS_FILE)?
        .into_iter()
        .map(|(line, r)| {
            let weekday = r
                .weekday
                .parse::<Weekday>()
                .map_err(|e| Error::InvalidRecord {
                    file: TIMESLOTS_FILE.to_string(),
                    line,
                    message: e.to_string(),
                })?;
            Ok(TimeSlot::new(r.id, weekday, r.hour))
        })
        .collect()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ScheduleRequest {
    /// Loads a request from a directory of CSV tables.
    ///
    /// `timeslots.csv` is optional; without it the request has no slots
    /// and the caller is expected to supply them (e.g. via
    /// [`with_standard_week`](Self::with_standard_week)).
    pub fn from_csv_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let faculties = read_faculties(open(&dir.join(FACULTY_FILE))?)?;
        let rooms = read_rooms(open(&dir.join(ROOMS_FILE))?)?;
        let courses = read_courses(open(&dir.join(COURSES_FILE))?)?;

        let slots_path = dir.join(TIMESLOTS_FILE);
        let timeslots = if slots_path.exists() {
            read_timeslots(open(&slots_path)?)?
        } else {
            tracing::info!(dir = %dir.display(), "no timeslots.csv; request has no slots");
            Vec::new()
        };

        tracing::info!(
            dir = %dir.display(),
            faculties = faculties.len(),
            rooms = rooms.len(),
            courses = courses.len(),
            timeslots = timeslots.len(),
            "loaded scheduling tables"
        );
        Ok(Self::new(courses, rooms, timeslots, faculties))
    }
}

/// Writes placed classes as CSV, one row per assignment in result order.
///
/// Columns: `course_code,course_title,weekday,hour,room`. Assignments
/// whose course, slot, or room is missing from the request are skipped.
pub fn write_assignments_csv<W: Write>(
    writer: W,
    result: &ScheduleResult,
    request: &ScheduleRequest,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for a in &result.assignments {
        let (Some(course), Some(slot), Some(room)) = (
            request.course(a.course_id),
            request.timeslot(a.timeslot_id),
            request.room(a.room_id),
        ) else {
            tracing::warn!(course_id = a.course_id, "assignment references unknown entity");
            continue;
        };
        wtr.serialize(AssignmentRow {
            course_code: &course.code,
            course_title: &course.title,
            weekday: slot.weekday,
            hour: slot.hour,
            room: &room.name,
        })?;
    }
    wtr.flush().map_err(|e| Error::Csv(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduledClass;

    #[test]
    fn test_read_faculties() {
        let data = "id,name,availability\n1,Dr. Ada,\"Mon-9, Mon-10\"\n2,Dr. Bo,\n";
        let f = read_faculties(data.as_bytes()).unwrap();
        assert_eq!(f.len(), 2);
        assert!(f[0].availability.contains("Mon-10"));
        assert_eq!(f[0].availability.len(), 2);
        assert!(f[1].availability.is_empty());
    }

    #[test]
    fn test_read_rooms() {
        let data = "id,name,capacity\n1,Room A,30\n2,Room B, 60\n";
        let r = read_rooms(data.as_bytes()).unwrap();
        assert_eq!(r[1], Room::new(2, "Room B", 60));
    }

    #[test]
    fn test_read_courses_default_size() {
        let data = "id,code,title,faculty_id,size\n1,MATH101,Calculus,1,\n2,PHYS205,Physics,1,45\n";
        let c = read_courses(data.as_bytes()).unwrap();
        assert_eq!(c[0].size, 30);
        assert_eq!(c[1].size, 45);
        assert_eq!(c[1].title, "Physics");
    }

    #[test]
    fn test_read_timeslots() {
        let data = "id,weekday,hour\n1,Mon,9\n2,Tuesday,10\n";
        let s = read_timeslots(data.as_bytes()).unwrap();
        assert_eq!(s[1].key(), "Tue-10");
    }

    #[test]
    fn test_read_timeslots_bad_weekday() {
        let data = "id,weekday,hour\n1,Mon,9\n2,Sun,10\n";
        let err = read_timeslots(data.as_bytes()).unwrap_err();
        match err {
            Error::InvalidRecord { file, line, .. } => {
                assert_eq!(file, TIMESLOTS_FILE);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_rooms_bad_number() {
        let data = "id,name,capacity\n1,Room A,30\n2,Room B,lots\n";
        match read_rooms(data.as_bytes()).unwrap_err() {
            Error::InvalidRecord { file, line, message } => {
                assert_eq!(file, ROOMS_FILE);
                assert_eq!(line, 3);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_courses_short_row() {
        let data = "id,code,title,faculty_id,size\n1,MATH101,Calculus,1,30\n2,PHYS205\n";
        let err = read_courses(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRecord { ref file, line: 3, .. } if file == COURSES_FILE
        ));
    }

    #[test]
    fn test_read_faculties_bad_id() {
        let data = "id,name,availability\nx,Dr. Ada,Mon-9\n";
        let err = read_faculties(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRecord { ref file, line: 2, .. } if file == FACULTY_FILE
        ));
    }

    #[test]
    fn test_write_assignments() {
        let request = ScheduleRequest::new(
            vec![Course::new(1, "MATH101", 1).with_title("Calculus")],
            vec![Room::new(1, "Room A", 30)],
            vec![TimeSlot::new(1, Weekday::Mon, 9)],
            vec![Faculty::new(1, "Ada")],
        );
        let result = ScheduleResult {
            assignments: vec![ScheduledClass::new(1, 1, 1), ScheduledClass::new(9, 1, 1)],
            unschedulable: Vec::new(),
        };
        let mut out = Vec::new();
        write_assignments_csv(&mut out, &result, &request).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "course_code,course_title,weekday,hour,room\nMATH101,Calculus,Mon,9,Room A\n"
        );
    }

    #[test]
    fn test_missing_dir() {
        let err = ScheduleRequest::from_csv_dir("/nonexistent/tables").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
