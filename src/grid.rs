//! Weekly timetable grid.
//!
//! Arranges placed classes into weekday rows and hour columns, each cell
//! listing `CODE (Room)` entries. Hosts render it however they like; the
//! `Display` impl gives a plain-text table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{ScheduleResult, Weekday};
use crate::scheduler::ScheduleRequest;

/// One class in a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEntry {
    /// Course code.
    pub course_code: String,
    /// Room name.
    pub room: String,
}

impl fmt::Display for GridEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.course_code, self.room)
    }
}

/// A weekday row; `cells[i]` holds the classes at `TimetableGrid::hours[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// Day of this row.
    pub weekday: Weekday,
    /// Classes per hour column.
    pub cells: Vec<Vec<GridEntry>>,
}

/// Weekday × hour view of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableGrid {
    /// Column hours, ascending.
    pub hours: Vec<u8>,
    /// Rows in weekday order.
    pub rows: Vec<GridRow>,
}

impl TimetableGrid {
    /// Builds the grid from a result and the request it came from.
    ///
    /// Rows and columns cover every weekday and hour present in the
    /// request's slots, so empty periods still show. Entries within a
    /// cell follow result order.
    pub fn build(result: &ScheduleResult, request: &ScheduleRequest) -> Self {
        let weekdays: BTreeSet<Weekday> = request.timeslots.iter().map(|s| s.weekday).collect();
        let hours: Vec<u8> = request
            .timeslots
            .iter()
            .map(|s| s.hour)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut rows: Vec<GridRow> = weekdays
            .into_iter()
            .map(|weekday| GridRow {
                weekday,
                cells: vec![Vec::new(); hours.len()],
            })
            .collect();

        for a in &result.assignments {
            let (Some(course), Some(slot), Some(room)) = (
                request.course(a.course_id),
                request.timeslot(a.timeslot_id),
                request.room(a.room_id),
            ) else {
                continue;
            };
            let (Some(row), Ok(col)) = (
                rows.iter_mut().find(|r| r.weekday == slot.weekday),
                hours.binary_search(&slot.hour),
            ) else {
                continue;
            };
            row.cells[col].push(GridEntry {
                course_code: course.code.clone(),
                room: room.name.clone(),
            });
        }

        Self { hours, rows }
    }

    /// Classes at a weekday and hour.
    pub fn cell(&self, weekday: Weekday, hour: u8) -> &[GridEntry] {
        let col = self.hours.binary_search(&hour);
        match (self.rows.iter().find(|r| r.weekday == weekday), col) {
            (Some(row), Ok(col)) => row.cells[col].as_slice(),
            _ => &[],
        }
    }
}

impl fmt::Display for TimetableGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10}", "Day")?;
        for hour in &self.hours {
            write!(f, " | {:<20}", format!("{hour}:00"))?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:<10}", row.weekday.full_name())?;
            for cell in &row.cells {
                let text = if cell.is_empty() {
                    "-".to_string()
                } else {
                    cell.iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                write!(f, " | {text:<20}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
