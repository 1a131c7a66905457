//! Time slot model.
//!
//! A time slot is a one-hour teaching period on a weekday. Slots are
//! identified externally by a string key `"weekday-hour"` (e.g. `"Mon-9"`),
//! which is what faculty availability refers to.
//!
//! # Ordering
//! Slots order by weekday (Mon < Tue < Wed < Thu < Fri), then hour,
//! then id. The solver visits candidate slots in this order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Time slot identifier.
pub type SlotId = u32;

/// First teaching hour of the day.
pub const FIRST_HOUR: u8 = 9;
/// Last teaching hour of the day (inclusive).
pub const LAST_HOUR: u8 = 16;

/// A teaching weekday.
///
/// Declaration order is the scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Mon,
    /// Tuesday
    Tue,
    /// Wednesday
    Wed,
    /// Thursday
    Thu,
    /// Friday
    Fri,
}

/// Error returned when a weekday name is not one of Mon..Fri.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday '{0}' (expected Mon, Tue, Wed, Thu or Fri)")]
pub struct ParseWeekdayError(pub String);

impl Weekday {
    /// All teaching weekdays in scheduling order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Short name used in slot keys (`"Mon"`).
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }

    /// Full English name (`"Monday"`).
    pub fn full_name(self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    /// Accepts short (`"Mon"`) or full (`"Monday"`) names, case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.short_name() == trimmed || d.full_name() == trimmed)
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

/// A one-hour teaching period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: SlotId,
    /// Teaching day.
    pub weekday: Weekday,
    /// Start hour (24h clock), expected within `FIRST_HOUR..=LAST_HOUR`.
    pub hour: u8,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(id: SlotId, weekday: Weekday, hour: u8) -> Self {
        Self { id, weekday, hour }
    }

    /// Slot key, `"weekday-hour"` (e.g. `"Tue-14"`).
    pub fn key(&self) -> String {
        format!("{}-{}", self.weekday, self.hour)
    }

    /// Whether the hour lies within the teaching day.
    #[inline]
    pub fn is_teaching_hour(&self) -> bool {
        (FIRST_HOUR..=LAST_HOUR).contains(&self.hour)
    }

    /// Scheduling order: weekday, then hour, then id.
    pub fn schedule_order(&self, other: &Self) -> Ordering {
        (self.weekday, self.hour, self.id).cmp(&(other.weekday, other.hour, other.id))
    }

    /// Full teaching week: Mon..Fri × 9..=16, ids starting at 1.
    ///
    /// Ids are assigned in scheduling order, so the returned vector is
    /// already sorted.
    pub fn standard_week() -> Vec<TimeSlot> {
        let hours_per_day = usize::from(LAST_HOUR - FIRST_HOUR + 1);
        let mut slots = Vec::with_capacity(Weekday::ALL.len() * hours_per_day);
        let mut id: SlotId = 1;
        for weekday in Weekday::ALL {
            for hour in FIRST_HOUR..=LAST_HOUR {
                slots.push(TimeSlot::new(id, weekday, hour));
                id += 1;
            }
        }
        slots
    }
}
