//! Faculty model.
//!
//! A faculty member teaches courses and may restrict when they are
//! available. Availability is stored upstream as a comma-separated list
//! of slot keys (`"Mon-9, Mon-10"`); it is parsed once here into a set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Faculty identifier.
pub type FacultyId = u32;

/// Set of slot keys a faculty member can teach in.
///
/// An empty set means no availability was recorded. Whether that means
/// "any slot" or "no slot" is decided by
/// [`SchedulerOptions::allow_unconstrained_faculty`](crate::scheduler::SchedulerOptions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(BTreeSet<String>);

impl Availability {
    /// Creates an empty availability (nothing recorded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated key list.
    ///
    /// Tokens are trimmed and empty tokens dropped. Matching against
    /// slot keys is case-sensitive.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Whether nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is allowed.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Iterates keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Availability {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A faculty member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: FacultyId,
    /// Display name.
    pub name: String,
    /// Allowed slot keys.
    #[serde(default)]
    pub availability: Availability,
}

impl Faculty {
    /// Creates a faculty member with no recorded availability.
    pub fn new(id: FacultyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            availability: Availability::new(),
        }
    }

    /// Sets availability from a comma-separated key list.
    pub fn with_availability(mut self, raw: &str) -> Self {
        self.availability = Availability::parse(raw);
        self
    }

    /// Sets availability from already-parsed keys.
    pub fn with_slots<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.availability = keys.into_iter().collect();
        self
    }
}
