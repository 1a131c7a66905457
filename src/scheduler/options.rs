//! Scheduler configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Tunables for a scheduling run.
///
/// Missing fields take their defaults when deserialized, so an empty
/// JSON object `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerOptions {
    /// Maximum placements undone per blocked course (default: 1).
    /// Zero disables backtracking.
    pub backtrack_depth: usize,
    /// Whether a faculty member with no recorded availability may teach
    /// in any slot (default: true). When false, such faculty get no slots.
    pub allow_unconstrained_faculty: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            backtrack_depth: 1,
            allow_unconstrained_faculty: true,
        }
    }
}

impl SchedulerOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backtracking bound.
    pub fn with_backtrack_depth(mut self, depth: usize) -> Self {
        self.backtrack_depth = depth;
        self
    }

    /// Sets the empty-availability policy.
    pub fn with_unconstrained_faculty(mut self, allow: bool) -> Self {
        self.allow_unconstrained_faculty = allow;
        self
    }

    /// Parses options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
