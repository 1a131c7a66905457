//! Crate error type.
//!
//! Per-course infeasibility is never an error; it is reported in
//! [`ScheduleResult::unschedulable`](crate::models::ScheduleResult).

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading input or starting a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input; the run was aborted before any placement.
    #[error("invalid scheduling input: {}", join_messages(.0))]
    Configuration(Vec<ValidationError>),

    /// A data file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV framing or header failure outside any single row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Options or request JSON could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row in a data file is malformed.
    #[error("{file}, line {line}: {message}")]
    InvalidRecord {
        /// File name, e.g. `rooms.csv`.
        file: String,
        /// 1-based line number, header included.
        line: u64,
        /// What was wrong with the row.
        message: String,
    },

    /// Another run for the same planning period has not finished.
    #[error("a timetable generation for period '{period}' is already in progress")]
    GenerationInProgress {
        /// Planning period key.
        period: String,
    },
}

impl Error {
    /// Validation errors behind a configuration failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Error::Configuration(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Configuration(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
