use std::path::PathBuf;

use crate::xlsx::XlsxError;

/// Errors that can occur while building a [`Dataset`](super::Dataset).
///
/// All of them are fatal at startup: no partial dataset is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// The workbook file does not exist
    #[error("Workbook not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Error reading the workbook package
    #[error("Workbook error: {0}")]
    WorkbookError(#[from] XlsxError),

    /// The expected sheet is not in the workbook
    #[error("Could not find a sheet named '{name}' in the workbook (available: {available:?})")]
    MissingSheet {
        /// Sheet name the layout asked for
        name: String,
        /// Sheet names present in the workbook
        available: Vec<String>,
    },

    /// A trial was built without any sample
    #[error("Trial '{0}' has no samples")]
    EmptyTrial(String),

    /// Sample times go backwards inside a trial
    #[error("Trial '{trial}': time {time} at sample {index} precedes {previous}")]
    TimeOrder {
        /// Trial identifier
        trial: String,
        /// Zero-based sample position
        index: usize,
        /// Time of the preceding sample
        previous: f64,
        /// Offending time value
        time: f64,
    },

    /// Two trials resolved to the same identifier
    #[error("Duplicate trial identifier: {0}")]
    DuplicateTrial(String),

    /// The sheet yielded no trial at all
    #[error("No trial data found in sheet '{0}'")]
    NoTrials(String),

    /// The sheet yielded a different number of trials than the layout expects
    #[error("Expected {expected} trials, found {found}")]
    TrialCount {
        /// Trials required by the layout
        expected: usize,
        /// Trials actually extracted
        found: usize,
    },
}

