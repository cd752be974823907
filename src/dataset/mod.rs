//! # Trial Dataset
//!
//! Extraction of the pressure/time trials from the raw-data workbook and the
//! immutable [`Dataset`] that holds them.
//!
//! The dataset is built once at startup. Every failure while building it is a
//! [`DataSourceError`] and aborts startup; a partially filled dataset is never
//! handed out.
//!
//! ## Sheet Layout
//!
//! ```text
//!        A          B               C             D               E
//! 2                 Level 25 C                    (carried)
//! 3                 Trial 1                       Trial 2
//! 4      Time (s)   Temperature (C) Pressure (kPa) Temperature (C) Pressure (kPa)
//! 5      0.0        25.1            101.3          25.0            101.2
//! 6      0.5        25.2            101.9          25.1            101.8
//! ```
//!
//! See [`SheetLayout`] for the row/column numbers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pressure_rise::dataset::extract;
//!
//! let dataset = extract("Data/Data.xlsx")?;
//! for trial in dataset.iter() {
//!     println!("{}: {} samples", trial.id(), trial.len());
//! }
//! # Ok::<(), pressure_rise::dataset::DataSourceError>(())
//! ```

mod error;
mod extract;
mod layout;
mod summary;
mod trial;


use std::collections::HashMap;

pub use error::DataSourceError;
pub use extract::{
    extract, extract_with_layout, extract_with_report, find_column_pairs, ColumnPair,
    ExtractionReport, RowClass, SkipReason,
};
pub use layout::{
    SheetLayout, DEFAULT_SHEET_NAME, EXPECTED_TRIALS, TEMPERATURE_LEVELS, TRIALS_PER_LEVEL,
};
pub use summary::TrialSummary;
pub use trial::{Sample, Trial, ValueRange};

/// Ordered, immutable collection of trials keyed by identifier
#[derive(Debug, Clone)]
pub struct Dataset {
    trials: Vec<Trial>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset, keeping the given order.
    ///
    /// Fails on an empty list or on duplicate identifiers.
    pub fn from_trials(trials: Vec<Trial>) -> Result<Self, DataSourceError> {
        if trials.is_empty() {
            return Err(DataSourceError::NoTrials(String::new()));
        }
        let mut index = HashMap::with_capacity(trials.len());
        for (i, trial) in trials.iter().enumerate() {
            if index.insert(trial.id().to_string(), i).is_some() {
                return Err(DataSourceError::DuplicateTrial(trial.id().to_string()));
            }
        }
        Ok(Self { trials, index })
    }

    /// Trial by identifier
    pub fn get(&self, id: &str) -> Option<&Trial> {
        self.index.get(id).map(|&i| &self.trials[i])
    }

    /// All trials in sheet order
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// Iterate over trials in sheet order
    pub fn iter(&self) -> std::slice::Iter<'_, Trial> {
        self.trials.iter()
    }

    /// Trial identifiers in sheet order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.trials.iter().map(Trial::id)
    }

    /// Number of trials
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Always false for a constructed dataset
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Total samples across all trials
    pub fn total_samples(&self) -> usize {
        self.trials.iter().map(Trial::len).sum()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Trial;
    type IntoIter = std::slice::Iter<'a, Trial>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}
