use std::fmt;

use serde::Serialize;

use super::{Dataset, Trial, ValueRange};

/// Per-trial overview used by listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    /// Trial identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Number of samples
    pub samples: usize,
    /// Time span in seconds
    pub time_range: ValueRange,
    /// Pressure span in kPa
    pub pressure_range: ValueRange,
    /// Temperature span in degrees Celsius, when recorded
    pub temperature_range: Option<ValueRange>,
}

impl Trial {
    /// Summarize the trial
    pub fn summary(&self) -> TrialSummary {
        TrialSummary {
            id: self.id().to_string(),
            label: self.label(),
            samples: self.len(),
            time_range: self.time_range(),
            pressure_range: self.pressure_range(),
            temperature_range: self.temperature_range(),
        }
    }
}

impl Dataset {
    /// Summaries of every trial, in dataset order
    pub fn summaries(&self) -> Vec<TrialSummary> {
        self.iter().map(Trial::summary).collect()
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>6} samples  t: {:.2} to {:.2} s  P: {:.3} to {:.3} kPa",
            self.id,
            self.samples,
            self.time_range.min,
            self.time_range.max,
            self.pressure_range.min,
            self.pressure_range.max
        )
    }
}
