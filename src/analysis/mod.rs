//! # Rise-Rate Calculator
//!
//! Linear-fit pressure rise rate over a closed time interval of one trial.
//!
//! Computations are pure: they read the immutable [`Dataset`] and allocate
//! their own result, so the same call always returns a bit-identical
//! [`FitResult`] and concurrent callers need no locking.
//!
//! ## Example
//!
//! ```rust
//! use pressure_rise::analysis::compute_rise_rate;
//! use pressure_rise::dataset::{Dataset, Sample, Trial};
//!
//! let samples = (0..5)
//!     .map(|i| Sample::new(i as f64, 10.0 + 2.0 * i as f64))
//!     .collect();
//! let trial = Trial::from_samples("T1", "R1", samples)?;
//! let dataset = Dataset::from_trials(vec![trial])?;
//!
//! let fit = compute_rise_rate(&dataset, "T1-R1", 1.0, 3.0)?;
//! assert_eq!(fit.n, 3);
//! assert_eq!(fit.slope, 2.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod fit;


use std::fmt;

use serde::Serialize;

use crate::dataset::{Dataset, Trial, ValueRange};

pub use error::{AnalysisError, InsufficientCause};
pub use fit::{least_squares, LinearFit};

/// A closed time interval on one trial
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Trial identifier
    pub trial_id: String,
    /// Lower bound, inclusive
    pub t_lo: f64,
    /// Upper bound, inclusive
    pub t_hi: f64,
}

impl Selection {
    /// Create a selection of `[t_lo, t_hi]` on `trial_id`
    pub fn new(trial_id: impl Into<String>, t_lo: f64, t_hi: f64) -> Self {
        Self {
            trial_id: trial_id.into(),
            t_lo,
            t_hi,
        }
    }

    /// True when `time` lies inside the interval, bounds included
    pub fn contains(&self, time: f64) -> bool {
        self.t_lo <= time && time <= self.t_hi
    }
}

/// Rise rate of one selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    /// Linear-fit slope in pressure units per time unit (kPa/s)
    pub slope: f64,
    /// Fitted pressure at time zero
    pub intercept: f64,
    /// Smallest and largest selected time
    pub time_range: ValueRange,
    /// Smallest and largest selected pressure
    pub pressure_range: ValueRange,
    /// Last minus first selected time
    pub delta_t: f64,
    /// Last minus first selected pressure
    pub delta_p: f64,
    /// Samples used for the fit
    pub n: usize,
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Points selected: {}", self.n)?;
        writeln!(
            f,
            "Time range: {:.2} to {:.2} s (Δt={:.2} s)",
            self.time_range.min, self.time_range.max, self.delta_t
        )?;
        writeln!(
            f,
            "Pressure range: {:.3} to {:.3} kPa (ΔP={:.3} kPa)",
            self.pressure_range.min, self.pressure_range.max, self.delta_p
        )?;
        write!(f, "Linear fit pressure rise rate: {:.5} kPa/s", self.slope)
    }
}

/// Compute the rise rate of `trial_id` over `[t_lo, t_hi]`
pub fn compute_rise_rate(
    dataset: &Dataset,
    trial_id: &str,
    t_lo: f64,
    t_hi: f64,
) -> Result<FitResult, AnalysisError> {
    let trial = dataset
        .get(trial_id)
        .ok_or_else(|| AnalysisError::NotFound(trial_id.to_string()))?;
    fit_trial(trial, t_lo, t_hi)
}

/// Compute the rise rate of one trial over `[t_lo, t_hi]`
pub fn fit_trial(trial: &Trial, t_lo: f64, t_hi: f64) -> Result<FitResult, AnalysisError> {
    let selected = trial.select(t_lo, t_hi);
    let insufficient = |cause| AnalysisError::InsufficientData {
        trial: trial.id().to_string(),
        samples: selected.len(),
        cause,
    };

    let (first, last) = match selected {
        [first, .., last] => (first, last),
        _ => return Err(insufficient(InsufficientCause::TooFewSamples)),
    };
    let line = least_squares(selected)
        .ok_or_else(|| insufficient(InsufficientCause::ZeroTimeVariance))?;

    let time_range = ValueRange::from_values(selected.iter().map(|s| s.time))
        .ok_or_else(|| insufficient(InsufficientCause::TooFewSamples))?;
    let pressure_range = ValueRange::from_values(selected.iter().map(|s| s.pressure))
        .ok_or_else(|| insufficient(InsufficientCause::TooFewSamples))?;

    Ok(FitResult {
        slope: line.slope,
        intercept: line.intercept,
        time_range,
        pressure_range,
        delta_t: last.time - first.time,
        delta_p: last.pressure - first.pressure,
        n: selected.len(),
    })
}

impl Dataset {
    /// Rise rate for a [`Selection`]
    pub fn rise_rate(&self, selection: &Selection) -> Result<FitResult, AnalysisError> {
        compute_rise_rate(self, &selection.trial_id, selection.t_lo, selection.t_hi)
    }
}
