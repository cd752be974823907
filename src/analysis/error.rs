use std::fmt;

/// Why a selection cannot produce a slope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientCause {
    /// Fewer than two samples fall inside the interval
    TooFewSamples,
    /// All selected samples share one time value
    ZeroTimeVariance,
}

impl fmt::Display for InsufficientCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsufficientCause::TooFewSamples => write!(f, "need at least 2 samples"),
            InsufficientCause::ZeroTimeVariance => write!(f, "all selected samples share one time"),
        }
    }
}

/// Recoverable, per-request errors of the rise-rate calculation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// No trial with this identifier
    #[error("Unknown trial: {0}")]
    NotFound(String),

    /// The selection does not define a slope
    #[error("Insufficient data in trial '{trial}': {samples} samples selected, {cause}")]
    InsufficientData {
        /// Trial identifier
        trial: String,
        /// Samples inside the interval
        samples: usize,
        /// Which condition failed
        cause: InsufficientCause,
    },
}
