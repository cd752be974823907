use std::fmt;

use serde::Serialize;

use super::DataSourceError;

/// Closed range of observed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl ValueRange {
    /// Range spanned by `values`; `None` when empty
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// `max - min`
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

/// One measurement row of a trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Time in seconds
    pub time: f64,
    /// Pressure in kPa
    pub pressure: f64,
    /// Temperature in degrees Celsius, when recorded
    pub temperature: Option<f64>,
}

impl Sample {
    /// Sample without a temperature reading
    pub fn new(time: f64, pressure: f64) -> Self {
        Self {
            time,
            pressure,
            temperature: None,
        }
    }

    /// Attach a temperature reading
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// One experimental run: a time-ordered pressure series.
///
/// Invariants, checked on construction: at least one sample, and sample
/// times never decrease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trial {
    id: String,
    level: String,
    trial: String,
    samples: Vec<Sample>,
    #[serde(skip)]
    time_range: ValueRange,
    #[serde(skip)]
    pressure_range: ValueRange,
}

impl Trial {
    /// Build a trial identified as `"<level>-<trial>"`
    pub fn from_samples(
        level: impl Into<String>,
        trial: impl Into<String>,
        samples: Vec<Sample>,
    ) -> Result<Self, DataSourceError> {
        let level = level.into();
        let trial = trial.into();
        let id = format!("{}-{}", level, trial);

        let (Some(time_range), Some(pressure_range)) = (
            ValueRange::from_values(samples.iter().map(|s| s.time)),
            ValueRange::from_values(samples.iter().map(|s| s.pressure)),
        ) else {
            return Err(DataSourceError::EmptyTrial(id));
        };
        for (index, pair) in samples.windows(2).enumerate() {
            // NaN never compares less, so it is rejected here as well
            if !(pair[0].time <= pair[1].time) {
                return Err(DataSourceError::TimeOrder {
                    trial: id,
                    index: index + 1,
                    previous: pair[0].time,
                    time: pair[1].time,
                });
            }
        }

        Ok(Self {
            id,
            level,
            trial,
            samples,
            time_range,
            pressure_range,
        })
    }

    /// Unique identifier, e.g. `"T3-R2"`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Temperature-level label
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Trial label within its level
    pub fn trial(&self) -> &str {
        &self.trial
    }

    /// Display label, `"<level> • <trial>"`
    pub fn label(&self) -> String {
        format!("{} • {}", self.level, self.trial)
    }

    /// Samples in time order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed trial
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples with `t_lo <= time <= t_hi`.
    ///
    /// Both bounds are inclusive. An inverted or NaN interval selects nothing.
    pub fn select(&self, t_lo: f64, t_hi: f64) -> &[Sample] {
        if !(t_lo <= t_hi) {
            return &[];
        }
        let start = self.samples.partition_point(|s| s.time < t_lo);
        let end = self.samples.partition_point(|s| s.time <= t_hi);
        &self.samples[start..end]
    }

    /// Range of sample times
    pub fn time_range(&self) -> ValueRange {
        self.time_range
    }

    /// Range of pressures
    pub fn pressure_range(&self) -> ValueRange {
        self.pressure_range
    }

    /// Range of recorded temperatures
    pub fn temperature_range(&self) -> Option<ValueRange> {
        ValueRange::from_values(self.samples.iter().filter_map(|s| s.temperature))
    }
}
