//! # JSON Export
//!
//! Serializes the dataset as a list of per-trial column arrays for an external
//! front end to plot.
//!
//! ```json
//! [
//!   {
//!     "label": "25 C • Trial 1",
//!     "level": "25 C",
//!     "trial": "Trial 1",
//!     "time_s": [0.0, 0.5],
//!     "pressure_kpa": [101.3, 101.9],
//!     "temperature_c": [25.1, 25.2]
//!   }
//! ]
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Trial};

/// Errors that can occur while exporting the dataset
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error writing the output
    #[error("Failed to write export: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One trial as column arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialPayload {
    /// Display label, `"<level> • <trial>"`
    pub label: String,
    /// Temperature-level label
    pub level: String,
    /// Trial label
    pub trial: String,
    /// Sample times in seconds
    pub time_s: Vec<f64>,
    /// Pressures in kPa
    pub pressure_kpa: Vec<f64>,
    /// Temperatures in degrees Celsius (`null` where not recorded)
    pub temperature_c: Vec<Option<f64>>,
}

impl From<&Trial> for TrialPayload {
    fn from(trial: &Trial) -> Self {
        let samples = trial.samples();
        Self {
            label: trial.label(),
            level: trial.level().to_string(),
            trial: trial.trial().to_string(),
            time_s: samples.iter().map(|s| s.time).collect(),
            pressure_kpa: samples.iter().map(|s| s.pressure).collect(),
            temperature_c: samples.iter().map(|s| s.temperature).collect(),
        }
    }
}

/// Payload for every trial, in dataset order
pub fn payload(dataset: &Dataset) -> Vec<TrialPayload> {
    dataset.iter().map(TrialPayload::from).collect()
}

/// Serialize the dataset to a JSON string
pub fn to_json(dataset: &Dataset, pretty: bool) -> Result<String, ExportError> {
    let payload = payload(dataset);
    let json = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    Ok(json)
}

/// Write the dataset as JSON to `writer`
pub fn write_json<W: Write>(dataset: &Dataset, writer: W, pretty: bool) -> Result<(), ExportError> {
    let payload = payload(dataset);
    if pretty {
        serde_json::to_writer_pretty(writer, &payload)?;
    } else {
        serde_json::to_writer(writer, &payload)?;
    }
    Ok(())
}

/// Write the dataset as JSON to a file
pub fn write_json_file<P: AsRef<Path>>(
    dataset: &Dataset,
    path: P,
    pretty: bool,
) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(dataset, &mut writer, pretty)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Sample;

    fn dataset() -> Dataset {
        let a = Trial::from_samples(
            "25 C",
            "Trial 1",
            vec![
                Sample::new(0.0, 101.3).with_temperature(25.1),
                Sample::new(0.5, 101.9).with_temperature(25.2),
            ],
        )
        .unwrap();
        let b = Trial::from_samples("30 C", "Trial 1", vec![Sample::new(0.0, 99.0)]).unwrap();
        Dataset::from_trials(vec![a, b]).unwrap()
    }

    #[test]
    fn test_payload_fields() {
        let payload = payload(&dataset());
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].label, "25 C • Trial 1");
        assert_eq!(payload[0].level, "25 C");
        assert_eq!(payload[0].trial, "Trial 1");
        assert_eq!(payload[0].time_s, vec![0.0, 0.5]);
        assert_eq!(payload[0].pressure_kpa, vec![101.3, 101.9]);
        assert_eq!(payload[0].temperature_c, vec![Some(25.1), Some(25.2)]);
        assert_eq!(payload[1].temperature_c, vec![None]);
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&dataset(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value[0];
        assert_eq!(first["label"], "25 C • Trial 1");
        assert_eq!(first["time_s"][1], 0.5);
        assert_eq!(first["pressure_kpa"][0], 101.3);
        assert!(value[1]["temperature_c"][0].is_null());
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trials.json");
        write_json_file(&dataset(), &path, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<TrialPayload> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, payload(&dataset()));
    }
}
