//! # pressure-rise
//!
//! Pressure rise rates for the temperature-series experiment recorded in a
//! `Raw Data` workbook.
//!
//! ## Key Features
//!
//! - **Self-contained `.xlsx` reader**: ZIP container plus streaming
//!   SpreadsheetML parsing; shared strings, inline strings and cached formula
//!   values are resolved into typed cells.
//!
//! - **Trial extraction**: each temperature/pressure column pair of the sheet
//!   becomes one trial identified as `"<level>-<trial>"`, with rows that lack
//!   a numeric time, temperature or pressure left out.
//!
//! - **Rise-rate calculator**: ordinary least-squares slope of pressure
//!   against time over a closed interval, with the selected time and pressure
//!   spans.
//!
//! - **JSON export**: per-trial column arrays for an external plotting front
//!   end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pressure_rise::prelude::*;
//!
//! let dataset = extract("Data/Data.xlsx")?;
//! let fit = compute_rise_rate(&dataset, "25 C-Trial 1", 10.0, 40.0)?;
//! println!("{}", fit);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`xlsx`]: workbook container and sheet parsing
//! - [`dataset`]: sheet layout, trial extraction and the immutable [`dataset::Dataset`]
//! - [`analysis`]: closed-interval selection and linear fit
//! - [`export`]: JSON serialization of the dataset

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod dataset;
pub mod export;
pub mod xlsx;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{
        compute_rise_rate, fit_trial, AnalysisError, FitResult, InsufficientCause, Selection,
    };
    pub use crate::dataset::{
        extract, extract_with_layout, extract_with_report, DataSourceError, Dataset,
        ExtractionReport, Sample, SheetLayout, Trial, TrialSummary, ValueRange,
    };
    pub use crate::export::{payload, write_json, ExportError, TrialPayload};
    pub use crate::xlsx::{CellValue, Sheet, Workbook, XlsxError};
}
