//! TOML configuration file support.
//!
//! Instead of repeating the workbook path and layout flags, users can keep
//! them in a config file:
//!
//! ```toml
//! # pressure-rise.toml
//! [source]
//! workbook = "Data/Data.xlsx"
//!
//! [layout]
//! sheet_name = "Raw Data"
//! first_data_row = 5
//! expected_trials = 40   # 0 disables the count check
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pressure_rise::dataset::SheetLayout;

/// Workbook used when neither the command line nor the config names one.
pub const DEFAULT_WORKBOOK: &str = "Data/Data.xlsx";

/// Root configuration structure for pressure-rise.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the workbook lives.
    #[serde(default)]
    pub source: SourceConfig,

    /// Sheet layout overrides; missing keys keep their defaults.
    #[serde(default)]
    pub layout: SheetLayout,
}

/// Configuration for the workbook location.
#[derive(Debug, Default, Deserialize)]
pub struct SourceConfig {
    /// Path to the `.xlsx` workbook.
    pub workbook: Option<PathBuf>,
}

/// Command-line overrides applied on top of a [`Config`].
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Workbook path
    pub workbook: Option<PathBuf>,
    /// Sheet name
    pub sheet: Option<String>,
    /// Required trial count, 0 disables the check
    pub expected_trials: Option<usize>,
}

/// Fully resolved workbook location and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Path to the workbook
    pub workbook: PathBuf,
    /// Layout of the raw-data sheet
    pub layout: SheetLayout,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides: flags > config file > defaults.
    pub fn resolve(&self, overrides: Overrides) -> Source {
        let workbook = overrides
            .workbook
            .or_else(|| self.source.workbook.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK));

        let mut layout = self.layout.clone();
        if let Some(sheet) = overrides.sheet {
            layout = layout.with_sheet_name(sheet);
        }
        if let Some(expected) = overrides.expected_trials {
            layout = layout.with_expected_trials(Some(expected));
        }
        if layout.expected_trials == Some(0) {
            layout = layout.with_expected_trials(None);
        }

        Source { workbook, layout }
    }
}
