use serde::Deserialize;

/// Sheet holding the raw measurements
pub const DEFAULT_SHEET_NAME: &str = "Raw Data";

/// Number of temperature levels in a complete workbook
pub const TEMPERATURE_LEVELS: usize = 8;

/// Repetitions recorded per temperature level
pub const TRIALS_PER_LEVEL: usize = 5;

/// Trials in a complete workbook
pub const EXPECTED_TRIALS: usize = TEMPERATURE_LEVELS * TRIALS_PER_LEVEL;

/// Fixed layout of the raw-data sheet.
///
/// ```text
/// row 2   level label (first column of each level block, carried right)
/// row 3   trial label (one per temperature column)
/// row 4   headers: A = time, then "Temperature" / "Pressure" column pairs
/// row 5.. samples
/// ```
///
/// Row and column numbers are 1-based, as in the workbook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Sheet name, matched trimmed and case-insensitively
    pub sheet_name: String,
    /// Row holding the temperature-level labels
    pub level_row: u32,
    /// Row holding the trial labels
    pub trial_row: u32,
    /// Row holding the column headers
    pub header_row: u32,
    /// First sample row
    pub first_data_row: u32,
    /// Column holding the sample time
    pub time_column: u32,
    /// Required number of trials; `None` accepts any non-zero count
    pub expected_trials: Option<usize>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            level_row: 2,
            trial_row: 3,
            header_row: 4,
            first_data_row: 5,
            time_column: 1,
            expected_trials: Some(EXPECTED_TRIALS),
        }
    }
}

impl SheetLayout {
    /// Override the sheet name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Override (or disable) the trial-count check
    pub fn with_expected_trials(mut self, expected: Option<usize>) -> Self {
        self.expected_trials = expected;
        self
    }
}
