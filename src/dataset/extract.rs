use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use super::{DataSourceError, Dataset, Sample, SheetLayout, Trial};
use crate::xlsx::{column_letters, Row, Sheet, Workbook, XlsxError};

const DEFAULT_LEVEL: &str = "Unknown level";

/// Why a data row did not contribute a sample to a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Time, temperature or pressure cell is blank
    MissingCell,
    /// One of the cells holds non-numeric text
    NonNumeric,
}

/// Classification of one data row for one temperature/pressure column pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowClass {
    /// All three cells are numeric
    Sample(Sample),
    /// The row is left out of the trial
    Skipped(SkipReason),
}

impl RowClass {
    /// Classify `row` for the given time, temperature and pressure columns
    pub fn classify(row: &Row, time_col: u32, temperature_col: u32, pressure_col: u32) -> Self {
        let cells = [row.get(time_col), row.get(temperature_col), row.get(pressure_col)];
        if cells.iter().any(|c| c.is_blank()) {
            return RowClass::Skipped(SkipReason::MissingCell);
        }
        match (cells[0].as_number(), cells[1].as_number(), cells[2].as_number()) {
            (Some(time), Some(temperature), Some(pressure)) => {
                RowClass::Sample(Sample::new(time, pressure).with_temperature(temperature))
            }
            _ => RowClass::Skipped(SkipReason::NonNumeric),
        }
    }
}

/// A temperature column and the pressure column right after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    /// Temperature column (1-based)
    pub temperature: u32,
    /// Pressure column (1-based)
    pub pressure: u32,
}

/// Counters collected while extracting trials from a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Data rows present in the sheet
    pub rows_scanned: usize,
    /// Temperature/pressure column pairs found in the header row
    pub column_pairs: usize,
    /// Temperature headers without a pressure column next to them
    pub unpaired_columns: usize,
    /// Pairs that produced no sample and were omitted
    pub empty_pairs: usize,
    /// Samples kept across all trials
    pub samples_kept: usize,
    /// Row/pair combinations skipped for a blank cell
    pub skipped_missing: usize,
    /// Row/pair combinations skipped for non-numeric text
    pub skipped_non_numeric: usize,
}

impl ExtractionReport {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingCell => self.skipped_missing += 1,
            SkipReason::NonNumeric => self.skipped_non_numeric += 1,
        }
    }
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} column pairs ({} unpaired, {} empty), {} samples kept, {} skipped (blank), {} skipped (non-numeric)",
            self.rows_scanned,
            self.column_pairs,
            self.unpaired_columns,
            self.empty_pairs,
            self.samples_kept,
            self.skipped_missing,
            self.skipped_non_numeric
        )
    }
}

/// Extract the dataset from a workbook with the default layout
pub fn extract<P: AsRef<Path>>(path: P) -> Result<Dataset, DataSourceError> {
    extract_with_layout(path, &SheetLayout::default())
}

/// Extract the dataset from a workbook with a custom layout
pub fn extract_with_layout<P: AsRef<Path>>(
    path: P,
    layout: &SheetLayout,
) -> Result<Dataset, DataSourceError> {
    extract_with_report(path, layout).map(|(dataset, _)| dataset)
}

/// Extract the dataset and return the extraction counters alongside it
pub fn extract_with_report<P: AsRef<Path>>(
    path: P,
    layout: &SheetLayout,
) -> Result<(Dataset, ExtractionReport), DataSourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataSourceError::NotFound(path.to_path_buf()));
    }

    info!("Reading workbook {}", path.display());
    let mut workbook = Workbook::open(path)?;
    let sheet = workbook
        .sheet(&layout.sheet_name)
        .map_err(|e| match e {
            XlsxError::SheetNotFound { name, available } => {
                DataSourceError::MissingSheet { name, available }
            }
            other => DataSourceError::WorkbookError(other),
        })?;

    let (dataset, report) = Dataset::from_sheet_with_report(&sheet, layout)?;
    info!("Extracted {} trials: {}", dataset.len(), report);
    Ok((dataset, report))
}

/// Temperature/pressure pairs from the header row, in column order
pub fn find_column_pairs(header: &Row, time_column: u32) -> (Vec<ColumnPair>, usize) {
    let has = |col: u32, needle: &str| {
        header
            .get(col)
            .as_text()
            .map(|t| t.to_lowercase().contains(needle))
            .unwrap_or(false)
    };

    let mut pairs = Vec::new();
    let mut unpaired = 0;
    for (col, _) in header.cells() {
        if col == time_column || !has(col, "temperature") {
            continue;
        }
        if has(col + 1, "pressure") {
            pairs.push(ColumnPair {
                temperature: col,
                pressure: col + 1,
            });
        } else {
            warn!(
                "Temperature column {} has no pressure column next to it",
                column_letters(col)
            );
            unpaired += 1;
        }
    }
    (pairs, unpaired)
}

impl Dataset {
    /// Build the dataset from an already parsed sheet
    pub fn from_sheet(sheet: &Sheet, layout: &SheetLayout) -> Result<Self, DataSourceError> {
        Self::from_sheet_with_report(sheet, layout).map(|(dataset, _)| dataset)
    }

    /// Build the dataset from a parsed sheet, also returning the counters
    pub fn from_sheet_with_report(
        sheet: &Sheet,
        layout: &SheetLayout,
    ) -> Result<(Self, ExtractionReport), DataSourceError> {
        let mut report = ExtractionReport::default();

        let (pairs, unpaired) = match sheet.row(layout.header_row) {
            Some(header) => find_column_pairs(header, layout.time_column),
            None => (Vec::new(), 0),
        };
        report.column_pairs = pairs.len();
        report.unpaired_columns = unpaired;

        let data_rows: Vec<(u32, &Row)> = sheet.rows_from(layout.first_data_row).collect();
        report.rows_scanned = data_rows.len();

        let mut trials = Vec::with_capacity(pairs.len());
        let mut current_level = DEFAULT_LEVEL.to_string();

        for pair in pairs {
            if let Some(level) = sheet.cell(layout.level_row, pair.temperature).label() {
                current_level = level;
            }
            let trial_name = sheet
                .cell(layout.trial_row, pair.temperature)
                .label()
                .unwrap_or_else(|| format!("Trial @ {}", column_letters(pair.temperature)));

            let mut samples = Vec::new();
            for (row_number, row) in &data_rows {
                match RowClass::classify(row, layout.time_column, pair.temperature, pair.pressure) {
                    RowClass::Sample(sample) => samples.push(sample),
                    RowClass::Skipped(reason) => {
                        debug!(
                            "Row {} skipped for column {}: {:?}",
                            row_number,
                            column_letters(pair.temperature),
                            reason
                        );
                        report.record_skip(reason);
                    }
                }
            }

            if samples.is_empty() {
                warn!(
                    "No samples for {} / {} (column {}), omitted",
                    current_level,
                    trial_name,
                    column_letters(pair.temperature)
                );
                report.empty_pairs += 1;
                continue;
            }

            report.samples_kept += samples.len();
            trials.push(Trial::from_samples(current_level.clone(), trial_name, samples)?);
        }

        if trials.is_empty() {
            return Err(DataSourceError::NoTrials(sheet.name().to_string()));
        }
        if let Some(expected) = layout.expected_trials {
            if trials.len() != expected {
                return Err(DataSourceError::TrialCount {
                    expected,
                    found: trials.len(),
                });
            }
        }

        Ok((Dataset::from_trials(trials)?, report))
    }
}
