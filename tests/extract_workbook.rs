//! Integration tests for pressure-rise
//!
//! These tests write real `.xlsx` files to disk and run the full pipeline:
//! workbook parsing, trial extraction, rise-rate fits and JSON export.

use pressure_rise::analysis::{compute_rise_rate, AnalysisError, InsufficientCause, Selection};
use pressure_rise::dataset::{
    extract, extract_with_layout, extract_with_report, DataSourceError, SheetLayout,
    EXPECTED_TRIALS, TEMPERATURE_LEVELS, TRIALS_PER_LEVEL,
};
use pressure_rise::export::{payload, write_json_file, TrialPayload};
use pressure_rise::xlsx::{column_letters, Workbook};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const ROWS: u32 = 20;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

const SHARED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
  <si><t>Time (s)</t></si>
  <si><t>Temperature (C)</t></si>
  <si><t>Pressure (kPa)</t></si>
</sst>"#;

const NOTES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>see Raw Data</t></is></c></row></sheetData>
</worksheet>"#;

/// Rise rate of trial `index` (0-based, sheet order)
fn slope_of(index: usize) -> f64 {
    (index + 1) as f64 * 0.25
}

fn level_label(level: usize) -> String {
    format!("{} C", 25 + 5 * level)
}

fn inline(cell: &str, text: &str) -> String {
    format!(r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#, cell, text)
}

fn number(cell: &str, value: f64) -> String {
    format!(r#"<c r="{}"><v>{}</v></c>"#, cell, value)
}

fn shared(cell: &str, index: usize) -> String {
    format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, cell, index)
}

/// Raw-data sheet with `levels` x `trials_per_level` column pairs
fn raw_data_xml(levels: usize, trials_per_level: usize) -> String {
    let pairs = levels * trials_per_level;
    let col_of = |pair: usize| 2 + 2 * pair as u32;

    let mut level_row = String::from(r#"<row r="2">"#);
    let mut trial_row = String::from(r#"<row r="3">"#);
    let mut header_row = format!(r#"<row r="4">{}"#, shared("A4", 0));
    for pair in 0..pairs {
        let temp = column_letters(col_of(pair));
        let pres = column_letters(col_of(pair) + 1);
        if pair % trials_per_level == 0 {
            level_row.push_str(&inline(&format!("{}2", temp), &level_label(pair / trials_per_level)));
        }
        let trial = format!("Trial {}", pair % trials_per_level + 1);
        trial_row.push_str(&inline(&format!("{}3", temp), &trial));
        header_row.push_str(&shared(&format!("{}4", temp), 1));
        header_row.push_str(&shared(&format!("{}4", pres), 2));
    }
    level_row.push_str("</row>");
    trial_row.push_str("</row>");
    header_row.push_str("</row>");

    let mut data = String::new();
    for r in 0..ROWS {
        let row = 5 + r;
        let time = r as f64 * 0.5;
        data.push_str(&format!(r#"<row r="{}">"#, row));
        data.push_str(&number(&format!("A{}", row), time));
        for pair in 0..pairs {
            let temp = column_letters(col_of(pair));
            let pres = column_letters(col_of(pair) + 1);
            let level = pair / trials_per_level;
            data.push_str(&number(&format!("{}{}", temp, row), 25.0 + 5.0 * level as f64));
            data.push_str(&number(&format!("{}{}", pres, row), 100.0 + slope_of(pair) * time));
        }
        data.push_str("</row>");
    }
    // trailing note below the data
    data.push_str(&format!(
        r#"<row r="{}">{}</row>"#,
        5 + ROWS + 2,
        inline(&format!("A{}", 5 + ROWS + 2), "end of run")
    ));

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>{}{}{}{}</sheetData>
</worksheet>"#,
        level_row, trial_row, header_row, data
    )
}

/// Write a workbook with a "Notes" sheet and a data sheet named `sheet_name`
fn write_workbook(dir: &TempDir, sheet_name: &str, levels: usize, trials: usize) -> PathBuf {
    let workbook_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Notes" sheetId="1" r:id="rId1"/>
    <sheet name="{}" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#,
        sheet_name
    );
    let rels_xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
</Relationships>"#;
    let raw_xml = raw_data_xml(levels, trials);

    let path = dir.path().join("Data.xlsx");
    let file = File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("xl/workbook.xml", workbook_xml.as_str()),
        ("xl/_rels/workbook.xml.rels", rels_xml),
        ("xl/sharedStrings.xml", SHARED_XML),
        ("xl/worksheets/sheet1.xml", NOTES_XML),
        ("xl/worksheets/sheet2.xml", raw_xml.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn full_workbook(dir: &TempDir) -> PathBuf {
    write_workbook(dir, "Raw Data", TEMPERATURE_LEVELS, TRIALS_PER_LEVEL)
}

/// A complete workbook yields the forty trials in sheet order
#[test]
fn test_extract_full_workbook() {
    let dir = tempdir().unwrap();
    let path = full_workbook(&dir);

    let (dataset, report) = extract_with_report(&path, &SheetLayout::default()).unwrap();
    assert_eq!(dataset.len(), EXPECTED_TRIALS);
    assert_eq!(dataset.total_samples(), EXPECTED_TRIALS * ROWS as usize);
    assert_eq!(report.column_pairs, EXPECTED_TRIALS);
    assert_eq!(report.rows_scanned, ROWS as usize + 1);
    assert_eq!(report.skipped_missing, EXPECTED_TRIALS);

    let ids: Vec<&str> = dataset.ids().collect();
    assert_eq!(ids[0], "25 C-Trial 1");
    assert_eq!(ids[6], "30 C-Trial 2");
    assert_eq!(ids[39], "60 C-Trial 5");

    let trial = dataset.get("35 C-Trial 3").unwrap();
    assert_eq!(trial.label(), "35 C • Trial 3");
    assert_eq!(trial.len(), ROWS as usize);
    assert_eq!(trial.samples()[0].temperature, Some(35.0));
}

/// Fits on an extracted trial recover the slope written into the sheet
#[test]
fn test_rise_rate_on_extracted_trial() {
    let dir = tempdir().unwrap();
    let dataset = extract(full_workbook(&dir)).unwrap();

    for (index, trial) in dataset.iter().enumerate() {
        let fit = compute_rise_rate(&dataset, trial.id(), 1.0, 5.0).unwrap();
        assert_eq!(fit.n, 9);
        assert!((fit.slope - slope_of(index)).abs() < 1e-9);
        assert_eq!(fit.time_range.min, 1.0);
        assert_eq!(fit.time_range.max, 5.0);
        assert!((fit.delta_p - 4.0 * slope_of(index)).abs() < 1e-9);
    }

    let selection = Selection::new("45 C-Trial 1", 0.0, 0.0);
    assert_eq!(
        dataset.rise_rate(&selection).unwrap_err(),
        AnalysisError::InsufficientData {
            trial: "45 C-Trial 1".to_string(),
            samples: 1,
            cause: InsufficientCause::TooFewSamples,
        }
    );
    assert!(matches!(
        compute_rise_rate(&dataset, "nonexistent", 0.0, 10.0),
        Err(AnalysisError::NotFound(_))
    ));
}

#[test]
fn test_sheet_name_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let path = write_workbook(&dir, " raw data ", TEMPERATURE_LEVELS, TRIALS_PER_LEVEL);
    assert_eq!(extract(&path).unwrap().len(), EXPECTED_TRIALS);

    let mut workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Notes", " raw data "]);
    assert_eq!(workbook.sheet("Notes").unwrap().row_count(), 1);
}

#[test]
fn test_missing_sheet() {
    let dir = tempdir().unwrap();
    let path = write_workbook(&dir, "Processed", 1, 1);

    match extract(&path).unwrap_err() {
        DataSourceError::MissingSheet { name, available } => {
            assert_eq!(name, "Raw Data");
            assert_eq!(available, vec!["Notes".to_string(), "Processed".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_incomplete_workbook_fails_count_check() {
    let dir = tempdir().unwrap();
    let path = write_workbook(&dir, "Raw Data", 3, TRIALS_PER_LEVEL);

    assert!(matches!(
        extract(&path),
        Err(DataSourceError::TrialCount {
            expected: 40,
            found: 15
        })
    ));

    let layout = SheetLayout::default().with_expected_trials(None);
    assert_eq!(extract_with_layout(&path, &layout).unwrap().len(), 15);
}

#[test]
fn test_missing_workbook() {
    let err = extract(Path::new("does/not/exist.xlsx")).unwrap_err();
    assert!(matches!(err, DataSourceError::NotFound(_)));
    assert!(err.to_string().contains("exist.xlsx"));
}

#[test]
fn test_corrupt_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Data.xlsx");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    assert!(matches!(
        extract(&path),
        Err(DataSourceError::WorkbookError(_))
    ));
}

#[test]
fn test_export_json() {
    let dir = tempdir().unwrap();
    let dataset = extract(full_workbook(&dir)).unwrap();

    let out = dir.path().join("trials.json");
    write_json_file(&dataset, &out, false).unwrap();

    let parsed: Vec<TrialPayload> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed.len(), EXPECTED_TRIALS);
    assert_eq!(parsed, payload(&dataset));
    assert_eq!(parsed[0].label, "25 C • Trial 1");
    assert_eq!(parsed[0].time_s.len(), ROWS as usize);
    assert_eq!(parsed[1].pressure_kpa[2], 100.0 + slope_of(1) * 1.0);
}
