use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use super::helpers::{get_attribute, require_attribute};
use super::shared_strings::parse_shared_strings;
use super::sheet::{parse_sheet, Sheet};
use super::XlsxError;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// A sheet listed in `xl/workbook.xml`, resolved to its package part
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    part: String,
}

/// Read-only view of an `.xlsx` package.
///
/// The shared-string table and the sheet directory are loaded on open; sheet
/// contents are parsed on demand with [`Workbook::sheet`].
pub struct Workbook<R: Read + Seek> {
    archive: ZipArchive<R>,
    shared_strings: Vec<String>,
    sheets: Vec<SheetEntry>,
}

impl Workbook<BufReader<File>> {
    /// Open a workbook file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, XlsxError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Workbook<R> {
    /// Open a workbook from any seekable reader
    pub fn from_reader(reader: R) -> Result<Self, XlsxError> {
        let mut archive = ZipArchive::new(reader)?;

        let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)?,
            None => Vec::new(),
        };

        let workbook_xml = read_part(&mut archive, WORKBOOK_PART)?
            .ok_or_else(|| XlsxError::MissingPart(WORKBOOK_PART.to_string()))?;
        let rels_xml = read_part(&mut archive, WORKBOOK_RELS_PART)?
            .ok_or_else(|| XlsxError::MissingPart(WORKBOOK_RELS_PART.to_string()))?;

        let relationships = parse_relationships(&rels_xml)?;
        let mut sheets = Vec::new();
        for (name, rel_id) in parse_sheet_list(&workbook_xml)? {
            match relationships.get(&rel_id) {
                Some(target) => sheets.push(SheetEntry {
                    name,
                    part: resolve_target(target),
                }),
                None => debug!("Sheet '{}' has no relationship target ({})", name, rel_id),
            }
        }

        debug!(
            "Opened workbook: {} sheets, {} shared strings",
            sheets.len(),
            shared_strings.len()
        );

        Ok(Self {
            archive,
            shared_strings,
            sheets,
        })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Shared-string table
    pub fn shared_strings(&self) -> &[String] {
        &self.shared_strings
    }

    /// Parse the sheet called `name`.
    ///
    /// Names are compared trimmed and case-insensitively, so `"raw data"`
    /// finds a sheet labelled `" Raw Data"`.
    pub fn sheet(&mut self, name: &str) -> Result<Sheet, XlsxError> {
        let wanted = name.trim().to_lowercase();
        let entry = self
            .sheets
            .iter()
            .find(|s| s.name.trim().to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| XlsxError::SheetNotFound {
                name: name.to_string(),
                available: self.sheet_names(),
            })?;

        debug!("Reading sheet '{}' from {}", entry.name, entry.part);
        let xml = read_part(&mut self.archive, &entry.part)?
            .ok_or_else(|| XlsxError::MissingPart(entry.part.clone()))?;
        parse_sheet(&xml, &entry.name, &self.shared_strings)
    }
}

/// Read a package part fully into memory; `None` if the part does not exist
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, XlsxError> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)?;
            Ok(Some(bytes))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(XlsxError::ZipError(e)),
    }
}

/// Relationship targets are relative to `xl/` unless they start with `/`
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

/// `(sheet name, relationship id)` pairs from `xl/workbook.xml`
fn parse_sheet_list(xml: &[u8]) -> Result<Vec<(String, String)>, XlsxError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let name = get_attribute(e, "name")?.unwrap_or_default();
                    let rel_id = require_attribute(e, "id", "sheet")?;
                    sheets.push((name, rel_id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Relationship id to target from `xl/_rels/workbook.xml.rels`
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, XlsxError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut rels = HashMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let id = require_attribute(e, "Id", "Relationship")?;
                    let target = require_attribute(e, "Target", "Relationship")?;
                    rels.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}
