use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::cell::{CellRef, CellValue};
use super::helpers::get_attribute;
use super::XlsxError;

static BLANK: CellValue = CellValue::Blank;

/// One worksheet row: classified cells keyed by 1-based column index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<u32, CellValue>,
}

impl Row {
    /// Cell at `col`; absent cells read as [`CellValue::Blank`]
    pub fn get(&self, col: u32) -> &CellValue {
        self.cells.get(&col).unwrap_or(&BLANK)
    }

    /// Non-blank cells in column order
    pub fn cells(&self) -> impl Iterator<Item = (u32, &CellValue)> {
        self.cells.iter().map(|(col, value)| (*col, value))
    }

    /// True when the row holds no non-blank cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// In-memory worksheet with classified cells.
///
/// Only non-blank cells are stored. Rows are kept sorted by row number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, Row>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Sheet name as listed in the workbook
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a cell. Blank values clear the cell.
    pub fn set_cell(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_blank() {
            if let Some(r) = self.rows.get_mut(&row) {
                r.cells.remove(&col);
            }
            return;
        }
        self.rows.entry(row).or_default().cells.insert(col, value);
    }

    /// Row by 1-based number
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Cell by 1-based row and column
    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        self.rows.get(&row).map(|r| r.get(col)).unwrap_or(&BLANK)
    }

    /// Rows starting at `first`, in ascending row order
    pub fn rows_from(&self, first: u32) -> impl Iterator<Item = (u32, &Row)> {
        self.rows
            .range(first..)
            .map(|(n, row)| (*n, row))
    }

    /// Number of rows holding at least one cell
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// How the text of a `<c>` element is to be interpreted (`t` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Number,
    SharedString,
    InlineString,
    FormulaString,
    Boolean,
    Error,
}

impl CellKind {
    fn from_attr(t: Option<&str>) -> Self {
        match t {
            Some("s") => CellKind::SharedString,
            Some("inlineStr") => CellKind::InlineString,
            Some("str") => CellKind::FormulaString,
            Some("b") => CellKind::Boolean,
            Some("e") => CellKind::Error,
            _ => CellKind::Number,
        }
    }
}

struct PendingCell {
    col: u32,
    kind: CellKind,
    text: Option<String>,
}

impl PendingCell {
    fn push_text(&mut self, s: &str) {
        self.text.get_or_insert_with(String::new).push_str(s);
    }

    fn resolve(self, shared: &[String]) -> Result<CellValue, XlsxError> {
        let Some(raw) = self.text else {
            return Ok(CellValue::Blank);
        };
        let value = match self.kind {
            CellKind::SharedString => {
                let index: usize = raw.trim().parse().map_err(|_| {
                    XlsxError::InvalidStructure(format!("Bad shared string index '{}'", raw))
                })?;
                let text = shared.get(index).ok_or_else(|| {
                    XlsxError::InvalidStructure(format!(
                        "Shared string index {} out of range ({} strings)",
                        index,
                        shared.len()
                    ))
                })?;
                CellValue::classify(text)
            }
            CellKind::Boolean | CellKind::Error => {
                if raw.trim().is_empty() {
                    CellValue::Blank
                } else {
                    CellValue::Text(raw)
                }
            }
            CellKind::Number | CellKind::InlineString | CellKind::FormulaString => {
                CellValue::classify(&raw)
            }
        };
        Ok(value)
    }
}

/// Where text events currently land inside a `<c>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    InlineText,
}

/// Parse a worksheet part (`xl/worksheets/sheetN.xml`).
pub(super) fn parse_sheet(xml: &[u8], name: &str, shared: &[String]) -> Result<Sheet, XlsxError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut sheet = Sheet::new(name);
    let mut current_row: Option<u32> = None;
    let mut last_row: u32 = 0;
    let mut last_col: u32 = 0;
    let mut pending: Option<PendingCell> = None;
    let mut target = TextTarget::None;
    let mut in_inline = false;
    let mut phonetic_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"row" => {
                    let row = row_number(e, last_row)?;
                    current_row = Some(row);
                    last_row = row;
                    last_col = 0;
                }
                b"c" => {
                    if current_row.is_some() {
                        let (col, kind) = cell_header(e, last_col)?;
                        last_col = col;
                        pending = Some(PendingCell {
                            col,
                            kind,
                            text: None,
                        });
                    }
                }
                b"v" => {
                    if pending.is_some() {
                        target = TextTarget::Value;
                    }
                }
                b"is" => in_inline = true,
                b"rPh" => phonetic_depth += 1,
                b"t" => {
                    if in_inline && phonetic_depth == 0 {
                        target = TextTarget::InlineText;
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"row" => {
                    let row = row_number(e, last_row)?;
                    last_row = row;
                    last_col = 0;
                }
                b"c" => {
                    if current_row.is_some() {
                        let (col, _) = cell_header(e, last_col)?;
                        last_col = col;
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if target != TextTarget::None {
                    if let Some(ref mut cell) = pending {
                        cell.push_text(&t.unescape()?);
                    }
                }
            }
            Ok(Event::CData(ref t)) => {
                if target != TextTarget::None {
                    if let Some(ref mut cell) = pending {
                        cell.push_text(std::str::from_utf8(&**t)?);
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" | b"t" => target = TextTarget::None,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"is" => in_inline = false,
                b"c" => {
                    if let (Some(row), Some(cell)) = (current_row, pending.take()) {
                        let col = cell.col;
                        let value = cell.resolve(shared)?;
                        sheet.set_cell(row, col, value);
                    }
                    target = TextTarget::None;
                    in_inline = false;
                }
                b"row" => current_row = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

fn row_number(e: &BytesStart, last_row: u32) -> Result<u32, XlsxError> {
    match get_attribute(e, "r")? {
        Some(r) => {
            let row: u32 = r
                .trim()
                .parse()
                .map_err(|_| XlsxError::InvalidStructure(format!("Bad row number '{}'", r)))?;
            if row == 0 {
                return Err(XlsxError::InvalidStructure("Row number 0".to_string()));
            }
            Ok(row)
        }
        None => Ok(last_row + 1),
    }
}

fn cell_header(e: &BytesStart, last_col: u32) -> Result<(u32, CellKind), XlsxError> {
    let col = match get_attribute(e, "r")? {
        Some(r) => CellRef::parse(&r)?.col,
        None => last_col + 1,
    };
    let kind = CellKind::from_attr(get_attribute(e, "t")?.as_deref());
    Ok((col, kind))
}
