//! # SpreadsheetML Reader
//!
//! Minimal pull-based reader for `.xlsx` workbooks, built on `zip` and
//! `quick-xml`. It covers what the trial extractor needs: locating a sheet by
//! name, resolving shared and inline strings, and classifying every cell.
//!
//! ## Package Structure
//!
//! ```text
//! workbook.xlsx (ZIP)
//! ├── xl/workbook.xml              (sheet names -> relationship ids)
//! ├── xl/_rels/workbook.xml.rels   (relationship ids -> part paths)
//! ├── xl/sharedStrings.xml         (optional string table)
//! └── xl/worksheets/sheetN.xml
//!     └── sheetData
//!         └── row (r="N")*
//!             └── c (r="A1", t="s|inlineStr|str|b|e|n")*
//!                 ├── v   (value or shared string index)
//!                 └── is/t (inline string)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use pressure_rise::xlsx::Workbook;
//!
//! let mut workbook = Workbook::open("Data/Data.xlsx")?;
//! let sheet = workbook.sheet("Raw Data")?;
//! println!("{} rows", sheet.row_count());
//! # Ok::<(), pressure_rise::xlsx::XlsxError>(())
//! ```

mod cell;
mod error;
mod helpers;
mod shared_strings;
mod sheet;
mod workbook;


pub use cell::{column_index, column_letters, CellRef, CellValue};
pub use error::XlsxError;
pub use sheet::{Row, Sheet};
pub use workbook::Workbook;
