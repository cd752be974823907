/// Errors that can occur while reading an `.xlsx` workbook
#[derive(Debug, thiserror::Error)]
pub enum XlsxError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error parsing one of the SpreadsheetML parts
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// UTF-8 encoding error in text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// A required part is absent from the package
    #[error("Workbook is missing part: {0}")]
    MissingPart(String),

    /// No sheet with the requested name exists
    #[error("Sheet '{name}' not found (available: {available:?})")]
    SheetNotFound {
        /// Requested sheet name
        name: String,
        /// Sheet names present in the workbook
        available: Vec<String>,
    },

    /// A cell reference such as `B12` could not be parsed
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// Invalid SpreadsheetML structure
    #[error("Invalid workbook structure: {0}")]
    InvalidStructure(String),
}
