use std::fmt;

use super::XlsxError;

/// Classified content of a single worksheet cell.
///
/// Raw cell text is never used directly by callers: it is classified once,
/// when the sheet is parsed, into a number, a piece of text, or nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Finite numeric value
    Number(f64),
    /// Non-numeric text (labels, headers, error markers)
    Text(String),
    /// Empty or whitespace-only cell, or a cell that is not present at all
    #[default]
    Blank,
}

impl CellValue {
    /// Classify raw cell text.
    ///
    /// Text that parses as a finite `f64` becomes [`CellValue::Number`], so a
    /// number stored as a string still counts as numeric. Infinities and NaN
    /// are treated as text.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Blank;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Numeric value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text content; numbers and blanks yield `None`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Trimmed display label; numbers are rendered without a trailing `.0`
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Number(v) => Some(format!("{}", v)),
            CellValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// True for [`CellValue::Blank`]
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }
}

/// Convert column letters (`A`, `Z`, `AA`) to a 1-based column index.
pub fn column_index(letters: &str) -> Result<u32, XlsxError> {
    if letters.is_empty() {
        return Err(XlsxError::InvalidCellReference(letters.to_string()));
    }
    let mut value: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_uppercase() {
            return Err(XlsxError::InvalidCellReference(letters.to_string()));
        }
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(ch as u32 - 'A' as u32 + 1))
            .ok_or_else(|| XlsxError::InvalidCellReference(letters.to_string()))?;
    }
    Ok(value)
}

/// Convert a 1-based column index back to its letters.
pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// A parsed `A1`-style cell reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// 1-based row number
    pub row: u32,
    /// 1-based column index
    pub col: u32,
}

impl CellRef {
    /// Parse a reference such as `B12`
    pub fn parse(reference: &str) -> Result<Self, XlsxError> {
        let invalid = || XlsxError::InvalidCellReference(reference.to_string());

        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = reference.split_at(split);
        let col = column_index(letters).map_err(|_| invalid())?;
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Self { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(CellValue::classify("12.5"), CellValue::Number(12.5));
        assert_eq!(CellValue::classify(" 3 "), CellValue::Number(3.0));
        assert_eq!(CellValue::classify("1e-3"), CellValue::Number(0.001));
        assert_eq!(CellValue::classify(""), CellValue::Blank);
        assert_eq!(CellValue::classify("   "), CellValue::Blank);
        assert_eq!(
            CellValue::classify("Pressure (kPa)"),
            CellValue::Text("Pressure (kPa)".to_string())
        );
        assert!(matches!(CellValue::classify("NaN"), CellValue::Text(_)));
        assert!(matches!(CellValue::classify("inf"), CellValue::Text(_)));
        assert!(matches!(CellValue::classify("#DIV/0!"), CellValue::Text(_)));
    }

    #[test]
    fn test_label() {
        assert_eq!(CellValue::Number(25.0).label().as_deref(), Some("25"));
        assert_eq!(CellValue::Number(37.5).label().as_deref(), Some("37.5"));
        assert_eq!(CellValue::Text("  T3 ".into()).label().as_deref(), Some("T3"));
        assert_eq!(CellValue::Blank.label(), None);
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 1);
        assert_eq!(column_index("Z").unwrap(), 26);
        assert_eq!(column_index("AA").unwrap(), 27);
        assert_eq!(column_index("CB").unwrap(), 80);
        assert!(column_index("").is_err());
        assert!(column_index("a").is_err());
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(80), "CB");
    }

    #[test]
    fn test_cell_ref_parse() {
        let r = CellRef::parse("B12").unwrap();
        assert_eq!(r, CellRef { row: 12, col: 2 });
        assert_eq!(r.to_string(), "B12");

        assert!(CellRef::parse("12").is_err());
        assert!(CellRef::parse("B").is_err());
        assert!(CellRef::parse("B0").is_err());
        assert!(CellRef::parse("B1x").is_err());
    }
}
