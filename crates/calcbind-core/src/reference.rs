//! A1-style reference parsing and column-letter arithmetic
//!
//! Named ranges refer to cells with strings like `Input!$C$60:$C$63` or
//! `'API Output'!G5`. [`parse_reference`] turns such a string into a
//! [`ParsedReference`]; parse failure is represented as `None` and is never
//! fatal to the caller.

use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;

/// A parsed cell or range reference
///
/// Rows are 1-based. Column letters are base-26 with digits A=1..Z=26 and no
/// zero symbol, so `"AA"` is column 27. When the source text had no range
/// end, the end column/row mirror the start and `is_range` is `false`.
///
/// Ranges are normalized so that the start is the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedReference {
    /// Sheet name, if the reference carried a `Sheet!` prefix
    pub sheet: Option<String>,
    /// Column letters of the top-left cell (e.g. "A", "AK")
    pub start_column_letters: String,
    /// Row of the top-left cell (1-based)
    pub start_row: u32,
    /// Column letters of the bottom-right cell
    pub end_column_letters: String,
    /// Row of the bottom-right cell (1-based)
    pub end_row: u32,
    /// Whether the source text contained a `:` range end
    pub is_range: bool,
}

impl ParsedReference {
    /// Numeric start column (1-based)
    pub fn start_column(&self) -> Option<u16> {
        letters_to_column(&self.start_column_letters)
    }

    /// Numeric end column (1-based)
    pub fn end_column(&self) -> Option<u16> {
        letters_to_column(&self.end_column_letters)
    }

    /// Number of rows spanned
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// Number of columns spanned, when the letters are convertible
    pub fn column_count(&self) -> Option<u16> {
        Some(self.end_column()? - self.start_column()? + 1)
    }
}

impl fmt::Display for ParsedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}!", sheet)?;
        }
        write!(f, "{}{}", self.start_column_letters, self.start_row)?;
        if self.is_range {
            write!(f, ":{}{}", self.end_column_letters, self.end_row)?;
        }
        Ok(())
    }
}

/// Parse an A1-style cell or range reference
///
/// Accepts `[Sheet]![$]Col[$]Row[:[$]Col[$]Row]`, with or without a
/// single-quoted sheet name, with or without `$` anchors, and with one
/// optional leading `=` (formula-style references as stored in defined
/// names). Column tokens must be uppercase A-Z; row tokens must be digits
/// with row >= 1.
///
/// Returns `None` for anything that does not match, including lowercase
/// column letters, missing row digits, out-of-bounds rows or columns, and
/// trailing garbage. Never panics.
///
/// # Examples
/// ```
/// use calcbind_core::parse_reference;
///
/// let parsed = parse_reference("Input!$D$7").unwrap();
/// assert_eq!(parsed.sheet.as_deref(), Some("Input"));
/// assert_eq!(parsed.start_column_letters, "D");
/// assert_eq!(parsed.start_row, 7);
/// assert!(!parsed.is_range);
///
/// assert!(parse_reference("Input!d7").is_none());
/// ```
pub fn parse_reference(reference: &str) -> Option<ParsedReference> {
    let s = reference.strip_prefix('=').unwrap_or(reference);
    if s.is_empty() {
        return None;
    }

    // Optional sheet prefix, quoted or bare, terminated by '!'
    let (sheet, cell_part) = if let Some(rest) = s.strip_prefix('\'') {
        let close = rest.find('\'')?;
        let name = &rest[..close];
        if name.is_empty() {
            return None;
        }
        let after = rest[close + 1..].strip_prefix('!')?;
        (Some(name.to_string()), after)
    } else if let Some(bang) = s.find('!') {
        let name = &s[..bang];
        if name.is_empty() {
            return None;
        }
        (Some(name.to_string()), &s[bang + 1..])
    } else {
        (None, s)
    };

    let bytes = cell_part.as_bytes();
    let mut pos = 0;

    let (start_letters, start_row) = parse_cell(cell_part, &mut pos)?;

    let (end_letters, end_row, is_range) = if bytes.get(pos) == Some(&b':') {
        pos += 1;
        let (letters, row) = parse_cell(cell_part, &mut pos)?;
        (letters, row, true)
    } else {
        (start_letters.clone(), start_row, false)
    };

    if pos != bytes.len() {
        return None;
    }

    // Normalize so start is top-left and end is bottom-right
    let (start_row, end_row) = if start_row <= end_row {
        (start_row, end_row)
    } else {
        (end_row, start_row)
    };
    let (start_letters, end_letters) =
        if letters_to_column(&start_letters)? <= letters_to_column(&end_letters)? {
            (start_letters, end_letters)
        } else {
            (end_letters, start_letters)
        };

    Some(ParsedReference {
        sheet,
        start_column_letters: start_letters,
        start_row,
        end_column_letters: end_letters,
        end_row,
        is_range,
    })
}

/// Parse one `[$]Col[$]Row` token starting at `*pos`, advancing the cursor
fn parse_cell(s: &str, pos: &mut usize) -> Option<(String, u32)> {
    let bytes = s.as_bytes();

    if bytes.get(*pos) == Some(&b'$') {
        *pos += 1;
    }

    let col_start = *pos;
    while matches!(bytes.get(*pos), Some(c) if c.is_ascii_uppercase()) {
        *pos += 1;
    }
    if *pos == col_start {
        return None;
    }
    let letters = s[col_start..*pos].to_string();
    letters_to_column(&letters)?;

    if bytes.get(*pos) == Some(&b'$') {
        *pos += 1;
    }

    let row_start = *pos;
    while matches!(bytes.get(*pos), Some(c) if c.is_ascii_digit()) {
        *pos += 1;
    }
    if *pos == row_start {
        return None;
    }
    let row: u32 = s[row_start..*pos].parse().ok()?;
    if row == 0 || row > MAX_ROWS {
        return None;
    }

    Some((letters, row))
}

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27)
///
/// Letters must be uppercase A-Z. Returns `None` for invalid characters or
/// columns beyond [`MAX_COLS`].
pub fn letters_to_column(letters: &str) -> Option<u16> {
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (c as u32 - 'A' as u32 + 1);
        if col > MAX_COLS as u32 {
            return None;
        }
    }

    Some(col as u16)
}

/// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA)
///
/// Returns an empty string for column 0, which is not a valid column.
pub fn column_to_letters(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}
