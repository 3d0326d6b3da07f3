//! Scalar cell values and string coercion
//!
//! The spreadsheet engine boundary is string-typed: every cell read returns
//! text, even for numeric and boolean results. [`coerce`] applies a fixed
//! decision order (empty, error sentinel, boolean, number, string fallback)
//! to recover a typed scalar. The order is load-bearing: reordering changes
//! behavior on ambiguous strings like `"true100"`, so it is pinned by tests.

use std::fmt;

/// Spreadsheet error strings that coerce to [`ScalarValue::Null`]
///
/// Matching is exact and case-sensitive.
pub const ERROR_SENTINELS: [&str; 7] = [
    "#N/A", "#REF!", "#VALUE!", "#DIV/0!", "#NAME?", "#NULL!", "#NUM!",
];

/// A coerced scalar cell value
///
/// `Null` covers both "empty cell" and "formula error sentinel"; the
/// distinction is deliberately discarded at this boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarValue {
    /// Empty cell or spreadsheet error sentinel
    Null,
    /// Boolean value (TRUE/FALSE)
    Boolean(bool),
    /// Numeric value (all numbers as f64)
    Number(f64),
    /// String value, kept verbatim
    Text(String),
}

impl ScalarValue {
    /// Check if the value is null (empty or errored)
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            ScalarValue::Boolean(true) => Some(1.0),
            ScalarValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The textual form written back to the engine
    ///
    /// `Null` becomes the empty string, booleans become `TRUE`/`FALSE`,
    /// numbers use their shortest decimal form, text is verbatim.
    pub fn to_cell_text(&self) -> String {
        match self {
            ScalarValue::Null => String::new(),
            ScalarValue::Boolean(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            ScalarValue::Number(n) => n.to_string(),
            ScalarValue::Text(s) => s.clone(),
        }
    }
}

impl Default for ScalarValue {
    fn default() -> Self {
        ScalarValue::Null
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell_text())
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<i32> for ScalarValue {
    fn from(n: i32) -> Self {
        ScalarValue::Number(n as f64)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Number(n as f64)
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Number(n)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

/// Coerce raw cell text into a typed scalar
///
/// Decision order, fixed:
/// 1. empty string -> `Null`
/// 2. exact match of an error sentinel -> `Null`
/// 3. ASCII-case-insensitive `true`/`false` -> `Boolean`
/// 4. trimmed text that fully parses as a finite number -> `Number`
/// 5. anything else -> `Text`, unmodified (not trimmed)
///
/// Pure and total; never panics.
///
/// # Examples
/// ```
/// use calcbind_core::{coerce, ScalarValue};
///
/// assert_eq!(coerce(""), ScalarValue::Null);
/// assert_eq!(coerce("#N/A"), ScalarValue::Null);
/// assert_eq!(coerce("TRUE"), ScalarValue::Boolean(true));
/// assert_eq!(coerce(" 42 "), ScalarValue::Number(42.0));
/// assert_eq!(coerce("100%"), ScalarValue::Text("100%".into()));
/// ```
pub fn coerce(raw: &str) -> ScalarValue {
    if raw.is_empty() {
        return ScalarValue::Null;
    }

    if ERROR_SENTINELS.contains(&raw) {
        return ScalarValue::Null;
    }

    if raw.eq_ignore_ascii_case("true") {
        return ScalarValue::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return ScalarValue::Boolean(false);
    }

    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        if let Ok(n) = trimmed.parse::<f64>() {
            // f64 parsing accepts "inf" and "NaN"; those stay text
            if n.is_finite() {
                return ScalarValue::Number(n);
            }
        }
    }

    ScalarValue::Text(raw.to_string())
}
