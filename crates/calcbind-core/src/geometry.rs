//! Range geometry classification
//!
//! A named range's geometry is a pure function of its row and column spans.
//! Geometry drives both role inference (block ranges are always outputs) and
//! the shape of typed reads and writes.

use crate::reference::ParsedReference;
use std::fmt;

/// The dimensional shape of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeGeometry {
    /// Exactly one cell (1x1)
    Single,
    /// One row, multiple columns (1xN)
    Horizontal,
    /// Multiple rows, one column (Nx1)
    Vertical,
    /// Multiple rows and columns (NxM); first row is treated as headers
    Table,
    /// Unparseable reference or unresolved sheet
    Unknown,
}

impl fmt::Display for RangeGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RangeGeometry::Single => "SINGLE",
            RangeGeometry::Horizontal => "HORIZONTAL",
            RangeGeometry::Vertical => "VERTICAL",
            RangeGeometry::Table => "TABLE",
            RangeGeometry::Unknown => "UNKNOWN",
        };
        write!(f, "{}", tag)
    }
}

/// Classify the geometry of a parsed reference
///
/// `None` classifies as [`RangeGeometry::Unknown`]. Anchoring has no effect:
/// `A1:B10` and `$A$1:$B$10` classify identically.
///
/// # Examples
/// ```
/// use calcbind_core::{classify_geometry, parse_reference, RangeGeometry};
///
/// let parsed = parse_reference("Sheet1!$A$1:$A$1").unwrap();
/// assert_eq!(classify_geometry(Some(&parsed)), RangeGeometry::Single);
/// assert_eq!(classify_geometry(None), RangeGeometry::Unknown);
/// ```
pub fn classify_geometry(parsed: Option<&ParsedReference>) -> RangeGeometry {
    let Some(parsed) = parsed else {
        return RangeGeometry::Unknown;
    };
    let (Some(start_col), Some(end_col)) = (parsed.start_column(), parsed.end_column()) else {
        return RangeGeometry::Unknown;
    };

    let rows = parsed.end_row - parsed.start_row + 1;
    let cols = end_col - start_col + 1;

    match (rows > 1, cols > 1) {
        (false, false) => RangeGeometry::Single,
        (false, true) => RangeGeometry::Horizontal,
        (true, false) => RangeGeometry::Vertical,
        (true, true) => RangeGeometry::Table,
    }
}
