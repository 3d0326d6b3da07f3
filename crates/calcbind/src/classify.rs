//! Named range role classification
//!
//! Each defined name becomes one [`NamedRangeRecord`]: reference parsed,
//! sheet resolved, geometry derived, and a role inferred. Role inference
//! probes only the top-left cell of the range - a deliberate heuristic, not
//! a full-range scan - except for TABLE geometry, which is always an output
//! regardless of content (blocks are computed presentations, never inputs).

use crate::engine::SpreadsheetEngine;
use calcbind_core::{classify_geometry, letters_to_column, parse_reference, RangeGeometry};
use std::fmt;

/// Whether a named range is caller-supplied or engine-computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeRole {
    /// Caller-supplied value cell(s)
    Input,
    /// Engine-computed result cell(s)
    Output,
    /// Unparseable reference or unresolved sheet
    Unknown,
}

impl fmt::Display for RangeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RangeRole::Input => "INPUT",
            RangeRole::Output => "OUTPUT",
            RangeRole::Unknown => "UNKNOWN",
        };
        write!(f, "{}", tag)
    }
}

/// A classified named range
///
/// Rows and columns are 1-based. Records for unresolvable references carry
/// `sheet_index = None` and zeroed bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRangeRecord {
    /// The defined name
    pub name: String,
    /// Inferred role
    pub role: RangeRole,
    /// Range shape
    pub geometry: RangeGeometry,
    /// The reference text as reported by the engine
    pub raw_reference: String,
    /// Sheet name from the reference (empty if none was present)
    pub sheet_name: String,
    /// Resolved sheet index, `None` when the sheet did not resolve
    pub sheet_index: Option<usize>,
    /// Top row (1-based)
    pub start_row: u32,
    /// Left column (1-based)
    pub start_column: u16,
    /// Bottom row (1-based)
    pub end_row: u32,
    /// Right column (1-based)
    pub end_column: u16,
    /// Number of rows spanned
    pub row_count: u32,
    /// Number of columns spanned
    pub column_count: u16,
    /// Whether the reference text contained a range end
    pub is_range: bool,
}

impl NamedRangeRecord {
    /// Total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count as u64 * self.column_count as u64
    }

    /// Record for a name whose reference could not be parsed or whose sheet
    /// did not resolve
    fn unresolved(name: &str, raw_reference: &str, sheet_name: String) -> Self {
        Self {
            name: name.to_string(),
            role: RangeRole::Unknown,
            geometry: RangeGeometry::Unknown,
            raw_reference: raw_reference.to_string(),
            sheet_name,
            sheet_index: None,
            start_row: 0,
            start_column: 0,
            end_row: 0,
            end_column: 0,
            row_count: 0,
            column_count: 0,
            is_range: false,
        }
    }
}

/// Workbook-wide classification result, partitioned by role
///
/// Every defined name appears in exactly one partition. TABLE geometry
/// records never appear in `inputs`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationSet {
    /// Ranges callers may write to
    pub inputs: Vec<NamedRangeRecord>,
    /// Ranges computed by the engine
    pub outputs: Vec<NamedRangeRecord>,
    /// Ranges that could not be classified
    pub unknown: Vec<NamedRangeRecord>,
}

impl ClassificationSet {
    /// Total number of classified names
    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.unknown.len()
    }

    /// Check if no names were classified
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up an input record by name (ASCII-case-insensitive, following
    /// spreadsheet name semantics)
    pub fn find_input(&self, name: &str) -> Option<&NamedRangeRecord> {
        Self::find_in(&self.inputs, name)
    }

    /// Look up an output record by name
    pub fn find_output(&self, name: &str) -> Option<&NamedRangeRecord> {
        Self::find_in(&self.outputs, name)
    }

    fn find_in<'a>(records: &'a [NamedRangeRecord], name: &str) -> Option<&'a NamedRangeRecord> {
        records.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// Classify one defined name into a record
///
/// Algorithm:
/// 1. Parse the reference; on failure the record is UNKNOWN/UNKNOWN.
/// 2. Resolve the sheet name; unresolved means UNKNOWN/UNKNOWN.
/// 3. Derive geometry from the spans.
/// 4. TABLE geometry is OUTPUT unconditionally.
/// 5. Otherwise probe the top-left cell: formula means OUTPUT, else INPUT.
///
/// No side effects; the workbook is never mutated.
pub fn classify_name<E: SpreadsheetEngine + ?Sized>(
    engine: &E,
    name: &str,
    formula: &str,
) -> NamedRangeRecord {
    let Some(parsed) = parse_reference(formula) else {
        tracing::warn!(name, reference = formula, "unparseable named-range reference");
        return NamedRangeRecord::unresolved(name, formula, String::new());
    };

    let sheet_name = parsed.sheet.clone().unwrap_or_default();
    let Some(sheet_index) = parsed.sheet.as_deref().and_then(|s| engine.sheet_index(s)) else {
        tracing::warn!(name, sheet = %sheet_name, "named range sheet did not resolve");
        return NamedRangeRecord::unresolved(name, formula, sheet_name);
    };

    // The parser validated both column tokens, so these always convert
    let (Some(start_column), Some(end_column)) = (
        letters_to_column(&parsed.start_column_letters),
        letters_to_column(&parsed.end_column_letters),
    ) else {
        return NamedRangeRecord::unresolved(name, formula, sheet_name);
    };

    let geometry = classify_geometry(Some(&parsed));

    let role = if geometry == RangeGeometry::Table {
        RangeRole::Output
    } else if engine.is_formula_cell(sheet_index, parsed.start_row, start_column) {
        RangeRole::Output
    } else {
        RangeRole::Input
    };

    NamedRangeRecord {
        name: name.to_string(),
        role,
        geometry,
        raw_reference: formula.to_string(),
        sheet_name,
        sheet_index: Some(sheet_index),
        start_row: parsed.start_row,
        start_column,
        end_row: parsed.end_row,
        end_column,
        row_count: parsed.end_row - parsed.start_row + 1,
        column_count: end_column - start_column + 1,
        is_range: parsed.is_range,
    }
}

/// Classify every defined name in the workbook
pub fn classify_workbook<E: SpreadsheetEngine + ?Sized>(engine: &E) -> ClassificationSet {
    let mut set = ClassificationSet::default();

    for defined in engine.defined_names() {
        let record = classify_name(engine, &defined.name, &defined.formula);
        match record.role {
            RangeRole::Input => set.inputs.push(record),
            RangeRole::Output => set.outputs.push(record),
            RangeRole::Unknown => set.unknown.push(record),
        }
    }

    tracing::debug!(
        inputs = set.inputs.len(),
        outputs = set.outputs.len(),
        unknown = set.unknown.len(),
        "classified defined names"
    );

    set
}
