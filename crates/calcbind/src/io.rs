//! Shape-aware range reads and writes
//!
//! Reads return the typed form appropriate to the record's geometry: a
//! scalar, an ordered sequence, or a header/data table. Writes enforce the
//! geometry contract (scalar to a single cell, sequence along a row or
//! column) with pad-with-empty and truncate-to-span semantics. Writing
//! never recalculates; the caller drives recalculation explicitly after a
//! batch.

use crate::classify::NamedRangeRecord;
use crate::engine::SpreadsheetEngine;
use crate::error::{Error, Result};
use calcbind_core::{coerce, RangeGeometry, ScalarValue};

/// A TABLE-geometry read result: first row as headers, remaining rows as data
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableResult {
    /// Number of data rows (range row count minus the header row)
    pub data_row_count: u32,
    /// Number of columns
    pub column_count: u16,
    /// Coerced first-row values, one per column
    pub headers: Vec<ScalarValue>,
    /// Coerced data rows, each of `column_count` entries
    pub data: Vec<Vec<ScalarValue>>,
}

/// The typed result of reading a classified range
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeValue {
    /// SINGLE geometry (and the unresolved fallback)
    Scalar(ScalarValue),
    /// HORIZONTAL or VERTICAL geometry, in range order
    Sequence(Vec<ScalarValue>),
    /// TABLE geometry
    Table(TableResult),
}

impl RangeValue {
    /// The scalar, if this is a scalar result
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            RangeValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The sequence, if this is a sequence result
    pub fn as_sequence(&self) -> Option<&[ScalarValue]> {
        match self {
            RangeValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// The table, if this is a table result
    pub fn as_table(&self) -> Option<&TableResult> {
        match self {
            RangeValue::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// A value supplied to a range write
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WriteValue {
    /// One scalar, for SINGLE geometry
    Scalar(ScalarValue),
    /// An ordered sequence, for HORIZONTAL or VERTICAL geometry
    Sequence(Vec<ScalarValue>),
}

impl From<ScalarValue> for WriteValue {
    fn from(v: ScalarValue) -> Self {
        WriteValue::Scalar(v)
    }
}

impl From<f64> for WriteValue {
    fn from(n: f64) -> Self {
        WriteValue::Scalar(ScalarValue::Number(n))
    }
}

impl From<i32> for WriteValue {
    fn from(n: i32) -> Self {
        WriteValue::Scalar(ScalarValue::Number(n as f64))
    }
}

impl From<bool> for WriteValue {
    fn from(b: bool) -> Self {
        WriteValue::Scalar(ScalarValue::Boolean(b))
    }
}

impl From<&str> for WriteValue {
    fn from(s: &str) -> Self {
        WriteValue::Scalar(ScalarValue::Text(s.to_string()))
    }
}

impl From<Vec<ScalarValue>> for WriteValue {
    fn from(values: Vec<ScalarValue>) -> Self {
        WriteValue::Sequence(values)
    }
}

impl From<Vec<f64>> for WriteValue {
    fn from(values: Vec<f64>) -> Self {
        WriteValue::Sequence(values.into_iter().map(ScalarValue::Number).collect())
    }
}

/// Read a classified range into its shape-appropriate typed form
///
/// SINGLE reads one cell; HORIZONTAL reads left-to-right; VERTICAL reads
/// top-to-bottom; TABLE splits the first row off as headers. Any other
/// geometry falls back to the top-left cell, which is `Null` when the sheet
/// never resolved.
pub fn read_range<E: SpreadsheetEngine + ?Sized>(
    engine: &E,
    record: &NamedRangeRecord,
) -> RangeValue {
    let Some(sheet) = record.sheet_index else {
        return RangeValue::Scalar(ScalarValue::Null);
    };

    match record.geometry {
        RangeGeometry::Horizontal => RangeValue::Sequence(
            (record.start_column..=record.end_column)
                .map(|col| read_cell(engine, sheet, record.start_row, col))
                .collect(),
        ),
        RangeGeometry::Vertical => RangeValue::Sequence(
            (record.start_row..=record.end_row)
                .map(|row| read_cell(engine, sheet, row, record.start_column))
                .collect(),
        ),
        RangeGeometry::Table => {
            let read_row = |row: u32| -> Vec<ScalarValue> {
                (record.start_column..=record.end_column)
                    .map(|col| read_cell(engine, sheet, row, col))
                    .collect()
            };

            let headers = read_row(record.start_row);
            let data: Vec<Vec<ScalarValue>> =
                (record.start_row + 1..=record.end_row).map(read_row).collect();

            RangeValue::Table(TableResult {
                data_row_count: record.row_count - 1,
                column_count: record.column_count,
                headers,
                data,
            })
        }
        RangeGeometry::Single | RangeGeometry::Unknown => RangeValue::Scalar(read_cell(
            engine,
            sheet,
            record.start_row,
            record.start_column,
        )),
    }
}

fn read_cell<E: SpreadsheetEngine + ?Sized>(
    engine: &E,
    sheet: usize,
    row: u32,
    col: u16,
) -> ScalarValue {
    coerce(&engine.display_cell_value(sheet, row, col))
}

/// Write a scalar or sequence into a classified range
///
/// SINGLE takes a scalar. HORIZONTAL/VERTICAL take a sequence written along
/// the span: shorter sequences pad the remaining cells with empty, longer
/// ones are truncated to the span. Everything else - sequence into a single
/// cell, scalar into a row or column, any write to TABLE or UNKNOWN
/// geometry - is an array/range mismatch.
///
/// Does not trigger recalculation.
pub fn write_range<E: SpreadsheetEngine + ?Sized>(
    engine: &mut E,
    record: &NamedRangeRecord,
    value: &WriteValue,
) -> Result<()> {
    let mismatch = |expected: &'static str| Error::ShapeMismatch {
        name: record.name.clone(),
        expected,
    };

    let Some(sheet) = record.sheet_index else {
        return Err(mismatch("a resolved range reference"));
    };

    match record.geometry {
        RangeGeometry::Single => match value {
            WriteValue::Scalar(v) => {
                engine.set_cell_input(
                    sheet,
                    record.start_row,
                    record.start_column,
                    &v.to_cell_text(),
                );
                Ok(())
            }
            WriteValue::Sequence(_) => Err(mismatch("a scalar value for a single-cell range")),
        },
        RangeGeometry::Horizontal => match value {
            WriteValue::Sequence(values) => {
                let row = record.start_row;
                let cells = (record.start_column..=record.end_column).map(|col| (row, col));
                write_sequence(engine, sheet, cells, values);
                Ok(())
            }
            WriteValue::Scalar(_) => Err(mismatch("a sequence of values for a row range")),
        },
        RangeGeometry::Vertical => match value {
            WriteValue::Sequence(values) => {
                let col = record.start_column;
                let cells = (record.start_row..=record.end_row).map(|row| (row, col));
                write_sequence(engine, sheet, cells, values);
                Ok(())
            }
            WriteValue::Scalar(_) => Err(mismatch("a sequence of values for a column range")),
        },
        RangeGeometry::Table | RangeGeometry::Unknown => {
            Err(mismatch("a writable input geometry (single cell, row, or column)"))
        }
    }
}

/// Write values along a fixed cell walk: missing values pad with empty text,
/// extra values never get a cell (the walk bounds the write)
fn write_sequence<E, I>(engine: &mut E, sheet: usize, cells: I, values: &[ScalarValue])
where
    E: SpreadsheetEngine + ?Sized,
    I: Iterator<Item = (u32, u16)>,
{
    let mut values = values.iter();
    for (row, col) in cells {
        let text = values.next().map(|v| v.to_cell_text()).unwrap_or_default();
        engine.set_cell_input(sheet, row, col, &text);
    }
}
