//! # calcbind-core
//!
//! Core types for binding a calculation workbook's named ranges to a typed
//! input/output contract.
//!
//! This crate provides the pure, engine-independent pieces:
//! - [`parse_reference`] and [`ParsedReference`] - A1-style reference parsing
//! - [`letters_to_column`] / [`column_to_letters`] - column-letter arithmetic
//! - [`classify_geometry`] and [`RangeGeometry`] - range shape classification
//! - [`coerce`] and [`ScalarValue`] - raw cell text to scalar value coercion
//!
//! ## Example
//!
//! ```rust
//! use calcbind_core::{classify_geometry, coerce, parse_reference, RangeGeometry, ScalarValue};
//!
//! let parsed = parse_reference("Input!$C$60:$C$63").unwrap();
//! assert_eq!(classify_geometry(Some(&parsed)), RangeGeometry::Vertical);
//!
//! assert_eq!(coerce("123.45"), ScalarValue::Number(123.45));
//! assert_eq!(coerce("#DIV/0!"), ScalarValue::Null);
//! ```

pub mod geometry;
pub mod reference;
pub mod value;

// Re-exports for convenience
pub use geometry::{classify_geometry, RangeGeometry};
pub use reference::{column_to_letters, letters_to_column, parse_reference, ParsedReference};
pub use value::{coerce, ScalarValue, ERROR_SENTINELS};

/// Maximum row number in a worksheet, 1-based (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum column number in a worksheet, 1-based (Excel limit)
pub const MAX_COLS: u16 = 16_384;
