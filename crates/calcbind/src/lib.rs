//! # calcbind
//!
//! Maps a calculation workbook's named ranges to a typed input/output
//! contract: discovers defined names through a [`SpreadsheetEngine`],
//! classifies each by geometry and role, and performs shape-aware typed
//! reads and writes so callers never touch cell coordinates.
//!
//! The formula engine itself (cell storage, dependency graph, evaluation,
//! file I/O) is an external collaborator behind the [`SpreadsheetEngine`]
//! trait.
//!
//! ## Example
//!
//! ```rust,ignore
//! use calcbind::WorkbookBinding;
//!
//! let mut binding = WorkbookBinding::new(engine);
//!
//! binding.set_inputs([
//!     ("LoanAmount", 250_000.0),
//!     ("InterestRate", 0.065),
//! ])?;
//! binding.recalculate();
//!
//! let dscr = binding.read_output("DSCR")?;
//! ```

pub mod binding;
pub mod cache;
pub mod classify;
pub mod engine;
pub mod error;
pub mod io;

// Re-exports for convenience
pub use binding::WorkbookBinding;
pub use cache::ClassificationCache;
pub use classify::{
    classify_name, classify_workbook, ClassificationSet, NamedRangeRecord, RangeRole,
};
pub use engine::{DefinedName, SpreadsheetEngine};
pub use error::{Error, Result};
pub use io::{read_range, write_range, RangeValue, TableResult, WriteValue};

// Re-export core types
pub use calcbind_core::{
    classify_geometry, coerce, column_to_letters, letters_to_column, parse_reference,
    ParsedReference, RangeGeometry, ScalarValue, ERROR_SENTINELS, MAX_COLS, MAX_ROWS,
};
