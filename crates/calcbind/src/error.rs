//! Error types for calcbind

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by named-range lookups and range writes
///
/// Parse and sheet-resolution failures are not errors: they are absorbed
/// into the UNKNOWN classification partition. Only lookup and shape
/// failures reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A name was requested from the inputs partition but is not there
    #[error("Named input not found: {0}")]
    InputNotFound(String),

    /// A name was requested from the outputs partition but is not there
    #[error("Named output not found: {0}")]
    OutputNotFound(String),

    /// The supplied value does not fit the record's geometry
    #[error("Array/range mismatch for '{name}': expected {expected}")]
    ShapeMismatch {
        /// Name of the offending named range
        name: String,
        /// What the geometry required
        expected: &'static str,
    },
}
