//! Error types for conversion, indexing and parsing failures.

use crate::value::Type;
use thiserror::Error;

/// A [`Value`](crate::Value) could not satisfy a requested type.
///
/// Returned by `convert`, the container accessors, promoting index access,
/// `push` and `insert`. The source value is never modified when this error is
/// produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {from} to {to}")]
pub struct ConversionError {
    /// Active variant of the value the operation was attempted on.
    pub from: Type,
    /// Name of the requested target (`"i64"`, `"array"`, ...).
    pub to: &'static str,
}

impl ConversionError {
    pub(crate) fn new(from: Type, to: &'static str) -> Self {
        Self { from, to }
    }
}

/// The input was not valid JSON.
///
/// `line` and `column` are 1-based and point at the offending character. A
/// column counts Unicode scalar values, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Any error produced by jsonkit-core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Convenience alias used throughout jsonkit-core.
pub type Result<T> = std::result::Result<T, Error>;
