//! Typed error conditions
//!
//! Structural faults in the loaded tables surface as [`DataError`] (wrapped
//! in `anyhow` with file context by the loader). Out-of-range user input
//! surfaces as [`InputError`]. A lookup with no matching row is neither: it
//! is reported with a sentinel string.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("{table} table: missing required column '{column}'. Available columns: {available:?}")]
    MissingColumn {
        table: &'static str,
        column: String,
        available: Vec<String>,
    },

    #[error("{table} table: column '{column}' could not be read as {expected}")]
    InvalidColumnType {
        table: &'static str,
        column: String,
        expected: &'static str,
    },

    #[error("{table} table contains no usable rows")]
    EmptyTable { table: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown soil type '{0}'")]
    UnknownSoilType(String),
}
