//! Utility modules
//!
//! - Columns: header normalization, required-column validation, typed extraction
//! - Ranges: allowed input ranges for prediction requests

pub mod columns;
pub mod ranges;

// Re-export commonly used types
pub use columns::{normalize_column_name, ColumnIndex};
pub use ranges::{Bounds, InputRanges};
