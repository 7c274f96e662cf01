//! Column helpers for loaded CSV frames
//!
//! Header names are normalized (trim + lowercase) once, then every required
//! column is validated up front so a missing column fails the load instead
//! of surfacing later as a silent non-match.

use polars::prelude::*;
use rustc_hash::FxHashMap;
use anyhow::{Context, Result};

use crate::errors::DataError;

/// Trim surrounding whitespace and lowercase a header name
///
/// `" Fertilizer Name "` becomes `"fertilizer name"`.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized header name → name as written in the file
pub struct ColumnIndex {
    table: &'static str,
    names: FxHashMap<String, String>,
}

impl ColumnIndex {
    /// Index the frame's headers and check every required column is present
    ///
    /// When two headers normalize to the same name, the first one wins.
    pub fn require(df: &DataFrame, table: &'static str, required: &[&str]) -> Result<Self> {
        let mut names = FxHashMap::default();
        for raw in df.get_column_names() {
            let raw = raw.as_str().to_string();
            names.entry(normalize_column_name(&raw)).or_insert(raw);
        }

        for &expected in required {
            if !names.contains_key(expected) {
                let mut available: Vec<String> = names.keys().cloned().collect();
                available.sort();
                return Err(DataError::MissingColumn {
                    table,
                    column: expected.to_string(),
                    available,
                }
                .into());
            }
        }

        Ok(Self { table, names })
    }

    /// Name of a normalized column as it appears in the frame
    pub fn raw_name(&self, normalized: &str) -> Result<&str> {
        self.names
            .get(normalized)
            .map(|s| s.as_str())
            .ok_or_else(|| {
                DataError::MissingColumn {
                    table: self.table,
                    column: normalized.to_string(),
                    available: self.names.keys().cloned().collect(),
                }
                .into()
            })
    }

    /// Column values as floats
    ///
    /// Null cells become `None`. A cell that is present but cannot be read as
    /// a number fails the whole column with `InvalidColumnType`.
    pub fn f64_values(&self, df: &DataFrame, normalized: &str) -> Result<Vec<Option<f64>>> {
        let raw = self.raw_name(normalized)?;
        let casted = df
            .column(raw)
            .with_context(|| format!("{}: Column '{}' not found", self.table, raw))?
            .strict_cast(&DataType::Float64)
            .map_err(|_| self.invalid(normalized, "float"))?;

        let values = casted
            .f64()
            .map_err(|_| self.invalid(normalized, "float"))?
            .into_iter()
            .collect();

        Ok(values)
    }

    /// Column values as integers
    ///
    /// Floats with a fractional part become `None`: they can never equal an
    /// integer query value.
    pub fn i64_values(&self, df: &DataFrame, normalized: &str) -> Result<Vec<Option<i64>>> {
        let values = self
            .f64_values(df, normalized)?
            .into_iter()
            .map(|opt| opt.filter(|v| v.fract() == 0.0).map(|v| v as i64))
            .collect();

        Ok(values)
    }

    /// Column values as strings, exactly as written (no trimming or case folding)
    pub fn str_values(&self, df: &DataFrame, normalized: &str) -> Result<Vec<Option<String>>> {
        let raw = self.raw_name(normalized)?;
        let casted = df
            .column(raw)
            .with_context(|| format!("{}: Column '{}' not found", self.table, raw))?
            .strict_cast(&DataType::String)
            .map_err(|_| self.invalid(normalized, "string"))?;

        let values = casted
            .str()
            .map_err(|_| self.invalid(normalized, "string"))?
            .into_iter()
            .map(|opt| opt.map(|s| s.to_string()))
            .collect();

        Ok(values)
    }

    fn invalid(&self, normalized: &str, expected: &'static str) -> anyhow::Error {
        DataError::InvalidColumnType {
            table: self.table,
            column: normalized.to_string(),
            expected,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name(" N "), "n");
        assert_eq!(normalize_column_name("Soil Type"), "soil type");
        assert_eq!(normalize_column_name("Humidity "), "humidity");
        assert_eq!(normalize_column_name("ph"), "ph");
    }

    #[test]
    fn test_require_success_with_messy_headers() {
        let df = df![
            " N" => &[90i64, 85],
            "Label " => &["rice", "maize"],
            "extra_col" => &["e1", "e2"],
        ].unwrap();

        let index = ColumnIndex::require(&df, "crop", &["n", "label"]).unwrap();
        assert_eq!(index.raw_name("n").unwrap(), " N");
        assert_eq!(index.raw_name("label").unwrap(), "Label ");
    }

    #[test]
    fn test_require_missing_column() {
        let df = df![
            "n" => &[1i64],
        ].unwrap();

        let result = ColumnIndex::require(&df, "crop", &["n", "label"]);

        assert!(result.is_err());
        let err_msg = result.err().unwrap().to_string();
        assert!(err_msg.contains("label"));
        assert!(err_msg.contains("crop"));
    }

    #[test]
    fn test_i64_values_from_float_column() {
        let df = df![
            "n" => &[Some(90.0f64), Some(42.5), None],
        ].unwrap();

        let index = ColumnIndex::require(&df, "crop", &["n"]).unwrap();
        let values = index.i64_values(&df, "n").unwrap();
        assert_eq!(values, vec![Some(90), None, None]);
    }

    #[test]
    fn test_f64_values_from_numeric_text() {
        let df = df![
            "ph" => &[Some("6.5"), None],
        ].unwrap();

        let index = ColumnIndex::require(&df, "crop", &["ph"]).unwrap();
        let values = index.f64_values(&df, "ph").unwrap();
        assert_eq!(values, vec![Some(6.5), None]);
    }

    #[test]
    fn test_text_in_numeric_column_is_rejected() {
        let df = df![
            "n" => &["90", "abc"],
        ].unwrap();

        let index = ColumnIndex::require(&df, "crop", &["n"]).unwrap();
        let err = index.i64_values(&df, "n").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::InvalidColumnType { column, expected: "float", .. }) if column == "n"
        ));
        assert!(err.to_string().contains("could not be read as float"));
    }

    #[test]
    fn test_f64_values_from_int_column() {
        let df = df![
            "temperature" => &[20i64, 31],
        ].unwrap();

        let index = ColumnIndex::require(&df, "crop", &["temperature"]).unwrap();
        let values = index.f64_values(&df, "temperature").unwrap();
        assert_eq!(values, vec![Some(20.0), Some(31.0)]);
    }

    #[test]
    fn test_str_values_keep_case() {
        let df = df![
            "Soil Type" => &["Sandy", "loamy"],
        ].unwrap();

        let index = ColumnIndex::require(&df, "fertilizer", &["soil type"]).unwrap();
        let values = index.str_values(&df, "soil type").unwrap();
        assert_eq!(values, vec![Some("Sandy".to_string()), Some("loamy".to_string())]);
    }
}
