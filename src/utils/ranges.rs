//! Input Ranges
//!
//! Allowed value ranges for every field of a prediction request. Defaults
//! match the input form (temperature 0-50 °C, humidity 0-100 %, rainfall
//! 0-300 mm, N/P/K 0-100, pH 0-14, moisture 0-100 %). A JSON file may
//! override any subset of them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

use crate::errors::InputError;
use crate::types::PredictionRequest;

/// Inclusive `[min, max]` bounds for one field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &'static str, value: f64) -> Result<(), InputError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(InputError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    pub temperature: Bounds,
    pub humidity: Bounds,
    pub rainfall: Bounds,
    pub nitrogen: Bounds,
    pub phosphorous: Bounds,
    pub potassium: Bounds,
    pub ph: Bounds,
    pub moisture: Bounds,
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            temperature: Bounds::new(0.0, 50.0),
            humidity: Bounds::new(0.0, 100.0),
            rainfall: Bounds::new(0.0, 300.0),
            nitrogen: Bounds::new(0.0, 100.0),
            phosphorous: Bounds::new(0.0, 100.0),
            potassium: Bounds::new(0.0, 100.0),
            ph: Bounds::new(0.0, 14.0),
            moisture: Bounds::new(0.0, 100.0),
        }
    }
}

impl InputRanges {
    /// Load ranges from a JSON file; fields absent from the file keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input ranges file: {:?}", path))?;

        let ranges: InputRanges = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse input ranges JSON")?;

        for (name, bounds) in ranges.fields() {
            if bounds.min > bounds.max {
                anyhow::bail!("Input range for '{}' has min {} > max {}", name, bounds.min, bounds.max);
            }
        }

        Ok(ranges)
    }

    fn fields(&self) -> [(&'static str, Bounds); 8] {
        [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("rainfall", self.rainfall),
            ("nitrogen", self.nitrogen),
            ("phosphorous", self.phosphorous),
            ("potassium", self.potassium),
            ("ph", self.ph),
            ("moisture", self.moisture),
        ]
    }

    /// Check every numeric field of a request; the first violation is returned
    pub fn validate(&self, request: &PredictionRequest) -> Result<(), InputError> {
        self.temperature.check("temperature", request.temperature)?;
        self.humidity.check("humidity", request.humidity)?;
        self.rainfall.check("rainfall", request.rainfall)?;
        self.nitrogen.check("nitrogen", request.nitrogen as f64)?;
        self.phosphorous.check("phosphorous", request.phosphorous as f64)?;
        self.potassium.check("potassium", request.potassium as f64)?;
        self.ph.check("ph", request.ph)?;
        self.moisture.check("moisture", request.moisture)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_accept_form_defaults() {
        let ranges = InputRanges::default();
        assert!(ranges.validate(&PredictionRequest::default()).is_ok());
    }

    #[test]
    fn test_boundaries_inclusive() {
        let ranges = InputRanges::default();
        let req = PredictionRequest {
            temperature: 50.0,
            humidity: 0.0,
            rainfall: 300.0,
            nitrogen: 100,
            phosphorous: 0,
            potassium: 100,
            ph: 14.0,
            moisture: 100.0,
            ..Default::default()
        };
        assert!(ranges.validate(&req).is_ok());
    }

    #[test]
    fn test_out_of_range_reports_field() {
        let ranges = InputRanges::default();
        let req = PredictionRequest {
            ph: 14.5,
            ..Default::default()
        };

        let err = ranges.validate(&req).unwrap_err();
        assert_eq!(
            err,
            InputError::OutOfRange { field: "ph", value: 14.5, min: 0.0, max: 14.0 }
        );
        assert!(err.to_string().contains("ph = 14.5"));
    }

    #[test]
    fn test_negative_nitrogen_rejected() {
        let ranges = InputRanges::default();
        let req = PredictionRequest {
            nitrogen: -1,
            ..Default::default()
        };
        assert!(matches!(
            ranges.validate(&req),
            Err(InputError::OutOfRange { field: "nitrogen", .. })
        ));
    }

    #[test]
    fn test_partial_json_override() {
        let json = r#"{ "nitrogen": { "min": 0.0, "max": 140.0 } }"#;
        let ranges: InputRanges = serde_json::from_str(json).unwrap();

        assert_eq!(ranges.nitrogen, Bounds::new(0.0, 140.0));
        assert_eq!(ranges.ph, Bounds::new(0.0, 14.0));
    }
}
