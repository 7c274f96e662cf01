//! Typed records and queries
//!
//! Records are built once by the loader (`data.rs`) and never mutated.
//! Queries are transient, one per prediction request.

use serde::{Deserialize, Serialize};

/// One row of the crop table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub nitrogen: i64,
    pub phosphorous: i64,
    pub potassium: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub label: String,
}

/// One row of the fertilizer table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerRecord {
    pub nitrogen: i64,
    pub phosphorous: i64,
    pub potassium: i64,
    pub moisture: f64,
    pub humidity: f64,
    pub temperature: f64,
    pub soil_type: String,
    pub fertilizer_name: String,
}

/// Crop lookup: exact N/P/K, tolerance on temperature, humidity and pH
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropQuery {
    pub n: i64,
    pub p: i64,
    pub k: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
}

/// Fertilizer lookup: exact N/P/K and soil type, tolerance on the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerQuery {
    pub n: i64,
    pub p: i64,
    pub k: i64,
    pub moisture: f64,
    pub humidity: f64,
    pub temperature: f64,
    pub soil_type: String,
}

/// User-facing prediction request
///
/// Mirrors the input form: every field has the form's default value, so a
/// partial JSON body is accepted. Rainfall is collected and range-checked
/// but neither matcher uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub nitrogen: i64,
    pub phosphorous: i64,
    pub potassium: i64,
    pub ph: f64,
    pub moisture: f64,
    pub soil_type: String,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 60.0,
            rainfall: 100.0,
            nitrogen: 50,
            phosphorous: 50,
            potassium: 50,
            ph: 6.5,
            moisture: 50.0,
            soil_type: String::new(),
        }
    }
}

impl PredictionRequest {
    pub fn crop_query(&self) -> CropQuery {
        CropQuery {
            n: self.nitrogen,
            p: self.phosphorous,
            k: self.potassium,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.ph,
        }
    }

    pub fn fertilizer_query(&self) -> FertilizerQuery {
        FertilizerQuery {
            n: self.nitrogen,
            p: self.phosphorous,
            k: self.potassium,
            moisture: self.moisture,
            humidity: self.humidity,
            temperature: self.temperature,
            soil_type: self.soil_type.clone(),
        }
    }
}
