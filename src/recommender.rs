//! Recommender - coordinator for crop and fertilizer lookups
//!
//! Owns the immutable tables, validates user input, and runs both matchers.
//! Includes both sequential and parallel (Rayon) implementations; the two
//! scans are independent, so both produce identical results.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chart::FactorChart;
use crate::data::RecommendationData;
use crate::errors::InputError;
use crate::matcher::{recommend_crop, recommend_fertilizer, NO_CROP_MATCH, NO_FERTILIZER_MATCH};
use crate::types::{CropQuery, FertilizerQuery, PredictionRequest};
use crate::utils::InputRanges;

/// Result of one prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Crop label, or the crop "no match" sentinel
    pub crop: String,
    /// Fertilizer name, or the fertilizer "no match" sentinel
    pub fertilizer: String,
    pub factors: FactorChart,
}

impl Recommendation {
    pub fn crop_matched(&self) -> bool {
        self.crop != NO_CROP_MATCH
    }

    pub fn fertilizer_matched(&self) -> bool {
        self.fertilizer != NO_FERTILIZER_MATCH
    }
}

pub struct Recommender {
    data: RecommendationData,
    ranges: InputRanges,
}

impl Recommender {
    pub fn new(data: RecommendationData, ranges: InputRanges) -> Self {
        Self { data, ranges }
    }

    /// Load both tables from `data_dir` with default input ranges
    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        let data = RecommendationData::load(data_dir)?;
        Ok(Self::new(data, InputRanges::default()))
    }

    pub fn data(&self) -> &RecommendationData {
        &self.data
    }

    pub fn ranges(&self) -> &InputRanges {
        &self.ranges
    }

    pub fn soil_types(&self) -> &[String] {
        self.data.soil_types()
    }

    /// Reject out-of-range values and soil types absent from the fertilizer table
    pub fn validate(&self, request: &PredictionRequest) -> Result<(), InputError> {
        self.ranges.validate(request)?;
        if !self.data.has_soil_type(&request.soil_type) {
            return Err(InputError::UnknownSoilType(request.soil_type.clone()));
        }
        Ok(())
    }

    /// Crop lookup without input validation
    pub fn crop(&self, query: &CropQuery) -> &str {
        recommend_crop(query, &self.data.crops)
    }

    /// Fertilizer lookup without input validation
    pub fn fertilizer(&self, query: &FertilizerQuery) -> &str {
        recommend_fertilizer(query, &self.data.fertilizers)
    }

    /// Validate the request, then run both lookups one after the other
    pub fn recommend(&self, request: &PredictionRequest) -> Result<Recommendation, InputError> {
        self.validate(request)?;

        let crop = self.crop(&request.crop_query());
        let fertilizer = self.fertilizer(&request.fertilizer_query());

        tracing::debug!(crop, fertilizer, "Recommendation computed");

        Ok(Recommendation {
            crop: crop.to_string(),
            fertilizer: fertilizer.to_string(),
            factors: FactorChart::from_request(request),
        })
    }

    /// Same as [`Recommender::recommend`], with both scans run via `rayon::join`
    pub fn recommend_parallel(&self, request: &PredictionRequest) -> Result<Recommendation, InputError> {
        self.validate(request)?;

        let crop_query = request.crop_query();
        let fertilizer_query = request.fertilizer_query();

        let (crop, fertilizer) = rayon::join(
            || self.crop(&crop_query),
            || self.fertilizer(&fertilizer_query),
        );

        tracing::debug!(crop, fertilizer, "Recommendation computed (parallel)");

        Ok(Recommendation {
            crop: crop.to_string(),
            fertilizer: fertilizer.to_string(),
            factors: FactorChart::from_request(request),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CropRecord, FertilizerRecord};

    fn recommender() -> Recommender {
        let crops = vec![
            CropRecord {
                nitrogen: 90,
                phosphorous: 42,
                potassium: 43,
                temperature: 21.0,
                humidity: 80.0,
                ph: 6.5,
                label: "rice".to_string(),
            },
            CropRecord {
                nitrogen: 37,
                phosphorous: 0,
                potassium: 0,
                temperature: 26.0,
                humidity: 52.0,
                ph: 6.8,
                label: "maize".to_string(),
            },
        ];
        let fertilizers = vec![
            FertilizerRecord {
                nitrogen: 37,
                phosphorous: 0,
                potassium: 0,
                moisture: 38.0,
                humidity: 52.0,
                temperature: 26.0,
                soil_type: "Sandy".to_string(),
                fertilizer_name: "Urea".to_string(),
            },
            FertilizerRecord {
                nitrogen: 12,
                phosphorous: 36,
                potassium: 0,
                moisture: 45.0,
                humidity: 52.0,
                temperature: 29.0,
                soil_type: "Loamy".to_string(),
                fertilizer_name: "DAP".to_string(),
            },
        ];

        Recommender::new(
            RecommendationData::from_records(crops, fertilizers),
            InputRanges::default(),
        )
    }

    fn request(n: i64, p: i64, k: i64, soil: &str) -> PredictionRequest {
        PredictionRequest {
            nitrogen: n,
            phosphorous: p,
            potassium: k,
            temperature: 26.0,
            humidity: 52.0,
            ph: 6.8,
            moisture: 38.0,
            soil_type: soil.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_both_match() {
        let rec = recommender().recommend(&request(37, 0, 0, "Sandy")).unwrap();

        assert_eq!(rec.crop, "maize");
        assert_eq!(rec.fertilizer, "Urea");
        assert!(rec.crop_matched());
        assert!(rec.fertilizer_matched());
        assert_eq!(rec.factors.factors.len(), 7);
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let rec = recommender().recommend(&request(50, 50, 50, "Loamy")).unwrap();

        assert_eq!(rec.crop, NO_CROP_MATCH);
        assert_eq!(rec.fertilizer, NO_FERTILIZER_MATCH);
        assert!(!rec.crop_matched());
        assert!(!rec.fertilizer_matched());
    }

    #[test]
    fn test_lookups_are_independent() {
        // Crop matches, fertilizer does not (soil type differs)
        let rec = recommender().recommend(&request(37, 0, 0, "Loamy")).unwrap();

        assert_eq!(rec.crop, "maize");
        assert_eq!(rec.fertilizer, NO_FERTILIZER_MATCH);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let r = recommender();
        for req in [
            request(37, 0, 0, "Sandy"),
            request(37, 0, 0, "Loamy"),
            request(90, 42, 43, "Sandy"),
            request(1, 2, 3, "Loamy"),
        ] {
            assert_eq!(r.recommend(&req).unwrap(), r.recommend_parallel(&req).unwrap());
        }
    }

    #[test]
    fn test_unknown_soil_type_rejected() {
        let err = recommender().recommend(&request(37, 0, 0, "sandy")).unwrap_err();
        assert_eq!(err, InputError::UnknownSoilType("sandy".to_string()));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut req = request(37, 0, 0, "Sandy");
        req.temperature = 55.0;

        let err = recommender().recommend_parallel(&req).unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { field: "temperature", .. }));
    }

    #[test]
    fn test_direct_queries_skip_validation() {
        let r = recommender();
        let query = CropQuery {
            n: 90,
            p: 42,
            k: 43,
            temperature: 20.9,
            humidity: 82.0,
            ph: 6.5,
        };
        assert_eq!(r.crop(&query), "rice");
    }
}
