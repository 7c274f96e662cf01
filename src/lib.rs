//! Crop & Fertilizer Recommendation
//!
//! Suggests a crop and a fertilizer for a set of environmental measurements
//! by filtering two static CSV tables, and charts the measured factors.
//!
//! - `data`: Table loading with Polars (header normalization, typed records)
//! - `matcher/`: Crop and fertilizer first-match lookups
//! - `recommender`: Input validation and both lookups per request
//! - `chart`: Environmental factor chart (SVG / text)
//! - `utils/`: Column helpers and input ranges
//! - `api_server`: Axum HTTP API (feature `api`)

pub mod types;
pub mod errors;
pub mod utils;
pub mod data;
pub mod matcher;
pub mod chart;
pub mod recommender;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use types::{CropQuery, CropRecord, FertilizerQuery, FertilizerRecord, PredictionRequest};
pub use errors::{DataError, InputError};
pub use utils::InputRanges;
pub use data::RecommendationData;
pub use matcher::{
    find_crop, find_fertilizer, recommend_crop, recommend_fertilizer, NO_CROP_MATCH,
    NO_FERTILIZER_MATCH,
};
pub use chart::FactorChart;
pub use recommender::{Recommendation, Recommender};

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
