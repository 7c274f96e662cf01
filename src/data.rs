//! Data Loading
//!
//! Loads the crop and fertilizer tables from CSV using Polars, normalizes the
//! header names, validates required columns, and converts every row into a
//! typed record. Tables are loaded once and are read-only afterwards.
//!
//! Data values are kept exactly as written: soil types are not trimmed or
//! lowercased, so soil type matching is case-sensitive.

use polars::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use anyhow::{Context, Result};
use std::path::Path;

use crate::errors::DataError;
use crate::types::{CropRecord, FertilizerRecord};
use crate::utils::ColumnIndex;

/// Default crop table file name inside the data directory
pub const CROP_FILE: &str = "Crop_recommendation.csv";

/// Default fertilizer table file name inside the data directory
pub const FERTILIZER_FILE: &str = "Fertilizer Prediction.csv";

/// Required crop columns (normalized names)
pub const CROP_COLUMNS: [&str; 7] = ["n", "p", "k", "temperature", "humidity", "ph", "label"];

/// Required fertilizer columns (normalized names)
pub const FERTILIZER_COLUMNS: [&str; 8] = [
    "n",
    "p",
    "k",
    "temperature",
    "humidity",
    "moisture",
    "soil type",
    "fertilizer name",
];

/// Both lookup tables plus the soil types offered for input
pub struct RecommendationData {
    /// Crop rows in file order
    pub crops: Vec<CropRecord>,

    /// Fertilizer rows in file order
    pub fertilizers: Vec<FertilizerRecord>,

    /// Distinct soil types in order of first appearance
    soil_types: Vec<String>,
}

impl RecommendationData {
    /// Load both tables from `data_dir` using the default file names
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_from(&data_dir.join(CROP_FILE), &data_dir.join(FERTILIZER_FILE))
    }

    /// Load both tables from explicit paths
    pub fn load_from(crop_path: &Path, fertilizer_path: &Path) -> Result<Self> {
        tracing::info!("Loading crop table: {:?}", crop_path);
        let crop_df = read_csv(crop_path)?;

        tracing::info!("Loading fertilizer table: {:?}", fertilizer_path);
        let fertilizer_df = read_csv(fertilizer_path)?;

        let data = Self::from_frames(&crop_df, &fertilizer_df)?;

        tracing::info!("  Crops: {}", data.crops.len());
        tracing::info!("  Fertilizers: {}", data.fertilizers.len());
        tracing::info!("  Soil types: {}", data.soil_types.len());

        Ok(data)
    }

    /// Build from already-read frames
    pub fn from_frames(crop_df: &DataFrame, fertilizer_df: &DataFrame) -> Result<Self> {
        let crops = crops_from_frame(crop_df)?;
        let fertilizers = fertilizers_from_frame(fertilizer_df)?;
        Ok(Self::from_records(crops, fertilizers))
    }

    /// Build from typed records
    pub fn from_records(crops: Vec<CropRecord>, fertilizers: Vec<FertilizerRecord>) -> Self {
        let soil_types = distinct_soil_types(&fertilizers);
        Self {
            crops,
            fertilizers,
            soil_types,
        }
    }

    pub fn soil_types(&self) -> &[String] {
        &self.soil_types
    }

    pub fn has_soil_type(&self, soil_type: &str) -> bool {
        self.soil_types.iter().any(|s| s == soil_type)
    }

    /// Row count per crop label, in order of first appearance
    pub fn crop_label_counts(&self) -> Vec<(String, usize)> {
        count_in_order(self.crops.iter().map(|c| c.label.as_str()))
    }

    /// Row count per fertilizer name, in order of first appearance
    pub fn fertilizer_name_counts(&self) -> Vec<(String, usize)> {
        count_in_order(self.fertilizers.iter().map(|f| f.fertilizer_name.as_str()))
    }
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {:?}", path))
}

/// Convert a crop frame into records
///
/// Rows with a null in any required column are dropped
/// (with a warning); they could never satisfy the match predicate.
pub fn crops_from_frame(df: &DataFrame) -> Result<Vec<CropRecord>> {
    let index = ColumnIndex::require(df, "crop", &CROP_COLUMNS)?;

    let n = index.i64_values(df, "n")?;
    let p = index.i64_values(df, "p")?;
    let k = index.i64_values(df, "k")?;
    let temperature = index.f64_values(df, "temperature")?;
    let humidity = index.f64_values(df, "humidity")?;
    let ph = index.f64_values(df, "ph")?;
    let label = index.str_values(df, "label")?;

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for idx in 0..df.height() {
        match (n[idx], p[idx], k[idx], temperature[idx], humidity[idx], ph[idx], &label[idx]) {
            (Some(n), Some(p), Some(k), Some(temperature), Some(humidity), Some(ph), Some(label)) => {
                records.push(CropRecord {
                    nitrogen: n,
                    phosphorous: p,
                    potassium: k,
                    temperature,
                    humidity,
                    ph,
                    label: label.clone(),
                });
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Crop table: skipped {} row(s) with missing or invalid values", skipped);
    }
    if records.is_empty() && df.height() > 0 {
        return Err(DataError::EmptyTable { table: "crop" }.into());
    }

    Ok(records)
}

/// Convert a fertilizer frame into records
pub fn fertilizers_from_frame(df: &DataFrame) -> Result<Vec<FertilizerRecord>> {
    let index = ColumnIndex::require(df, "fertilizer", &FERTILIZER_COLUMNS)?;

    let n = index.i64_values(df, "n")?;
    let p = index.i64_values(df, "p")?;
    let k = index.i64_values(df, "k")?;
    let moisture = index.f64_values(df, "moisture")?;
    let humidity = index.f64_values(df, "humidity")?;
    let temperature = index.f64_values(df, "temperature")?;
    let soil_type = index.str_values(df, "soil type")?;
    let name = index.str_values(df, "fertilizer name")?;

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for idx in 0..df.height() {
        match (
            n[idx],
            p[idx],
            k[idx],
            moisture[idx],
            humidity[idx],
            temperature[idx],
            &soil_type[idx],
            &name[idx],
        ) {
            (
                Some(n),
                Some(p),
                Some(k),
                Some(moisture),
                Some(humidity),
                Some(temperature),
                Some(soil_type),
                Some(name),
            ) => {
                records.push(FertilizerRecord {
                    nitrogen: n,
                    phosphorous: p,
                    potassium: k,
                    moisture,
                    humidity,
                    temperature,
                    soil_type: soil_type.clone(),
                    fertilizer_name: name.clone(),
                });
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Fertilizer table: skipped {} row(s) with missing or invalid values", skipped);
    }
    if records.is_empty() && df.height() > 0 {
        return Err(DataError::EmptyTable { table: "fertilizer" }.into());
    }

    Ok(records)
}

fn distinct_soil_types(fertilizers: &[FertilizerRecord]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    fertilizers
        .iter()
        .filter(|f| seen.insert(f.soil_type.as_str()))
        .map(|f| f.soil_type.clone())
        .collect()
}

fn count_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    counts
}
