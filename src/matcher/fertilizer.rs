//! Fertilizer matcher
//!
//! Predicate (all must hold):
//!   - nitrogen, phosphorous, potassium equal to the query
//!   - moisture within ±10 %
//!   - humidity within ±10 %
//!   - temperature within ±5 °C
//!   - soil type equal to the query (case-sensitive)

use super::{within_tolerance, HUMIDITY_TOLERANCE, MOISTURE_TOLERANCE, TEMPERATURE_TOLERANCE};
use crate::types::{FertilizerQuery, FertilizerRecord};

/// Returned by [`recommend_fertilizer`] when no row qualifies
pub const NO_FERTILIZER_MATCH: &str = "No suitable fertilizer found.";

fn matches(record: &FertilizerRecord, query: &FertilizerQuery) -> bool {
    record.nitrogen == query.n
        && record.phosphorous == query.p
        && record.potassium == query.k
        && within_tolerance(record.moisture, query.moisture, MOISTURE_TOLERANCE)
        && within_tolerance(record.humidity, query.humidity, HUMIDITY_TOLERANCE)
        && within_tolerance(record.temperature, query.temperature, TEMPERATURE_TOLERANCE)
        && record.soil_type == query.soil_type
}

/// First fertilizer row satisfying the predicate, if any
pub fn find_fertilizer<'a>(
    query: &FertilizerQuery,
    table: &'a [FertilizerRecord],
) -> Option<&'a FertilizerRecord> {
    table.iter().find(|record| matches(record, query))
}

/// Name of the first matching fertilizer row, or [`NO_FERTILIZER_MATCH`]
pub fn recommend_fertilizer<'a>(query: &FertilizerQuery, table: &'a [FertilizerRecord]) -> &'a str {
    find_fertilizer(query, table)
        .map(|record| record.fertilizer_name.as_str())
        .unwrap_or(NO_FERTILIZER_MATCH)
}
