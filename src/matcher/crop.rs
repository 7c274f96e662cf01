//! Crop matcher
//!
//! Predicate (all must hold):
//!   - nitrogen, phosphorous, potassium equal to the query
//!   - temperature within ±5 °C
//!   - humidity within ±10 %
//!   - pH within ±0.5
//!
//! First qualifying row wins; table order is the tie-break.

use super::{within_tolerance, HUMIDITY_TOLERANCE, PH_TOLERANCE, TEMPERATURE_TOLERANCE};
use crate::types::{CropQuery, CropRecord};

/// Returned by [`recommend_crop`] when no row qualifies
pub const NO_CROP_MATCH: &str = "No exact match found, adjust parameters.";

fn matches(record: &CropRecord, query: &CropQuery) -> bool {
    record.nitrogen == query.n
        && record.phosphorous == query.p
        && record.potassium == query.k
        && within_tolerance(record.temperature, query.temperature, TEMPERATURE_TOLERANCE)
        && within_tolerance(record.humidity, query.humidity, HUMIDITY_TOLERANCE)
        && within_tolerance(record.ph, query.ph, PH_TOLERANCE)
}

/// First crop row satisfying the predicate, if any
pub fn find_crop<'a>(query: &CropQuery, table: &'a [CropRecord]) -> Option<&'a CropRecord> {
    table.iter().find(|record| matches(record, query))
}

/// Label of the first matching crop row, or [`NO_CROP_MATCH`]
pub fn recommend_crop<'a>(query: &CropQuery, table: &'a [CropRecord]) -> &'a str {
    find_crop(query, table)
        .map(|record| record.label.as_str())
        .unwrap_or(NO_CROP_MATCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: i64, p: i64, k: i64, temperature: f64, humidity: f64, ph: f64, label: &str) -> CropRecord {
        CropRecord {
            nitrogen: n,
            phosphorous: p,
            potassium: k,
            temperature,
            humidity,
            ph,
            label: label.to_string(),
        }
    }

    fn query(n: i64, p: i64, k: i64, temperature: f64, humidity: f64, ph: f64) -> CropQuery {
        CropQuery { n, p, k, temperature, humidity, ph }
    }

    #[test]
    fn test_rice_scenario() {
        let table = vec![
            row(85, 58, 41, 21.77, 80.31, 7.03, "rice"),
            row(90, 42, 43, 21.0, 80.0, 6.5, "rice"),
        ];

        let q = query(90, 42, 43, 20.9, 82.0, 6.5);
        assert_eq!(recommend_crop(&q, &table), "rice");
    }

    #[test]
    fn test_no_npk_match_returns_sentinel() {
        let table = vec![
            row(90, 42, 43, 21.0, 80.0, 6.5, "rice"),
            row(20, 67, 19, 22.0, 20.0, 5.9, "kidneybeans"),
        ];

        let q = query(10, 10, 10, 25.0, 50.0, 7.0);
        assert_eq!(recommend_crop(&q, &table), NO_CROP_MATCH);
        assert_eq!(recommend_crop(&q, &table), "No exact match found, adjust parameters.");
    }

    #[test]
    fn test_empty_table() {
        let q = query(90, 42, 43, 20.9, 82.0, 6.5);
        assert_eq!(recommend_crop(&q, &[]), NO_CROP_MATCH);
        assert!(find_crop(&q, &[]).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = vec![
            row(40, 40, 40, 24.0, 60.0, 6.4, "maize"),
            row(40, 40, 40, 25.0, 60.0, 6.5, "cotton"),
        ];

        // Second row is the closer one, but table order decides
        let q = query(40, 40, 40, 25.0, 60.0, 6.5);
        assert_eq!(recommend_crop(&q, &table), "maize");

        let reversed: Vec<_> = table.into_iter().rev().collect();
        assert_eq!(recommend_crop(&q, &reversed), "cotton");
    }

    #[test]
    fn test_npk_must_be_exact() {
        let table = vec![row(90, 42, 43, 21.0, 80.0, 6.5, "rice")];

        assert_eq!(recommend_crop(&query(91, 42, 43, 21.0, 80.0, 6.5), &table), NO_CROP_MATCH);
        assert_eq!(recommend_crop(&query(90, 41, 43, 21.0, 80.0, 6.5), &table), NO_CROP_MATCH);
        assert_eq!(recommend_crop(&query(90, 42, 44, 21.0, 80.0, 6.5), &table), NO_CROP_MATCH);
    }

    #[test]
    fn test_temperature_boundary() {
        let table = vec![row(50, 50, 50, 25.0, 60.0, 6.5, "jute")];

        assert_eq!(recommend_crop(&query(50, 50, 50, 20.0, 60.0, 6.5), &table), "jute");
        assert_eq!(recommend_crop(&query(50, 50, 50, 30.0, 60.0, 6.5), &table), "jute");

        let just_outside = vec![row(50, 50, 50, 25.0001, 60.0, 6.5, "jute")];
        assert_eq!(recommend_crop(&query(50, 50, 50, 20.0, 60.0, 6.5), &just_outside), NO_CROP_MATCH);
    }

    #[test]
    fn test_humidity_boundary() {
        let table = vec![row(50, 50, 50, 25.0, 70.0, 6.5, "jute")];

        assert_eq!(recommend_crop(&query(50, 50, 50, 25.0, 60.0, 6.5), &table), "jute");
        assert_eq!(recommend_crop(&query(50, 50, 50, 25.0, 80.0, 6.5), &table), "jute");
        assert_eq!(recommend_crop(&query(50, 50, 50, 25.0, 59.9, 6.5), &table), NO_CROP_MATCH);
    }

    #[test]
    fn test_ph_boundary() {
        let table = vec![row(50, 50, 50, 25.0, 60.0, 7.0, "jute")];

        assert_eq!(recommend_crop(&query(50, 50, 50, 25.0, 60.0, 6.5), &table), "jute");
        assert_eq!(recommend_crop(&query(50, 50, 50, 25.0, 60.0, 7.5), &table), "jute");
        assert_eq!(recommend_crop(&query(50, 50, 50, 25.0, 60.0, 6.4), &table), NO_CROP_MATCH);
    }

    #[test]
    fn test_find_crop_returns_record() {
        let table = vec![
            row(10, 10, 10, 30.0, 90.0, 6.0, "coconut"),
            row(90, 42, 43, 21.0, 80.0, 6.5, "rice"),
        ];

        let found = find_crop(&query(90, 42, 43, 20.9, 82.0, 6.5), &table).unwrap();
        assert_eq!(found, &table[1]);
    }
}
