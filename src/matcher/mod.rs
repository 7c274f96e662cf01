//! Table matchers
//!
//! Each matcher scans its table once, in stored order, and returns the first
//! row satisfying a tolerance-bounded predicate: exact equality on N, P and K
//! (and soil type for fertilizers), inclusive `target ± delta` ranges on the
//! climate fields.
//!
//! A query with no qualifying row is a normal outcome. It is reported with a
//! fixed sentinel string that callers may compare against.

pub mod crop;
pub mod fertilizer;

pub use crop::{find_crop, recommend_crop, NO_CROP_MATCH};
pub use fertilizer::{find_fertilizer, recommend_fertilizer, NO_FERTILIZER_MATCH};

/// Temperature tolerance in °C (both tables)
pub const TEMPERATURE_TOLERANCE: f64 = 5.0;

/// Relative humidity tolerance in % (both tables)
pub const HUMIDITY_TOLERANCE: f64 = 10.0;

/// Soil pH tolerance (crop table)
pub const PH_TOLERANCE: f64 = 0.5;

/// Soil moisture tolerance in % (fertilizer table)
pub const MOISTURE_TOLERANCE: f64 = 10.0;

/// Inclusive range check `target - delta <= value <= target + delta`
///
/// NaN on either side never matches.
#[inline]
pub fn within_tolerance(value: f64, target: f64, delta: f64) -> bool {
    value <= target + delta && value >= target - delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(within_tolerance(25.0, 20.0, 5.0));
        assert!(within_tolerance(15.0, 20.0, 5.0));
        assert!(within_tolerance(20.0, 20.0, 0.0));
    }

    #[test]
    fn test_outside_bounds() {
        assert!(!within_tolerance(25.0001, 20.0, 5.0));
        assert!(!within_tolerance(14.9999, 20.0, 5.0));
    }

    #[test]
    fn test_nan_never_matches() {
        assert!(!within_tolerance(f64::NAN, 20.0, 5.0));
        assert!(!within_tolerance(20.0, f64::NAN, 5.0));
    }
}
