//! # Validation
//!
//! Numeric guards shared by the calculators. Every estimation validates all
//! of its inputs before deriving any quantity, so a failure never leaves a
//! partially computed result behind.
//!
//! ## Usage
//!
//! ```rust
//! use estimator_core::validation::{require_positive, require_non_negative};
//!
//! assert!(require_positive("length", 12.0).is_ok());
//! assert!(require_positive("length", 0.0).is_err());
//! assert!(require_non_negative("allowancePct", 0.0).is_ok());
//! assert!(require_non_negative("allowancePct", f64::NAN).is_err());
//! ```

use crate::errors::{EstimatorError, EstimatorResult};

/// Largest count that survives a round trip through `f64` unchanged.
pub const MAX_COUNT: u64 = 1 << 53;

const TOO_LARGE: &str = "Room is too large to estimate";

/// Require a finite value strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> EstimatorResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(EstimatorError::invalid_input(
            field,
            value.to_string(),
            "Value must be greater than zero",
        ));
    }
    Ok(())
}

/// Require a finite value greater than or equal to zero.
pub fn require_non_negative(field: &str, value: f64) -> EstimatorResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(EstimatorError::invalid_input(
            field,
            value.to_string(),
            "Value cannot be negative",
        ));
    }
    Ok(())
}

/// Require a finite value (rejects NaN and both infinities).
pub fn require_finite(field: &str, value: f64) -> EstimatorResult<()> {
    if !value.is_finite() {
        return Err(EstimatorError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(())
}

/// Convert an already rounded, non-negative quantity into a count.
///
/// Fails for anything above [`MAX_COUNT`] rather than saturating.
pub fn whole_count(field: &str, value: f64) -> EstimatorResult<u64> {
    require_non_negative(field, value)?;
    if value > MAX_COUNT as f64 {
        return Err(EstimatorError::invalid_input(field, value.to_string(), TOO_LARGE));
    }
    Ok(value as u64)
}

/// Multiply two counts, failing when the product exceeds [`MAX_COUNT`].
pub fn count_product(field: &str, a: u64, b: u64) -> EstimatorResult<u64> {
    a.checked_mul(b)
        .filter(|&n| n <= MAX_COUNT)
        .ok_or_else(|| EstimatorError::invalid_input(field, format!("{} × {}", a, b), TOO_LARGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_accepts_small_values() {
        assert!(require_positive("x", 0.001).is_ok());
        assert!(require_positive("x", 1e6).is_ok());
    }

    #[test]
    fn test_positive_rejects_zero_negative_and_non_finite() {
        for bad in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = require_positive("width", bad).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert!(require_non_negative("price", 0.0).is_ok());
        assert!(require_non_negative("price", -0.5).is_err());
        assert!(require_non_negative("price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_names_field() {
        match require_positive("tileLength", -2.0).unwrap_err() {
            EstimatorError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "tileLength");
                assert_eq!(value, "-2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_whole_count_bounds() {
        assert_eq!(whole_count("rows", 0.0).unwrap(), 0);
        assert_eq!(whole_count("rows", 42.0).unwrap(), 42);
        assert_eq!(whole_count("rows", MAX_COUNT as f64).unwrap(), MAX_COUNT);
        assert!(whole_count("rows", 1e300).is_err());
        assert!(whole_count("rows", -1.0).is_err());
        assert!(whole_count("rows", f64::INFINITY).is_err());
    }

    #[test]
    fn test_count_product_rejects_overflow() {
        assert_eq!(count_product("grid", 1_000_000, 1_000_000).unwrap(), 1_000_000_000_000);
        assert!(count_product("grid", u64::MAX, 2).is_err());
        assert!(count_product("grid", MAX_COUNT, 2).is_err());

        match count_product("length", 1 << 40, 1 << 40).unwrap_err() {
            EstimatorError::InvalidInput { field, reason, .. } => {
                assert_eq!(field, "length");
                assert_eq!(reason, TOO_LARGE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
