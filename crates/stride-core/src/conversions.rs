// ABOUTME: Clamping float-to-integer conversions for values reported by health SDKs
// ABOUTME: Platform APIs report counts as doubles; readings store them as integers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Convert a reported count to `u64`, rounding to nearest and clamping to range.
///
/// `NaN` and negative values become zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn count_from_f64(value: f64) -> u64 {
    if value.is_nan() {
        return 0;
    }
    value.round().max(0.0).min(u64::MAX as f64) as u64
}

/// Clamp a reported distance to a non-negative finite number of metres
#[must_use]
pub fn meters_from_f64(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_rounds_and_clamps() {
        assert_eq!(count_from_f64(4321.0), 4321);
        assert_eq!(count_from_f64(2.6), 3);
        assert_eq!(count_from_f64(-5.0), 0);
        assert_eq!(count_from_f64(f64::NAN), 0);
    }

    #[test]
    fn test_meters_rejects_non_finite() {
        assert!((meters_from_f64(250.5) - 250.5).abs() < f64::EPSILON);
        assert!(meters_from_f64(-1.0).abs() < f64::EPSILON);
        assert!(meters_from_f64(f64::INFINITY).abs() < f64::EPSILON);
    }
}
