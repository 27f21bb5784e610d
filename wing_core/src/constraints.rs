//! # Wing Constraints
//!
//! Numeric limits enforced when wings and spars are constructed or mutated.
//! Lengths are millimetres, angles degrees.

/// Floating point tolerance for spacing and bound comparisons
pub const TOLERANCE: f64 = 1e-10;

pub const MIN_WING_SPAN: f64 = 500.0;
pub const MAX_WING_SPAN: f64 = 5000.0;

/// Limits for the straight chord and for the root chord of tapered/elliptical wings
pub const MIN_ROOT_CHORD: f64 = 100.0;
pub const MAX_ROOT_CHORD: f64 = 1000.0;

/// Taper ratio limits
pub const MIN_TAPER_RATIO: f64 = 0.1;
pub const MAX_TAPER_RATIO: f64 = 1.0;

/// Sweep coefficient of the elliptical planform (leading edge curvature)
pub const MIN_SWEEP_COEFFICIENT: f64 = -1.0;
pub const MAX_SWEEP_COEFFICIENT: f64 = 1.0;

/// Portion of the elliptical span excluded at the tip
pub const MIN_TIP_EXCLUSION_RATIO: f64 = 0.1;
pub const MAX_TIP_EXCLUSION_RATIO: f64 = 0.5;

pub const MIN_INCIDENCE_ANGLE: f64 = -5.0;
pub const MAX_INCIDENCE_ANGLE: f64 = 15.0;

/// Spar chordwise offset, as a fraction of the local chord
pub const MIN_SPAR_CHORD_OFFSET: f64 = 0.1;
pub const MAX_SPAR_CHORD_OFFSET: f64 = 0.9;

/// Minimum distance between two neighbouring ribs
pub const MIN_INTER_RIB_SPACE: f64 = 1.0;

/// Default number of resampled points per airfoil surface
pub const DEFAULT_SURFACE_POINTS: usize = 64;

/// Check `value` against an inclusive range, producing a validation error naming `field`.
pub(crate) fn check_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> crate::errors::WingResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(crate::errors::WingError::invalid_input(
            field,
            value,
            format!("must be in range [{}; {}]", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds_are_inclusive() {
        assert!(check_range("span", MIN_WING_SPAN, MIN_WING_SPAN, MAX_WING_SPAN).is_ok());
        assert!(check_range("span", MAX_WING_SPAN, MIN_WING_SPAN, MAX_WING_SPAN).is_ok());
        assert!(check_range("span", 499.9, MIN_WING_SPAN, MAX_WING_SPAN).is_err());
    }

    #[test]
    fn test_check_range_rejects_nan() {
        let err = check_range("taper_ratio", f64::NAN, MIN_TAPER_RATIO, MAX_TAPER_RATIO).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
