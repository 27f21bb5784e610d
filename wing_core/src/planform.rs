//! # Planform and Chord Model
//!
//! The planform decides how the chord length varies along the span. Each
//! variant carries its own parameters and [`Planform::chord_at`] dispatches by
//! `match`.
//!
//! All formulas take the station ratio `s = position / span`, with the root at
//! `s = 0` and the tip at `s = 1`.
//!
//! ## Example
//!
//! ```rust
//! use wing_core::planform::Planform;
//!
//! let planform = Planform::Elliptical {
//!     root_chord: 240.0,
//!     sweep_coefficient: 0.0,
//!     tip_exclusion_ratio: 0.2,
//! };
//! assert_eq!(planform.chord_at(0.0).0, 240.0);
//! assert!(planform.chord_at(1.0).0 < 240.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constraints::{
    check_range, MAX_ROOT_CHORD, MAX_SWEEP_COEFFICIENT, MAX_TAPER_RATIO, MAX_TIP_EXCLUSION_RATIO,
    MIN_ROOT_CHORD, MIN_SWEEP_COEFFICIENT, MIN_TAPER_RATIO, MIN_TIP_EXCLUSION_RATIO,
};
use crate::errors::WingResult;
use crate::units::Millimeters;

/// Spanwise chord distribution of a wing. Chords are in millimetres.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Tapered", "root_chord": 220.0, "taper_ratio": 0.6 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Planform {
    /// Constant chord
    Straight { chord: f64 },

    /// Linear chord change between root and tip
    Tapered { root_chord: f64, taper_ratio: f64 },

    /// Elliptical chord distribution, truncated before the tip
    Elliptical {
        root_chord: f64,
        /// Leading edge curvature; carried for downstream tooling, it does not
        /// affect the chord length
        sweep_coefficient: f64,
        tip_exclusion_ratio: f64,
    },
}

impl Planform {
    /// Local chord at station ratio `s`.
    ///
    /// - Straight: `chord`
    /// - Tapered: `tip + (root - tip) * s` where `tip = root / taper_ratio`
    /// - Elliptical: `root * sqrt(max(0, 1 - x²))` where `x = s * (1 - tip_exclusion_ratio)`
    ///
    /// The elliptical square-root argument is clamped at zero, so the chord
    /// floors at zero past the ellipse instead of turning into NaN.
    pub fn chord_at(&self, s: f64) -> Millimeters {
        let chord = match *self {
            Planform::Straight { chord } => chord,
            Planform::Tapered {
                root_chord,
                taper_ratio,
            } => {
                let tip_chord = root_chord / taper_ratio;
                tip_chord + (root_chord - tip_chord) * s
            }
            Planform::Elliptical {
                root_chord,
                tip_exclusion_ratio,
                ..
            } => {
                let x = s * (1.0 - tip_exclusion_ratio);
                root_chord * (1.0 - x * x).max(0.0).sqrt()
            }
        };
        Millimeters(chord)
    }

    /// The chord the planform is sized from
    pub fn root_chord(&self) -> Millimeters {
        match *self {
            Planform::Straight { chord } => Millimeters(chord),
            Planform::Tapered { root_chord, .. } | Planform::Elliptical { root_chord, .. } => {
                Millimeters(root_chord)
            }
        }
    }

    /// Planform area for the given span, integrating [`Planform::chord_at`]
    /// over `s` in [0, 1].
    pub fn area(&self, span: Millimeters) -> f64 {
        let mean_chord = match *self {
            Planform::Straight { chord } => chord,
            Planform::Tapered { .. } => (self.chord_at(0.0).0 + self.chord_at(1.0).0) / 2.0,
            Planform::Elliptical {
                root_chord,
                tip_exclusion_ratio,
                ..
            } => {
                // (1/k) * integral_0^k sqrt(1 - u²) du
                let k = (1.0 - tip_exclusion_ratio).min(1.0);
                if k <= 0.0 {
                    root_chord
                } else {
                    root_chord * (k * (1.0 - k * k).sqrt() + k.asin()) / (2.0 * k)
                }
            }
        };
        mean_chord * span.0
    }

    /// Aspect ratio `span² / area`
    pub fn aspect_ratio(&self, span: Millimeters) -> f64 {
        span.0 * span.0 / self.area(span)
    }

    /// Short variant name
    pub fn kind(&self) -> &'static str {
        match self {
            Planform::Straight { .. } => "Straight",
            Planform::Tapered { .. } => "Tapered",
            Planform::Elliptical { .. } => "Elliptical",
        }
    }

    /// Check every parameter against its documented range.
    pub fn validate(&self) -> WingResult<()> {
        match *self {
            Planform::Straight { chord } => check_range("chord", chord, MIN_ROOT_CHORD, MAX_ROOT_CHORD),
            Planform::Tapered {
                root_chord,
                taper_ratio,
            } => {
                check_range("root_chord", root_chord, MIN_ROOT_CHORD, MAX_ROOT_CHORD)?;
                check_range("taper_ratio", taper_ratio, MIN_TAPER_RATIO, MAX_TAPER_RATIO)
            }
            Planform::Elliptical {
                root_chord,
                sweep_coefficient,
                tip_exclusion_ratio,
            } => {
                check_range("root_chord", root_chord, MIN_ROOT_CHORD, MAX_ROOT_CHORD)?;
                check_range(
                    "sweep_coefficient",
                    sweep_coefficient,
                    MIN_SWEEP_COEFFICIENT,
                    MAX_SWEEP_COEFFICIENT,
                )?;
                check_range(
                    "tip_exclusion_ratio",
                    tip_exclusion_ratio,
                    MIN_TIP_EXCLUSION_RATIO,
                    MAX_TIP_EXCLUSION_RATIO,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_straight_chord_is_constant() {
        let planform = Planform::Straight { chord: 200.0 };
        for i in 0..=10 {
            assert_eq!(planform.chord_at(i as f64 / 10.0).0, 200.0);
        }
    }

    #[test]
    fn test_tapered_chord_formula() {
        let planform = Planform::Tapered {
            root_chord: 200.0,
            taper_ratio: 0.5,
        };
        // tip = 200 / 0.5 = 400
        assert_relative_eq!(planform.chord_at(0.0).0, 400.0);
        assert_relative_eq!(planform.chord_at(0.5).0, 300.0);
        assert_relative_eq!(planform.chord_at(1.0).0, 200.0);
    }

    #[test]
    fn test_tapered_ratio_one_is_straight() {
        let planform = Planform::Tapered {
            root_chord: 180.0,
            taper_ratio: 1.0,
        };
        assert_relative_eq!(planform.chord_at(0.3).0, 180.0);
    }

    #[test]
    fn test_elliptical_root_and_tip() {
        let planform = Planform::Elliptical {
            root_chord: 300.0,
            sweep_coefficient: 0.5,
            tip_exclusion_ratio: 0.2,
        };
        assert_relative_eq!(planform.chord_at(0.0).0, 300.0);
        // x = 0.8 -> sqrt(1 - 0.64) = 0.6
        assert_relative_eq!(planform.chord_at(1.0).0, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_elliptical_floors_at_zero() {
        let planform = Planform::Elliptical {
            root_chord: 300.0,
            sweep_coefficient: 0.0,
            tip_exclusion_ratio: 0.0,
        };
        assert_eq!(planform.chord_at(1.0).0, 0.0);
        let beyond = planform.chord_at(1.2).0;
        assert_eq!(beyond, 0.0);
        assert!(!beyond.is_nan());

        let negative_exclusion = Planform::Elliptical {
            root_chord: 300.0,
            sweep_coefficient: 0.0,
            tip_exclusion_ratio: -0.5,
        };
        // s * 1.5 >= 1 from s = 2/3 on
        assert_eq!(negative_exclusion.chord_at(0.7).0, 0.0);
        assert!(negative_exclusion.chord_at(0.6).0 > 0.0);
    }

    #[test]
    fn test_area_and_aspect_ratio() {
        let span = Millimeters(1000.0);
        let straight = Planform::Straight { chord: 200.0 };
        assert_relative_eq!(straight.area(span), 200_000.0);
        assert_relative_eq!(straight.aspect_ratio(span), 5.0);

        let tapered = Planform::Tapered {
            root_chord: 200.0,
            taper_ratio: 0.5,
        };
        assert_relative_eq!(tapered.area(span), 300_000.0);

        // Full quarter ellipse: mean chord = pi/4 * root
        let ellipse = Planform::Elliptical {
            root_chord: 200.0,
            sweep_coefficient: 0.0,
            tip_exclusion_ratio: 0.0,
        };
        assert_relative_eq!(ellipse.area(span), std::f64::consts::FRAC_PI_4 * 200_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_validation_ranges() {
        assert!(Planform::Straight { chord: 200.0 }.validate().is_ok());
        assert!(Planform::Straight { chord: 50.0 }.validate().is_err());
        assert!(Planform::Tapered { root_chord: 200.0, taper_ratio: 0.05 }.validate().is_err());
        assert!(Planform::Elliptical {
            root_chord: 200.0,
            sweep_coefficient: 1.5,
            tip_exclusion_ratio: 0.2,
        }
        .validate()
        .is_err());
        assert!(Planform::Elliptical {
            root_chord: 200.0,
            sweep_coefficient: 0.0,
            tip_exclusion_ratio: 0.6,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_json_shape() {
        let planform = Planform::Tapered {
            root_chord: 220.0,
            taper_ratio: 0.6,
        };
        let json = serde_json::to_string(&planform).unwrap();
        assert_eq!(json, r#"{"type":"Tapered","root_chord":220.0,"taper_ratio":0.6}"#);
    }
}
