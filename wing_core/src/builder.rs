//! # Rib Geometry Builder
//!
//! Turns a validated [`Wing`] into one [`RibGeometry`] per rib station,
//! root first. For each station the builder:
//!
//! 1. blends the root and tip airfoils at `position / span`
//! 2. scales the blend to the local chord from the planform
//! 3. embeds the cutout of every spar covering the station
//! 4. rotates contour and cutouts by the incidence angle
//!
//! The call is all-or-nothing: the first failing station aborts the build
//! and the error carries the rib (and spar) index.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wing_core::airfoil::Airfoil;
//! use wing_core::builder::interpolate_wing;
//! use wing_core::geometry::Point2;
//! use wing_core::planform::Planform;
//! use wing_core::ribs::RibLayout;
//! use wing_core::units::Millimeters;
//! use wing_core::wing::WingBuilder;
//!
//! let airfoil = Arc::new(Airfoil::new(
//!     "flat",
//!     vec![Point2::new(0.0, 0.0), Point2::new(0.4, 0.08), Point2::new(1.0, 0.0)],
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
//! )?);
//! let wing = WingBuilder::new("w", Millimeters(800.0), Planform::Straight { chord: 150.0 }, airfoil.clone(), airfoil)
//!     .ribs(RibLayout::Uniform { count: 3 })
//!     .build()?;
//!
//! let ribs = interpolate_wing(&wing)?;
//! assert_eq!(ribs.len(), 3);
//! assert_eq!(ribs[2].name, "flat2");
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::WingResult;
use crate::geometry::{Point2, RibProfile, Rotation};
use crate::resample::{ResampleSettings, StationAirfoils};
use crate::spar::{chord_offset_at, embed, Cutout};
use crate::wing::Wing;

/// Cutout produced by one spar in one rib
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparCutout {
    pub spar_index: usize,
    #[serde(flatten)]
    pub cutout: Cutout,
}

/// Finished geometry of a single rib, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibGeometry {
    pub index: usize,
    /// Display name, `"{airfoil}{index}"`
    pub name: String,
    pub airfoil_name: String,
    /// Distance from the root
    pub position: f64,
    pub span_ratio: f64,
    pub chord: f64,
    /// Closed outline; the last point repeats the first
    pub contour: Vec<Point2>,
    pub cutouts: Vec<SparCutout>,
}

/// Build every rib of `wing` with the given resampling settings.
///
/// # Errors
///
/// * `GeometryOverflow` - a spar does not fit; carries rib and spar index
/// * `UnsupportedAlignment` - a spar uses an unimplemented alignment
/// * `RibFailed` - any other failure while building a station
/// * `InvalidInput` - the settings themselves are invalid
pub fn interpolate(wing: &Wing, settings: &ResampleSettings) -> WingResult<Vec<RibGeometry>> {
    let airfoils = StationAirfoils::new(wing.root_airfoil(), wing.tip_airfoil(), settings)?;
    let rotation = Rotation::from_radians(wing.incidence_angle().to_radians());

    info!(
        wing = wing.name(),
        ribs = wing.rib_count(),
        spars = wing.spars().len(),
        planform = wing.planform().kind(),
        "building rib geometry"
    );

    let ribs = wing
        .ribs()
        .iter()
        .enumerate()
        .map(|(index, position)| build_rib(wing, &airfoils, &rotation, index, position))
        .collect::<WingResult<Vec<_>>>()?;

    info!(wing = wing.name(), ribs = ribs.len(), "rib geometry complete");
    Ok(ribs)
}

/// [`interpolate`] with the default resampling settings.
pub fn interpolate_wing(wing: &Wing) -> WingResult<Vec<RibGeometry>> {
    interpolate(wing, &ResampleSettings::default())
}

fn build_rib(
    wing: &Wing,
    airfoils: &StationAirfoils,
    rotation: &Rotation,
    index: usize,
    position: f64,
) -> WingResult<RibGeometry> {
    let span_ratio = (position / wing.span().0).clamp(0.0, 1.0);
    let airfoil = airfoils.at(span_ratio).map_err(|e| e.locate(index, None))?;
    let chord = wing.planform().chord_at(span_ratio).0;
    let profile = RibProfile::new(&airfoil, chord);

    let mut cutouts = Vec::new();
    for (spar_index, spar) in wing.spars().iter().enumerate() {
        if !spar.covers(index) {
            continue;
        }
        let cutout = chord_offset_at(spar, index, wing.ribs())
            .and_then(|offset| embed(&profile, offset * chord, spar))
            .map_err(|e| e.locate(index, Some(spar_index)))?;
        cutouts.push(SparCutout {
            spar_index,
            cutout: cutout.rotated(rotation),
        });
    }

    debug!(rib = index, position, chord, cutouts = cutouts.len(), "rib built");

    let airfoil_name = airfoil.name().to_string();
    Ok(RibGeometry {
        index,
        name: format!("{}{}", airfoil_name, index),
        airfoil_name,
        position,
        span_ratio,
        chord,
        contour: profile.contour(rotation),
        cutouts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::tests::naca_symmetric;
    use crate::airfoil::Airfoil;
    use crate::errors::WingError;
    use crate::planform::Planform;
    use crate::ribs::RibLayout;
    use crate::spar::{SparAlignment, SparInput, SparProfile, VerticalAlignment};
    use crate::units::{Degrees, Millimeters};
    use crate::wing::tests::circle_spar;
    use crate::wing::WingBuilder;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn straight_wing(root: Arc<Airfoil>, tip: Arc<Airfoil>) -> WingBuilder {
        WingBuilder::new(
            "Test",
            Millimeters(1000.0),
            Planform::Straight { chord: 200.0 },
            root,
            tip,
        )
        .ribs(RibLayout::Uniform { count: 5 })
    }

    fn naca() -> Arc<Airfoil> {
        Arc::new(naca_symmetric("naca0012", 0.12, 41))
    }

    #[test]
    fn test_straight_wing_scales_root_airfoil() {
        let airfoil = naca();
        let wing = straight_wing(airfoil.clone(), airfoil.clone()).build().unwrap();
        let ribs = interpolate_wing(&wing).unwrap();
        assert_eq!(ribs.len(), 5);

        let expected = RibProfile::new(&airfoil, 200.0).contour(&Rotation::identity());
        for (i, rib) in ribs.iter().enumerate() {
            assert_eq!(rib.index, i);
            assert_eq!(rib.name, format!("naca0012{}", i));
            assert_eq!(rib.chord, 200.0);
            assert_relative_eq!(rib.position, 250.0 * i as f64);
            assert_eq!(rib.contour, expected);
            assert!(rib.cutouts.is_empty());
        }
        assert_eq!(ribs[4].span_ratio, 1.0);
    }

    #[test]
    fn test_contour_is_closed() {
        let wing = straight_wing(naca(), naca()).build().unwrap();
        for rib in interpolate_wing(&wing).unwrap() {
            assert_eq!(rib.contour.first(), rib.contour.last());
        }
    }

    #[test]
    fn test_blended_stations_use_settings() {
        let root = naca();
        let tip = Arc::new(naca_symmetric("naca0009", 0.09, 33));
        let wing = straight_wing(root, tip).build().unwrap();
        let ribs = interpolate(&wing, &ResampleSettings::new(20, 30)).unwrap();

        // 20 upper + 30 lower, shared leading edge dropped, lower trailing edge snapped onto the start
        assert_eq!(ribs[2].contour.len(), 20 + 30 - 1);
        assert_eq!(ribs[2].contour.first(), ribs[2].contour.last());
        assert!(ribs[0].airfoil_name.starts_with("naca0012"));
        assert!(ribs[2].airfoil_name.contains("naca0009"));

        let thickness = |rib: &RibGeometry| {
            let ys = rib.contour.iter().map(|p| p.y);
            ys.clone().fold(f64::MIN, f64::max) - ys.fold(f64::MAX, f64::min)
        };
        assert!(thickness(&ribs[0]) > thickness(&ribs[2]));
        assert!(thickness(&ribs[2]) > thickness(&ribs[4]));
    }

    #[test]
    fn test_incidence_rotates_contour_and_cutouts() {
        let airfoil = naca();
        let wing = straight_wing(airfoil.clone(), airfoil)
            .incidence_angle(Degrees(10.0))
            .spar(circle_spar(0, 4))
            .build()
            .unwrap();
        let ribs = interpolate_wing(&wing).unwrap();

        let angle = 10.0_f64.to_radians();
        let flat = RibProfile::new(&naca(), 200.0).contour(&Rotation::identity());
        for (p, q) in flat.iter().zip(&ribs[0].contour) {
            assert_relative_eq!(q.x, p.x * angle.cos() - p.y * angle.sin(), epsilon = 1e-9);
            assert_relative_eq!(q.y, p.x * angle.sin() + p.y * angle.cos(), epsilon = 1e-9);
        }

        let Cutout::Circle { center, radius } = &ribs[3].cutouts[0].cutout else {
            panic!("expected a circle");
        };
        assert_relative_eq!(center.x, 60.0 * angle.cos(), epsilon = 1e-9);
        assert_relative_eq!(center.y, 60.0 * angle.sin(), epsilon = 1e-9);
        assert_eq!(*radius, 4.0);
    }

    #[test]
    fn test_spar_only_cuts_covered_ribs() {
        let wing = straight_wing(naca(), naca())
            .spar(circle_spar(1, 3))
            .build()
            .unwrap();
        let ribs = interpolate_wing(&wing).unwrap();
        let counts: Vec<usize> = ribs.iter().map(|r| r.cutouts.len()).collect();
        assert_eq!(counts, vec![0, 1, 1, 1, 0]);
        assert_eq!(ribs[2].cutouts[0].spar_index, 0);
    }

    #[test]
    fn test_overflow_aborts_with_location() {
        let oversized = SparInput {
            profile: SparProfile::Rect {
                width: 6.0,
                height: 30.0,
                vertical_alignment: VerticalAlignment::Custom,
            },
            ..circle_spar(2, 4)
        };
        let wing = straight_wing(naca(), naca())
            .spar(circle_spar(0, 4))
            .spar(oversized)
            .build()
            .unwrap();

        match interpolate_wing(&wing).unwrap_err() {
            WingError::GeometryOverflow {
                rib_index,
                spar_index,
                ..
            } => {
                assert_eq!(rib_index, Some(2));
                assert_eq!(spar_index, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interpolated_alignment_aborts() {
        let spar = SparInput {
            alignment: SparAlignment::Interpolated,
            ..circle_spar(0, 1)
        };
        let wing = straight_wing(naca(), naca()).spar(spar).build().unwrap();
        let err = interpolate_wing(&wing).unwrap_err();
        assert_eq!(
            err,
            WingError::UnsupportedAlignment {
                spar_index: Some(0),
                alignment: "Interpolated".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let tip = Arc::new(naca_symmetric("naca0009", 0.09, 33));
        let wing = straight_wing(naca(), tip).build().unwrap();
        let err = interpolate(&wing, &ResampleSettings::new(1, 64)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_tapered_chords_follow_planform() {
        let wing = WingBuilder::new(
            "Tapered",
            Millimeters(1000.0),
            Planform::Tapered {
                root_chord: 200.0,
                taper_ratio: 0.5,
            },
            naca(),
            naca(),
        )
        .ribs(RibLayout::Uniform { count: 3 })
        .build()
        .unwrap();
        let chords: Vec<f64> = interpolate_wing(&wing).unwrap().iter().map(|r| r.chord).collect();
        assert_relative_eq!(chords[0], 400.0);
        assert_relative_eq!(chords[1], 300.0);
        assert_relative_eq!(chords[2], 200.0);
    }

    #[test]
    fn test_geometry_json_shape() {
        let wing = straight_wing(naca(), naca())
            .spar(circle_spar(0, 4))
            .build()
            .unwrap();
        let ribs = interpolate_wing(&wing).unwrap();
        let json = serde_json::to_value(&ribs[0]).unwrap();
        assert_eq!(json["name"], "naca00120");
        assert_eq!(json["cutouts"][0]["shape"], "Circle");
        assert_eq!(json["cutouts"][0]["spar_index"], 0);
    }
}
