//! # Airfoil Resampling and Blending
//!
//! Raw airfoils come with arbitrary point counts and spacings. Before a root
//! and a tip airfoil can be blended point-by-point, each surface is
//! *unified*: resampled to a fixed number of evenly x-spaced points over its
//! original extent.
//!
//! The point counts travel in an explicit [`ResampleSettings`] value.
//!
//! ## Example
//!
//! ```rust
//! use wing_core::airfoil::Airfoil;
//! use wing_core::geometry::Point2;
//! use wing_core::resample::{interpolate, ResampleSettings};
//!
//! let thin = Airfoil::new(
//!     "thin",
//!     vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.04), Point2::new(1.0, 0.0)],
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
//! )?;
//! let thick = Airfoil::new(
//!     "thick",
//!     vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.12), Point2::new(1.0, 0.0)],
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
//! )?;
//!
//! let settings = ResampleSettings::new(5, 5);
//! let mid = interpolate(&thin, &thick, 0.5, &settings)?;
//! assert!((mid.upper()[2].y - 0.08).abs() < 1e-12);
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airfoil::Airfoil;
use crate::constraints::{DEFAULT_SURFACE_POINTS, TOLERANCE};
use crate::errors::{WingError, WingResult};
use crate::geometry::{interpolate_y, Point2};

/// Resampled point counts for the upper and lower surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResampleSettings {
    pub upper_points: usize,
    pub lower_points: usize,
}

impl ResampleSettings {
    pub fn new(upper_points: usize, lower_points: usize) -> Self {
        ResampleSettings {
            upper_points,
            lower_points,
        }
    }

    pub fn validate(&self) -> WingResult<()> {
        for (field, count) in [("upper_points", self.upper_points), ("lower_points", self.lower_points)] {
            if count < 2 {
                return Err(WingError::invalid_input(field, count, "at least 2 points are required"));
            }
        }
        Ok(())
    }
}

impl Default for ResampleSettings {
    fn default() -> Self {
        ResampleSettings::new(DEFAULT_SURFACE_POINTS, DEFAULT_SURFACE_POINTS)
    }
}

/// Resample a surface point cloud to `target_count` evenly x-spaced points.
///
/// The input is sorted by x first; y is interpolated piecewise-linearly and
/// the result spans exactly the original x extent.
///
/// # Errors
///
/// * `InputData` - fewer than 2 points, or all points share one x
/// * `InvalidInput` - `target_count` below 2
pub fn unify_surface(points: &[Point2], target_count: usize) -> WingResult<Vec<Point2>> {
    if points.len() < 2 {
        return Err(WingError::input_data(
            "airfoil surface",
            format!("{} point(s) given, at least 2 are needed to resample", points.len()),
        ));
    }
    if target_count < 2 {
        return Err(WingError::invalid_input(
            "target_count",
            target_count,
            "at least 2 points are required",
        ));
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let x_min = sorted[0].x;
    let x_max = sorted[sorted.len() - 1].x;
    if x_max - x_min < TOLERANCE {
        return Err(WingError::input_data(
            "airfoil surface",
            "surface has no chordwise extent",
        ));
    }

    let step = (x_max - x_min) / (target_count - 1) as f64;
    (0..target_count)
        .map(|i| {
            let x = if i == target_count - 1 { x_max } else { x_min + i as f64 * step };
            interpolate_y(&sorted, x)
                .map(|y| Point2::new(x, y))
                .ok_or_else(|| WingError::input_data("airfoil surface", format!("no surface value at x = {}", x)))
        })
        .collect()
}

/// Resample both surfaces of an airfoil to the configured point counts.
pub fn unify(airfoil: &Airfoil, settings: &ResampleSettings) -> WingResult<Airfoil> {
    let upper = unify_surface(airfoil.upper(), settings.upper_points)?;
    let lower = unify_surface(airfoil.lower(), settings.lower_points)?;
    Ok(Airfoil::from_sorted(
        format!("{}-unified", airfoil.name()),
        upper,
        lower,
    ))
}

/// Blend two airfoils: unify both, then lerp matching points by `ratio`.
///
/// `ratio` 0 gives the unified root, 1 the unified tip.
pub fn interpolate(
    root: &Airfoil,
    tip: &Airfoil,
    ratio: f64,
    settings: &ResampleSettings,
) -> WingResult<Airfoil> {
    check_ratio(ratio)?;
    let root = unify(root, settings)?;
    let tip = unify(tip, settings)?;
    Ok(blend_unified(&root, &tip, ratio))
}

fn check_ratio(ratio: f64) -> WingResult<()> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(WingError::invalid_input("ratio", ratio, "must be in range [0; 1]"));
    }
    Ok(())
}

/// Lerp two airfoils that already share point counts.
fn blend_unified(root: &Airfoil, tip: &Airfoil, ratio: f64) -> Airfoil {
    let blend = |a: &[Point2], b: &[Point2]| -> Vec<Point2> {
        a.iter().zip(b).map(|(p, q)| p.lerp(*q, ratio)).collect()
    };
    Airfoil::from_sorted(
        format!("{}-{}-{}", root.name(), tip.name(), ratio),
        blend(root.upper(), tip.upper()),
        blend(root.lower(), tip.lower()),
    )
}

/// Per-station airfoil source for one wing.
///
/// Unifies the root and tip once and blends per station. When root and tip
/// are the same airfoil, every station gets that airfoil back unchanged.
#[derive(Debug, Clone)]
pub enum StationAirfoils {
    Identity(Arc<Airfoil>),
    Blend { root: Airfoil, tip: Airfoil },
}

impl StationAirfoils {
    pub fn new(root: &Arc<Airfoil>, tip: &Arc<Airfoil>, settings: &ResampleSettings) -> WingResult<Self> {
        if Arc::ptr_eq(root, tip) || root == tip {
            debug!(airfoil = root.name(), "root and tip airfoils match, skipping resampling");
            return Ok(StationAirfoils::Identity(Arc::clone(root)));
        }
        settings.validate()?;
        Ok(StationAirfoils::Blend {
            root: unify(root, settings)?,
            tip: unify(tip, settings)?,
        })
    }

    /// Airfoil at span ratio `ratio` (0 = root, 1 = tip)
    pub fn at(&self, ratio: f64) -> WingResult<Cow<'_, Airfoil>> {
        check_ratio(ratio)?;
        match self {
            StationAirfoils::Identity(airfoil) => Ok(Cow::Borrowed(airfoil.as_ref())),
            StationAirfoils::Blend { root, tip } => Ok(Cow::Owned(blend_unified(root, tip, ratio))),
        }
    }
}
