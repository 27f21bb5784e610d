//! # Airfoil
//!
//! A named airfoil section as two point surfaces in normalized chord
//! coordinates. Both surfaces are kept sorted by x, which every consumer
//! (resampling, contour building, spar placement) relies on.
//!
//! ## Example
//!
//! ```rust
//! use wing_core::airfoil::Airfoil;
//! use wing_core::geometry::Point2;
//!
//! let airfoil = Airfoil::new(
//!     "wedge",
//!     vec![Point2::new(1.0, 0.0), Point2::new(0.0, 0.0), Point2::new(0.3, 0.06)],
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
//! )?;
//!
//! // Points are sorted on construction
//! assert_eq!(airfoil.upper()[1], Point2::new(0.3, 0.06));
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constraints::TOLERANCE;
use crate::errors::{WingError, WingResult};
use crate::geometry::{interpolate_y, Point2};

/// A validated airfoil: name plus upper/lower surfaces sorted by x,
/// with x in [0, 1] and y in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airfoil {
    name: String,
    upper: Vec<Point2>,
    lower: Vec<Point2>,
}

impl Airfoil {
    /// Build an airfoil from raw surface points, sorting each surface by x.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - a surface has fewer than 2 points, or a coordinate
    ///   is non-finite or outside the normalized range
    pub fn new(name: impl Into<String>, upper: Vec<Point2>, lower: Vec<Point2>) -> WingResult<Self> {
        let upper = validate_surface("upper", upper)?;
        let lower = validate_surface("lower", lower)?;
        Ok(Airfoil {
            name: name.into(),
            upper,
            lower,
        })
    }

    /// Build an airfoil from a single closed outline in Selig order
    /// (trailing edge, over the upper surface to the leading edge, back along
    /// the lower surface). The outline is split at its minimum-x point, which
    /// belongs to both surfaces.
    pub fn from_outline(name: impl Into<String>, outline: &[Point2]) -> WingResult<Self> {
        let leading_edge = outline
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
            .map(|(i, _)| i)
            .ok_or_else(|| WingError::invalid_input("outline", 0, "outline has no points"))?;

        let upper = outline[..=leading_edge].to_vec();
        let lower = outline[leading_edge..].to_vec();
        Airfoil::new(name, upper, lower)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn upper(&self) -> &[Point2] {
        &self.upper
    }

    pub fn lower(&self) -> &[Point2] {
        &self.lower
    }

    /// Return a copy of this airfoil under a different name
    pub fn renamed(&self, name: impl Into<String>) -> Airfoil {
        Airfoil {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Normalized thickness (upper minus lower) at chordwise position `x`
    pub fn thickness_at(&self, x: f64) -> Option<f64> {
        Some(interpolate_y(&self.upper, x)? - interpolate_y(&self.lower, x)?)
    }

    /// Largest thickness over the upper surface stations, with its x position
    pub fn max_thickness(&self) -> Option<(f64, f64)> {
        self.upper
            .iter()
            .filter_map(|p| Some((p.x, self.thickness_at(p.x)?)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Assemble an airfoil from already sorted, already validated surfaces.
    pub(crate) fn from_sorted(name: String, upper: Vec<Point2>, lower: Vec<Point2>) -> Self {
        Airfoil { name, upper, lower }
    }
}

fn validate_surface(surface: &str, mut points: Vec<Point2>) -> WingResult<Vec<Point2>> {
    if points.len() < 2 {
        return Err(WingError::invalid_input(
            format!("{}_surface", surface),
            points.len(),
            "an airfoil surface needs at least 2 points",
        ));
    }
    for (i, p) in points.iter().enumerate() {
        if !p.x.is_finite() || p.x < -TOLERANCE || p.x > 1.0 + TOLERANCE {
            return Err(WingError::invalid_input(
                format!("{}_surface[{}].x", surface, i),
                p.x,
                "x must be in range [0; 1]",
            ));
        }
        if !p.y.is_finite() || p.y < -1.0 - TOLERANCE || p.y > 1.0 + TOLERANCE {
            return Err(WingError::invalid_input(
                format!("{}_surface[{}].y", surface, i),
                p.y,
                "y must be in range [-1; 1]",
            ));
        }
    }
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    Ok(points)
}

/// Deserialization goes through [`Airfoil::new`] so invalid data is rejected.
impl<'de> Deserialize<'de> for Airfoil {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawAirfoil {
            name: String,
            upper: Vec<Point2>,
            lower: Vec<Point2>,
        }

        let raw = RawAirfoil::deserialize(deserializer)?;
        Airfoil::new(raw.name, raw.upper, raw.lower).map_err(serde::de::Error::custom)
    }
}
