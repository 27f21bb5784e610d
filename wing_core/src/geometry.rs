//! # Planar Geometry
//!
//! Points, the incidence rotation, and [`RibProfile`], an airfoil scaled to a
//! local chord. [`interpolate_y`] is the single upper/lower-at-x lookup used by
//! airfoil resampling, contour construction and spar placement alike.

use serde::{Deserialize, Serialize};

use crate::airfoil::Airfoil;
use crate::constraints::TOLERANCE;

/// A point in the rib plane. `x` runs chordwise from the leading edge, `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    /// Linear blend between `self` (t = 0) and `other` (t = 1)
    pub fn lerp(self, other: Point2, t: f64) -> Point2 {
        Point2 {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
        }
    }

    pub fn scale(self, factor: f64) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear y of a surface at chordwise position `x`.
///
/// `points` must be sorted by ascending x. Returns `None` when `x` lies
/// outside the surface extent (beyond [`TOLERANCE`]) or the surface is empty.
pub fn interpolate_y(points: &[Point2], x: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if x < first.x - TOLERANCE || x > last.x + TOLERANCE {
        return None;
    }
    let x = x.clamp(first.x, last.x);
    if points.len() == 1 {
        return Some(first.y);
    }

    points.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        if a.x <= x && x <= b.x {
            let dx = b.x - a.x;
            if dx.abs() < TOLERANCE {
                Some(a.y)
            } else {
                Some(a.y + (b.y - a.y) * (x - a.x) / dx)
            }
        } else {
            None
        }
    })
}

/// Fixed rotation about the leading edge, applied identically to every rib.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    sin: f64,
    cos: f64,
}

impl Rotation {
    pub fn from_radians(angle: f64) -> Self {
        Rotation {
            sin: angle.sin(),
            cos: angle.cos(),
        }
    }

    pub fn identity() -> Self {
        Rotation { sin: 0.0, cos: 1.0 }
    }

    pub fn apply(&self, p: Point2) -> Point2 {
        Point2 {
            x: p.x * self.cos - p.y * self.sin,
            y: p.x * self.sin + p.y * self.cos,
        }
    }
}

/// An airfoil scaled to a local chord, still aligned with the chord line.
///
/// Spar placement happens in this frame; the incidence rotation is applied
/// afterwards to the finished contour and cutouts.
#[derive(Debug, Clone, PartialEq)]
pub struct RibProfile {
    chord: f64,
    upper: Vec<Point2>,
    lower: Vec<Point2>,
}

impl RibProfile {
    pub fn new(airfoil: &Airfoil, chord: f64) -> Self {
        RibProfile {
            chord,
            upper: airfoil.upper().iter().map(|p| p.scale(chord)).collect(),
            lower: airfoil.lower().iter().map(|p| p.scale(chord)).collect(),
        }
    }

    pub fn chord(&self) -> f64 {
        self.chord
    }

    pub fn upper(&self) -> &[Point2] {
        &self.upper
    }

    pub fn lower(&self) -> &[Point2] {
        &self.lower
    }

    pub fn upper_at(&self, x: f64) -> Option<f64> {
        interpolate_y(&self.upper, x)
    }

    pub fn lower_at(&self, x: f64) -> Option<f64> {
        interpolate_y(&self.lower, x)
    }

    /// Local thickness (upper minus lower) at `x`
    pub fn thickness_at(&self, x: f64) -> Option<f64> {
        Some(self.upper_at(x)? - self.lower_at(x)?)
    }

    /// Tightest surface bounds over the chordwise interval `[x0, x1]`:
    /// the lowest upper-surface y and the highest lower-surface y.
    ///
    /// Both surfaces are piecewise linear, so checking the interval ends plus
    /// every vertex inside the interval is exact.
    pub fn bounds_over(&self, x0: f64, x1: f64) -> Option<(f64, f64)> {
        let mut min_upper = self.upper_at(x0)?.min(self.upper_at(x1)?);
        let mut max_lower = self.lower_at(x0)?.max(self.lower_at(x1)?);

        for p in self.upper.iter().filter(|p| p.x > x0 && p.x < x1) {
            min_upper = min_upper.min(p.y);
        }
        for p in self.lower.iter().filter(|p| p.x > x0 && p.x < x1) {
            max_lower = max_lower.max(p.y);
        }
        Some((min_upper, max_lower))
    }

    /// Closed outline, rotated: upper surface from trailing edge to leading
    /// edge, then lower surface back to the trailing edge. The last point
    /// repeats the first.
    pub fn contour(&self, rotation: &Rotation) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::with_capacity(self.upper.len() + self.lower.len() + 1);
        points.extend(self.upper.iter().rev());

        let mut lower = self.lower.iter().peekable();
        if let (Some(le), Some(first_lower)) = (points.last(), lower.peek()) {
            if same_point(*le, **first_lower) {
                lower.next();
            }
        }
        points.extend(lower);

        // A trailing edge that nearly closes is snapped shut so first == last exactly.
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if same_point(first, last) {
                points.pop();
            }
            points.push(first);
        }

        points.into_iter().map(|p| rotation.apply(p)).collect()
    }
}

fn same_point(a: Point2, b: Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}
