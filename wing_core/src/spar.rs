//! # Spars and Spar Placement
//!
//! A spar runs spanwise from `start_rib` to `end_rib` and shows up in every
//! rib it crosses as a cutout. This module holds the validated [`Spar`] type
//! and the placement functions:
//!
//! - [`chord_offset_at`] - chordwise offset ratio of a spar at a given rib
//! - [`embed_circle`] / [`embed_rect`] - fit the cutout into a scaled rib
//!   profile, failing with `GeometryOverflow` when it does not fit
//!
//! Placement works in the chord-aligned frame of [`RibProfile`]; surface
//! heights come from the same interpolation helper that builds the contour.
//!
//! ## Example
//!
//! ```rust
//! use wing_core::spar::{Spar, SparAlignment, SparInput, SparProfile};
//!
//! let input = SparInput {
//!     profile: SparProfile::Circle { radius: 4.0 },
//!     start_rib: 0,
//!     end_rib: 4,
//!     start_chord_offset: 0.25,
//!     end_chord_offset: 0.3,
//!     alignment: SparAlignment::Linear,
//!     vertical_offset: 0.0,
//! };
//! let spar = Spar::new(input, 5)?;
//! assert_eq!(spar.end_rib(), 4);
//!
//! // end_rib must be below the rib count
//! let mut bad = spar.to_input();
//! bad.end_rib = 5;
//! assert!(Spar::new(bad, 5).is_err());
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constraints::{check_range, MAX_SPAR_CHORD_OFFSET, MIN_SPAR_CHORD_OFFSET, TOLERANCE};
use crate::errors::{WingError, WingResult};
use crate::geometry::{lerp, Point2, RibProfile, Rotation};
use crate::ribs::RibPositionSet;

/// Vertical anchoring of a rectangular spar inside the rib
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    /// Top edge flush with the upper surface, lowered by the vertical offset
    Upper,
    /// Bottom edge flush with the lower surface, raised by the vertical offset
    Lower,
    /// Centered on the vertical offset
    #[default]
    Custom,
}

/// Cross-section of a spar. Dimensions in millimetres.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Rect", "width": 6.0, "height": 10.0, "vertical_alignment": "Upper" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SparProfile {
    Circle {
        radius: f64,
    },
    Rect {
        width: f64,
        height: f64,
        #[serde(default)]
        vertical_alignment: VerticalAlignment,
    },
}

impl SparProfile {
    pub fn kind(&self) -> &'static str {
        match self {
            SparProfile::Circle { .. } => "Circle",
            SparProfile::Rect { .. } => "Rect",
        }
    }

    fn validate(&self) -> WingResult<()> {
        let positive = |field: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(WingError::invalid_input(field, value, "must be a positive length"))
            }
        };
        match *self {
            SparProfile::Circle { radius } => positive("radius", radius),
            SparProfile::Rect { width, height, .. } => {
                positive("width", width)?;
                positive("height", height)
            }
        }
    }
}

/// How the chordwise offset varies between the start and end rib
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SparAlignment {
    /// Straight line between the start and end offsets
    #[default]
    Linear,
    /// Follows the local chord interpolation; not implemented, placement fails
    Interpolated,
}

/// Unvalidated spar parameters, as they appear in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparInput {
    pub profile: SparProfile,
    pub start_rib: usize,
    pub end_rib: usize,
    /// Offset from the leading edge at the start rib, as a fraction of the chord
    pub start_chord_offset: f64,
    /// Offset from the leading edge at the end rib, as a fraction of the chord
    pub end_chord_offset: f64,
    #[serde(default)]
    pub alignment: SparAlignment,
    /// Vertical offset of the spar in millimetres
    #[serde(default)]
    pub vertical_offset: f64,
}

/// A validated spar: `start_rib < end_rib < rib_count`, offsets within range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spar {
    profile: SparProfile,
    start_rib: usize,
    end_rib: usize,
    start_chord_offset: f64,
    end_chord_offset: f64,
    alignment: SparAlignment,
    vertical_offset: f64,
}

impl Spar {
    /// Validate `input` against a wing with `rib_count` ribs.
    pub fn new(input: SparInput, rib_count: usize) -> WingResult<Self> {
        if rib_count < 2 {
            return Err(WingError::invalid_input("rib_count", rib_count, "a wing has at least 2 ribs"));
        }
        if input.start_rib >= input.end_rib {
            return Err(WingError::invalid_input(
                "start_rib",
                input.start_rib,
                format!("must be less than end_rib ({})", input.end_rib),
            ));
        }
        if input.end_rib >= rib_count {
            return Err(WingError::invalid_input(
                "end_rib",
                input.end_rib,
                format!("must be less than the rib count ({})", rib_count),
            ));
        }
        check_range(
            "start_chord_offset",
            input.start_chord_offset,
            MIN_SPAR_CHORD_OFFSET,
            MAX_SPAR_CHORD_OFFSET,
        )?;
        check_range(
            "end_chord_offset",
            input.end_chord_offset,
            MIN_SPAR_CHORD_OFFSET,
            MAX_SPAR_CHORD_OFFSET,
        )?;
        if !input.vertical_offset.is_finite() {
            return Err(WingError::invalid_input(
                "vertical_offset",
                input.vertical_offset,
                "must be a finite number",
            ));
        }
        input.profile.validate()?;

        Ok(Spar {
            profile: input.profile,
            start_rib: input.start_rib,
            end_rib: input.end_rib,
            start_chord_offset: input.start_chord_offset,
            end_chord_offset: input.end_chord_offset,
            alignment: input.alignment,
            vertical_offset: input.vertical_offset,
        })
    }

    pub fn to_input(&self) -> SparInput {
        SparInput {
            profile: self.profile,
            start_rib: self.start_rib,
            end_rib: self.end_rib,
            start_chord_offset: self.start_chord_offset,
            end_chord_offset: self.end_chord_offset,
            alignment: self.alignment,
            vertical_offset: self.vertical_offset,
        }
    }

    pub fn profile(&self) -> &SparProfile {
        &self.profile
    }

    pub fn start_rib(&self) -> usize {
        self.start_rib
    }

    pub fn end_rib(&self) -> usize {
        self.end_rib
    }

    pub fn start_chord_offset(&self) -> f64 {
        self.start_chord_offset
    }

    pub fn end_chord_offset(&self) -> f64 {
        self.end_chord_offset
    }

    pub fn alignment(&self) -> SparAlignment {
        self.alignment
    }

    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    /// Whether the spar passes through rib `rib_index`
    pub fn covers(&self, rib_index: usize) -> bool {
        (self.start_rib..=self.end_rib).contains(&rib_index)
    }

    /// Same spar attached to different rib indices; used when ribs are
    /// inserted or removed underneath it.
    pub(crate) fn reattached(&self, start_rib: usize, end_rib: usize) -> Spar {
        Spar {
            start_rib,
            end_rib,
            ..self.clone()
        }
    }
}

/// A cutout shape in rib coordinates (millimetres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Cutout {
    Circle { center: Point2, radius: f64 },
    /// Closed polygon; rectangles come out as four corners, counter-clockwise
    Polygon { points: Vec<Point2> },
}

impl Cutout {
    pub fn rotated(&self, rotation: &Rotation) -> Cutout {
        match self {
            Cutout::Circle { center, radius } => Cutout::Circle {
                center: rotation.apply(*center),
                radius: *radius,
            },
            Cutout::Polygon { points } => Cutout::Polygon {
                points: points.iter().map(|p| rotation.apply(*p)).collect(),
            },
        }
    }
}

/// Chordwise offset ratio of `spar` at rib `rib_index`.
///
/// With `Linear` alignment the offset moves from `start_chord_offset` to
/// `end_chord_offset` in proportion to the rib's spanwise position between
/// the spar's start and end ribs.
///
/// # Errors
///
/// * `UnsupportedAlignment` - the spar uses `Interpolated` alignment
/// * `InvalidInput` - the rib is outside the spar or the rib set
pub fn chord_offset_at(spar: &Spar, rib_index: usize, ribs: &RibPositionSet) -> WingResult<f64> {
    if spar.alignment == SparAlignment::Interpolated {
        return Err(WingError::UnsupportedAlignment {
            spar_index: None,
            alignment: "Interpolated".to_string(),
        });
    }
    if !spar.covers(rib_index) {
        return Err(WingError::invalid_input(
            "rib_index",
            rib_index,
            format!("spar spans ribs {}..={}", spar.start_rib, spar.end_rib),
        ));
    }
    let position = |index: usize| {
        ribs.get(index).ok_or_else(|| {
            WingError::invalid_input("rib_index", index, format!("wing has {} ribs", ribs.len()))
        })
    };
    let start = position(spar.start_rib)?;
    let end = position(spar.end_rib)?;
    let here = position(rib_index)?;

    let t = (here - start) / (end - start);
    Ok(lerp(spar.start_chord_offset, spar.end_chord_offset, t))
}

/// Fit a circular spar centered at `(chord_offset, vertical_offset)`.
///
/// Valid when the radius is at most half the local thickness and the circle
/// stays between the local lower and upper surface.
pub fn embed_circle(profile: &RibProfile, chord_offset: f64, spar: &Spar) -> WingResult<Cutout> {
    let SparProfile::Circle { radius } = spar.profile else {
        return Err(WingError::invalid_input("profile", spar.profile.kind(), "expected a circular spar"));
    };
    let (upper, lower) = surfaces_at(profile, chord_offset)?;
    let thickness = upper - lower;

    if radius > thickness / 2.0 + TOLERANCE {
        return Err(WingError::geometry_overflow(format!(
            "circle radius {:.3} exceeds half the local thickness {:.3} at x = {:.3}",
            radius,
            thickness / 2.0,
            chord_offset
        )));
    }
    let y = spar.vertical_offset;
    if y + radius > upper + TOLERANCE || y - radius < lower - TOLERANCE {
        return Err(WingError::geometry_overflow(format!(
            "circle spanning y {:.3}..{:.3} leaves the surface bounds {:.3}..{:.3} at x = {:.3}",
            y - radius,
            y + radius,
            lower,
            upper,
            chord_offset
        )));
    }

    Ok(Cutout::Circle {
        center: Point2::new(chord_offset, y),
        radius,
    })
}

/// Fit a rectangular spar chordwise-centered on `chord_offset`.
///
/// `Upper`/`Lower` alignments sit flush against the tightest surface bound
/// over the rectangle's width, moved inward by the vertical offset; `Custom`
/// centers the rectangle on the vertical offset.
pub fn embed_rect(profile: &RibProfile, chord_offset: f64, spar: &Spar) -> WingResult<Cutout> {
    let SparProfile::Rect {
        width,
        height,
        vertical_alignment,
    } = spar.profile
    else {
        return Err(WingError::invalid_input("profile", spar.profile.kind(), "expected a rectangular spar"));
    };

    let x0 = chord_offset - width / 2.0;
    let x1 = chord_offset + width / 2.0;
    if x0 < -TOLERANCE || x1 > profile.chord() + TOLERANCE {
        return Err(WingError::geometry_overflow(format!(
            "rectangle spanning x {:.3}..{:.3} leaves the chord 0..{:.3}",
            x0,
            x1,
            profile.chord()
        )));
    }
    let (min_upper, max_lower) = profile.bounds_over(x0, x1).ok_or_else(|| {
        WingError::geometry_overflow(format!("no surface between x = {:.3} and x = {:.3}", x0, x1))
    })?;

    let v = spar.vertical_offset;
    let (bottom, top) = match vertical_alignment {
        VerticalAlignment::Upper => (min_upper - v - height, min_upper - v),
        VerticalAlignment::Lower => (max_lower + v, max_lower + v + height),
        VerticalAlignment::Custom => (v - height / 2.0, v + height / 2.0),
    };
    if top > min_upper + TOLERANCE || bottom < max_lower - TOLERANCE {
        return Err(WingError::geometry_overflow(format!(
            "rectangle spanning y {:.3}..{:.3} leaves the surface bounds {:.3}..{:.3} (local thickness {:.3})",
            bottom,
            top,
            max_lower,
            min_upper,
            min_upper - max_lower
        )));
    }

    Ok(Cutout::Polygon {
        points: vec![
            Point2::new(x0, bottom),
            Point2::new(x1, bottom),
            Point2::new(x1, top),
            Point2::new(x0, top),
        ],
    })
}

/// Embed whichever profile the spar carries.
pub fn embed(profile: &RibProfile, chord_offset: f64, spar: &Spar) -> WingResult<Cutout> {
    match spar.profile {
        SparProfile::Circle { .. } => embed_circle(profile, chord_offset, spar),
        SparProfile::Rect { .. } => embed_rect(profile, chord_offset, spar),
    }
}

fn surfaces_at(profile: &RibProfile, x: f64) -> WingResult<(f64, f64)> {
    match (profile.upper_at(x), profile.lower_at(x)) {
        (Some(upper), Some(lower)) => Ok((upper, lower)),
        _ => Err(WingError::geometry_overflow(format!(
            "x = {:.3} is outside the chord 0..{:.3}",
            x,
            profile.chord()
        ))),
    }
}
