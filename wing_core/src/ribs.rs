//! # Rib Stations
//!
//! [`RibPositionSet`] holds the spanwise rib positions of a wing in
//! millimetres from the root. The root (0) and the tip (span) are always
//! present, positions are strictly increasing, and neighbours are never
//! closer than [`MIN_INTER_RIB_SPACE`].
//!
//! Every mutation is all-or-nothing: a rejected call returns an error and
//! leaves the set untouched.
//!
//! ## Example
//!
//! ```rust
//! use wing_core::ribs::RibPositionSet;
//! use wing_core::units::Millimeters;
//!
//! let mut ribs = RibPositionSet::new(Millimeters(1000.0))?;
//! ribs.reset_uniform(5)?;
//! assert_eq!(ribs.positions(), &[0.0, 250.0, 500.0, 750.0, 1000.0]);
//!
//! ribs.add(1)?; // midpoint between the root and rib 1
//! assert_eq!(ribs.get(1), Some(125.0));
//!
//! assert!(ribs.remove(0).is_err()); // the root is permanent
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constraints::{MIN_INTER_RIB_SPACE, TOLERANCE};
use crate::errors::{WingError, WingResult};
use crate::units::Millimeters;

/// Ordered rib stations along the span, root first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibPositionSet {
    span: f64,
    positions: Vec<f64>,
}

impl RibPositionSet {
    /// A set holding only the root and tip ribs.
    pub fn new(span: Millimeters) -> WingResult<Self> {
        let span = span.0;
        if !span.is_finite() || span + TOLERANCE < MIN_INTER_RIB_SPACE {
            return Err(WingError::invalid_input(
                "span",
                span,
                format!("span must be at least the minimum rib spacing of {} mm", MIN_INTER_RIB_SPACE),
            ));
        }
        Ok(RibPositionSet {
            span,
            positions: vec![0.0, span],
        })
    }

    /// A set from explicit positions, which must start at 0, end at `span`,
    /// increase strictly and respect the minimum spacing.
    pub fn from_positions(span: Millimeters, positions: Vec<f64>) -> WingResult<Self> {
        let mut ribs = RibPositionSet::new(span)?;
        let span = ribs.span;

        if positions.len() < 2 {
            return Err(WingError::invalid_input(
                "positions",
                positions.len(),
                "root and tip ribs are required",
            ));
        }
        if let Some((i, p)) = positions.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(WingError::invalid_input(format!("positions[{}]", i), p, "must be a finite number"));
        }
        if positions[0].abs() > TOLERANCE {
            return Err(WingError::invalid_input("positions[0]", positions[0], "the root rib must be at 0"));
        }
        let last = positions.len() - 1;
        if (positions[last] - span).abs() > TOLERANCE {
            return Err(WingError::invalid_input(
                format!("positions[{}]", last),
                positions[last],
                format!("the tip rib must be at the span ({})", span),
            ));
        }
        for (i, pair) in positions.windows(2).enumerate() {
            if too_close(pair[0], pair[1]) {
                return Err(WingError::invalid_input(
                    format!("positions[{}]", i + 1),
                    pair[1],
                    format!("ribs must increase by at least {} mm", MIN_INTER_RIB_SPACE),
                ));
            }
        }

        ribs.positions = positions;
        ribs.positions[0] = 0.0;
        ribs.positions[last] = span;
        Ok(ribs)
    }

    pub fn span(&self) -> Millimeters {
        Millimeters(self.span)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: root and tip are permanent
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    /// Position of rib `index` as a fraction of the span
    pub fn ratio(&self, index: usize) -> Option<f64> {
        self.get(index).map(|p| p / self.span)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().copied()
    }

    /// Insert a rib halfway between ribs `index - 1` and `index`.
    ///
    /// Valid for `0 < index < len`; rejected when the resulting half spacing
    /// falls below the minimum.
    pub fn add(&mut self, index: usize) -> WingResult<()> {
        if index == 0 || index >= self.positions.len() {
            return Err(WingError::invalid_input(
                "rib_index",
                index,
                format!("a rib can only be inserted before ribs 1..{}", self.positions.len() - 1),
            ));
        }
        let prev = self.positions[index - 1];
        let next = self.positions[index];
        let half = (next - prev) / 2.0;
        if half + TOLERANCE < MIN_INTER_RIB_SPACE {
            return Err(WingError::invalid_input(
                "rib_index",
                index,
                format!(
                    "halving the {:.3} mm gap would put ribs closer than {} mm",
                    next - prev,
                    MIN_INTER_RIB_SPACE
                ),
            ));
        }
        self.positions.insert(index, prev + half);
        Ok(())
    }

    /// Delete rib `index`. The root and tip cannot be removed.
    pub fn remove(&mut self, index: usize) -> WingResult<()> {
        self.check_inner(index)?;
        self.positions.remove(index);
        Ok(())
    }

    /// Move rib `index` by `delta` millimetres.
    ///
    /// Rejected for the root and tip, and when the new position would pass a
    /// neighbour or come closer to it than the minimum spacing.
    pub fn shift(&mut self, index: usize, delta: f64) -> WingResult<()> {
        self.check_inner(index)?;
        let left = self.positions[index - 1];
        let right = self.positions[index + 1];
        let moved = self.positions[index] + delta;

        if !moved.is_finite() || moved <= left || moved >= right || too_close(left, moved) || too_close(moved, right) {
            return Err(WingError::invalid_input(
                "shift",
                delta,
                format!(
                    "rib {} would leave the window ({:.3}, {:.3}) minus {} mm clearance",
                    index, left, right, MIN_INTER_RIB_SPACE
                ),
            ));
        }
        self.positions[index] = moved;
        Ok(())
    }

    /// Replace all ribs with `n` evenly spaced ones, root and tip included.
    pub fn reset_uniform(&mut self, n: usize) -> WingResult<()> {
        if n < 2 {
            return Err(WingError::invalid_input("rib_count", n, "at least root and tip ribs are required"));
        }
        let spacing = self.span / (n - 1) as f64;
        if spacing + TOLERANCE < MIN_INTER_RIB_SPACE {
            return Err(WingError::invalid_input(
                "rib_count",
                n,
                format!("{:.3} mm spacing is below the {} mm minimum", spacing, MIN_INTER_RIB_SPACE),
            ));
        }
        self.positions = (0..n)
            .map(|i| if i == n - 1 { self.span } else { i as f64 * spacing })
            .collect();
        Ok(())
    }

    /// Drop every rib except the root and tip.
    pub fn clear(&mut self) {
        self.positions = vec![0.0, self.span];
    }

    /// Scale every position to a new span, keeping relative placement.
    pub fn rescale(&mut self, span: Millimeters) -> WingResult<()> {
        let factor = span.0 / self.span;
        let positions: Vec<f64> = self.positions.iter().map(|p| p * factor).collect();
        *self = RibPositionSet::from_positions(span, positions)?;
        Ok(())
    }

    fn check_inner(&self, index: usize) -> WingResult<()> {
        if index == 0 || index + 1 >= self.positions.len() {
            return Err(WingError::invalid_input(
                "rib_index",
                index,
                "the root and tip ribs are permanent",
            ));
        }
        Ok(())
    }
}

/// How a configuration file lays out rib stations.
///
/// ```json
/// { "uniform": { "count": 9 } }
/// { "positions": [0.0, 150.0, 400.0, 1000.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RibLayout {
    Uniform { count: usize },
    Positions(Vec<f64>),
}

impl Default for RibLayout {
    fn default() -> Self {
        RibLayout::Uniform { count: 2 }
    }
}

impl RibLayout {
    pub fn build(&self, span: Millimeters) -> WingResult<RibPositionSet> {
        match self {
            RibLayout::Uniform { count } => {
                let mut ribs = RibPositionSet::new(span)?;
                ribs.reset_uniform(*count)?;
                Ok(ribs)
            }
            RibLayout::Positions(positions) => RibPositionSet::from_positions(span, positions.clone()),
        }
    }
}

fn too_close(lower: f64, upper: f64) -> bool {
    upper - lower + TOLERANCE < MIN_INTER_RIB_SPACE
}

/// Deserialization re-validates the positions.
impl<'de> Deserialize<'de> for RibPositionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawRibs {
            span: f64,
            positions: Vec<f64>,
        }

        let raw = RawRibs::deserialize(deserializer)?;
        RibPositionSet::from_positions(Millimeters(raw.span), raw.positions).map_err(serde::de::Error::custom)
    }
}
