//! # Wing
//!
//! The [`Wing`] aggregate owns everything the rib builder needs: span,
//! incidence, planform, root/tip airfoils, rib stations and spars. Every field
//! is validated when the wing is built and again on each mutation, so a
//! `Wing` value is always consistent. Rib edits keep spar rib indices
//! attached to the same physical ribs.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wing_core::airfoil::Airfoil;
//! use wing_core::geometry::Point2;
//! use wing_core::planform::Planform;
//! use wing_core::ribs::RibLayout;
//! use wing_core::units::{Degrees, Millimeters};
//! use wing_core::wing::WingBuilder;
//!
//! let airfoil = Arc::new(Airfoil::new(
//!     "wedge",
//!     vec![Point2::new(0.0, 0.0), Point2::new(0.3, 0.06), Point2::new(1.0, 0.0)],
//!     vec![Point2::new(0.0, 0.0), Point2::new(0.3, -0.04), Point2::new(1.0, 0.0)],
//! )?);
//!
//! let mut wing = WingBuilder::new(
//!     "Trainer",
//!     Millimeters(1200.0),
//!     Planform::Straight { chord: 200.0 },
//!     airfoil.clone(),
//!     airfoil,
//! )
//! .incidence_angle(Degrees(2.0))
//! .ribs(RibLayout::Uniform { count: 7 })
//! .build()?;
//!
//! wing.add_rib(1)?;
//! assert_eq!(wing.rib_count(), 8);
//! assert!(wing.set_span(Millimeters(100.0)).is_err());
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use std::sync::Arc;

use crate::airfoil::Airfoil;
use crate::constraints::{
    check_range, MAX_INCIDENCE_ANGLE, MAX_WING_SPAN, MIN_INCIDENCE_ANGLE, MIN_WING_SPAN,
};
use crate::errors::{WingError, WingResult};
use crate::planform::Planform;
use crate::ribs::{RibLayout, RibPositionSet};
use crate::spar::{Spar, SparInput};
use crate::units::{Degrees, Millimeters};

/// A fully validated wing.
#[derive(Debug, Clone, PartialEq)]
pub struct Wing {
    name: String,
    span: Millimeters,
    incidence_angle: Degrees,
    planform: Planform,
    root_airfoil: Arc<Airfoil>,
    tip_airfoil: Arc<Airfoil>,
    ribs: RibPositionSet,
    spars: Vec<Spar>,
}

/// Collects wing parameters and validates them all in [`WingBuilder::build`].
#[derive(Debug, Clone)]
pub struct WingBuilder {
    name: String,
    span: Millimeters,
    incidence_angle: Degrees,
    planform: Planform,
    root_airfoil: Arc<Airfoil>,
    tip_airfoil: Arc<Airfoil>,
    ribs: RibLayout,
    spars: Vec<SparInput>,
}

impl WingBuilder {
    pub fn new(
        name: impl Into<String>,
        span: Millimeters,
        planform: Planform,
        root_airfoil: Arc<Airfoil>,
        tip_airfoil: Arc<Airfoil>,
    ) -> Self {
        WingBuilder {
            name: name.into(),
            span,
            incidence_angle: Degrees(0.0),
            planform,
            root_airfoil,
            tip_airfoil,
            ribs: RibLayout::default(),
            spars: Vec::new(),
        }
    }

    pub fn incidence_angle(mut self, angle: Degrees) -> Self {
        self.incidence_angle = angle;
        self
    }

    pub fn ribs(mut self, layout: RibLayout) -> Self {
        self.ribs = layout;
        self
    }

    pub fn spar(mut self, spar: SparInput) -> Self {
        self.spars.push(spar);
        self
    }

    pub fn spars(mut self, spars: impl IntoIterator<Item = SparInput>) -> Self {
        self.spars.extend(spars);
        self
    }

    /// Validate every field and assemble the wing.
    pub fn build(self) -> WingResult<Wing> {
        check_span(self.span)?;
        check_incidence(self.incidence_angle)?;
        self.planform.validate().map_err(|e| e.within("planform"))?;
        let ribs = self.ribs.build(self.span).map_err(|e| e.within("ribs"))?;

        let spars = self
            .spars
            .into_iter()
            .enumerate()
            .map(|(i, input)| Spar::new(input, ribs.len()).map_err(|e| e.within(&format!("spars[{}]", i))))
            .collect::<WingResult<Vec<_>>>()?;

        Ok(Wing {
            name: self.name,
            span: self.span,
            incidence_angle: self.incidence_angle,
            planform: self.planform,
            root_airfoil: self.root_airfoil,
            tip_airfoil: self.tip_airfoil,
            ribs,
            spars,
        })
    }
}

fn check_span(span: Millimeters) -> WingResult<()> {
    check_range("span", span.0, MIN_WING_SPAN, MAX_WING_SPAN)
}

fn check_incidence(angle: Degrees) -> WingResult<()> {
    check_range("incidence_angle", angle.0, MIN_INCIDENCE_ANGLE, MAX_INCIDENCE_ANGLE)
}

impl Wing {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Millimeters {
        self.span
    }

    pub fn incidence_angle(&self) -> Degrees {
        self.incidence_angle
    }

    pub fn planform(&self) -> &Planform {
        &self.planform
    }

    pub fn root_airfoil(&self) -> &Arc<Airfoil> {
        &self.root_airfoil
    }

    pub fn tip_airfoil(&self) -> &Arc<Airfoil> {
        &self.tip_airfoil
    }

    /// Whether root and tip are the same airfoil
    pub fn shares_airfoil(&self) -> bool {
        Arc::ptr_eq(&self.root_airfoil, &self.tip_airfoil) || self.root_airfoil == self.tip_airfoil
    }

    pub fn ribs(&self) -> &RibPositionSet {
        &self.ribs
    }

    pub fn rib_count(&self) -> usize {
        self.ribs.len()
    }

    pub fn spars(&self) -> &[Spar] {
        &self.spars
    }

    /// Local chord at rib `index`
    pub fn chord_at_rib(&self, index: usize) -> Option<Millimeters> {
        self.ribs.ratio(index).map(|s| self.planform.chord_at(s))
    }

    /// Planform area in mm²
    pub fn area(&self) -> f64 {
        self.planform.area(self.span)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.planform.aspect_ratio(self.span)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the span, scaling rib stations proportionally.
    pub fn set_span(&mut self, span: Millimeters) -> WingResult<()> {
        check_span(span)?;
        self.ribs.rescale(span)?;
        self.span = span;
        Ok(())
    }

    pub fn set_incidence_angle(&mut self, angle: Degrees) -> WingResult<()> {
        check_incidence(angle)?;
        self.incidence_angle = angle;
        Ok(())
    }

    pub fn set_planform(&mut self, planform: Planform) -> WingResult<()> {
        planform.validate().map_err(|e| e.within("planform"))?;
        self.planform = planform;
        Ok(())
    }

    pub fn set_airfoils(&mut self, root: Arc<Airfoil>, tip: Arc<Airfoil>) {
        self.root_airfoil = root;
        self.tip_airfoil = tip;
    }

    /// Insert a rib halfway between ribs `index - 1` and `index`.
    /// Spar endpoints at or after `index` move up by one.
    pub fn add_rib(&mut self, index: usize) -> WingResult<()> {
        self.ribs.add(index)?;
        let bump = |rib: usize| if rib >= index { rib + 1 } else { rib };
        self.spars = self
            .spars
            .iter()
            .map(|s| s.reattached(bump(s.start_rib()), bump(s.end_rib())))
            .collect();
        Ok(())
    }

    /// Remove rib `index`. Rejected while a spar starts or ends on it.
    pub fn remove_rib(&mut self, index: usize) -> WingResult<()> {
        if let Some(i) = self
            .spars
            .iter()
            .position(|s| s.start_rib() == index || s.end_rib() == index)
        {
            return Err(WingError::invalid_input(
                "rib_index",
                index,
                format!("spar {} starts or ends on this rib", i),
            ));
        }
        self.ribs.remove(index)?;
        let drop = |rib: usize| if rib > index { rib - 1 } else { rib };
        self.spars = self
            .spars
            .iter()
            .map(|s| s.reattached(drop(s.start_rib()), drop(s.end_rib())))
            .collect();
        Ok(())
    }

    /// Move rib `index` by `delta` millimetres.
    pub fn shift_rib(&mut self, index: usize, delta: f64) -> WingResult<()> {
        self.ribs.shift(index, delta)
    }

    /// Replace the ribs with `n` evenly spaced stations.
    /// Rejected while a spar references a rib index `>= n`.
    pub fn reset_ribs(&mut self, n: usize) -> WingResult<()> {
        self.check_spars_fit(n)?;
        self.ribs.reset_uniform(n)
    }

    /// Keep only the root and tip ribs.
    pub fn clear_ribs(&mut self) -> WingResult<()> {
        self.check_spars_fit(2)?;
        self.ribs.clear();
        Ok(())
    }

    /// Validate and append a spar, returning its index.
    pub fn add_spar(&mut self, input: SparInput) -> WingResult<usize> {
        let spar = Spar::new(input, self.ribs.len())?;
        self.spars.push(spar);
        Ok(self.spars.len() - 1)
    }

    pub fn remove_spar(&mut self, index: usize) -> WingResult<Spar> {
        if index >= self.spars.len() {
            return Err(WingError::invalid_input(
                "spar_index",
                index,
                format!("wing has {} spars", self.spars.len()),
            ));
        }
        Ok(self.spars.remove(index))
    }

    fn check_spars_fit(&self, rib_count: usize) -> WingResult<()> {
        match self.spars.iter().position(|s| s.end_rib() >= rib_count) {
            Some(i) => Err(WingError::invalid_input(
                "rib_count",
                rib_count,
                format!("spar {} ends on rib {}", i, self.spars[i].end_rib()),
            )),
            None => Ok(()),
        }
    }
}
