//! # wing_core - Parametric Wing Rib Geometry Engine
//!
//! `wing_core` computes the rib cross-sections of a model aircraft wing from
//! a handful of parameters: span, planform, root/tip airfoils, rib stations
//! and spars. Every rib comes out as a closed contour in millimetres plus the
//! cutouts of the spars passing through it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: building ribs is a pure function of a validated [`Wing`]
//! - **Validated on construction**: out-of-range values never reach the geometry code
//! - **JSON-First**: configs, projects, outputs and errors are all serde types
//! - **Rich Errors**: failures name the field, rib and spar involved
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::Path;
//! use wing_core::builder::interpolate_wing;
//! use wing_core::config::WingConfig;
//!
//! let config = WingConfig::from_json(r#"{
//!     "name": "Demo",
//!     "span": 1000.0,
//!     "planform": { "type": "Straight", "chord": 200.0 },
//!     "root_airfoil": { "inline": {
//!         "name": "wedge",
//!         "upper": [{"x": 0.0, "y": 0.0}, {"x": 0.3, "y": 0.1}, {"x": 1.0, "y": 0.0}],
//!         "lower": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}]
//!     } },
//!     "ribs": { "uniform": { "count": 5 } }
//! }"#)?;
//!
//! let wing = config.build(Path::new("."))?;
//! let ribs = interpolate_wing(&wing)?;
//! assert_eq!(ribs.len(), 5);
//! assert_eq!(ribs[0].chord, 200.0);
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```
//!
//! ## Modules
//!
//! - [`wing`] - The validated wing aggregate and its builder
//! - [`builder`] - Rib geometry generation
//! - [`ribs`] - Spanwise rib stations
//! - [`planform`] - Chord distribution models
//! - [`spar`] - Spars, chordwise placement and cutout fitting
//! - [`resample`] - Airfoil resampling and root/tip blending
//! - [`airfoil`] / [`airfoil_dat`] - Airfoil sections and the `.dat` parser
//! - [`config`] - JSON wing configuration
//! - [`project`] / [`file_io`] - Multi-wing project files with atomic saves
//! - [`geometry`] - Points, rotation, scaled rib profiles
//! - [`units`] / [`constraints`] - Unit wrappers and validated ranges
//! - [`errors`] - Structured error types

pub mod airfoil;
pub mod airfoil_dat;
pub mod builder;
pub mod config;
pub mod constraints;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod planform;
pub mod project;
pub mod resample;
pub mod ribs;
pub mod spar;
pub mod units;
pub mod wing;

// Re-export commonly used types at crate root for convenience
pub use builder::{interpolate, interpolate_wing, RibGeometry, SparCutout};
pub use config::{AirfoilSource, WingConfig};
pub use errors::{WingError, WingResult};
pub use file_io::{load_project, save_project};
pub use project::{Project, ProjectMetadata};
pub use wing::{Wing, WingBuilder};
