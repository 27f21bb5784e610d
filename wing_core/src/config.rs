//! # Wing Configuration
//!
//! [`WingConfig`] is the JSON document a wing is described in. It holds raw,
//! unvalidated values; [`WingConfig::build`] resolves the airfoil sources and
//! runs every check through [`WingBuilder`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "name": "Trainer",
//!   "span": 1200.0,
//!   "incidence_angle": 2.0,
//!   "planform": { "type": "Tapered", "root_chord": 220.0, "taper_ratio": 0.6 },
//!   "root_airfoil": { "file": "airfoils/clarky.dat" },
//!   "tip_airfoil": { "file": "airfoils/naca0009.dat" },
//!   "ribs": { "uniform": { "count": 9 } },
//!   "spars": [
//!     {
//!       "profile": { "type": "Circle", "radius": 4.0 },
//!       "start_rib": 0, "end_rib": 8,
//!       "start_chord_offset": 0.25, "end_chord_offset": 0.3
//!     }
//!   ],
//!   "resampling": { "upper_points": 80, "lower_points": 80 }
//! }
//! ```
//!
//! `.dat` paths are resolved against the directory passed to `build`,
//! normally the directory of the config file. A missing `tip_airfoil` reuses
//! the root airfoil.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airfoil::Airfoil;
use crate::airfoil_dat::load_dat;
use crate::errors::{WingError, WingResult};
use crate::planform::Planform;
use crate::resample::ResampleSettings;
use crate::ribs::RibLayout;
use crate::spar::SparInput;
use crate::units::{Degrees, Millimeters};
use crate::wing::{Wing, WingBuilder};

/// Where an airfoil's coordinates come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirfoilSource {
    /// A Selig or Lednicer `.dat` file
    File(PathBuf),
    /// Points written directly into the config
    Inline(Airfoil),
}

impl AirfoilSource {
    pub fn load(&self, base_dir: &Path) -> WingResult<Airfoil> {
        match self {
            AirfoilSource::File(path) => {
                let path = base_dir.join(path);
                debug!(path = %path.display(), "loading airfoil");
                load_dat(&path)
            }
            AirfoilSource::Inline(airfoil) => Ok(airfoil.clone()),
        }
    }
}

/// Serializable description of a wing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingConfig {
    pub name: String,
    pub span: Millimeters,
    #[serde(default)]
    pub incidence_angle: Degrees,
    pub planform: Planform,
    pub root_airfoil: AirfoilSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_airfoil: Option<AirfoilSource>,
    #[serde(default)]
    pub ribs: RibLayout,
    #[serde(default)]
    pub spars: Vec<SparInput>,
    #[serde(default)]
    pub resampling: ResampleSettings,
}

impl WingConfig {
    pub fn from_json(text: &str) -> WingResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a config file. Use the file's parent directory as the `build`
    /// base directory.
    pub fn load(path: &Path) -> WingResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| WingError::file_error("read config", path.display().to_string(), e.to_string()))?;
        WingConfig::from_json(&text).map_err(|e| match e {
            WingError::SerializationError { reason } => WingError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), reason),
            },
            other => other,
        })
    }

    /// Resolve airfoils and validate everything into a [`Wing`].
    ///
    /// The root and tip share one `Arc` when the tip is omitted or names the
    /// same source, so rib building skips resampling.
    pub fn build(&self, base_dir: &Path) -> WingResult<Wing> {
        self.resampling.validate().map_err(|e| e.within("resampling"))?;

        let root = Arc::new(self.root_airfoil.load(base_dir)?);
        let tip = match &self.tip_airfoil {
            Some(source) if *source != self.root_airfoil => Arc::new(source.load(base_dir)?),
            _ => Arc::clone(&root),
        };

        WingBuilder::new(self.name.clone(), self.span, self.planform, root, tip)
            .incidence_angle(self.incidence_angle)
            .ribs(self.ribs.clone())
            .spars(self.spars.iter().cloned())
            .build()
    }
}

impl Wing {
    /// Describe this wing as a config with inline airfoils, explicit rib
    /// positions and default resampling.
    pub fn to_config(&self) -> WingConfig {
        let tip_airfoil = if self.shares_airfoil() {
            None
        } else {
            Some(AirfoilSource::Inline(self.tip_airfoil().as_ref().clone()))
        };

        WingConfig {
            name: self.name().to_string(),
            span: self.span(),
            incidence_angle: self.incidence_angle(),
            planform: *self.planform(),
            root_airfoil: AirfoilSource::Inline(self.root_airfoil().as_ref().clone()),
            tip_airfoil,
            ribs: RibLayout::Positions(self.ribs().positions().to_vec()),
            spars: self.spars().iter().map(|s| s.to_input()).collect(),
            resampling: ResampleSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::tests::naca_symmetric;
    use crate::wing::tests::circle_spar;
    use std::env::temp_dir;

    const INLINE: &str = r#"{
        "name": "Glider",
        "span": 1500.0,
        "incidence_angle": 1.5,
        "planform": { "type": "Straight", "chord": 180.0 },
        "root_airfoil": { "inline": {
            "name": "wedge",
            "upper": [{"x": 0.0, "y": 0.0}, {"x": 0.3, "y": 0.08}, {"x": 1.0, "y": 0.0}],
            "lower": [{"x": 0.0, "y": 0.0}, {"x": 0.3, "y": -0.04}, {"x": 1.0, "y": 0.0}]
        } },
        "ribs": { "uniform": { "count": 6 } },
        "spars": [{
            "profile": { "type": "Rect", "width": 5.0, "height": 6.0 },
            "start_rib": 0, "end_rib": 5,
            "start_chord_offset": 0.3, "end_chord_offset": 0.3
        }]
    }"#;

    #[test]
    fn test_inline_config_builds() {
        let config = WingConfig::from_json(INLINE).unwrap();
        assert_eq!(config.resampling, ResampleSettings::default());
        assert!(config.tip_airfoil.is_none());

        let wing = config.build(Path::new(".")).unwrap();
        assert_eq!(wing.rib_count(), 6);
        assert_eq!(wing.incidence_angle(), Degrees(1.5));
        assert!(Arc::ptr_eq(wing.root_airfoil(), wing.tip_airfoil()));
        assert_eq!(wing.spars().len(), 1);
    }

    #[test]
    fn test_invalid_config_reports_field() {
        let mut config = WingConfig::from_json(INLINE).unwrap();
        config.spars[0].end_rib = 6;
        match config.build(Path::new(".")).unwrap_err() {
            WingError::InvalidInput { field, .. } => assert_eq!(field, "spars[0].end_rib"),
            other => panic!("unexpected error: {other:?}"),
        }

        let mut config = WingConfig::from_json(INLINE).unwrap();
        config.resampling.lower_points = 0;
        match config.build(Path::new(".")).unwrap_err() {
            WingError::InvalidInput { field, .. } => assert_eq!(field, "resampling.lower_points"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = WingConfig::from_json("{ \"name\": 3 }").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_file_sources_resolve_against_base_dir() {
        let dir = temp_dir().join("ribwright_config_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("root.dat"),
            "ROOT\n1.0 0.0\n0.5 0.06\n0.0 0.0\n0.5 -0.03\n1.0 0.0\n",
        )
        .unwrap();
        fs::write(dir.join("tip.dat"), "TIP\n1.0 0.0\n0.5 0.04\n0.0 0.0\n0.5 -0.02\n1.0 0.0\n").unwrap();

        let config = WingConfig {
            name: "Files".to_string(),
            span: Millimeters(900.0),
            incidence_angle: Degrees(0.0),
            planform: Planform::Straight { chord: 150.0 },
            root_airfoil: AirfoilSource::File(PathBuf::from("root.dat")),
            tip_airfoil: Some(AirfoilSource::File(PathBuf::from("tip.dat"))),
            ribs: RibLayout::Positions(vec![0.0, 300.0, 900.0]),
            spars: Vec::new(),
            resampling: ResampleSettings::default(),
        };
        let wing = config.build(&dir).unwrap();
        assert_eq!(wing.root_airfoil().name(), "ROOT");
        assert_eq!(wing.tip_airfoil().name(), "TIP");
        assert_eq!(wing.ribs().positions(), &[0.0, 300.0, 900.0]);

        let missing = WingConfig {
            tip_airfoil: Some(AirfoilSource::File(PathBuf::from("nope.dat"))),
            ..config
        };
        assert_eq!(missing.build(&dir).unwrap_err().error_code(), "FILE_ERROR");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_same_tip_source_shares_airfoil() {
        let mut config = WingConfig::from_json(INLINE).unwrap();
        config.tip_airfoil = Some(config.root_airfoil.clone());
        let wing = config.build(Path::new(".")).unwrap();
        assert!(Arc::ptr_eq(wing.root_airfoil(), wing.tip_airfoil()));
    }

    #[test]
    fn test_to_config_rebuilds_same_wing() {
        let root = Arc::new(naca_symmetric("naca0012", 0.12, 21));
        let tip = Arc::new(naca_symmetric("naca0009", 0.09, 21));
        let mut wing = WingBuilder::new(
            "Export",
            Millimeters(1000.0),
            Planform::Straight { chord: 200.0 },
            root,
            tip,
        )
        .ribs(RibLayout::Uniform { count: 4 })
        .spar(circle_spar(0, 3))
        .build()
        .unwrap();
        wing.shift_rib(1, 20.0).unwrap();

        let config = wing.to_config();
        assert!(config.tip_airfoil.is_some());

        assert_eq!(config.build(Path::new(".")).unwrap(), wing);

        let json = serde_json::to_string(&config).unwrap();
        let reloaded = WingConfig::from_json(&json).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.build(Path::new(".")).unwrap(), wing);
    }
}
