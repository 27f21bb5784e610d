//! # Project Data Structures
//!
//! A `Project` groups several wing configurations under one designer and
//! title. Projects serialize to `.rwp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, designer, title, timestamps)
//! └── wings: HashMap<Uuid, WingConfig>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wing_core::project::Project;
//!
//! let project = Project::new("Ada", "Club trainer");
//! assert_eq!(project.wing_count(), 0);
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Club trainer"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WingConfig;

/// Current schema version for .rwp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container, serialized as a whole to `.rwp` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    /// Wing configurations keyed by UUID
    pub wings: HashMap<Uuid, WingConfig>,
}

impl Project {
    pub fn new(designer: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                designer: designer.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            wings: HashMap::new(),
        }
    }

    /// Add a wing and return the UUID assigned to it.
    pub fn add_wing(&mut self, wing: WingConfig) -> Uuid {
        let id = Uuid::new_v4();
        self.wings.insert(id, wing);
        self.touch();
        id
    }

    pub fn remove_wing(&mut self, id: &Uuid) -> Option<WingConfig> {
        let wing = self.wings.remove(id);
        if wing.is_some() {
            self.touch();
        }
        wing
    }

    pub fn get_wing(&self, id: &Uuid) -> Option<&WingConfig> {
        self.wings.get(id)
    }

    /// Mutable access marks the project as modified.
    pub fn get_wing_mut(&mut self, id: &Uuid) -> Option<&mut WingConfig> {
        if self.wings.contains_key(id) {
            self.meta.modified = Utc::now();
            self.wings.get_mut(id)
        } else {
            None
        }
    }

    /// Wings ordered by name, then id, for stable output.
    pub fn wings_sorted(&self) -> Vec<(&Uuid, &WingConfig)> {
        let mut wings: Vec<_> = self.wings.iter().collect();
        wings.sort_by(|a, b| a.1.name.cmp(&b.1.name).then(a.0.cmp(b.0)));
        wings
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn wing_count(&self) -> usize {
        self.wings.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub designer: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
