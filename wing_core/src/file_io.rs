//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **Version validation**: files from a newer or incompatible schema are rejected
//!
//! Projects are saved as `.rwp` files containing JSON. Airfoil `.dat` paths
//! inside a project resolve against the project file's directory, see
//! [`project_dir`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use wing_core::file_io::{load_project, save_project};
//! use wing_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Ada", "Club trainer");
//! save_project(&project, Path::new("trainer.rwp"))?;
//! let loaded = load_project(Path::new("trainer.rwp"))?;
//! assert_eq!(loaded.meta.title, "Club trainer");
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{WingError, WingResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Save a project with atomic write semantics.
///
/// 1. Serialize the project to JSON
/// 2. Write it to `<path>.rwp.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_project(project: &Project, path: &Path) -> WingResult<()> {
    let json = serde_json::to_string_pretty(project)?;
    let tmp_path = path.with_extension("rwp.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        WingError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    let written = tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| ("write temp file", e))
        .and_then(|()| tmp_file.sync_all().map_err(|e| ("sync temp file", e)));
    drop(tmp_file);
    if let Err((operation, e)) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(WingError::file_error(operation, tmp_path.display().to_string(), e.to_string()));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        WingError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), wings = project.wing_count(), "project saved");
    Ok(())
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - invalid JSON or an invalid wing inside it
/// * `VersionMismatch` - the file was written by an incompatible schema
pub fn load_project(path: &Path) -> WingResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| WingError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| WingError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    validate_version(&project.meta.version)?;

    debug!(path = %path.display(), wings = project.wing_count(), "project loaded");
    Ok(project)
}

/// Directory that relative airfoil paths in a project file resolve against
pub fn project_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// Check that a file version is compatible with [`SCHEMA_VERSION`].
///
/// The major version must match; while the major version is 0, a newer
/// minor version is rejected as well.
pub fn validate_version(file_version: &str) -> WingResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || WingError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.first(), current_parts.first()) {
        (Some(file_major), Some(current_major)) if file_major == current_major => {}
        _ => return Err(mismatch()),
    }
    if current_parts[0] == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::sample_wing;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("ribwright_test_{}.rwp", name))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");
        let mut project = Project::new("Ada", "Trainer");
        let id = project.add_wing(sample_wing("Main"));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.designer, "Ada");
        assert_eq!(loaded.meta.created, project.meta.created);
        let wing = loaded.get_wing(&id).unwrap();
        assert_eq!(wing, project.get_wing(&id).unwrap());
        assert_eq!(wing.build(project_dir(&path)).unwrap().rib_count(), 5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = path.with_extension("rwp.tmp");

        save_project(&Project::new("Ada", "Atomic"), &path).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_save_leaves_no_tmp_file() {
        let dir = temp_dir().join("ribwright_test_failed_save");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("target.rwp")).unwrap();
        let path = dir.join("target.rwp");
        let tmp_path = path.with_extension("rwp.tmp");

        let err = save_project(&Project::new("Ada", "Blocked"), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!tmp_path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_project_path("newer");
        let mut project = Project::new("Ada", "Future");
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_project_path("does_not_exist");
        assert_eq!(load_project(&missing).unwrap_err().error_code(), "FILE_ERROR");

        let path = temp_project_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_project(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_project_dir() {
        assert_eq!(project_dir(Path::new("/tmp/wings/a.rwp")), Path::new("/tmp/wings"));
        assert_eq!(project_dir(Path::new("a.rwp")), Path::new(""));
    }
}
