//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Single writer**: The .tmp file is locked while a save is in flight
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Projects are saved as `.mep` (Material Estimator Project) files containing
//! JSON. Estimate requests for the CLI are plain JSON documents.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimator_core::file_io::{save_project, load_project};
//! use estimator_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Ali Traders", "Villa 12");
//! let path = Path::new("villa12.mep");
//!
//! save_project(&project, path).unwrap();
//! let reopened = load_project(path).unwrap();
//! assert_eq!(reopened.meta.project_name, "Villa 12");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use fs2::FileExt;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::{EstimatorError, EstimatorResult};
use crate::project::{Project, SCHEMA_VERSION};

fn read_to_string(path: &Path, operation: &str) -> EstimatorResult<String> {
    let mut file = File::open(path)
        .map_err(|e| EstimatorError::file_error(operation, path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| EstimatorError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Open and exclusively lock a temporary file (.tmp)
/// 3. Write and sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
///
/// A save that finds the .tmp file locked fails with `FileError` and leaves
/// both files alone.
///
/// # Example
///
/// ```rust,no_run
/// use estimator_core::file_io::save_project;
/// use estimator_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Owner", "Job");
/// save_project(&project, Path::new("job.mep"))?;
/// # Ok::<(), estimator_core::errors::EstimatorError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> EstimatorResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| EstimatorError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("mep.tmp");

    // Opened without truncating: the file may belong to a save in progress.
    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&tmp_path)
        .map_err(|e| EstimatorError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file.try_lock_exclusive().map_err(|_| {
        EstimatorError::file_error(
            "lock temp file",
            tmp_path.display().to_string(),
            "another save of this project is in progress",
        )
    })?;
    debug!(path = %tmp_path.display(), "locked temp file");

    tmp_file
        .set_len(0)
        .map_err(|e| EstimatorError::file_error("truncate temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| EstimatorError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| EstimatorError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimatorError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), items = project.item_count(), "saved project");
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(EstimatorError::VersionMismatch)` - File version is incompatible
/// * `Err(EstimatorError::SerializationError)` - Invalid JSON
/// * `Err(EstimatorError::FileError)` - I/O error
pub fn load_project(path: &Path) -> EstimatorResult<Project> {
    let project: Project = load_json(path)?;
    validate_version(&project.meta.version)?;

    info!(path = %path.display(), items = project.item_count(), "loaded project");
    Ok(project)
}

/// Read and parse any JSON document, such as an estimate request.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> EstimatorResult<T> {
    let contents = read_to_string(path, "read")?;
    serde_json::from_str(&contents)
        .map_err(|e| EstimatorError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Major version must match; on 0.x the file's minor must not be newer.
fn validate_version(file_version: &str) -> EstimatorResult<()> {
    let mismatch = || EstimatorError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimations::{CeilingEstimateInput, EstimationItem, TileEstimateInput, TileSpec};
    use crate::room::NamedRoom;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("material_estimator_test_{}.mep", name))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Owner", "Test Job");
        project.settings.ceiling_prices.panel = 400.0;
        project.add_item(EstimationItem::Tile(TileEstimateInput {
            label: "Floors".to_string(),
            rooms: vec![NamedRoom::new("Lounge", 10.0, 10.0)],
            tile: TileSpec::new(2.0, 2.0, 5.0, 100.0),
        }));
        project.add_item(EstimationItem::Ceiling(CeilingEstimateInput {
            label: "Ceilings".to_string(),
            rooms: vec![NamedRoom::new("Lounge", 10.0, 10.0)],
            prices: None,
        }));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.owner, "Test Owner");
        assert_eq!(loaded.meta.project_name, "Test Job");
        assert_eq!(loaded.settings.ceiling_prices.panel, 400.0);
        assert_eq!(loaded.item_count(), 2);
        assert_eq!(loaded.evaluate_all().unwrap().len(), 2);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = path.with_extension("mep.tmp");

        let project = Project::new("Test", "Job");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_concurrent_save_is_refused() {
        let path = temp_project_path("concurrent");
        let tmp_path = path.with_extension("mep.tmp");

        let first = Project::new("Test", "First");
        save_project(&first, &path).unwrap();

        // Another writer is midway through its save
        let busy = File::create(&tmp_path).unwrap();
        busy.lock_exclusive().unwrap();

        let second = Project::new("Test", "Second");
        let err = save_project(&second, &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert_eq!(load_project(&path).unwrap().meta.project_name, "First");

        busy.unlock().unwrap();
        drop(busy);
        save_project(&second, &path).unwrap();
        assert_eq!(load_project(&path).unwrap().meta.project_name, "Second");
        assert!(!tmp_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites_stale_temp_contents() {
        let path = temp_project_path("stale_tmp");
        let tmp_path = path.with_extension("mep.tmp");
        fs::write(&tmp_path, "x".repeat(64 * 1024)).unwrap();

        let project = Project::new("Test", "Job");
        save_project(&project, &path).unwrap();
        assert_eq!(load_project(&path).unwrap().meta.project_name, "Job");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_json_request() {
        let path = temp_dir().join("material_estimator_test_request.json");
        fs::write(
            &path,
            r#"{ "rooms": [{ "name": "Hall", "length": 20, "width": 10 }] }"#,
        )
        .unwrap();

        let request: CeilingEstimateInput = load_json(&path).unwrap();
        assert_eq!(request.rooms[0].name, "Hall");
        assert!(request.prices.is_none());

        fs::write(&path, "{ not json").unwrap();
        let err = load_json::<CeilingEstimateInput>(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/definitely/not/here.mep")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
