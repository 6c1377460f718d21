//! # File I/O Module
//!
//! Persists the project list as a single JSON document:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Self-healing loads**: Unreadable data is logged, cleared, and treated as empty
//! - **Backups**: Export/import of the exact project shape
//!
//! ## File Format
//!
//! The store lives at `<data_dir>/voltmaster_projects.json` and holds a JSON
//! array of project records. Older records with a single `date` field are
//! migrated on load and written back in the current shape.
//!
//! ## Example
//!
//! ```rust,no_run
//! use volt_core::file_io::ProjectStore;
//! use volt_core::project::{today, ProjectDraft};
//!
//! let store = ProjectStore::new(".voltmaster");
//! let mut projects = store.load_all(today())?;
//!
//! projects.create(ProjectDraft::starting("Panel upgrade", "IndusCorp", today()), today())?;
//! store.save_all(&projects)?;
//! # Ok::<(), volt_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, ProjectList, ProjectRecord};

/// Fixed name of the project collection
pub const PROJECTS_NAMESPACE: &str = "voltmaster_projects";

/// JSON file store for the project list.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    data_dir: PathBuf,
}

impl ProjectStore {
    /// Store rooted at `data_dir`. Nothing is touched until the first read or write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ProjectStore {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", PROJECTS_NAMESPACE))
    }

    /// Load every project, deriving statuses for `today`.
    ///
    /// A missing file is an empty list. Content that is not a JSON array of
    /// records is logged, removed, and also yields an empty list.
    pub fn load_all(&self, today: NaiveDate) -> CalcResult<ProjectList> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "project store not found, starting empty");
                return Ok(ProjectList::default());
            }
            Err(e) => {
                return Err(CalcError::file_error(
                    "read",
                    path.display().to_string(),
                    e.to_string(),
                ))
            }
        };

        match serde_json::from_str::<Vec<ProjectRecord>>(&contents) {
            Ok(records) => {
                debug!(path = %path.display(), count = records.len(), "loaded projects");
                let migrated = records.iter().any(ProjectRecord::needs_migration);
                let list = ProjectList::from_records(records, today);
                if migrated {
                    self.save_all(&list)?;
                    debug!(path = %path.display(), "migrated legacy project records");
                }
                Ok(list)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupted project store, clearing");
                self.clear()?;
                Ok(ProjectList::default())
            }
        }
    }

    /// Overwrite the store with `projects`.
    pub fn save_all(&self, projects: &ProjectList) -> CalcResult<()> {
        let path = self.path();
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            CalcError::file_error(
                "create data dir",
                self.data_dir.display().to_string(),
                e.to_string(),
            )
        })?;

        let json = serde_json::to_string(projects.projects())?;
        atomic_write(&path, &json)?;

        debug!(path = %path.display(), count = projects.len(), "saved projects");
        Ok(())
    }

    /// Remove the backing file. Clearing an empty store is not an error.
    pub fn clear(&self) -> CalcResult<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "cleared project store");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CalcError::file_error(
                "remove",
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    /// Write `projects` to `path` as a pretty-printed JSON array.
    pub fn export_backup(&self, projects: &ProjectList, path: &Path) -> CalcResult<()> {
        let json = serde_json::to_string_pretty(projects.projects())?;
        atomic_write(path, &json)?;
        debug!(path = %path.display(), count = projects.len(), "exported backup");
        Ok(())
    }

    /// Replace the stored list with the backup at `path`.
    ///
    /// Unlike [`ProjectStore::load_all`], a malformed backup is an error and
    /// the current store is left untouched.
    pub fn import_backup(&self, path: &Path, today: NaiveDate) -> CalcResult<ProjectList> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        let projects: Vec<Project> = serde_json::from_str(&contents).map_err(|e| {
            CalcError::serialization(format!("Invalid backup {}: {}", path.display(), e))
        })?;

        let list = ProjectList::from_projects(projects, today);
        self.save_all(&list)?;
        debug!(path = %path.display(), count = list.len(), "imported backup");
        Ok(list)
    }
}

/// Write `contents` to `path` atomically.
///
/// 1. Write to a temporary file (.tmp)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
fn atomic_write(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ProjectDraft, ProjectStatus};
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_list(today: NaiveDate) -> ProjectList {
        let mut list = ProjectList::default();
        let factory = ProjectDraft::new("Factory A", "IndusCorp", d(2024, 3, 1), d(2024, 3, 20));
        list.create(factory, today).unwrap();
        let house = ProjectDraft::new("Res. Johnson", "Mr. Johnson", d(2024, 2, 1), d(2024, 2, 10))
            .with_completed(true);
        list.create(house, today).unwrap();
        list
    }

    #[test]
    fn test_store_path() {
        let store = ProjectStore::new("/data");
        assert_eq!(store.path(), Path::new("/data/voltmaster_projects.json"));
    }

    #[test]
    fn test_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path().join("nested"));
        assert!(store.load_all(d(2024, 3, 5)).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let today = d(2024, 3, 5);
        let list = sample_list(today);

        store.save_all(&list).unwrap();
        let loaded = store.load_all(today).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_load_rederives_statuses() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        store.save_all(&sample_list(d(2024, 3, 5))).unwrap();

        let later = store.load_all(d(2024, 4, 1)).unwrap();
        assert_eq!(later.projects()[1].status, ProjectStatus::Delayed);
        assert_eq!(later.projects()[0].status, ProjectStatus::Completed);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        store.save_all(&sample_list(d(2024, 3, 5))).unwrap();

        assert!(store.path().exists());
        assert!(!tmp_path_for(&store.path()).exists());
    }

    #[test]
    fn test_corrupted_store_is_cleared() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.load_all(d(2024, 3, 5)).unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_non_array_store_is_cleared() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        fs::write(store.path(), r#"{"id":"1"}"#).unwrap();

        assert!(store.load_all(d(2024, 3, 5)).unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_legacy_records_migrate() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":"1","name":"Old","client":"ACME","date":"2024-01-10","status":"pending"}]"#,
        )
        .unwrap();

        let list = store.load_all(d(2024, 3, 5)).unwrap();
        let project = list.get("1").unwrap();
        assert_eq!(project.start_date, d(2024, 1, 10));
        assert_eq!(project.end_date, d(2024, 1, 10));
        assert_eq!(project.status, ProjectStatus::Delayed);
    }

    #[test]
    fn test_legacy_records_rewritten_on_load() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":"1","name":"Old","client":"ACME","date":"2024-01-10","status":"pending"}]"#,
        )
        .unwrap();

        store.load_all(d(2024, 3, 5)).unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains(r#""startDate":"2024-01-10""#));
        assert!(!contents.contains(r#""date""#));

        // Current records load without a rewrite
        let before = fs::metadata(store.path()).unwrap().modified().unwrap();
        let list = store.load_all(d(2024, 3, 5)).unwrap();
        assert_eq!(list.get("1").unwrap().end_date, d(2024, 1, 10));
        assert_eq!(fs::metadata(store.path()).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        store.save_all(&sample_list(d(2024, 3, 5))).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_backup_export_import() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path().join("store"));
        let backup = dir.path().join("backup.json");
        let today = d(2024, 3, 5);
        let list = sample_list(today);

        store.export_backup(&list, &backup).unwrap();
        let contents = fs::read_to_string(&backup).unwrap();
        let exported: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(exported.as_array().unwrap().len(), 2);
        assert!(exported[0]["startDate"].is_string());

        let imported = store.import_backup(&backup, today).unwrap();
        assert_eq!(imported, list);
        assert_eq!(store.load_all(today).unwrap(), list);
    }

    #[test]
    fn test_bad_backup_keeps_store() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let today = d(2024, 3, 5);
        let list = sample_list(today);
        store.save_all(&list).unwrap();

        let backup = dir.path().join("bad.json");
        fs::write(&backup, r#"[{"name":"missing fields"}]"#).unwrap();

        assert!(matches!(
            store.import_backup(&backup, today),
            Err(CalcError::SerializationError { .. })
        ));
        assert_eq!(store.load_all(today).unwrap(), list);
    }
}
