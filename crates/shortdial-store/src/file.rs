//! JSON file persistence.
//!
//! The directory lives in a single human-readable file: a JSON array of
//! `{ "id", "name", "short" }` objects, pretty-printed with two-space
//! indentation and with non-ASCII text written as-is.
//!
//! Writes go to a temporary file in the same directory, which is flushed
//! and then renamed over the target, so a crash mid-write never leaves a
//! truncated file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use shortdial_types::{EmployeeRecord, PersistedRecord};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordPersistence;

/// File name used when no other location is configured.
pub const DEFAULT_DATA_FILE: &str = "employees.json";

/// [`RecordPersistence`] backed by one JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Persist to the file at `path`. Nothing is touched until the first
    /// load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the backing file (and its temporary sibling).
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Flush the directory entry so the rename itself is durable.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl Default for JsonFilePersistence {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl RecordPersistence for JsonFilePersistence {
    fn load(&self) -> StoreResult<Option<Vec<PersistedRecord>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let records: Vec<PersistedRecord> = serde_json::from_str(&text).map_err(|e| {
            StoreError::Serialization(format!("{}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), count = records.len(), "read directory file");
        Ok(Some(records))
    }

    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()> {
        let mut payload = serde_json::to_vec_pretty(records)?;
        payload.push(b'\n');

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&payload)?;
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        sync_dir(dir)?;

        debug!(
            path = %self.path.display(),
            count = records.len(),
            bytes = payload.len(),
            "wrote directory file"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<EmployeeRecord> {
        vec![
            EmployeeRecord::new("张三", "101"),
            EmployeeRecord::new("Alice", "202"),
        ]
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path().join("employees.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_preserves_order_and_ids() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path().join("employees.json"));
        let records = sample();

        backend.save(&records).unwrap();
        let loaded = backend.load().unwrap().unwrap();

        let expected: Vec<PersistedRecord> =
            records.into_iter().map(PersistedRecord::from).collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn file_is_pretty_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        let backend = JsonFilePersistence::new(&path);

        backend.save(&sample()).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("[\n  {\n    \"id\": "));
        assert!(text.contains("\"name\": \"张三\""));
        assert!(!text.contains("\\u"));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path().join("employees.json"));

        backend.save(&sample()).unwrap();
        backend.save(&[]).unwrap();

        assert_eq!(backend.load().unwrap(), Some(vec![]));
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path().join("employees.json"));

        backend.save(&sample()).unwrap();
        backend.save(&sample()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, "[]").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        JsonFilePersistence::new(&path).save(&sample()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn save_syncs_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        sync_dir(dir.path()).unwrap();
        let backend = JsonFilePersistence::new(dir.path().join("employees.json"));
        backend.save(&sample()).unwrap();
        sync_dir(backend.parent_dir()).unwrap();
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/employees.json");
        let backend = JsonFilePersistence::new(&path);

        backend.save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn malformed_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFilePersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)), "got: {err}");
    }

    #[test]
    fn wrong_shape_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, r#"{"name": "Alice", "short": "101"}"#).unwrap();

        let err = JsonFilePersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn legacy_file_without_ids_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(
            &path,
            "[\n  {\n    \"name\": \"张三\",\n    \"short\": \"101\"\n  }\n]",
        )
        .unwrap();

        let loaded = JsonFilePersistence::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].id.is_none());
        assert_eq!(loaded[0].name, "张三");
    }

    #[test]
    fn directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path());
        let err = backend.load().unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn relative_path_parent_is_cwd() {
        let backend = JsonFilePersistence::default();
        assert_eq!(backend.path(), Path::new(DEFAULT_DATA_FILE));
        assert_eq!(backend.parent_dir(), Path::new("."));
    }
}
