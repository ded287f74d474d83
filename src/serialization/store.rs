use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::snapshot::{Snapshot, SnapshotError};

/// Default file name, matching the storage key of the browser build.
pub const DEFAULT_SNAPSHOT_FILE: &str = "savedProgress.json";

/// A single snapshot slot backed by one JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// True if a snapshot file is present (it may still be malformed).
    pub fn exists(&self) -> bool { self.path.is_file() }

    /// Overwrite the slot with `snapshot`.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let json = snapshot.to_json()?;
        fs::write(&self.path, json)?;
        debug!("saved snapshot to {}", self.path.display());
        Ok(())
    }

    /// Read the slot. `Ok(None)` when nothing has been saved.
    pub fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Snapshot::from_json(&json).map(Some)
    }

    /// Like [`load`](Self::load), but a malformed or unreadable slot is logged
    /// and treated as empty.
    pub fn load_best_effort(&self) -> Option<Snapshot> {
        match self.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("ignoring saved progress at {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Delete the slot. Clearing an empty slot is not an error.
    pub fn clear(&self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self { SnapshotStore::new(DEFAULT_SNAPSHOT_FILE) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Grid;
    use tempfile::tempdir;

    fn sample() -> Snapshot {
        let grid = Grid::from_rows([[0, 0, 2, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 8]]);
        Snapshot::capture(&grid, 28)
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("progress.json"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert!(!store.exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_file_is_not_restored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"[{"x":0,"y":0,"value":2}]"#).unwrap();
        let store = SnapshotStore::new(&path);
        assert!(store.load().is_err());
        assert!(store.load_best_effort().is_none());
        // The file is left alone; the caller decides whether to clear it.
        assert!(store.exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("progress.json"));
        store.save(&sample()).unwrap();
        let mut next = sample();
        next.score = 100;
        store.save(&next).unwrap();
        assert_eq!(store.load_best_effort().map(|s| s.score), Some(100));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(SnapshotStore::default().path(), Path::new(DEFAULT_SNAPSHOT_FILE));
    }
}
