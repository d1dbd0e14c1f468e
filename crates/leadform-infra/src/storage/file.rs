//! File-backed slot store.
//!
//! Each slot is one `<key>.json` file under a base directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves the previous value intact.

use std::path::{Path, PathBuf};

use leadform_core::storage::slot_store::SlotStore;
use leadform_types::error::StorageError;

/// Slot store keeping one JSON file per slot.
#[derive(Debug, Clone)]
pub struct JsonFileSlotStore {
    base_dir: PathBuf,
}

impl JsonFileSlotStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of a slot's file. Keys that could escape the base directory
    /// are rejected.
    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::Io(format!("invalid slot key '{key}'")));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl SlotStore for JsonFileSlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        tokio::fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            StorageError::Io(format!(
                "failed to create {}: {e}",
                self.base_dir.display()
            ))
        })?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value).await.map_err(|e| {
            StorageError::Io(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            StorageError::Io(format!("failed to replace {}: {e}", path.display()))
        })?;

        tracing::trace!(key, path = %path.display(), "slot written");
        Ok(())
    }
}
