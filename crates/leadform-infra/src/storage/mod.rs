//! Slot storage backends and the configured-backend factory.

pub mod file;

use std::path::Path;

use leadform_core::storage::slot_store::SlotStore;
use leadform_types::config::{FormConfig, StorageBackend};
use leadform_types::error::StorageError;

use crate::config::storage_path;
use crate::sqlite::pool::DatabasePool;
use crate::sqlite::slot::SqliteSlotStore;

pub use file::JsonFileSlotStore;

/// The slot store selected by configuration.
pub enum SlotBackend {
    File(JsonFileSlotStore),
    Sqlite(SqliteSlotStore),
}

impl SlotBackend {
    pub fn name(&self) -> &'static str {
        match self {
            SlotBackend::File(_) => "file",
            SlotBackend::Sqlite(_) => "sqlite",
        }
    }
}

impl SlotStore for SlotBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            SlotBackend::File(store) => store.read(key).await,
            SlotBackend::Sqlite(store) => store.read(key).await,
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            SlotBackend::File(store) => store.write(key, value).await,
            SlotBackend::Sqlite(store) => store.write(key, value).await,
        }
    }
}

/// Open the slot store named by `config.storage`, rooted at `data_dir`.
pub async fn open_slot_store(
    config: &FormConfig,
    data_dir: &Path,
) -> Result<SlotBackend, StorageError> {
    let path = storage_path(config, data_dir);
    let backend = match config.storage.backend {
        StorageBackend::File => SlotBackend::File(JsonFileSlotStore::new(path.clone())),
        StorageBackend::Sqlite => {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StorageError::Io(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
            let pool = DatabasePool::open(&path)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            SlotBackend::Sqlite(SqliteSlotStore::new(pool))
        }
    };

    tracing::info!(backend = backend.name(), path = %path.display(), "slot store opened");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadform_core::storage::draft_store::DraftStore;
    use leadform_types::draft::FormDraft;
    use leadform_types::field::FieldName;
    use tempfile::TempDir;

    fn sample_draft() -> FormDraft {
        let mut draft = FormDraft::new();
        draft.set(FieldName::FullName, "Ada Lovelace");
        draft
    }

    #[tokio::test]
    async fn test_default_config_opens_file_backend() {
        let tmp = TempDir::new().unwrap();
        let backend = open_slot_store(&FormConfig::default(), tmp.path()).await.unwrap();
        assert_eq!(backend.name(), "file");

        let store = DraftStore::new(backend);
        store.try_save(&sample_draft()).await.unwrap();
        assert!(tmp.path().join("drafts/formData.json").exists());
        assert_eq!(store.load().await, sample_draft());
    }

    #[tokio::test]
    async fn test_sqlite_config_opens_sqlite_backend() {
        let tmp = TempDir::new().unwrap();
        let mut config = FormConfig::default();
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.path = Some("nested/form.db".into());

        let backend = open_slot_store(&config, tmp.path()).await.unwrap();
        assert_eq!(backend.name(), "sqlite");

        let store = DraftStore::new(backend);
        store.try_save(&sample_draft()).await.unwrap();
        assert!(tmp.path().join("nested/form.db").exists());
        assert_eq!(store.load().await, sample_draft());
    }
}
