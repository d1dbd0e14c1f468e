//! SQLite slot store implementation.
//!
//! Implements `SlotStore` from `leadform-core` on the `form_slots` table.
//! Writes are upserts stamped with an RFC 3339 `updated_at`.

use chrono::Utc;
use sqlx::Row;

use leadform_core::storage::slot_store::SlotStore;
use leadform_types::error::StorageError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SlotStore`.
pub struct SqliteSlotStore {
    pool: DatabasePool,
}

impl SqliteSlotStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// When a slot was last written, if ever.
    pub async fn updated_at(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT updated_at FROM form_slots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        row.map(|row| row.try_get::<String, _>("updated_at"))
            .transpose()
            .map_err(|e| StorageError::Query(e.to_string()))
    }
}

impl SlotStore for SqliteSlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM form_slots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(|e| StorageError::Query(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO form_slots (key, value, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        tracing::trace!(key, bytes = value.len(), "slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadform_core::storage::draft_store::DraftStore;
    use leadform_types::draft::FormDraft;
    use leadform_types::field::FieldName;
    use leadform_types::step::Step;

    async fn test_store() -> (SqliteSlotStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(&dir.path().join("slots.db")).await.unwrap();
        (SqliteSlotStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_read_missing_slot() {
        let (store, _dir) = test_store().await;
        assert_eq!(store.read("formData").await.unwrap(), None);
        assert_eq!(store.updated_at("formData").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_overwrite() {
        let (store, _dir) = test_store().await;

        store.write("formData", r#"{"step":0}"#).await.unwrap();
        store.write("formData", r#"{"step":1}"#).await.unwrap();

        assert_eq!(
            store.read("formData").await.unwrap().as_deref(),
            Some(r#"{"step":1}"#)
        );
        assert!(store.updated_at("formData").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let (store, _dir) = test_store().await;

        store.write("a", "1").await.unwrap();
        store.write("b", "2").await.unwrap();

        assert_eq!(store.read("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.read("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_draft_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slots.db");

        let mut draft = FormDraft::new();
        draft.set(FieldName::Email, "user@example.com");
        draft.step = Step::Info;
        {
            let pool = DatabasePool::open(&path).await.unwrap();
            DraftStore::new(SqliteSlotStore::new(pool))
                .try_save(&draft)
                .await
                .unwrap();
        }

        let pool = DatabasePool::open(&path).await.unwrap();
        let restored = DraftStore::new(SqliteSlotStore::new(pool)).load().await;
        assert_eq!(restored, draft);
    }
}
