//! Draft persistence on top of a slot store.
//!
//! The whole draft (fields plus `step`) lives in one slot under a fixed key,
//! JSON-encoded. Loading never fails: a missing, unreadable or corrupt slot
//! is an empty draft. Saving is best-effort: failures are logged and the form
//! keeps working in memory.

use leadform_types::draft::FormDraft;
use leadform_types::error::StorageError;

use super::slot_store::SlotStore;

/// Slot key the draft is stored under.
pub const DRAFT_SLOT_KEY: &str = "formData";

/// Loads and saves the form draft through a [`SlotStore`].
pub struct DraftStore<S> {
    slots: S,
    key: String,
}

impl<S: SlotStore> DraftStore<S> {
    /// Create a draft store using the default slot key.
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DRAFT_SLOT_KEY)
    }

    pub fn with_key(slots: S, key: &str) -> Self {
        Self {
            slots,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Restore the persisted draft, or an empty one.
    pub async fn load(&self) -> FormDraft {
        let raw = match self.slots.read(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved draft, starting empty");
                return FormDraft::default();
            }
            Err(err) => {
                tracing::warn!(key = %self.key, "failed to read saved draft: {err}");
                return FormDraft::default();
            }
        };

        match serde_json::from_str::<FormDraft>(&raw) {
            Ok(draft) => {
                tracing::debug!(key = %self.key, step = %draft.step, fields = draft.len(), "restored draft");
                draft
            }
            Err(err) => {
                tracing::warn!(key = %self.key, "failed to parse saved draft: {err}");
                FormDraft::default()
            }
        }
    }

    /// Persist the draft, logging (not returning) any failure.
    pub async fn save(&self, draft: &FormDraft) {
        if let Err(err) = self.try_save(draft).await {
            tracing::error!(key = %self.key, "failed to save draft: {err}");
        }
    }

    /// Persist the draft and report the outcome.
    pub async fn try_save(&self, draft: &FormDraft) -> Result<(), StorageError> {
        let json = serde_json::to_string(draft)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.slots.write(&self.key, &json).await
    }
}
