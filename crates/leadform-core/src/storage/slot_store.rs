//! Key-value slot storage trait.
//!
//! A slot is a named string value, the moral equivalent of one browser
//! `localStorage` entry. Implementations live in leadform-infra; the
//! in-memory store here backs tests and hosts without durable storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use leadform_types::error::StorageError;

/// Trait for named-slot persistent storage.
///
/// Uses RPITIT (native async fn in traits) like every async port in this
/// workspace. Futures must be `Send` so writes can run on a spawned task.
pub trait SlotStore: Send + Sync {
    /// Read a slot. Returns `None` if it has never been written.
    fn read(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite a slot.
    fn write(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

/// In-process slot store.
///
/// Cloning shares the same slots. Only the latest value per slot and a
/// count of successful writes are kept; test builds also record every write
/// in order. Writes can be made to fail to simulate an unavailable or full
/// storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
    #[cfg(test)]
    history: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot without recording a write.
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        lock(&self.slots).insert(key.to_string(), value.to_string());
        self
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value of a slot.
    pub fn get(&self, key: &str) -> Option<String> {
        lock(&self.slots).get(key).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Every successful write, oldest first.
    #[cfg(test)]
    pub fn history(&self) -> Vec<(String, String)> {
        lock(&self.history).clone()
    }
}

// Poisoning only happens if a holder panicked; the maps are still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl SlotStore for MemorySlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.slots).get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("quota exceeded".to_string()));
        }
        lock(&self.slots).insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        #[cfg(test)]
        lock(&self.history).push((key.to_string(), value.to_string()));
        Ok(())
    }
}
