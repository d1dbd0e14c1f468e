//! Debounced draft writer.
//!
//! Rapid typing produces a burst of draft mutations; only the last one in a
//! quiet window needs to hit storage. `DraftWriter` owns a single worker task
//! fed through an unbounded channel:
//!
//! - every scheduled draft replaces the pending one and restarts the timer,
//! - when the timer fires, the pending draft is written,
//! - `flush` cancels the worker, waits for it (so a write already in flight
//!   finishes first), then writes the latest draft directly.
//!
//! Writes are issued from one task, so they can never be reordered.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use leadform_types::config::DEFAULT_DEBOUNCE_MS;
use leadform_types::draft::FormDraft;

use super::draft_store::DraftStore;
use super::slot_store::SlotStore;

/// Default coalescing window for draft writes.
pub const DEFAULT_WRITE_DELAY: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

/// Handle to the background write task.
///
/// Must be created inside a tokio runtime.
pub struct DraftWriter<S> {
    store: Arc<DraftStore<S>>,
    sender: mpsc::UnboundedSender<FormDraft>,
    cancellation: CancellationToken,
    worker: JoinHandle<()>,
}

impl<S: SlotStore + 'static> DraftWriter<S> {
    /// Spawn the worker task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(store: Arc<DraftStore<S>>, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancellation = CancellationToken::new();
        let worker = tokio::spawn(run_debounced_writes(
            Arc::clone(&store),
            receiver,
            delay,
            cancellation.clone(),
        ));

        Self {
            store,
            sender,
            cancellation,
            worker,
        }
    }

    /// Queue a draft for writing once the debounce window passes quietly.
    pub fn schedule(&self, draft: FormDraft) {
        if self.sender.send(draft).is_err() {
            tracing::warn!("draft writer has stopped, dropping scheduled save");
        }
    }

    pub fn store(&self) -> &Arc<DraftStore<S>> {
        &self.store
    }

    /// Cancel any pending write and synchronously persist `latest`.
    ///
    /// After this returns exactly one more write has happened, and it holds
    /// `latest`.
    pub async fn flush(self, latest: &FormDraft) {
        self.cancellation.cancel();
        if let Err(err) = self.worker.await {
            tracing::error!("draft writer task ended abnormally: {err}");
        }
        tracing::debug!(step = %latest.step, "flushing draft on teardown");
        self.store.save(latest).await;
    }
}

async fn run_debounced_writes<S: SlotStore>(
    store: Arc<DraftStore<S>>,
    mut receiver: mpsc::UnboundedReceiver<FormDraft>,
    delay: Duration,
    cancellation: CancellationToken,
) {
    let mut pending: Option<FormDraft> = None;

    loop {
        tokio::select! {
            biased;

            () = cancellation.cancelled() => {
                if pending.is_some() {
                    tracing::debug!("pending draft write superseded by final flush");
                }
                break;
            }

            received = receiver.recv() => match received {
                Some(draft) => {
                    tracing::trace!(step = %draft.step, "draft write scheduled");
                    pending = Some(draft);
                }
                None => {
                    // Writer handle dropped without a flush: write what we have.
                    if let Some(draft) = pending.take() {
                        store.save(&draft).await;
                    }
                    break;
                }
            },

            () = tokio::time::sleep(delay), if pending.is_some() => {
                if let Some(draft) = pending.take() {
                    store.save(&draft).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::draft_store::DRAFT_SLOT_KEY;
    use crate::storage::slot_store::MemorySlotStore;
    use leadform_types::field::FieldName;
    use leadform_types::step::Step;

    fn draft_with_name(name: &str) -> FormDraft {
        let mut draft = FormDraft::new();
        draft.set(FieldName::FullName, name);
        draft
    }

    fn writer(slots: &MemorySlotStore) -> DraftWriter<MemorySlotStore> {
        DraftWriter::spawn(Arc::new(DraftStore::new(slots.clone())), DEFAULT_WRITE_DELAY)
    }

    fn stored(slots: &MemorySlotStore) -> FormDraft {
        serde_json::from_str(&slots.get(DRAFT_SLOT_KEY).unwrap()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced_into_one_write() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        writer.schedule(draft_with_name("A"));
        writer.schedule(draft_with_name("Ad"));
        writer.schedule(draft_with_name("Ada"));

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(slots.write_count(), 1);
        assert_eq!(stored(&slots), draft_with_name("Ada"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_written_inside_the_window() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        writer.schedule(draft_with_name("A"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(slots.write_count(), 0);

        // A new mutation restarts the window.
        writer.schedule(draft_with_name("Ada"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(slots.write_count(), 0);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(slots.write_count(), 1);
        assert_eq!(stored(&slots), draft_with_name("Ada"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_windows_write_separately_in_order() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        writer.schedule(draft_with_name("first"));
        tokio::time::sleep(Duration::from_millis(350)).await;
        writer.schedule(draft_with_name("second"));
        tokio::time::sleep(Duration::from_millis(350)).await;

        let history = slots.history();
        assert_eq!(history.len(), 2);
        assert!(history[0].1.contains("first"));
        assert!(history[1].1.contains("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_cancels_pending_and_writes_latest_once() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        writer.schedule(draft_with_name("stale"));

        let mut latest = draft_with_name("Ada");
        latest.step = Step::Info;
        writer.flush(&latest).await;

        assert_eq!(slots.write_count(), 1);
        assert_eq!(stored(&slots), latest);

        // The cancelled timer never fires afterwards.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(slots.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_after_debounced_write_writes_again() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        writer.schedule(draft_with_name("Ada"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        writer.flush(&draft_with_name("Ada")).await;

        assert_eq!(slots.write_count(), 2);
        assert_eq!(stored(&slots), draft_with_name("Ada"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failures_do_not_stop_the_worker() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        slots.set_fail_writes(true);
        writer.schedule(draft_with_name("lost"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(slots.write_count(), 0);

        slots.set_fail_writes(false);
        writer.schedule(draft_with_name("kept"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(slots.write_count(), 1);
        assert_eq!(stored(&slots), draft_with_name("kept"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_writer_still_writes_pending() {
        let slots = MemorySlotStore::new();
        let writer = writer(&slots);

        writer.schedule(draft_with_name("Ada"));
        drop(writer);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(slots.write_count(), 1);
        assert_eq!(stored(&slots), draft_with_name("Ada"));
    }
}
