//! Form session: the state machine wired to debounced draft persistence.
//!
//! `open` restores the draft, every accepted submission schedules a save,
//! and `close` consumes the session after flushing the final draft. Tab
//! switches are not part of the draft and are never persisted.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use leadform_types::config::FormConfig;
use leadform_types::draft::FormDraft;
use leadform_types::error::SubmitError;
use leadform_types::field::FieldValues;
use leadform_types::step::{Panel, StepSelection, SubTab, TabKey, TabState};

use crate::machine::FormStateMachine;
use crate::steps::{AddressStep, StepController, submit_step, submit_step_on};
use crate::storage::draft_store::DraftStore;
use crate::storage::slot_store::SlotStore;
use crate::storage::writer::{DEFAULT_WRITE_DELAY, DraftWriter};

/// Tunables for a [`FormSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Quiet period before a scheduled draft write hits storage.
    pub write_delay: Duration,
}

impl SessionOptions {
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            write_delay: Duration::from_millis(config.persistence.debounce_ms),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            write_delay: DEFAULT_WRITE_DELAY,
        }
    }
}

pub struct FormSession<S> {
    machine: FormStateMachine,
    writer: DraftWriter<S>,
}

impl<S: SlotStore + 'static> FormSession<S> {
    /// Restore the saved draft and start the background writer.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub async fn open(store: DraftStore<S>, options: SessionOptions) -> Self {
        let draft = store.load().await;
        let machine = FormStateMachine::new(draft);
        tracing::info!(step = %machine.step(), "form session opened");

        let writer = DraftWriter::spawn(Arc::new(store), options.write_delay);
        Self { machine, writer }
    }

    /// Submit a step. On success the new draft is scheduled for saving.
    pub fn submit<C: StepController + ?Sized>(
        &mut self,
        controller: &C,
        values: &FieldValues,
    ) -> Result<StepSelection, SubmitError> {
        let selection = submit_step(controller, &mut self.machine, values)?;
        self.schedule_save();
        Ok(selection)
    }

    /// [`submit`](Self::submit) with an explicit reference date for
    /// date-of-birth checks.
    pub fn submit_on<C: StepController + ?Sized>(
        &mut self,
        controller: &C,
        values: &FieldValues,
        today: NaiveDate,
    ) -> Result<StepSelection, SubmitError> {
        let selection = submit_step_on(controller, &mut self.machine, values, today)?;
        self.schedule_save();
        Ok(selection)
    }

    pub fn select_tab(&mut self, tab: SubTab) -> bool {
        self.machine.select_tab(tab)
    }

    pub fn navigate_tab(&mut self, key: TabKey) -> Option<SubTab> {
        self.machine.navigate(key)
    }

    pub fn tabs(&self) -> [TabState; 2] {
        self.machine.tabs()
    }

    pub fn panel(&self) -> Panel {
        self.machine.panel()
    }

    pub fn draft(&self) -> &FormDraft {
        self.machine.draft()
    }

    pub fn selection(&self) -> StepSelection {
        self.machine.selection()
    }

    pub fn machine(&self) -> &FormStateMachine {
        &self.machine
    }

    /// An address step primed with any address already in the draft.
    pub fn address_step(&self) -> AddressStep {
        AddressStep::from_draft(self.machine.draft())
    }

    /// Flush the current draft and end the session.
    pub async fn close(self) -> FormDraft {
        let draft = self.machine.into_draft();
        self.writer.flush(&draft).await;
        tracing::info!(step = %draft.step, "form session closed");
        draft
    }

    fn schedule_save(&self) {
        self.writer.schedule(self.machine.draft().clone());
    }
}
