//! Step controllers and the shared submission pipeline.
//!
//! A controller only describes its step: which fields it validates, which
//! it marks required, any extra precondition, how it rewrites the gathered
//! values and where the form goes next. [`submit_step`] does the rest against
//! the [`FormStateMachine`], so every step behaves the same way:
//!
//! 1. terminal steps and steps not reached yet are rejected,
//! 2. the custom precondition runs and short-circuits on failure,
//! 3. every declared field is validated and all failures are reported together,
//! 4. the values are turned into a patch, transformed, merged into the draft,
//!    and the step/tab transition is applied.
//!
//! Any rejection leaves the draft and step untouched.

pub mod address;
pub mod complete;
pub mod email;
pub mod info;

pub use address::AddressStep;
pub use complete::CompleteStep;
pub use email::EmailStep;
pub use info::InfoStep;

use chrono::{Local, NaiveDate};

use leadform_types::draft::DraftPatch;
use leadform_types::error::{FieldErrors, SubmitError};
use leadform_types::field::{FieldName, FieldValues};
use leadform_types::step::{Step, StepSelection, SubTab};

use crate::machine::FormStateMachine;
use crate::validation::validate_named;

/// Where a successful submission moves the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Step to advance to (never moves backward).
    pub target: Step,
    /// Sub-tab to activate afterwards, if any.
    pub tab: Option<SubTab>,
}

/// Per-step behaviour plugged into [`submit_step`].
pub trait StepController {
    /// The step this controller renders.
    fn step(&self) -> Step;

    /// Fields checked by the validators on submit.
    fn fields_to_validate(&self) -> &'static [FieldName];

    /// Fields the presentation layer marks as required. Not enforced by
    /// [`submit_step`].
    fn required_fields(&self) -> &'static [FieldName];

    /// Required fields that are absent or blank in `values`.
    fn missing_required(&self, values: &FieldValues) -> Vec<FieldName> {
        self.required_fields()
            .iter()
            .copied()
            .filter(|name| values.field(*name).is_none_or(|value| value.trim().is_empty()))
            .collect()
    }

    /// Step-specific precondition, checked before field validation.
    fn custom_validation(&self, _values: &FieldValues) -> Option<FieldErrors> {
        None
    }

    /// Rewrite the gathered values before they are merged.
    fn transform(&self, patch: DraftPatch) -> DraftPatch {
        patch
    }

    /// Next step and tab after a successful submit; `None` for terminal steps.
    fn transition(&self) -> Option<Transition>;
}

/// Submit a step with today's local date as the reference for date checks.
pub fn submit_step<C: StepController + ?Sized>(
    controller: &C,
    machine: &mut FormStateMachine,
    values: &FieldValues,
) -> Result<StepSelection, SubmitError> {
    submit_step_on(controller, machine, values, Local::now().date_naive())
}

/// Submit a step, validating dates against `today`.
pub fn submit_step_on<C: StepController + ?Sized>(
    controller: &C,
    machine: &mut FormStateMachine,
    values: &FieldValues,
    today: NaiveDate,
) -> Result<StepSelection, SubmitError> {
    let step = controller.step();
    let Some(transition) = controller.transition() else {
        return Err(SubmitError::Terminal(step));
    };

    if step > machine.step() {
        tracing::error!(%step, reached = %machine.step(), "submit for a step that is still locked");
        return Err(SubmitError::Locked {
            step,
            reached: machine.step(),
        });
    }

    if let Some(errors) = controller.custom_validation(values) {
        if !errors.is_empty() {
            tracing::debug!(%step, count = errors.len(), "step precondition failed");
            return Err(SubmitError::Precondition(errors));
        }
    }

    let errors: FieldErrors = controller
        .fields_to_validate()
        .iter()
        .filter_map(|name| {
            let value = values.field(*name).unwrap_or_default();
            validate_named(*name, value, today)
                .err()
                .map(|error| (*name, error))
        })
        .collect();
    if !errors.is_empty() {
        tracing::debug!(%step, count = errors.len(), "step fields invalid");
        return Err(SubmitError::Invalid(errors));
    }

    let patch = controller.transform(DraftPatch::from_values(values));
    machine.merge_fields(&patch);
    machine.advance(transition.target);
    if let Some(tab) = transition.tab {
        machine.select_tab(tab);
    }

    tracing::info!(%step, fields = patch.len(), "step submitted");
    Ok(machine.selection())
}
