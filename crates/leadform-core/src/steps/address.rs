//! Step 2: address search, phone number and phone consent.
//!
//! The structured address comes from resolving an autocomplete suggestion,
//! not from what the user typed. The step holds the resolved selection until
//! submit, where it replaces the raw address text in the patch.

use leadform_types::address::AddressSelection;
use leadform_types::draft::{DraftPatch, FormDraft};
use leadform_types::error::{FieldError, FieldErrors};
use leadform_types::field::{FieldName, FieldValues};
use leadform_types::step::Step;

use super::{StepController, Transition};
use crate::address::resolver::AddressResolver;
use crate::address::service::AddressService;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressStep {
    selection: Option<AddressSelection>,
}

impl AddressStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the selection from a draft that already holds a full address.
    pub fn from_draft(draft: &FormDraft) -> Self {
        Self {
            selection: AddressSelection::from_draft(draft),
        }
    }

    pub fn selection(&self) -> Option<&AddressSelection> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, selection: AddressSelection) {
        self.selection = Some(selection);
    }

    /// Default text for the address search input: the formatted selection,
    /// if there is one, otherwise whatever address the draft holds.
    pub fn display_text(&self, draft: &FormDraft) -> String {
        match &self.selection {
            Some(selection) => selection.display_line(),
            None => draft.get(FieldName::Address).unwrap_or_default().to_string(),
        }
    }

    /// Resolve a chosen suggestion and record it.
    ///
    /// On failure the previous selection is kept and a field error keyed
    /// `address` is returned for display.
    pub async fn choose<A: AddressService>(
        &mut self,
        resolver: &AddressResolver<A>,
        description: &str,
    ) -> Result<&AddressSelection, FieldErrors> {
        match resolver.resolve(description).await {
            Ok(selection) => Ok(self.selection.insert(selection)),
            Err(err) => {
                tracing::warn!(code = err.code(), "keeping previous address selection");
                Err(FieldErrors::from([(
                    FieldName::Address,
                    FieldError::AddressUnresolved,
                )]))
            }
        }
    }
}

impl StepController for AddressStep {
    fn step(&self) -> Step {
        Step::Address
    }

    fn fields_to_validate(&self) -> &'static [FieldName] {
        &[FieldName::PhoneNumber]
    }

    fn required_fields(&self) -> &'static [FieldName] {
        &[FieldName::PhoneNumber, FieldName::PhoneTermsAndConditions]
    }

    fn custom_validation(&self, _values: &FieldValues) -> Option<FieldErrors> {
        if self.selection.is_some() {
            return None;
        }
        Some(FieldErrors::from([(
            FieldName::Address,
            FieldError::AddressNotSelected,
        )]))
    }

    fn transform(&self, mut patch: DraftPatch) -> DraftPatch {
        if let Some(selection) = &self.selection {
            selection.apply_to(&mut patch);
        }
        patch
    }

    fn transition(&self) -> Option<Transition> {
        Some(Transition {
            target: Step::Complete,
            tab: None,
        })
    }
}
