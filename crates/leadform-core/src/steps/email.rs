use leadform_types::field::FieldName;
use leadform_types::step::{Step, SubTab};

use super::{StepController, Transition};

/// Step 0: email address plus consent checkboxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailStep;

impl StepController for EmailStep {
    fn step(&self) -> Step {
        Step::Email
    }

    fn fields_to_validate(&self) -> &'static [FieldName] {
        &[FieldName::Email]
    }

    fn required_fields(&self) -> &'static [FieldName] {
        &[FieldName::Email, FieldName::TermsAndConditions]
    }

    fn transition(&self) -> Option<Transition> {
        Some(Transition {
            target: Step::Info,
            tab: Some(SubTab::Info),
        })
    }
}
