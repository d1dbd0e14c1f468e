use leadform_types::field::FieldName;
use leadform_types::step::{Step, SubTab};

use super::{StepController, Transition};

/// Step 1: name, date of birth and optional gender.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoStep;

impl StepController for InfoStep {
    fn step(&self) -> Step {
        Step::Info
    }

    fn fields_to_validate(&self) -> &'static [FieldName] {
        &[FieldName::DateOfBirth]
    }

    fn required_fields(&self) -> &'static [FieldName] {
        &[FieldName::FullName, FieldName::DateOfBirth]
    }

    fn transition(&self) -> Option<Transition> {
        Some(Transition {
            target: Step::Address,
            tab: Some(SubTab::Address),
        })
    }
}
