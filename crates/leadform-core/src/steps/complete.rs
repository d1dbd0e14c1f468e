use leadform_types::field::FieldName;
use leadform_types::step::Step;

use super::{StepController, Transition};

/// Step 3: confirmation. Nothing to submit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompleteStep;

impl StepController for CompleteStep {
    fn step(&self) -> Step {
        Step::Complete
    }

    fn fields_to_validate(&self) -> &'static [FieldName] {
        &[]
    }

    fn required_fields(&self) -> &'static [FieldName] {
        &[]
    }

    fn transition(&self) -> Option<Transition> {
        None
    }
}
