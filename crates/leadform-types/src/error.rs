use std::collections::BTreeMap;

use thiserror::Error;

use crate::field::FieldName;
use crate::step::Step;

/// A user-correctable problem with one field. `Display` is the message shown
/// under the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter date in mm/dd/yyyy format")]
    DateFormat,

    #[error("Please enter a valid month (01-12)")]
    InvalidMonth,

    #[error("Please enter a valid day (01-31)")]
    InvalidDay,

    #[error("Please enter a valid year (1900-{max})")]
    InvalidYear { max: i32 },

    #[error("Please enter a valid date")]
    InvalidDate,

    #[error("Date of birth cannot be in the future")]
    FutureDate,

    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("Please enter a valid zip code (12345 or 12345-6789)")]
    InvalidZip,

    #[error("Please select an address from the suggestions")]
    AddressNotSelected,

    #[error("We could not parse that address, please search again")]
    AddressUnresolved,
}

/// Field errors reported together for one submission, keyed by field.
pub type FieldErrors = BTreeMap<FieldName, FieldError>;

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(name, error)| format!("{name}: {error}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a step submission was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A step-specific check failed before field validation ran.
    #[error("step precondition failed: {}", describe(.0))]
    Precondition(FieldErrors),

    /// One or more declared fields failed validation.
    #[error("field validation failed: {}", describe(.0))]
    Invalid(FieldErrors),

    #[error("step '{step}' is locked until the form reaches it (currently at '{reached}')")]
    Locked { step: Step, reached: Step },

    #[error("step '{0}' is terminal and cannot be submitted")]
    Terminal(Step),
}

impl SubmitError {
    /// The per-field errors to display, if this rejection carries any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Precondition(errors) | SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Locked { .. } | SubmitError::Terminal(_) => None,
        }
    }
}

/// Errors from slot storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage connection error: {0}")]
    Connection(String),

    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from the address autocomplete/geocoding adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The service failed or returned nothing usable.
    #[error("address resolution failed: {0}")]
    Resolution(String),

    /// Components came back but no street, city or state could be found.
    #[error("unable to parse address: {0}")]
    Parse(String),

    /// No service credential is configured.
    #[error("address service unavailable: {0}")]
    Unavailable(String),
}

impl AddressError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AddressError::Resolution(_) => "RESOLUTION_ERROR",
            AddressError::Parse(_) => "PARSE_ERROR",
            AddressError::Unavailable(_) => "UNAVAILABLE",
        }
    }
}
