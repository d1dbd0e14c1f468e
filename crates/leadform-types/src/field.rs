//! Form field names and raw submitted values.
//!
//! `FieldName` is the closed set of keys a draft can hold. `FieldValues` is
//! what a step's inputs produce on submit, before anything is validated or
//! merged: an ordered list of name/value pairs, exactly as the inputs named
//! them (unknown names included).

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Value a checked checkbox submits.
pub const CHECKED: &str = "on";

/// Every field the lead form collects across all steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Email,
    MarketingConsent,
    TermsAndConditions,
    FullName,
    DateOfBirth,
    Gender,
    Address,
    Address2,
    City,
    State,
    Zip,
    PhoneNumber,
    PhoneMarketingConsent,
    PhoneTermsAndConditions,
}

impl FieldName {
    /// All field names, in the order the steps collect them.
    pub const ALL: [FieldName; 14] = [
        FieldName::Email,
        FieldName::MarketingConsent,
        FieldName::TermsAndConditions,
        FieldName::FullName,
        FieldName::DateOfBirth,
        FieldName::Gender,
        FieldName::Address,
        FieldName::Address2,
        FieldName::City,
        FieldName::State,
        FieldName::Zip,
        FieldName::PhoneNumber,
        FieldName::PhoneMarketingConsent,
        FieldName::PhoneTermsAndConditions,
    ];

    /// The wire name used in submitted values and in the persisted draft.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Email => "email",
            FieldName::MarketingConsent => "marketingConsent",
            FieldName::TermsAndConditions => "termsAndConditions",
            FieldName::FullName => "fullName",
            FieldName::DateOfBirth => "dateOfBirth",
            FieldName::Gender => "gender",
            FieldName::Address => "address",
            FieldName::Address2 => "address2",
            FieldName::City => "city",
            FieldName::State => "state",
            FieldName::Zip => "zip",
            FieldName::PhoneNumber => "phoneNumber",
            FieldName::PhoneMarketingConsent => "phoneMarketingConsent",
            FieldName::PhoneTermsAndConditions => "phoneTermsAndConditions",
        }
    }

    /// Whether the field is a consent checkbox (`"on"` or absent).
    pub fn is_consent(self) -> bool {
        matches!(
            self,
            FieldName::MarketingConsent
                | FieldName::TermsAndConditions
                | FieldName::PhoneMarketingConsent
                | FieldName::PhoneTermsAndConditions
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown field: '{s}'"))
    }
}

/// Raw name/value pairs gathered from a step's inputs on submit.
///
/// Unchecked checkboxes are simply absent. Names are kept as strings because
/// the inputs may carry names that are not draft fields (the autocomplete
/// text box, for instance).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    entries: Vec<(String, String)>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append of a single entry.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Builder-style append of a checked checkbox.
    pub fn checked(self, name: impl Into<String>) -> Self {
        self.with(name, CHECKED)
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value submitted under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field(&self, name: FieldName) -> Option<&str> {
        self.get(name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for FieldValues
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_roundtrip() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>().unwrap(), name);
            assert_eq!(
                serde_json::to_string(&name).unwrap(),
                format!("\"{}\"", name.as_str())
            );
        }
    }

    #[test]
    fn test_field_name_unknown() {
        let err = "address-autocomplete".parse::<FieldName>().unwrap_err();
        assert!(err.contains("address-autocomplete"));
    }

    #[test]
    fn test_consent_fields() {
        assert!(FieldName::TermsAndConditions.is_consent());
        assert!(FieldName::PhoneMarketingConsent.is_consent());
        assert!(!FieldName::Email.is_consent());
    }

    #[test]
    fn test_field_values_get_returns_first() {
        let values = FieldValues::new()
            .with("email", "first@example.com")
            .with("email", "second@example.com")
            .checked("termsAndConditions");

        assert_eq!(values.get("email"), Some("first@example.com"));
        assert_eq!(values.field(FieldName::TermsAndConditions), Some(CHECKED));
        assert_eq!(values.get("marketingConsent"), None);
    }
}
