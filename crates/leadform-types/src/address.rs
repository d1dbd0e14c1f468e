//! Address autocomplete types.
//!
//! `Suggestion` and `AddressComponent` mirror what the external
//! autocomplete/geocoding service returns. `AddressSelection` is the
//! structured result of resolving one suggestion.

use serde::{Deserialize, Serialize};

use crate::draft::{DraftPatch, FormDraft};
use crate::field::FieldName;

/// A candidate address returned for a partial query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Service-specific identifier (a Google `place_id`).
    pub id: String,
    /// Human-readable single-line address.
    pub description: String,
}

/// One geocoded address component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    /// Component types, e.g. `["street_number"]` or `["locality", "political"]`.
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn new(long_name: &str, short_name: &str, types: &[&str]) -> Self {
        Self {
            long_name: long_name.to_string(),
            short_name: short_name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// Structured address produced by resolving one suggestion.
///
/// Held by the address step until it is submitted into the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSelection {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressSelection {
    /// Rebuild a selection from a draft that already holds a full address.
    ///
    /// Returns `None` unless address, city, state and zip are all present
    /// and non-empty.
    pub fn from_draft(draft: &FormDraft) -> Option<Self> {
        let part = |name| {
            draft
                .get(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Some(Self {
            address: part(FieldName::Address)?,
            address2: part(FieldName::Address2),
            city: part(FieldName::City)?,
            state: part(FieldName::State)?,
            zip: part(FieldName::Zip)?,
        })
    }

    /// Write this selection over the address fields of a patch.
    ///
    /// A missing `address2` clears any previously stored one.
    pub fn apply_to(&self, patch: &mut DraftPatch) {
        patch.set(FieldName::Address, self.address.clone());
        match &self.address2 {
            Some(address2) => patch.set(FieldName::Address2, address2.clone()),
            None => patch.clear(FieldName::Address2),
        }
        patch.set(FieldName::City, self.city.clone());
        patch.set(FieldName::State, self.state.clone());
        patch.set(FieldName::Zip, self.zip.clone());
    }

    /// Single-line form shown in the autocomplete input.
    pub fn display_line(&self) -> String {
        format!("{}, {}, {} {}, USA", self.address, self.city, self.state, self.zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn springfield() -> AddressSelection {
        AddressSelection {
            address: "1 Main St".to_string(),
            address2: None,
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62704".to_string(),
        }
    }

    #[test]
    fn test_from_draft_requires_all_parts() {
        let mut draft = FormDraft::new();
        draft.set(FieldName::Address, "1 Main St");
        draft.set(FieldName::City, "Springfield");
        draft.set(FieldName::State, "IL");
        assert!(AddressSelection::from_draft(&draft).is_none());

        draft.set(FieldName::Zip, "62704");
        assert_eq!(AddressSelection::from_draft(&draft), Some(springfield()));
    }

    #[test]
    fn test_from_draft_rejects_empty_parts() {
        let mut draft = FormDraft::new();
        draft.set(FieldName::Address, "Main Street");
        draft.set(FieldName::City, "");
        draft.set(FieldName::State, "IL");
        draft.set(FieldName::Zip, "");
        assert!(AddressSelection::from_draft(&draft).is_none());

        draft.set(FieldName::City, "Springfield");
        assert!(AddressSelection::from_draft(&draft).is_none());

        draft.set(FieldName::Zip, "62704");
        draft.set(FieldName::Address2, "");
        let restored = AddressSelection::from_draft(&draft).unwrap();
        assert_eq!(restored.address2, None);
    }

    #[test]
    fn test_apply_to_clears_missing_address2() {
        let mut patch = DraftPatch::new();
        springfield().apply_to(&mut patch);

        assert_eq!(patch.get(FieldName::Address), Some(Some("1 Main St")));
        assert_eq!(patch.get(FieldName::Address2), Some(None));
        assert_eq!(patch.get(FieldName::Zip), Some(Some("62704")));
    }

    #[test]
    fn test_display_line() {
        assert_eq!(
            springfield().display_line(),
            "1 Main St, Springfield, IL 62704, USA"
        );
    }

    #[test]
    fn test_component_has_type() {
        let component = AddressComponent::new("Illinois", "IL", &["administrative_area_level_1", "political"]);
        assert!(component.has_type("administrative_area_level_1"));
        assert!(!component.has_type("locality"));
    }
}
