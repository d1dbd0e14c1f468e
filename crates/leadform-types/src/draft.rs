//! The in-progress form draft and partial updates to it.
//!
//! A `FormDraft` is never validated as a whole. Each step validates its own
//! slice of fields and merges a `DraftPatch` on success.
//!
//! Persisted shape: one flat JSON object of camelCase string fields plus an
//! integer `step`, e.g. `{"email":"a@b.co","termsAndConditions":"on","step":1}`.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::field::{CHECKED, FieldName, FieldValues};
use crate::step::Step;

/// Key the step index is stored under, next to the field values.
pub const STEP_KEY: &str = "step";

/// Accumulated field values plus the furthest step reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    fields: BTreeMap<FieldName, String>,
    pub step: Step,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.fields.get(&name).map(String::as_str)
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.fields.insert(name, value.into());
    }

    pub fn remove(&mut self, name: FieldName) -> Option<String> {
        self.fields.remove(&name)
    }

    /// Whether a consent checkbox was checked when last submitted.
    pub fn is_checked(&self, name: FieldName) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.fields.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field has been filled in and the step is still 0.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.step == Step::Email
    }

    /// Shallow merge: fields in the patch overwrite (or clear), every other
    /// field is left untouched. The step is not part of a patch.
    pub fn apply(&mut self, patch: &DraftPatch) {
        for (name, value) in &patch.entries {
            match value {
                Some(value) => {
                    self.fields.insert(*name, value.clone());
                }
                None => {
                    self.fields.remove(name);
                }
            }
        }
    }
}

impl Serialize for FormDraft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name.as_str(), value)?;
        }
        map.serialize_entry(STEP_KEY, &self.step)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormDraft {
    /// Lenient on content, strict on shape: the payload must be a JSON
    /// object, but unknown keys and non-string field values are dropped and
    /// an unusable `step` reads as 0.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;

        let mut draft = FormDraft::new();
        for (key, value) in raw {
            if key == STEP_KEY {
                draft.step = value
                    .as_u64()
                    .map(Step::from_index_saturating)
                    .unwrap_or_default();
                continue;
            }
            let (Ok(name), serde_json::Value::String(value)) = (key.parse::<FieldName>(), value)
            else {
                continue;
            };
            draft.fields.insert(name, value);
        }
        Ok(draft)
    }
}

/// A partial update produced by one successful step submission.
///
/// `Some(value)` sets a field, `None` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    entries: BTreeMap<FieldName, Option<String>>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert submitted values into a patch.
    ///
    /// Only known field names are kept. A checkbox keeps its `"on"` value,
    /// blank values are dropped, everything else is kept verbatim. When a
    /// name appears more than once the first value wins.
    pub fn from_values(values: &FieldValues) -> Self {
        let mut patch = DraftPatch::new();
        for (key, value) in values.iter() {
            let Ok(name) = key.parse::<FieldName>() else {
                continue;
            };
            if patch.entries.contains_key(&name) {
                continue;
            }
            if value == CHECKED || !value.trim().is_empty() {
                patch.entries.insert(name, Some(value.to_string()));
            }
        }
        patch
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.entries.insert(name, Some(value.into()));
    }

    pub fn clear(&mut self, name: FieldName) {
        self.entries.insert(name, None);
    }

    /// `None` when the field is untouched, `Some(None)` when it is cleared.
    pub fn get(&self, name: FieldName) -> Option<Option<&str>> {
        self.entries.get(&name).map(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> FormDraft {
        let mut draft = FormDraft::new();
        draft.set(FieldName::Email, "user@example.com");
        draft.set(FieldName::TermsAndConditions, "on");
        draft.set(FieldName::DateOfBirth, "01/15/1990");
        draft.step = Step::Address;
        draft
    }

    #[test]
    fn test_serialize_flat_object() {
        let json = serde_json::to_value(sample_draft()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "user@example.com",
                "termsAndConditions": "on",
                "dateOfBirth": "01/15/1990",
                "step": 2
            })
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let draft = sample_draft();
        let json = serde_json::to_string(&draft).unwrap();
        let restored: FormDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, draft);
    }

    #[test]
    fn test_deserialize_drops_unknown_and_non_string() {
        let draft: FormDraft = serde_json::from_str(
            r#"{"email":"a@b.co","favoriteColor":"blue","zip":12345,"step":1}"#,
        )
        .unwrap();

        assert_eq!(draft.get(FieldName::Email), Some("a@b.co"));
        assert_eq!(draft.get(FieldName::Zip), None);
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.step, Step::Info);
    }

    #[test]
    fn test_deserialize_bad_step_defaults_to_email() {
        let draft: FormDraft = serde_json::from_str(r#"{"step":"two"}"#).unwrap();
        assert_eq!(draft.step, Step::Email);

        let draft: FormDraft = serde_json::from_str(r#"{"fullName":"Ada"}"#).unwrap();
        assert_eq!(draft.step, Step::Email);

        let draft: FormDraft = serde_json::from_str(r#"{"step":9}"#).unwrap();
        assert_eq!(draft.step, Step::Complete);
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<FormDraft>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<FormDraft>("null").is_err());
    }

    #[test]
    fn test_apply_preserves_untouched_fields() {
        let mut draft = sample_draft();
        let mut patch = DraftPatch::new();
        patch.set(FieldName::FullName, "Ada Lovelace");
        patch.set(FieldName::Email, "ada@example.com");

        draft.apply(&patch);

        assert_eq!(draft.get(FieldName::Email), Some("ada@example.com"));
        assert_eq!(draft.get(FieldName::FullName), Some("Ada Lovelace"));
        assert_eq!(draft.get(FieldName::DateOfBirth), Some("01/15/1990"));
        assert_eq!(draft.step, Step::Address);
    }

    #[test]
    fn test_apply_clears_fields() {
        let mut draft = FormDraft::new();
        draft.set(FieldName::Address2, "Apt 4");

        let mut patch = DraftPatch::new();
        patch.clear(FieldName::Address2);
        draft.apply(&patch);

        assert_eq!(draft.get(FieldName::Address2), None);
    }

    #[test]
    fn test_patch_from_values() {
        let values = FieldValues::new()
            .with("email", "user@example.com")
            .checked("termsAndConditions")
            .with("fullName", "   ")
            .with("address-autocomplete-useplaces", "1 Main St")
            .with("email", "ignored@example.com");

        let patch = DraftPatch::from_values(&values);

        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get(FieldName::Email), Some(Some("user@example.com")));
        assert_eq!(patch.get(FieldName::TermsAndConditions), Some(Some("on")));
        assert_eq!(patch.get(FieldName::FullName), None);
    }
}
