//! Step and sub-tab types.
//!
//! The form runs through four ordered steps. Steps 1 and 2 share a tabbed
//! panel ("info" and "address") whose tabs unlock as the step advances.

use serde::{Deserialize, Serialize};

use std::fmt;

/// One of the four ordered stages of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    Email,
    Info,
    Address,
    Complete,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Email, Step::Info, Step::Address, Step::Complete];

    pub fn index(self) -> u8 {
        match self {
            Step::Email => 0,
            Step::Info => 1,
            Step::Address => 2,
            Step::Complete => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Step> {
        Step::ALL.get(usize::from(index)).copied()
    }

    /// Like [`Step::from_index`], but clamps anything past the last step to
    /// [`Step::Complete`].
    pub fn from_index_saturating(index: u64) -> Step {
        u8::try_from(index)
            .ok()
            .and_then(Step::from_index)
            .unwrap_or(Step::Complete)
    }

    /// The sub-tab shown while this step is current, if the step is tabbed.
    pub fn tab(self) -> Option<SubTab> {
        match self {
            Step::Info => Some(SubTab::Info),
            Step::Address => Some(SubTab::Address),
            Step::Email | Step::Complete => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Complete
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Email => write!(f, "email"),
            Step::Info => write!(f, "info"),
            Step::Address => write!(f, "address"),
            Step::Complete => write!(f, "complete"),
        }
    }
}

impl Serialize for Step {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u64::deserialize(deserializer)?;
        Ok(Step::from_index_saturating(index))
    }
}

/// Secondary navigation inside steps 1-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubTab {
    Info,
    Address,
}

impl SubTab {
    pub const ALL: [SubTab; 2] = [SubTab::Info, SubTab::Address];

    pub fn index(self) -> usize {
        match self {
            SubTab::Info => 0,
            SubTab::Address => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<SubTab> {
        SubTab::ALL.get(index).copied()
    }

    /// Stable id used by the tab list ("info" / "address").
    pub fn id(self) -> &'static str {
        match self {
            SubTab::Info => "info",
            SubTab::Address => "address",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubTab::Info => "1. Info",
            SubTab::Address => "2. Address",
        }
    }

    /// Tab index `i` is reachable only once the step has reached `i + 1`.
    pub fn required_step(self) -> Step {
        match self {
            SubTab::Info => Step::Info,
            SubTab::Address => Step::Address,
        }
    }
}

impl fmt::Display for SubTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which step is displayed and, for steps 1-2, which sub-tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSelection {
    pub step: Step,
    pub tab: Option<SubTab>,
}

/// Arrow-key navigation across the tab list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKey {
    Left,
    Right,
}

/// Per-tab display state for the tab list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    pub tab: SubTab,
    pub active: bool,
    pub disabled: bool,
}

/// The top-level panel visible for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Email,
    Tabs,
    Complete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ordering() {
        assert!(Step::Email < Step::Info);
        assert!(Step::Info < Step::Address);
        assert!(Step::Address < Step::Complete);
        assert_eq!(Step::Email.max(Step::Address), Step::Address);
    }

    #[test]
    fn test_step_index_roundtrip() {
        for step in Step::ALL {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(4), None);
        assert_eq!(Step::from_index_saturating(42), Step::Complete);
    }

    #[test]
    fn test_step_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Step::Address).unwrap(), "2");
        let step: Step = serde_json::from_str("1").unwrap();
        assert_eq!(step, Step::Info);
    }

    #[test]
    fn test_sub_tab_required_step() {
        for tab in SubTab::ALL {
            assert_eq!(tab.required_step().index() as usize, tab.index() + 1);
        }
    }
}
