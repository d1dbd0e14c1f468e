//! Form state machine.
//!
//! Owns the draft (field values plus the furthest step reached) and the
//! active sub-tab. Progress is forward-only: `advance` takes the max of the
//! current and target step, so repeated or out-of-order submissions never
//! roll anything back. Sub-tab switching is independent of progress but can
//! only land on tabs the step has already unlocked.

use leadform_types::draft::{DraftPatch, FormDraft};
use leadform_types::step::{Panel, Step, StepSelection, SubTab, TabKey, TabState};

/// Step index, active sub-tab and accumulated field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStateMachine {
    draft: FormDraft,
    active_tab: SubTab,
}

impl FormStateMachine {
    /// Start from a (possibly restored) draft.
    ///
    /// The active tab is the one belonging to the restored step, or "info"
    /// when the step is not tabbed.
    pub fn new(draft: FormDraft) -> Self {
        let active_tab = draft.step.tab().unwrap_or(SubTab::Info);
        Self { draft, active_tab }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn into_draft(self) -> FormDraft {
        self.draft
    }

    pub fn step(&self) -> Step {
        self.draft.step
    }

    pub fn active_tab(&self) -> SubTab {
        self.active_tab
    }

    /// Current step, plus the active tab while the step is tabbed.
    pub fn selection(&self) -> StepSelection {
        let tab = match self.step() {
            Step::Info | Step::Address => Some(self.active_tab),
            Step::Email | Step::Complete => None,
        };
        StepSelection {
            step: self.step(),
            tab,
        }
    }

    /// Move the step forward to `target`, never backward. Returns the
    /// resulting step.
    pub fn advance(&mut self, target: Step) -> Step {
        let next = self.step().max(target);
        if next != self.step() {
            tracing::info!(from = %self.step(), to = %next, "form step advanced");
        }
        self.draft.step = next;
        next
    }

    /// Shallow-merge submitted fields into the draft.
    pub fn merge_fields(&mut self, patch: &DraftPatch) {
        self.draft.apply(patch);
    }

    pub fn is_tab_enabled(&self, tab: SubTab) -> bool {
        self.step() >= tab.required_step()
    }

    /// Activate a sub-tab. Locked tabs are a no-op and return `false`.
    pub fn select_tab(&mut self, tab: SubTab) -> bool {
        if !self.is_tab_enabled(tab) {
            tracing::debug!(tab = %tab, step = %self.step(), "ignoring switch to locked tab");
            return false;
        }
        self.active_tab = tab;
        true
    }

    /// Arrow-key navigation from the active tab.
    ///
    /// Returns the newly active tab, or `None` when the neighbour does not
    /// exist or is still locked.
    pub fn navigate(&mut self, key: TabKey) -> Option<SubTab> {
        let current = self.active_tab.index();
        let target = match key {
            TabKey::Left => current.checked_sub(1)?,
            TabKey::Right => current + 1,
        };
        let tab = SubTab::from_index(target)?;
        self.select_tab(tab).then_some(tab)
    }

    pub fn tabs(&self) -> [TabState; 2] {
        SubTab::ALL.map(|tab| TabState {
            tab,
            active: tab == self.active_tab,
            disabled: !self.is_tab_enabled(tab),
        })
    }

    /// Which top-level panel the current step shows.
    pub fn panel(&self) -> Panel {
        match self.step() {
            Step::Email => Panel::Email,
            Step::Info | Step::Address => Panel::Tabs,
            Step::Complete => Panel::Complete,
        }
    }
}

impl Default for FormStateMachine {
    fn default() -> Self {
        Self::new(FormDraft::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadform_types::field::FieldName;

    fn at_step(step: Step) -> FormStateMachine {
        let mut draft = FormDraft::new();
        draft.step = step;
        FormStateMachine::new(draft)
    }

    #[test]
    fn test_new_empty_starts_at_email() {
        let machine = FormStateMachine::default();
        assert_eq!(machine.step(), Step::Email);
        assert_eq!(machine.active_tab(), SubTab::Info);
        assert_eq!(
            machine.selection(),
            StepSelection {
                step: Step::Email,
                tab: None
            }
        );
        assert_eq!(machine.panel(), Panel::Email);
    }

    #[test]
    fn test_restore_picks_tab_for_step() {
        assert_eq!(at_step(Step::Info).active_tab(), SubTab::Info);
        assert_eq!(at_step(Step::Address).active_tab(), SubTab::Address);
        assert_eq!(at_step(Step::Complete).active_tab(), SubTab::Info);
        assert_eq!(
            at_step(Step::Address).selection().tab,
            Some(SubTab::Address)
        );
        assert_eq!(at_step(Step::Complete).selection().tab, None);
    }

    #[test]
    fn test_advance_is_max_for_all_pairs() {
        for current in Step::ALL {
            for target in Step::ALL {
                let mut machine = at_step(current);
                let result = machine.advance(target);
                assert_eq!(result, current.max(target), "{current} -> {target}");
                assert_eq!(machine.step(), current.max(target));
            }
        }
    }

    #[test]
    fn test_merge_preserves_existing_fields() {
        let mut machine = FormStateMachine::default();
        let mut first = DraftPatch::new();
        first.set(FieldName::Email, "user@example.com");
        machine.merge_fields(&first);

        let mut second = DraftPatch::new();
        second.set(FieldName::FullName, "Ada");
        machine.merge_fields(&second);

        assert_eq!(machine.draft().get(FieldName::Email), Some("user@example.com"));
        assert_eq!(machine.draft().get(FieldName::FullName), Some("Ada"));
        assert_eq!(machine.step(), Step::Email);
    }

    #[test]
    fn test_tab_lock_for_all_steps() {
        for step in Step::ALL {
            for tab in SubTab::ALL {
                let mut machine = at_step(step);
                let before = machine.active_tab();
                let accepted = machine.select_tab(tab);

                let reachable = step.index() as usize >= tab.index() + 1;
                assert_eq!(accepted, reachable, "step {step}, tab {tab}");
                if reachable {
                    assert_eq!(machine.active_tab(), tab);
                } else {
                    assert_eq!(machine.active_tab(), before);
                }
            }
        }
    }

    #[test]
    fn test_revisiting_info_does_not_regress_step() {
        let mut machine = at_step(Step::Address);
        assert!(machine.select_tab(SubTab::Info));
        assert_eq!(machine.step(), Step::Address);
        assert_eq!(
            machine.selection(),
            StepSelection {
                step: Step::Address,
                tab: Some(SubTab::Info)
            }
        );
    }

    #[test]
    fn test_arrow_navigation() {
        let mut machine = at_step(Step::Info);
        // Address is locked at step 1.
        assert_eq!(machine.navigate(TabKey::Right), None);
        assert_eq!(machine.navigate(TabKey::Left), None);
        assert_eq!(machine.active_tab(), SubTab::Info);

        machine.advance(Step::Address);
        assert_eq!(machine.navigate(TabKey::Right), Some(SubTab::Address));
        assert_eq!(machine.navigate(TabKey::Right), None);
        assert_eq!(machine.navigate(TabKey::Left), Some(SubTab::Info));
    }

    #[test]
    fn test_tab_states() {
        let machine = at_step(Step::Info);
        let tabs = machine.tabs();

        assert_eq!(tabs[0].tab, SubTab::Info);
        assert!(tabs[0].active);
        assert!(!tabs[0].disabled);

        assert_eq!(tabs[1].tab, SubTab::Address);
        assert!(!tabs[1].active);
        assert!(tabs[1].disabled);
    }

    #[test]
    fn test_panel_per_step() {
        assert_eq!(at_step(Step::Info).panel(), Panel::Tabs);
        assert_eq!(at_step(Step::Address).panel(), Panel::Tabs);
        assert_eq!(at_step(Step::Complete).panel(), Panel::Complete);
    }
}
