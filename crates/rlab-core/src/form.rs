//! Add-entry form
//!
//! The editable draft shown after an approved add passcode, including the
//! pending tag input.

use crate::error::ValidationError;
use crate::types::{ColumnId, EntryDraft, EntryType, ImpactLevel, Status};

/// Draft being composed plus the tag text not yet committed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    draft: EntryDraft,
    tag_input: String,
}

impl EntryForm {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing draft
    #[must_use]
    pub fn with_draft(draft: EntryDraft) -> Self {
        Self {
            draft,
            tag_input: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.draft.source = source.into();
    }

    pub fn set_type(&mut self, entry_type: EntryType) {
        self.draft.entry_type = entry_type;
    }

    pub fn set_status(&mut self, status: Status) {
        self.draft.status = status;
    }

    pub fn set_impact(&mut self, impact: ImpactLevel) {
        self.draft.impact_level = impact;
    }

    pub fn set_column(&mut self, column: impl Into<String>) {
        self.draft.column = ColumnId::new(column);
    }

    pub fn set_tag_input(&mut self, text: impl Into<String>) {
        self.tag_input = text.into();
    }

    #[inline]
    #[must_use]
    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    /// Move the pending tag text into the draft
    ///
    /// Blank or duplicate input is ignored and left in place.
    pub fn commit_tag(&mut self) -> bool {
        let added = self.draft.tags.insert(&self.tag_input);
        if added {
            self.tag_input.clear();
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.draft.tags.remove(tag)
    }

    /// Check required fields without consuming the form
    ///
    /// # Errors
    /// Empty title or notes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.draft.validate()
    }

    /// Hand the draft over and reset the form to its defaults
    pub fn take_draft(&mut self) -> EntryDraft {
        self.tag_input.clear();
        std::mem::take(&mut self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_tag_trims_and_clears_input() {
        let mut form = EntryForm::new();
        form.set_tag_input("  Pricing ");
        assert!(form.commit_tag());
        assert_eq!(form.tag_input(), "");
        assert!(form.draft().tags.contains("Pricing"));
    }

    #[test]
    fn duplicate_or_blank_tag_is_ignored() {
        let mut form = EntryForm::new();
        form.set_tag_input("Pricing");
        form.commit_tag();

        form.set_tag_input("Pricing");
        assert!(!form.commit_tag());
        assert_eq!(form.tag_input(), "Pricing");

        form.set_tag_input("   ");
        assert!(!form.commit_tag());
        assert_eq!(form.draft().tags.len(), 1);
    }

    #[test]
    fn remove_tag() {
        let mut form = EntryForm::new();
        form.set_tag_input("a");
        form.commit_tag();
        assert!(form.remove_tag("a"));
        assert!(!form.remove_tag("a"));
        assert!(form.draft().tags.is_empty());
    }

    #[test]
    fn take_draft_resets_to_defaults() {
        let mut form = EntryForm::new();
        form.set_title("Paywall meter test");
        form.set_notes("Three free articles vs five");
        form.set_type(EntryType::Experiment);
        form.set_column("experiments");
        form.set_tag_input("pending");

        let draft = form.take_draft();
        assert_eq!(draft.title, "Paywall meter test");
        assert_eq!(draft.column.as_str(), "experiments");
        assert_eq!(form, EntryForm::new());
    }
}
