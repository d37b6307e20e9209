//! Passcode gate
//!
//! A confirm-friction step in front of add and delete. The expected values
//! are plain shared strings compared exactly; this is not authentication.

use crate::error::GateError;
use crate::types::EntryId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which mutation a gate prompt guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Add,
    Delete,
}

impl GateKind {
    /// Prompt heading
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            GateKind::Add => "Add New Entry",
            GateKind::Delete => "Delete Entry",
        }
    }

    /// Prompt body
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GateKind::Add => "Enter the passcode to add a new entry to your research notebook.",
            GateKind::Delete => "Enter the passcode to permanently delete this entry.",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::Add => f.write_str("add"),
            GateKind::Delete => f.write_str("delete"),
        }
    }
}

/// Expected passcode per mutation kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Passcodes {
    pub add: String,
    pub delete: String,
}

impl Passcodes {
    #[must_use]
    pub fn new(add: impl Into<String>, delete: impl Into<String>) -> Self {
        Self {
            add: add.into(),
            delete: delete.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn expected(&self, kind: GateKind) -> &str {
        match kind {
            GateKind::Add => &self.add,
            GateKind::Delete => &self.delete,
        }
    }
}

impl Default for Passcodes {
    fn default() -> Self {
        Self::new("ADD", "DELETE")
    }
}

/// A mutation waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationIntent {
    Add,
    /// Delete the entry captured when the request was made
    Delete(EntryId),
}

impl MutationIntent {
    #[inline]
    #[must_use]
    pub fn kind(&self) -> GateKind {
        match self {
            MutationIntent::Add => GateKind::Add,
            MutationIntent::Delete(_) => GateKind::Delete,
        }
    }
}

/// Visible state of the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStatus {
    /// No prompt shown
    #[default]
    Closed,
    /// Waiting for input
    Open,
    /// Last submission did not match; still waiting
    Rejected,
}

/// Passcode confirmation step
#[derive(Debug, Clone, Default)]
pub struct Gate {
    passcodes: Passcodes,
    pending: Option<MutationIntent>,
    input: String,
    rejected: bool,
}

impl Gate {
    #[must_use]
    pub fn new(passcodes: Passcodes) -> Self {
        Self {
            passcodes,
            ..Self::default()
        }
    }

    /// Open the prompt for `intent`
    ///
    /// Replaces whatever was pending and clears input and failure state, so a
    /// new request never inherits an earlier attempt.
    pub fn request(&mut self, intent: MutationIntent) {
        if let Some(previous) = self.pending.replace(intent.clone()) {
            tracing::debug!(?previous, "pending intent replaced");
        }
        self.input.clear();
        self.rejected = false;
        tracing::debug!(kind = %intent.kind(), "gate opened");
    }

    /// Replace the in-progress input
    pub fn input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[inline]
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.input
    }

    /// Submit the in-progress input
    ///
    /// # Errors
    /// See [`Gate::submit_with`].
    pub fn submit(&mut self) -> Result<MutationIntent, GateError> {
        let text = std::mem::take(&mut self.input);
        self.submit_with(&text)
    }

    /// Compare `text` with the expected passcode for the pending intent
    ///
    /// On a match the approved intent is handed back exactly once and the gate
    /// closes. On a mismatch the input is cleared and the gate stays open with
    /// the same pending intent.
    ///
    /// # Errors
    /// `IncorrectPasscode` on mismatch, `NotOpen` when nothing is pending.
    pub fn submit_with(&mut self, text: &str) -> Result<MutationIntent, GateError> {
        let kind = self.pending.as_ref().ok_or(GateError::NotOpen)?.kind();
        self.input.clear();

        if text != self.passcodes.expected(kind) {
            self.rejected = true;
            tracing::warn!(%kind, "incorrect passcode");
            return Err(GateError::IncorrectPasscode);
        }

        self.rejected = false;
        let approved = self.pending.take().ok_or(GateError::NotOpen)?;
        tracing::info!(%kind, "passcode accepted");
        Ok(approved)
    }

    /// Abandon the pending intent, including any captured delete target
    pub fn cancel(&mut self) -> Option<MutationIntent> {
        self.input.clear();
        self.rejected = false;
        let dropped = self.pending.take();
        if let Some(intent) = &dropped {
            tracing::debug!(kind = %intent.kind(), "gate cancelled");
        }
        dropped
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&MutationIntent> {
        self.pending.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn status(&self) -> GateStatus {
        match (&self.pending, self.rejected) {
            (None, _) => GateStatus::Closed,
            (Some(_), false) => GateStatus::Open,
            (Some(_), true) => GateStatus::Rejected,
        }
    }

    /// Inline failure text, if the last submission was rejected
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        (self.status() == GateStatus::Rejected).then(|| GateError::IncorrectPasscode.to_string())
    }
}
