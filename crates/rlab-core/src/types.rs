//! Core types for the research board
//!
//! Defines the fundamental data model:
//! - Entry identifiers and column identifiers
//! - The closed taxonomies (type, status, impact, view mode)
//! - Entries, drafts and columns

use crate::error::{ParseLabelError, ValidationError};
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Opaque entry identifier
///
/// Seed entries bring their own identifiers; entries created through the
/// store receive a fresh ULID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Column identifier (`foundations`, `experiments`, ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColumnId {
    fn default() -> Self {
        Self::new("foundations")
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Implements label round-tripping for the closed taxonomies.
///
/// Parsing is case-insensitive and treats `-`, `_` and spaces alike, so
/// `case-study`, `Case_Study` and `Case Study` all resolve to the same variant.
macro_rules! labeled_enum {
    ($name:ident, $kind:literal, [$($variant:ident => $label:literal),+ $(,)?]) => {
        impl $name {
            /// All variants, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label
            #[inline]
            #[must_use]
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize_label(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize_label(v.label()) == wanted)
                    .ok_or_else(|| ParseLabelError::new($kind, s))
            }
        }
    };
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Category of a research entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryType {
    #[default]
    Concept,
    Experiment,
    Metric,
    #[serde(rename = "Case Study")]
    CaseStudy,
    Idea,
    Note,
    Reflection,
    Skill,
}

labeled_enum!(EntryType, "type", [
    Concept => "Concept",
    Experiment => "Experiment",
    Metric => "Metric",
    CaseStudy => "Case Study",
    Idea => "Idea",
    Note => "Note",
    Reflection => "Reflection",
    Skill => "Skill",
]);

/// Progress state of an entry
///
/// Purely descriptive: any value may be chosen at creation and it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "To Explore")]
    ToExplore,
    #[serde(rename = "In Progress")]
    InProgress,
    Complete,
    Abandoned,
    #[serde(rename = "Needs Iteration")]
    NeedsIteration,
}

labeled_enum!(Status, "status", [
    ToExplore => "To Explore",
    InProgress => "In Progress",
    Complete => "Complete",
    Abandoned => "Abandoned",
    NeedsIteration => "Needs Iteration",
]);

/// Expected impact of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImpactLevel {
    High,
    #[default]
    Medium,
    Low,
}

labeled_enum!(ImpactLevel, "impact level", [
    High => "High",
    Medium => "Medium",
    Low => "Low",
]);

/// Presentation mode for the visible set
///
/// Serializes lowercase; deserializes any case through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Board,
    Table,
    Gallery,
}

labeled_enum!(ViewMode, "view", [
    Board => "Board",
    Table => "Table",
    Gallery => "Gallery",
]);

impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed topical bucket used to group entries on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Icon reference (e.g. `FlaskConical`), interpreted by the renderer
    pub icon: String,
    pub description: String,
}

impl Column {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }
}

/// Ordered, duplicate-free tag labels
///
/// Insertion order is preserved for display. Labels are trimmed, blank labels
/// are ignored and duplicates are detected by exact (case-sensitive) match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags(IndexSet<String>);

// IndexSet equality ignores order; display order is part of a tag list's identity.
impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Tags {}

impl Tags {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, returning `true` if it was added
    pub fn insert(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        self.0.insert(label.to_string())
    }

    /// Remove a label, returning `true` if it was present
    pub fn remove(&mut self, label: &str) -> bool {
        self.0.shift_remove(label)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for label in iter {
            tags.insert(label.as_ref());
        }
        tags
    }
}

impl From<Vec<String>> for Tags {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<Tags> for Vec<String> {
    fn from(value: Tags) -> Self {
        value.0.into_iter().collect()
    }
}

/// A research entry
///
/// Entries are immutable once stored; there is no edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub status: Status,
    pub tags: Tags,
    pub source: String,
    pub date_added: NaiveDate,
    pub impact_level: ImpactLevel,
    pub notes: String,
    pub column: ColumnId,
}

impl Entry {
    /// Finalize a draft with an identifier and creation date
    #[must_use]
    pub fn from_draft(draft: EntryDraft, id: EntryId, date_added: NaiveDate) -> Self {
        Self {
            id,
            title: draft.title,
            entry_type: draft.entry_type,
            status: draft.status,
            tags: draft.tags,
            source: draft.source,
            date_added,
            impact_level: draft.impact_level,
            notes: draft.notes,
            column: draft.column,
        }
    }
}

/// Candidate entry, missing the store-assigned `id` and `date_added`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub status: Status,
    pub tags: Tags,
    pub source: String,
    pub impact_level: ImpactLevel,
    pub notes: String,
    pub column: ColumnId,
}

impl EntryDraft {
    /// Draft with the given title and notes, everything else defaulted
    #[must_use]
    pub fn new(title: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: notes.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_impact(mut self, impact: ImpactLevel) -> Self {
        self.impact_level = impact;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = ColumnId::new(column);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Check required fields
    ///
    /// # Errors
    /// Returns the first missing required field (title before notes).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.notes.trim().is_empty() {
            return Err(ValidationError::EmptyNotes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for t in EntryType::ALL {
            assert_eq!(t.label().parse::<EntryType>().unwrap(), *t);
        }
        for s in Status::ALL {
            assert_eq!(s.label().parse::<Status>().unwrap(), *s);
        }
        for i in ImpactLevel::ALL {
            assert_eq!(i.label().parse::<ImpactLevel>().unwrap(), *i);
        }
    }

    #[test]
    fn parsing_accepts_loose_spellings() {
        assert_eq!("case-study".parse::<EntryType>().unwrap(), EntryType::CaseStudy);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(" GALLERY ".parse::<ViewMode>().unwrap(), ViewMode::Gallery);
        assert!("Essay".parse::<EntryType>().is_err());
    }

    #[test]
    fn serde_uses_human_labels() {
        let json = serde_json::to_string(&Status::NeedsIteration).unwrap();
        assert_eq!(json, "\"Needs Iteration\"");
        let back: EntryType = serde_json::from_str("\"Case Study\"").unwrap();
        assert_eq!(back, EntryType::CaseStudy);
        assert_eq!(serde_json::to_string(&ViewMode::Table).unwrap(), "\"table\"");
    }

    #[test]
    fn tags_keep_order_and_skip_duplicates() {
        let mut tags = Tags::new();
        assert!(tags.insert("Churn"));
        assert!(tags.insert("  Retention "));
        assert!(!tags.insert("Churn"));
        assert!(tags.insert("churn"));
        assert!(!tags.insert("   "));

        let labels: Vec<&str> = tags.iter().collect();
        assert_eq!(labels, vec!["Churn", "Retention", "churn"]);

        assert!(tags.remove("Retention"));
        let labels: Vec<&str> = tags.iter().collect();
        assert_eq!(labels, vec!["Churn", "churn"]);
    }

    #[test]
    fn draft_defaults_match_creation_form() {
        let draft = EntryDraft::default();
        assert_eq!(draft.entry_type, EntryType::Concept);
        assert_eq!(draft.status, Status::ToExplore);
        assert_eq!(draft.impact_level, ImpactLevel::Medium);
        assert_eq!(draft.column.as_str(), "foundations");
    }

    #[test]
    fn draft_validation_requires_title_and_notes() {
        assert_eq!(
            EntryDraft::new("  ", "notes").validate(),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            EntryDraft::new("title", "\t").validate(),
            Err(ValidationError::EmptyNotes)
        );
        assert!(EntryDraft::new("title", "notes").validate().is_ok());
    }

    #[test]
    fn entry_serializes_with_camel_case_fields() {
        let entry = Entry::from_draft(
            EntryDraft::new("t", "n").with_tag("a"),
            EntryId::new("9"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["dateAdded"], "2024-01-15");
        assert_eq!(value["impactLevel"], "Medium");
        assert_eq!(value["type"], "Concept");
        assert_eq!(value["tags"][0], "a");
    }
}
