//! Filter engine
//!
//! A pure function from (entries, criteria) to the visible subset. The result
//! always preserves store order and is recomputed on every call.

use crate::types::{Entry, EntryType, ImpactLevel, Status};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One exact-match filter slot: either unconstrained or pinned to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet<T> {
    #[default]
    Any,
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    #[inline]
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Facet::Any => true,
            Facet::Only(wanted) => wanted == value,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Facet::Any)
    }
}

impl<T> From<Option<T>> for Facet<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Facet::Any, Facet::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Any => f.write_str("any"),
            Facet::Only(v) => v.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    /// `""`, `any` and `all` mean unconstrained
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("any")
            || trimmed.eq_ignore_ascii_case("all")
        {
            return Ok(Facet::Any);
        }
        trimmed.parse().map(Facet::Only)
    }
}

/// Active search/type/status/impact filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub search: String,
    pub entry_type: Facet<EntryType>,
    pub status: Facet<Status>,
    pub impact: Facet<ImpactLevel>,
}

impl Criteria {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Facet::Only(entry_type);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Facet::Only(status);
        self
    }

    #[must_use]
    pub fn with_impact(mut self, impact: ImpactLevel) -> Self {
        self.impact = Facet::Only(impact);
        self
    }

    /// No constraint at all: the visible set equals the store
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search.is_empty()
            && self.entry_type.is_any()
            && self.status.is_any()
            && self.impact.is_any()
    }

    /// Check all four predicates against one entry
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        Matcher::new(self).matches(entry)
    }

    /// Visible subset of `entries`, in their original order
    #[must_use]
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        filter_entries(entries, self)
    }
}

/// Filter `entries` by `criteria`, preserving order
#[must_use]
pub fn filter_entries<'a>(entries: &'a [Entry], criteria: &Criteria) -> Vec<&'a Entry> {
    let matcher = Matcher::new(criteria);
    let visible: Vec<&Entry> = entries.iter().filter(|e| matcher.matches(e)).collect();
    tracing::trace!(total = entries.len(), visible = visible.len(), "filtered entries");
    visible
}

/// Criteria with the search needle lowercased once per pass
struct Matcher<'c> {
    criteria: &'c Criteria,
    needle: Option<String>,
}

impl<'c> Matcher<'c> {
    fn new(criteria: &'c Criteria) -> Self {
        let needle = (!criteria.search.is_empty()).then(|| criteria.search.to_lowercase());
        Self { criteria, needle }
    }

    fn matches(&self, entry: &Entry) -> bool {
        self.matches_search(entry)
            && self.criteria.entry_type.admits(&entry.entry_type)
            && self.criteria.status.admits(&entry.status)
            && self.criteria.impact.admits(&entry.impact_level)
    }

    fn matches_search(&self, entry: &Entry) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        let hit = |text: &str| text.to_lowercase().contains(needle);

        hit(&entry.title)
            || hit(&entry.notes)
            || hit(&entry.source)
            || entry.tags.iter().any(hit)
    }
}
