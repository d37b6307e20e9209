//! Entry store
//!
//! Owns the authoritative ordered collection of entries and the column
//! taxonomy. Insertion order is display order.

use crate::error::{SeedError, ValidationError};
use crate::seed::SeedData;
use crate::types::{Column, ColumnId, Entry, EntryDraft, EntryId};
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;

/// In-memory store of entries
#[derive(Debug, Clone)]
pub struct EntryStore {
    columns: Vec<Column>,
    entries: Vec<Entry>,
    /// Every id this store has ever held; fresh ids are drawn outside this set
    issued: HashSet<EntryId>,
}

impl EntryStore {
    /// Build a store from seed data
    ///
    /// # Errors
    /// `DuplicateId` if two seed entries share an id.
    pub fn from_seed(seed: SeedData) -> Result<Self, SeedError> {
        seed.check()?;
        Ok(Self::assemble(seed))
    }

    fn assemble(seed: SeedData) -> Self {
        let issued = seed.entries.iter().map(|e| e.id.clone()).collect();
        Self {
            columns: seed.columns,
            entries: seed.entries,
            issued,
        }
    }

    /// Validate and append a draft, stamped with today's UTC date
    ///
    /// # Errors
    /// Refuses drafts with an empty title or notes; the store is untouched.
    pub fn add(&mut self, draft: EntryDraft) -> Result<Entry, ValidationError> {
        self.add_dated(draft, Utc::now().date_naive())
    }

    /// Validate and append a draft with an explicit creation date
    ///
    /// # Errors
    /// Refuses drafts with an empty title or notes; the store is untouched.
    pub fn add_dated(
        &mut self,
        draft: EntryDraft,
        date_added: NaiveDate,
    ) -> Result<Entry, ValidationError> {
        draft.validate()?;

        let id = self.fresh_id();
        let entry = Entry::from_draft(draft, id, date_added);
        self.issued.insert(entry.id.clone());
        self.entries.push(entry.clone());

        tracing::info!(id = %entry.id, title = %entry.title, "entry added");
        Ok(entry)
    }

    /// Remove an entry by id
    ///
    /// Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &EntryId) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| &e.id == id)?;
        let removed = self.entries.remove(pos);
        tracing::info!(id = %removed.id, "entry removed");
        Some(removed)
    }

    /// Current entries, in store order
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_id(&self) -> EntryId {
        loop {
            let id = EntryId::generate();
            if !self.issued.contains(&id) {
                return id;
            }
        }
    }
}

// The built-in seed has unique ids; `builtin_seed_passes_check` holds that.
impl Default for EntryStore {
    fn default() -> Self {
        Self::assemble(SeedData::builtin())
    }
}
