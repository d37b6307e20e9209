//! View selection and board grouping
//!
//! The selector only decides which presentation receives the visible set.
//! Drawing is left to a [`Renderer`].

use crate::types::{Column, Entry, Tags, ViewMode};

/// A column and the visible entries placed in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup<'a> {
    pub column: &'a Column,
    pub entries: Vec<&'a Entry>,
}

impl ColumnGroup<'_> {
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

    /// "1 item" / "N items"
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.entries.len() {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }
}

/// Group the visible set by column, in column order
///
/// Every known column yields a group, even when empty. Entries whose column is
/// not in `columns` land in no group; table and gallery still show them.
#[must_use]
pub fn group_by_column<'a>(columns: &'a [Column], visible: &[&'a Entry]) -> Vec<ColumnGroup<'a>> {
    columns
        .iter()
        .map(|column| ColumnGroup {
            column,
            entries: visible
                .iter()
                .copied()
                .filter(|e| e.column == column.id)
                .collect(),
        })
        .collect()
}

/// First `limit` tags plus the number left out
#[must_use]
pub fn tag_preview(tags: &Tags, limit: usize) -> (Vec<&str>, usize) {
    let shown: Vec<&str> = tags.iter().take(limit).collect();
    let hidden = tags.len().saturating_sub(shown.len());
    (shown, hidden)
}

/// Presentation collaborator
///
/// Receives the visible set for exactly one view per routing. Implementations
/// must not mutate entries; selection and delete requests go back through the
/// board's named operations.
pub trait Renderer {
    fn board(&mut self, groups: &[ColumnGroup<'_>]);

    fn table(&mut self, entries: &[&Entry]);

    fn gallery(&mut self, entries: &[&Entry]);
}

/// Holds the active presentation mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSelector {
    mode: ViewMode,
}

impl ViewSelector {
    #[inline]
    #[must_use]
    pub fn new(mode: ViewMode) -> Self {
        Self { mode }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch modes; returns the previous mode
    pub fn set(&mut self, mode: ViewMode) -> ViewMode {
        let previous = std::mem::replace(&mut self.mode, mode);
        if previous != mode {
            tracing::debug!(from = %previous, to = %mode, "view switched");
        }
        previous
    }

    /// Hand the visible set to the renderer method for the active mode
    pub fn route<R: Renderer + ?Sized>(
        &self,
        columns: &[Column],
        visible: &[&Entry],
        renderer: &mut R,
    ) {
        match self.mode {
            ViewMode::Board => renderer.board(&group_by_column(columns, visible)),
            ViewMode::Table => renderer.table(visible),
            ViewMode::Gallery => renderer.gallery(visible),
        }
    }
}
