//! Plain-text renderer
//!
//! Draws the three views into a string buffer. Tag previews follow the
//! board conventions: board cards and gallery tiles show three tags, table
//! rows show two.

use rlab_core::{tag_preview, ColumnGroup, Entry, Renderer};
use std::fmt::Write;

const CARD_TAGS: usize = 3;
const TABLE_TAGS: usize = 2;
const NOTES_PREVIEW: usize = 96;

/// Renders views as plain text
#[derive(Debug, Default)]
pub struct TextRenderer {
    out: String,
}

impl TextRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the rendered text, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }
}

// Writes to a String cannot fail; the results are discarded throughout.
impl Renderer for TextRenderer {
    fn board(&mut self, groups: &[ColumnGroup<'_>]) {
        for group in groups {
            let _ = writeln!(
                self.out,
                "== {} ({}) [{}]",
                group.column.title,
                group.count_label(),
                group.column.icon
            );
            let _ = writeln!(self.out, "   {}", group.column.description);
            if group.is_empty() {
                let _ = writeln!(self.out, "   (no entries)");
            }
            for entry in &group.entries {
                let _ = writeln!(self.out, "   [{}] {}", entry.id, entry.title);
                let _ = writeln!(
                    self.out,
                    "       {} | {} | {} impact | {}",
                    entry.entry_type, entry.status, entry.impact_level, entry.date_added
                );
                if let Some(tags) = tag_line(entry, CARD_TAGS) {
                    let _ = writeln!(self.out, "       {tags}");
                }
            }
            let _ = writeln!(self.out);
        }
    }

    fn table(&mut self, entries: &[&Entry]) {
        let headers = ["ID", "Title", "Type", "Status", "Tags", "Impact", "Date Added", "Source"];
        let rows: Vec<[String; 8]> = entries
            .iter()
            .map(|e| {
                [
                    e.id.to_string(),
                    e.title.clone(),
                    e.entry_type.to_string(),
                    e.status.to_string(),
                    tag_line(e, TABLE_TAGS).unwrap_or_default(),
                    e.impact_level.to_string(),
                    e.date_added.to_string(),
                    e.source.clone(),
                ]
            })
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        write_row(&mut self.out, &headers.map(String::from), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(self.out, "{}", rule.join("-+-"));
        for row in &rows {
            write_row(&mut self.out, row, &widths);
        }
        if rows.is_empty() {
            let _ = writeln!(self.out, "(no matching entries)");
        }
    }

    fn gallery(&mut self, entries: &[&Entry]) {
        if entries.is_empty() {
            let _ = writeln!(self.out, "(no matching entries)");
        }
        for entry in entries {
            let _ = writeln!(self.out, "+ {} [{}]", entry.entry_type, entry.id);
            let _ = writeln!(self.out, "| {}", entry.title);
            let _ = writeln!(
                self.out,
                "| {} | {} impact",
                entry.status, entry.impact_level
            );
            let _ = writeln!(self.out, "| {}", truncate(&entry.notes, NOTES_PREVIEW));
            if let Some(tags) = tag_line(entry, CARD_TAGS) {
                let _ = writeln!(self.out, "| {tags}");
            }
            let _ = writeln!(self.out, "| {}", entry.date_added);
            let _ = writeln!(self.out);
        }
    }
}

/// Full detail text for the inspector
#[must_use]
pub fn render_detail(entry: &Entry, column_title: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", entry.title);
    let _ = writeln!(out, "{}", "=".repeat(entry.title.chars().count()));
    let _ = writeln!(out, "id:       {}", entry.id);
    let _ = writeln!(out, "type:     {}", entry.entry_type);
    let _ = writeln!(out, "status:   {}", entry.status);
    let _ = writeln!(out, "impact:   {}", entry.impact_level);
    let _ = writeln!(
        out,
        "column:   {}",
        column_title.unwrap_or(entry.column.as_str())
    );
    let _ = writeln!(out, "added:    {}", entry.date_added);
    let _ = writeln!(out, "source:   {}", entry.source);
    let tags: Vec<&str> = entry.tags.iter().collect();
    let _ = writeln!(out, "tags:     {}", tags.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", entry.notes);
    out
}

fn tag_line(entry: &Entry, limit: usize) -> Option<String> {
    if entry.tags.is_empty() {
        return None;
    }
    let (shown, hidden) = tag_preview(&entry.tags, limit);
    let mut line = shown
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    if hidden > 0 {
        let _ = write!(line, " +{hidden}");
    }
    Some(line)
}

fn write_row(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
