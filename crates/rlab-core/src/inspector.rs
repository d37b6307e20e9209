//! Detail inspector
//!
//! Selection of the single entry shown in full. Opening and closing never
//! touch the store, the criteria or the view.

use crate::types::Entry;

#[derive(Debug, Clone, Default)]
pub struct DetailInspector {
    current: Option<Entry>,
}

impl DetailInspector {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `entry`, replacing any previous selection
    pub fn open(&mut self, entry: Entry) {
        tracing::debug!(id = %entry.id, "inspecting entry");
        self.current = Some(entry);
    }

    pub fn close(&mut self) -> Option<Entry> {
        self.current.take()
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Entry> {
        self.current.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_entries;

    #[test]
    fn open_replaces_and_close_clears() {
        let entries = sample_entries();
        let mut inspector = DetailInspector::new();
        assert!(!inspector.is_open());

        inspector.open(entries[0].clone());
        inspector.open(entries[4].clone());
        assert_eq!(inspector.current().map(|e| e.id.as_str()), Some("5"));

        assert_eq!(inspector.close().map(|e| e.id), Some(entries[4].id.clone()));
        assert!(inspector.current().is_none());
    }
}
