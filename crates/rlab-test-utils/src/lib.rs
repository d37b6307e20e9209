//! Testing utilities for the research board workspace
//!
//! Shared fixtures, draft builders and a renderer that records what it was
//! asked to draw.

#![allow(missing_docs)]

use chrono::NaiveDate;
use rlab_core::{
    BoardConfig, ColumnGroup, Entry, EntryDraft, EntryId, EntryType, GateDecision, ImpactLevel,
    Renderer, ResearchBoard, SeedData, Status, ViewMode,
};

pub fn setup_board() -> ResearchBoard {
    ResearchBoard::new(&BoardConfig::new(), SeedData::builtin()).unwrap()
}

pub fn setup_empty_board() -> ResearchBoard {
    ResearchBoard::new(&BoardConfig::new(), SeedData::empty()).unwrap()
}

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn valid_draft(title: &str) -> EntryDraft {
    EntryDraft::new(title, format!("notes for {title}"))
        .with_type(EntryType::Experiment)
        .with_status(Status::InProgress)
        .with_impact(ImpactLevel::Low)
        .with_source("Fixture")
        .with_column("experiments")
        .with_tag("fixture")
}

/// Run the full gated add flow and return the stored entry
pub fn add_via_gate(board: &mut ResearchBoard, draft: EntryDraft) -> Entry {
    board.request_add();
    let passcode = BoardConfig::default().passcodes.add;
    assert_eq!(
        board.submit_passcode_with(&passcode).unwrap(),
        GateDecision::AddFormOpened
    );
    let form = board.form_mut().unwrap();
    form.set_title(draft.title);
    form.set_notes(draft.notes);
    form.set_source(draft.source);
    form.set_type(draft.entry_type);
    form.set_status(draft.status);
    form.set_impact(draft.impact_level);
    form.set_column(draft.column.as_str());
    for tag in draft.tags.iter() {
        form.set_tag_input(tag);
        form.commit_tag();
    }
    board.save_entry().unwrap()
}

pub fn ids(entries: &[&Entry]) -> Vec<String> {
    entries.iter().map(|e| e.id.to_string()).collect()
}

pub fn all_ids(board: &ResearchBoard) -> Vec<EntryId> {
    board.store().all().iter().map(|e| e.id.clone()).collect()
}

/// One call received by [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    /// Column id and entry ids per group
    Board(Vec<(String, Vec<String>)>),
    Table(Vec<String>),
    Gallery(Vec<String>),
}

impl RenderCall {
    pub fn mode(&self) -> ViewMode {
        match self {
            RenderCall::Board(_) => ViewMode::Board,
            RenderCall::Table(_) => ViewMode::Table,
            RenderCall::Gallery(_) => ViewMode::Gallery,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderCall> {
        self.calls.last()
    }
}

impl Renderer for RecordingRenderer {
    fn board(&mut self, groups: &[ColumnGroup<'_>]) {
        self.calls.push(RenderCall::Board(
            groups
                .iter()
                .map(|g| (g.column.id.to_string(), ids(&g.entries)))
                .collect(),
        ));
    }

    fn table(&mut self, entries: &[&Entry]) {
        self.calls.push(RenderCall::Table(ids(entries)));
    }

    fn gallery(&mut self, entries: &[&Entry]) {
        self.calls.push(RenderCall::Gallery(ids(entries)));
    }
}
