//! Research board coordinator
//!
//! Owns all session state and funnels every change through a named
//! operation:
//! - Store mutations only after the passcode gate approves
//! - Filter and view changes
//! - Add form and detail inspector lifecycle
//!
//! The visible set is never cached; it is derived from the store and the
//! criteria on every read.

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::filter::{filter_entries, Criteria, Facet};
use crate::form::EntryForm;
use crate::gate::{Gate, GateStatus, MutationIntent};
use crate::inspector::DetailInspector;
use crate::seed::SeedData;
use crate::store::EntryStore;
use crate::types::{Column, Entry, EntryId, EntryType, ImpactLevel, Status, ViewMode};
use crate::view::{group_by_column, ColumnGroup, Renderer, ViewSelector};

/// What an approved passcode led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The add form is now open
    AddFormOpened,
    /// The captured entry was removed (`None` if it was already gone)
    Deleted(Option<Entry>),
}

/// The application state of one board session
#[derive(Debug, Clone)]
pub struct ResearchBoard {
    store: EntryStore,
    criteria: Criteria,
    view: ViewSelector,
    gate: Gate,
    form: Option<EntryForm>,
    inspector: DetailInspector,
}

impl ResearchBoard {
    /// Create a board from configuration and seed data
    ///
    /// # Errors
    /// `Seed(DuplicateId)` if two seed entries share an id.
    pub fn new(config: &BoardConfig, seed: SeedData) -> Result<Self, BoardError> {
        tracing::debug!(
            columns = seed.columns.len(),
            entries = seed.entries.len(),
            view = %config.default_view,
            "board initialized"
        );
        Ok(Self::with_store(config, EntryStore::from_seed(seed)?))
    }

    /// Create a board, loading seed data from `config.seed_path` if set
    ///
    /// # Errors
    /// The seed file could not be loaded.
    pub fn from_config(config: &BoardConfig) -> Result<Self, BoardError> {
        let seed = match &config.seed_path {
            Some(path) => SeedData::load(path)?,
            None => SeedData::builtin(),
        };
        Self::new(config, seed)
    }

    fn with_store(config: &BoardConfig, store: EntryStore) -> Self {
        Self {
            store,
            criteria: Criteria::default(),
            view: ViewSelector::new(config.default_view),
            gate: Gate::new(config.passcodes.clone()),
            form: None,
            inspector: DetailInspector::new(),
        }
    }

    // ---- reads -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.store.columns()
    }

    #[inline]
    #[must_use]
    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.store.get(id)
    }

    #[inline]
    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> ViewMode {
        self.view.mode()
    }

    #[inline]
    #[must_use]
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    #[inline]
    #[must_use]
    pub fn gate_status(&self) -> GateStatus {
        self.gate.status()
    }

    /// Entries satisfying the current criteria, in store order
    #[must_use]
    pub fn visible(&self) -> Vec<&Entry> {
        filter_entries(self.store.all(), &self.criteria)
    }

    /// Visible set grouped by column, as the board view shows it
    #[must_use]
    pub fn board_groups(&self) -> Vec<ColumnGroup<'_>> {
        group_by_column(self.store.columns(), &self.visible())
    }

    /// Route the visible set to the renderer for the active view
    pub fn present<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let visible = self.visible();
        self.view.route(self.store.columns(), &visible, renderer);
    }

    // ---- criteria and view ----------------------------------------------

    pub fn set_criteria(&mut self, criteria: Criteria) {
        tracing::debug!(?criteria, "criteria replaced");
        self.criteria = criteria;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.criteria.search = term.into();
        tracing::debug!(search = %self.criteria.search, "search changed");
    }

    pub fn set_type_filter(&mut self, facet: Facet<EntryType>) {
        tracing::debug!(%facet, "type filter changed");
        self.criteria.entry_type = facet;
    }

    pub fn set_status_filter(&mut self, facet: Facet<Status>) {
        tracing::debug!(%facet, "status filter changed");
        self.criteria.status = facet;
    }

    pub fn set_impact_filter(&mut self, facet: Facet<ImpactLevel>) {
        tracing::debug!(%facet, "impact filter changed");
        self.criteria.impact = facet;
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(Criteria::default());
    }

    /// Switch presentation; returns the previous mode
    pub fn set_view(&mut self, mode: ViewMode) -> ViewMode {
        self.view.set(mode)
    }

    // ---- gated mutations -------------------------------------------------

    /// Ask to add an entry; opens the add passcode prompt
    pub fn request_add(&mut self) {
        self.gate.request(MutationIntent::Add);
    }

    /// Ask to delete `id`; opens the delete passcode prompt for that id only
    pub fn request_delete(&mut self, id: EntryId) {
        self.gate.request(MutationIntent::Delete(id));
    }

    pub fn set_passcode_input(&mut self, text: impl Into<String>) {
        self.gate.input(text);
    }

    /// Submit the passcode typed so far
    ///
    /// # Errors
    /// See [`ResearchBoard::submit_passcode_with`].
    pub fn submit_passcode(&mut self) -> Result<GateDecision, BoardError> {
        let approved = self.gate.submit()?;
        Ok(self.apply(approved))
    }

    /// Submit `text` as the passcode for the pending intent
    ///
    /// On approval an add intent opens the form and a delete intent removes
    /// the entry captured at request time. A mismatch leaves the store as it
    /// was.
    ///
    /// # Errors
    /// `Gate(IncorrectPasscode)` on mismatch, `Gate(NotOpen)` when nothing
    /// is pending.
    pub fn submit_passcode_with(&mut self, text: &str) -> Result<GateDecision, BoardError> {
        let approved = self.gate.submit_with(text)?;
        Ok(self.apply(approved))
    }

    /// Close the passcode prompt without acting
    pub fn cancel_gate(&mut self) -> Option<MutationIntent> {
        self.gate.cancel()
    }

    fn apply(&mut self, approved: MutationIntent) -> GateDecision {
        match approved {
            MutationIntent::Add => {
                // an open form keeps its draft
                if self.form.is_none() {
                    self.form = Some(EntryForm::new());
                }
                GateDecision::AddFormOpened
            }
            MutationIntent::Delete(id) => GateDecision::Deleted(self.store.remove(&id)),
        }
    }

    // ---- add form ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn form(&self) -> Option<&EntryForm> {
        self.form.as_ref()
    }

    /// Edit the open form
    ///
    /// # Errors
    /// `FormClosed` unless an add passcode was approved first.
    pub fn form_mut(&mut self) -> Result<&mut EntryForm, BoardError> {
        self.form.as_mut().ok_or(BoardError::FormClosed)
    }

    /// Commit the open form to the store
    ///
    /// A draft missing its title or notes is refused and the form stays
    /// open with everything entered so far.
    ///
    /// # Errors
    /// `FormClosed` or `Validation`.
    pub fn save_entry(&mut self) -> Result<Entry, BoardError> {
        let form = self.form.as_mut().ok_or(BoardError::FormClosed)?;
        if let Err(e) = form.validate() {
            tracing::debug!(error = %e, "entry draft refused");
            return Err(e.into());
        }
        let draft = form.take_draft();
        self.form = None;
        Ok(self.store.add(draft)?)
    }

    /// Close the form, dropping its contents
    pub fn discard_form(&mut self) -> bool {
        self.form.take().is_some()
    }

    // ---- inspector ---------------------------------------------------------

    /// Open the detail view for `id`
    ///
    /// An unknown id closes whatever was being inspected.
    pub fn inspect(&mut self, id: &EntryId) -> Option<&Entry> {
        let Some(entry) = self.store.get(id).cloned() else {
            self.inspector.close();
            return None;
        };
        self.inspector.open(entry);
        self.inspector.current()
    }

    #[inline]
    #[must_use]
    pub fn inspected(&self) -> Option<&Entry> {
        self.inspector.current()
    }

    pub fn close_inspector(&mut self) -> Option<Entry> {
        self.inspector.close()
    }
}

impl Default for ResearchBoard {
    fn default() -> Self {
        Self::with_store(&BoardConfig::default(), EntryStore::default())
    }
}

impl TryFrom<BoardConfig> for ResearchBoard {
    type Error = BoardError;

    fn try_from(config: BoardConfig) -> Result<Self, Self::Error> {
        Self::from_config(&config)
    }
}
