//! Research Board Core
//!
//! In-memory state for a personal research knowledge board:
//! - Entry store seeded with a fixed column taxonomy and sample entries
//! - Filter engine over free-text search, type, status and impact
//! - View selection (board, table, gallery) with per-column grouping
//! - Passcode gate guarding add and delete
//! - Add form and detail inspector
//!
//! # Example
//!
//! ```rust
//! use rlab_core::{Facet, EntryType, GateDecision, ResearchBoard};
//!
//! let mut board = ResearchBoard::default();
//! board.set_type_filter(Facet::Only(EntryType::Experiment));
//! assert_eq!(board.visible().len(), 1);
//!
//! board.request_add();
//! assert_eq!(board.submit_passcode_with("ADD").unwrap(), GateDecision::AddFormOpened);
//! let form = board.form_mut().unwrap();
//! form.set_title("Paywall meter test");
//! form.set_notes("Three free articles vs five");
//! board.save_entry().unwrap();
//! assert_eq!(board.store().len(), 7);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod board;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod gate;
pub mod inspector;
pub mod seed;
pub mod store;
pub mod types;
pub mod view;

// Re-exports for convenience
pub use board::{GateDecision, ResearchBoard};
pub use config::BoardConfig;
pub use error::{BoardError, ConfigError, GateError, ParseLabelError, SeedError, ValidationError};
pub use filter::{filter_entries, Criteria, Facet};
pub use form::EntryForm;
pub use gate::{Gate, GateKind, GateStatus, MutationIntent, Passcodes};
pub use inspector::DetailInspector;
pub use seed::SeedData;
pub use store::EntryStore;
pub use types::{
    Column, ColumnId, Entry, EntryDraft, EntryId, EntryType, ImpactLevel, Status, Tags, ViewMode,
};
pub use view::{group_by_column, tag_preview, ColumnGroup, Renderer, ViewSelector};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the research board
    pub use crate::{
        BoardConfig, BoardError, Criteria, Entry, EntryDraft, EntryId, EntryType, Facet,
        GateDecision, ImpactLevel, Renderer, ResearchBoard, Status, ViewMode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
