//! Research Board CLI
//!
//! Front end for `rlab-core`:
//! - `show` renders the visible set once, as text or JSON
//! - `columns` lists the taxonomy with entry counts
//! - `session` drives every board operation from stdin, one line per action

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod logging;
pub mod render;
pub mod session;

pub use render::{render_detail, TextRenderer};
pub use session::{CommandError, SessionCommand};
