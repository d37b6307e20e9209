//! Interactive line-oriented session
//!
//! Each input line is one discrete user action. It is parsed, applied to the
//! board and fully answered before the next line is read.

use crate::render::{render_detail, TextRenderer};
use rlab_core::{
    BoardError, EntryId, EntryType, Facet, GateDecision, GateStatus, ImpactLevel,
    ParseLabelError, ResearchBoard, Status, ViewMode,
};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

/// Form field addressed by `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Notes,
    Source,
    Type,
    Status,
    Impact,
    Column,
}

impl std::str::FromStr for FormField {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "notes" => Ok(Self::Notes),
            "source" => Ok(Self::Source),
            "type" => Ok(Self::Type),
            "status" => Ok(Self::Status),
            "impact" => Ok(Self::Impact),
            "column" | "category" => Ok(Self::Column),
            other => Err(CommandError::UnknownField(other.to_string())),
        }
    }
}

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    View(ViewMode),
    Search(String),
    FilterType(Facet<EntryType>),
    FilterStatus(Facet<Status>),
    FilterImpact(Facet<ImpactLevel>),
    Clear,
    Add,
    Delete(EntryId),
    Passcode(String),
    Cancel,
    Set(FormField, String),
    Tag(String),
    Untag(String),
    Save,
    Discard,
    Open(EntryId),
    Close,
    Help,
    Quit,
}

/// Session input errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Label(#[from] ParseLabelError),
}

impl SessionCommand {
    /// Parse one input line; blank lines yield `None`
    ///
    /// Arguments are trimmed, except the `passcode` argument: it is everything
    /// after the single separator following the verb, kept verbatim.
    ///
    /// # Errors
    /// Unknown verbs, missing arguments or unparseable labels.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_start();
        if line.trim_end().is_empty() {
            return Ok(None);
        }
        let (verb, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = raw.trim();
        let required = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "view" => Self::View(required("view")?.parse()?),
            "board" => Self::View(ViewMode::Board),
            "table" => Self::View(ViewMode::Table),
            "gallery" => Self::View(ViewMode::Gallery),
            // an empty search clears the term
            "search" => Self::Search(rest.to_string()),
            "type" => Self::FilterType(rest.parse()?),
            "status" => Self::FilterStatus(rest.parse()?),
            "impact" => Self::FilterImpact(rest.parse()?),
            "clear" => Self::Clear,
            "add" | "new" => Self::Add,
            "delete" | "rm" => Self::Delete(EntryId::new(required("delete")?)),
            "passcode" | "pass" => Self::Passcode(raw.to_string()),
            "cancel" => Self::Cancel,
            "set" => {
                let arg = required("set")?;
                let (field, value) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
                Self::Set(field.parse()?, value.trim().to_string())
            }
            "tag" => Self::Tag(required("tag")?.to_string()),
            "untag" => Self::Untag(required("untag")?.to_string()),
            "save" => Self::Save,
            "discard" => Self::Discard,
            "open" | "show" => Self::Open(EntryId::new(required("open")?)),
            "close" => Self::Close,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
commands:
  list                          show the visible entries in the current view
  view board|table|gallery      switch view (also: board, table, gallery)
  search <text>                 free-text search; `search` alone clears it
  type|status|impact <value>    exact filter; `any` clears it
  clear                         reset all filters
  add                           request a new entry (asks for the add passcode)
  delete <id>                   request deletion (asks for the delete passcode)
  passcode <text>               answer the open passcode prompt
  cancel                        close the passcode prompt
  set <field> <value>           edit the open form: title notes source type status impact column
  tag <label> | untag <label>   edit the form's tags
  save | discard                commit or drop the open form
  open <id> | close             show or hide entry details
  quit";

/// Apply one command to the board and describe the outcome
///
/// # Errors
/// Board refusals (gate mismatch, validation, closed form) are returned for
/// the caller to display; they never end the session.
pub fn execute(board: &mut ResearchBoard, cmd: SessionCommand) -> Result<(String, Flow), BoardError> {
    let mut out = String::new();
    match cmd {
        SessionCommand::List => out.push_str(&render_current(board)),
        SessionCommand::View(mode) => {
            board.set_view(mode);
            out.push_str(&render_current(board));
        }
        SessionCommand::Search(term) => {
            board.set_search(term);
            out.push_str(&render_current(board));
        }
        SessionCommand::FilterType(facet) => {
            board.set_type_filter(facet);
            out.push_str(&render_current(board));
        }
        SessionCommand::FilterStatus(facet) => {
            board.set_status_filter(facet);
            out.push_str(&render_current(board));
        }
        SessionCommand::FilterImpact(facet) => {
            board.set_impact_filter(facet);
            out.push_str(&render_current(board));
        }
        SessionCommand::Clear => {
            board.clear_filters();
            out.push_str(&render_current(board));
        }
        SessionCommand::Add => {
            board.request_add();
            out.push_str(&prompt(board));
        }
        SessionCommand::Delete(id) => {
            board.request_delete(id);
            out.push_str(&prompt(board));
        }
        SessionCommand::Passcode(text) => {
            board.set_passcode_input(text);
            match board.submit_passcode()? {
                GateDecision::AddFormOpened => {
                    out.push_str("passcode accepted; fill in the entry with `set`, then `save`\n");
                    out.push_str(&form_summary(board));
                }
                GateDecision::Deleted(Some(entry)) => {
                    let _ = writeln!(out, "deleted [{}] {}", entry.id, entry.title);
                }
                GateDecision::Deleted(None) => out.push_str("nothing to delete\n"),
            }
        }
        SessionCommand::Cancel => {
            if board.cancel_gate().is_some() {
                out.push_str("cancelled\n");
            }
        }
        SessionCommand::Set(field, value) => {
            let form = board.form_mut()?;
            match field {
                FormField::Title => form.set_title(value),
                FormField::Notes => form.set_notes(value),
                FormField::Source => form.set_source(value),
                FormField::Type => form.set_type(value.parse()?),
                FormField::Status => form.set_status(value.parse()?),
                FormField::Impact => form.set_impact(value.parse()?),
                FormField::Column => form.set_column(value),
            }
            out.push_str(&form_summary(board));
        }
        SessionCommand::Tag(label) => {
            let form = board.form_mut()?;
            form.set_tag_input(label);
            if !form.commit_tag() {
                out.push_str("tag ignored (blank or already present)\n");
            }
            out.push_str(&form_summary(board));
        }
        SessionCommand::Untag(label) => {
            board.form_mut()?.remove_tag(&label);
            out.push_str(&form_summary(board));
        }
        SessionCommand::Save => {
            let entry = board.save_entry()?;
            let _ = writeln!(out, "added [{}] {}", entry.id, entry.title);
        }
        SessionCommand::Discard => {
            if board.discard_form() {
                out.push_str("form discarded\n");
            }
        }
        SessionCommand::Open(id) => match board.inspect(&id).cloned() {
            Some(entry) => {
                let column = board.store().column(&entry.column).map(|c| c.title.as_str());
                out.push_str(&render_detail(&entry, column));
            }
            None => {
                let _ = writeln!(out, "no entry with id {id}");
            }
        },
        SessionCommand::Close => {
            board.close_inspector();
        }
        SessionCommand::Help => {
            out.push_str(HELP);
            out.push('\n');
        }
        SessionCommand::Quit => return Ok((out, Flow::Quit)),
    }
    Ok((out, Flow::Continue))
}

/// Render the visible set through the active view
#[must_use]
pub fn render_current(board: &ResearchBoard) -> String {
    let mut renderer = TextRenderer::new();
    board.present(&mut renderer);
    let mut out = renderer.take();
    let visible = board.visible().len();
    let total = board.store().len();
    let _ = writeln!(out, "{visible} of {total} entries ({} view)", board.view());
    out
}

fn prompt(board: &ResearchBoard) -> String {
    let Some(intent) = board.gate().pending() else {
        return String::new();
    };
    let kind = intent.kind();
    format!(
        "{}\n{}\nrespond with `passcode <text>` or `cancel`\n",
        kind.title(),
        kind.description()
    )
}

fn form_summary(board: &ResearchBoard) -> String {
    let Some(form) = board.form() else {
        return String::new();
    };
    let d = form.draft();
    let tags: Vec<&str> = d.tags.iter().collect();
    format!(
        "  title:  {}\n  notes:  {}\n  source: {}\n  type:   {}\n  status: {}\n  impact: {}\n  column: {}\n  tags:   {}\n",
        d.title,
        d.notes,
        d.source,
        d.entry_type,
        d.status,
        d.impact_level,
        d.column,
        tags.join(", ")
    )
}

/// Drive a session until `quit` or end of input
///
/// # Errors
/// Only I/O errors on `input` or `output` end the session early.
pub fn run<R: BufRead, W: Write>(
    board: &mut ResearchBoard,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "research board session; `help` lists commands")?;
    write!(output, "{}", render_current(board))?;

    for line in input.lines() {
        let line = line?;
        let cmd = match SessionCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };

        match execute(board, cmd) {
            Ok((text, flow)) => {
                write!(output, "{text}")?;
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "command refused");
                writeln!(output, "error: {}", e.user_message())?;
                if board.gate_status() == GateStatus::Rejected {
                    writeln!(output, "try again with `passcode <text>` or `cancel`")?;
                }
            }
        }
        output.flush()?;
    }
    Ok(())
}
