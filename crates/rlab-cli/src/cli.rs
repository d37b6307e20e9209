//! Command definitions and one-shot subcommands

use crate::logging::LogFormat;
use crate::render::TextRenderer;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rlab_core::{
    BoardConfig, Criteria, Entry, EntryType, Facet, ImpactLevel, ResearchBoard, Status, ViewMode,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

fn facet_parser<T>(s: &str) -> Result<Facet<T>, String>
where
    T: std::str::FromStr<Err = rlab_core::ParseLabelError>,
{
    s.parse().map_err(|e: rlab_core::ParseLabelError| e.to_string())
}

fn view_parser(s: &str) -> Result<ViewMode, String> {
    s.parse().map_err(|e: rlab_core::ParseLabelError| e.to_string())
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// The `rlab` command tree
#[must_use]
pub fn command() -> Command {
    Command::new("rlab")
        .version(rlab_core::VERSION)
        .about("Personal research knowledge board")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Board configuration file (.toml, .yaml or .yml)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Seed data file (.json, .yaml, .yml or .toml); overrides the config"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(|s: &str| s.parse::<LogFormat>())
                .help("Log line format on stderr: text or json"),
        )
        .subcommand(
            Command::new("show")
                .about("Render the visible entries once")
                .arg(
                    Arg::new("view")
                        .long("view")
                        .value_parser(view_parser)
                        .help("board, table or gallery (defaults to the configured view)"),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .default_value("")
                        .help("Case-insensitive text matched against title, notes, source and tags"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("any")
                        .value_parser(facet_parser::<EntryType>)
                        .help("Exact entry type, or `any`"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("any")
                        .value_parser(facet_parser::<Status>)
                        .help("Exact status, or `any`"),
                )
                .arg(
                    Arg::new("impact")
                        .long("impact")
                        .default_value("any")
                        .value_parser(facet_parser::<ImpactLevel>)
                        .help("Exact impact level, or `any`"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("columns")
                .about("List the column taxonomy with entry counts")
                .arg(json_flag()),
        )
        .subcommand(Command::new("session").about("Run an interactive session on stdin"))
}

/// Log format chosen on the command line
#[must_use]
pub fn log_format(matches: &ArgMatches) -> LogFormat {
    matches
        .get_one::<LogFormat>("log-format")
        .copied()
        .unwrap_or_default()
}

/// Load configuration from `--config`, then apply `--seed`
///
/// # Errors
/// The config file is unreadable or invalid.
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<BoardConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BoardConfig::default(),
    };
    if let Some(seed) = matches.get_one::<PathBuf>("seed") {
        config = config.with_seed_path(seed.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Build the board for a parsed command line
///
/// # Errors
/// Configuration or seed data could not be loaded.
pub fn build_board(matches: &ArgMatches) -> anyhow::Result<ResearchBoard> {
    let config = load_config(matches)?;
    let seed = config.seed_path.as_deref().map(Path::display);
    ResearchBoard::from_config(&config)
        .with_context(|| match seed {
            Some(path) => format!("loading seed data {path}"),
            None => "building board".to_string(),
        })
}

/// Criteria from the `show` arguments
#[must_use]
pub fn criteria_from(args: &ArgMatches) -> Criteria {
    Criteria {
        search: args.get_one::<String>("search").cloned().unwrap_or_default(),
        entry_type: args
            .get_one::<Facet<EntryType>>("type")
            .copied()
            .unwrap_or_default(),
        status: args.get_one::<Facet<Status>>("status").copied().unwrap_or_default(),
        impact: args
            .get_one::<Facet<ImpactLevel>>("impact")
            .copied()
            .unwrap_or_default(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowReport<'a> {
    view: ViewMode,
    total: usize,
    visible: usize,
    entries: Vec<&'a Entry>,
}

/// Run `show` against the board
///
/// # Errors
/// JSON serialization failure.
pub fn show(board: &mut ResearchBoard, args: &ArgMatches) -> anyhow::Result<String> {
    board.set_criteria(criteria_from(args));
    if let Some(mode) = args.get_one::<ViewMode>("view") {
        board.set_view(*mode);
    }

    if args.get_flag("json") {
        let report = ShowReport {
            view: board.view(),
            total: board.store().len(),
            visible: board.visible().len(),
            entries: board.visible(),
        };
        let mut out = serde_json::to_string_pretty(&report)?;
        out.push('\n');
        return Ok(out);
    }

    let mut renderer = TextRenderer::new();
    board.present(&mut renderer);
    Ok(renderer.take())
}

#[derive(Debug, Serialize)]
struct ColumnSummary<'a> {
    id: &'a str,
    title: &'a str,
    icon: &'a str,
    description: &'a str,
    count: usize,
}

/// Run `columns` against the board
///
/// # Errors
/// JSON serialization failure.
pub fn columns(board: &ResearchBoard, args: &ArgMatches) -> anyhow::Result<String> {
    let summaries: Vec<ColumnSummary<'_>> = board
        .columns()
        .iter()
        .map(|c| ColumnSummary {
            id: c.id.as_str(),
            title: &c.title,
            icon: &c.icon,
            description: &c.description,
            count: board
                .store()
                .all()
                .iter()
                .filter(|e| e.column == c.id)
                .count(),
        })
        .collect();

    if args.get_flag("json") {
        let mut out = serde_json::to_string_pretty(&summaries)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for s in &summaries {
        let _ = writeln!(out, "{:<20} {:<24} {:>3}  {}", s.id, s.title, s.count, s.description);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn show_args_become_criteria() {
        let matches = command()
            .try_get_matches_from([
                "rlab", "show", "--search", "churn", "--type", "experiment", "--impact", "any",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let c = criteria_from(args);
        assert_eq!(c.search, "churn");
        assert_eq!(c.entry_type, Facet::Only(EntryType::Experiment));
        assert_eq!(c.status, Facet::Any);
        assert_eq!(c.impact, Facet::Any);
    }

    #[test]
    fn bad_facet_is_a_usage_error() {
        let err = command()
            .try_get_matches_from(["rlab", "show", "--status", "someday"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn seed_flag_overrides_config() {
        let matches = command()
            .try_get_matches_from(["rlab", "columns", "--seed", "seed.yaml"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("seed.yaml")));
        assert_eq!(log_format(&matches), LogFormat::Text);
    }
}
