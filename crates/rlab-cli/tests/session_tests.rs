//! Scripted sessions and one-shot subcommands
//!
use pretty_assertions::assert_eq;
use rlab_cli::{cli, session};
use rlab_core::{BoardConfig, EntryId, Passcodes, ResearchBoard, SeedData, ViewMode};
use rlab_test_utils::{all_ids, setup_board};
use std::io::Cursor;

fn run_script(board: &mut ResearchBoard, script: &str) -> String {
    let mut out = Vec::new();
    session::run(board, Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_session_add_entry_end_to_end() {
    let mut board = setup_board();
    let transcript = run_script(
        &mut board,
        "add\n\
         passcode add\n\
         passcode ADD\n\
         set title Paywall meter test\n\
         save\n\
         set notes Three free articles vs five\n\
         set type experiment\n\
         set column experiments\n\
         tag Paywall\n\
         tag Paywall\n\
         save\n\
         quit\n",
    );

    assert!(transcript.contains("Add New Entry"));
    assert!(transcript.contains("error: Incorrect passcode"));
    assert!(transcript.contains("passcode accepted"));
    assert!(transcript.contains("error: notes are required"));
    assert!(transcript.contains("tag ignored"));
    assert!(transcript.contains("added ["));

    assert_eq!(board.store().len(), 7);
    let added = board.store().all().last().unwrap();
    assert_eq!(added.title, "Paywall meter test");
    assert_eq!(added.column.as_str(), "experiments");
    assert_eq!(added.tags.iter().collect::<Vec<_>>(), vec!["Paywall"]);
    assert!(board.form().is_none());
}

#[test]
fn test_session_delete_after_wrong_passcode() {
    let mut board = setup_board();
    let transcript = run_script(
        &mut board,
        "delete 3\npasscode nope\npasscode DELETE\n",
    );

    assert!(transcript.contains("Delete Entry"));
    assert!(transcript.contains("try again with `passcode <text>` or `cancel`"));
    assert!(transcript.contains("deleted [3] Print Loyalty Club (\"Ink Society\")"));
    assert!(board.entry(&EntryId::new("3")).is_none());
    assert_eq!(board.store().len(), 5);
}

#[test]
fn test_session_passcode_is_matched_exactly() {
    let mut board = setup_board();
    let transcript = run_script(&mut board, "delete 1\npasscode   DELETE   \n");

    assert!(transcript.contains("error: Incorrect passcode"));
    assert!(board.entry(&EntryId::new("1")).is_some());
}

#[test]
fn test_session_passcode_with_trailing_space_can_be_typed() {
    let config = BoardConfig::new().with_passcodes(Passcodes::new("ADD", "DEL "));
    let mut board = ResearchBoard::new(&config, SeedData::builtin()).unwrap();

    let transcript = run_script(&mut board, "delete 1\npasscode DEL\npasscode DEL \n");

    assert!(transcript.contains("error: Incorrect passcode"));
    assert!(transcript.contains("deleted [1] Hooked Model (Nir Eyal)"));
    assert!(board.entry(&EntryId::new("1")).is_none());
}

#[test]
fn test_session_missed_open_closes_details() {
    let mut board = setup_board();
    let transcript = run_script(&mut board, "open 6\nopen 404\n");

    assert!(transcript.contains("no entry with id 404"));
    assert!(board.inspected().is_none());
}

#[test]
fn test_session_cancel_keeps_entry() {
    let mut board = setup_board();
    let before = all_ids(&board);
    let transcript = run_script(&mut board, "delete 1\ncancel\npasscode DELETE\n");

    assert!(transcript.contains("cancelled"));
    assert!(transcript.contains("error:"));
    assert_eq!(all_ids(&board), before);
}

#[test]
fn test_session_filters_and_views() {
    let mut board = setup_board();
    let transcript = run_script(
        &mut board,
        "search CHURN\ntable\ntype experiment\nclear\nview gallery\n",
    );

    assert!(transcript.contains("2 of 6 entries (Table view)"));
    assert!(transcript.contains("1 of 6 entries (Table view)"));
    assert!(transcript.contains("6 of 6 entries (Gallery view)"));
    assert_eq!(board.view(), ViewMode::Gallery);
    assert!(board.criteria().is_default());
}

#[test]
fn test_session_inspector_and_bad_input() {
    let mut board = setup_board();
    let transcript = run_script(
        &mut board,
        "open 6\nfly away\nopen 404\nclose\nset title nothing\n",
    );

    assert!(transcript.contains("NYT Cooking Subscription Model\n"));
    assert!(transcript.contains("column:   Case Studies"));
    assert!(transcript.contains("error: unknown command: fly"));
    assert!(transcript.contains("no entry with id 404"));
    assert!(transcript.contains("error: no entry form is open"));
    assert!(board.inspected().is_none());
}

#[test]
fn test_show_json_reports_visible_entries() {
    let mut board = setup_board();
    let matches = cli::command()
        .try_get_matches_from(["rlab", "show", "--search", "churn", "--json"])
        .unwrap();
    let (_, args) = matches.subcommand().unwrap();
    let out = cli::show(&mut board, args).unwrap();

    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["view"], "board");
    assert_eq!(json["total"], 6);
    assert_eq!(json["visible"], 2);
    let ids: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["2", "5"]);
}

#[test]
fn test_show_table_text() {
    let mut board = setup_board();
    let matches = cli::command()
        .try_get_matches_from(["rlab", "show", "--view", "table", "--impact", "high"])
        .unwrap();
    let (_, args) = matches.subcommand().unwrap();
    let out = cli::show(&mut board, args).unwrap();

    assert!(out.starts_with("ID"));
    assert!(out.lines().all(|l| !l.contains("| Low |")));
}

#[test]
fn test_columns_counts_entries() {
    let board = setup_board();
    let matches = cli::command()
        .try_get_matches_from(["rlab", "columns", "--json"])
        .unwrap();
    let (_, args) = matches.subcommand().unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&cli::columns(&board, args).unwrap()).unwrap();

    let columns = json.as_array().unwrap();
    assert_eq!(columns.len(), 8);
    let total: u64 = columns.iter().map(|c| c["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 6);
}

#[test]
fn test_config_file_sets_passcodes_and_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.toml");
    std::fs::write(
        &path,
        "default_view = \"table\"\n\n[passcodes]\nadd = \"open\"\ndelete = \"sesame\"\n",
    )
    .unwrap();

    let matches = cli::command()
        .try_get_matches_from(["rlab", "session", "--config", path.to_str().unwrap()])
        .unwrap();
    let mut board = cli::build_board(&matches).unwrap();
    assert_eq!(board.view(), ViewMode::Table);

    run_script(&mut board, "delete 1\npasscode DELETE\npasscode sesame\n");
    assert!(board.entry(&EntryId::new("1")).is_none());
}

#[test]
fn test_missing_seed_file_fails_to_build() {
    let matches = cli::command()
        .try_get_matches_from(["rlab", "show", "--seed", "/nonexistent/seed.json"])
        .unwrap();
    let err = cli::build_board(&matches).unwrap_err();
    assert!(err.to_string().contains("loading seed data"));
}
