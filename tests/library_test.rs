//! Tests for MatchLibrary directory scanning.

use std::fs;
use tempfile::TempDir;

use strictly_backgammon::log::write_match;
use strictly_backgammon::{Action, Match, Side};
use strictly_gammon::MatchLibrary;

/// Writes a log for a fresh match between `white` and `black`.
fn save_match(dir: &TempDir, filename: &str, white: &str, black: &str) {
    let mut m = Match::new(white, black, 3, true);
    m.add_action(None, Action::roll(4, 1), None).expect("roll");
    fs::write(dir.path().join(filename), write_match(&m)).expect("Failed to write log");
}

#[test]
fn test_scan_loads_valid_logs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    save_match(&dir, "first.gsgf", "alice", "bob");
    save_match(&dir, "second.gsgf", "carol", "dave");

    let library = MatchLibrary::scan(dir.path()).expect("Scan failed");
    assert_eq!(library.len(), 2);
    let saved = library.get_by_name("second").expect("second should load");
    assert_eq!(saved.record().player(Side::Black), "dave");
    assert_eq!(saved.record().position().dice(), [4, 1]);
}

#[test]
fn test_scan_sorted_by_name() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    save_match(&dir, "zebra.gsgf", "a", "b");
    save_match(&dir, "apple.gsgf", "a", "b");
    save_match(&dir, "mango.gsgf", "a", "b");

    let library = MatchLibrary::scan(dir.path()).expect("Scan failed");
    let names: Vec<&str> = library.matches().iter().map(|m| m.name().as_str()).collect();
    assert_eq!(names, ["apple", "mango", "zebra"]);
}

#[test]
fn test_scan_skips_invalid_and_foreign_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    save_match(&dir, "good.gsgf", "alice", "bob");
    fs::write(dir.path().join("broken.gsgf"), "GSGF-1.0\nRoll:-:: 9 9\n").expect("write");
    fs::write(dir.path().join("notes.txt"), "not a log").expect("write");
    fs::create_dir(dir.path().join("nested.gsgf")).expect("mkdir");

    let library = MatchLibrary::scan(dir.path()).expect("Scan failed");
    assert_eq!(library.len(), 1);
    assert!(library.get_by_name("good").is_some());
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let library = MatchLibrary::scan(dir.path()).expect("Scan failed");
    assert!(library.is_empty());
}

#[test]
fn test_scan_missing_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = MatchLibrary::scan(dir.path().join("absent"));
    assert!(result.is_err());
}
