//! CLI tests for the `cubetimer` binary.
//!
//! Spawns the binary inside a temp directory and checks exit codes and the
//! machine-readable outputs.

use std::path::Path;
use std::process::{Command, Output};

use cubetimer::exit_codes;
use cubetimer::io::init::{InitOptions, init_timer};
use serde_json::Value;

fn cubetimer(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cubetimer"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run cubetimer")
}

#[test]
fn commands_without_init_exit_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cubetimer(temp.path(), &["stats"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}

#[test]
fn init_twice_without_force_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cubetimer(temp.path(), &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let output = cubetimer(temp.path(), &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let output = cubetimer(temp.path(), &["init", "--force"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn record_then_stats_reports_average() {
    let temp = tempfile::tempdir().expect("tempdir");
    init_timer(temp.path(), &InitOptions { force: false }).expect("init");

    for millis in ["1200", "1000", "1500", "1100", "1300"] {
        let output = cubetimer(temp.path(), &["record", millis, "--scramble", "R U F"]);
        assert_eq!(output.status.code(), Some(exit_codes::OK));
    }

    let output = cubetimer(temp.path(), &["stats", "--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stats: Value = serde_json::from_slice(&output.stdout).expect("stats json");
    assert_eq!(stats["count"], 5);
    assert_eq!(stats["best"], 1000);
    assert_eq!(stats["ao5"], 1200.0);
    assert_eq!(stats["ao12"], Value::Null);
}

#[test]
fn short_record_exits_discarded() {
    let temp = tempfile::tempdir().expect("tempdir");
    init_timer(temp.path(), &InitOptions { force: false }).expect("init");

    let output = cubetimer(temp.path(), &["record", "300"]);
    assert_eq!(output.status.code(), Some(exit_codes::DISCARDED));

    let output = cubetimer(temp.path(), &["list"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty());
}

#[test]
fn edits_on_missing_solves_exit_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    init_timer(temp.path(), &InitOptions { force: false }).expect("init");

    let output = cubetimer(temp.path(), &["dnf"]);
    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));

    let output = cubetimer(temp.path(), &["record", "9000"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let output = cubetimer(temp.path(), &["penalty", "12"]);
    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));
    let output = cubetimer(temp.path(), &["delete"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn seeded_scrambles_are_reproducible() {
    let temp = tempfile::tempdir().expect("tempdir");
    let first = cubetimer(temp.path(), &["scramble", "--seed", "7", "--count", "3"]);
    let second = cubetimer(temp.path(), &["scramble", "--seed", "7", "--count", "3"]);
    assert_eq!(first.status.code(), Some(exit_codes::OK));
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.split(' ').count() == 20));
}

#[test]
fn scramble_check_flags_redundant_sequences() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cubetimer(temp.path(), &["scramble", "--check", "R L R U"]);
    assert_eq!(output.status.code(), Some(exit_codes::REDUNDANT));

    let output = cubetimer(temp.path(), &["scramble", "--check", "R U R' U'"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn scramble_check_rejects_generation_flags() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cubetimer(temp.path(), &["scramble", "--check", "R U", "--count", "2"]);
    assert_ne!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("--count"));
}

#[test]
fn state_snapshot_tracks_solved_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cubetimer(temp.path(), &["state", "R R'"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let snapshot: Value = serde_json::from_slice(&output.stdout).expect("state json");
    assert_eq!(snapshot["solved"], true);
    assert_eq!(snapshot["cubies"].as_array().map(Vec::len), Some(26));

    let output = cubetimer(temp.path(), &["state", "R U"]);
    let snapshot: Value = serde_json::from_slice(&output.stdout).expect("state json");
    assert_eq!(snapshot["solved"], false);
    assert_eq!(snapshot["scramble"], "R U");
}
