//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a scratch directory so
//! the user's real config is never touched.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_intervals"))
        .args(args)
        .env("HOME", home)
        .env_remove("INTERVALS_ENV")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

#[test]
fn test_plan_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["plan", "--work", "60", "--rest", "5", "--repeat", "4", "--json"],
        "",
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let steps = parsed["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 10);
    assert_eq!(steps[0], 60);
    assert_eq!(steps[1], 5);
    assert_eq!(parsed["total_secs"], 325);
}

#[test]
fn test_plan_uses_config_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "interval.repeat", "0"], "");
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["plan"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains(" 1. Work 60s"), "{stdout}");
    assert!(stdout.contains(" 2. Rest 5s"), "{stdout}");
    assert!(stdout.contains("Total: 65s"), "{stdout}");
}

#[test]
fn test_run_rejects_out_of_range_flags() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["run", "--work", "0"], "");
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["plan", "--repeat", "11"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_run_json_completes() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["run", "--work", "1", "--rest", "0", "--repeat", "0", "--mute", "--json"],
        "",
    );
    assert_eq!(code, 0);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "run_started");
    assert_eq!(events.last().unwrap()["type"], "run_completed");
    assert_eq!(events.last().unwrap()["ticks"], 3);
}

#[test]
fn test_run_cancelled_by_quit() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["run", "--mute"], "q\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Cancelled after 0 tick(s)"), "{stdout}");
}

#[test]
fn test_config_set_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "sound.volume", "75"], "");
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "sound.volume"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "75");

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "sound.nope"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"), "{stderr}");
}

#[test]
fn test_counter_counts_lines() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["counter", "--name", "ada"], "\n\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.ends_with("Hello ada\n2\n[ Click Me ]\n"), "{stdout}");
}

#[test]
fn test_form_quits_cleanly() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["form", "--mute"], "q\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Work 60 second(s)"), "{stdout}");
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("intervals"));
}
