//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against a throwaway HOME so the real
//! config is never touched. No test reaches the network.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_proactive-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("PROACTIVE_ENV")
        .env_remove("TRELLO_API_KEY")
        .env_remove("TRELLO_API_TOKEN")
        .env_remove("TRELLO_BOARD_ID")
        .env_remove("GEMINI_API_KEY")
        .current_dir(home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    for cmd in ["tasks", "next", "view", "summary", "analyze", "risk", "recommend", "config"] {
        assert!(stdout.contains(cmd), "help is missing {cmd}");
    }
}

#[test]
fn test_config_path_under_home() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("proactive/config.toml"));
    assert!(stdout.starts_with(home.path().to_str().unwrap()));
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "trello.board_id", "board42"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "trello.board_id"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "board42");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_masks_secrets() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "gemini.api_key", "super-secret"]);
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("super-secret"));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["server"]["port"], 10000);
}

#[test]
fn test_tasks_without_credentials_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["tasks"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No cards found"));
}
