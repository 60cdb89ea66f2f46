//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway home
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with HOME pointed at `home` and return output.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wellspring-cli", "--quiet", "--"])
        .args(args)
        .env("HOME", home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_log_then_snapshot_json() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &[
            "--as-of",
            "2026-08-24",
            "log",
            "hydration",
            "--cups",
            "5",
        ],
    );
    assert_eq!(code, 0, "log failed: {stderr}");
    assert!(stdout.contains("Logged hydration"));

    let (code, stdout, _) = run_cli(
        home.path(),
        &["--as-of", "2026-08-24", "snapshot", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("snapshot is JSON");
    assert_eq!(parsed["streaks"]["hydration"]["current"], 1);
}

#[test]
fn test_consume_rejects_overdraw() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(
        home.path(),
        &["--as-of", "2026-08-24", "consume", "ink", "100"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("ink: 0/100"));

    let (code, _, stderr) = run_cli(
        home.path(),
        &["--as-of", "2026-08-24", "consume", "ink", "1"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Insufficient resource"));
}

#[test]
fn test_config_path_prints() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}
