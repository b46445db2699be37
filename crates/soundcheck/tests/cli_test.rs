//! Integration tests for the `soundcheck` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, and error handling — all without a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `soundcheck` binary with env isolation.
///
/// Clears all `SOUNDCHECK_*` env vars and points config directories at
/// a nonexistent path so tests never touch the user's real
/// configuration.
fn soundcheck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("soundcheck");
    cmd.env("HOME", "/tmp/soundcheck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/soundcheck-cli-test-nonexistent")
        .env("XDG_CACHE_HOME", "/tmp/soundcheck-cli-test-nonexistent")
        .env_remove("SOUNDCHECK_PROFILE")
        .env_remove("SOUNDCHECK_BACKEND")
        .env_remove("SOUNDCHECK_ANON_KEY")
        .env_remove("SOUNDCHECK_OUTPUT")
        .env_remove("SOUNDCHECK_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = soundcheck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    soundcheck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("content backend")
            .and(predicate::str::contains("photos"))
            .and(predicate::str::contains("mixes"))
            .and(predicate::str::contains("testimonials")),
    );
}

#[test]
fn test_version_flag() {
    soundcheck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("soundcheck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    soundcheck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    soundcheck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_unknown_subcommand_fails() {
    soundcheck_cmd()
        .arg("discography")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_missing_profile_is_reported() {
    // No config file, no flags: networked commands must fail with the
    // profile-not-found diagnostic rather than panic.
    let output = soundcheck_cmd().args(["photos", "list"]).output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("not found in configuration") || text.contains("No backend API key"),
        "unexpected failure text:\n{text}"
    );
}

#[test]
fn test_backend_flag_requires_key() {
    let output = soundcheck_cmd()
        .args(["photos", "list", "--backend", "https://backend.example.com"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "expected the auth exit code");
    let text = combined_output(&output);
    assert!(text.contains("No backend API key"), "unexpected text:\n{text}");
}

#[test]
fn test_reorder_rejects_zero_position() {
    let output = soundcheck_cmd()
        .args([
            "photos",
            "reorder",
            "0",
            "2",
            "--backend",
            "https://backend.example.com",
            "--anon-key",
            "test-key",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "expected the usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("1-based"), "unexpected text:\n{text}");
}
