//! CLI integration tests for asoc-migrate.
//!
//! These tests verify command-line argument parsing, help output,
//! and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the asoc-migrate binary.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("asoc-migrate").unwrap();
    // Keep host environment variables from standing in for a config file.
    cmd.env_remove("SQLSERVER_HOST")
        .env_remove("SUPABASE_DB_HOST")
        .env_remove("SUPABASE_SERVICE_ROLE_KEY");
    cmd
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("patch-column"))
        .stdout(predicate::str::contains("reset-sequences"))
        .stdout(predicate::str::contains("health-check"));
}

#[test]
fn test_run_subcommand_help() {
    cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("Unit or group name"));
}

#[test]
fn test_patch_column_defaults_to_member_email() {
    cmd()
        .args(["patch-column", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--only-missing"))
        .stdout(predicate::str::contains("[default: socios]"))
        .stdout(predicate::str::contains("[default: email]"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("asoc-migrate"));
}

// =============================================================================
// Global Flags Tests
// =============================================================================

#[test]
fn test_output_json_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-json"));
}

#[test]
fn test_log_format_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: info]"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["--config", "nonexistent_config_file.yaml", "health-check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_invalid_yaml_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "invalid: yaml: content: [").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "health-check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML"));
}

#[test]
fn test_missing_env_reports_required_variable() {
    // No config file and no environment: the first required variable is named.
    cmd()
        .args(["run", "socios"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SQLSERVER_HOST"));
}

#[test]
fn test_unknown_unit_fails_before_connecting() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "source:").unwrap();
    writeln!(file, "  host: h").unwrap();
    writeln!(file, "  database: d").unwrap();
    writeln!(file, "  user: u").unwrap();
    writeln!(file, "  password: p").unwrap();
    writeln!(file, "target:").unwrap();
    writeln!(file, "  host: t").unwrap();
    writeln!(file, "  password: k").unwrap();

    cmd()
        .args([
            "--config",
            file.path().to_str().unwrap(),
            "run",
            "no-such-unit",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown migration unit"));
}

// =============================================================================
// Subcommand Existence Tests
// =============================================================================

#[test]
fn test_health_check_command_exists() {
    cmd()
        .args(["health-check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test database connections"));
}

#[test]
fn test_reset_sequences_command_exists() {
    cmd()
        .args(["reset-sequences", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identity sequences"));
}

// =============================================================================
// No Subcommand Tests
// =============================================================================

#[test]
fn test_no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}
