//! Integration tests for global CLI options.
//!
//! These tests verify global flags and environment variables that affect
//! all commands, including:
//! - --verbose and --quiet flags
//! - PKGCFG_LOG_MODE
//! - --config-dir and --project-dir overrides
//! - Precedence rules (CLI flags > env vars > defaults)

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ============================================================================
// Verbosity
// ============================================================================

/// Test --verbose prints diagnostics that a normal run does not.
#[test]
fn test_verbose_flag_increases_logging() {
    let env = TestEnv::new();

    let normal = env.config(&["installer.parallel", "false"]).output().unwrap();
    let verbose = env
        .config(&["installer.parallel", "true", "--verbose"])
        .output()
        .unwrap();

    assert!(normal.status.success());
    assert!(verbose.status.success());
    assert!(normal.stderr.is_empty());
    assert!(String::from_utf8_lossy(&verbose.stderr).contains("INFO:"));
}

/// Test the position of --verbose does not matter.
#[test]
fn test_verbose_flag_position_independence() {
    let env = TestEnv::new();

    env.command()
        .args(["--verbose", "config", "virtualenvs.create", "false"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG:"));

    env.config(&["virtualenvs.create", "true", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG:"));
}

/// Test PKGCFG_LOG_MODE selects the level when no flag is given.
#[test]
fn test_log_mode_environment() {
    let env = TestEnv::new();

    env.config(&["virtualenvs.create", "false"])
        .env("PKGCFG_LOG_MODE", "verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO:"));

    env.config(&["virtualenvs.create", "false", "--quiet"])
        .env("PKGCFG_LOG_MODE", "verbose")
        .assert()
        .success()
        .stderr("");
}

// ============================================================================
// Directories
// ============================================================================

/// Test --config-dir wins over PKGCFG_CONFIG_DIR.
#[test]
fn test_config_dir_flag_overrides_environment() {
    let env = TestEnv::new();
    let other = env.create_dir("other-config");

    env.config(&["installer.parallel", "false"])
        .env("PKGCFG_CONFIG_DIR", &other)
        .assert()
        .success();

    assert!(env.global_settings().exists());
    assert!(!other.join("config.yaml").exists());
}

/// Test relative --project-dir paths resolve against the working directory.
#[test]
fn test_relative_project_dir() {
    let env = TestEnv::new();

    env.command_bare()
        .current_dir(&env.temp_path)
        .arg("--config-dir")
        .arg(&env.config_dir)
        .args(["--project-dir", "project", "config"])
        .args(["installer.parallel", "false", "--local"])
        .assert()
        .success();

    assert!(env.local_settings().exists());
}
