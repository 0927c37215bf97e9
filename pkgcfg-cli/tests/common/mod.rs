//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Readers for the files the CLI writes

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated configuration and project directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Global configuration directory (created by pkgcfg on first write)
    pub config_dir: PathBuf,
    /// Project directory where local discovery starts
    pub project_dir: PathBuf,
    /// Value of the `cache-dir` override
    pub cache_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("pkgcfg-config");
        let project_dir = temp_path.join("project");
        let cache_dir = temp_path.join("cache");
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
            project_dir,
            cache_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Inherited `PKGCFG_*` variables are cleared so the host environment
    /// cannot leak into the test.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pkgcfg").expect("Failed to find pkgcfg binary");
        for (key, _) in std::env::vars() {
            if key.starts_with("PKGCFG_") {
                cmd.env_remove(key);
            }
        }
        cmd
    }

    /// Get a command builder with the directories pre-configured.
    ///
    /// `PKGCFG_CACHE_DIR` pins `cache-dir` so listings are deterministic.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir")
            .arg(&self.config_dir)
            .arg("--project-dir")
            .arg(&self.project_dir)
            .env("PKGCFG_CACHE_DIR", &self.cache_dir);
        cmd
    }

    /// A `pkgcfg config` command with `args`.
    pub fn config(&self, args: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.arg("config").args(args);
        cmd
    }

    /// Run `pkgcfg config` and return its trimmed stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn config_output(&self, args: &[&str]) -> String {
        let output = self
            .config(args)
            .output()
            .expect("Failed to run config command");

        assert!(
            output.status.success(),
            "config {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim_end()
            .to_string()
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write `content` to `path`, creating parents.
    pub fn write_file(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// Parse a YAML file written by pkgcfg.
    pub fn read_yaml(&self, path: &Path) -> serde_yaml::Value {
        let contents = fs::read_to_string(path).expect("Failed to read file");
        serde_yaml::from_str(&contents).expect("Invalid YAML")
    }

    /// Global settings file.
    pub fn global_settings(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    /// Global credentials file.
    pub fn global_credentials(&self) -> PathBuf {
        self.config_dir.join("auth.yaml")
    }

    /// Project-local settings file.
    pub fn local_settings(&self) -> PathBuf {
        self.project_dir.join("pkgcfg.local.yaml")
    }

    /// The listing of a fresh configuration plus `extra` lines, sorted.
    pub fn default_listing(&self, extra: &[&str]) -> String {
        let cache = self.cache_dir.display().to_string();
        let mut lines = vec![
            format!("cache-dir = \"{cache}\""),
            "experimental.new-installer = true".to_string(),
            "installer.parallel = true".to_string(),
            "virtualenvs.create = true".to_string(),
            "virtualenvs.in-project = null".to_string(),
            "virtualenvs.options.always-copy = false".to_string(),
            "virtualenvs.options.system-site-packages = false".to_string(),
            format!("virtualenvs.path = \"{{cache-dir}}/virtualenvs\"  # {cache}/virtualenvs"),
        ];
        lines.extend(extra.iter().map(ToString::to_string));
        lines.sort_by(|a, b| {
            let key = |line: &str| {
                line.split(" = ")
                    .next()
                    .unwrap_or_default()
                    .split('.')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            };
            key(a).cmp(&key(b))
        });
        lines.join("\n")
    }
}
