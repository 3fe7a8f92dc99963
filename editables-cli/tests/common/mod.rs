//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with isolated configuration
//! - Source tree fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into tests.
const ISOLATED_VARS: &[&str] = &[
    "EDITABLES_STRATEGY",
    "EDITABLES_INSTALLER",
    "EDITABLES_RECORD",
    "EDITABLES_LOG_MODE",
    "EDITABLES_CONFIG_DIR",
    "EDITABLES_PYTHON",
];

/// Test environment with isolated configuration.
///
/// This struct provides:
/// - A temporary directory for source trees
/// - An empty user configuration directory
/// - An output directory to install into
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// User configuration directory passed via --config-dir
    pub config_dir: PathBuf,
    /// Directory installs go into
    pub output_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("config");
        let output_dir = temp_path.join("site-packages");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        std::fs::create_dir_all(&output_dir).expect("Failed to create output dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
            output_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("editables").expect("Failed to find editables binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with the config directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get an `install` command targeting the output directory.
    pub fn install(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("install").arg("--output-dir").arg(&self.output_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create an empty file (and its parents) under the temp directory.
    pub fn touch(&self, relative: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        std::fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create parent directory");
        std::fs::write(&path, "").expect("Failed to create file");
        path
    }

    /// Create a `src/foo` package with a submodule and return its root.
    pub fn package(&self) -> PathBuf {
        self.touch("src/foo/__init__.py");
        self.touch("src/foo/sub/mod.py");
        self.temp_path.join("src/foo")
    }

    /// Names of the entries in the output directory, sorted.
    pub fn output_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output_dir)
            .expect("Failed to read output dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
