//! Common test utilities for clipvault integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's `~/.config/clipvault/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
pub use tempfile::TempDir;

/// A test environment with an isolated settings file.
///
/// The `cv()` method returns a `Command` that sets `CV_STORE` per
/// invocation, making tests parallel-safe.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated store directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the cv binary pointed at the isolated store.
    pub fn cv(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cv"));
        cmd.env("CV_STORE", self.store_file());
        cmd
    }

    /// Path of the isolated settings file.
    pub fn store_file(&self) -> PathBuf {
        self.dir.path().join("settings.kdl")
    }

    /// Overwrite the settings file, as an external process would.
    pub fn write_store(&self, contents: &str) {
        fs::write(self.store_file(), contents).unwrap();
    }

    /// Read the settings file back, empty string if it doesn't exist yet.
    pub fn read_store(&self) -> String {
        fs::read_to_string(self.store_file()).unwrap_or_default()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
