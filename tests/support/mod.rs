//! Test support utilities for keywatch integration tests.
//!
//! Provides an isolated environment and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// No process-global state is mutated; child processes get their
/// environment through the command builder, so tests can run in parallel.
pub struct Test {
    /// Temporary home directory (also holds config files)
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Write a config file into the temp home and return its path.
    pub fn config(&self, content: &str) -> PathBuf {
        let path = self.home.path().join("keywatch.toml");
        std::fs::write(&path, content).expect("failed to write config");
        path
    }
}
