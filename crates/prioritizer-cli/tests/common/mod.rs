//! Common utilities for CLI E2E tests.
//!
//! Every run gets its own data directory and working directory, and a
//! cleared environment, so profiles and logs never leak between tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Isolated home and project directories for one test.
pub struct Sandbox {
    pub home: TempDir,
    pub project: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create home dir"),
            project: TempDir::new().expect("Failed to create project dir"),
        }
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.home.path().join("log.jsonl")
    }

    /// Write a profile file into the project directory.
    pub fn write_profile(&self, file_name: &str, contents: &str) {
        std::fs::write(self.project.path().join(file_name), contents)
            .expect("Failed to write profile");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tp"));
        cmd.env_clear()
            .env("TASK_PRIORITIZER_HOME", self.home.path())
            .current_dir(self.project.path());
        cmd
    }

    /// Invoke a CLI command and return the output.
    pub fn run_cli(&self, args: &[&str]) -> (String, String, i32) {
        self.run_cli_with_input(args, "")
    }

    /// Invoke a CLI command with `input` on stdin.
    pub fn run_cli_with_input(&self, args: &[&str], input: &str) -> (String, String, i32) {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute CLI command");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        let output = child.wait_with_output().expect("Failed to wait for CLI");
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        (stdout, stderr, code)
    }

    /// Invoke a CLI command and expect success.
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run_cli(args);
        if code != 0 && !stderr.is_empty() {
            eprintln!("CLI error output: {}", stderr);
        }
        assert_eq!(code, 0, "CLI command failed with code {}: {:?}", code, args);
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn run_cli_failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run_cli(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {:?}", args);
        (stdout, stderr, code)
    }
}

/// Parse JSON output from CLI.
pub fn parse_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> T {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack, needle
    );
}
