//! Custom assertion macros for integration and scenario tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            files.extend(list_all_files(&path));
        } else {
            files.push(path.display().to_string());
        }
    }
    files.sort();
    files
}

/// Assert that a file exists relative to the project root.
#[macro_export]
macro_rules! assert_file_exists {
    ($env:expr, $path:expr) => {
        let full_path = $env.path($path);
        assert!(
            full_path.exists(),
            "Expected file at '{}', but it doesn't exist.\nFiles found:\n  {}",
            $path,
            $crate::common::list_all_files($env.root()).join("\n  ")
        );
    };
}

/// Assert that a file does NOT exist relative to the project root.
#[macro_export]
macro_rules! assert_file_missing {
    ($env:expr, $path:expr) => {
        let full_path = $env.path($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT exist, but it does.",
            $path
        );
    };
}

/// Assert that stdout or stderr contains a string.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain {:?}.\nstdout:\n{}\nstderr:\n{}",
            $needle,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that a command succeeded, printing its output otherwise.
#[macro_export]
macro_rules! assert_success {
    ($result:expr) => {
        assert!(
            $result.success,
            "Expected success, got exit code {}.\nstdout:\n{}\nstderr:\n{}",
            $result.exit_code,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that a command failed.
#[macro_export]
macro_rules! assert_failure {
    ($result:expr) => {
        assert!(
            !$result.success,
            "Expected failure, but command succeeded.\nstdout:\n{}\nstderr:\n{}",
            $result.stdout,
            $result.stderr
        );
    };
}
