//! Common test utilities for Stylesmith integration and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the CLI
//! - Assertion macros: `assert_output_contains!`, `assert_file_exists!`, ...
//! - Fixtures: Reusable stylesheet content and the stand-in compiler script

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
