//! Configuration module for Stylesmith
//!
//! Precedence, highest first:
//! 1. CLI flags (`--style`, `--jobs`)
//! 2. Environment variables (`STYLESMITH_*`)
//! 3. Project config (`stylesmith.toml`, or `--config PATH`)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{with_env_overrides, ConfigWarning};
pub use types::{BuildConfig, CompilerConfig, Config, CONFIG_FILE};
