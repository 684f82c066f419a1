//! Command handlers
//!
//! Each handler returns `Ok(true)` when every job it touched succeeded,
//! `Ok(false)` when some job failed, and `Err` when the command could not run.

mod asset;
mod build;
mod clean;
mod list;

pub use asset::cmd_asset;
pub use build::cmd_build;
pub use clean::cmd_clean;
pub use list::cmd_list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stylesmith::application::{BuildOrchestrator, BuildSettings};
use stylesmith::config::{Config, CONFIG_FILE};
use stylesmith::infrastructure::{ProcessCompiler, TomlStateStore};

pub type Orchestrator = BuildOrchestrator<TomlStateStore, ProcessCompiler>;

/// Load, override from the environment, and validate the configuration
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    let (config, warnings) = Config::load_with_warnings(&path)?;
    for warning in &warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => eprintln!(
                "warning: unknown config key '{}' at {} (did you mean '{}'?)",
                warning.key, location, suggestion
            ),
            None => eprintln!("warning: unknown config key '{}' at {}", warning.key, location),
        }
    }

    let config = config
        .with_env_overrides()
        .context("invalid STYLESMITH_* environment override")?;
    config.validate()?;
    Ok(config)
}

/// Wire the orchestrator to the on-disk store and the configured compiler
pub fn orchestrator(config: &Config, settings: BuildSettings) -> Result<Orchestrator> {
    let store = TomlStateStore::new(config.state_dir());
    let orchestrator =
        BuildOrchestrator::new(config.job_set(), settings, store, config.process_compiler())?;
    Ok(orchestrator)
}
