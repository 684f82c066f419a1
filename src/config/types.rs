//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::BuildSettings;
use crate::domain::services::{JobEntry, JobRegistry, JobSet};
use crate::domain::value_objects::Style;
use crate::error::{StylesmithError, StylesmithResult};
use crate::infrastructure::compiler::DEFAULT_ARGS;
use crate::infrastructure::ProcessCompiler;

use super::loader::{self, ConfigWarning};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "stylesmith.toml";

/// `[compiler]` - external compiler invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_bin")]
    pub bin: String,

    /// Argument template; `{style}`, `{input}`, `{output}` are substituted
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Compiler prints the stylesheet on stdout instead of writing `{output}`
    #[serde(default)]
    pub stdout_to_output: bool,

    /// Per-invocation deadline in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            bin: default_bin(),
            args: default_args(),
            stdout_to_output: false,
            timeout_secs: None,
        }
    }
}

fn default_bin() -> String {
    "sass".to_string()
}

fn default_args() -> Vec<String> {
    DEFAULT_ARGS.iter().map(|a| a.to_string()).collect()
}

/// `[build]` - batch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Relative job paths resolve here; itself relative to the config file
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub style: Style,

    /// Worker pool size
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Where build records live; relative to the config file
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            style: Style::default(),
            jobs: default_jobs(),
            state_dir: default_state_dir(),
            public_url: default_public_url(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".stylesmith")
}

fn default_public_url() -> String {
    "/".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub build: BuildConfig,

    /// `[[job]]` entries in declaration order
    #[serde(default, rename = "job")]
    pub jobs: Vec<JobEntry>,

    /// Directory of the file this was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StylesmithResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys)
    pub fn load_with_warnings(path: &Path) -> StylesmithResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply `STYLESMITH_*` environment overrides
    pub fn with_env_overrides(self) -> StylesmithResult<Self> {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Reject values outside their allowed range
    pub fn validate(&self) -> StylesmithResult<()> {
        if self.build.jobs == 0 {
            return Err(StylesmithError::InvalidSetting {
                key: "build.jobs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.compiler.bin.trim().is_empty() {
            return Err(StylesmithError::InvalidSetting {
                key: "compiler.bin".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.compiler.timeout_secs == Some(0) {
            return Err(StylesmithError::InvalidSetting {
                key: "compiler.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute job root
    pub fn root(&self) -> PathBuf {
        self.base_dir.join(&self.build.root)
    }

    /// Absolute state directory
    pub fn state_dir(&self) -> PathBuf {
        self.base_dir.join(&self.build.state_dir)
    }

    pub fn job_set(&self) -> JobSet {
        JobRegistry::new(self.root()).resolve(&self.jobs)
    }

    /// Settings for the orchestrator; CLI values win over the file
    pub fn build_settings(
        &self,
        style_override: Option<Style>,
        jobs_override: Option<usize>,
    ) -> BuildSettings {
        BuildSettings::new(self.root())
            .with_default_style(self.build.style)
            .with_style_override(style_override)
            .with_concurrency(jobs_override.unwrap_or(self.build.jobs))
            .with_public_url(self.build.public_url.clone())
    }

    pub fn process_compiler(&self) -> ProcessCompiler {
        ProcessCompiler::new(self.compiler.bin.clone())
            .with_args(self.compiler.args.clone())
            .with_stdout_to_output(self.compiler.stdout_to_output)
            .with_timeout(self.compiler.timeout_secs.map(Duration::from_secs))
    }
}
