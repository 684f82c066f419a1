//! Error types for Stylesmith
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.
//!
//! Two levels exist: `StylesmithError` aborts a whole command (unreadable
//! config, bad style value), while `JobError` is scoped to a single job and
//! never stops the rest of a batch.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::ports::StateError;
use crate::domain::value_objects::InvalidStyle;

/// Result type alias for Stylesmith operations
pub type StylesmithResult<T> = Result<T, StylesmithError>;

/// Command-level error
#[derive(Error, Debug)]
pub enum StylesmithError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has wrong types
    #[error("invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A setting holds a value outside its allowed range
    #[error("invalid value for {key}: {message}")]
    InvalidSetting { key: String, message: String },

    /// Unknown output style
    #[error(transparent)]
    InvalidStyle(#[from] InvalidStyle),

    /// Build state could not be accessed
    #[error(transparent)]
    State(#[from] StateError),

    /// Worker pool could not be created
    #[error("cannot start worker pool: {0}")]
    WorkerPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problem with a single job entry in the configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `name`, `input` or `output` absent (or empty)
    #[error("{entry}: missing required field '{field}'")]
    MissingField { entry: String, field: &'static str },

    /// Two entries share a name
    #[error("job '{name}' is defined more than once (entries #{first} and #{second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    /// A job requested by name is not configured
    #[error("no job named '{name}' in configuration")]
    UnknownJob { name: String },
}

/// Failure of one job. Never affects other jobs in the same batch.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Input unreadable or output unwritable
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create output directory {path}: {source}")]
    OutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compiler exited non-zero. `output` is the compiler's own text, verbatim.
    #[error("compiler `{program}` failed ({status}):\n{output}")]
    Compilation {
        program: String,
        status: String,
        output: String,
    },

    #[error("compiler `{program}` did not finish within {}s:\n{output}", .timeout.as_secs())]
    TimedOut {
        program: String,
        timeout: Duration,
        output: String,
    },

    #[error("cannot update build state: {0}")]
    State(#[from] StateError),
}

impl JobError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JobError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-readable category, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Configuration(_) => "configuration",
            JobError::Io { .. } => "io",
            JobError::OutputPath { .. } => "output_path",
            JobError::Compilation { .. } => "compilation",
            JobError::TimedOut { .. } => "timeout",
            JobError::State(_) => "state",
        }
    }
}
