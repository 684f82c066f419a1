//! Job entity - one named input → output conversion

use std::path::{Path, PathBuf};

use crate::domain::value_objects::Style;

/// A resolved conversion job.
///
/// Built fresh from configuration on every run; paths are always absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefinition {
    name: String,
    input_path: PathBuf,
    output_path: PathBuf,
    style: Option<Style>,
}

impl JobDefinition {
    pub fn new(
        name: impl Into<String>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            style: None,
        }
    }

    /// Pin this job to a style regardless of the global default
    pub fn with_style(mut self, style: Option<Style>) -> Self {
        self.style = style;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Per-job style override, if configured
    pub fn style(&self) -> Option<Style> {
        self.style
    }

    /// Style in effect for this job.
    ///
    /// An explicit override (e.g. from the command line) beats the job's own
    /// style, which beats the project default.
    pub fn effective_style(&self, override_style: Option<Style>, default: Style) -> Style {
        override_style.or(self.style).unwrap_or(default)
    }
}
