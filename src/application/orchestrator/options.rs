//! Orchestrator Options
//!
//! Construction-time settings and per-call options.

use std::path::PathBuf;

use crate::domain::value_objects::Style;

/// Explicit build configuration handed to the orchestrator at construction
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Absolute root that job paths were resolved against
    pub root: PathBuf,
    /// Style for jobs that do not set their own
    pub default_style: Style,
    /// Style forced on every job (`--style`)
    pub style_override: Option<Style>,
    /// Worker pool size, at least 1
    pub concurrency: usize,
    /// URL prefix for asset references
    pub public_url: String,
}

impl BuildSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_style: Style::default(),
            style_override: None,
            concurrency: 1,
            public_url: "/".to_string(),
        }
    }

    pub fn with_default_style(mut self, style: Style) -> Self {
        self.default_style = style;
        self
    }

    pub fn with_style_override(mut self, style: Option<Style>) -> Self {
        self.style_override = style;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = public_url.into();
        self
    }
}

/// Options for one `build` call
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Only these jobs; `None` builds everything
    pub names: Option<Vec<String>>,
    /// Skip staleness checks
    pub force: bool,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = if names.is_empty() { None } else { Some(names) };
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Options for one `clean` call
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Report only, touch nothing
    pub dry_run: bool,
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
