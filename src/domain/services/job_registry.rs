//! Job Registry
//!
//! Turns the configured job entries into resolved `JobDefinition`s.
//!
//! A broken entry only disqualifies itself: every other entry still
//! resolves, and the broken one is reported with the exact field it lacks.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::JobDefinition;
use crate::domain::value_objects::Style;
use crate::error::ConfigError;

/// A job entry exactly as written in configuration.
///
/// Every field is optional here so that a missing one can be reported
/// precisely instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
}

impl JobEntry {
    pub fn new(name: &str, input: &str, output: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            input: Some(input.to_string()),
            output: Some(output.to_string()),
            style: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// An entry that could not be turned into a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Job name if the entry had one, otherwise `entry #N`
    pub label: String,
    pub error: ConfigError,
}

/// One slot of a resolved configuration, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEntry {
    Job(JobDefinition),
    Rejected(RejectedEntry),
}

impl ResolvedEntry {
    fn label(&self) -> &str {
        match self {
            ResolvedEntry::Job(job) => job.name(),
            ResolvedEntry::Rejected(rejected) => &rejected.label,
        }
    }
}

/// Result of resolving all configured entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSet {
    entries: Vec<ResolvedEntry>,
}

impl JobSet {
    /// All slots in declaration order
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Successfully resolved jobs in declaration order
    pub fn jobs(&self) -> impl Iterator<Item = &JobDefinition> {
        self.entries.iter().filter_map(|entry| match entry {
            ResolvedEntry::Job(job) => Some(job),
            ResolvedEntry::Rejected(_) => None,
        })
    }

    pub fn rejected(&self) -> impl Iterator<Item = &RejectedEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ResolvedEntry::Rejected(rejected) => Some(rejected),
            ResolvedEntry::Job(_) => None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&JobDefinition> {
        self.jobs().find(|job| job.name() == name)
    }

    /// Narrow the set to the requested names.
    ///
    /// Declaration order is kept. Requested names that match nothing become
    /// `UnknownJob` rejections appended at the end.
    pub fn select(&self, names: Option<&[String]>) -> JobSet {
        let Some(names) = names else {
            return self.clone();
        };

        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let mut entries: Vec<ResolvedEntry> = self
            .entries
            .iter()
            .filter(|entry| wanted.contains(entry.label()))
            .cloned()
            .collect();

        let mut reported = HashSet::new();
        for name in names {
            let known = self.entries.iter().any(|entry| entry.label() == name);
            if !known && reported.insert(name.as_str()) {
                entries.push(ResolvedEntry::Rejected(RejectedEntry {
                    label: name.clone(),
                    error: ConfigError::UnknownJob { name: name.clone() },
                }));
            }
        }

        JobSet { entries }
    }

    /// All jobs, or the first configuration error
    pub fn into_strict(self) -> Result<Vec<JobDefinition>, ConfigError> {
        self.entries
            .into_iter()
            .map(|entry| match entry {
                ResolvedEntry::Job(job) => Ok(job),
                ResolvedEntry::Rejected(rejected) => Err(rejected.error),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves configured entries against a root directory
#[derive(Debug, Clone)]
pub struct JobRegistry {
    root: PathBuf,
}

impl JobRegistry {
    /// `root` must already be absolute; relative job paths are joined onto it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve every entry, keeping declaration order
    pub fn resolve(&self, entries: &[JobEntry]) -> JobSet {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut resolved = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            let position = idx + 1;
            let slot = match self.resolve_entry(position, entry) {
                Ok(job) => match seen.get(job.name()) {
                    Some(&first) => ResolvedEntry::Rejected(RejectedEntry {
                        label: job.name().to_string(),
                        error: ConfigError::DuplicateName {
                            name: job.name().to_string(),
                            first,
                            second: position,
                        },
                    }),
                    None => {
                        seen.insert(job.name().to_string(), position);
                        ResolvedEntry::Job(job)
                    }
                },
                Err(error) => ResolvedEntry::Rejected(RejectedEntry {
                    label: present(&entry.name)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("entry #{}", position)),
                    error,
                }),
            };
            resolved.push(slot);
        }

        JobSet { entries: resolved }
    }

    /// Resolve every entry, failing on the first broken one
    pub fn resolve_jobs(&self, entries: &[JobEntry]) -> Result<Vec<JobDefinition>, ConfigError> {
        self.resolve(entries).into_strict()
    }

    /// Absolute paths pass through; relative ones are joined onto the root
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn resolve_entry(&self, position: usize, entry: &JobEntry) -> Result<JobDefinition, ConfigError> {
        let describe = || match present(&entry.name) {
            Some(name) => format!("job entry #{} ('{}')", position, name),
            None => format!("job entry #{}", position),
        };
        let require = |value: &Option<String>, field: &'static str| {
            present(value)
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingField {
                    entry: describe(),
                    field,
                })
        };

        let name = require(&entry.name, "name")?;
        let input = require(&entry.input, "input")?;
        let output = require(&entry.output, "output")?;

        Ok(JobDefinition::new(
            name,
            self.resolve_path(&input),
            self.resolve_path(&output),
        )
        .with_style(entry.style))
    }
}

/// A value that is set and not blank
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
