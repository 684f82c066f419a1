//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::Style;
use crate::error::{StylesmithError, StylesmithResult};

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Keys a config file may contain, for typo suggestions
const KNOWN_KEYS: &[&str] = &[
    "compiler",
    "bin",
    "args",
    "stdout_to_output",
    "timeout_secs",
    "build",
    "root",
    "style",
    "jobs",
    "state_dir",
    "public_url",
    "job",
    "name",
    "input",
    "output",
];

/// Parse the file, collect unknown keys, and anchor relative paths at the file's directory.
pub fn load_with_warnings(path: &Path) -> StylesmithResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| StylesmithError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StylesmithError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    config.base_dir = fs::canonicalize(parent).map_err(|source| StylesmithError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .rsplit('.')
                .next()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply `STYLESMITH_*` overrides looked up through `var`
pub fn with_env_overrides<F>(mut config: Config, var: F) -> StylesmithResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(style) = var("STYLESMITH_STYLE") {
        config.build.style = style.parse::<Style>()?;
    }

    if let Some(bin) = var("STYLESMITH_COMPILER").filter(|b| !b.trim().is_empty()) {
        config.compiler.bin = bin;
    }

    if let Some(jobs) = var("STYLESMITH_JOBS") {
        config.build.jobs = jobs
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| StylesmithError::InvalidSetting {
                key: "STYLESMITH_JOBS".to_string(),
                message: format!("expected a positive integer, got '{}'", jobs),
            })?;
    }

    Ok(config)
}

/// First line assigning `key`, i.e. `key = ...` with optional spacing
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|idx| idx + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|candidate| (*candidate, edit_distance(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

/// Levenshtein distance over bytes, single-row
fn edit_distance(a: &str, b: &str) -> usize {
    let b = b.as_bytes();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ac) in a.as_bytes().iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(ac != bc);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }

    row[b.len()]
}
