//! Output Style Value Object
//!
//! The formatting mode handed to the external compiler. A change of style
//! invalidates previously generated output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output formatting mode for generated stylesheets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Nested braces mirroring the source structure (default)
    #[default]
    Nested,
    /// One rule per line
    Compact,
    /// Minified, no whitespace
    Compressed,
    /// Fully expanded, one declaration per line
    Expanded,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Nested,
        Style::Compact,
        Style::Compressed,
        Style::Expanded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Nested => "nested",
            Style::Compact => "compact",
            Style::Compressed => "compressed",
            Style::Expanded => "expanded",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown style name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid style '{0}' (expected one of: nested, compact, compressed, expanded)")]
pub struct InvalidStyle(pub String);

impl FromStr for Style {
    type Err = InvalidStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| InvalidStyle(s.to_string()))
    }
}
