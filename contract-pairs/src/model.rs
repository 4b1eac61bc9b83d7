use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source language of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Solidity,
    Ink,
}

impl Language {
    /// File extension scanned for this language.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Solidity => "sol",
            Language::Ink => "rs",
        }
    }
}

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRef {
    pub path: PathBuf,
    /// Path relative to the scanned root, `/`-separated.
    pub relative_path: String,
    pub language: Language,
    /// Normalized name used for matching (see [`crate::normalize`]).
    pub logical_name: String,
    /// Human-facing name (file stem, or module directory for `lib.rs`).
    pub display_name: String,
}

/// Feature area a pair demonstrates. Drives the migration notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Token,
    Storage,
    Security,
    Events,
    Lifecycle,
    Advanced,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Token => "token",
            Category::Storage => "storage",
            Category::Security => "security",
            Category::Events => "events",
            Category::Lifecycle => "lifecycle",
            Category::Advanced => "advanced",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown labels map to [`Category::Other`]; parsing never fails.
impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "token" => Category::Token,
            "storage" => Category::Storage,
            "security" => Category::Security,
            "events" => Category::Events,
            "lifecycle" => Category::Lifecycle,
            "advanced" => Category::Advanced,
            _ => Category::Other,
        })
    }
}

/// A Solidity file bound to its ink! counterpart. Both sides always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractPair {
    /// Stable id: the Solidity logical name.
    pub pair_id: String,
    pub name_a: String,
    pub name_b: String,
    pub path_a: String,
    pub path_b: String,
    #[serde(skip_serializing)]
    pub content_a: String,
    #[serde(skip_serializing)]
    pub content_b: String,
    pub category: Category,
    pub description: String,
}

/// A file left out of matching because it could not be walked or read as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of [`crate::matcher::find_pairs`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    pub pairs: Vec<ContractPair>,
    /// Relative paths of Solidity files with no counterpart.
    pub unmatched_a: Vec<String>,
    /// Relative paths of ink! files no pair uses.
    pub unmatched_b: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}
