//! User-supplied file selections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One or more glob patterns
///
/// Deserializes from either a single string or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Patterns(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Patterns {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(p) => Self(vec![p]),
            OneOrMany::Many(ps) => Self(ps),
        }
    }
}

impl Patterns {
    #[must_use]
    pub fn new(patterns: Vec<String>) -> Self {
        Self(patterns)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Patterns {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<Vec<String>> for Patterns {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

/// A group of files to place under one destination inside the build root
///
/// `src` and `dest` are required; they are optional here so a missing field
/// is reported with the selection's position instead of as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<Patterns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

impl FileSelection {
    /// Create a selection with the required fields set
    #[must_use]
    pub fn new(src: impl Into<Patterns>, dest: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            dest: Some(dest.into()),
            cwd: None,
            directive: None,
        }
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Working directory, defaulting to `.`
    #[must_use]
    pub fn cwd_or_default(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
