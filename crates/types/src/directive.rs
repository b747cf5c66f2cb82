//! Per-file `%files` directives

use rpmpack_errors::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directive families recognized in the `%files` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Doc,
    Config,
    Attr,
    Verify,
    DocDir,
    Dir,
}

impl DirectiveKind {
    // `docdir` must be tried before `doc`.
    const PREFIXES: [(&'static str, Self); 6] = [
        ("docdir", Self::DocDir),
        ("doc", Self::Doc),
        ("config", Self::Config),
        ("attr", Self::Attr),
        ("verify", Self::Verify),
        ("dir", Self::Dir),
    ];

    /// Keyword as written after `%` in a spec file
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Config => "config",
            Self::Attr => "attr",
            Self::Verify => "verify",
            Self::DocDir => "docdir",
            Self::Dir => "dir",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A validated directive, keeping any arguments the user wrote
///
/// `config(noreplace)` is stored as kind [`DirectiveKind::Config`] with the
/// raw text `config(noreplace)`. A leading `%` is accepted and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileDirective {
    kind: DirectiveKind,
    raw: String,
}

impl FileDirective {
    /// Validate a directive string by prefix.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDirective`] naming the original value when
    /// it does not start with a recognized keyword.
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        let trimmed = value.trim();
        let body = trimmed.strip_prefix('%').unwrap_or(trimmed);

        DirectiveKind::PREFIXES
            .iter()
            .find(|(prefix, _)| body.starts_with(prefix))
            .map(|&(_, kind)| Self {
                kind,
                raw: body.to_string(),
            })
            .ok_or_else(|| BuildError::InvalidDirective {
                directive: value.to_string(),
            })
    }

    /// Validate an optional directive; absent or blank means an ordinary file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDirective`] for unrecognized values.
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, BuildError> {
        match value {
            Some(v) if !v.trim().is_empty() => Self::parse(v).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    /// Directive text without the leading `%`
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FileDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.raw)
    }
}

impl TryFrom<String> for FileDirective {
    type Error = BuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FileDirective> for String {
    fn from(value: FileDirective) -> Self {
        value.raw
    }
}
