//! Staged file manifest

use crate::FileDirective;
use serde::{Deserialize, Serialize};

/// A file staged into the build root
///
/// `path` is relative to the build root, uses `/` separators and is the path
/// the file will have once the package is installed (minus the leading `/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<FileDirective>,
}

impl ManifestEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, directive: Option<FileDirective>) -> Self {
        Self {
            path: path.into(),
            directive,
        }
    }

    /// Absolute install path as listed in `%files`
    #[must_use]
    pub fn install_path(&self) -> String {
        format!("/{}", self.path.trim_start_matches('/'))
    }
}
