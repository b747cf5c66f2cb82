//! Paths excluded from staging

use crate::pattern::PatternResolver;
use crate::utils::paths::{absolutize, normalize, path_key};
use rpmpack_errors::Error;
use std::collections::HashSet;
use std::path::Path;

/// Normalized paths to skip, resolved once per build
///
/// Membership is an exact string match on the normalized absolute path. A
/// directory in the set does not exclude the files beneath it.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    paths: HashSet<String>,
}

impl ExclusionSet {
    /// Expand `patterns` against `base` and record every match
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed or a directory cannot be
    /// walked.
    pub fn build<S: AsRef<str>>(base: &Path, patterns: &[S]) -> Result<Self, Error> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let resolver = PatternResolver::new(base)?;
        let paths = resolver
            .resolve(patterns)?
            .iter()
            .map(|p| path_key(p))
            .collect();
        Ok(Self { paths })
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        let key = match absolutize(path) {
            Ok(abs) => path_key(&abs),
            Err(_) => path_key(&normalize(path)),
        };
        self.paths.contains(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
