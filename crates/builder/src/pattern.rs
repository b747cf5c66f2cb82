//! Glob expansion against a base directory
//!
//! Patterns use `/` as separator and support `*`, `?`, `[...]`, `{a,b}` and
//! `**`. A leading `!` removes earlier matches. The wildcard-free leading
//! components of each pattern fix the directory the walk starts from, so
//! `docs/*.md` never looks outside `docs/`.

use crate::utils::paths::{absolutize, normalize};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use rpmpack_errors::{ConfigError, Error};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expands glob patterns into existing paths under a base directory
#[derive(Debug, Clone)]
pub struct PatternResolver {
    base: PathBuf,
}

impl PatternResolver {
    /// Create a resolver anchored at `base` (relative to the process cwd)
    ///
    /// # Errors
    ///
    /// Returns an error if the process working directory cannot be read.
    pub fn new(base: &Path) -> Result<Self, Error> {
        let base = absolutize(base).map_err(|e| Error::io_with_path(&e, base))?;
        Ok(Self { base })
    }

    /// Absolute, normalized base directory
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve patterns in order.
    ///
    /// Matches of one pattern come in walk order (siblings sorted by name,
    /// parents before children). A path already matched by an earlier
    /// pattern is not repeated. Directories match like files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for malformed patterns and an
    /// I/O error if a matched directory cannot be read.
    pub fn resolve<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<PathBuf>, Error> {
        let mut matches: Vec<PathBuf> = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for raw in patterns {
            let raw = raw.as_ref();
            if let Some(negated) = raw.strip_prefix('!') {
                let pattern = CompiledPattern::compile(&self.base, negated)?;
                matches.retain(|path| !pattern.matches(path));
                seen.retain(|path| !pattern.matches(path));
                continue;
            }

            let pattern = CompiledPattern::compile(&self.base, raw)?;
            for path in pattern.walk()? {
                if seen.insert(path.clone()) {
                    matches.push(path);
                }
            }
        }

        Ok(matches)
    }
}

fn has_glob_meta(segment: &str) -> bool {
    segment.contains(['*', '?', '[', ']', '{', '}'])
}

/// A pattern split into a literal directory and a glob below it
#[derive(Debug)]
struct CompiledPattern {
    root: PathBuf,
    matcher: Option<GlobMatcher>,
    max_depth: Option<usize>,
}

impl CompiledPattern {
    fn compile(base: &Path, pattern: &str) -> Result<Self, Error> {
        let invalid = |message: String| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message,
        };

        let normalized = pattern.replace('\\', "/");
        if normalized.trim().is_empty() {
            return Err(invalid("empty pattern".to_string()).into());
        }

        let (mut root, rest) = match normalized.strip_prefix('/') {
            Some(rest) => (PathBuf::from("/"), rest),
            None => (base.to_path_buf(), normalized.as_str()),
        };

        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let literal_len = segments.iter().take_while(|s| !has_glob_meta(s)).count();
        for segment in &segments[..literal_len] {
            root.push(segment);
        }
        let root = normalize(&root);

        let remaining = &segments[literal_len..];
        if remaining.is_empty() {
            return Ok(Self {
                root,
                matcher: None,
                max_depth: Some(0),
            });
        }

        let glob = GlobBuilder::new(&remaining.join("/"))
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        let max_depth = if remaining.iter().any(|s| s.contains("**")) {
            None
        } else {
            Some(remaining.len())
        };

        Ok(Self {
            root,
            matcher: Some(glob.compile_matcher()),
            max_depth,
        })
    }

    fn matches(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        match &self.matcher {
            None => relative.as_os_str().is_empty(),
            Some(matcher) => !relative.as_os_str().is_empty() && matcher.is_match(relative),
        }
    }

    fn walk(&self) -> Result<Vec<PathBuf>, Error> {
        let Some(matcher) = &self.matcher else {
            // Literal path: present or not, no walking needed
            return Ok(if std::fs::symlink_metadata(&self.root).is_ok() {
                vec![self.root.clone()]
            } else {
                Vec::new()
            });
        };

        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .max_depth(self.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&self.root, e))?;
            if entry.depth() == 0 {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if matcher.is_match(relative) {
                found.push(entry.into_path());
            }
        }

        Ok(found)
    }
}

fn walk_error(root: &Path, err: ignore::Error) -> Error {
    match err.into_io_error() {
        Some(io) => Error::io_with_path(&io, root),
        None => Error::internal(format!("failed to walk {}", root.display())),
    }
}
