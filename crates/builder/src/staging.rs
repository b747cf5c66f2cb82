//! Copy selected files into the build root
//!
//! Staging is a pure function of the selections, the exclusion set and the
//! filesystem. It returns the manifest in encounter order: selections in the
//! order given, files within a selection in resolver order.

use crate::build_root::BuildRoot;
use crate::exclusion::ExclusionSet;
use crate::pattern::PatternResolver;
use crate::utils::events::{send_event, send_verbose_event};
use crate::utils::fileops::copy_path;
use crate::utils::paths::{absolutize, clamp_relative, to_slash};
use crate::BuildContext;
use rpmpack_errors::{ConfigError, Error};
use rpmpack_events::BuildEvent;
use rpmpack_types::{FileDirective, FileSelection, ManifestEntry};
use std::path::Path;
use tokio::fs;

/// Stages file selections under a build root's `BUILDROOT`
pub struct FileStager<'a> {
    build_root: &'a BuildRoot,
    exclusions: &'a ExclusionSet,
    context: Option<&'a BuildContext>,
}

impl<'a> FileStager<'a> {
    #[must_use]
    pub fn new(build_root: &'a BuildRoot, exclusions: &'a ExclusionSet) -> Self {
        Self {
            build_root,
            exclusions,
            context: None,
        }
    }

    /// Report staged and excluded files through `context`
    #[must_use]
    pub fn with_context(mut self, context: &'a BuildContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Stage every selection and return the manifest
    ///
    /// Files copied before a failure stay where they are. Matches inside the
    /// build root are skipped like excluded files, and a matched directory
    /// that contains the build root is copied without it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingSelectionField`] if any selection lacks `src`
    ///   or `dest`; nothing is copied in that case
    /// - [`ConfigError::InvalidPattern`] for a malformed glob
    /// - [`rpmpack_errors::BuildError::InvalidDirective`] for an unrecognized
    ///   directive on a selection that matched at least one file
    /// - an I/O error if a directory cannot be created or a copy fails
    pub async fn stage(&self, selections: &[FileSelection]) -> Result<Vec<ManifestEntry>, Error> {
        let validated = validate_selections(selections)?;
        let staging_dir = self.build_root.staging_dir();
        let top_dir = self.build_root.top_dir();

        let mut manifest = Vec::new();
        let mut excluded = 0usize;

        for (selection, patterns, dest) in validated {
            let cwd_raw = selection.cwd_or_default();
            let cwd = absolutize(&cwd_raw).map_err(|e| Error::io_with_path(&e, &cwd_raw))?;
            let sources = PatternResolver::new(&cwd)?.resolve(patterns)?;

            let dest = clamp_relative(Path::new(dest));
            let dest_dir = staging_dir.join(&dest);
            fs::create_dir_all(&dest_dir)
                .await
                .map_err(|e| Error::io_with_path(&e, &dest_dir))?;

            for source in sources {
                // The build root itself is never staged into itself.
                if self.exclusions.contains(&source) || source.starts_with(top_dir) {
                    excluded += 1;
                    self.report(|session_id| BuildEvent::FileExcluded {
                        session_id,
                        source: source.clone(),
                    });
                    continue;
                }

                let directive = FileDirective::parse_optional(selection.directive.as_deref())?;
                let relative = relative_to(&source, &cwd);
                let path = join_slash(&dest, &relative);

                let skip = top_dir.starts_with(&source).then_some(top_dir);
                copy_path(&source, &staging_dir.join(&path), skip).await?;

                self.report(|session_id| BuildEvent::FileStaged {
                    session_id,
                    source: source.clone(),
                    destination: path.clone(),
                    directive: directive.as_ref().map(|d| d.as_str().to_string()),
                });
                manifest.push(ManifestEntry::new(path, directive));
            }
        }

        if let Some(context) = self.context {
            send_event(
                context,
                BuildEvent::StagingCompleted {
                    session_id: context.session_id.clone(),
                    files_staged: manifest.len(),
                    files_excluded: excluded,
                },
            );
        }

        Ok(manifest)
    }

    fn report(&self, event: impl FnOnce(String) -> BuildEvent) {
        if let Some(context) = self.context {
            send_verbose_event(context, || event(context.session_id.clone()));
        }
    }
}

/// Check required fields of every selection before anything is copied
fn validate_selections(
    selections: &[FileSelection],
) -> Result<Vec<(&FileSelection, &[String], &str)>, Error> {
    selections
        .iter()
        .enumerate()
        .map(|(index, selection)| {
            let missing = |field: &str| ConfigError::MissingSelectionField {
                index,
                field: field.to_string(),
            };
            let patterns = selection
                .src
                .as_ref()
                .filter(|src| !src.is_empty())
                .ok_or_else(|| missing("src"))?;
            let dest = selection.dest.as_deref().ok_or_else(|| missing("dest"))?;
            Ok::<_, Error>((selection, patterns.as_slice(), dest))
        })
        .collect()
}

/// Path of `source` below `cwd` in `/` form
///
/// A source outside `cwd` (from an absolute pattern) keeps its full path
/// minus the root.
fn relative_to(source: &Path, cwd: &Path) -> String {
    match source.strip_prefix(cwd) {
        Ok(relative) => to_slash(relative),
        Err(_) => to_slash(source),
    }
}

fn join_slash(dest: &str, relative: &str) -> String {
    match (dest.is_empty(), relative.is_empty()) {
        (true, _) => relative.to_string(),
        (false, true) => dest.to_string(),
        (false, false) => format!("{dest}/{relative}"),
    }
}
