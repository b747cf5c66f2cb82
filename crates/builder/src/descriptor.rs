//! Package descriptor generation
//!
//! The orchestrator only needs a path to hand to the packaging tool; what
//! goes into the file is up to the [`DescriptorWriter`]. [`SpecFileWriter`]
//! produces a plain rpm `.spec` with a `%files` list taken from the manifest.

use crate::build_root::BuildRoot;
use async_trait::async_trait;
use rpmpack_config::BuildConfig;
use rpmpack_errors::{BuildError, Error};
use rpmpack_types::ManifestEntry;
use std::path::PathBuf;
use tokio::fs;

/// Turns a staged manifest into a descriptor file inside the build root
#[async_trait]
pub trait DescriptorWriter: Send + Sync {
    /// Write the descriptor and return its path
    async fn write(
        &self,
        manifest: &[ManifestEntry],
        config: &BuildConfig,
        build_root: &BuildRoot,
    ) -> Result<PathBuf, Error>;
}

/// Writes `SPECS/<name>.spec`
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecFileWriter;

impl SpecFileWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Spec file text for `manifest`
    #[must_use]
    pub fn render(manifest: &[ManifestEntry], config: &BuildConfig, build_root: &BuildRoot) -> String {
        // rpmbuild must not clean or post-process the staged BUILDROOT
        let mut lines = vec![
            format!("%define _topdir {}", build_root.top_dir().display()),
            "%define debug_package %{nil}".to_string(),
            "%define __spec_install_post %{nil}".to_string(),
            "%define __spec_install_pre %{___build_pre}".to_string(),
            String::new(),
            format!("Name: {}", config.name),
            format!("Version: {}", config.version),
            format!("Release: {}", config.release),
        ];
        if let Some(epoch) = config.epoch {
            lines.push(format!("Epoch: {epoch}"));
        }
        lines.push(format!("Summary: {}", config.summary));
        lines.push(format!("License: {}", config.license));
        if let Some(vendor) = &config.vendor {
            lines.push(format!("Vendor: {vendor}"));
        }
        lines.push(format!("Group: {}", config.group));
        if let Some(url) = &config.url {
            lines.push(format!("URL: {url}"));
        }
        lines.push(format!("BuildArch: {}", config.build_arch));
        lines.extend(config.requires.iter().map(|r| format!("Requires: {r}")));

        lines.push(String::new());
        lines.push("%description".to_string());
        lines.push(config.description.trim_end().to_string());
        lines.push(String::new());
        lines.push("%files".to_string());
        lines.extend(manifest.iter().map(|entry| match &entry.directive {
            Some(directive) => format!("{directive} \"{}\"", entry.install_path()),
            None => format!("\"{}\"", entry.install_path()),
        }));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[async_trait]
impl DescriptorWriter for SpecFileWriter {
    async fn write(
        &self,
        manifest: &[ManifestEntry],
        config: &BuildConfig,
        build_root: &BuildRoot,
    ) -> Result<PathBuf, Error> {
        if config.name.is_empty() || config.name.contains(['/', '\\']) {
            return Err(BuildError::DescriptorFailed {
                message: format!("package name {:?} cannot be used as a file name", config.name),
            }
            .into());
        }

        let path = build_root.specs_dir().join(format!("{}.spec", config.name));
        let contents = Self::render(manifest, config, build_root);
        fs::write(&path, contents)
            .await
            .map_err(|e| Error::io_with_path(&e, &path))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpmpack_types::FileDirective;
    use tempfile::tempdir;

    fn sample_config() -> BuildConfig {
        BuildConfig {
            name: "hello".to_string(),
            version: "1.2.3".to_string(),
            epoch: Some(2),
            requires: vec!["bash".to_string(), "coreutils >= 8".to_string()],
            ..BuildConfig::default()
        }
    }

    #[tokio::test]
    async fn test_render_preamble_and_files() {
        let temp = tempdir().unwrap();
        let root = BuildRoot::setup(&temp.path().join("tree")).await.unwrap();
        let manifest = vec![
            ManifestEntry::new("usr/bin/hello", None),
            ManifestEntry::new(
                "etc/hello.conf",
                Some(FileDirective::parse("config(noreplace)").unwrap()),
            ),
        ];

        let text = SpecFileWriter::render(&manifest, &sample_config(), &root);

        assert!(text.contains(&format!("%define _topdir {}", root.top_dir().display())));
        assert!(text.contains("Name: hello\n"));
        assert!(text.contains("Version: 1.2.3\n"));
        assert!(text.contains("Epoch: 2\n"));
        assert!(text.contains("Requires: coreutils >= 8\n"));
        assert!(text.contains("BuildArch: noarch\n"));
        assert!(!text.contains("Vendor:"));
        assert!(text.contains("%description\nNo description\n"));
        assert!(text.ends_with(
            "%files\n\"/usr/bin/hello\"\n%config(noreplace) \"/etc/hello.conf\"\n"
        ));
    }

    #[tokio::test]
    async fn test_render_separates_sections_with_blank_lines() {
        let temp = tempdir().unwrap();
        let root = BuildRoot::setup(&temp.path().join("tree")).await.unwrap();

        let text = SpecFileWriter::render(&[], &sample_config(), &root);

        assert!(text.contains("%define __spec_install_pre %{___build_pre}\n\nName: hello\n"));
        assert!(text.contains("Requires: coreutils >= 8\n\n%description\n"));
        assert!(text.ends_with("No description\n\n%files\n"));
    }

    #[tokio::test]
    async fn test_write_places_spec_in_specs_dir() {
        let temp = tempdir().unwrap();
        let root = BuildRoot::setup(&temp.path().join("tree")).await.unwrap();

        let path = SpecFileWriter::new()
            .write(&[], &sample_config(), &root)
            .await
            .unwrap();

        assert_eq!(path, root.specs_dir().join("hello.spec"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("%files\n"));
    }

    #[tokio::test]
    async fn test_write_rejects_path_like_name() {
        let temp = tempdir().unwrap();
        let root = BuildRoot::setup(&temp.path().join("tree")).await.unwrap();
        let config = BuildConfig {
            name: "../escape".to_string(),
            ..BuildConfig::default()
        };

        let err = SpecFileWriter::new().write(&[], &config, &root).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::DescriptorFailed { .. })
        ));
    }
}
