//! Output rendering

use rpmpack_builder::{BuildResult, StagedBuild};
use rpmpack_types::OutputFormat;
use serde_json::json;
use std::io::{self, Write};

/// Result of a CLI command
pub enum CommandResult {
    Built(BuildResult),
    Staged(StagedBuild),
}

impl CommandResult {
    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Built(result) => json!({
                "package": result.package_path,
                "spec": result.descriptor_path,
                "build_root": result.build_root,
                "files": result.manifest,
            }),
            Self::Staged(staged) => json!({
                "build_root": staged.build_root.top_dir(),
                "spec": staged.descriptor_path,
                "files": staged.manifest,
            }),
        }
    }
}

/// Output renderer for CLI results
#[derive(Clone, Copy)]
pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render to stdout
    pub fn render_result(&self, result: &CommandResult) -> io::Result<()> {
        let stdout = io::stdout();
        self.render_to(&mut stdout.lock(), result)
    }

    pub fn render_to(&self, out: &mut impl Write, result: &CommandResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let text =
                    serde_json::to_string_pretty(&result.to_json()).map_err(io::Error::other)?;
                writeln!(out, "{text}")
            }
            OutputFormat::Plain => match result {
                CommandResult::Built(result) => {
                    if let Some(root) = &result.build_root {
                        writeln!(out, "Build root kept at {}", root.display())?;
                    }
                    writeln!(out, "{}", result.package_path.display())
                }
                CommandResult::Staged(staged) => {
                    for entry in &staged.manifest {
                        match &entry.directive {
                            Some(directive) => writeln!(out, "{directive} {}", entry.install_path())?,
                            None => writeln!(out, "{}", entry.install_path())?,
                        }
                    }
                    writeln!(out, "Spec written to {}", staged.descriptor_path.display())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpmpack_types::ManifestEntry;
    use std::path::PathBuf;

    fn built() -> CommandResult {
        CommandResult::Built(BuildResult {
            package_path: PathBuf::from("/out/hello-1.0-1.noarch.rpm"),
            manifest: vec![ManifestEntry::new("usr/bin/hello", None)],
            descriptor_path: PathBuf::from("/tmp/tree/SPECS/hello.spec"),
            build_root: None,
        })
    }

    #[test]
    fn test_plain_prints_package_path() {
        let mut out = Vec::new();
        OutputRenderer::new(OutputFormat::Plain)
            .render_to(&mut out, &built())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "/out/hello-1.0-1.noarch.rpm\n");
    }

    #[test]
    fn test_json_has_package_and_files() {
        let mut out = Vec::new();
        OutputRenderer::new(OutputFormat::Json)
            .render_to(&mut out, &built())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["package"], "/out/hello-1.0-1.noarch.rpm");
        assert_eq!(value["files"][0]["path"], "usr/bin/hello");
        assert!(value["build_root"].is_null());
    }
}
