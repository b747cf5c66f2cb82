//! Build pipeline error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BuildError {
    #[error("invalid file directive: {directive:?}")]
    InvalidDirective { directive: String },

    #[error("{program} exited with {}: {stderr}", describe_status(.status.as_ref()))]
    ExternalTool {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("artifact not found in {program} output")]
    ArtifactNotFound { program: String, stdout: String },

    #[error("descriptor generation failed: {message}")]
    DescriptorFailed { message: String },

    #[error("build failed: {message}")]
    Failed { message: String },
}

fn describe_status(status: Option<&i32>) -> String {
    status.map_or_else(|| "a signal".to_string(), |code| format!("status {code}"))
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidDirective { .. } => Some(
                "Use one of doc, config, attr, verify, docdir or dir (optionally with arguments).",
            ),
            Self::ExternalTool { .. } => {
                Some("Re-run with --verbose --keep-temp and inspect the generated spec file.")
            }
            Self::ArtifactNotFound { .. } => {
                Some("rpmbuild did not report a `Wrote: ...rpm` line; check its output.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidDirective { .. } => "build.invalid_directive",
            Self::ExternalTool { .. } => "build.external_tool",
            Self::ArtifactNotFound { .. } => "build.artifact_not_found",
            Self::DescriptorFailed { .. } => "build.descriptor_failed",
            Self::Failed { .. } => "build.failed",
        };
        Some(code)
    }
}
