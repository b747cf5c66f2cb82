use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::FailureContext;

/// Pipeline phases of a single package build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhase {
    Prepare,
    Stage,
    Describe,
    Package,
    Cleanup,
}

/// Build-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// Build session started
    SessionStarted {
        session_id: String,
        package: String,
        version: String,
        temp_dir: PathBuf,
    },

    /// Build phase started
    PhaseStarted {
        session_id: String,
        phase: BuildPhase,
    },

    /// Build root tree created (any previous tree was removed first)
    BuildRootPrepared {
        session_id: String,
        path: PathBuf,
        replaced_existing: bool,
    },

    /// A source path was copied into the build root
    FileStaged {
        session_id: String,
        source: PathBuf,
        destination: String,
        directive: Option<String>,
    },

    /// A source path matched an exclusion pattern and was skipped
    FileExcluded {
        session_id: String,
        source: PathBuf,
    },

    /// All file selections have been processed
    StagingCompleted {
        session_id: String,
        files_staged: usize,
        files_excluded: usize,
    },

    /// Descriptor written for the packaging tool
    DescriptorWritten {
        session_id: String,
        path: PathBuf,
    },

    /// One line of packaging tool output
    ToolOutput {
        session_id: String,
        line: String,
    },

    /// Artifact reported by the packaging tool
    ArtifactProduced {
        session_id: String,
        path: PathBuf,
    },

    /// Artifact copied to the configured destination
    ArtifactCopied {
        session_id: String,
        from: PathBuf,
        to: PathBuf,
    },

    /// Build root removed after a successful build
    BuildRootRemoved {
        session_id: String,
        path: PathBuf,
    },

    /// Build completed successfully
    Completed {
        session_id: String,
        package: String,
        version: String,
        path: PathBuf,
        duration: Duration,
    },

    /// Build failed
    Failed {
        session_id: String,
        package: String,
        phase: Option<BuildPhase>,
        failure: FailureContext,
    },
}
