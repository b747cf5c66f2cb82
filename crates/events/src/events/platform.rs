//! Platform-specific operation events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Process descriptor attached to process events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// Platform operation events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    /// Process execution started
    ProcessStarted { command: ProcessCommandDescriptor },

    /// Process exited (successfully or not)
    ProcessCompleted {
        command: ProcessCommandDescriptor,
        exit_code: Option<i32>,
        duration_ms: u64,
        stdout_bytes: u64,
        stderr_bytes: u64,
    },

    /// Process could not be run at all
    ProcessFailed {
        command: ProcessCommandDescriptor,
        failure: FailureContext,
        duration_ms: u64,
    },
}
