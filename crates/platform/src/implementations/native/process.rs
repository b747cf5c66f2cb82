//! Process operations on the host
//!
//! Wraps `tokio::process::Command`, adding event emission around each run.

use async_trait::async_trait;
use rpmpack_errors::{Error, PlatformError};
use rpmpack_events::{
    AppEvent, EventEmitter, FailureContext, PlatformEvent, ProcessCommandDescriptor,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Host implementation of process operations
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn command_not_found(program: &str) -> Error {
    PlatformError::CommandNotFound {
        command: program.to_string(),
    }
    .into()
}

fn byte_len(bytes: &[u8]) -> u64 {
    u64::try_from(bytes.len()).unwrap_or(u64::MAX)
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        let descriptor = ProcessCommandDescriptor {
            program: cmd.program().to_string(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_current_dir().cloned(),
        };

        ctx.emit(AppEvent::Platform(PlatformEvent::ProcessStarted {
            command: descriptor.clone(),
        }));

        let mut command = Command::new(cmd.program());
        command
            .args(cmd.get_args())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        let result = command
            .output()
            .await
            .map(|output| CommandOutput {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            })
            .map_err(|e| PlatformError::ProcessExecutionFailed {
                command: cmd.program().to_string(),
                message: e.to_string(),
            });

        let duration_ms = duration_to_millis(start.elapsed());

        match &result {
            Ok(output) => ctx.emit(AppEvent::Platform(PlatformEvent::ProcessCompleted {
                command: descriptor,
                exit_code: output.status.code(),
                duration_ms,
                stdout_bytes: byte_len(&output.stdout),
                stderr_bytes: byte_len(&output.stderr),
            })),
            Err(e) => ctx.emit(AppEvent::Platform(PlatformEvent::ProcessFailed {
                command: descriptor,
                failure: FailureContext::from_error(e),
                duration_ms,
            })),
        }

        result.map_err(Error::from)
    }

    fn create_command(&self, program: &str) -> PlatformCommand {
        PlatformCommand::new(program)
    }

    async fn which(&self, program: &str) -> Result<PathBuf, Error> {
        which::which(program).map_err(|_| command_not_found(program))
    }

    async fn which_in(&self, program: &str, paths: &OsStr, cwd: &Path) -> Result<PathBuf, Error> {
        which::which_in(program, Some(paths), cwd).map_err(|_| command_not_found(program))
    }
}
