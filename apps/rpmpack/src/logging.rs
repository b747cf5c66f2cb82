//! Structured logging integration for events
//!
//! Library crates report through the event channel; this module turns each
//! [`EventMessage`] into a tracing record with structured fields.

use rpmpack_events::{AppEvent, BuildEvent, EventMessage, GeneralEvent};
use tracing::{debug, error, info, trace, warn};

/// Log an event at its own level with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;
    let level = meta.tracing_level();

    match event {
        AppEvent::Build(build_event) => match build_event {
            BuildEvent::SessionStarted {
                package,
                version,
                temp_dir,
                ..
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    version = %version,
                    temp_dir = %temp_dir.display(),
                    "Build started"
                );
            }
            BuildEvent::PhaseStarted { phase, .. } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    phase = ?phase,
                    "Phase started"
                );
            }
            BuildEvent::BuildRootPrepared {
                path,
                replaced_existing,
                ..
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    replaced_existing = replaced_existing,
                    "Build root prepared"
                );
            }
            BuildEvent::FileStaged {
                source,
                destination,
                directive,
                ..
            } => {
                debug!(
                    correlation = ?meta.correlation_id,
                    from = %source.display(),
                    to = %destination,
                    directive = ?directive,
                    "Staged"
                );
            }
            BuildEvent::FileExcluded { source, .. } => {
                debug!(
                    correlation = ?meta.correlation_id,
                    path = %source.display(),
                    "Excluded"
                );
            }
            BuildEvent::StagingCompleted {
                files_staged,
                files_excluded,
                ..
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    files_staged = files_staged,
                    files_excluded = files_excluded,
                    "Staging completed"
                );
            }
            BuildEvent::DescriptorWritten { path, .. } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    "Spec file written"
                );
            }
            BuildEvent::ToolOutput { line, .. } => {
                trace!(correlation = ?meta.correlation_id, "{line}");
            }
            BuildEvent::ArtifactProduced { path, .. } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    "Package produced"
                );
            }
            BuildEvent::ArtifactCopied { from, to, .. } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    from = %from.display(),
                    to = %to.display(),
                    "Package copied"
                );
            }
            BuildEvent::BuildRootRemoved { path, .. } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    "Build root removed"
                );
            }
            BuildEvent::Completed {
                package,
                version,
                path,
                duration,
                ..
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    version = %version,
                    path = %path.display(),
                    duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    "Build completed"
                );
            }
            BuildEvent::Failed {
                package,
                phase,
                failure,
                ..
            } => {
                error!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    phase = ?phase,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Build failed"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message, context } => {
                warn!(
                    source = meta.source.as_str(),
                    message = %message,
                    context = ?context,
                    "Warning"
                );
            }
            GeneralEvent::Error { message, details } => {
                error!(
                    source = meta.source.as_str(),
                    message = %message,
                    details = ?details,
                    "Error"
                );
            }
            GeneralEvent::DebugLog { message, context } => {
                debug!(
                    source = meta.source.as_str(),
                    message = %message,
                    context = ?context,
                    "Debug log"
                );
            }
            _ => log_at_level(level, message, "General event"),
        },

        AppEvent::Platform(_) => log_at_level(level, message, "Process event"),
    }
}

fn log_at_level(level: tracing::Level, message: &EventMessage, label: &str) {
    let meta = &message.meta;
    let event = &message.event;
    match level {
        tracing::Level::ERROR => {
            error!(source = meta.source.as_str(), correlation = ?meta.correlation_id, event = ?event, "{label}");
        }
        tracing::Level::WARN => {
            warn!(source = meta.source.as_str(), correlation = ?meta.correlation_id, event = ?event, "{label}");
        }
        tracing::Level::INFO => {
            info!(source = meta.source.as_str(), correlation = ?meta.correlation_id, event = ?event, "{label}");
        }
        tracing::Level::DEBUG => {
            debug!(source = meta.source.as_str(), correlation = ?meta.correlation_id, event = ?event, "{label}");
        }
        tracing::Level::TRACE => {
            trace!(source = meta.source.as_str(), correlation = ?meta.correlation_id, event = ?event, "{label}");
        }
    }
}
