use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventMeta, EventSource};
use rpmpack_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod build;
pub mod general;
pub mod platform;

pub use build::*;
pub use general::*;
pub use platform::*;

/// Top-level application event enum that aggregates all domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Build pipeline events (staging, descriptor, packaging)
    Build(BuildEvent),

    /// Process execution events
    Platform(PlatformEvent),
}

impl AppEvent {
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Build(_) => EventSource::BUILD,
            Self::Platform(_) => EventSource::PLATFORM,
        }
    }

    /// Determine the appropriate severity for this event
    #[must_use]
    pub fn log_level(&self) -> EventLevel {
        match self {
            Self::General(GeneralEvent::Error { .. } | GeneralEvent::OperationFailed { .. })
            | Self::Build(BuildEvent::Failed { .. })
            | Self::Platform(PlatformEvent::ProcessFailed { .. }) => EventLevel::Error,

            Self::General(GeneralEvent::Warning { .. }) => EventLevel::Warn,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Build(
                BuildEvent::FileStaged { .. }
                | BuildEvent::FileExcluded { .. }
                | BuildEvent::PhaseStarted { .. },
            )
            | Self::Platform(
                PlatformEvent::ProcessStarted { .. } | PlatformEvent::ProcessCompleted { .. },
            ) => EventLevel::Debug,

            Self::Build(BuildEvent::ToolOutput { .. }) => EventLevel::Trace,

            _ => EventLevel::Info,
        }
    }

    /// Session id carried by build events
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        let Self::Build(event) = self else {
            return None;
        };
        let id = match event {
            BuildEvent::SessionStarted { session_id, .. }
            | BuildEvent::PhaseStarted { session_id, .. }
            | BuildEvent::BuildRootPrepared { session_id, .. }
            | BuildEvent::FileStaged { session_id, .. }
            | BuildEvent::FileExcluded { session_id, .. }
            | BuildEvent::StagingCompleted { session_id, .. }
            | BuildEvent::DescriptorWritten { session_id, .. }
            | BuildEvent::ToolOutput { session_id, .. }
            | BuildEvent::ArtifactProduced { session_id, .. }
            | BuildEvent::ArtifactCopied { session_id, .. }
            | BuildEvent::BuildRootRemoved { session_id, .. }
            | BuildEvent::Completed { session_id, .. }
            | BuildEvent::Failed { session_id, .. } => session_id,
        };
        Some(id)
    }
}

/// An event together with its metadata, as sent over the channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    #[must_use]
    pub fn new(meta: EventMeta, event: AppEvent) -> Self {
        Self { meta, event }
    }

    /// Wrap an event, deriving level, source and correlation from it
    #[must_use]
    pub fn from_event(event: AppEvent) -> Self {
        let mut meta = EventMeta::new(event.log_level(), event.event_source());
        if let Some(session_id) = event.session_id() {
            meta = meta.with_correlation_id(session_id);
        }
        Self { meta, event }
    }
}
