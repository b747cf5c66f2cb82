//! Core platform abstractions and context management

use rpmpack_events::{EventEmitter, EventSender};

use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Context for platform operations, providing event emission
#[derive(Clone, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
}

impl PlatformContext {
    /// Create a new platform context with event emission capabilities
    #[must_use]
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self { event_sender }
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

/// Main platform abstraction providing access to platform operations
pub struct Platform {
    process_ops: Box<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementation
    #[must_use]
    pub fn new(process_ops: Box<dyn ProcessOperations>) -> Self {
        Self { process_ops }
    }

    /// Platform backed by the host's process APIs
    #[must_use]
    pub fn current() -> Self {
        crate::implementations::native::NativePlatform::new()
    }

    /// Access process operations
    pub fn process(&self) -> &dyn ProcessOperations {
        &*self.process_ops
    }

    /// Create a platform context with event emission
    #[must_use]
    pub fn create_context(&self, event_sender: Option<EventSender>) -> PlatformContext {
        PlatformContext::new(event_sender)
    }

    /// Convenience method: Execute a command and get output
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    pub async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, rpmpack_errors::Error> {
        self.process().execute_command(ctx, cmd).await
    }

    /// Convenience method: Create a new command builder
    #[must_use]
    pub fn command(&self, program: &str) -> PlatformCommand {
        self.process().create_command(program)
    }
}
