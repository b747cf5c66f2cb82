//! Build context for package building

use rpmpack_events::{EventEmitter, EventSender};

/// Per-build context handed to every stage of the pipeline
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Identifier attached to every build event of this run
    pub session_id: String,
    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
    /// Emit per-file and tool-output events
    pub verbose: bool,
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildContext {
    /// Create a context with a fresh session id and no event sink
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            event_sender: None,
            verbose: false,
        }
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
