//! Event draining while a command runs

use crate::logging::log_event_with_tracing;
use rpmpack_events::{EventMessage, EventReceiver};
use std::future::Future;
use tokio::select;

/// Consumes events from the library crates
pub trait EventHandler {
    fn handle_event(&mut self, message: EventMessage);
}

/// Forwards every event to tracing
#[derive(Debug, Default)]
pub struct TracingEventHandler;

impl EventHandler for TracingEventHandler {
    fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);
    }
}

/// Run `command` to completion, handling events as they arrive
///
/// Events still queued when the command finishes are handled before
/// returning.
pub async fn execute_with_events<F, T>(
    command: F,
    mut event_receiver: EventReceiver,
    handler: &mut impl EventHandler,
) -> T
where
    F: Future<Output = T>,
{
    let mut command = Box::pin(command);
    let mut channel_open = true;

    loop {
        select! {
            result = &mut command => {
                while let Ok(message) = event_receiver.try_recv() {
                    handler.handle_event(message);
                }
                return result;
            }

            message = event_receiver.recv(), if channel_open => {
                match message {
                    Some(message) => handler.handle_event(message),
                    None => channel_open = false,
                }
            }
        }
    }
}
