//! Event emission utilities for build operations

use crate::BuildContext;
use rpmpack_events::{AppEvent, BuildEvent, EventEmitter};

/// Send a build event if the context has an event sender
pub fn send_event(context: &BuildContext, event: BuildEvent) {
    context.emit(AppEvent::Build(event));
}

/// Send a build event only for verbose builds
pub fn send_verbose_event(context: &BuildContext, event: impl FnOnce() -> BuildEvent) {
    if context.verbose {
        send_event(context, event());
    }
}
