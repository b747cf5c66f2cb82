//! Integration tests for events

#[cfg(test)]
mod tests {
    use rpmpack_events::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_event_sender_emit() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first.event,
            AppEvent::General(GeneralEvent::Error { .. })
        ));
        assert_eq!(first.meta.level, EventLevel::Error);

        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second.event,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
        assert_eq!(second.meta.level, EventLevel::Debug);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_build_event_correlation() {
        let msg = EventMessage::from_event(AppEvent::Build(BuildEvent::ArtifactProduced {
            session_id: "abc".into(),
            path: PathBuf::from("/tmp/x.rpm"),
        }));
        assert_eq!(msg.meta.correlation_id.as_deref(), Some("abc"));
        assert_eq!(msg.meta.source, EventSource::BUILD);
        assert_eq!(msg.meta.level, EventLevel::Info);
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = AppEvent::Build(BuildEvent::FileExcluded {
            session_id: "s".into(),
            source: PathBuf::from("/src/b.txt"),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "build");
        assert_eq!(json["event"]["type"], "FileExcluded");
    }
}
