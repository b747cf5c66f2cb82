//! End-to-end builds against a fake rpmbuild
#![cfg(unix)]

use super::common::{Workspace, SCRIPT_LOCK};
use rpmpack_builder::{build, BuildContext, Builder};
use rpmpack_errors::{BuildError, Error, PlatformError};
use rpmpack_events::{AppEvent, BuildEvent, BuildPhase, EventMessage};
use rpmpack_types::FileSelection;
use std::path::PathBuf;

fn drain(rx: &mut rpmpack_events::EventReceiver) -> Vec<EventMessage> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        events.push(message);
    }
    events
}

#[tokio::test]
async fn test_build_copies_artifact_and_removes_tree() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let config = ws.config(&ws.fake_rpmbuild());

    let result = Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap();

    assert_eq!(result.package_path, ws.out().join("fake-1.0-1.noarch.rpm"));
    assert_eq!(std::fs::read_to_string(&result.package_path).unwrap(), "rpm");
    assert!(result.build_root.is_none());
    assert!(!ws.tree().exists());

    let paths: Vec<&str> = result.manifest.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["docs/a.txt", "docs/b.txt"]);
}

#[tokio::test]
async fn test_keep_temp_leaves_staged_tree() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let mut config = ws.config(&ws.fake_rpmbuild());
    config.keep_temp = true;
    config.rpm_dest = None;

    let result = Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap();

    let tree = ws.tree();
    assert_eq!(result.build_root.as_deref(), Some(tree.as_path()));
    assert_eq!(
        result.package_path,
        tree.join("RPMS/noarch/fake-1.0-1.noarch.rpm")
    );
    assert!(tree.join("BUILDROOT/docs/a.txt").is_file());
    assert!(tree.join("BUILDROOT/docs/b.txt").is_file());
    assert!(!tree.join("BUILDROOT/docs/c.md").exists());
    assert_eq!(result.descriptor_path, tree.join("SPECS/fake.spec"));

    let spec = std::fs::read_to_string(&result.descriptor_path).unwrap();
    assert!(spec.contains("\"/docs/a.txt\""));

    let args = std::fs::read_to_string(tree.join("args")).unwrap();
    let expected = format!(
        "-bb --buildroot {} {}",
        tree.join("BUILDROOT").display(),
        result.descriptor_path.display()
    );
    assert_eq!(args.trim(), expected);
}

#[tokio::test]
async fn test_verbose_passes_vv_and_reports_output() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let mut config = ws.config(&ws.fake_rpmbuild());
    config.keep_temp = true;
    config.verbose = true;

    let (tx, mut rx) = rpmpack_events::channel();
    let context = BuildContext::new()
        .with_event_sender(tx)
        .with_verbose(true);
    Builder::new().build(&config, &context).await.unwrap();

    let args = std::fs::read_to_string(ws.tree().join("args")).unwrap();
    assert!(args.starts_with("-bb -vv --buildroot "));

    let events = drain(&mut rx);
    assert!(events.iter().any(|m| matches!(
        &m.event,
        AppEvent::Build(BuildEvent::ToolOutput { line, .. }) if line.starts_with("Wrote: ")
    )));
    assert!(events
        .iter()
        .any(|m| matches!(m.event, AppEvent::Build(BuildEvent::FileStaged { .. }))));
    assert!(events
        .iter()
        .all(|m| m.meta.correlation_id.is_none()
            || m.meta.correlation_id.as_deref() == Some(context.session_id.as_str())));
}

#[tokio::test]
async fn test_tool_failure_surfaces_stderr() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let tool = ws.script("failing-rpmbuild", "echo 'error: bad spec' >&2\nexit 3\n");
    let config = ws.config(&tool);

    let err = Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap_err();

    match err {
        Error::Build(BuildError::ExternalTool { status, stderr, .. }) => {
            assert_eq!(status, Some(3));
            assert_eq!(stderr, "error: bad spec");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ws.tree().join("BUILDROOT/docs/a.txt").exists());
    assert!(!ws.out().exists());
}

#[tokio::test]
async fn test_missing_artifact_is_an_error() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let tool = ws.script("quiet-rpmbuild", "echo 'nothing to see'\n");
    let config = ws.config(&tool);

    let err = Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Build(BuildError::ArtifactNotFound { ref stdout, .. }) if stdout.contains("nothing to see")
    ));
}

#[tokio::test]
async fn test_unknown_program_is_reported() {
    let ws = Workspace::new();
    let mut config = ws.config(std::path::Path::new("x"));
    config.exec_opts.program = "rpmpack-no-such-rpmbuild".to_string();

    let err = Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Platform(PlatformError::CommandNotFound { .. })
    ));
}

#[tokio::test]
async fn test_staging_failure_reports_phase() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let mut config = ws.config(&ws.fake_rpmbuild());
    config.files = vec![FileSelection::new("*.txt", "docs")
        .with_cwd(ws.fixtures())
        .with_directive("bogus")];

    let (tx, mut rx) = rpmpack_events::channel();
    let context = BuildContext::new().with_event_sender(tx);
    let err = Builder::new().build(&config, &context).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Build(BuildError::InvalidDirective { ref directive }) if directive == "bogus"
    ));
    assert!(ws.tree().exists());
    assert!(!ws.tree().join("args").exists());

    let failed = drain(&mut rx).into_iter().find_map(|m| match m.event {
        AppEvent::Build(BuildEvent::Failed { phase, failure, .. }) => Some((phase, failure)),
        _ => None,
    });
    let (phase, failure) = failed.expect("failure event");
    assert_eq!(phase, Some(BuildPhase::Stage));
    assert_eq!(failure.code.as_deref(), Some("build.invalid_directive"));
}

#[tokio::test]
async fn test_entry_point_returns_artifact_path() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let config = ws.config(&ws.fake_rpmbuild());

    let (tx, mut rx) = rpmpack_events::channel();
    let path = build(config, Some(tx)).await.unwrap();
    assert_eq!(path, ws.out().join("fake-1.0-1.noarch.rpm"));

    let events = drain(&mut rx);
    assert!(matches!(
        events.first().map(|m| &m.event),
        Some(AppEvent::General(_))
    ));
    assert!(events.iter().any(|m| matches!(
        m.event,
        AppEvent::Build(BuildEvent::SessionStarted { .. })
    )));
    assert!(events.iter().any(|m| matches!(
        m.event,
        AppEvent::Build(BuildEvent::BuildRootRemoved { .. })
    )));
    assert!(events
        .iter()
        .any(|m| matches!(m.event, AppEvent::Build(BuildEvent::Completed { .. }))));
}

#[tokio::test]
async fn test_exec_env_and_cwd_reach_the_tool() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let mut config = ws.config(&ws.fake_rpmbuild());
    config.keep_temp = true;
    config
        .exec_opts
        .env
        .insert("RPMPACK_TEST_MARKER".to_string(), "from-config".to_string());
    config.exec_opts.cwd = Some(ws.fixtures());

    Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap();

    let marker = std::fs::read_to_string(ws.tree().join("marker")).unwrap();
    assert_eq!(marker.trim(), "from-config");
    let pwd = std::fs::read_to_string(ws.tree().join("pwd")).unwrap();
    assert_eq!(
        PathBuf::from(pwd.trim()).canonicalize().unwrap(),
        ws.fixtures().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn test_bare_program_found_on_configured_path() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let bin = ws.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::rename(ws.fake_rpmbuild(), bin.join("myrpmbuild")).unwrap();

    let mut config = ws.config(std::path::Path::new("myrpmbuild"));
    let inherited = std::env::var("PATH").unwrap_or_default();
    config
        .exec_opts
        .env
        .insert("PATH".to_string(), format!("{}:{inherited}", bin.display()));

    let result = Builder::new()
        .build(&config, &BuildContext::new())
        .await
        .unwrap();

    assert_eq!(result.package_path, ws.out().join("fake-1.0-1.noarch.rpm"));
}

/// Restores the process working directory when dropped
struct CurrentDirGuard(PathBuf);

impl CurrentDirGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

#[tokio::test]
async fn test_package_lands_in_working_directory_without_rpm_dest() {
    let _guard = SCRIPT_LOCK.lock().await;
    let ws = Workspace::new();
    let mut config = ws.config(&ws.fake_rpmbuild());
    config.rpm_dest = None;
    let run_dir = ws.path().join("run");
    std::fs::create_dir_all(&run_dir).unwrap();

    let result = {
        let _cwd = CurrentDirGuard::enter(&run_dir);
        Builder::new()
            .build(&config, &BuildContext::new())
            .await
            .unwrap()
    };

    assert!(result.package_path.is_absolute());
    assert_eq!(
        result.package_path.canonicalize().unwrap(),
        run_dir
            .join("fake-1.0-1.noarch.rpm")
            .canonicalize()
            .unwrap()
    );
    assert_eq!(std::fs::read_to_string(&result.package_path).unwrap(), "rpm");
    assert!(!ws.tree().exists());
}
