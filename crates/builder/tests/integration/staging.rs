//! Staging through the public API

use super::common::Workspace;
use rpmpack_builder::{BuildContext, BuildRoot, Builder, ExclusionSet, FileStager};
use rpmpack_config::BuildConfig;
use rpmpack_types::FileSelection;

#[tokio::test]
async fn test_exclusions_apply_across_selections() {
    let ws = Workspace::new();
    let root = BuildRoot::setup(&ws.tree()).await.unwrap();
    let exclusions = ExclusionSet::build(ws.path(), &["fixtures/b.txt"]).unwrap();
    let selections = [
        FileSelection::new("*.txt", "docs").with_cwd(ws.fixtures()),
        FileSelection::new(vec!["b.txt".to_string(), "c.md".to_string()], "more")
            .with_cwd(ws.fixtures()),
    ];

    let manifest = FileStager::new(&root, &exclusions)
        .stage(&selections)
        .await
        .unwrap();

    let paths: Vec<&str> = manifest.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["docs/a.txt", "more/c.md"]);
    assert!(!root.staging_dir().join("more/b.txt").exists());
}

#[tokio::test]
async fn test_every_match_appears_once() {
    let ws = Workspace::new();
    let root = BuildRoot::setup(&ws.tree()).await.unwrap();
    let selection =
        FileSelection::new(vec!["*".to_string(), "a.txt".to_string()], "all").with_cwd(ws.fixtures());

    let manifest = FileStager::new(&root, &ExclusionSet::default())
        .stage(&[selection])
        .await
        .unwrap();

    let paths: Vec<&str> = manifest.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["all/a.txt", "all/b.txt", "all/c.md"]);
    for path in paths {
        assert!(root.staging_dir().join(path).is_file());
    }
}

#[tokio::test]
async fn test_prepare_writes_descriptor_without_packaging() {
    let ws = Workspace::new();
    let config = BuildConfig {
        name: "staged".to_string(),
        temp_dir: ws.tree(),
        files: vec![FileSelection::new("*.md", "usr/share/doc/staged")
            .with_cwd(ws.fixtures())
            .with_directive("%doc")],
        ..BuildConfig::default()
    };

    let staged = Builder::new()
        .prepare(&config, &BuildContext::new())
        .await
        .unwrap();

    assert_eq!(staged.manifest.len(), 1);
    assert_eq!(staged.descriptor_path, ws.tree().join("SPECS/staged.spec"));
    let spec = std::fs::read_to_string(&staged.descriptor_path).unwrap();
    assert!(spec.contains("%doc \"/usr/share/doc/staged/c.md\""));
    assert!(staged
        .build_root
        .staging_dir()
        .join("usr/share/doc/staged/c.md")
        .is_file());
}
