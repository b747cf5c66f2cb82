//! Shared fixtures

use rpmpack_config::{BuildConfig, ExecOptions};
use rpmpack_types::FileSelection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::Mutex;

/// Serializes tests that write and then exec a script
pub static SCRIPT_LOCK: Mutex<()> = Mutex::const_new(());

pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let fixtures = temp.path().join("fixtures");
        std::fs::create_dir_all(&fixtures).unwrap();
        std::fs::write(fixtures.join("a.txt"), "alpha").unwrap();
        std::fs::write(fixtures.join("b.txt"), "beta").unwrap();
        std::fs::write(fixtures.join("c.md"), "gamma").unwrap();
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn fixtures(&self) -> PathBuf {
        self.path().join("fixtures")
    }

    pub fn tree(&self) -> PathBuf {
        self.path().join("tree")
    }

    pub fn out(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Config staging `fixtures/*.txt` into `docs`, packaged by `program`
    pub fn config(&self, program: &Path) -> BuildConfig {
        BuildConfig {
            name: "fake".to_string(),
            version: "1.0".to_string(),
            release: "1".to_string(),
            temp_dir: self.tree(),
            files: vec![FileSelection::new("*.txt", "docs").with_cwd(self.fixtures())],
            rpm_dest: Some(self.out()),
            exec_opts: ExecOptions {
                program: program.to_string_lossy().into_owned(),
                ..ExecOptions::default()
            },
            ..BuildConfig::default()
        }
    }

    /// Write an executable shell script into the workspace
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// A stand-in for rpmbuild that records its arguments and "writes" a package
    ///
    /// `$RPMPACK_TEST_MARKER` and the working directory are recorded next to
    /// the arguments.
    #[cfg(unix)]
    pub fn fake_rpmbuild(&self) -> PathBuf {
        self.script(
            "fake-rpmbuild",
            r#"ARGS="$*"
while [ $# -gt 0 ]; do
  case "$1" in
    --buildroot) BUILDROOT="$2"; shift 2 ;;
    *) shift ;;
  esac
done
TOP=$(dirname "$BUILDROOT")
echo "$ARGS" > "$TOP/args"
echo "$RPMPACK_TEST_MARKER" > "$TOP/marker"
pwd > "$TOP/pwd"
mkdir -p "$TOP/RPMS/noarch"
printf 'rpm' > "$TOP/RPMS/noarch/fake-1.0-1.noarch.rpm"
echo "Processing files: fake-1.0-1.noarch"
echo "Wrote: $TOP/RPMS/noarch/fake-1.0-1.noarch.rpm"
"#,
        )
    }
}
