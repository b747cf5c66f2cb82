//! Temporary rpmbuild tree

use crate::utils::paths::absolutize;
use rpmpack_errors::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Subdirectories rpmbuild expects under `_topdir`
pub const BUILD_ROOT_SUBDIRS: [&str; 6] = ["BUILD", "BUILDROOT", "RPMS", "SOURCES", "SPECS", "SRPMS"];

/// A freshly created rpmbuild tree
#[derive(Debug, Clone)]
pub struct BuildRoot {
    top_dir: PathBuf,
    replaced_existing: bool,
}

impl BuildRoot {
    /// Create the tree at `path`, discarding anything already there
    ///
    /// # Errors
    ///
    /// Returns an error if the old tree cannot be removed or a directory
    /// cannot be created.
    pub async fn setup(path: &Path) -> Result<Self, Error> {
        let top_dir = absolutize(path).map_err(|e| Error::io_with_path(&e, path))?;

        let replaced_existing = match fs::symlink_metadata(&top_dir).await {
            Ok(meta) if meta.is_dir() => {
                fs::remove_dir_all(&top_dir)
                    .await
                    .map_err(|e| Error::io_with_path(&e, &top_dir))?;
                true
            }
            Ok(_) => {
                fs::remove_file(&top_dir)
                    .await
                    .map_err(|e| Error::io_with_path(&e, &top_dir))?;
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(Error::io_with_path(&e, &top_dir)),
        };

        for subdir in BUILD_ROOT_SUBDIRS {
            let dir = top_dir.join(subdir);
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| Error::io_with_path(&e, &dir))?;
        }

        Ok(Self {
            top_dir,
            replaced_existing,
        })
    }

    /// Remove the whole tree; a tree that is already gone is fine
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails for any reason other than the tree
    /// being absent.
    pub async fn teardown(&self) -> Result<(), Error> {
        match fs::remove_dir_all(&self.top_dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_path(&e, &self.top_dir)),
        }
    }

    /// Absolute `_topdir`
    #[must_use]
    pub fn top_dir(&self) -> &Path {
        &self.top_dir
    }

    /// Whether `setup` removed a previous tree
    #[must_use]
    pub fn replaced_existing(&self) -> bool {
        self.replaced_existing
    }

    /// `BUILDROOT`, where files are staged
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.top_dir.join("BUILDROOT")
    }

    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.top_dir.join("BUILD")
    }

    #[must_use]
    pub fn rpms_dir(&self) -> PathBuf {
        self.top_dir.join("RPMS")
    }

    #[must_use]
    pub fn sources_dir(&self) -> PathBuf {
        self.top_dir.join("SOURCES")
    }

    #[must_use]
    pub fn specs_dir(&self) -> PathBuf {
        self.top_dir.join("SPECS")
    }

    #[must_use]
    pub fn srpms_dir(&self) -> PathBuf {
        self.top_dir.join("SRPMS")
    }
}
