//! Results produced by the builder

use crate::build_root::BuildRoot;
use rpmpack_types::ManifestEntry;
use std::path::PathBuf;

/// Build root populated and described, ready for the packaging tool
#[derive(Debug, Clone)]
pub struct StagedBuild {
    pub build_root: BuildRoot,
    pub manifest: Vec<ManifestEntry>,
    pub descriptor_path: PathBuf,
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Where the package ended up
    pub package_path: PathBuf,
    pub manifest: Vec<ManifestEntry>,
    pub descriptor_path: PathBuf,
    /// Build root, when it was kept
    pub build_root: Option<PathBuf>,
}
