//! Locating the package rpmbuild wrote

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static ARTIFACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(/\S+\.rpm)(?:\s|$)").expect("valid regex"));

/// First absolute `.rpm` path mentioned in `output`
///
/// rpmbuild reports each package as `Wrote: /abs/path/name.rpm`; the first
/// such path wins.
#[must_use]
pub fn locate_artifact(output: &str) -> Option<PathBuf> {
    ARTIFACT_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| PathBuf::from(m.as_str()))
}
