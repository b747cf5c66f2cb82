//! Lexical path helpers
//!
//! Nothing here touches the filesystem except [`absolutize`], which reads the
//! process working directory for relative inputs.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components and fold `..` into its parent
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Anchor a relative path at the process working directory and normalize it
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

/// String form used for exact-match comparisons
pub fn path_key(path: &Path) -> String {
    normalize(path).to_string_lossy().into_owned()
}

/// Join path components with `/` regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Fold `..` lexically, then drop the root and any `..` left at the front
///
/// The result is always relative, so joining it onto a directory stays
/// inside that directory.
pub fn clamp_relative(path: &Path) -> String {
    to_slash(&normalize(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/b/")), PathBuf::from("a/b"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../a/../..")), PathBuf::from("../.."));
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("usr/share/./doc")), "usr/share/doc");
        assert_eq!(to_slash(Path::new("/etc/app")), "etc/app");
        assert_eq!(to_slash(Path::new("")), "");
    }

    #[test]
    fn test_absolutize_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolutize(Path::new("x/../y")).unwrap(), cwd.join("y"));
    }

    #[test]
    fn test_clamp_relative() {
        assert_eq!(clamp_relative(Path::new("usr/lib/../share")), "usr/share");
        assert_eq!(clamp_relative(Path::new("/opt/app/")), "opt/app");
        assert_eq!(clamp_relative(Path::new("../../etc")), "etc");
        assert_eq!(clamp_relative(Path::new("/..")), "");
    }
}
