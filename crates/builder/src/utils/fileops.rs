//! File system operations for staging

use rpmpack_errors::Error;
use std::path::Path;
use tokio::fs;

/// Copy a file or directory tree, keeping permission bits
///
/// Parent directories of `dst` are created as needed. An existing file at
/// `dst` is overwritten. Symlinks inside a copied tree are recreated rather
/// than followed. A directory equal to `skip` is left out of the copy.
pub async fn copy_path(src: &Path, dst: &Path, skip: Option<&Path>) -> Result<(), Error> {
    let metadata = fs::metadata(src)
        .await
        .map_err(|e| Error::io_with_path(&e, src))?;

    if metadata.is_dir() {
        return copy_directory_recursive(src, dst, skip).await;
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(&e, parent))?;
    }
    // fs::copy carries the permission bits over
    fs::copy(src, dst)
        .await
        .map_err(|e| Error::io_with_path(&e, src))?;
    Ok(())
}

/// Recursively copy directory contents
pub fn copy_directory_recursive<'a>(
    src: &'a Path,
    dst: &'a Path,
    skip: Option<&'a Path>,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<(), Error>> + Send + 'a>> {
    Box::pin(async move {
        fs::create_dir_all(dst)
            .await
            .map_err(|e| Error::io_with_path(&e, dst))?;

        let mut entries = fs::read_dir(src)
            .await
            .map_err(|e| Error::io_with_path(&e, src))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io_with_path(&e, src))?
        {
            let entry_path = entry.path();
            if skip.is_some_and(|skip| skip == entry_path.as_path()) {
                continue;
            }
            let dst_path = dst.join(entry.file_name());
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| Error::io_with_path(&e, &entry_path))?;

            if file_type.is_dir() {
                copy_directory_recursive(&entry_path, &dst_path, skip).await?;
            } else if file_type.is_symlink() {
                copy_symlink(&entry_path, &dst_path).await?;
            } else {
                fs::copy(&entry_path, &dst_path)
                    .await
                    .map_err(|e| Error::io_with_path(&e, &entry_path))?;
            }
        }

        // Applied last so read-only source directories can still be filled.
        let permissions = fs::metadata(src)
            .await
            .map_err(|e| Error::io_with_path(&e, src))?
            .permissions();
        fs::set_permissions(dst, permissions)
            .await
            .map_err(|e| Error::io_with_path(&e, dst))?;

        Ok(())
    })
}

#[cfg(unix)]
async fn copy_symlink(src: &Path, dst: &Path) -> Result<(), Error> {
    let target = fs::read_link(src)
        .await
        .map_err(|e| Error::io_with_path(&e, src))?;
    if fs::symlink_metadata(dst).await.is_ok() {
        fs::remove_file(dst)
            .await
            .map_err(|e| Error::io_with_path(&e, dst))?;
    }
    fs::symlink(&target, dst)
        .await
        .map_err(|e| Error::io_with_path(&e, dst))
}

#[cfg(not(unix))]
async fn copy_symlink(src: &Path, dst: &Path) -> Result<(), Error> {
    fs::copy(src, dst)
        .await
        .map_err(|e| Error::io_with_path(&e, src))?;
    Ok(())
}
