//! File-system helpers: clean-slate directories, parents, recursive copies.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever currently lives at `path`: a regular file, a symlink
/// (including a broken one), or a real directory tree. Does nothing if the
/// path does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_path(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_symlink() {
        remove_link(path, &meta)
    } else if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove directory: {}", path.display()))
    } else {
        std::fs::remove_file(path).with_context(|| format!("remove file: {}", path.display()))
    }
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks and junctions must be removed with
/// `remove_dir`, not `remove_file`; the raw `FILE_ATTRIBUTE_DIRECTORY` bit
/// tells the two apart because `Metadata::is_dir` is `false` for links.
fn remove_link(path: &Path, meta: &std::fs::Metadata) -> Result<()> {
    if is_dir_like(meta) {
        std::fs::remove_dir(path)
            .with_context(|| format!("remove directory link: {}", path.display()))
    } else {
        std::fs::remove_file(path).with_context(|| format!("remove link: {}", path.display()))
    }
}

fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

/// Replace the directory at `path` with a freshly populated one.
///
/// The clean-slate primitive of the whole pipeline: whatever lives at
/// `path` (directory, link, stale file) is deleted, the directory is
/// recreated empty, and `populate` fills it. If `populate` fails the
/// half-built directory is removed again, so no partial tree is ever left
/// behind on an early return.
///
/// # Errors
///
/// Returns an error if the old entry cannot be removed, the directory
/// cannot be created, or `populate` fails.
pub fn replace_dir<T>(path: &Path, populate: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    remove_path(path)?;
    std::fs::create_dir_all(path)
        .with_context(|| format!("create directory: {}", path.display()))?;
    match populate(path) {
        Ok(value) => Ok(value),
        Err(err) => {
            let _ = std::fs::remove_dir_all(path);
            Err(err)
        }
    }
}

/// Recursively copy a directory tree, following symlinks within the source
/// (their content is materialised, not the link itself).
///
/// # Errors
///
/// Returns an error if the destination cannot be created, a source entry
/// cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!("copying {} to {}", src_path.display(), dst_path.display())
            })?;
        }
    }
    Ok(())
}
