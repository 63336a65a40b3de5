//! Cross-platform link creation.
//!
//! Directory entries become symlinks on Unix and native symlinks with an
//! `mklink /J` junction fallback on Windows (junctions need no elevation).
//! File entries become symlinks where the platform permits, falling back to
//! a byte-copy — or are copied outright when the profile's link strategy
//! says so.
use anyhow::{Context as _, Result};
use std::path::Path;

use crate::profiles::LinkStrategy;

/// Place `source` into the tree at `target`, picking the directory or file
/// treatment automatically.
///
/// # Errors
///
/// Returns an error when the link (and any applicable fallback) cannot be
/// created. Callers treat this as a per-entry failure: warn and continue.
pub fn materialize_entry(source: &Path, target: &Path, strategy: LinkStrategy) -> Result<()> {
    if source.is_dir() {
        link_dir(source, target)
    } else {
        link_file(source, target, strategy)
    }
}

/// Create a directory link at `target` pointing to `source`.
///
/// # Errors
///
/// Returns an error if neither a symlink nor (on Windows) a junction can
/// be created.
pub fn link_dir(source: &Path, target: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                target.display(),
                source.display()
            )
        })
    }

    #[cfg(windows)]
    {
        if std::os::windows::fs::symlink_dir(source, target).is_ok() {
            return Ok(());
        }
        // Junctions work without admin rights or developer mode.
        mklink_junction(source, target)
    }

    #[cfg(not(any(unix, windows)))]
    {
        crate::resources::fs::copy_dir_recursive(source, target)
    }
}

/// Create a file link (or copy, per `strategy`) at `target` for `source`.
///
/// # Errors
///
/// Returns an error if the file cannot be linked or copied.
pub fn link_file(source: &Path, target: &Path, strategy: LinkStrategy) -> Result<()> {
    if strategy == LinkStrategy::Copy {
        return copy_file(source, target);
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                target.display(),
                source.display()
            )
        })
    }

    #[cfg(not(unix))]
    {
        // File symlinks require elevation or developer mode on Windows.
        #[cfg(windows)]
        if std::os::windows::fs::symlink_file(source, target).is_ok() {
            return Ok(());
        }
        copy_file(source, target)
    }
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    std::fs::copy(source, target)
        .map(|_| ())
        .with_context(|| format!("copy {} to {}", source.display(), target.display()))
}

#[cfg(windows)]
fn mklink_junction(source: &Path, target: &Path) -> Result<()> {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    use std::os::windows::process::CommandExt;
    let output = std::process::Command::new("cmd")
        .arg("/c")
        .arg("mklink")
        .arg("/J")
        .arg(target)
        .arg(source)
        .creation_flags(CREATE_NO_WINDOW)
        .output()
        .context("failed to run mklink")?;
    if !output.status.success() {
        anyhow::bail!(
            "junction {} -> {}: {}",
            target.display(),
            source.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
