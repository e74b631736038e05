//! Workspace root discovery
//!
//! The workspace root is the nearest ancestor of the start directory that
//! contains a `.git` entry. Both directories and files count, so worktrees
//! and submodules (where `.git` is a file) resolve to their own root.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Name of the marker entry identifying a repository root.
pub const GIT_MARKER: &str = ".git";

/// Walk upward from `start` looking for a directory containing `.git`.
///
/// `start` is canonicalized first. The filesystem root itself is never
/// considered a workspace. Returns `Ok(None)` when no marker is found.
#[instrument(skip(fs))]
pub fn find_workspace_root(fs: &dyn FileSystem, start: &Path) -> ApplicationResult<Option<PathBuf>> {
    let mut current = fs
        .canonicalize(start)
        .with_path_context("resolve directory", start)?;
    let mut steps = 0usize;

    while let Some(parent) = current.parent() {
        let marker = current.join(GIT_MARKER);
        trace!(candidate = %marker.display(), "checking");
        if fs.exists(&marker) {
            debug!(root = %current.display(), steps, "workspace root found");
            return Ok(Some(current));
        }
        current = parent.to_path_buf();
        steps += 1;
    }

    debug!(steps, "no workspace root found");
    Ok(None)
}

/// Like [`find_workspace_root`], but absence is an error.
pub fn require_workspace_root(fs: &dyn FileSystem, start: &Path) -> ApplicationResult<PathBuf> {
    find_workspace_root(fs, start)?.ok_or_else(|| ApplicationError::NotARepository {
        start: start.to_path_buf(),
    })
}
