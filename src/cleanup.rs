//! Removal of the template's default root page.
//!
//! `src/app/page.{ext}` would shadow the promoted page, so it goes once
//! promotion has succeeded. A template without one is fine.

use crate::paths::{self, FileExtension};
use crate::prune::{RemovalStatus, remove_path};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Failed to remove root page {path}: {source}")]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Result of clearing the root page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPageCleared {
    pub path: PathBuf,
    pub status: RemovalStatus,
}

pub fn clear_root_page(root: &Path, ext: FileExtension) -> Result<RootPageCleared, CleanupError> {
    let path = paths::root_page_path(root, ext);
    let status = remove_path(&path).map_err(|source| CleanupError {
        path: path.clone(),
        source,
    })?;
    Ok(RootPageCleared { path, status })
}
