//! Removal of every homepage variant that was not selected.
//!
//! Two passes over the catalog, in catalog order:
//!
//! 1. **Sections**: `src/pages-sections/{id}` for every catalog id and
//!    `landing`, except the selection. Skipped with `keep_sections`.
//! 2. **Layouts**: the route ownership of every catalog entry except the
//!    selection. A route group is shared, so only the variant's own
//!    `(group)/{id}` subfolder goes; the container stays for whoever else
//!    lives in it. A named folder has a single owner and goes entirely.
//!
//! The selection's own paths are never visited, which is what leaves them
//! intact for [`promote`](crate::promote).
//!
//! Missing paths are recorded as [`RemovalStatus::AlreadyAbsent`] rather than
//! treated as errors, so running the pass twice is harmless.

use crate::catalog::{Catalog, LayoutGroupRef, Selection};
use crate::paths::{self, PathError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("Failed to remove {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Knobs for the pruning pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneOptions {
    /// Leave non-selected `pages-sections` folders in place.
    pub keep_sections: bool,
}

/// Outcome of removing one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStatus {
    Removed,
    AlreadyAbsent,
}

/// Which artifact a removal targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// `src/pages-sections/{id}`
    Section,
    /// `src/app/(group)/{id}`
    VariantFolder,
    /// `src/app/{folder}`
    NamedFolder,
}

/// One removal, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub id: String,
    pub kind: RemovalKind,
    pub path: PathBuf,
    pub status: RemovalStatus,
}

/// Everything the pruning pass did.
#[derive(Debug, Clone, Default)]
pub struct PruneReport {
    pub removals: Vec<Removal>,
    /// True when the sections pass was skipped.
    pub sections_kept: bool,
}

impl PruneReport {
    /// Removals that actually deleted something.
    pub fn removed(&self) -> impl Iterator<Item = &Removal> {
        self.removals
            .iter()
            .filter(|r| r.status == RemovalStatus::Removed)
    }

    pub fn removed_count(&self) -> usize {
        self.removed().count()
    }
}

/// Delete every non-selected variant's content and route ownership.
pub fn prune(
    root: &Path,
    catalog: &Catalog,
    selection: &Selection,
    options: PruneOptions,
) -> Result<PruneReport, PruneError> {
    let mut report = PruneReport {
        sections_kept: options.keep_sections,
        ..PruneReport::default()
    };

    if !options.keep_sections {
        for id in catalog.section_ids().filter(|id| !selection.is(id)) {
            let path = paths::content_path(root, id);
            report.removals.push(remove(id, RemovalKind::Section, path)?);
        }
    }

    for entry in catalog.entries().iter().filter(|e| !selection.is(&e.id)) {
        let (kind, path) = match &entry.layout {
            LayoutGroupRef::RouteGroup(_) => (
                RemovalKind::VariantFolder,
                paths::variant_folder_path(root, &entry.layout, &entry.id)?,
            ),
            LayoutGroupRef::NamedFolder(_) => (
                RemovalKind::NamedFolder,
                paths::layout_container_path(root, &entry.layout),
            ),
        };
        report.removals.push(remove(&entry.id, kind, path)?);
    }

    Ok(report)
}

fn remove(id: &str, kind: RemovalKind, path: PathBuf) -> Result<Removal, PruneError> {
    let status = remove_path(&path).map_err(|source| PruneError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(Removal {
        id: id.to_string(),
        kind,
        path,
        status,
    })
}

/// Remove a file or directory tree; a missing path is not an error.
pub fn remove_path(path: &Path) -> io::Result<RemovalStatus> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RemovalStatus::AlreadyAbsent),
        Err(e) => return Err(e),
    };
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(RemovalStatus::Removed),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RemovalStatus::AlreadyAbsent),
        Err(e) => Err(e),
    }
}
