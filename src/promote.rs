//! Promotion of the selected homepage to the application root route.
//!
//! Route groups don't add a URL segment, so a page placed directly in a
//! group folder serves `/`. Promotion gets the selected page there:
//!
//! ```text
//! Route group                          Named folder
//! app/(layout-1)/fashion-1/page.tsx    app/furniture-3/page.tsx
//!   → app/(layout-1)/page.tsx            → app/(furniture-3)/page.tsx
//! ```
//!
//! Promotion is not idempotent. The source of the move (or rename) is gone
//! after the first successful run, so a second run fails with
//! [`PromoteError::SourceMissing`]. It must run after
//! [`prune`](crate::prune::prune) for the same selection.

use crate::catalog::{Catalog, CatalogError, LayoutGroupRef, Selection, bracketed};
use crate::merge;
use crate::paths::{self, FileExtension, PathError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromoteError {
    #[error("Promotion source not found: {0} (catalog and template disagree)")]
    SourceMissing(PathBuf),
    #[error("Promotion target already exists: {0}")]
    TargetExists(PathBuf),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Failed to promote {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What promotion changed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    /// `landing` was selected; nothing to restructure.
    Unchanged,
    /// A route-group page was moved up into its group folder.
    PageMoved {
        id: String,
        from: PathBuf,
        to: PathBuf,
        /// The emptied per-variant folder, now removed.
        removed_folder: PathBuf,
    },
    /// A named folder was renamed to its bracketed form.
    FolderRenamed { id: String, from: PathBuf, to: PathBuf },
}

/// Restructure the selected homepage's layout so its page serves `/`.
pub fn promote(
    root: &Path,
    catalog: &Catalog,
    selection: &Selection,
    ext: FileExtension,
) -> Result<Promotion, PromoteError> {
    let Selection::Homepage(id) = selection else {
        return Ok(Promotion::Unchanged);
    };
    let entry = catalog
        .get(id)
        .ok_or_else(|| CatalogError::UnknownHomepage(id.clone()))?;

    match &entry.layout {
        LayoutGroupRef::RouteGroup(_) => promote_nested_page(root, &entry.layout, id, ext),
        LayoutGroupRef::NamedFolder(name) => promote_named_folder(root, &entry.layout, name, id),
    }
}

fn promote_nested_page(
    root: &Path,
    layout: &LayoutGroupRef,
    id: &str,
    ext: FileExtension,
) -> Result<Promotion, PromoteError> {
    let from = paths::nested_page_path(root, layout, id, ext)?;
    let variant_folder = paths::variant_folder_path(root, layout, id)?;
    let to = paths::layout_container_path(root, layout).join(ext.page_file());

    if !from.is_file() {
        return Err(PromoteError::SourceMissing(from));
    }
    if to.exists() {
        return Err(PromoteError::TargetExists(to));
    }

    merge::move_file(&from, &to).map_err(|source| PromoteError::Io {
        path: from.clone(),
        source,
    })?;
    fs::remove_dir_all(&variant_folder).map_err(|source| PromoteError::Io {
        path: variant_folder.clone(),
        source,
    })?;

    Ok(Promotion::PageMoved {
        id: id.to_string(),
        from,
        to,
        removed_folder: variant_folder,
    })
}

fn promote_named_folder(
    root: &Path,
    layout: &LayoutGroupRef,
    name: &str,
    id: &str,
) -> Result<Promotion, PromoteError> {
    let from = paths::layout_container_path(root, layout);
    let to = paths::app_dir(root).join(bracketed(name));

    if !from.is_dir() {
        return Err(PromoteError::SourceMissing(from));
    }
    if to.exists() {
        return Err(PromoteError::TargetExists(to));
    }

    fs::rename(&from, &to).map_err(|source| PromoteError::Io {
        path: from.clone(),
        source,
    })?;

    Ok(Promotion::FolderRenamed {
        id: id.to_string(),
        from,
        to,
    })
}
