//! Read-only comparison of the catalog against a template on disk.
//!
//! Promotion aborts when the selected page is not where the catalog says it
//! is. `check` looks for that kind of disagreement up front, for every
//! variant at once, without touching anything.

use crate::catalog::{Catalog, LayoutGroupRef, bracketed};
use crate::paths::{self, FileExtension};
use std::fmt;
use std::path::{Path, PathBuf};

/// One disagreement between the catalog and the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFinding {
    /// `src/pages-sections/{id}` is missing.
    MissingSection { id: String, path: PathBuf },
    /// The variant's page file is missing.
    MissingPage { id: String, path: PathBuf },
    /// A named folder has already been converted to a route group.
    AlreadyPromoted { id: String, path: PathBuf },
    /// `src/app/page.{ext}` is missing.
    MissingRootPage { path: PathBuf },
}

impl CheckFinding {
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingSection { path, .. }
            | Self::MissingPage { path, .. }
            | Self::AlreadyPromoted { path, .. }
            | Self::MissingRootPage { path } => path,
        }
    }
}

impl fmt::Display for CheckFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { id, .. } => write!(f, "{id}: content folder missing"),
            Self::MissingPage { id, .. } => write!(f, "{id}: page file missing"),
            Self::AlreadyPromoted { id, .. } => {
                write!(f, "{id}: layout folder already promoted")
            }
            Self::MissingRootPage { .. } => f.write_str("root page missing"),
        }
    }
}

/// List every disagreement, in catalog order, root page last.
pub fn check_template(root: &Path, catalog: &Catalog, ext: FileExtension) -> Vec<CheckFinding> {
    let mut findings = Vec::new();

    for entry in catalog.entries() {
        let section = paths::content_path(root, &entry.id);
        if !section.is_dir() {
            findings.push(CheckFinding::MissingSection {
                id: entry.id.clone(),
                path: section,
            });
        }

        let page = match &entry.layout {
            LayoutGroupRef::RouteGroup(_) => {
                paths::nested_page_path(root, &entry.layout, &entry.id, ext).ok()
            }
            LayoutGroupRef::NamedFolder(_) => paths::named_page_path(root, &entry.layout, ext),
        };
        let Some(page) = page else { continue };
        if page.is_file() {
            continue;
        }

        let promoted_dir = paths::app_dir(root).join(bracketed(entry.layout.name()));
        if !entry.layout.is_route_group() && promoted_dir.is_dir() {
            findings.push(CheckFinding::AlreadyPromoted {
                id: entry.id.clone(),
                path: promoted_dir,
            });
        } else {
            findings.push(CheckFinding::MissingPage {
                id: entry.id.clone(),
                path: page,
            });
        }
    }

    let root_page = paths::root_page_path(root, ext);
    if !root_page.is_file() {
        findings.push(CheckFinding::MissingRootPage { path: root_page });
    }

    findings
}
