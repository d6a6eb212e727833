//! The full customization run: select → copy → prune → promote → clean up.
//!
//! ```text
//! 1. Select    "fashion-1"  →  Selection     (rejected before any mutation)
//! 2. Detect    layout.tsx?  →  FileExtension
//! 3. Prepare   OutputMode   →  working root  (template, fresh copy, or staging)
//! 4. Prune     non-selected sections and layouts
//! 5. Promote   selected page → root route
//! 6. Clean up  src/app/page.{ext}
//! 7. Merge     staging → existing destination (copy mode only)
//! ```
//!
//! Each phase runs to completion before the next starts, and any error stops
//! the run where it is. Nothing is rolled back.

use crate::catalog::{Catalog, CatalogError, Selection};
use crate::cleanup::{self, CleanupError, RootPageCleared};
use crate::config::SetupConfig;
use crate::copy::{self, CopyError, CopyFilter, CopyReport};
use crate::merge::{self, MergeError, MergeReport};
use crate::paths::FileExtension;
use crate::promote::{self, PromoteError, Promotion};
use crate::prune::{self, PruneError, PruneOptions, PruneReport};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Copy(#[from] CopyError),
    #[error(transparent)]
    Prune(#[from] PruneError),
    #[error(transparent)]
    Promote(#[from] PromoteError),
    #[error(transparent)]
    Cleanup(#[from] CleanupError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error("Template directory not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("Failed to clear staging directory {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the customized project ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Customize a copy of the template at `destination`. An existing
    /// destination receives the result through a merge.
    Copy { destination: PathBuf },
    /// Customize the template directory itself.
    InPlace,
}

/// One customization run.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    /// Catalog id or `landing`.
    pub homepage: String,
    pub mode: OutputMode,
    pub keep_sections: bool,
    /// Names skipped when copying the template.
    pub exclude: Vec<String>,
}

impl SetupRequest {
    /// Request built from config values; CLI flags are applied on top by the
    /// caller.
    pub fn from_config(homepage: impl Into<String>, config: &SetupConfig, template_root: &Path) -> Self {
        let mode = if config.in_place {
            OutputMode::InPlace
        } else {
            OutputMode::Copy {
                destination: config.output_path(template_root),
            }
        };
        Self {
            homepage: homepage.into(),
            mode,
            keep_sections: config.keep_sections,
            exclude: config.copy.exclude.clone(),
        }
    }
}

/// How the working root was prepared.
#[derive(Debug, Clone)]
pub enum Workspace {
    InPlace,
    /// Template copied straight into a new destination.
    Copied { copy: CopyReport },
    /// Template copied into a staging directory, later merged into the
    /// existing destination.
    Staged { staging: PathBuf, copy: CopyReport },
}

/// Everything a run did, phase by phase.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub selection: Selection,
    pub ext: FileExtension,
    /// Directory the phases ran against.
    pub working_root: PathBuf,
    /// Final project directory.
    pub destination: PathBuf,
    pub workspace: Workspace,
    pub prune: PruneReport,
    pub promotion: Promotion,
    pub root_page: RootPageCleared,
    /// Present when the result was merged into an existing destination.
    pub merge: Option<MergeReport>,
}

/// Run the whole customization.
pub fn run_setup(
    template_root: &Path,
    catalog: &Catalog,
    request: &SetupRequest,
) -> Result<SetupReport, SetupError> {
    let selection = catalog.select(&request.homepage)?;
    if !template_root.is_dir() {
        return Err(SetupError::TemplateNotFound(template_root.to_path_buf()));
    }
    let ext = FileExtension::detect(template_root);

    let (working_root, destination, workspace) = prepare_workspace(template_root, request)?;

    let prune = prune::prune(
        &working_root,
        catalog,
        &selection,
        PruneOptions {
            keep_sections: request.keep_sections,
        },
    )?;
    let promotion = promote::promote(&working_root, catalog, &selection, ext)?;
    let root_page = cleanup::clear_root_page(&working_root, ext)?;

    let merge = match &workspace {
        Workspace::Staged { staging, .. } => Some(merge::merge_directories(staging, &destination)?),
        _ => None,
    };

    Ok(SetupReport {
        selection,
        ext,
        working_root,
        destination,
        workspace,
        prune,
        promotion,
        root_page,
        merge,
    })
}

/// Returns `(working root, final destination, workspace)`.
fn prepare_workspace(
    template_root: &Path,
    request: &SetupRequest,
) -> Result<(PathBuf, PathBuf, Workspace), SetupError> {
    let destination = match &request.mode {
        OutputMode::InPlace => {
            let root = template_root.to_path_buf();
            return Ok((root.clone(), root, Workspace::InPlace));
        }
        OutputMode::Copy { destination } => destination.clone(),
    };
    let filter = CopyFilter::new(request.exclude.iter().cloned());

    if !destination.exists() {
        let copy = copy::copy_tree(template_root, &destination, &filter)?;
        return Ok((destination.clone(), destination, Workspace::Copied { copy }));
    }

    let staging = staging_path(&destination);
    prune::remove_path(&staging).map_err(|source| SetupError::Staging {
        path: staging.clone(),
        source,
    })?;
    // The staging folder sits next to the destination, which may itself be
    // inside the template; keep both out of the copy.
    let filter = filter.skip_path(destination.clone());
    let copy = copy::copy_tree(template_root, &staging, &filter)?;
    Ok((
        staging.clone(),
        destination,
        Workspace::Staged { staging, copy },
    ))
}

/// `{destination}.staging`, next to the destination.
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".staging");
    destination.with_file_name(name)
}
