//! Template cloning for copy-to-new-directory mode.
//!
//! Walks the template with `walkdir` and reproduces it under a destination,
//! skipping build output and VCS folders by path component
//! (`node_modules`, `.next`, `.git` by default). The destination is always
//! skipped too: the default output folder lives inside the template root.
//! Further directories can be skipped by path with [`CopyFilter::skip_path`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to walk template: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What is never copied: names anywhere in the tree, and specific paths.
#[derive(Debug, Clone)]
pub struct CopyFilter {
    pub exclude: Vec<String>,
    /// Compared after canonicalization, so `./out` and `out` match.
    pub skip_paths: Vec<PathBuf>,
}

impl CopyFilter {
    pub fn new<I, S>(exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: exclude.into_iter().map(Into::into).collect(),
            skip_paths: Vec::new(),
        }
    }

    /// Also skip the directory at `path`.
    pub fn skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_paths.push(path.into());
        self
    }

    fn excludes(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.exclude.iter().any(|x| *x == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files_copied: usize,
    /// Top-level-most paths skipped by the filter, relative to the source.
    pub skipped: Vec<PathBuf>,
}

/// Copy `src` into `dest`, creating `dest` as needed.
pub fn copy_tree(src: &Path, dest: &Path, filter: &CopyFilter) -> Result<CopyReport, CopyError> {
    fs::create_dir_all(dest).map_err(|source| CopyError::Io {
        path: dest.to_path_buf(),
        source,
    })?;
    // Canonical forms so `./out` and `out` compare equal.
    let skip_dirs: Vec<PathBuf> = std::iter::once(dest)
        .chain(filter.skip_paths.iter().map(PathBuf::as_path))
        .map(absolute)
        .collect();

    let mut skipped = Vec::new();
    let mut files_copied = 0;

    let walker = WalkDir::new(src).sort_by_file_name().into_iter();
    let walker = walker.filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let skipped_dir =
            entry.file_type().is_dir() && skip_dirs.contains(&absolute(entry.path()));
        if !skipped_dir && !filter.excludes(entry) {
            return true;
        }
        if let Ok(rel) = entry.path().strip_prefix(src) {
            skipped.push(rel.to_path_buf());
        }
        false
    });

    for entry in walker {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| CopyError::Io {
                path: target.clone(),
                source,
            })?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| CopyError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            // Symlinks are followed: the copy gets the file they point to.
            fs::copy(entry.path(), &target).map_err(|source| CopyError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            files_copied += 1;
        }
    }

    Ok(CopyReport {
        files_copied,
        skipped,
    })
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
