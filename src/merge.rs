//! Recursive directory merge with overwrite-on-collision.
//!
//! Used to fold a freshly customized tree into a project directory that
//! already exists. Every file of `src` ends up at the same relative path in
//! `dest`, replacing whatever was there; files only `dest` has are left
//! alone. `src` is removed at the end.
//!
//! The merge is not atomic. If it fails halfway, `dest` is partially
//! populated and `src` partially emptied. Point it at disposable sources only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Merge source is not a directory: {0}")]
    SourceNotDirectory(PathBuf),
    #[error("Failed to merge {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counts of what the merge did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Files moved into `dest`, overwritten ones included.
    pub files_moved: usize,
    /// Files in `dest` replaced by their `src` counterpart.
    pub files_overwritten: usize,
    /// Directories created under `dest`.
    pub dirs_created: usize,
}

/// Merge `src` into `dest`, then delete `src`.
///
/// `dest` is created when missing. Where one side has a file and the other a
/// directory of the same name, the `src` entry replaces the `dest` one.
pub fn merge_directories(src: &Path, dest: &Path) -> Result<MergeReport, MergeError> {
    if !src.is_dir() {
        return Err(MergeError::SourceNotDirectory(src.to_path_buf()));
    }
    let mut report = MergeReport::default();
    merge_into(src, dest, &mut report)?;
    Ok(report)
}

fn merge_into(src: &Path, dest: &Path, report: &mut MergeReport) -> Result<(), MergeError> {
    ensure_dir(dest, report)?;

    let mut entries: Vec<fs::DirEntry> = fs::read_dir(src)
        .and_then(|rd| rd.collect::<io::Result<Vec<_>>>())
        .map_err(|e| io_err(src, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| io_err(&src_path, e))?;

        if file_type.is_dir() {
            merge_into(&src_path, &dest_path, report)?;
        } else {
            let overwritten = match fs::symlink_metadata(&dest_path) {
                Ok(meta) if meta.is_dir() => {
                    fs::remove_dir_all(&dest_path).map_err(|e| io_err(&dest_path, e))?;
                    true
                }
                Ok(_) => true,
                Err(e) if e.kind() == io::ErrorKind::NotFound => false,
                Err(e) => return Err(io_err(&dest_path, e)),
            };
            move_file(&src_path, &dest_path).map_err(|e| io_err(&src_path, e))?;
            report.files_moved += 1;
            if overwritten {
                report.files_overwritten += 1;
            }
        }
    }

    fs::remove_dir_all(src).map_err(|e| io_err(src, e))
}

fn ensure_dir(dir: &Path, report: &mut MergeReport) -> Result<(), MergeError> {
    match fs::symlink_metadata(dir) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        // A file where src has a directory: src wins.
        Ok(_) => fs::remove_file(dir).map_err(|e| io_err(dir, e))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(dir, e)),
    }
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    report.dirs_created += 1;
    Ok(())
}

/// Move a file, replacing `to` if it exists.
///
/// Falls back to copy-then-delete when `rename` can't cross filesystems.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) if from.is_file() => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

fn io_err(path: &Path, source: io::Error) -> MergeError {
    MergeError::Io {
        path: path.to_path_buf(),
        source,
    }
}
