//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what a run did to each homepage variant, identified by
//! positional index and id. Filesystem paths are secondary context on indented
//! `Path:` lines, relative to the directory the run worked in.
//!
//! # Output Format
//!
//! ## Setup
//!
//! ```text
//! Workspace
//!     Copied 412 files → /work/bazaar-starter
//!     Skipped: .git, node_modules
//! Sections
//!     001 fashion-2 removed
//!         Path: src/pages-sections/fashion-2
//!     002 landing (already absent)
//! Layouts
//!     001 fashion-2 removed
//!         Path: src/app/(layout-1)/fashion-2
//!     002 furniture-3 removed
//!         Path: src/app/furniture-3
//! Promotion
//!     fashion-1 page moved
//!         From: src/app/(layout-1)/fashion-1/page.tsx
//!         To:   src/app/(layout-1)/page.tsx
//! Root page
//!     src/app/page.tsx removed
//! ```
//!
//! ## List
//!
//! ```text
//! 001 fashion-1
//!     Layout: (layout-1), shared with 5 others
//! 006 furniture-3
//!     Layout: furniture-3
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::catalog::Catalog;
use crate::check::CheckFinding;
use crate::merge::MergeReport;
use crate::paths::display_relative;
use crate::promote::Promotion;
use crate::prune::{PruneReport, Removal, RemovalKind, RemovalStatus};
use crate::setup::{SetupReport, Workspace};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for one removal.
///
/// ```text
/// 001 fashion-2 removed
/// 002 landing (already absent)
/// ```
fn removal_line(index: usize, removal: &Removal) -> String {
    match removal.status {
        RemovalStatus::Removed => format!("{} {} removed", format_index(index), removal.id),
        RemovalStatus::AlreadyAbsent => {
            format!("{} {} (already absent)", format_index(index), removal.id)
        }
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Setup
// ============================================================================

/// Format the removals of one kind group under a heading.
///
/// Removed paths get a `Path:` context line; absent ones don't, there is
/// nothing to point at.
fn format_removals<'a>(
    heading: &str,
    removals: impl Iterator<Item = &'a Removal>,
    root: &Path,
) -> Vec<String> {
    let mut lines = vec![heading.to_string()];
    let mut any = false;
    for (i, removal) in removals.enumerate() {
        any = true;
        lines.push(format!("{}{}", indent(1), removal_line(i + 1, removal)));
        if removal.status == RemovalStatus::Removed {
            lines.push(format!(
                "{}Path: {}",
                indent(2),
                display_relative(&removal.path, root)
            ));
        }
    }
    if !any {
        lines.push(format!("{}(nothing to remove)", indent(1)));
    }
    lines
}

/// Format the pruning pass: sections first, then layouts.
pub fn format_prune_output(report: &PruneReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if report.sections_kept {
        lines.push("Sections".to_string());
        lines.push(format!("{}(kept)", indent(1)));
    } else {
        lines.extend(format_removals(
            "Sections",
            report
                .removals
                .iter()
                .filter(|r| r.kind == RemovalKind::Section),
            root,
        ));
    }

    lines.extend(format_removals(
        "Layouts",
        report
            .removals
            .iter()
            .filter(|r| r.kind != RemovalKind::Section),
        root,
    ));
    lines
}

/// Format what promotion changed.
pub fn format_promotion(promotion: &Promotion, root: &Path) -> Vec<String> {
    let mut lines = vec!["Promotion".to_string()];
    match promotion {
        Promotion::Unchanged => {
            lines.push(format!("{}landing selected, layout unchanged", indent(1)));
        }
        Promotion::PageMoved { id, from, to, .. } => {
            lines.push(format!("{}{} page moved", indent(1), id));
            lines.push(format!("{}From: {}", indent(2), display_relative(from, root)));
            lines.push(format!("{}To:   {}", indent(2), display_relative(to, root)));
        }
        Promotion::FolderRenamed { id, from, to } => {
            lines.push(format!("{}{} folder renamed", indent(1), id));
            lines.push(format!("{}From: {}", indent(2), display_relative(from, root)));
            lines.push(format!("{}To:   {}", indent(2), display_relative(to, root)));
        }
    }
    lines
}

/// Format a merge summary line.
pub fn format_merge_summary(report: &MergeReport) -> String {
    format!(
        "{} moved ({} overwritten), {} created",
        plural(report.files_moved, "file", "files"),
        report.files_overwritten,
        plural(report.dirs_created, "directory", "directories"),
    )
}

/// Format the full setup run.
pub fn format_setup_output(report: &SetupReport) -> Vec<String> {
    let root = report.working_root.as_path();
    let mut lines = vec![format!(
        "Homepage: {} ({})",
        report.selection, report.ext
    )];

    lines.push("Workspace".to_string());
    match &report.workspace {
        Workspace::InPlace => {
            lines.push(format!("{}In place: {}", indent(1), report.destination.display()));
        }
        Workspace::Copied { copy } | Workspace::Staged { copy, .. } => {
            lines.push(format!(
                "{}Copied {} \u{2192} {}",
                indent(1),
                plural(copy.files_copied, "file", "files"),
                root.display()
            ));
            if !copy.skipped.is_empty() {
                let skipped: Vec<String> = copy
                    .skipped
                    .iter()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .collect();
                lines.push(format!("{}Skipped: {}", indent(1), skipped.join(", ")));
            }
        }
    }

    lines.extend(format_prune_output(&report.prune, root));
    lines.extend(format_promotion(&report.promotion, root));

    lines.push("Root page".to_string());
    let root_page = display_relative(&report.root_page.path, root);
    lines.push(match report.root_page.status {
        RemovalStatus::Removed => format!("{}{} removed", indent(1), root_page),
        RemovalStatus::AlreadyAbsent => format!("{}{} (already absent)", indent(1), root_page),
    });

    if let Some(merge) = &report.merge {
        lines.push("Merge".to_string());
        lines.push(format!(
            "{}{} \u{2192} {}",
            indent(1),
            format_merge_summary(merge),
            report.destination.display()
        ));
    }

    lines
}

/// Print setup output to stdout.
pub fn print_setup_output(report: &SetupReport) {
    for line in format_setup_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// List
// ============================================================================

/// Format the catalog, one entry per homepage, `landing` last.
pub fn format_catalog(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in catalog.entries().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.id));
        let shared = catalog.siblings(&entry.id, &entry.layout).count();
        let layout = if shared == 0 {
            format!("Layout: {}", entry.layout)
        } else {
            format!(
                "Layout: {}, shared with {}",
                entry.layout,
                plural(shared, "other", "others")
            )
        };
        lines.push(format!("{}{}", indent(1), layout));
    }
    lines.push(format!(
        "{} {}",
        format_index(catalog.len() + 1),
        crate::catalog::LANDING
    ));
    lines.push(format!("{}Layout: template default", indent(1)));
    lines
}

/// Print the catalog to stdout.
pub fn print_catalog(catalog: &Catalog) {
    for line in format_catalog(catalog) {
        println!("{}", line);
    }
}

/// Numbered choices for the interactive prompt: catalog ids, then `landing`.
pub fn format_choices(catalog: &Catalog) -> Vec<String> {
    catalog
        .section_ids()
        .enumerate()
        .map(|(i, id)| format!("{}{:>2}) {}", indent(1), i + 1, id))
        .collect()
}

// ============================================================================
// Check
// ============================================================================

/// Format template check findings.
pub fn format_check_output(findings: &[CheckFinding], root: &Path) -> Vec<String> {
    if findings.is_empty() {
        return vec!["Template matches the catalog".to_string()];
    }
    let mut lines = vec![format!(
        "{} found",
        plural(findings.len(), "problem", "problems")
    )];
    for (i, finding) in findings.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), finding));
        lines.push(format!(
            "{}Path: {}",
            indent(2),
            display_relative(finding.path(), root)
        ));
    }
    lines
}

/// Print template check findings to stdout.
pub fn print_check_output(findings: &[CheckFinding], root: &Path) {
    for line in format_check_output(findings, root) {
        println!("{}", line);
    }
}
