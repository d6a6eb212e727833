//! Shared test utilities: synthetic template trees and tree assertions.
//!
//! [`build_template`] lays out a template the way the storefront ships it,
//! driven by a [`Catalog`], so engine tests can run against catalogs of any
//! shape without fixture directories.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = Catalog::new([("a", "(g)"), ("b", "b")]).unwrap();
//! let tmp = build_template(&catalog, FileExtension::Tsx);
//! assert_exists(tmp.path(), "src/app/(g)/a/page.tsx");
//! assert_exists(tmp.path(), "src/app/b/page.tsx");
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::catalog::{Catalog, LayoutGroupRef};
use crate::paths::{self, FileExtension};

// =========================================================================
// Fixture setup
// =========================================================================

/// Page body written for a variant; unique per id so moves can be traced.
pub fn page_body(id: &str) -> String {
    format!("export default function Page() {{ return <main>{id}</main>; }}\n")
}

/// Create a template tree for `catalog` in a fresh temp directory.
///
/// Layout:
/// - `src/app/layout.{ext}` and `src/app/page.{ext}` (root page)
/// - `src/pages-sections/{id}/index.{ext}` for every id and `landing`
/// - route groups: `src/app/(g)/layout.{ext}` + `src/app/(g)/{id}/page.{ext}`
/// - named folders: `src/app/{n}/layout.{ext}` + `src/app/{n}/page.{ext}`
pub fn build_template(catalog: &Catalog, ext: FileExtension) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_template(tmp.path(), catalog, ext);
    tmp
}

/// Write the template tree described in [`build_template`] under `root`.
pub fn write_template(root: &Path, catalog: &Catalog, ext: FileExtension) {
    write_file(&paths::app_dir(root).join(format!("layout.{ext}")), "root layout");
    write_file(&paths::root_page_path(root, ext), "root page");

    for id in catalog.section_ids() {
        write_file(
            &paths::content_path(root, id).join(format!("index.{ext}")),
            &format!("{id} sections"),
        );
    }

    for entry in catalog.entries() {
        let container = paths::layout_container_path(root, &entry.layout);
        write_file(&container.join(format!("layout.{ext}")), "group layout");
        let page = match &entry.layout {
            LayoutGroupRef::RouteGroup(_) => {
                paths::nested_page_path(root, &entry.layout, &entry.id, ext).unwrap()
            }
            LayoutGroupRef::NamedFolder(_) => {
                paths::named_page_path(root, &entry.layout, ext).unwrap()
            }
        };
        write_file(&page, &page_body(&entry.id));
    }
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Tree inspection
// =========================================================================

/// Every file under `root`, as `/`-separated relative paths.
pub fn file_set(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| paths::display_relative(e.path(), root))
        .collect()
}

/// Every file under `root` with its contents.
pub fn tree_snapshot(root: &Path) -> Vec<(String, String)> {
    file_set(root)
        .into_iter()
        .map(|rel| {
            let content = fs::read_to_string(root.join(&rel)).unwrap();
            (rel, content)
        })
        .collect()
}

pub fn assert_exists(root: &Path, rel: &str) {
    assert!(
        root.join(rel).exists(),
        "expected '{rel}' to exist. Files: {:?}",
        file_set(root)
    );
}

pub fn assert_absent(root: &Path, rel: &str) {
    assert!(
        !root.join(rel).exists(),
        "expected '{rel}' to be absent. Files: {:?}",
        file_set(root)
    );
}

/// Ids whose `pages-sections` folder is still present, in catalog order.
pub fn remaining_sections<'a>(root: &Path, catalog: &'a Catalog) -> Vec<&'a str> {
    catalog
        .section_ids()
        .filter(|id| paths::content_path(root, id).exists())
        .collect()
}
