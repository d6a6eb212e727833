//! Naming-convention translation from catalog entries to template paths.
//!
//! Everything here is pure path arithmetic except [`FileExtension::detect`].
//! Pruning and promotion call into this module for every path they touch, so
//! the folder conventions live in exactly one place:
//!
//! | Function | Result |
//! |----------|--------|
//! | [`content_path`] | `src/pages-sections/{id}` |
//! | [`layout_container_path`] | `src/app/(group)` or `src/app/{folder}` |
//! | [`variant_folder_path`] | `src/app/(group)/{id}` (route groups only) |
//! | [`nested_page_path`] | `src/app/(group)/{id}/page.{ext}` (route groups only) |
//! | [`named_page_path`] | `src/app/{folder}/page.{ext}` (named folders only) |
//! | [`root_page_path`] | `src/app/page.{ext}` |

use crate::catalog::LayoutGroupRef;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SECTIONS_DIR: &str = "src/pages-sections";
const APP_DIR: &str = "src/app";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("'{layout}' is not a route group; '{id}' has no nested page folder")]
    InvalidRefKind { id: String, layout: String },
}

/// Source extension used by the template's page files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExtension {
    Tsx,
    Jsx,
}

impl FileExtension {
    /// TypeScript templates carry `src/app/layout.tsx`; anything else is
    /// treated as JavaScript.
    pub fn detect(template_root: &Path) -> Self {
        if template_root.join(APP_DIR).join("layout.tsx").is_file() {
            Self::Tsx
        } else {
            Self::Jsx
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tsx => "tsx",
            Self::Jsx => "jsx",
        }
    }

    /// `page.tsx` / `page.jsx`.
    pub fn page_file(self) -> String {
        format!("page.{}", self.as_str())
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `src/app` under the working root.
pub fn app_dir(root: &Path) -> PathBuf {
    root.join(APP_DIR)
}

/// Per-variant content folder.
pub fn content_path(root: &Path, id: &str) -> PathBuf {
    root.join(SECTIONS_DIR).join(id)
}

/// Folder that owns a variant's route, in its on-disk form.
pub fn layout_container_path(root: &Path, layout: &LayoutGroupRef) -> PathBuf {
    app_dir(root).join(layout.folder_name())
}

/// A route-group variant's own subfolder inside the shared container.
pub fn variant_folder_path(
    root: &Path,
    layout: &LayoutGroupRef,
    id: &str,
) -> Result<PathBuf, PathError> {
    match layout {
        LayoutGroupRef::RouteGroup(_) => Ok(layout_container_path(root, layout).join(id)),
        LayoutGroupRef::NamedFolder(_) => Err(PathError::InvalidRefKind {
            id: id.to_string(),
            layout: layout.folder_name(),
        }),
    }
}

/// Page file of a route-group variant.
pub fn nested_page_path(
    root: &Path,
    layout: &LayoutGroupRef,
    id: &str,
    ext: FileExtension,
) -> Result<PathBuf, PathError> {
    Ok(variant_folder_path(root, layout, id)?.join(ext.page_file()))
}

/// Page file directly inside a named folder.
///
/// Returns `None` for route groups, whose pages live one level deeper.
pub fn named_page_path(root: &Path, layout: &LayoutGroupRef, ext: FileExtension) -> Option<PathBuf> {
    match layout {
        LayoutGroupRef::NamedFolder(_) => {
            Some(layout_container_path(root, layout).join(ext.page_file()))
        }
        LayoutGroupRef::RouteGroup(_) => None,
    }
}

/// The template's default root page.
pub fn root_page_path(root: &Path, ext: FileExtension) -> PathBuf {
    app_dir(root).join(ext.page_file())
}

/// Render `path` relative to `root` for display; falls back to the full path.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn group(name: &str) -> LayoutGroupRef {
        LayoutGroupRef::RouteGroup(name.into())
    }

    fn named(name: &str) -> LayoutGroupRef {
        LayoutGroupRef::NamedFolder(name.into())
    }

    #[test]
    fn content_path_under_pages_sections() {
        assert_eq!(
            content_path(Path::new("/t"), "fashion-1"),
            PathBuf::from("/t/src/pages-sections/fashion-1")
        );
    }

    #[test]
    fn layout_container_bracketed_for_route_group() {
        assert_eq!(
            layout_container_path(Path::new("/t"), &group("layout-1")),
            PathBuf::from("/t/src/app/(layout-1)")
        );
    }

    #[test]
    fn layout_container_plain_for_named_folder() {
        assert_eq!(
            layout_container_path(Path::new("/t"), &named("furniture-3")),
            PathBuf::from("/t/src/app/furniture-3")
        );
    }

    #[test]
    fn nested_page_inside_variant_folder() {
        let path =
            nested_page_path(Path::new("/t"), &group("layout-1"), "market-2", FileExtension::Jsx)
                .unwrap();
        assert_eq!(path, PathBuf::from("/t/src/app/(layout-1)/market-2/page.jsx"));
    }

    #[test]
    fn nested_page_rejects_named_folder() {
        let err = nested_page_path(
            Path::new("/t"),
            &named("grocery-4"),
            "grocery-4",
            FileExtension::Tsx,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidRefKind {
                id: "grocery-4".into(),
                layout: "grocery-4".into(),
            }
        );
    }

    #[test]
    fn variant_folder_rejects_named_folder() {
        assert!(variant_folder_path(Path::new("/t"), &named("x"), "x").is_err());
    }

    #[test]
    fn named_page_only_for_named_folders() {
        assert_eq!(
            named_page_path(Path::new("/t"), &named("gadget-3"), FileExtension::Tsx),
            Some(PathBuf::from("/t/src/app/gadget-3/page.tsx"))
        );
        assert_eq!(
            named_page_path(Path::new("/t"), &group("layout-2"), FileExtension::Tsx),
            None
        );
    }

    #[test]
    fn root_page_uses_extension() {
        assert_eq!(
            root_page_path(Path::new("/t"), FileExtension::Tsx),
            PathBuf::from("/t/src/app/page.tsx")
        );
    }

    #[test]
    fn detect_tsx_from_root_layout() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/app")).unwrap();
        std::fs::write(tmp.path().join("src/app/layout.tsx"), "").unwrap();
        assert_eq!(FileExtension::detect(tmp.path()), FileExtension::Tsx);
    }

    #[test]
    fn detect_falls_back_to_jsx() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/app")).unwrap();
        std::fs::write(tmp.path().join("src/app/layout.jsx"), "").unwrap();
        assert_eq!(FileExtension::detect(tmp.path()), FileExtension::Jsx);
    }

    #[test]
    fn display_relative_strips_root() {
        assert_eq!(
            display_relative(Path::new("/t/src/app/page.tsx"), Path::new("/t")),
            "src/app/page.tsx"
        );
        assert_eq!(
            display_relative(Path::new("/elsewhere/x"), Path::new("/t")),
            "/elsewhere/x"
        );
    }
}
