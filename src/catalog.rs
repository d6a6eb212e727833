//! The homepage catalog: which variants exist and which layout folder owns each.
//!
//! The storefront template ships many homepage variants side by side. Each one
//! has a content folder under `src/pages-sections/` and a route entry under
//! `src/app/`. How that route entry is laid out depends on the owning layout
//! group, written in the template in one of two conventions:
//!
//! ```text
//! src/app/
//! ├── (layout-1)/            # Route group: shared by several variants
//! │   ├── layout.tsx
//! │   ├── fashion-1/page.tsx
//! │   └── market-1/page.tsx
//! └── furniture-3/           # Named folder: owned by exactly one variant
//!     ├── layout.tsx
//!     └── page.tsx
//! ```
//!
//! The convention is parsed once, when the catalog is built, into a
//! [`LayoutGroupRef`]. Nothing downstream looks at parentheses again.
//!
//! The catalog is fixed data compiled into the binary ([`Catalog::builtin`]).
//! It is always passed explicitly, so tests substitute synthetic catalogs
//! through [`Catalog::new`].

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Sentinel selection: keep the template's own default page, no variant.
pub const LANDING: &str = "landing";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown homepage '{0}' (run `homepage-setup list` to see the catalog)")]
    UnknownHomepage(String),
    #[error("Homepage '{0}' appears more than once in the catalog")]
    DuplicateHomepage(String),
    #[error("'{LANDING}' is reserved and cannot be a catalog entry")]
    ReservedHomepage,
    #[error("Layout folder '{folder}' is claimed by both '{first}' and '{second}'")]
    SharedNamedFolder {
        folder: String,
        first: String,
        second: String,
    },
    #[error("Invalid layout name '{0}'")]
    InvalidLayout(String),
}

/// Layout group owning a homepage's route entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum LayoutGroupRef {
    /// Bracketed `(name)` folder shared by several variants, each in its own
    /// `{id}/page.{ext}` subfolder.
    RouteGroup(String),
    /// Plain `name` folder that belongs to one variant and holds its
    /// `page.{ext}` directly.
    NamedFolder(String),
}

impl LayoutGroupRef {
    /// Parse the template's folder convention: `(name)` is a route group,
    /// anything else a named folder.
    ///
    /// Empty names, unbalanced parentheses and path separators are rejected.
    pub fn parse(layout: &str) -> Result<Self, CatalogError> {
        let invalid = || CatalogError::InvalidLayout(layout.to_string());

        let (name, grouped) = match layout.strip_prefix('(') {
            Some(rest) => (rest.strip_suffix(')').ok_or_else(invalid)?, true),
            None => (layout, false),
        };

        if name.is_empty()
            || name.contains(['(', ')', '/', '\\'])
            || name == "."
            || name == ".."
        {
            return Err(invalid());
        }

        Ok(if grouped {
            Self::RouteGroup(name.to_string())
        } else {
            Self::NamedFolder(name.to_string())
        })
    }

    /// Bare group name, without brackets.
    pub fn name(&self) -> &str {
        match self {
            Self::RouteGroup(name) | Self::NamedFolder(name) => name,
        }
    }

    /// Folder name as it appears on disk under `src/app/`.
    pub fn folder_name(&self) -> String {
        match self {
            Self::RouteGroup(name) => bracketed(name),
            Self::NamedFolder(name) => name.clone(),
        }
    }

    pub fn is_route_group(&self) -> bool {
        matches!(self, Self::RouteGroup(_))
    }
}

impl fmt::Display for LayoutGroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.folder_name())
    }
}

/// Wrap a folder name in route-group brackets: `grocery-4` → `(grocery-4)`.
pub fn bracketed(name: &str) -> String {
    format!("({name})")
}

/// A selectable homepage variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub layout: LayoutGroupRef,
}

/// What a run keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The template's default landing page; every catalog variant goes.
    Landing,
    /// One catalog variant, promoted to the root route.
    Homepage(String),
}

impl Selection {
    /// Identifier as used for folder names (`landing` for the sentinel).
    pub fn id(&self) -> &str {
        match self {
            Self::Landing => LANDING,
            Self::Homepage(id) => id,
        }
    }

    /// True when `id` is the selected identifier.
    pub fn is(&self, id: &str) -> bool {
        self.id() == id
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ordered, validated table of homepage variants.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// `(id, layout folder)` pairs shipped with the template.
const BUILTIN: &[(&str, &str)] = &[
    ("fashion-1", "(layout-1)"),
    ("fashion-2", "(layout-1)"),
    ("fashion-3", "(layout-3)"),
    ("furniture-1", "(layout-1)"),
    ("furniture-2", "(layout-3)"),
    ("furniture-3", "furniture-3"),
    ("gift-shop", "(layout-3)"),
    ("gadget-1", "(layout-1)"),
    ("gadget-2", "(layout-3)"),
    ("gadget-3", "gadget-3"),
    ("grocery-1", "(layout-3)"),
    ("grocery-2", "(layout-2)"),
    ("grocery-3", "(layout-1)"),
    ("grocery-4", "grocery-4"),
    ("health-beauty", "(layout-2)"),
    ("market-1", "(layout-1)"),
    ("market-2", "(layout-1)"),
    ("medical", "(layout-3)"),
];

impl Catalog {
    /// Build a catalog from `(id, layout folder)` pairs.
    ///
    /// Enforces the ownership rules the engine relies on: ids are unique and
    /// never `landing`, and a named folder has exactly one owner.
    pub fn new<I, S, L>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: AsRef<str>,
    {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        // Folder name on disk → owning id, for named folders only.
        let mut named_owners: HashMap<String, String> = HashMap::new();

        for (id, layout) in pairs {
            let id = id.into();
            if id == LANDING {
                return Err(CatalogError::ReservedHomepage);
            }
            if entries.iter().any(|e| e.id == id) {
                return Err(CatalogError::DuplicateHomepage(id));
            }
            let layout = LayoutGroupRef::parse(layout.as_ref())?;

            if let LayoutGroupRef::NamedFolder(folder) = &layout {
                if let Some(first) = named_owners.get(folder) {
                    return Err(CatalogError::SharedNamedFolder {
                        folder: folder.clone(),
                        first: first.clone(),
                        second: id,
                    });
                }
                named_owners.insert(folder.clone(), id.clone());
            }

            entries.push(CatalogEntry { id, layout });
        }

        // A route group must not reuse a named folder's name: pruning the
        // named folder would take the whole group with it.
        for entry in &entries {
            let LayoutGroupRef::RouteGroup(name) = &entry.layout else {
                continue;
            };
            if let Some(owner) = named_owners.get(name) {
                return Err(CatalogError::SharedNamedFolder {
                    folder: name.clone(),
                    first: owner.clone(),
                    second: entry.id.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The catalog shipped with the storefront template.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().copied()).expect("built-in catalog must be valid")
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog ids followed by the `landing` sentinel: every content folder
    /// the template may contain.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.ids().chain(std::iter::once(LANDING))
    }

    /// Resolve a user-supplied identifier into a [`Selection`].
    ///
    /// Runs before anything touches the filesystem.
    pub fn select(&self, id: &str) -> Result<Selection, CatalogError> {
        let id = id.trim();
        if id == LANDING {
            return Ok(Selection::Landing);
        }
        self.get(id)
            .map(|e| Selection::Homepage(e.id.clone()))
            .ok_or_else(|| CatalogError::UnknownHomepage(id.to_string()))
    }

    /// Entry for a selection; `None` for landing.
    pub fn entry_for(&self, selection: &Selection) -> Option<&CatalogEntry> {
        match selection {
            Selection::Landing => None,
            Selection::Homepage(id) => self.get(id),
        }
    }

    /// Other entries sharing `layout`, excluding `id`.
    pub fn siblings<'a>(
        &'a self,
        id: &'a str,
        layout: &'a LayoutGroupRef,
    ) -> impl Iterator<Item = &'a CatalogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.id != id && &e.layout == layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_route_group() {
        assert_eq!(
            LayoutGroupRef::parse("(layout-1)").unwrap(),
            LayoutGroupRef::RouteGroup("layout-1".into())
        );
    }

    #[test]
    fn parse_named_folder() {
        assert_eq!(
            LayoutGroupRef::parse("grocery-4").unwrap(),
            LayoutGroupRef::NamedFolder("grocery-4".into())
        );
    }

    #[test]
    fn parse_rejects_malformed_names() {
        for bad in ["", "()", "(layout-1", "layout-1)", "a/b", "(a/b)", "..", "((x))"] {
            assert_eq!(
                LayoutGroupRef::parse(bad),
                Err(CatalogError::InvalidLayout(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn folder_name_follows_convention() {
        assert_eq!(
            LayoutGroupRef::RouteGroup("layout-3".into()).folder_name(),
            "(layout-3)"
        );
        assert_eq!(
            LayoutGroupRef::NamedFolder("gadget-3".into()).folder_name(),
            "gadget-3"
        );
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 18);
        assert_eq!(
            catalog.get("furniture-3").unwrap().layout,
            LayoutGroupRef::NamedFolder("furniture-3".into())
        );
        assert_eq!(
            catalog.get("medical").unwrap().layout,
            LayoutGroupRef::RouteGroup("layout-3".into())
        );
    }

    #[test]
    fn builtin_named_folders_are_owned_by_their_homepage() {
        for entry in Catalog::builtin().entries() {
            if let LayoutGroupRef::NamedFolder(name) = &entry.layout {
                assert_eq!(name, &entry.id);
            }
        }
    }

    #[test]
    fn select_known_homepage() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.select("fashion-2").unwrap(),
            Selection::Homepage("fashion-2".into())
        );
    }

    #[test]
    fn select_landing() {
        assert_eq!(Catalog::builtin().select("landing").unwrap(), Selection::Landing);
    }

    #[test]
    fn select_trims_whitespace() {
        assert_eq!(
            Catalog::builtin().select("  medical\n").unwrap(),
            Selection::Homepage("medical".into())
        );
    }

    #[test]
    fn select_unknown_is_error() {
        assert_eq!(
            Catalog::builtin().select("fashion-9"),
            Err(CatalogError::UnknownHomepage("fashion-9".into()))
        );
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = Catalog::new([("a", "(g)"), ("a", "(h)")]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateHomepage("a".into()));
    }

    #[test]
    fn landing_id_rejected() {
        let result = Catalog::new([("landing", "(g)")]);
        assert_eq!(result.unwrap_err(), CatalogError::ReservedHomepage);
    }

    #[test]
    fn shared_named_folder_rejected() {
        let result = Catalog::new([("a", "shop"), ("b", "shop")]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::SharedNamedFolder {
                folder: "shop".into(),
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn route_group_may_not_reuse_named_folder() {
        let result = Catalog::new([("a", "shop"), ("b", "(shop)")]);
        assert!(matches!(
            result,
            Err(CatalogError::SharedNamedFolder { .. })
        ));
    }

    #[test]
    fn route_groups_may_be_shared() {
        let catalog = Catalog::new([("a", "(g)"), ("b", "(g)"), ("c", "(g)")]).unwrap();
        let layout = catalog.get("a").unwrap().layout.clone();
        let siblings: Vec<&str> = catalog
            .siblings("a", &layout)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(siblings, vec!["b", "c"]);
    }

    #[test]
    fn section_ids_end_with_landing() {
        let catalog = Catalog::new([("a", "(g)"), ("b", "b")]).unwrap();
        let ids: Vec<&str> = catalog.section_ids().collect();
        assert_eq!(ids, vec!["a", "b", "landing"]);
    }

    #[test]
    fn entry_for_landing_is_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.entry_for(&Selection::Landing).is_none());
        assert!(catalog
            .entry_for(&Selection::Homepage("gift-shop".into()))
            .is_some());
    }

    #[test]
    fn catalog_serializes_as_list() {
        let catalog = Catalog::new([("a", "(g)"), ("b", "b")]).unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": "a", "layout": {"kind": "route_group", "name": "g"}},
                {"id": "b", "layout": {"kind": "named_folder", "name": "b"}},
            ])
        );
    }
}
