//! # Homepage Setup
//!
//! Turns a storefront template that ships every homepage variant at once into
//! a project with exactly one homepage, served at `/`.
//!
//! # Architecture: Three Phases
//!
//! A run works on one directory tree (the template itself, or a copy of it)
//! and applies three phases in order:
//!
//! ```text
//! 1. Prune     delete every non-selected variant's sections and route folders
//! 2. Promote   move the selected variant's page to the root route
//! 3. Clean up  delete the template's default src/app/page.{ext}
//! ```
//!
//! All three are driven by the [`catalog`], a fixed table of variant ids and
//! the layout folder that owns each. Every path they touch comes from
//! [`paths`], so the template's folder conventions live in one module.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Variant table, layout-group parsing, selection validation |
//! | [`paths`] | Path conventions and file-extension detection |
//! | [`prune`] | Phase 1 — removes non-selected variants |
//! | [`promote`] | Phase 2 — moves the selected page to the root route |
//! | [`cleanup`] | Phase 3 — removes the default root page |
//! | [`merge`] | Recursive merge of one tree into another, source wins |
//! | [`copy`] | Template copy with name-based exclusions |
//! | [`setup`] | The full run, including output modes |
//! | [`check`] | Read-only catalog-vs-template comparison |
//! | [`config`] | `setup.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Parse the Folder Convention Once
//!
//! The template marks shared layout folders with brackets: `(layout-1)`.
//! [`catalog::LayoutGroupRef`] captures that when the catalog is built, and
//! pruning and promotion match on the enum instead of re-inspecting names.
//!
//! ## Explicit Inputs
//!
//! The catalog, the selection and the file extension are parameters of every
//! phase, never globals. The same engine runs against synthetic catalogs in
//! tests and against the built-in one from the CLI.
//!
//! ## Sequential, No Rollback
//!
//! Filesystem operations are issued one after another in catalog order, so
//! output is deterministic. A failure stops the run where it is; the tree is
//! left as it was at that point. Pruning can be rerun safely; promotion and
//! merging cannot.
//!
//! ## One Engine, Two Output Modes
//!
//! Copy mode and in-place mode differ only in which directory becomes the
//! working root ([`setup::OutputMode`]). When the copy destination already
//! exists, the customized tree is built in a staging directory and merged in
//! with [`merge::merge_directories`].

pub mod catalog;
pub mod check;
pub mod cleanup;
pub mod config;
pub mod copy;
pub mod merge;
pub mod output;
pub mod paths;
pub mod promote;
pub mod prune;
pub mod setup;

#[cfg(test)]
pub(crate) mod test_helpers;
