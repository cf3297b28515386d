//! Static application catalog.
//!
//! The catalog declares which toolchains modfarm looks for and how their
//! module definitions are rendered. It comes from either the built-in table
//! or an optional `catalog.yml` at the installation root.
//!
//! # Architecture
//!
//! - [`schema`] - Catalog value types (serde-backed)
//! - [`builtin`] - Compiled default catalog
//! - [`loader`] - File discovery, parsing, and pattern validation

pub mod builtin;
pub mod loader;
pub mod schema;

pub use builtin::builtin_catalog;
pub use loader::{load_catalog, CATALOG_FILE};
pub use schema::{Application, Catalog, Dependency, ModuleTemplate, VarAssignment};
