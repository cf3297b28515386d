//! modfarm - Generate and deploy environment-module definitions for
//! versioned toolchains.
//!
//! modfarm discovers installed versions of compilers, build tools, and
//! profilers, synthesizes version-pinned module definitions for them, and
//! manages which definitions are deployed (visible to an environment-module
//! loader such as Lmod) versus merely available (generated but inactive).
//!
//! # Modules
//!
//! - [`catalog`] - Static application catalog (built-in table or catalog.yml)
//! - [`cli`] - Command-line interface and argument parsing
//! - [`deploy`] - Deployment-state reconciliation between trees
//! - [`error`] - Error types and result aliases
//! - [`farm`] - Normalized symlink farm construction
//! - [`generate`] - Generation orchestration across the catalog
//! - [`modulefile`] - Module definition rendering and writing
//! - [`paths`] - Installation root layout
//! - [`resolve`] - Application version resolution
//! - [`scan`] - Version discovery in scan directories
//! - [`tree`] - Module tree indexing and set difference
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use modfarm::deploy::DeploymentManager;
//! use modfarm::paths::Roots;
//!
//! let mut manager = DeploymentManager::new(Roots::new(Path::new("/opt/mods"))).unwrap();
//! let report = manager.auto_deploy();
//! assert!(report.ok());
//! ```

pub mod catalog;
pub mod cli;
pub mod deploy;
pub mod error;
pub mod farm;
pub mod generate;
pub mod modulefile;
pub mod paths;
pub mod resolve;
pub mod scan;
pub mod tree;
pub mod ui;

pub use error::{ModfarmError, Result};
