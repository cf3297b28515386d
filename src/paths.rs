//! Installation root layout.
//!
//! All filesystem state lives under one installation root:
//!
//! - `available/<app>/<version>` — generated module definition files
//! - `deployed/<app>/<version>` — symlinks into `available`
//! - `symlinks/<app>/<version>/<name>` — normalized tool symlinks
//!
//! The three roots are threaded explicitly through every component
//! constructor; nothing reads them from global state.

use std::path::{Path, PathBuf};

/// The three directory roots managed by modfarm.
#[derive(Debug, Clone)]
pub struct Roots {
    /// Generated module definitions, not yet visible to the loader.
    pub available: PathBuf,
    /// Symlinks exposing available modules to the loader's search path.
    pub deployed: PathBuf,
    /// Normalized per-version tool symlink farm.
    pub symlinks: PathBuf,
}

impl Roots {
    /// Derive the standard layout under an installation root.
    pub fn new(install_root: &Path) -> Self {
        Self {
            available: install_root.join("available"),
            deployed: install_root.join("deployed"),
            symlinks: install_root.join("symlinks"),
        }
    }
}

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Paths without a leading tilde are returned unchanged. If the home
/// directory cannot be determined the path is also returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
