//! Error types for modfarm operations.
//!
//! This module defines [`ModfarmError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ModfarmError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ModfarmError::Other`) for unexpected errors
//! - Per-module errors during batch operations (auto-deploy, withdraw-all,
//!   multi-name deploy/withdraw) are reported and the batch continues;
//!   structural errors (unreadable catalog, missing tree roots) abort the run

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for modfarm operations.
#[derive(Debug, Error)]
pub enum ModfarmError {
    /// Failed to parse the application catalog file.
    #[error("Failed to parse catalog at {path}: {message}")]
    CatalogParse { path: PathBuf, message: String },

    /// A mandatory dependency's binary vanished between resolution and
    /// linking, or the resolver and farm builder disagree about a version.
    #[error("{application}: missing version {version} of non-optional dependency {dependency}")]
    DependencyMissing {
        application: String,
        dependency: String,
        version: String,
    },

    /// A deploy target is not present in the available tree.
    #[error("Unknown module: {name}")]
    UnknownModule { name: String },

    /// A deployed entry is a regular file instead of a symlink. Withdrawal
    /// refuses to delete content it did not create.
    #[error("Refusing to withdraw {path}: deployed entry is not a symlink")]
    InvariantViolation { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for modfarm operations.
pub type Result<T> = std::result::Result<T, ModfarmError>;
