//! Normalized symlink farm construction.
//!
//! Irregularly named binaries (`gcc-12`, `g++-12`) are exposed under a
//! per-version directory of fixed names (`symlinks/gcc/12/gcc`) so a single
//! `prepend-path PATH` line can address the whole toolchain version.
//!
//! Building is idempotent: existing links are never overwritten, and a
//! source that vanished between scan and link is skipped. A mandatory
//! dependency missing for a resolved version means the resolver and builder
//! have drifted apart and is a hard error rather than a silent skip.

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::catalog::Application;
use crate::error::{ModfarmError, Result};
use crate::resolve::Resolution;

/// Outcome of one farm build for one application.
#[derive(Debug, Default)]
pub struct FarmOutcome {
    /// Symlinks created by this build, in creation order.
    pub created: Vec<PathBuf>,
    /// Per-version symlink directory, for `{symlink_dir}` substitution.
    pub symlink_dirs: BTreeMap<String, PathBuf>,
}

/// Build the symlink farm for one application under `symlinks_root`.
pub fn build_farm(
    symlinks_root: &Path,
    application: &Application,
    resolution: &Resolution,
) -> Result<FarmOutcome> {
    let mut outcome = FarmOutcome::default();
    let app_dir = symlinks_root.join(&application.name);

    for version in &resolution.versions {
        for (index, dependency) in application.dependencies.iter().enumerate() {
            if !dependency.symlink_required {
                continue;
            }

            let version_dir = app_dir.join(version);
            fs::create_dir_all(&version_dir)?;

            match resolution.scan_for(index).get(version) {
                Some(entry) => {
                    outcome
                        .symlink_dirs
                        .insert(version.clone(), version_dir.clone());

                    let link = version_dir.join(&dependency.name);
                    // Never overwrite; a dangling pre-existing link counts
                    // as existing too.
                    if link.symlink_metadata().is_ok() {
                        continue;
                    }
                    if !entry.path.exists() {
                        tracing::warn!(
                            "{}:{} {} vanished after scan, skipping link",
                            application.name,
                            dependency.name,
                            entry.path.display()
                        );
                        continue;
                    }
                    symlink(&entry.path, &link)?;
                    outcome.created.push(link);
                }
                None if dependency.optional => {
                    tracing::debug!(
                        "{}: optional {} {} not found, continuing",
                        application.name,
                        dependency.name,
                        version
                    );
                }
                None => {
                    return Err(ModfarmError::DependencyMissing {
                        application: application.name.clone(),
                        dependency: dependency.name.clone(),
                        version: version.clone(),
                    });
                }
            }
        }
    }

    Ok(outcome)
}
