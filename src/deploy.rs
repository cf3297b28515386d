//! Deployment-state reconciliation.
//!
//! The available and deployed trees are two comparably-named file-tree
//! sets. Deployment is a symlink lifecycle: for every deployed leaf `p`,
//! the entry at `deployed/<p>` must be a symlink pointing at
//! `available/<p>`. A deployed entry that is a regular file violates that
//! invariant and is refused for withdrawal rather than deleted.
//!
//! Nothing here is transactional. Every step checks current state and
//! no-ops when already satisfied, so an interrupted run is repaired by
//! running the same command again. Races with external deletion are logged
//! and treated as already satisfied. Batch operations iterate leaves in
//! lexicographic order and report per-item errors without aborting the
//! remainder of the batch.

use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::error::{ModfarmError, Result};
use crate::paths::Roots;
use crate::tree::ModuleTree;

/// Available/deployed counts for `summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub available: usize,
    pub deployed: usize,
}

/// Outcome of a batch operation: leaves affected plus per-item failures.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Leaves deployed or withdrawn, in processing order.
    pub affected: Vec<PathBuf>,
    /// Leaves that failed, with the error for each.
    pub errors: Vec<(PathBuf, ModfarmError)>,
}

impl BatchReport {
    /// Whether every item succeeded.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Orchestrates the available and deployed trees.
///
/// Both trees are scanned once at construction and kept consistent
/// in-memory for the duration of one command invocation. The manager is
/// the sole writer to the deployed tree.
pub struct DeploymentManager {
    roots: Roots,
    available: ModuleTree,
    deployed: ModuleTree,
}

impl DeploymentManager {
    /// Scan both trees under the given roots.
    pub fn new(roots: Roots) -> Result<Self> {
        let available = ModuleTree::scan(&roots.available)?;
        let deployed = ModuleTree::scan(&roots.deployed)?;
        Ok(Self {
            roots,
            available,
            deployed,
        })
    }

    /// The available tree index.
    pub fn available(&self) -> &ModuleTree {
        &self.available
    }

    /// The deployed tree index.
    pub fn deployed(&self) -> &ModuleTree {
        &self.deployed
    }

    /// Available/deployed counts.
    pub fn summary(&self) -> Summary {
        Summary {
            available: self.available.len(),
            deployed: self.deployed.len(),
        }
    }

    /// Shell instruction exposing the deployed tree to the module loader.
    pub fn install_hint(&self) -> String {
        format!(
            "If using LMOD, modify .bashrc to include:\n\n\
             export MODULEPATH=\"{}:$MODULEPATH\"\n",
            self.roots.deployed.display()
        )
    }

    /// Deploy a leaf or group path from the available tree.
    ///
    /// Returns the leaves newly deployed; already-deployed leaves are
    /// skipped silently. Fails with [`ModfarmError::UnknownModule`] when
    /// `path` is not available at all.
    pub fn deploy(&mut self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.available.contains(path) {
            return Err(ModfarmError::UnknownModule {
                name: path.display().to_string(),
            });
        }

        let mut deployed_now = Vec::new();
        for leaf in self.available.leaves_under(Some(path)) {
            if self.deployed.is_leaf(&leaf) {
                continue;
            }

            let link = self.deployed.abs_path(&leaf);
            let target = self.available.abs_path(&leaf);
            if let Some(parent) = link.parent() {
                fs::create_dir_all(parent)?;
            }
            symlink(&target, &link)?;
            tracing::debug!("Deployed {}", leaf.display());

            self.deployed.insert(&leaf);
            deployed_now.push(leaf);
        }
        Ok(deployed_now)
    }

    /// Withdraw a leaf or group path from the deployed tree.
    ///
    /// A path not deployed at all is a no-op. A deployed leaf that is not
    /// a symlink fails with [`ModfarmError::InvariantViolation`] and is
    /// left untouched. Returns the leaves withdrawn.
    pub fn withdraw(&mut self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.deployed.contains(path) {
            return Ok(Vec::new());
        }

        let mut withdrawn = Vec::new();
        for leaf in self.deployed.leaves_under(Some(path)) {
            let link = self.deployed.abs_path(&leaf);
            if !is_symlink(&link) {
                return Err(ModfarmError::InvariantViolation { path: link });
            }

            remove_file_tolerant(&link)?;
            tracing::debug!("Withdrew {}", leaf.display());
            self.deployed.remove(&leaf);
            prune_empty_ancestors(&link, &self.roots.deployed);
            withdrawn.push(leaf);
        }
        Ok(withdrawn)
    }

    /// Deploy every available leaf not currently deployed, in sorted order.
    pub fn auto_deploy(&mut self) -> BatchReport {
        let mut report = BatchReport::default();
        let pending = self.available.difference(&self.deployed);
        for leaf in pending.leaves_under(None) {
            match self.deploy(&leaf) {
                Ok(deployed) => report.affected.extend(deployed),
                Err(e) => report.errors.push((leaf, e)),
            }
        }
        report
    }

    /// Withdraw every deployed leaf, in sorted order.
    pub fn withdraw_all(&mut self) -> BatchReport {
        let mut report = BatchReport::default();
        for leaf in self.deployed.leaves_under(None) {
            match self.withdraw(&leaf) {
                Ok(withdrawn) => report.affected.extend(withdrawn),
                Err(e) => report.errors.push((leaf, e)),
            }
        }
        report
    }

    /// Delete the symlink farm and every available module definition,
    /// withdrawing deployed counterparts first so no deployed symlink is
    /// left dangling.
    pub fn clean_generated(&mut self) -> BatchReport {
        let mut report = BatchReport::default();

        if let Err(e) = remove_dir_all_tolerant(&self.roots.symlinks) {
            report.errors.push((self.roots.symlinks.clone(), e));
        }

        for leaf in self.available.leaves_under(None) {
            if self.deployed.is_leaf(&leaf) {
                if let Err(e) = self.withdraw(&leaf) {
                    report.errors.push((leaf, e));
                    continue;
                }
            }

            let path = self.available.abs_path(&leaf);
            match remove_file_tolerant(&path) {
                Ok(()) => {
                    self.available.remove(&leaf);
                    prune_empty_ancestors(&path, &self.roots.available);
                    report.affected.push(leaf);
                }
                Err(e) => report.errors.push((leaf, e)),
            }
        }
        report
    }
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Unlink a file, treating an already-vanished entry as satisfied.
fn remove_file_tolerant(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("{} vanished before removal", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove a directory tree, treating an absent root as satisfied.
fn remove_dir_all_tolerant(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Remove now-empty ancestor directories of a deleted leaf, stopping at the
/// first non-empty directory. The tree root itself is never deleted.
fn prune_empty_ancestors(leaf: &Path, root: &Path) {
    let mut current = leaf.parent();
    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        match fs::read_dir(dir) {
            Ok(mut entries) => {
                if entries.next().is_some() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                current = dir.parent();
                continue;
            }
            Err(_) => break,
        }
        match fs::remove_dir(dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            // Lost a race with a concurrent write; the directory is in use.
            Err(_) => break,
        }
        current = dir.parent();
    }
}
