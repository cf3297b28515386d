//! Module tree indexing.
//!
//! A [`ModuleTree`] is an in-memory index of one directory's recursive file
//! listing, relative to its root. Entries are file leaves only; a "group"
//! is any path that is a strict ancestor of one or more leaves (`gcc` when
//! `gcc/11` and `gcc/12` exist). Trees are re-scanned at the start of each
//! command invocation rather than cached, so external filesystem changes
//! between commands are tolerated.
//!
//! Only presence and absence of relative paths is tracked; two trees with
//! the same leaf names are equal for difference purposes even if the leaf
//! contents differ.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Recursive leaf index of a module directory.
#[derive(Debug, Clone)]
pub struct ModuleTree {
    root: PathBuf,
    entries: BTreeSet<PathBuf>,
}

impl ModuleTree {
    /// Build a tree by recursively scanning `root`.
    ///
    /// A missing root yields an empty tree.
    pub fn scan(root: &Path) -> Result<Self> {
        let mut entries = BTreeSet::new();
        if root.is_dir() {
            collect_leaves(root, root, &mut entries)?;
        }
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// The scanned root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of leaf entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` names a leaf module exactly.
    pub fn is_leaf(&self, path: &Path) -> bool {
        self.entries.contains(path)
    }

    /// Whether `path` is a strict ancestor of one or more leaves.
    pub fn is_group(&self, path: &Path) -> bool {
        self.entries
            .iter()
            .any(|leaf| leaf != path && leaf.starts_with(path))
    }

    /// Whether `path` names a leaf or a group.
    pub fn contains(&self, path: &Path) -> bool {
        self.is_leaf(path) || self.is_group(path)
    }

    /// All leaves in sorted order.
    pub fn leaves(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// Leaves equal to or descended from `filter`, in sorted order.
    /// With no filter, all leaves.
    pub fn leaves_under(&self, filter: Option<&Path>) -> Vec<PathBuf> {
        match filter {
            None => self.entries.iter().cloned().collect(),
            Some(path) => self
                .entries
                .iter()
                .filter(|leaf| leaf.as_path() == path || leaf.starts_with(path))
                .cloned()
                .collect(),
        }
    }

    /// Leaves present in `self` but absent in `other`, as a new tree over
    /// the same root. Pure set difference on relative paths.
    pub fn difference(&self, other: &ModuleTree) -> ModuleTree {
        ModuleTree {
            root: self.root.clone(),
            entries: self.entries.difference(&other.entries).cloned().collect(),
        }
    }

    /// Absolute path of a relative leaf under this tree's root.
    pub fn abs_path(&self, leaf: &Path) -> PathBuf {
        self.root.join(leaf)
    }

    /// Record a leaf in the in-memory index.
    pub fn insert(&mut self, leaf: &Path) {
        self.entries.insert(leaf.to_path_buf());
    }

    /// Drop a leaf from the in-memory index.
    pub fn remove(&mut self, leaf: &Path) {
        self.entries.remove(leaf);
    }
}

fn collect_leaves(root: &Path, dir: &Path, entries: &mut BTreeSet<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Symlinks to files are leaves; only real directories recurse.
        if entry.file_type()?.is_dir() {
            collect_leaves(root, &path, entries)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            entries.insert(relative.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree_with(leaves: &[&str]) -> (TempDir, ModuleTree) {
        let temp = TempDir::new().unwrap();
        for leaf in leaves {
            let path = temp.path().join(leaf);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        let tree = ModuleTree::scan(temp.path()).unwrap();
        (temp, tree)
    }

    #[test]
    fn scan_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let tree = ModuleTree::scan(&temp.path().join("missing")).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn scan_indexes_leaves_relative_to_root() {
        let (_temp, tree) = tree_with(&["gcc/11", "gcc/12", "clang/15"]);
        assert_eq!(tree.len(), 3);
        assert!(tree.is_leaf(Path::new("gcc/11")));
        assert!(!tree.is_leaf(Path::new("gcc")));
    }

    #[test]
    fn group_is_strict_ancestor_of_leaves() {
        let (_temp, tree) = tree_with(&["gcc/11", "gcc/12"]);
        assert!(tree.is_group(Path::new("gcc")));
        assert!(!tree.is_group(Path::new("gcc/11")));
        assert!(!tree.is_group(Path::new("clang")));
    }

    #[test]
    fn contains_accepts_leaves_and_groups() {
        let (_temp, tree) = tree_with(&["gcc/11"]);
        assert!(tree.contains(Path::new("gcc")));
        assert!(tree.contains(Path::new("gcc/11")));
        assert!(!tree.contains(Path::new("gcc/12")));
    }

    #[test]
    fn leaves_under_filters_to_descendants() {
        let (_temp, tree) = tree_with(&["gcc/11", "gcc/12", "clang/15"]);
        let under_gcc = tree.leaves_under(Some(Path::new("gcc")));
        assert_eq!(
            under_gcc,
            vec![PathBuf::from("gcc/11"), PathBuf::from("gcc/12")]
        );

        let exact = tree.leaves_under(Some(Path::new("clang/15")));
        assert_eq!(exact, vec![PathBuf::from("clang/15")]);

        let all = tree.leaves_under(None);
        assert_eq!(all.len(), 3);
        // Lexicographic ordering.
        assert_eq!(all[0], PathBuf::from("clang/15"));
    }

    #[test]
    fn difference_with_self_is_empty() {
        let (_temp, tree) = tree_with(&["gcc/11", "gcc/12"]);
        assert!(tree.difference(&tree).is_empty());
    }

    #[test]
    fn difference_with_empty_is_identity() {
        let (_temp, tree) = tree_with(&["gcc/11", "gcc/12"]);
        let empty_temp = TempDir::new().unwrap();
        let empty = ModuleTree::scan(empty_temp.path()).unwrap();

        let diff = tree.difference(&empty);
        assert_eq!(diff.leaves_under(None), tree.leaves_under(None));
    }

    #[test]
    fn difference_excludes_shared_leaves() {
        let (_a_temp, a) = tree_with(&["gcc/11", "gcc/12", "clang/15"]);
        let (_b_temp, b) = tree_with(&["gcc/12"]);

        let diff = a.difference(&b);
        let leaves = diff.leaves_under(None);
        assert_eq!(
            leaves,
            vec![PathBuf::from("clang/15"), PathBuf::from("gcc/11")]
        );
        for leaf in b.leaves() {
            assert!(!diff.is_leaf(leaf));
        }
    }

    #[test]
    fn difference_is_name_based_not_content_based() {
        let a_temp = TempDir::new().unwrap();
        fs::create_dir_all(a_temp.path().join("gcc")).unwrap();
        fs::write(a_temp.path().join("gcc/12"), "contents a").unwrap();
        let b_temp = TempDir::new().unwrap();
        fs::create_dir_all(b_temp.path().join("gcc")).unwrap();
        fs::write(b_temp.path().join("gcc/12"), "different contents").unwrap();

        let a = ModuleTree::scan(a_temp.path()).unwrap();
        let b = ModuleTree::scan(b_temp.path()).unwrap();
        assert!(a.difference(&b).is_empty());
    }

    #[test]
    fn insert_and_remove_update_the_index() {
        let (_temp, mut tree) = tree_with(&["gcc/11"]);
        tree.insert(Path::new("gcc/12"));
        assert!(tree.is_leaf(Path::new("gcc/12")));
        tree.remove(Path::new("gcc/11"));
        assert!(!tree.is_leaf(Path::new("gcc/11")));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn symlink_leaves_are_indexed() {
        let target_temp = TempDir::new().unwrap();
        fs::write(target_temp.path().join("real"), "").unwrap();

        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("gcc")).unwrap();
        std::os::unix::fs::symlink(
            target_temp.path().join("real"),
            temp.path().join("gcc/12"),
        )
        .unwrap();

        let tree = ModuleTree::scan(temp.path()).unwrap();
        assert!(tree.is_leaf(Path::new("gcc/12")));
    }
}
