//! Version discovery in a single directory.
//!
//! A scan matches a pattern against the direct children of one directory
//! (non-recursive) and extracts a version string from the first capture
//! group. Absent directories are common and expected — an uninstalled
//! profiler simply yields no versions — so a missing directory is an empty
//! result, not an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;

/// One discovered filesystem entry for a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Version string captured from the filename.
    pub version: String,
    /// Canonicalized path to the entry (symlinks followed).
    pub path: PathBuf,
}

/// Versions discovered for one dependency, keyed by version string.
pub type ScanResult = BTreeMap<String, ScanEntry>;

/// Scan `dir` for children matching `pattern`.
///
/// The first capture group of `pattern` is taken as the version. If two
/// distinct filenames produce the same version string the later one wins.
/// Resolved paths are canonicalized so symlink farms built on top of the
/// result point at final targets rather than chaining indirection.
pub fn scan(dir: &Path, pattern: &Regex) -> Result<ScanResult> {
    let mut versions = ScanResult::new();

    if !dir.is_dir() {
        tracing::debug!("Scan directory {} does not exist", dir.display());
        return Ok(versions);
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let Some(caps) = pattern.captures(&name) else {
            continue;
        };
        let Some(version) = caps.get(1) else {
            continue;
        };
        let version = version.as_str().to_string();

        let path = entry.path();
        let path = fs::canonicalize(&path).unwrap_or(path);

        tracing::trace!("Matched {} as version {}", name, version);
        versions.insert(version.clone(), ScanEntry { version, path });
    }

    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn scan_extracts_versions_from_capture_group() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("gcc-11"), "").unwrap();
        fs::write(temp.path().join("gcc-12"), "").unwrap();
        fs::write(temp.path().join("gcc"), "").unwrap();

        let result = scan(temp.path(), &re(r"^gcc-([0-9]+)$")).unwrap();
        let versions: Vec<_> = result.keys().cloned().collect();
        assert_eq!(versions, vec!["11", "12"]);
    }

    #[test]
    fn scan_missing_directory_is_empty_not_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no-such-dir");

        let result = scan(&missing, &re(r"^cuda-([0-9.]+)$")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn scan_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("gcc-12"), "").unwrap();

        let result = scan(temp.path(), &re(r"^gcc-([0-9]+)$")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn scan_matches_directories_as_well_as_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("cuda-12.1")).unwrap();

        let result = scan(temp.path(), &re(r"^cuda-([0-9]+\.[0-9]+)$")).unwrap();
        assert_eq!(result["12.1"].version, "12.1");
    }

    #[test]
    fn scan_canonicalizes_symlinked_entries() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("gcc-12.real");
        fs::write(&real, "").unwrap();
        std::os::unix::fs::symlink(&real, temp.path().join("gcc-12")).unwrap();

        let result = scan(temp.path(), &re(r"^gcc-([0-9]+)$")).unwrap();
        assert_eq!(result["12"].path, fs::canonicalize(&real).unwrap());
    }
}
