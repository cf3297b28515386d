//! Application version resolution.
//!
//! An application's resolvable versions are the intersection of its
//! mandatory dependencies' scanned version sets, unioned with the
//! intersection of its optional dependencies' version sets. Optional
//! dependencies therefore never constrain the mandatory axis, but a
//! self-consistent optional family can contribute versions of its own.
//!
//! Resolution results are kept apart from the static catalog: a
//! [`Resolution`] is produced fresh on every pass and the catalog types are
//! never mutated.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use regex::Regex;

use crate::catalog::{Application, Catalog};
use crate::paths::expand_tilde;
use crate::scan::{scan, ScanResult};
use crate::error::Result;

/// Resolution outcome for one application.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Versions for which every mandatory dependency is present.
    /// An empty set is a valid "nothing found" outcome, not an error.
    pub versions: BTreeSet<String>,
    /// Per-dependency scan results, parallel to the application's
    /// dependency list. Optional dependencies may lack entries for
    /// versions that are otherwise resolved; callers must re-check.
    pub scans: Vec<ScanResult>,
}

impl Resolution {
    /// Scan result for the dependency at `index`.
    pub fn scan_for(&self, index: usize) -> &ScanResult {
        &self.scans[index]
    }
}

/// Resolve one application by scanning each of its dependencies.
///
/// Scans are independent of each other. An application with zero mandatory
/// dependencies resolves through its optional families alone; one with no
/// dependencies at all resolves to nothing.
pub fn resolve(application: &Application) -> Result<Resolution> {
    let mut mandatory: Option<BTreeSet<String>> = None;
    let mut optional: Option<BTreeSet<String>> = None;
    let mut scans = Vec::with_capacity(application.dependencies.len());

    for dep in &application.dependencies {
        let pattern = Regex::new(&dep.pattern)
            .with_context(|| format!("{}:{}: invalid pattern", application.name, dep.name))?;
        let dir = expand_tilde(&dep.search_dir);
        let found = scan(&dir, &pattern)?;

        let keys: BTreeSet<String> = found.keys().cloned().collect();
        tracing::debug!(
            "{}:{}: {} version(s) in {}",
            application.name,
            dep.name,
            keys.len(),
            dir.display()
        );

        let bucket = if dep.optional {
            &mut optional
        } else {
            &mut mandatory
        };
        *bucket = Some(match bucket.take() {
            Some(acc) => acc.intersection(&keys).cloned().collect(),
            None => keys,
        });

        scans.push(found);
    }

    let mut versions = mandatory.unwrap_or_default();
    versions.extend(optional.unwrap_or_default());

    Ok(Resolution { versions, scans })
}

/// Resolve every application in the catalog, keyed by application name.
pub fn resolve_all(catalog: &Catalog) -> Result<BTreeMap<String, Resolution>> {
    let mut resolved = BTreeMap::new();
    for app in &catalog.applications {
        resolved.insert(app.name.clone(), resolve(app)?);
    }
    Ok(resolved)
}
