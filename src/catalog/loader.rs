//! Catalog discovery and loading.
//!
//! A `catalog.yml` at the installation root replaces the built-in catalog
//! when present. There is no merging: the file either fully describes the
//! applications to manage or is absent.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::builtin::builtin_catalog;
use super::schema::Catalog;
use crate::error::{ModfarmError, Result};

/// Name of the optional catalog file at the installation root.
pub const CATALOG_FILE: &str = "catalog.yml";

/// Load the catalog for an installation root.
///
/// Reads `<root>/catalog.yml` when it exists, otherwise falls back to the
/// built-in catalog. Every dependency pattern is validated to compile and
/// to carry the version capture group before the catalog is returned.
pub fn load_catalog(install_root: &Path) -> Result<Catalog> {
    let path = install_root.join(CATALOG_FILE);
    let catalog = if path.exists() {
        tracing::debug!("Loading catalog from {}", path.display());
        parse_catalog_file(&path)?
    } else {
        builtin_catalog()
    };
    validate_patterns(&catalog, &path)?;
    Ok(catalog)
}

fn parse_catalog_file(path: &PathBuf) -> Result<Catalog> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ModfarmError::CatalogParse {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Reject patterns that do not compile or lack a version capture group.
fn validate_patterns(catalog: &Catalog, path: &Path) -> Result<()> {
    for app in &catalog.applications {
        for dep in &app.dependencies {
            let re = Regex::new(&dep.pattern).map_err(|e| ModfarmError::CatalogParse {
                path: path.to_path_buf(),
                message: format!("{}:{}: invalid pattern: {}", app.name, dep.name, e),
            })?;
            if re.captures_len() < 2 {
                return Err(ModfarmError::CatalogParse {
                    path: path.to_path_buf(),
                    message: format!(
                        "{}:{}: pattern has no version capture group",
                        app.name, dep.name
                    ),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let temp = TempDir::new().unwrap();
        let catalog = load_catalog(temp.path()).unwrap();
        assert!(catalog.has_application("gcc"));
        assert!(catalog.has_application("CUDA"));
    }

    #[test]
    fn catalog_file_replaces_builtin() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CATALOG_FILE),
            r#"
applications:
  - name: zig
    dependencies:
      - name: zig
        search_dir: /opt/zig
        pattern: "^zig-([0-9.]+)$"
    module:
      prepend_path:
        - var: PATH
          value: /opt/zig/zig-{version}/bin
"#,
        )
        .unwrap();

        let catalog = load_catalog(temp.path()).unwrap();
        assert!(catalog.has_application("zig"));
        assert!(!catalog.has_application("gcc"));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CATALOG_FILE), "applications: [{{").unwrap();

        let err = load_catalog(temp.path()).unwrap_err();
        assert!(matches!(err, ModfarmError::CatalogParse { .. }));
    }

    #[test]
    fn pattern_without_capture_group_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CATALOG_FILE),
            r#"
applications:
  - name: zig
    dependencies:
      - name: zig
        search_dir: /opt/zig
        pattern: "^zig-[0-9.]+$"
    module: {}
"#,
        )
        .unwrap();

        let err = load_catalog(temp.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("capture group"), "{}", msg);
    }
}
