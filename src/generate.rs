//! Generation orchestration.
//!
//! Runs the full pipeline for every catalog application: scan and resolve
//! versions, build the symlink farm, then write module definitions under
//! the available tree. A failure while building one application (typically
//! a mandatory dependency vanishing between scan and link) aborts that
//! application only; the remaining applications still generate.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::{ModfarmError, Result};
use crate::farm::build_farm;
use crate::modulefile::write_modulefiles;
use crate::paths::Roots;
use crate::resolve::{resolve, Resolution};

/// Outcome of one generation pass over the whole catalog.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Symlinks created, in creation order.
    pub links_created: Vec<PathBuf>,
    /// Module definition files written, in creation order.
    pub files_written: Vec<PathBuf>,
    /// Resolved versions per application name (empty sets included).
    pub resolved: BTreeMap<String, Resolution>,
    /// Applications that failed to build, with the error for each.
    pub errors: Vec<(String, ModfarmError)>,
}

impl GenerationReport {
    /// Whether every application generated successfully.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Generate symlinks and module definitions for every catalog application.
pub fn generate_all(catalog: &Catalog, roots: &Roots) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();

    for application in &catalog.applications {
        let resolution = resolve(application)?;

        let outcome = match build_farm(&roots.symlinks, application, &resolution) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("{}: generation aborted: {}", application.name, e);
                report.errors.push((application.name.clone(), e));
                report.resolved.insert(application.name.clone(), resolution);
                continue;
            }
        };

        let written = write_modulefiles(
            &roots.available,
            application,
            resolution.versions.iter(),
            &outcome.symlink_dirs,
        )?;

        report.links_created.extend(outcome.created);
        report.files_written.extend(written);
        report.resolved.insert(application.name.clone(), resolution);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Application, Dependency, ModuleTemplate, VarAssignment};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn gcc_app(bin_dir: &Path) -> Application {
        let dep = |name: &str, pattern: &str| Dependency {
            name: name.into(),
            search_dir: bin_dir.to_string_lossy().into_owned(),
            pattern: pattern.into(),
            symlink_required: true,
            optional: false,
        };
        Application {
            name: "gcc".into(),
            dependencies: vec![dep("gcc", r"^gcc-([0-9]+)$"), dep("g++", r"^g\+\+-([0-9]+)$")],
            module: ModuleTemplate {
                required: true,
                whatis: Some("Adds GCC toolchain to the path".into()),
                family: Some("GCC".into()),
                prepend_path: vec![VarAssignment::new("PATH", "{symlink_dir}")],
                setenv: vec![VarAssignment::new("CC", "gcc")],
            },
        }
    }

    fn cuda_app(install_dir: &Path) -> Application {
        Application {
            name: "CUDA".into(),
            dependencies: vec![Dependency {
                name: "cuda".into(),
                search_dir: install_dir.to_string_lossy().into_owned(),
                pattern: r"^cuda-([0-9]+\.[0-9]+)$".into(),
                symlink_required: false,
                optional: false,
            }],
            module: ModuleTemplate {
                required: true,
                whatis: Some("Adds CUDA compiler and library paths".into()),
                family: Some("CUDA".into()),
                prepend_path: vec![VarAssignment::new("PATH", "/usr/local/cuda-{version}/bin")],
                setenv: vec![],
            },
        }
    }

    #[test]
    fn generate_writes_definitions_and_links() {
        let bins = TempDir::new().unwrap();
        fs::write(bins.path().join("gcc-12"), "").unwrap();
        fs::write(bins.path().join("g++-12"), "").unwrap();
        let install = TempDir::new().unwrap();
        let roots = Roots::new(install.path());

        let catalog = Catalog {
            applications: vec![gcc_app(bins.path())],
        };
        let report = generate_all(&catalog, &roots).unwrap();

        assert!(report.ok());
        assert_eq!(report.links_created.len(), 2);
        assert_eq!(report.files_written, vec![roots.available.join("gcc/12")]);
        let contents = fs::read_to_string(roots.available.join("gcc/12")).unwrap();
        let farm_dir = roots.symlinks.join("gcc/12");
        assert!(contents.contains(&format!("prepend-path PATH {}", farm_dir.display())));
    }

    #[test]
    fn generate_without_symlink_deps_writes_no_farm() {
        let installs = TempDir::new().unwrap();
        fs::create_dir(installs.path().join("cuda-12.1")).unwrap();
        let install = TempDir::new().unwrap();
        let roots = Roots::new(install.path());

        let catalog = Catalog {
            applications: vec![cuda_app(installs.path())],
        };
        let report = generate_all(&catalog, &roots).unwrap();

        assert!(report.ok());
        assert!(report.links_created.is_empty());
        assert!(!roots.symlinks.exists());
        let contents = fs::read_to_string(roots.available.join("CUDA/12.1")).unwrap();
        assert!(contents.contains("prepend-path PATH /usr/local/cuda-12.1/bin"));
    }

    #[test]
    fn one_failing_application_does_not_abort_the_rest() {
        let bins = TempDir::new().unwrap();
        fs::write(bins.path().join("gcc-12"), "").unwrap();
        fs::write(bins.path().join("g++-12"), "").unwrap();
        let installs = TempDir::new().unwrap();
        fs::create_dir(installs.path().join("cuda-12.1")).unwrap();
        let install = TempDir::new().unwrap();
        let roots = Roots::new(install.path());
        // A plain file where the farm root should be makes the gcc build
        // fail; CUDA needs no farm and must still generate.
        fs::write(&roots.symlinks, "").unwrap();

        let catalog = Catalog {
            applications: vec![gcc_app(bins.path()), cuda_app(installs.path())],
        };
        let report = generate_all(&catalog, &roots).unwrap();

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, "gcc");
        assert!(roots.available.join("CUDA/12.1").exists());
    }

    #[test]
    fn empty_resolution_generates_nothing_for_that_app() {
        let empty = TempDir::new().unwrap();
        let install = TempDir::new().unwrap();
        let roots = Roots::new(install.path());

        let catalog = Catalog {
            applications: vec![gcc_app(empty.path())],
        };
        let report = generate_all(&catalog, &roots).unwrap();

        assert!(report.ok());
        assert!(report.files_written.is_empty());
        assert!(report.resolved["gcc"].versions.is_empty());
    }
}
