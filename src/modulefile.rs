//! Module definition rendering and writing.
//!
//! A module definition is plain text, one directive per line, in fixed
//! order: identity comment, `set app`, `set version`, optional
//! `module-whatis`, optional `family`, then `prepend-path` and `setenv`
//! lines in declared order. The external module loader consumes these files
//! from the deployed tree; modfarm never parses them back.
//!
//! Regeneration overwrites existing files unconditionally (last write
//! wins); there is no diffing or overwrite guard.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Application, ModuleTemplate};
use crate::error::Result;
use crate::paths::expand_tilde;

/// Substitute `{version}` and `{symlink_dir}` in a template value.
///
/// `{symlink_dir}` renders as the empty string when the application
/// produced no symlink directory for this version.
fn substitute(template: &str, version: &str, symlink_dir: Option<&Path>) -> String {
    let dir = symlink_dir
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    template
        .replace("{version}", version)
        .replace("{symlink_dir}", &dir)
}

/// Render the definition text for one application version.
pub fn render(
    app_name: &str,
    version: &str,
    template: &ModuleTemplate,
    symlink_dir: Option<&Path>,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("# {} {} module", app_name, version));
    lines.push(format!("set app {}", app_name));
    lines.push(format!("set version {}", version));
    if let Some(whatis) = &template.whatis {
        lines.push(format!("module-whatis \"{}\"", whatis));
    }
    if let Some(family) = &template.family {
        lines.push(format!("family {}", family));
    }
    for entry in &template.prepend_path {
        let value = substitute(&entry.value, version, symlink_dir);
        let path = expand_tilde(&value);
        lines.push(format!("prepend-path {} {}", entry.var, path.display()));
    }
    for entry in &template.setenv {
        let value = substitute(&entry.value, version, symlink_dir);
        lines.push(format!("setenv {} {}", entry.var, value));
    }
    lines.join("\n")
}

/// Write one definition file per resolved version under `available_root`.
///
/// Returns the written paths in version order. Versions the template does
/// not require (`required: false`) produce nothing.
pub fn write_modulefiles(
    available_root: &Path,
    application: &Application,
    versions: impl IntoIterator<Item = impl AsRef<str>>,
    symlink_dirs: &BTreeMap<String, PathBuf>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if !application.module.required {
        return Ok(written);
    }

    let app_dir = available_root.join(&application.name);
    for version in versions {
        let version = version.as_ref();
        let symlink_dir = symlink_dirs.get(version).map(PathBuf::as_path);
        let contents = render(&application.name, version, &application.module, symlink_dir);

        fs::create_dir_all(&app_dir)?;
        let path = app_dir.join(version);
        fs::write(&path, contents)?;
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
