//! Catalog schema definitions.
//!
//! These structs describe the static application catalog: which toolchains
//! to look for, where, and what module definition to render for each
//! discovered version. They map 1:1 onto the optional `catalog.yml` file
//! format and are also constructed directly by the built-in catalog.
//!
//! Catalog values are immutable once constructed. Resolution results
//! (discovered versions, symlink directories) live in separate structures
//! keyed by application name — never on these types.

use serde::{Deserialize, Serialize};

/// The full application catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Applications to discover, in declaration order.
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Catalog {
    /// Look up an application by name.
    pub fn application(&self, name: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.name == name)
    }

    /// Whether any catalog application has the given name.
    pub fn has_application(&self, name: &str) -> bool {
        self.application(name).is_some()
    }
}

/// A logical toolchain product (e.g. gcc) with one or more dependency
/// binaries and one module template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Application name; becomes the top-level module path component.
    pub name: String,

    /// Artifact families that must (or may) be present, in order.
    pub dependencies: Vec<Dependency>,

    /// Template for the generated module definition.
    pub module: ModuleTemplate,
}

/// One filesystem-discoverable artifact family contributing to an
/// application's resolvable version set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency name; becomes the normalized symlink filename.
    pub name: String,

    /// Directory to scan. A leading `~` is expanded at scan time.
    pub search_dir: String,

    /// Regex matched against each direct child's filename. The first
    /// capture group is the version string. Anchor with `^...$`; unanchored
    /// patterns match anywhere in the name.
    pub pattern: String,

    /// Whether a normalized symlink should be created for this dependency.
    #[serde(default)]
    pub symlink_required: bool,

    /// Optional dependencies never constrain the mandatory version set and
    /// may be absent for an otherwise valid version.
    #[serde(default)]
    pub optional: bool,
}

/// Template for one generated module definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleTemplate {
    /// Whether a module file should be written at all.
    #[serde(default = "default_true")]
    pub required: bool,

    /// `module-whatis` description line, omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatis: Option<String>,

    /// `family` line, omitted when absent. The module loader makes
    /// same-family versions mutually exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// `prepend-path` entries in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prepend_path: Vec<VarAssignment>,

    /// `setenv` entries in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setenv: Vec<VarAssignment>,
}

/// One variable assignment in a module template.
///
/// Values may reference `{version}` and `{symlink_dir}`, substituted once
/// the application's versions and symlink directories are known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarAssignment {
    /// Environment variable name.
    pub var: String,
    /// Value template.
    pub value: String,
}

impl VarAssignment {
    /// Convenience constructor for the built-in catalog.
    pub fn new(var: &str, value: &str) -> Self {
        Self {
            var: var.to_string(),
            value: value.to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}
