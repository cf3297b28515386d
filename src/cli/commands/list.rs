//! List command implementation.
//!
//! The `modfarm list` command lists modules and symlinks, one section per
//! flag. With no flags every section is shown. "Generated" modules are
//! available leaves whose top-level component names a catalog application;
//! "explicit" modules are hand-written files dropped into the available
//! tree outside the catalog.

use std::path::{Component, Path, PathBuf};

use crate::catalog::{load_catalog, Catalog};
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::paths::Roots;
use crate::tree::ModuleTree;
use crate::ui::{Output, Theme};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    install_root: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(install_root: &Path, args: ListArgs) -> Self {
        Self {
            install_root: install_root.to_path_buf(),
            args,
        }
    }
}

/// Whether an available leaf belongs to a catalog application.
fn is_generated(catalog: &Catalog, leaf: &Path) -> bool {
    match leaf.components().next() {
        Some(Component::Normal(app)) => catalog.has_application(&app.to_string_lossy()),
        _ => false,
    }
}

fn print_section(output: &Output, theme: &Theme, title: &str, leaves: &[PathBuf]) {
    output.println(&format!(
        "{} {}",
        theme.highlight.apply_to(leaves.len()),
        theme.key.apply_to(title)
    ));
    for leaf in leaves {
        output.println(&format!("  {}", leaf.display()));
    }
}

impl Command for ListCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let roots = Roots::new(&self.install_root);
        let catalog = load_catalog(&self.install_root)?;
        let available = ModuleTree::scan(&roots.available)?;
        let deployed = ModuleTree::scan(&roots.deployed)?;
        let theme = Theme::new();

        let list_all = self.args.list_all();

        if self.args.available || list_all {
            print_section(
                output,
                &theme,
                "modules available",
                &available.leaves_under(None),
            );
        }
        if self.args.deployed || list_all {
            print_section(
                output,
                &theme,
                "modules deployed",
                &deployed.leaves_under(None),
            );
        }
        if self.args.generated || list_all {
            let generated: Vec<PathBuf> = available
                .leaves_under(None)
                .into_iter()
                .filter(|leaf| is_generated(&catalog, leaf))
                .collect();
            print_section(output, &theme, "modules generated", &generated);
        }
        if self.args.explicit || list_all {
            let explicit: Vec<PathBuf> = available
                .leaves_under(None)
                .into_iter()
                .filter(|leaf| !is_generated(&catalog, leaf))
                .collect();
            print_section(output, &theme, "explicit modules", &explicit);
        }
        if self.args.symlinks || list_all {
            let farm = ModuleTree::scan(&roots.symlinks)?;
            print_section(output, &theme, "symlinks", &farm.leaves_under(None));
        }

        Ok(CommandResult::success())
    }
}
