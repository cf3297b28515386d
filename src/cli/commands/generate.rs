//! Generate command implementation.
//!
//! The `modfarm generate` command resolves the catalog against the
//! filesystem, builds the symlink farm, and writes module definitions under
//! the available tree. `--list-targets` prints the catalog instead;
//! `--reset` deletes all generated state.

use std::path::{Path, PathBuf};

use crate::catalog::load_catalog;
use crate::cli::args::GenerateArgs;
use crate::deploy::DeploymentManager;
use crate::error::Result;
use crate::generate::generate_all;
use crate::paths::Roots;
use crate::ui::{Output, Theme};

use super::dispatcher::{Command, CommandResult};

/// The generate command implementation.
pub struct GenerateCommand {
    install_root: PathBuf,
    args: GenerateArgs,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(install_root: &Path, args: GenerateArgs) -> Self {
        Self {
            install_root: install_root.to_path_buf(),
            args,
        }
    }

    fn list_targets(&self, output: &Output) -> Result<CommandResult> {
        let catalog = load_catalog(&self.install_root)?;
        let theme = Theme::new();

        for app in &catalog.applications {
            output.println(&format!("{}", theme.highlight.apply_to(&app.name)));
            for dep in &app.dependencies {
                let mut notes = Vec::new();
                if dep.optional {
                    notes.push("optional");
                }
                if dep.symlink_required {
                    notes.push("symlinked");
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", notes.join(", "))
                };
                output.println(&format!(
                    "  {} {} {}{}",
                    dep.name,
                    theme.dim.apply_to(&dep.search_dir),
                    theme.dim.apply_to(&dep.pattern),
                    suffix,
                ));
            }
        }
        Ok(CommandResult::success())
    }

    fn reset(&self, output: &Output) -> Result<CommandResult> {
        let mut manager = DeploymentManager::new(Roots::new(&self.install_root))?;
        let report = manager.clean_generated();
        for leaf in &report.affected {
            output.detail(&format!("{} removed", leaf.display()));
        }
        for (leaf, error) in &report.errors {
            output.error(&format!("Error: {}: {}", leaf.display(), error));
        }
        output.println(&format!("Removed {} modules", report.affected.len()));
        if report.ok() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }

    fn generate(&self, output: &Output) -> Result<CommandResult> {
        let catalog = load_catalog(&self.install_root)?;
        let roots = Roots::new(&self.install_root);
        let report = generate_all(&catalog, &roots)?;
        let theme = Theme::new();

        for link in &report.links_created {
            output.detail(&format!("{} linked", link.display()));
        }
        for file in &report.files_written {
            output.detail(&format!("{} written", file.display()));
        }
        for (app, error) in &report.errors {
            output.error(&format!(
                "{} {}",
                theme.error.apply_to(format!("Error generating {}:", app)),
                error
            ));
        }
        output.println(&format!(
            "Created {} symlinks, {} modulefiles",
            report.links_created.len(),
            report.files_written.len()
        ));
        if report.ok() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        if self.args.list_targets {
            return self.list_targets(output);
        }
        if self.args.reset {
            return self.reset(output);
        }
        self.generate(output)
    }
}
