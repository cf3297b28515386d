//! Auto command implementation.
//!
//! The `modfarm auto` command is generate-then-deploy in one step.
//! `--check` reports what would happen without touching the filesystem;
//! `--reset` withdraws everything and deletes generated state.

use std::path::{Path, PathBuf};

use crate::catalog::load_catalog;
use crate::cli::args::AutoArgs;
use crate::deploy::DeploymentManager;
use crate::error::Result;
use crate::generate::generate_all;
use crate::paths::Roots;
use crate::resolve::resolve_all;
use crate::tree::ModuleTree;
use crate::ui::{Output, Theme};

use super::dispatcher::{Command, CommandResult};

/// The auto command implementation.
pub struct AutoCommand {
    install_root: PathBuf,
    args: AutoArgs,
}

impl AutoCommand {
    /// Create a new auto command.
    pub fn new(install_root: &Path, args: AutoArgs) -> Self {
        Self {
            install_root: install_root.to_path_buf(),
            args,
        }
    }

    /// Report resolvable versions and pending deployments without mutating.
    fn check(&self, output: &Output) -> Result<CommandResult> {
        let catalog = load_catalog(&self.install_root)?;
        let roots = Roots::new(&self.install_root);
        let theme = Theme::new();

        let resolved = resolve_all(&catalog)?;
        output.println(&format!("{}", theme.key.apply_to("Resolvable applications:")));
        for (name, resolution) in &resolved {
            let versions: Vec<_> = resolution.versions.iter().cloned().collect();
            let rendered = if versions.is_empty() {
                theme.dim.apply_to("none found".to_string()).to_string()
            } else {
                versions.join(", ")
            };
            output.println(&format!("  {} {}", theme.highlight.apply_to(name), rendered));
        }

        let available = ModuleTree::scan(&roots.available)?;
        let deployed = ModuleTree::scan(&roots.deployed)?;
        let pending = available.difference(&deployed);
        output.println(&format!("{}", theme.key.apply_to("Pending deployment:")));
        for leaf in pending.leaves_under(None) {
            output.println(&format!("  {}", leaf.display()));
        }

        Ok(CommandResult::success())
    }

    fn reset(&self, output: &Output) -> Result<CommandResult> {
        let mut manager = DeploymentManager::new(Roots::new(&self.install_root))?;
        let withdrawn = manager.withdraw_all();
        let cleaned = manager.clean_generated();

        for (leaf, error) in withdrawn.errors.iter().chain(&cleaned.errors) {
            output.error(&format!("Error: {}: {}", leaf.display(), error));
        }
        output.println(&format!(
            "Withdrew {} modules, removed {} generated modules",
            withdrawn.affected.len(),
            cleaned.affected.len()
        ));
        if withdrawn.ok() && cleaned.ok() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }

    fn auto(&self, output: &Output) -> Result<CommandResult> {
        let catalog = load_catalog(&self.install_root)?;
        let roots = Roots::new(&self.install_root);

        let generation = generate_all(&catalog, &roots)?;
        for (app, error) in &generation.errors {
            output.error(&format!("Error generating {}: {}", app, error));
        }
        output.println(&format!(
            "Created {} symlinks, {} modulefiles",
            generation.links_created.len(),
            generation.files_written.len()
        ));

        // Re-scan so freshly written definitions are deployable.
        let mut manager = DeploymentManager::new(roots)?;
        let deployment = manager.auto_deploy();
        for leaf in &deployment.affected {
            output.detail(&format!("{} deployed", leaf.display()));
        }
        for (leaf, error) in &deployment.errors {
            output.error(&format!("Error: {}: {}", leaf.display(), error));
        }
        output.println(&format!("{} modules deployed", deployment.affected.len()));

        if generation.ok() && deployment.ok() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for AutoCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        if self.args.check {
            return self.check(output);
        }
        if self.args.reset {
            return self.reset(output);
        }
        self.auto(output)
    }
}
