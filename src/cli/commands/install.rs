//! Install command implementation.
//!
//! The `modfarm install` command prints the shell configuration needed to
//! point the module loader's search path at the deployed tree.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::deploy::DeploymentManager;
use crate::error::Result;
use crate::paths::Roots;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    install_root: PathBuf,
    #[allow(dead_code)]
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(install_root: &Path, args: InstallArgs) -> Self {
        Self {
            install_root: install_root.to_path_buf(),
            args,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let manager = DeploymentManager::new(Roots::new(&self.install_root))?;
        output.println(&manager.install_hint());
        Ok(CommandResult::success())
    }
}
