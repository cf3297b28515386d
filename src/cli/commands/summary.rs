//! Summary command implementation.
//!
//! The `modfarm summary` command prints available and deployed counts.

use std::path::{Path, PathBuf};

use crate::cli::args::SummaryArgs;
use crate::deploy::DeploymentManager;
use crate::error::Result;
use crate::paths::Roots;
use crate::ui::{Output, Theme};

use super::dispatcher::{Command, CommandResult};

/// The summary command implementation.
pub struct SummaryCommand {
    install_root: PathBuf,
    #[allow(dead_code)]
    args: SummaryArgs,
}

impl SummaryCommand {
    /// Create a new summary command.
    pub fn new(install_root: &Path, args: SummaryArgs) -> Self {
        Self {
            install_root: install_root.to_path_buf(),
            args,
        }
    }
}

impl Command for SummaryCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let manager = DeploymentManager::new(Roots::new(&self.install_root))?;
        let summary = manager.summary();
        let theme = Theme::new();

        let available = summary.available.to_string();
        let deployed = summary.deployed.to_string();
        let width = available.len().max(deployed.len());
        output.println(&format!(
            "{} {:>width$}",
            theme.key.apply_to("Modules available:"),
            available,
        ));
        output.println(&format!(
            "{} {:>width$}",
            theme.key.apply_to("Modules deployed :"),
            deployed,
        ));

        Ok(CommandResult::success())
    }
}
