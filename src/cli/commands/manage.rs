//! Manage command implementation.
//!
//! The `modfarm manage` command changes which available modules are visible
//! to the loader: `--deploy`/`--withdraw` for named leaf or group paths,
//! `--auto-deploy` to deploy everything available, `--reset` to withdraw
//! everything. Per-module failures are reported and the remaining names
//! still run.

use std::path::{Path, PathBuf};

use crate::cli::args::ManageArgs;
use crate::deploy::{BatchReport, DeploymentManager};
use crate::error::Result;
use crate::paths::Roots;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The manage command implementation.
pub struct ManageCommand {
    install_root: PathBuf,
    args: ManageArgs,
}

impl ManageCommand {
    /// Create a new manage command.
    pub fn new(install_root: &Path, args: ManageArgs) -> Self {
        Self {
            install_root: install_root.to_path_buf(),
            args,
        }
    }
}

fn print_report(output: &Output, report: &BatchReport, action: &str) {
    for leaf in &report.affected {
        output.detail(&format!("{} {}", leaf.display(), action));
    }
    for (leaf, error) in &report.errors {
        output.error(&format!("Error: {}: {}", leaf.display(), error));
    }
    output.println(&format!("{} modules {}", report.affected.len(), action));
}

impl Command for ManageCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let mut manager = DeploymentManager::new(Roots::new(&self.install_root))?;
        let mut failed = false;

        if self.args.reset {
            let report = manager.withdraw_all();
            failed |= !report.ok();
            print_report(output, &report, "withdrawn");
        }

        if self.args.auto_deploy {
            let report = manager.auto_deploy();
            failed |= !report.ok();
            print_report(output, &report, "deployed");
        }

        for name in &self.args.deploy {
            match manager.deploy(Path::new(name)) {
                Ok(deployed) => {
                    for leaf in deployed {
                        output.println(&format!("{} deployed", leaf.display()));
                    }
                }
                Err(e) => {
                    output.error(&format!("Error: {}", e));
                    failed = true;
                }
            }
        }

        for name in &self.args.withdraw {
            match manager.withdraw(Path::new(name)) {
                Ok(withdrawn) => {
                    for leaf in withdrawn {
                        output.println(&format!("{} withdrawn", leaf.display()));
                    }
                }
                Err(e) => {
                    output.error(&format!("Error: {}", e));
                    failed = true;
                }
            }
        }

        if failed {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
