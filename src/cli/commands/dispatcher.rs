//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::Output;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `output` - Verbosity-aware writer for user-facing output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, output: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    install_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given installation root.
    pub fn new(install_root: PathBuf) -> Self {
        Self { install_root }
    }

    /// Get the installation root path.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, output: &Output) -> Result<CommandResult> {
        match &cli.command {
            Commands::Summary(args) => {
                let cmd = super::summary::SummaryCommand::new(&self.install_root, args.clone());
                cmd.execute(output)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(&self.install_root, args.clone());
                cmd.execute(output)
            }
            Commands::Auto(args) => {
                let cmd = super::auto::AutoCommand::new(&self.install_root, args.clone());
                cmd.execute(output)
            }
            Commands::Generate(args) => {
                let cmd = super::generate::GenerateCommand::new(&self.install_root, args.clone());
                cmd.execute(output)
            }
            Commands::Manage(args) => {
                let cmd = super::manage::ManageCommand::new(&self.install_root, args.clone());
                cmd.execute(output)
            }
            Commands::Install(args) => {
                let cmd = super::install::InstallCommand::new(&self.install_root, args.clone());
                cmd.execute(output)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(output)
            }
        }
    }
}
