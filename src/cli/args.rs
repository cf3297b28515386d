//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// modfarm - Generate and deploy environment-module definitions.
#[derive(Debug, Parser)]
#[command(name = "modfarm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Installation root holding available/, deployed/ and symlinks/
    #[arg(short, long, global = true, env = "MODFARM_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Show a line per affected module
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarise available and deployed module counts
    Summary(SummaryArgs),

    /// List modules and symlinks
    #[command(alias = "ls")]
    List(ListArgs),

    /// Automatic generation and deployment of module files
    Auto(AutoArgs),

    /// Generate module definitions and symlinks
    Generate(GenerateArgs),

    /// Manage the availability of module definitions to the loader
    Manage(ManageArgs),

    /// Detail how this tool can be installed (.bashrc)
    Install(InstallArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `summary` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SummaryArgs {}

/// Arguments for the `list` command.
///
/// With no flags set, every section is listed.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// List available modules
    #[arg(long)]
    pub available: bool,

    /// List deployed modules
    #[arg(long)]
    pub deployed: bool,

    /// List generated modules (available modules owned by the catalog)
    #[arg(long)]
    pub generated: bool,

    /// List generated symbolic links
    #[arg(long)]
    pub symlinks: bool,

    /// List explicit modules (available modules not owned by the catalog)
    #[arg(long)]
    pub explicit: bool,
}

impl ListArgs {
    /// Whether no section flag was given, implying all sections.
    pub fn list_all(&self) -> bool {
        !(self.available || self.deployed || self.generated || self.symlinks || self.explicit)
    }
}

/// Arguments for the `auto` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AutoArgs {
    /// Report what would be generated and deployed, without mutating
    #[arg(long)]
    pub check: bool,

    /// Withdraw everything and delete generated state
    #[arg(long)]
    pub reset: bool,
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GenerateArgs {
    /// List what applications will be searched for
    #[arg(long)]
    pub list_targets: bool,

    /// Delete generated modules and symlinks
    #[arg(long)]
    pub reset: bool,
}

/// Arguments for the `manage` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ManageArgs {
    /// Automatically deploy all available module definitions
    #[arg(long)]
    pub auto_deploy: bool,

    /// Withdraw all deployed module definitions
    #[arg(long)]
    pub reset: bool,

    /// Deploy the specified module(s)
    #[arg(short, long, num_args = 1..)]
    pub deploy: Vec<String>,

    /// Withdraw the specified module(s)
    #[arg(short, long, num_args = 1..)]
    pub withdraw: Vec<String>,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_valid_args() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_all_when_no_flags() {
        let args = ListArgs::default();
        assert!(args.list_all());

        let args = ListArgs {
            deployed: true,
            ..Default::default()
        };
        assert!(!args.list_all());
    }

    #[test]
    fn manage_accepts_multiple_names() {
        let cli = Cli::try_parse_from([
            "modfarm", "manage", "--deploy", "gcc/12", "clang/15",
        ])
        .unwrap();
        match cli.command {
            Commands::Manage(args) => {
                assert_eq!(args.deploy, vec!["gcc/12", "clang/15"]);
            }
            _ => panic!("expected manage"),
        }
    }

    #[test]
    fn ls_is_an_alias_for_list() {
        let cli = Cli::try_parse_from(["modfarm", "ls", "--available"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["modfarm", "summary", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
