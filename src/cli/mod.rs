//! Command-line interface for modfarm.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AutoArgs, Cli, Commands, CompletionsArgs, GenerateArgs, InstallArgs, ListArgs, ManageArgs,
    SummaryArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
