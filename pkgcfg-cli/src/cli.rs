//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ConfigCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for reading and writing package manager settings.
#[derive(Parser)]
#[command(name = "pkgcfg")]
#[command(version, about = "Read and write package manager settings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the user configuration directory
    #[arg(long, value_name = "PATH", global = true, env = "PKGCFG_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory where project-local configuration discovery starts
    #[arg(long, value_name = "PATH", global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Read, write, or list configuration values
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
