//! Main entry point for the pkgcfg CLI.
//!
//! This is the command-line interface for the pkgcfg configuration engine.
//! It provides two commands:
//! - `config`: Read, write, unset, or list configuration values
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = pkgcfg::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let global = GlobalOptions {
        quiet: cli.quiet,
        config_dir: cli.config_dir,
        project_dir: cli.project_dir,
        logger,
    };

    let result = match cli.command {
        cli::Command::Config(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Errors bypass the logger so --quiet never hides them.
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
