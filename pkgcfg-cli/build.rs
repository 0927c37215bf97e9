//! Build script for pkgcfg-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs and src/commands/.
fn build_cli() -> Command {
    let config = Command::new("config")
        .about("Read, write, or list configuration values")
        .long_about(
            "Without VALUE, print the effective value of KEY. With VALUE, store it in the \
             global configuration, or in the project-local one with --local.",
        )
        .arg(Arg::new("key").value_name("KEY").help("Setting path"))
        .arg(
            Arg::new("values")
                .value_name("VALUE")
                .num_args(0..)
                .help("Values to store at KEY"),
        )
        .arg(
            Arg::new("unset")
                .long("unset")
                .help("Remove KEY instead of reading or writing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List configuration values")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .help("Target the project-local configuration")
                .action(ArgAction::SetTrue),
        );

    Command::new("pkgcfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and write package manager settings")
        .long_about(
            "Command-line tool for layered package manager configuration: settings, \
             repositories, credentials and certificates",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Override the user configuration directory")
                .value_name("PATH")
                .global(true)
                .env("PKGCFG_CONFIG_DIR"),
        )
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help("Directory where project-local configuration discovery starts")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            config,
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("pkgcfg.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
