//! Shell completion generation command.
//!
//! The script goes to stdout. Installation hints go to stderr as `#` comments
//! so that `eval "$(pkgcfg completions bash)"` still works.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Name of the installed binary
const BIN_NAME: &str = "pkgcfg";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Installation hints for `shell`, one line each.
fn install_hints(shell: Shell) -> &'static [&'static str] {
    match shell {
        Shell::Bash => &[
            "pkgcfg completions bash > ~/.local/share/bash-completion/completions/pkgcfg",
            "or add to ~/.bashrc: eval \"$(pkgcfg completions bash)\"",
        ],
        Shell::Zsh => &[
            "pkgcfg completions zsh > ~/.zsh/completions/_pkgcfg",
            "and make sure ~/.zsh/completions is in your $fpath",
        ],
        Shell::Fish => &["pkgcfg completions fish > ~/.config/fish/completions/pkgcfg.fish"],
        Shell::PowerShell => {
            &["pkgcfg completions powershell | Out-String | Invoke-Expression"]
        }
        _ => &[],
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            eprintln!("# {} completion script for {BIN_NAME}", self.shell);
            for hint in install_hints(self.shell) {
                eprintln!("#   {hint}");
            }
        }

        let mut stdout = io::stdout();
        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut stdout);
        stdout.flush()?;

        Ok(())
    }
}
