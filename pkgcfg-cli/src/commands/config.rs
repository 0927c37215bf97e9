//! Config command implementation.
//!
//! `pkgcfg config [KEY] [VALUE...]` reads a value when no values follow the
//! key, writes one otherwise, removes it with `--unset`, and prints the whole
//! configuration with `--list`.

use crate::error::CliError;
use crate::utils::{build_context, shorten_path, GlobalOptions};
use clap::Args;
use pkgcfg::{CommandEngine, ConfigRequest, Outcome, Scope};

/// Read, write, or list configuration values
#[derive(Args)]
pub struct ConfigCommand {
    /// Setting path, e.g. `virtualenvs.create` or `repositories.foo`
    #[arg(value_name = "KEY")]
    pub key: Option<String>,

    /// Values to store at KEY
    #[arg(value_name = "VALUE")]
    pub values: Vec<String>,

    /// Remove KEY instead of reading or writing it
    #[arg(long)]
    pub unset: bool,

    /// List configuration values
    #[arg(long)]
    pub list: bool,

    /// Target the project-local configuration
    #[arg(long)]
    pub local: bool,
}

impl ConfigCommand {
    /// Build the library request for this invocation.
    pub fn request(&self) -> ConfigRequest {
        let scope = if self.local {
            Scope::Local
        } else {
            Scope::Global
        };

        ConfigRequest::new(self.key.clone())
            .with_values(self.values.clone())
            .with_unset(self.unset)
            .with_list(self.list)
            .with_scope(scope)
    }

    /// Execute the config command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.unset && self.key.is_none() && !self.list {
            return Err(CliError::InvalidArguments(
                "--unset requires a KEY".to_string(),
            ));
        }

        let mut context = build_context(global)?;
        let outcome = CommandEngine::execute(&mut context, self.request())?;

        for line in outcome.lines() {
            println!("{line}");
        }

        if let Outcome::Updated {
            role,
            scope,
            location,
        } = &outcome
        {
            let target = location
                .as_deref()
                .map_or_else(|| "memory".to_string(), shorten_path);
            global
                .logger
                .info(&format!("Updated {scope} {role} in {target}"));
        }

        Ok(())
    }
}
