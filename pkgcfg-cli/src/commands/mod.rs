//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `config`: Read, write, unset, or list configuration values
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod config;

pub use completions::CompletionsCommand;
pub use config::ConfigCommand;
