//! CLI argument parsing for flwr-manifest.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// flwr-manifest: check and inspect `flower.toml` project manifests.
///
/// A manifest declares project metadata under `[project]` and the server
/// and client app references under `[flower.components]`.
#[derive(Parser, Debug)]
#[command(name = "flwr-manifest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a manifest.
    ///
    /// Checks required and recommended fields, then resolves the
    /// `serverapp` and `clientapp` references against the registered
    /// modules.
    Validate(ValidateArgs),

    /// Print a manifest with default values applied.
    Show(ShowArgs),
}

/// Output format for reports.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Manifest path (defaults to ./flower.toml).
    pub path: Option<PathBuf>,

    /// Export index declaring additional modules (repeatable).
    #[arg(long = "index", value_name = "FILE")]
    pub indexes: Vec<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Manifest path (defaults to ./flower.toml).
    pub path: Option<PathBuf>,

    /// TOML file of default values to merge in.
    #[arg(long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
