//! Command implementations for flwr-manifest.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the manifest lookup they share.

mod show;
mod validate_cmd;


use crate::cli::Command;
use flwr_manifest::error::{ManifestError, Result};
use flwr_manifest::manifest::{Manifest, default_manifest_path, load_manifest};
use std::path::Path;

pub use show::cmd_show;
pub use validate_cmd::cmd_validate;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => cmd_validate(args),
        Command::Show(args) => cmd_show(args),
    }
}

/// Load the manifest a command operates on, failing if there is none.
fn require_manifest(path: Option<&Path>) -> Result<Manifest> {
    if let Some(manifest) = load_manifest(path)? {
        return Ok(manifest);
    }

    let target = match path {
        Some(path) => path.to_path_buf(),
        None => default_manifest_path()?,
    };
    Err(ManifestError::UserError(format!(
        "no manifest found at '{}'.\n\n\
         Run this command from a project directory or pass the path to its flower.toml.",
        target.display()
    )))
}
