//! Implementation of the `flwr-manifest show` command.

use super::require_manifest;
use crate::cli::ShowArgs;
use flwr_manifest::error::Result;
use flwr_manifest::manifest::{Manifest, load_defaults};

/// Execute the `show` command.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let manifest = run_show(&args)?;
    print!("{}", manifest.to_toml_string()?);
    Ok(())
}

/// Load the manifest and merge in the defaults file, if any.
pub(crate) fn run_show(args: &ShowArgs) -> Result<Manifest> {
    let manifest = require_manifest(args.path.as_deref())?;

    match &args.defaults {
        Some(path) => Ok(manifest.with_defaults(&load_defaults(path)?)),
        None => Ok(manifest),
    }
}
