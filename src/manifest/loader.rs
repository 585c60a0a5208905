//! Manifest file loading.

use super::Manifest;
use crate::error::{ManifestError, Result};
use std::path::{Path, PathBuf};
use toml::Table;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_MANIFEST_FILE: &str = "flower.toml";

/// `flower.toml` in the current working directory.
pub fn default_manifest_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|source| ManifestError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    Ok(cwd.join(DEFAULT_MANIFEST_FILE))
}

/// Load a manifest from `path`, or from `flower.toml` in the working
/// directory if no path is given.
///
/// # Returns
///
/// * `Ok(Some(Manifest))` - The file exists and is valid TOML
/// * `Ok(None)` - No file at the target path
/// * `Err(ManifestError::Io)` - The file exists but could not be read
/// * `Err(ManifestError::Parse)` - The file is not valid TOML
pub fn load_manifest(path: Option<&Path>) -> Result<Option<Manifest>> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_manifest_path()?,
    };

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no manifest found");
        return Ok(None);
    }

    let table = read_toml_table(&path)?;
    tracing::debug!(path = %path.display(), keys = table.len(), "loaded manifest");
    Ok(Some(Manifest::new(table)))
}

/// Read a file as UTF-8 and parse it as a TOML table.
pub(crate) fn read_toml_table(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    content.parse::<Table>().map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
