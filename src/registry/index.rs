//! Export index files.
//!
//! An export index declares modules and the attributes they provide without
//! linking their code into this binary:
//!
//! ```toml
//! [modules."app.server"]
//! exports = ["app", "strategy.FedAvg"]
//! ```
//!
//! Unknown fields are ignored so newer index files still load.

use crate::error::{ManifestError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed contents of an export index file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExportIndex {
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleExports>,
}

/// Attributes declared for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModuleExports {
    /// Dotted attribute paths the module provides.
    #[serde(default)]
    pub exports: Vec<String>,
}

impl ExportIndex {
    /// Load and validate an export index from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let index: ExportIndex =
            toml::from_str(&content).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        index.validate()?;
        Ok(index)
    }

    /// Parse and validate an export index from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let index: ExportIndex = toml::from_str(content).map_err(|e| {
            ManifestError::RegistryError(format!("failed to parse export index: {}", e))
        })?;

        index.validate()?;
        Ok(index)
    }

    /// Reject entries that could never be referenced.
    ///
    /// Validation rules:
    /// - module paths must be non-empty and must not contain `:`
    /// - exports must be non-empty with no empty `.` segments
    pub fn validate(&self) -> Result<()> {
        for (module, exports) in &self.modules {
            if module.is_empty() || module.contains(':') {
                return Err(ManifestError::RegistryError(format!(
                    "invalid module path '{}' in export index",
                    module
                )));
            }

            for export in &exports.exports {
                if export.split('.').any(str::is_empty) {
                    return Err(ManifestError::RegistryError(format!(
                        "invalid export '{}' for module '{}'",
                        export, module
                    )));
                }
            }
        }

        Ok(())
    }
}
