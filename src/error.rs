//! Error types for the flwr-manifest CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for manifest operations.
///
/// Each variant maps to a specific exit code. Missing fields and unresolved
/// references are not errors at this level; they are collected into a
/// `ValidationResult` and only become `ValidationError` at the CLI boundary.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// User provided invalid arguments or the expected file is missing.
    #[error("{0}")]
    UserError(String),

    /// The manifest failed validation.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A file exists but could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid TOML.
    #[error("failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A manifest could not be written back out as TOML.
    #[error("failed to serialize manifest to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An export index could not be applied to the registry.
    #[error("Registry error: {0}")]
    RegistryError(String),
}

impl ManifestError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ManifestError::UserError(_) => exit_codes::USER_ERROR,
            ManifestError::RegistryError(_) => exit_codes::USER_ERROR,
            ManifestError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            ManifestError::Io { .. } => exit_codes::PARSE_FAILURE,
            ManifestError::Parse { .. } => exit_codes::PARSE_FAILURE,
            ManifestError::Serialize(_) => exit_codes::PARSE_FAILURE,
        }
    }
}

/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
