//! The `flower.toml` project manifest.
//!
//! A manifest is kept as a typed TOML tree rather than deserialized into a
//! fixed struct: validation has to report every missing field by name, and
//! defaults are merged key by key, so both work on the raw table.
//!
//! - `loader`: find and parse the manifest file
//! - `fields`: required and recommended field checks
//! - `reference`: `module:attribute` resolution against a `Registry`
//! - `validate`: the combined check run by the CLI
//! - `defaults`: deep-merge of default values

mod defaults;
mod fields;
mod loader;
mod reference;
mod validate;

#[cfg(test)]
mod tests;

use crate::error::Result;
use toml::{Table, Value};

pub use defaults::{apply_defaults, load_defaults};
pub use fields::validate_fields;
pub use loader::{DEFAULT_MANIFEST_FILE, default_manifest_path, load_manifest};
pub use reference::{
    ObjectRef, ReferenceError, resolve_object_reference, validate_object_reference,
};
pub use validate::{COMPONENTS, ValidationResult, validate_manifest};

/// A parsed manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest(Table);

impl Manifest {
    pub fn new(table: Table) -> Self {
        Self(table)
    }

    /// Parse a manifest from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        content.parse::<Table>().map(Self)
    }

    pub fn table(&self) -> &Table {
        &self.0
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.0
    }

    pub fn into_table(self) -> Table {
        self.0
    }

    /// Whether a top-level key is present, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// A top-level section, if present and a table.
    pub fn section(&self, name: &str) -> Option<&Table> {
        self.0.get(name).and_then(Value::as_table)
    }

    /// Walk nested tables by key.
    ///
    /// Returns `None` if any key is missing or an intermediate value is not
    /// a table. An empty path yields `None`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut table = &self.0;
        for key in parents {
            table = table.get(*key)?.as_table()?;
        }
        table.get(*last)
    }

    /// Like `get_path`, but only for string values.
    pub fn get_str_path(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Fill in missing keys from `defaults`, keeping every explicit value.
    pub fn with_defaults(mut self, defaults: &Table) -> Self {
        apply_defaults(&mut self.0, defaults);
        self
    }

    /// Serialize back to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&self.0)?)
    }
}

impl From<Table> for Manifest {
    fn from(table: Table) -> Self {
        Self(table)
    }
}
