//! Default values for manifests.

use super::loader::read_toml_table;
use crate::error::Result;
use std::path::Path;
use toml::{Table, Value};

/// Merge `defaults` into `config`, filling only keys `config` lacks.
///
/// Where both sides hold a table the merge recurses. Any other value already
/// in `config` is left untouched, including when its type differs from the
/// default's. Applying the same defaults twice changes nothing further.
pub fn apply_defaults(config: &mut Table, defaults: &Table) {
    for (key, default) in defaults {
        match config.get_mut(key) {
            None => {
                config.insert(key.clone(), default.clone());
            }
            Some(Value::Table(existing)) => {
                if let Value::Table(nested) = default {
                    apply_defaults(existing, nested);
                }
            }
            Some(_) => {}
        }
    }
}

/// Load a defaults table from a TOML file.
pub fn load_defaults<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let defaults = read_toml_table(path)?;
    tracing::debug!(path = %path.display(), keys = defaults.len(), "loaded defaults");
    Ok(defaults)
}
