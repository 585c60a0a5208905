//! `module:attribute` object references.

use crate::registry::{Object, Registry};
use thiserror::Error;

/// Why an object reference did not resolve.
///
/// The `Display` text is user-facing and stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Missing module in {reference}")]
    MissingModule { reference: String },

    #[error("Missing attribute in {reference}")]
    MissingAttribute { reference: String },

    #[error("Unable to load module {module}")]
    ModuleNotFound { module: String },

    #[error("Unable to load attribute {attributes} from module {module}")]
    AttributeNotFound { module: String, attributes: String },
}

/// A reference split into its module path and dotted attribute path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef<'a> {
    pub module: &'a str,
    pub attributes: &'a str,
}

impl<'a> ObjectRef<'a> {
    /// Split `reference` on its first `:`.
    ///
    /// Both halves must be non-empty. A reference without a `:` has an
    /// empty attribute part.
    pub fn parse(reference: &'a str) -> Result<Self, ReferenceError> {
        let (module, attributes) = reference.split_once(':').unwrap_or((reference, ""));

        if module.is_empty() {
            return Err(ReferenceError::MissingModule {
                reference: reference.to_string(),
            });
        }
        if attributes.is_empty() {
            return Err(ReferenceError::MissingAttribute {
                reference: reference.to_string(),
            });
        }

        Ok(Self { module, attributes })
    }

    /// Attribute names in lookup order.
    pub fn attribute_path(&self) -> impl Iterator<Item = &'a str> {
        self.attributes.split('.')
    }
}

/// Resolve a reference to the object it names.
///
/// Loading the module may run its registered initializer.
pub fn resolve_object_reference<'r>(
    reference: &str,
    registry: &'r Registry,
) -> Result<&'r Object, ReferenceError> {
    let object_ref = ObjectRef::parse(reference)?;

    let module = registry.load_module(object_ref.module).ok_or_else(|| {
        ReferenceError::ModuleNotFound {
            module: object_ref.module.to_string(),
        }
    })?;

    module
        .resolve(object_ref.attributes)
        .ok_or_else(|| ReferenceError::AttributeNotFound {
            module: object_ref.module.to_string(),
            attributes: object_ref.attributes.to_string(),
        })
}

/// Check that a reference resolves, discarding the object.
pub fn validate_object_reference(
    reference: &str,
    registry: &Registry,
) -> Result<(), ReferenceError> {
    let result = resolve_object_reference(reference, registry).map(|_| ());
    match &result {
        Ok(()) => tracing::debug!(reference, "object reference resolved"),
        Err(err) => tracing::debug!(reference, reason = %err, "object reference failed"),
    }
    result
}
