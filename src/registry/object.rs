//! Registered modules and the objects they expose.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A live, type-erased handle to something a module exports.
pub type Handle = Arc<dyn Any + Send + Sync>;

/// A member of a registered module.
///
/// Attribute lookup only descends through `Namespace` values; a `Handle` or
/// `Declared` object has no members of its own.
#[derive(Clone)]
pub enum Object {
    /// A named collection of further objects (a submodule or class body).
    Namespace(BTreeMap<String, Object>),
    /// An in-process value such as a function pointer or app instance.
    Handle(Handle),
    /// A name declared through an export index, with no in-process value.
    Declared,
}

impl Object {
    /// An empty namespace.
    pub fn namespace() -> Self {
        Object::Namespace(BTreeMap::new())
    }

    /// Wrap a value as a handle.
    pub fn handle<T: Any + Send + Sync>(value: T) -> Self {
        Object::Handle(Arc::new(value))
    }

    /// Look up a direct member by name.
    pub fn getattr(&self, name: &str) -> Option<&Object> {
        match self {
            Object::Namespace(members) => members.get(name),
            Object::Handle(_) | Object::Declared => None,
        }
    }

    /// Borrow the handle's value as `T`, if this is a handle of that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Object::Handle(handle) => handle.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Object::Namespace(_))
    }

    /// Insert `object` at `path`, creating namespaces along the way.
    ///
    /// A non-namespace object standing where an intermediate namespace is
    /// needed is replaced by an empty namespace. A `Declared` object only
    /// fills vacant slots: it never replaces an existing namespace or handle.
    fn insert_path(&mut self, path: &[&str], object: Object) {
        let Some((first, rest)) = path.split_first() else {
            return;
        };

        if !self.is_namespace() {
            *self = Object::namespace();
        }
        let Object::Namespace(members) = self else {
            return;
        };

        let declared = matches!(object, Object::Declared);

        if rest.is_empty() {
            if declared && members.contains_key(*first) {
                return;
            }
            members.insert((*first).to_string(), object);
            return;
        }

        if declared && matches!(members.get(*first), Some(Object::Handle(_))) {
            return;
        }

        members
            .entry((*first).to_string())
            .or_insert_with(Object::namespace)
            .insert_path(rest, object);
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Namespace(members) => f.debug_map().entries(members.iter()).finish(),
            Object::Handle(_) => write!(f, "<handle>"),
            Object::Declared => write!(f, "<declared>"),
        }
    }
}

/// A loadable unit of code, addressed by its dotted module path.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    root: Object,
}

impl Module {
    /// Create a module with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Object::namespace(),
        }
    }

    /// The module path this module is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute at a dotted path (e.g. `"path.join"`).
    pub fn with_attr(mut self, path: &str, object: Object) -> Self {
        self.insert(path, object);
        self
    }

    /// Add an attribute at a dotted path in place.
    pub fn insert(&mut self, path: &str, object: Object) {
        let segments: Vec<&str> = path.split('.').collect();
        self.root.insert_path(&segments, object);
    }

    /// Look up a single top-level attribute.
    pub fn getattr(&self, name: &str) -> Option<&Object> {
        self.root.getattr(name)
    }

    /// Resolve a dotted attribute path one member at a time.
    pub fn resolve(&self, attributes: &str) -> Option<&Object> {
        attributes
            .split('.')
            .try_fold(&self.root, |current, name| current.getattr(name))
    }

    /// Names of the top-level attributes.
    pub fn attribute_names(&self) -> Vec<&str> {
        match &self.root {
            Object::Namespace(members) => members.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
