//! Module registry for resolving `module:attribute` references.
//!
//! Component references in a manifest name code by string. This binary
//! cannot import code at runtime, so every module a reference may point at
//! has to be registered up front: linked in directly (`register_module`),
//! built on first use (`register_lazy`), or declared through an export
//! index file (`load_index`). Anything else is reported as not found.

pub mod builtin;
mod index;
mod object;


use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

pub use index::{ExportIndex, ModuleExports};
pub use object::{Handle, Module, Object};

type ModuleInit = Box<dyn Fn() -> Module + Send + Sync>;

enum Entry {
    Loaded(Module),
    Lazy {
        init: ModuleInit,
        cell: OnceLock<Module>,
    },
}

impl Entry {
    fn get(&self) -> &Module {
        match self {
            Entry::Loaded(module) => module,
            Entry::Lazy { init, cell } => cell.get_or_init(|| init()),
        }
    }
}

/// Registered modules, keyed by dotted module path.
#[derive(Default)]
pub struct Registry {
    modules: BTreeMap<String, Entry>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in host modules (`os`).
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_module(builtin::os_module());
        registry
    }

    /// Register a module, replacing any module with the same path.
    pub fn register_module(&mut self, module: Module) -> &mut Self {
        tracing::debug!(module = module.name(), "registering module");
        self.modules
            .insert(module.name().to_string(), Entry::Loaded(module));
        self
    }

    /// Register a module whose initializer runs the first time it is loaded.
    ///
    /// The initializer runs at most once; later loads reuse its result.
    pub fn register_lazy<F>(&mut self, name: impl Into<String>, init: F) -> &mut Self
    where
        F: Fn() -> Module + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(module = %name, "registering lazy module");
        self.modules.insert(
            name,
            Entry::Lazy {
                init: Box::new(init),
                cell: OnceLock::new(),
            },
        );
        self
    }

    /// Load a module by path, running its initializer if it has not run yet.
    pub fn load_module(&self, name: &str) -> Option<&Module> {
        let module = self.modules.get(name).map(Entry::get);
        if module.is_none() {
            tracing::debug!(module = name, "module not registered");
        }
        module
    }

    /// Whether a module path is registered, without loading it.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registered module paths in sorted order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Declare every module and export listed in `index`.
    ///
    /// Exports are added to an already-registered module without replacing
    /// any of its own attributes. A lazy module that has not been loaded yet
    /// stays lazy: the exports are applied after its initializer runs.
    pub fn merge_index(&mut self, index: ExportIndex) -> &mut Self {
        for (name, exports) in index.modules {
            tracing::debug!(
                module = %name,
                exports = exports.exports.len(),
                "declared module from export index"
            );

            let entry = match self.modules.remove(&name) {
                Some(Entry::Lazy { init, cell }) => match cell.into_inner() {
                    Some(module) => Entry::Loaded(declare_exports(module, &exports.exports)),
                    None => {
                        let exports = exports.exports;
                        Entry::Lazy {
                            init: Box::new(move || declare_exports(init(), &exports)),
                            cell: OnceLock::new(),
                        }
                    }
                },
                Some(Entry::Loaded(module)) => {
                    Entry::Loaded(declare_exports(module, &exports.exports))
                }
                None => Entry::Loaded(declare_exports(
                    Module::new(name.clone()),
                    &exports.exports,
                )),
            };
            self.modules.insert(name, entry);
        }
        self
    }

    /// Load an export index file and merge it into this registry.
    pub fn load_index<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let index = ExportIndex::load(path)?;
        Ok(self.merge_index(index))
    }
}

fn declare_exports(mut module: Module, exports: &[String]) -> Module {
    for export in exports {
        module.insert(export, Object::Declared);
    }
    module
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}
