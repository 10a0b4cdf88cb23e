//! A registry of named parsers, serializers and stores.
//!
//! Plugins are registered under a [kind](PluginKind) and a name,
//! either directly with [`PluginRegistry::register`],
//! or lazily with [`PluginRegistry::register_lazy`]:
//! the loader of a lazy plugin only runs the first time the plugin is resolved,
//! and its result is then cached for the lifetime of the registry.
//!
//! A registry is an explicit object, usually shared as an `Arc<PluginRegistry>`
//! by the graphs and datasets that use it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use log::debug;

use crate::error::{BoxError, Error, Result};
use crate::parser::Parser;
use crate::serializer::Serializer;
use crate::store::Store;

/// The kinds of plugins.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PluginKind {
    /// See [`Parser`]
    Parser,
    /// See [`Serializer`]
    Serializer,
    /// See [`Store`]
    Store,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PluginKind::Parser => "parser",
            PluginKind::Serializer => "serializer",
            PluginKind::Store => "store",
        })
    }
}

/// Builds a new [`Parser`].
pub type ParserFactory = Arc<dyn Fn() -> Box<dyn Parser> + Send + Sync>;
/// Builds a new [`Serializer`].
pub type SerializerFactory = Arc<dyn Fn() -> Box<dyn Serializer> + Send + Sync>;
/// Opens a new [`Store`]; this may fail.
pub type StoreFactory = Arc<dyn Fn() -> Result<Arc<dyn Store>, BoxError> + Send + Sync>;
/// Produces a plugin on first use, see [`PluginRegistry::register_lazy`].
pub type PluginLoader = Arc<dyn Fn() -> Result<Plugin, BoxError> + Send + Sync>;

/// A registered plugin: a factory of the corresponding kind.
#[derive(Clone)]
pub enum Plugin {
    /// A parser factory.
    Parser(ParserFactory),
    /// A serializer factory.
    Serializer(SerializerFactory),
    /// A store factory.
    Store(StoreFactory),
}

impl Plugin {
    /// Wrap a parser factory.
    pub fn parser<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn Parser> + Send + Sync + 'static,
    {
        Plugin::Parser(Arc::new(factory))
    }

    /// Wrap a serializer factory.
    pub fn serializer<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn Serializer> + Send + Sync + 'static,
    {
        Plugin::Serializer(Arc::new(factory))
    }

    /// Wrap a store factory.
    pub fn store<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Store>, BoxError> + Send + Sync + 'static,
    {
        Plugin::Store(Arc::new(factory))
    }

    /// The kind of this plugin.
    pub fn kind(&self) -> PluginKind {
        match self {
            Plugin::Parser(_) => PluginKind::Parser,
            Plugin::Serializer(_) => PluginKind::Serializer,
            Plugin::Store(_) => PluginKind::Store,
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plugin::{:?}(..)", self.kind())
    }
}

struct Entry {
    kind: PluginKind,
    cell: OnceLock<Plugin>,
    loader: Option<PluginLoader>,
    init: Mutex<()>,
}

impl Entry {
    fn loaded(plugin: Plugin) -> Self {
        Entry {
            kind: plugin.kind(),
            cell: OnceLock::from(plugin),
            loader: None,
            init: Mutex::new(()),
        }
    }

    fn lazy(kind: PluginKind, loader: PluginLoader) -> Self {
        Entry {
            kind,
            cell: OnceLock::new(),
            loader: Some(loader),
            init: Mutex::new(()),
        }
    }

    fn get(&self, name: &str) -> Result<Plugin> {
        if let Some(plugin) = self.cell.get() {
            return Ok(plugin.clone());
        }
        // only one thread runs the loader; the others wait, then see its result
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(plugin) = self.cell.get() {
            return Ok(plugin.clone());
        }
        let Some(loader) = &self.loader else {
            // unreachable: eager entries are created loaded
            return Err(Error::PluginNotFound {
                kind: self.kind,
                name: name.to_string(),
            });
        };
        debug!("Loading {} plugin {:?}", self.kind, name);
        let plugin = loader().map_err(|source| Error::PluginLoad {
            kind: self.kind,
            name: name.to_string(),
            source,
        })?;
        if plugin.kind() != self.kind {
            return Err(Error::PluginKindMismatch {
                name: name.to_string(),
                expected: self.kind,
                found: plugin.kind(),
            });
        }
        Ok(self.cell.get_or_init(|| plugin).clone())
    }
}

/// A thread-safe table of named plugins.
#[derive(Default)]
pub struct PluginRegistry {
    entries: RwLock<HashMap<(PluginKind, String), Arc<Entry>>>,
}

impl PluginRegistry {
    /// Build an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` under `name`.
    ///
    /// Any plugin previously registered with the same kind and name is replaced.
    pub fn register<N: Into<String>>(&self, name: N, plugin: Plugin) {
        let name = name.into();
        let kind = plugin.kind();
        debug!("Registering {} plugin {:?}", kind, name);
        self.insert(kind, name, Entry::loaded(plugin));
    }

    /// Register a plugin of the given kind under `name`,
    /// that will be produced by `loader` when first resolved.
    ///
    /// If the loader fails, the error is reported by [`resolve`](Self::resolve),
    /// and the loader will be tried again on the next call.
    pub fn register_lazy<N, F>(&self, kind: PluginKind, name: N, loader: F)
    where
        N: Into<String>,
        F: Fn() -> Result<Plugin, BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registering lazy {} plugin {:?}", kind, name);
        self.insert(kind, name, Entry::lazy(kind, Arc::new(loader)));
    }

    fn insert(&self, kind: PluginKind, name: String, entry: Entry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((kind, name), Arc::new(entry));
    }

    /// Retrieve the plugin registered with the given kind and name.
    pub fn resolve(&self, kind: PluginKind, name: &str) -> Result<Plugin> {
        let entry = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| Error::PluginNotFound {
                kind,
                name: name.to_string(),
            })?;
        // the table lock is released here, so a slow loader does not block the registry
        entry.get(name)
    }

    /// Build a new parser from the plugin registered under `name`.
    pub fn parser(&self, name: &str) -> Result<Box<dyn Parser>> {
        match self.resolve(PluginKind::Parser, name)? {
            Plugin::Parser(factory) => Ok(factory()),
            other => Err(self.mismatch(name, PluginKind::Parser, &other)),
        }
    }

    /// Build a new serializer from the plugin registered under `name`.
    pub fn serializer(&self, name: &str) -> Result<Box<dyn Serializer>> {
        match self.resolve(PluginKind::Serializer, name)? {
            Plugin::Serializer(factory) => Ok(factory()),
            other => Err(self.mismatch(name, PluginKind::Serializer, &other)),
        }
    }

    /// Open a new store from the plugin registered under `name`.
    pub fn store(&self, name: &str) -> Result<Arc<dyn Store>> {
        match self.resolve(PluginKind::Store, name)? {
            Plugin::Store(factory) => factory().map_err(Error::Store),
            other => Err(self.mismatch(name, PluginKind::Store, &other)),
        }
    }

    fn mismatch(&self, name: &str, expected: PluginKind, found: &Plugin) -> Error {
        Error::PluginKindMismatch {
            name: name.to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// Whether a plugin is registered with the given kind and name.
    ///
    /// A lazy plugin is reported even if its loader has not run yet.
    pub fn contains(&self, kind: PluginKind, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(kind, name.to_string()))
    }

    /// The names of all plugins of the given kind, sorted.
    pub fn names(&self, kind: PluginKind) -> Vec<String> {
        let mut names: Vec<_> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<_> = entries.keys().collect();
        keys.sort();
        f.debug_struct("PluginRegistry")
            .field("entries", &keys)
            .finish()
    }
}
