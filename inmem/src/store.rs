//! An in-memory implementation of [`Store`].
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use lodestone_api::plugin::{Plugin, PluginRegistry};
use lodestone_api::store::{Store, StoreResult, StoreSource};
use lodestone_api::term::Term;
use lodestone_api::triple::{GraphScope, Triple, TriplePattern};

use crate::index::{Index, TermIndex};

/// The plugin names under which [`register`] makes [`MemoryStore`] available.
pub const PLUGIN_NAMES: [&str; 2] = ["memory", "default"];

/// An index of a graph name: `None` is the default graph.
type GraphKey = Option<Index>;

/// The index constraints of a [`TriplePattern`].
type IndexPattern = [Option<Index>; 3];

/// A [`Store`] keeping all its triples in memory.
///
/// Terms are interned in a [`TermIndex`], and each graph is a set of SPO index triples.
/// Iterators returned by [`triples`](Store::triples) work on a snapshot
/// taken when they are created, so the store can be modified while they are consumed.
///
/// Interned terms are only freed when the store becomes empty (or is closed),
/// so a long-lived store with many removals keeps growing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    terms: TermIndex,
    graphs: BTreeMap<GraphKey, BTreeSet<[Index; 3]>>,
}

impl MemoryStore {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    /// `None` if some term of `pattern` is unknown, so that nothing can match.
    fn index_pattern(&self, pattern: &TriplePattern) -> Option<IndexPattern> {
        let mut ip = [None; 3];
        for (i, t) in pattern.spo().into_iter().enumerate() {
            if let Some(t) = t {
                ip[i] = Some(self.terms.get_index(t)?);
            }
        }
        Some(ip)
    }

    /// The keys of the existing graphs in `scope`.
    fn graph_keys(&self, scope: &GraphScope) -> Vec<GraphKey> {
        match scope {
            GraphScope::Default => vec![None],
            GraphScope::Named(ctx) => match self.terms.get_index(ctx) {
                Some(i) => vec![Some(i)],
                None => vec![],
            },
            GraphScope::Union => self.graphs.keys().copied().collect(),
        }
    }

    fn matching<'a>(
        &'a self,
        key: GraphKey,
        ip: IndexPattern,
    ) -> impl Iterator<Item = [Index; 3]> + 'a {
        let graph = self.graphs.get(&key);
        let candidates: Box<dyn Iterator<Item = &'a [Index; 3]> + 'a> = match (graph, ip[0]) {
            (None, _) => Box::new(std::iter::empty()),
            (Some(g), Some(s)) => Box::new(g.range([s, 0, 0]..=[s, Index::MAX, Index::MAX])),
            (Some(g), None) => Box::new(g.iter()),
        };
        candidates
            .filter(move |spo| {
                ip[1].map(|p| spo[1] == p).unwrap_or(true)
                    && ip[2].map(|o| spo[2] == o).unwrap_or(true)
            })
            .copied()
    }

    fn forget_terms_if_empty(&mut self) {
        if self.graphs.is_empty() {
            self.terms.clear();
        }
    }

    fn triple(&self, spo: [Index; 3]) -> StoreResult<Triple> {
        let [s, p, o] = spo.map(|i| self.terms.get_term(i).cloned());
        match (s, p, o) {
            (Some(s), Some(p), Some(o)) => Ok(Triple::new(s, p, o)?),
            _ => Err(format!("Dangling term index in {spo:?}").into()),
        }
    }
}

impl Store for MemoryStore {
    fn add(&self, t: &Triple, ctx: Option<&Term>) -> StoreResult<bool> {
        let mut inner = self.write();
        let mut spo = [0; 3];
        for (i, term) in t.spo().into_iter().enumerate() {
            spo[i] = inner.terms.ensure_index(term)?;
        }
        let key = match ctx {
            Some(ctx) => Some(inner.terms.ensure_index(ctx)?),
            None => None,
        };
        Ok(inner.graphs.entry(key).or_default().insert(spo))
    }

    fn remove(&self, pattern: &TriplePattern, scope: &GraphScope) -> StoreResult<usize> {
        let mut inner = self.write();
        let Some(ip) = inner.index_pattern(pattern) else {
            return Ok(0);
        };
        let mut removed = 0;
        for key in inner.graph_keys(scope) {
            let doomed: Vec<_> = inner.matching(key, ip).collect();
            if doomed.is_empty() {
                continue;
            }
            if let Some(graph) = inner.graphs.get_mut(&key) {
                for spo in &doomed {
                    graph.remove(spo);
                }
                removed += doomed.len();
                if graph.is_empty() {
                    inner.graphs.remove(&key);
                }
            }
        }
        inner.forget_terms_if_empty();
        Ok(removed)
    }

    fn triples(&self, pattern: &TriplePattern, scope: &GraphScope) -> StoreResult<StoreSource> {
        let inner = self.read();
        let Some(ip) = inner.index_pattern(pattern) else {
            return Ok(Box::new(std::iter::empty()));
        };
        let keys = inner.graph_keys(scope);
        let snapshot: Vec<StoreResult<Triple>> = if keys.len() == 1 {
            inner.matching(keys[0], ip).map(|spo| inner.triple(spo)).collect()
        } else {
            // a triple may belong to several graphs
            let distinct: BTreeSet<_> = keys
                .into_iter()
                .flat_map(|key| inner.matching(key, ip))
                .collect();
            distinct.into_iter().map(|spo| inner.triple(spo)).collect()
        };
        Ok(Box::new(snapshot.into_iter()))
    }

    fn contexts(&self) -> StoreResult<BTreeSet<Term>> {
        let inner = self.read();
        inner
            .graphs
            .iter()
            .filter(|(_, graph)| !graph.is_empty())
            .filter_map(|(key, _)| *key)
            .map(|i| {
                inner
                    .terms
                    .get_term(i)
                    .cloned()
                    .ok_or_else(|| format!("Dangling graph index {i}").into())
            })
            .collect()
    }

    fn contains(&self, t: &Triple, scope: &GraphScope) -> StoreResult<bool> {
        let inner = self.read();
        let Some(ip) = inner.index_pattern(&TriplePattern::from(t)) else {
            return Ok(false);
        };
        Ok(inner
            .graph_keys(scope)
            .into_iter()
            .any(|key| inner.matching(key, ip).next().is_some()))
    }

    fn len(&self, scope: &GraphScope) -> StoreResult<usize> {
        let inner = self.read();
        let keys = inner.graph_keys(scope);
        if keys.len() == 1 {
            return Ok(inner.graphs.get(&keys[0]).map(BTreeSet::len).unwrap_or(0));
        }
        let distinct: BTreeSet<_> = keys
            .iter()
            .filter_map(|key| inner.graphs.get(key))
            .flatten()
            .collect();
        Ok(distinct.len())
    }

    fn remove_context(&self, ctx: &Term) -> StoreResult<usize> {
        let mut inner = self.write();
        let Some(key) = inner.terms.get_index(ctx) else {
            return Ok(0);
        };
        let removed = inner.graphs.remove(&Some(key)).map(|g| g.len()).unwrap_or(0);
        inner.forget_terms_if_empty();
        Ok(removed)
    }

    fn close(&self) -> StoreResult<()> {
        let mut inner = self.write();
        debug!(
            "Closing memory store ({} graphs, {} terms)",
            inner.graphs.len(),
            inner.terms.len()
        );
        inner.graphs.clear();
        inner.terms.clear();
        Ok(())
    }
}

/// Register [`MemoryStore`] in `registry`, under each of the [`PLUGIN_NAMES`].
pub fn register(registry: &PluginRegistry) {
    for name in PLUGIN_NAMES {
        registry.register(
            name,
            Plugin::store(|| {
                let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
                Ok(store)
            }),
        );
    }
}
