//! An RDF graph is a set of triples.
//!
//! This module defines the [`GraphView`] trait, for anything that can be read as a set of triples,
//! and [`Graph`], a view of some graph of a [`Store`].
//! [`GraphView`] also provides the set-algebra operations
//! ([`union`](GraphView::union), [`intersection`](GraphView::intersection),
//! [`difference`](GraphView::difference))
//! which produce lazy read-only views of their operands.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;

use log::{debug, trace, warn};
use lodestone_term::{ComparisonMode, Incomparable, Term, TermConfig};
use resiter::Map;

use crate::error::{Error, Result};
use crate::parser::{ParseStats, TripleSink};
use crate::plugin::PluginRegistry;
use crate::serializer::SerializerOptions;
use crate::store::{Store, StoreResult};
use crate::triple::{GraphScope, Triple, TriplePattern};

/// A fallible iterator of triples.
pub type TripleSource<'a> = Box<dyn Iterator<Item = Result<Triple>> + 'a>;

/// A fallible iterator of triples together with the name of their graph.
pub type QuadSource<'a> = Box<dyn Iterator<Item = Result<(Triple, Option<Term>)>> + 'a>;

/// Read access to a set of triples.
///
/// Only [`triples`](GraphView::triples) is required;
/// all other methods have a default implementation based on it.
pub trait GraphView {
    /// Iterate over the triples matching `pattern`.
    ///
    /// Each triple is yielded once.
    fn triples(&self, pattern: &TriplePattern) -> Result<TripleSource<'_>>;

    /// The name of this graph, if it is a named graph.
    fn context(&self) -> Option<&Term> {
        None
    }

    /// Iterate over the triples matching `pattern`,
    /// together with the name of the graph they belong to.
    ///
    /// Views spanning several graphs yield each triple once per graph.
    fn quads(&self, pattern: &TriplePattern) -> Result<QuadSource<'_>> {
        let ctx = self.context().cloned();
        Ok(Box::new(
            self.triples(pattern)?.map_ok(move |t| (t, ctx.clone())),
        ))
    }

    /// Whether `t` belongs to this graph.
    fn contains(&self, t: &Triple) -> Result<bool> {
        Ok(self
            .triples(&TriplePattern::from(t))?
            .next()
            .transpose()?
            .is_some())
    }

    /// The number of triples in this graph.
    fn len(&self) -> Result<usize> {
        let mut n = 0;
        for t in self.triples(&TriplePattern::any())? {
            t?;
            n += 1;
        }
        Ok(n)
    }

    /// Whether this graph contains no triple.
    fn is_empty(&self) -> Result<bool> {
        Ok(self
            .triples(&TriplePattern::any())?
            .next()
            .transpose()?
            .is_none())
    }

    /// All the triples of this graph, in the order of [`Triple`]
    /// (i.e. the lexicographic order of their terms).
    fn sorted_triples(&self) -> Result<Vec<Triple>> {
        let mut v = self
            .triples(&TriplePattern::any())?
            .collect::<Result<Vec<_>>>()?;
        v.sort();
        v.dedup();
        Ok(v)
    }

    /// A view of the triples belonging to this graph or to `other`.
    fn union<'a>(&'a self, other: &'a dyn GraphView) -> Union<'a>
    where
        Self: Sized,
    {
        Union(self, other)
    }

    /// A view of the triples belonging to both this graph and `other`.
    fn intersection<'a>(&'a self, other: &'a dyn GraphView) -> Intersection<'a>
    where
        Self: Sized,
    {
        Intersection(self, other)
    }

    /// A view of the triples belonging to this graph but not to `other`.
    fn difference<'a>(&'a self, other: &'a dyn GraphView) -> Difference<'a>
    where
        Self: Sized,
    {
        Difference(self, other)
    }
}

/// Keep the triples of `source` for which `other.contains` is `keep`.
fn filter_by<'a>(
    source: TripleSource<'a>,
    other: &'a dyn GraphView,
    keep: bool,
) -> TripleSource<'a> {
    Box::new(source.filter_map(move |res| match res {
        Ok(t) => match other.contains(&t) {
            Ok(found) if found == keep => Some(Ok(t)),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        },
        Err(err) => Some(Err(err)),
    }))
}

/// See [`GraphView::union`].
#[derive(Clone, Copy)]
pub struct Union<'a>(&'a dyn GraphView, &'a dyn GraphView);

impl GraphView for Union<'_> {
    fn triples(&self, pattern: &TriplePattern) -> Result<TripleSource<'_>> {
        let right = filter_by(self.1.triples(pattern)?, self.0, false);
        Ok(Box::new(self.0.triples(pattern)?.chain(right)))
    }
}

/// See [`GraphView::intersection`].
#[derive(Clone, Copy)]
pub struct Intersection<'a>(&'a dyn GraphView, &'a dyn GraphView);

impl GraphView for Intersection<'_> {
    fn triples(&self, pattern: &TriplePattern) -> Result<TripleSource<'_>> {
        Ok(filter_by(self.0.triples(pattern)?, self.1, true))
    }
}

/// See [`GraphView::difference`].
#[derive(Clone, Copy)]
pub struct Difference<'a>(&'a dyn GraphView, &'a dyn GraphView);

impl GraphView for Difference<'_> {
    fn triples(&self, pattern: &TriplePattern) -> Result<TripleSource<'_>> {
        Ok(filter_by(self.0.triples(pattern)?, self.1, false))
    }
}

/// Shared by a graph and the views obtained from it.
///
/// When released, the store is closed
/// unless other graphs (or the caller) still hold it.
#[derive(Debug)]
pub(crate) struct StoreHandle {
    store: Arc<dyn Store>,
    released: bool,
}

impl StoreHandle {
    fn new(store: Arc<dyn Store>) -> Self {
        StoreHandle {
            store,
            released: false,
        }
    }

    fn release(&mut self) -> StoreResult<()> {
        if std::mem::replace(&mut self.released, true) || Arc::strong_count(&self.store) > 1 {
            return Ok(());
        }
        debug!("Releasing store {:?}", self.store);
        self.store.close()
    }
}

impl Drop for StoreHandle {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("Could not close store: {err}");
        }
    }
}

/// A graph stored in a [`Store`].
///
/// A graph is a view of the store: it selects one of its graphs (see [`GraphScope`]),
/// and all reads and writes go to the store.
/// Several graphs may share the same store
/// (see [`Dataset`](crate::dataset::Dataset)).
///
/// Once [closed](Graph::close), every operation fails with [`Error::GraphClosed`].
///
/// The store is owned by the graph it was given to, and by the views obtained from that graph
/// (e.g. the graphs of a [`Dataset`](crate::dataset::Dataset)).
/// It is closed when the last of them is closed or dropped,
/// unless a clone of the store is still held elsewhere,
/// in which case closing it is left to its other holders.
#[derive(Debug)]
pub struct Graph {
    store: Option<Arc<StoreHandle>>,
    scope: GraphScope,
    writable: bool,
    config: TermConfig,
    registry: Arc<PluginRegistry>,
}

impl Graph {
    /// A graph viewing the default graph of `store`.
    ///
    /// `registry` is used to look up parsers and serializers.
    pub fn new(store: Arc<dyn Store>, registry: Arc<PluginRegistry>) -> Self {
        Self::build(store, registry, GraphScope::Default)
    }

    /// A graph viewing the graph named `ctx` in `store`.
    ///
    /// `ctx` must be an IRI or a blank node.
    pub fn named(store: Arc<dyn Store>, registry: Arc<PluginRegistry>, ctx: Term) -> Result<Self> {
        check_context(&ctx)?;
        Ok(Self::build(store, registry, GraphScope::Named(ctx)))
    }

    /// A graph viewing the default graph of a new store,
    /// built by the store plugin registered under `store_name`.
    pub fn open(registry: Arc<PluginRegistry>, store_name: &str) -> Result<Self> {
        let store = registry.store(store_name)?;
        Ok(Self::new(store, registry))
    }

    pub(crate) fn build(
        store: Arc<dyn Store>,
        registry: Arc<PluginRegistry>,
        scope: GraphScope,
    ) -> Self {
        debug!("Opening graph {:?} on {:?}", scope, store);
        Graph {
            store: Some(Arc::new(StoreHandle::new(store))),
            scope,
            writable: true,
            config: TermConfig::default(),
            registry,
        }
    }

    /// Another graph on the same store.
    pub(crate) fn view(&self, scope: GraphScope, writable: bool) -> Result<Self> {
        let store = self.store.clone().ok_or(Error::GraphClosed)?;
        Ok(Graph {
            store: Some(store),
            scope,
            writable,
            config: self.config,
            registry: self.registry.clone(),
        })
    }

    /// Use `config` when building the terms of parsed triples,
    /// and when sorting terms and triples
    /// (see [`sorted_triples`](GraphView::sorted_triples) and [`subjects`](Graph::subjects)).
    pub fn with_config(mut self, config: TermConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration used when building and sorting terms.
    pub fn config(&self) -> &TermConfig {
        &self.config
    }

    /// The registry used to look up parsers and serializers.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// The graphs of the store viewed by this graph.
    pub fn scope(&self) -> &GraphScope {
        &self.scope
    }

    /// Whether [`close`](Graph::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }

    /// Whether this graph rejects modifications.
    pub fn is_read_only(&self) -> bool {
        !self.writable
    }

    pub(crate) fn store(&self) -> Result<&dyn Store> {
        match &self.store {
            Some(handle) => Ok(&*handle.store),
            None => Err(Error::GraphClosed),
        }
    }

    fn writable_store(&self) -> Result<&dyn Store> {
        let store = self.store()?;
        if self.writable {
            Ok(store)
        } else {
            Err(Error::ReadOnlyGraph)
        }
    }

    /// Add `t` to this graph.
    ///
    /// Return `true` iff the triple was not already present.
    pub fn add(&mut self, t: Triple) -> Result<bool> {
        self.writable_store()?
            .add(&t, self.scope.context())
            .map_err(Error::Store)
    }

    /// Add all the triples of `other` to this graph.
    ///
    /// Return the number of triples that were not already present.
    pub fn add_all(&mut self, other: &dyn GraphView) -> Result<usize> {
        let store = self.writable_store()?;
        let mut added = 0;
        for t in other.triples(&TriplePattern::any())? {
            if store.add(&t?, self.scope.context()).map_err(Error::Store)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove all the triples matching `pattern` from this graph.
    ///
    /// Return the number of triples removed.
    pub fn remove(&mut self, pattern: &TriplePattern) -> Result<usize> {
        self.writable_store()?
            .remove(pattern, &self.scope)
            .map_err(Error::Store)
    }

    /// Parse `source` with the parser registered under `format`,
    /// and add the resulting triples to this graph.
    ///
    /// If the parser fails, the triples added before the failure are kept.
    pub fn parse(&mut self, source: &mut dyn BufRead, format: &str) -> Result<ParseStats> {
        let store = self.writable_store()?;
        let parser = self.registry.parser(format).map_err(|err| unknown(err, format))?;
        let mut sink = GraphSink {
            store,
            scope: &self.scope,
            config: &self.config,
            stats: ParseStats::default(),
        };
        parser.parse(source, &mut sink)?;
        debug!(
            "Parsed {} triples as {} ({} new) into {:?}",
            sink.stats.read, format, sink.stats.added, self.scope
        );
        Ok(sink.stats)
    }

    /// Serialize this graph with the serializer registered under `format`.
    pub fn serialize(&self, format: &str) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.serialize_with(format, &SerializerOptions::default(), &mut buf)?;
        Ok(buf)
    }

    /// Serialize this graph with the serializer registered under `format`,
    /// into `target`.
    pub fn serialize_with(
        &self,
        format: &str,
        options: &SerializerOptions,
        target: &mut dyn Write,
    ) -> Result<()> {
        self.store()?;
        let serializer = self
            .registry
            .serializer(format)
            .map_err(|err| unknown(err, format))?;
        serializer.serialize(self, options, target)
    }

    /// The distinct subjects of this graph, sorted.
    ///
    /// With a [`Strict`](ComparisonMode::Strict) configuration,
    /// fails with [`Error::Incomparable`] if two of them can not be compared.
    pub fn subjects(&self) -> Result<BTreeSet<Term>> {
        self.distinct(|t| t.s())
    }

    /// The distinct predicates of this graph, sorted.
    pub fn predicates(&self) -> Result<BTreeSet<Term>> {
        self.distinct(|t| t.p())
    }

    /// The distinct objects of this graph, sorted.
    pub fn objects(&self) -> Result<BTreeSet<Term>> {
        self.distinct(|t| t.o())
    }

    fn distinct(&self, f: impl Fn(&Triple) -> &Term) -> Result<BTreeSet<Term>> {
        let terms = self
            .triples(&TriplePattern::any())?
            .map_ok(|t| f(&t).clone())
            .collect::<Result<BTreeSet<_>>>()?;
        self.check_comparable(terms.iter(), Term::compare)?;
        Ok(terms)
    }

    /// Fail if two consecutive items of `sorted` are incomparable under the configured mode.
    ///
    /// Incomparable literals belong to different collation groups,
    /// and each group is contiguous in the total order,
    /// so checking consecutive items is enough.
    fn check_comparable<'a, T: 'a>(
        &self,
        mut sorted: impl Iterator<Item = &'a T>,
        compare: impl Fn(&T, &T, ComparisonMode) -> Result<Ordering, Incomparable>,
    ) -> Result<()> {
        let mode = self.config.comparison();
        if mode == ComparisonMode::Permissive {
            return Ok(());
        }
        let Some(mut prev) = sorted.next() else {
            return Ok(());
        };
        for item in sorted {
            compare(prev, item, mode)?;
            prev = item;
        }
        Ok(())
    }

    /// Release this graph.
    ///
    /// The underlying store is closed when the last graph owning it is closed
    /// (see [`Graph`]).
    /// Closing a closed graph does nothing.
    pub fn close(&mut self) -> Result<()> {
        let Some(handle) = self.store.take() else {
            return Ok(());
        };
        debug!("Closing graph {:?}", self.scope);
        if let Some(mut handle) = Arc::into_inner(handle) {
            handle.release().map_err(Error::Store)?;
        }
        Ok(())
    }
}

impl GraphView for Graph {
    fn triples(&self, pattern: &TriplePattern) -> Result<TripleSource<'_>> {
        let source = self
            .store()?
            .triples(pattern, &self.scope)
            .map_err(Error::Store)?;
        Ok(Box::new(source.map_err(Error::Store)))
    }

    fn context(&self) -> Option<&Term> {
        self.scope.context()
    }

    /// For a graph spanning all the graphs of its store,
    /// the triples of the default graph come first,
    /// followed by those of each named graph, in the order of their names.
    fn quads(&self, pattern: &TriplePattern) -> Result<QuadSource<'_>> {
        if self.scope != GraphScope::Union {
            let ctx = self.context().cloned();
            return Ok(Box::new(
                self.triples(pattern)?.map_ok(move |t| (t, ctx.clone())),
            ));
        }
        let store = self.store()?;
        let mut sources: Vec<QuadSource<'_>> = vec![];
        let default = store
            .triples(pattern, &GraphScope::Default)
            .map_err(Error::Store)?;
        sources.push(Box::new(default.map_err(Error::Store).map_ok(|t| (t, None::<Term>))));
        for ctx in store.contexts().map_err(Error::Store)? {
            let named = store
                .triples(pattern, &GraphScope::Named(ctx.clone()))
                .map_err(Error::Store)?;
            sources.push(Box::new(
                named
                    .map_err(Error::Store)
                    .map_ok(move |t| (t, Some(ctx.clone()))),
            ));
        }
        Ok(Box::new(sources.into_iter().flatten()))
    }

    fn contains(&self, t: &Triple) -> Result<bool> {
        self.store()?.contains(t, &self.scope).map_err(Error::Store)
    }

    fn len(&self) -> Result<usize> {
        self.store()?.len(&self.scope).map_err(Error::Store)
    }

    /// With a [`Strict`](ComparisonMode::Strict) configuration,
    /// fails with [`Error::Incomparable`] if two triples can not be compared.
    fn sorted_triples(&self) -> Result<Vec<Triple>> {
        let mut v = self
            .triples(&TriplePattern::any())?
            .collect::<Result<Vec<_>>>()?;
        v.sort();
        v.dedup();
        self.check_comparable(v.iter(), Triple::compare)?;
        Ok(v)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            GraphScope::Default => write!(f, "<default graph>"),
            GraphScope::Named(ctx) => write!(f, "{ctx}"),
            GraphScope::Union => write!(f, "<merged graph>"),
        }
    }
}

pub(crate) fn check_context(ctx: &Term) -> Result<()> {
    if ctx.is_iri() || ctx.is_blank_node() {
        Ok(())
    } else {
        Err(Error::InvalidContext(ctx.clone()))
    }
}

fn unknown(err: Error, format: &str) -> Error {
    match err {
        Error::PluginNotFound { .. } => Error::UnknownFormat(format.to_string()),
        err => err,
    }
}

/// Receives the triples of [`Graph::parse`].
struct GraphSink<'a> {
    store: &'a dyn Store,
    scope: &'a GraphScope,
    config: &'a TermConfig,
    stats: ParseStats,
}

impl TripleSink for GraphSink<'_> {
    fn add(&mut self, t: Triple, ctx: Option<Term>) -> Result<()> {
        // only a graph spanning the whole store honours the graph names of the source
        let target = match self.scope {
            GraphScope::Union => {
                if let Some(ctx) = &ctx {
                    check_context(ctx)?;
                }
                ctx.as_ref()
            }
            scope => scope.context(),
        };
        trace!("Parsed {} in {:?}", t, target);
        self.stats.read += 1;
        if self.store.add(&t, target).map_err(Error::Store)? {
            self.stats.added += 1;
        }
        Ok(())
    }

    fn config(&self) -> &TermConfig {
        self.config
    }
}
