//! An RDF dataset is a default graph plus any number of named graphs.
//!
//! A [`Dataset`] views all the graphs of a [`Store`];
//! each graph is identified by its *context* (an IRI or a blank node).
//! The graphs returned by [`Dataset::graph`], [`Dataset::default_graph`]
//! and [`Dataset::merged`] share the store of the dataset.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::sync::Arc;

use lodestone_term::{Term, TermConfig};

use crate::error::{Error, Result};
use crate::graph::{check_context, Graph, GraphView, QuadSource};
use crate::parser::ParseStats;
use crate::plugin::PluginRegistry;
use crate::serializer::SerializerOptions;
use crate::store::Store;
use crate::triple::{GraphScope, Triple, TriplePattern};

/// A collection of named graphs, plus a default graph.
#[derive(Debug)]
pub struct Dataset {
    graph: Graph,
}

impl Dataset {
    /// A dataset viewing all the graphs of `store`.
    ///
    /// `registry` is used to look up parsers and serializers.
    pub fn new(store: Arc<dyn Store>, registry: Arc<PluginRegistry>) -> Self {
        Dataset {
            graph: Graph::build(store, registry, GraphScope::Union),
        }
    }

    /// A dataset viewing a new store,
    /// built by the store plugin registered under `store_name`.
    pub fn open(registry: Arc<PluginRegistry>, store_name: &str) -> Result<Self> {
        let store = registry.store(store_name)?;
        Ok(Self::new(store, registry))
    }

    /// Use `config` when building the terms of parsed triples.
    ///
    /// Graphs obtained from this dataset inherit its configuration.
    pub fn with_config(self, config: TermConfig) -> Self {
        Dataset {
            graph: self.graph.with_config(config),
        }
    }

    /// The graph named `ctx`.
    ///
    /// Fails with [`Error::InvalidContext`] unless `ctx` is an IRI or a blank node.
    pub fn graph(&self, ctx: Term) -> Result<Graph> {
        check_context(&ctx)?;
        self.graph.view(GraphScope::Named(ctx), true)
    }

    /// The default graph.
    pub fn default_graph(&self) -> Result<Graph> {
        self.graph.view(GraphScope::Default, true)
    }

    /// A read-only graph containing the triples of all the graphs of this dataset.
    pub fn merged(&self) -> Result<Graph> {
        self.graph.view(GraphScope::Union, false)
    }

    /// The names of the non-empty named graphs.
    pub fn contexts(&self) -> Result<BTreeSet<Term>> {
        self.graph.store()?.contexts().map_err(Error::Store)
    }

    /// Add `t` to the graph named `ctx`, or to the default graph if `ctx` is `None`.
    ///
    /// Return `true` iff the triple was not already present in that graph.
    pub fn add(&mut self, t: Triple, ctx: Option<Term>) -> Result<bool> {
        let store = self.graph.store()?;
        if let Some(ctx) = &ctx {
            check_context(ctx)?;
        }
        store.add(&t, ctx.as_ref()).map_err(Error::Store)
    }

    /// Whether `t` belongs to the graph named `ctx`, or to the default graph if `ctx` is `None`.
    pub fn contains(&self, t: &Triple, ctx: Option<&Term>) -> Result<bool> {
        self.graph
            .store()?
            .contains(t, &GraphScope::from_context(ctx))
            .map_err(Error::Store)
    }

    /// Iterate over the triples matching `pattern` in every graph,
    /// together with the name of their graph.
    ///
    /// The triples of the default graph come first.
    pub fn quads(&self, pattern: &TriplePattern) -> Result<QuadSource<'_>> {
        self.graph.quads(pattern)
    }

    /// The number of distinct triples in this dataset, all graphs included.
    pub fn len(&self) -> Result<usize> {
        self.graph.len()
    }

    /// Whether all graphs are empty.
    pub fn is_empty(&self) -> Result<bool> {
        self.graph.is_empty()
    }

    /// Remove all the triples matching `pattern` from every graph.
    pub fn remove(&mut self, pattern: &TriplePattern) -> Result<usize> {
        self.graph.remove(pattern)
    }

    /// Remove the graph named `ctx`.
    ///
    /// Return the number of triples it contained.
    pub fn remove_graph(&mut self, ctx: &Term) -> Result<usize> {
        let store = self.graph.store()?;
        check_context(ctx)?;
        store.remove_context(ctx).map_err(Error::Store)
    }

    /// Parse `source` with the parser registered under `format`.
    ///
    /// Triples are added to the graph indicated by the parser,
    /// or to the default graph.
    pub fn parse(&mut self, source: &mut dyn BufRead, format: &str) -> Result<ParseStats> {
        self.graph.parse(source, format)
    }

    /// Serialize this dataset with the serializer registered under `format`.
    ///
    /// The serializer receives the merged graph,
    /// whose [`quads`](GraphView::quads) carry the name of each graph.
    pub fn serialize(&self, format: &str) -> Result<Vec<u8>> {
        self.graph.serialize(format)
    }

    /// Serialize this dataset with the serializer registered under `format`,
    /// into `target`.
    pub fn serialize_with(
        &self,
        format: &str,
        options: &SerializerOptions,
        target: &mut dyn Write,
    ) -> Result<()> {
        self.graph.serialize_with(format, options, target)
    }

    /// Whether [`close`](Dataset::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.graph.is_closed()
    }

    /// Release this dataset.
    ///
    /// The underlying store is closed when the last graph using it is closed or dropped,
    /// so graphs obtained from this dataset remain usable until then.
    /// A store still held by the caller is left open (see [`Graph`]).
    pub fn close(&mut self) -> Result<()> {
        self.graph.close()
    }
}
