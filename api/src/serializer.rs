//! API for serializing RDF syntaxes.
//!
//! A [`Serializer`] writes the triples of any [`GraphView`]
//! (a graph, or one of the set-algebra views) to a byte stream.
//! Serializers are made available to graphs and datasets
//! through the [plugin registry](crate::plugin).

use std::io::Write;

use lodestone_term::IriRef;

use crate::error::Result;
use crate::graph::GraphView;

/// A serializer for some RDF concrete syntax.
pub trait Serializer: Send + Sync {
    /// Write the triples of `graph` to `target`.
    ///
    /// When `options.sorted` is set, triples must be written in the order of
    /// [`GraphView::sorted_triples`].
    fn serialize(
        &self,
        graph: &dyn GraphView,
        options: &SerializerOptions,
        target: &mut dyn Write,
    ) -> Result<()>;
}

/// Options passed to [`Serializer::serialize`].
///
/// Serializers are free to ignore options that make no sense for their syntax.
#[derive(Clone, Debug, Default)]
pub struct SerializerOptions {
    /// The base IRI against which IRIs may be relativized.
    pub base: Option<IriRef>,
    /// Prefix declarations.
    pub prefixes: Vec<(String, IriRef)>,
    /// Whether triples must be written in a deterministic order.
    pub sorted: bool,
}

impl SerializerOptions {
    /// Build the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI.
    pub fn with_base(mut self, base: IriRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a prefix declaration, replacing any previous one with the same prefix.
    pub fn with_prefix<P: Into<String>>(mut self, prefix: P, ns: IriRef) -> Self {
        let prefix = prefix.into();
        self.prefixes.retain(|(p, _)| p != &prefix);
        self.prefixes.push((prefix, ns));
        self
    }

    /// Require (or not) a deterministic order.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}
