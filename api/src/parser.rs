//! API for parsing RDF syntaxes.
//!
//! A [`Parser`] reads some bytes and pushes the triples it finds into a [`TripleSink`].
//! Parsers are made available to graphs and datasets
//! through the [plugin registry](crate::plugin).

use std::io::BufRead;

use lodestone_term::{Term, TermConfig};

use crate::error::Result;
use crate::triple::Triple;

/// The receiving end of a [`Parser`].
pub trait TripleSink {
    /// Receive a triple, belonging to the graph named `ctx`
    /// (or to the default graph if `ctx` is `None`).
    ///
    /// Parsers of triple-only syntaxes always pass `None`.
    fn add(&mut self, t: Triple, ctx: Option<Term>) -> Result<()>;

    /// The configuration that parsers should use to build terms.
    fn config(&self) -> &TermConfig;
}

/// A parser of some RDF concrete syntax.
pub trait Parser: Send + Sync {
    /// Parse the whole content of `source`,
    /// pushing every triple to `sink`.
    ///
    /// Syntax errors should be reported with [`Error::parser`](crate::Error::parser),
    /// I/O errors as [`Error::Io`](crate::Error::Io).
    /// Errors raised by `sink` must be passed through.
    fn parse(&self, source: &mut dyn BufRead, sink: &mut dyn TripleSink) -> Result<()>;
}

/// Statistics about a parse, returned by
/// [`Graph::parse`](crate::graph::Graph::parse) and
/// [`Dataset::parse`](crate::dataset::Dataset::parse).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParseStats {
    /// The number of triples produced by the parser.
    pub read: usize,
    /// The number of those triples that were not already present.
    pub added: usize,
}

/// A sink collecting triples in a vector.
impl TripleSink for (Vec<(Triple, Option<Term>)>, TermConfig) {
    fn add(&mut self, t: Triple, ctx: Option<Term>) -> Result<()> {
        self.0.push((t, ctx));
        Ok(())
    }

    fn config(&self) -> &TermConfig {
        &self.1
    }
}
