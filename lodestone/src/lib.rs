//! This crate aims to provide the core of a toolkit
//! for working with [RDF] and [Linked Data] in Rust.
//!
//! Each piece of knowledge in RDF is represented by a [triple], made of three [term]s.
//! A set of [triple]s forms an RDF [graph].
//! Several [graph]s can be grouped in a [dataset], where each graph is identified by a name.
//!
//! Graphs and datasets keep their triples in a [store],
//! and find parsers, serializers and stores by name in a [plugin] registry.
//! [`registry`] returns a registry where the [in-memory store](inmem) is available.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [Linked Data]: http://linkeddata.org/
//!
//! # Getting Started
//!
//! ```
//! use lodestone::prelude::*;
//! use lodestone::term::{IriRef, Literal};
//!
//! # fn main() -> Result<()> {
//! let mut graph = Graph::open(lodestone::registry(), "memory")?;
//! let alice = Term::from(IriRef::new("http://example.org/alice")?);
//! let name = Term::from(IriRef::new("http://xmlns.com/foaf/0.1/name")?);
//! graph.add(Triple::new(alice, name, Literal::plain("Alice"))?)?;
//! assert_eq!(graph.len()?, 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub use lodestone_api::{dataset, error, graph, parser, plugin, serializer, store, triple};
pub use lodestone_api::{Error, Result};
pub use lodestone_inmem as inmem;
pub use lodestone_term as term;

/// General-use types and traits.
pub mod prelude {
    pub use lodestone_api::prelude::*;
}

/// A new plugin registry, where the [in-memory store](inmem::MemoryStore)
/// is registered under the names `"memory"` and `"default"`.
pub fn registry() -> Arc<plugin::PluginRegistry> {
    let registry = plugin::PluginRegistry::new();
    inmem::register(&registry);
    Arc::new(registry)
}
