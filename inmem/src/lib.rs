//! This crate is part of lodestone,
//! an [RDF] and [Linked Data] toolkit in Rust.
//!
//! It provides an in-memory implementation of the [`Store`](lodestone_api::store::Store) interface,
//! which can be made available to graphs and datasets through a
//! [plugin registry](lodestone_api::plugin::PluginRegistry) with [`register`].
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [Linked Data]: http://linkeddata.org/

pub mod index;
pub mod store;
pub use store::{register, MemoryStore};

#[cfg(test)]
mod test;
