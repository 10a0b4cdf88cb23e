//! This crate defines the generic API of lodestone:
//! [triples](triple), [stores](store), [parsers](parser), [serializers](serializer),
//! the [plugin registry](plugin) that makes them available by name,
//! and the [graphs](graph) and [datasets](dataset) built on top of them.
//!
//! Terms are defined in the [`lodestone_term`] crate, re-exported as [`term`].
//!
//! Most of the time, importing the [`prelude`] is all you need.
#![deny(missing_docs)]

pub use lodestone_term as term;

pub mod dataset;
pub mod error;
pub mod graph;
pub mod parser;
pub mod plugin;
pub mod prelude;
pub mod serializer;
pub mod store;
pub mod triple;

pub use error::{BoxError, Error, Result};
