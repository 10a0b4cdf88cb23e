//! General-use types and traits from the lodestone API.

pub use crate::dataset::Dataset;
pub use crate::error::{Error, Result};
pub use crate::graph::{Graph, GraphView};
pub use crate::parser::{Parser, TripleSink};
pub use crate::plugin::{Plugin, PluginKind, PluginRegistry};
pub use crate::serializer::{Serializer, SerializerOptions};
pub use crate::store::Store;
pub use crate::triple::{GraphScope, Triple, TriplePattern};

pub use lodestone_term::{Term, TermConfig};
