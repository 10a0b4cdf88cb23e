//! Errors raised by graphs, datasets, stores and plugins.

use crate::plugin::PluginKind;
use crate::triple::MalformedTriple;
use lodestone_term::{Incomparable, Term, TermError};
use thiserror::Error;

/// Errors coming from a collaborator (parser, serializer or store)
/// are carried as is, in a box.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Type alias for `Result` with default error [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type of this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`MalformedTriple`].
    #[error(transparent)]
    MalformedTriple(#[from] MalformedTriple),
    /// Two literals could not be compared in strict mode.
    #[error(transparent)]
    Incomparable(#[from] Incomparable),
    /// A term could not be built.
    #[error(transparent)]
    Term(#[from] TermError),
    /// No plugin is registered under this name for this kind.
    #[error("No {kind} plugin registered under the name {name:?}")]
    PluginNotFound {
        /// The kind that was looked up.
        kind: PluginKind,
        /// The name that was looked up.
        name: String,
    },
    /// A lazily registered plugin turned out to be of the wrong kind.
    #[error("Plugin {name:?} was registered as a {expected} but its loader produced a {found}")]
    PluginKindMismatch {
        /// The name of the plugin.
        name: String,
        /// The kind it was registered with.
        expected: PluginKind,
        /// The kind its loader produced.
        found: PluginKind,
    },
    /// The loader of a lazily registered plugin failed.
    #[error("Could not load {kind} plugin {name:?}: {source}")]
    PluginLoad {
        /// The kind of the plugin.
        kind: PluginKind,
        /// The name of the plugin.
        name: String,
        /// Why the loader failed.
        source: BoxError,
    },
    /// No parser or serializer is registered for this format.
    #[error("Unknown format {0:?}")]
    UnknownFormat(String),
    /// The graph (or the dataset it comes from) has been closed.
    #[error("The graph is closed")]
    GraphClosed,
    /// The graph does not accept modifications.
    #[error("The graph is read-only")]
    ReadOnlyGraph,
    /// Only IRIs and blank nodes can name a graph.
    #[error("{0} can not be used as a graph name")]
    InvalidContext(Term),
    /// An error raised by a parser.
    #[error(transparent)]
    Parser(BoxError),
    /// An error raised by a serializer.
    #[error(transparent)]
    Serializer(BoxError),
    /// An error raised by a store.
    #[error(transparent)]
    Store(BoxError),
    /// An I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error raised by a parser.
    pub fn parser<E: Into<BoxError>>(err: E) -> Self {
        Error::Parser(err.into())
    }

    /// Wrap an error raised by a serializer.
    pub fn serializer<E: Into<BoxError>>(err: E) -> Self {
        Error::Serializer(err.into())
    }

    /// Wrap an error raised by a store.
    pub fn store<E: Into<BoxError>>(err: E) -> Self {
        Error::Store(err.into())
    }
}
