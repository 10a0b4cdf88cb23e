//! A [`Store`] is the storage backend of graphs and datasets.
//!
//! It holds triples in a default graph and any number of named graphs
//! (identified by their *context*, an IRI or a blank node).
//! Graphs and datasets only ever talk to their store through this trait,
//! so any backend can be plugged in, through the [plugin registry](crate::plugin).

use std::collections::BTreeSet;
use std::fmt::Debug;

use lodestone_term::Term;

use crate::error::BoxError;
use crate::triple::{GraphScope, Triple, TriplePattern};

/// Type alias for the results of [`Store`] methods.
pub type StoreResult<T> = Result<T, BoxError>;

/// The iterator returned by [`Store::triples`].
pub type StoreSource = Box<dyn Iterator<Item = StoreResult<Triple>> + Send>;

/// The capability interface of storage backends.
///
/// All methods take `&self`, so a store can be shared between several graphs;
/// implementations are in charge of their own synchronization.
pub trait Store: Debug + Send + Sync {
    /// Insert `t` in the graph named `ctx` (or the default graph if `ctx` is `None`).
    ///
    /// Return `true` iff the triple was not already present in that graph.
    fn add(&self, t: &Triple, ctx: Option<&Term>) -> StoreResult<bool>;

    /// Remove all triples matching `pattern` from the graphs in `scope`.
    ///
    /// Return the number of triples actually removed
    /// (a triple present in several graphs of the scope counts once per graph).
    fn remove(&self, pattern: &TriplePattern, scope: &GraphScope) -> StoreResult<usize>;

    /// Iterate over the triples matching `pattern` in the graphs of `scope`.
    ///
    /// For [`GraphScope::Union`], each triple is yielded once,
    /// even if it belongs to several graphs.
    fn triples(&self, pattern: &TriplePattern, scope: &GraphScope) -> StoreResult<StoreSource>;

    /// The names of all non-empty named graphs.
    fn contexts(&self) -> StoreResult<BTreeSet<Term>>;

    /// Whether `t` belongs to one of the graphs in `scope`.
    fn contains(&self, t: &Triple, scope: &GraphScope) -> StoreResult<bool> {
        Ok(self.triples(&TriplePattern::from(t), scope)?.next().transpose()?.is_some())
    }

    /// The number of distinct triples in the graphs of `scope`.
    fn len(&self, scope: &GraphScope) -> StoreResult<usize> {
        let mut n = 0;
        for t in self.triples(&TriplePattern::any(), scope)? {
            t?;
            n += 1;
        }
        Ok(n)
    }

    /// Remove every triple from the graph named `ctx`.
    ///
    /// Return the number of triples removed.
    fn remove_context(&self, ctx: &Term) -> StoreResult<usize> {
        self.remove(&TriplePattern::any(), &GraphScope::Named(ctx.clone()))
    }

    /// Release the resources held by this store.
    ///
    /// This is called once, when the last graph using the store is closed.
    fn close(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Whether this store supports transactions.
    fn is_transactional(&self) -> bool {
        false
    }
}
