//! A [`TermIndex`] is a bidirectional association of [terms](`Term`) with short numeric indices.
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use lodestone_api::term::Term;
use thiserror::Error;

/// The short numeric indices representing [terms](`Term`) in a [`TermIndex`].
pub type Index = u32;

/// Raised when a [`TermIndex`] can not hold any more terms.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("The term index is full ({} terms)", Index::MAX)]
pub struct TermIndexFull;

/// A bidirectional association of [terms](`Term`) with short numeric indices.
///
/// Terms are never removed from the index.
#[derive(Clone, Debug, Default)]
pub struct TermIndex {
    t2i: HashMap<Term, Index>,
    i2t: Vec<Term>,
}

impl TermIndex {
    /// Build an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of terms in this index.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether this index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the index corresponding to term `t`, if it exists.
    pub fn get_index(&self, t: &Term) -> Option<Index> {
        self.t2i.get(t).copied()
    }

    /// Get the index corresponding to term `t`, adding it in the index if necessary.
    pub fn ensure_index(&mut self, t: &Term) -> Result<Index, TermIndexFull> {
        if let Some(i) = self.t2i.get(t) {
            return Ok(*i);
        }
        let i = Index::try_from(self.i2t.len()).map_err(|_| TermIndexFull)?;
        match self.t2i.entry(t.clone()) {
            Entry::Vacant(e) => {
                self.i2t.push(t.clone());
                e.insert(i);
                Ok(i)
            }
            Entry::Occupied(e) => Ok(*e.get()),
        }
    }

    /// Get the term corresponding to index `i`.
    ///
    /// Return `None` if `i` was not returned by this index.
    pub fn get_term(&self, i: Index) -> Option<&Term> {
        self.i2t.get(i as usize)
    }

    /// Remove every term from this index.
    pub fn clear(&mut self) {
        self.t2i.clear();
        self.i2t.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lodestone_api::term::{BnodeId, IriRef, Literal};

    #[test]
    fn term_index() {
        let exa = Term::from(IriRef::new_unchecked("https://example.com/ns/a"));
        let exb = Term::from(IriRef::new_unchecked("https://example.com/ns/b"));
        let bn1 = Term::from(BnodeId::new_unchecked("bn1"));
        let hello = Term::from(Literal::plain("hello world"));
        let one = Term::from(Literal::from(1_i64));
        let also_one = Term::from(Literal::typed(
            "01",
            IriRef::new_unchecked("http://www.w3.org/2001/XMLSchema#integer"),
        ));

        let mut ti = TermIndex::new();
        assert!(ti.is_empty());
        assert_eq!(ti.get_index(&exa), None);

        assert_eq!(ti.ensure_index(&exa), Ok(0));
        assert_eq!(ti.ensure_index(&exb), Ok(1));
        assert_eq!(ti.ensure_index(&bn1), Ok(2));
        assert_eq!(ti.ensure_index(&hello), Ok(3));
        assert_eq!(ti.ensure_index(&exa), Ok(0));
        assert_eq!(ti.len(), 4);

        assert_eq!(ti.get_index(&bn1), Some(2));
        assert_eq!(ti.get_index(&one), None);
        assert_eq!(ti.get_term(1), Some(&exb));
        assert_eq!(ti.get_term(4), None);

        // equal terms share an index
        assert_eq!(ti.ensure_index(&one), Ok(4));
        assert_eq!(ti.get_index(&also_one), Some(4));

        ti.clear();
        assert!(ti.is_empty());
        assert_eq!(ti.get_index(&exa), None);
    }
}
