// this module is transparently re-exported by its parent `lib`
//
// Implement the Display trait for Term, using the N-Triples syntax.

use std::fmt;

use crate::*;

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fmt(f)
    }
}

impl Term {
    /// Writes the term to the `fmt::Write` using the NTriples syntax.
    ///
    /// This means the IRI is in angled brackets and no prefix is used.
    /// Variables, which N-Triples does not support, are written `?name`.
    pub fn write_fmt<W>(&self, w: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match self {
            Term::Iri(iri) => iri.write_fmt(w),
            Term::BlankNode(bn) => bn.write_fmt(w),
            Term::Literal(lit) => lit.write_fmt(w),
            Term::Variable(var) => var.write_fmt(w),
        }
    }
}
