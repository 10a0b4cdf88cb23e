//! An RDF triple expresses a single fact.
//! It is formed of three terms called *subject*, *predicate* and *object*.
//!
//! This module also defines [`TriplePattern`]s,
//! used to select triples in a graph or a store,
//! and the [`GraphScope`] of such a selection.

use std::cmp::Ordering;
use std::fmt;

use lodestone_term::{ComparisonMode, Incomparable, Term, TermKind};
use thiserror::Error;

/// An RDF triple.
///
/// A triple can only be built through [`Triple::new`],
/// which guarantees that
/// its subject is an IRI or a blank node,
/// its predicate is an IRI,
/// and its object is not a variable.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Triple {
    s: Term,
    p: Term,
    o: Term,
}

impl Triple {
    /// Build a triple, checking the kind of each position.
    pub fn new<S, P, O>(s: S, p: P, o: O) -> Result<Self, MalformedTriple>
    where
        S: Into<Term>,
        P: Into<Term>,
        O: Into<Term>,
    {
        let (s, p, o) = (s.into(), p.into(), o.into());
        if !matches!(s.kind(), TermKind::Iri | TermKind::BlankNode) {
            return Err(MalformedTriple::new(Position::Subject, s));
        }
        if !p.is_iri() {
            return Err(MalformedTriple::new(Position::Predicate, p));
        }
        if o.is_variable() {
            return Err(MalformedTriple::new(Position::Object, o));
        }
        Ok(Triple { s, p, o })
    }

    /// The subject of this triple.
    pub fn s(&self) -> &Term {
        &self.s
    }

    /// The predicate of this triple.
    pub fn p(&self) -> &Term {
        &self.p
    }

    /// The object of this triple.
    pub fn o(&self) -> &Term {
        &self.o
    }

    /// The three components of this triple, in order.
    pub fn spo(&self) -> [&Term; 3] {
        [&self.s, &self.p, &self.o]
    }

    /// Consume this triple into its three components.
    pub fn into_spo(self) -> (Term, Term, Term) {
        (self.s, self.p, self.o)
    }

    /// Compare two triples term by term, according to `mode`.
    ///
    /// Only the first pair of different terms is compared,
    /// so in [`Strict`](ComparisonMode::Strict) mode,
    /// triples with different subjects are comparable whatever their objects.
    pub fn compare(&self, other: &Triple, mode: ComparisonMode) -> Result<Ordering, Incomparable> {
        for (t1, t2) in self.spo().into_iter().zip(other.spo()) {
            match t1.compare(t2, mode)? {
                Ordering::Equal => continue,
                ord => return Ok(ord),
            }
        }
        Ok(Ordering::Equal)
    }
}

/// Triples are displayed as N-Triples lines, without the final newline.
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

/// The position of a term in a triple.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Position {
    /// See [`Triple::s`]
    Subject,
    /// See [`Triple::p`]
    Predicate,
    /// See [`Triple::o`]
    Object,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::Subject => "subject",
            Position::Predicate => "predicate",
            Position::Object => "object",
        })
    }
}

/// This error is raised when a term is not allowed at some position of a triple.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{term} is not allowed as {position}")]
pub struct MalformedTriple {
    /// Where the faulty term was given.
    pub position: Position,
    /// The faulty term.
    pub term: Term,
}

impl MalformedTriple {
    fn new(position: Position, term: Term) -> Self {
        MalformedTriple { position, term }
    }
}

/// A pattern selecting triples.
///
/// Each position is either `None`, or a term that the selected triples must have at that position.
/// Variables match anything, just like `None`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct TriplePattern {
    /// Constraint on the subject.
    pub s: Option<Term>,
    /// Constraint on the predicate.
    pub p: Option<Term>,
    /// Constraint on the object.
    pub o: Option<Term>,
}

impl TriplePattern {
    /// Build a pattern from its three constraints.
    ///
    /// Variables are replaced by `None`.
    pub fn new(s: Option<Term>, p: Option<Term>, o: Option<Term>) -> Self {
        let bound = |t: Option<Term>| t.filter(|t| !t.is_variable());
        TriplePattern {
            s: bound(s),
            p: bound(p),
            o: bound(o),
        }
    }

    /// The pattern matching every triple.
    pub fn any() -> Self {
        TriplePattern::default()
    }

    /// Whether no position is constrained.
    pub fn is_any(&self) -> bool {
        self.spo().iter().all(Option::is_none)
    }

    /// The three constraints of this pattern, in order.
    ///
    /// Variables are reported as `None`.
    pub fn spo(&self) -> [Option<&Term>; 3] {
        fn bound(t: &Option<Term>) -> Option<&Term> {
            t.as_ref().filter(|t| !t.is_variable())
        }
        [bound(&self.s), bound(&self.p), bound(&self.o)]
    }

    /// Whether `t` is selected by this pattern.
    pub fn matches(&self, t: &Triple) -> bool {
        self.spo()
            .into_iter()
            .zip(t.spo())
            .all(|(constraint, term)| constraint.map(|c| c == term).unwrap_or(true))
    }
}

/// The pattern matching exactly one triple.
impl From<&Triple> for TriplePattern {
    fn from(t: &Triple) -> Self {
        TriplePattern {
            s: Some(t.s.clone()),
            p: Some(t.p.clone()),
            o: Some(t.o.clone()),
        }
    }
}

/// The set of graphs of a store that an operation applies to.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum GraphScope {
    /// The default (unnamed) graph.
    #[default]
    Default,
    /// The graph named by the given IRI or blank node.
    Named(Term),
    /// All the graphs of the store, including the default one.
    Union,
}

impl GraphScope {
    /// Build a scope from an optional graph name.
    pub fn from_context(ctx: Option<&Term>) -> Self {
        match ctx {
            None => GraphScope::Default,
            Some(t) => GraphScope::Named(t.clone()),
        }
    }

    /// The graph name of this scope, if it designates a single named graph.
    pub fn context(&self) -> Option<&Term> {
        match self {
            GraphScope::Named(t) => Some(t),
            _ => None,
        }
    }

    /// Whether a triple stored in the graph named `ctx` belongs to this scope.
    pub fn includes(&self, ctx: Option<&Term>) -> bool {
        match self {
            GraphScope::Default => ctx.is_none(),
            GraphScope::Named(t) => ctx == Some(t),
            GraphScope::Union => true,
        }
    }
}
