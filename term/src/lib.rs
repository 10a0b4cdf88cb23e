//! I define the RDF term model of lodestone:
//! [IRIs](IriRef), [blank nodes](BnodeId), [literals](Literal) and [variables](VarName),
//! all gathered in the [`Term`] enum.
//!
//! All terms are immutable, thread-safe,
//! and cheap to clone (they share their text through [`Arc<str>`](std::sync::Arc)).
//!
//! Literals of the common XSD datatypes are parsed when they are built,
//! and their lexical form is normalized (see [`TermConfig`]).
//! Terms are totally ordered (see [`Term::compare`] for the strict alternative).
#![deny(missing_docs)]

mod _cmp;
mod _config;
pub use _config::*;
mod _display;
mod _error;
pub use _error::*;

pub mod blank_node;
pub use blank_node::BnodeId;
pub mod iri;
pub use iri::IriRef;
pub mod language_tag;
pub use language_tag::LanguageTag;
pub mod literal;
pub use literal::{Literal, XsdDatatype, XsdValue};
pub mod ns;
pub mod variable;
pub use variable::VarName;

/// An RDF term.
///
/// Equality is structural,
/// and the ordering is total (see [`Term::compare`] for details).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Term {
    /// An [IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri(IriRef),
    /// A [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    BlankNode(BnodeId),
    /// A [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal)
    Literal(Literal),
    /// A [variable](https://www.w3.org/TR/sparql11-query/#sparqlQueryVariables),
    /// only meaningful in patterns
    Variable(VarName),
}

/// The kinds of [`Term`].
///
/// Kinds are ordered: blank nodes, then variables, then IRIs, then literals.
/// This is the first criterion of the ordering of terms.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TermKind {
    /// See [`Term::BlankNode`]
    BlankNode,
    /// See [`Term::Variable`]
    Variable,
    /// See [`Term::Iri`]
    Iri,
    /// See [`Term::Literal`]
    Literal,
}

impl Term {
    /// Return a new IRI term, or an error if `iri` is not a valid IRI reference.
    pub fn new_iri<T>(iri: T) -> Result<Term>
    where
        T: AsRef<str> + Into<std::sync::Arc<str>>,
    {
        IriRef::new(iri).map(Term::Iri)
    }

    /// Return a new blank node, or an error if `id` is not a valid identifier.
    pub fn new_bnode<T>(id: T) -> Result<Term>
    where
        T: AsRef<str> + Into<std::sync::Arc<str>>,
    {
        BnodeId::new(id).map(Term::BlankNode)
    }

    /// Return a new variable, or an error if `name` is not a valid variable name.
    pub fn new_variable<T>(name: T) -> Result<Term>
    where
        T: AsRef<str> + Into<std::sync::Arc<str>>,
    {
        VarName::new(name).map(Term::Variable)
    }

    /// The kind of this term.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Iri(_) => TermKind::Iri,
            Term::BlankNode(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
            Term::Variable(_) => TermKind::Variable,
        }
    }

    /// Whether this term is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Whether this term is a blank node.
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Whether this term is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Whether this term is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// The IRI of this term, if it is one.
    pub fn as_iri(&self) -> Option<&IriRef> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The blank node identifier of this term, if it is one.
    pub fn as_blank_node(&self) -> Option<&BnodeId> {
        match self {
            Term::BlankNode(bn) => Some(bn),
            _ => None,
        }
    }

    /// The literal of this term, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The variable name of this term, if it is one.
    pub fn as_variable(&self) -> Option<&VarName> {
        match self {
            Term::Variable(var) => Some(var),
            _ => None,
        }
    }
}

impl From<IriRef> for Term {
    fn from(iri: IriRef) -> Self {
        Term::Iri(iri)
    }
}

impl From<BnodeId> for Term {
    fn from(bn: BnodeId) -> Self {
        Term::BlankNode(bn)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<VarName> for Term {
    fn from(var: VarName) -> Self {
        Term::Variable(var)
    }
}

#[cfg(test)]
mod test;
