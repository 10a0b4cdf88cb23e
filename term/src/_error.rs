use thiserror::Error;

/// Type alias for `Result` with default error `TermError`.
///
/// Can be used like `std::result::Result` as well.
pub type Result<T, E = TermError> = std::result::Result<T, E>;

/// This error is raised when the creation of a term fails.
///
/// Note that building a [`Literal`](crate::Literal) never fails:
/// lexical forms that are invalid for their datatype are kept as is,
/// and flagged as [ill-formed](crate::Literal::is_ill_formed).
#[derive(Debug, Error)]
pub enum TermError {
    /// The IRI of a term must apply to [RFC 3987](https://tools.ietf.org/html/rfc3987).
    #[error("The given IRI '{iri}' is not valid according to RFC3987: {reason}")]
    InvalidIri {
        /// The provided, faulty IRI.
        iri: String,
        /// What is wrong with `iri`.
        reason: String,
    },
    /// Blank node identifiers must apply to Turtle's
    /// [production rules](https://www.w3.org/TR/turtle/#grammar-production-BLANK_NODE_LABEL).
    #[error("The given blank node identifier '{0}' does not comply with Turtle's BLANK_NODE_LABEL")]
    InvalidBlankNodeId(String),
    /// The language tags of literals must apply to [BCP47](https://tools.ietf.org/html/bcp47).
    #[error("The given language tag '{0}' does not comply with BCP47")]
    InvalidLanguageTag(String),
    /// Names of variables must apply to SPARQL's [production rules](https://www.w3.org/TR/sparql11-query/#rVARNAME).
    #[error("The given variable name '{0}' does not comply with SPARQL's VARNAME")]
    InvalidVariableName(String),
}

/// This error is raised by [strict](crate::ComparisonMode::Strict) comparisons
/// of literals whose datatypes are unrelated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Literals {left} and {right} are not comparable")]
pub struct Incomparable {
    /// The left-hand side of the comparison, in N-Triples syntax.
    pub left: String,
    /// The right-hand side of the comparison, in N-Triples syntax.
    pub right: String,
}
