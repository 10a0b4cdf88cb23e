// this module is transparently re-exported by its parent `lib`
//
// Implement the total order of terms, and the strict comparison of literals.

use std::cmp::Ordering;

use crate::*;

/// The collation group of a literal.
///
/// Well-formed numbers sort before every other literal,
/// which are grouped by datatype IRI
/// (plain and language-tagged literals are grouped with `xsd:string`).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Group<'a> {
    Numeric,
    Datatype(&'a str),
}

impl Literal {
    fn group(&self) -> Group<'_> {
        match self.datatype() {
            _ if self.is_numeric() => Group::Numeric,
            Some(dt) if self.language().is_none() => Group::Datatype(dt.as_str()),
            _ => Group::Datatype(ns::xsd::string.as_str()),
        }
    }

    fn has_numeric_datatype(&self) -> bool {
        self.xsd_datatype()
            .map(|dt| dt.is_numeric())
            .unwrap_or(false)
    }

    /// Compare two literals according to `mode`.
    ///
    /// In [`Strict`](ComparisonMode::Strict) mode,
    /// literals of different collation groups are incomparable
    /// unless both have a numeric datatype.
    pub fn compare(&self, other: &Literal, mode: ComparisonMode) -> Result<Ordering, Incomparable> {
        if mode == ComparisonMode::Strict
            && self.group() != other.group()
            && !(self.has_numeric_datatype() && other.has_numeric_datatype())
        {
            return Err(Incomparable {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        Ok(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Literal) -> Ordering {
        match (self.group(), other.group()) {
            (Group::Numeric, Group::Numeric) => {
                let v1 = self.value().and_then(XsdValue::as_number);
                let v2 = other.value().and_then(XsdValue::as_number);
                let by_value = match (v1, v2) {
                    (Some(n1), Some(n2)) => n1.total_cmp(n2),
                    _ => Ordering::Equal,
                };
                by_value
                    .then_with(|| self.lexical_form().cmp(other.lexical_form()))
                    .then_with(|| self.datatype().cmp(&other.datatype()))
            }
            (g1, g2) if g1 != g2 => g1.cmp(&g2),
            _ => self
                .language()
                .cmp(&other.language())
                .then_with(|| match (self.value(), other.value()) {
                    (Some(v1), Some(v2)) => v1.total_cmp(v2),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
                .then_with(|| self.lexical_form().cmp(other.lexical_form()))
                .then_with(|| self.datatype().cmp(&other.datatype())),
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Literal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Term {
    /// Compare two terms according to `mode`.
    ///
    /// Terms of different [kinds](TermKind) are always comparable;
    /// only pairs of literals may fail, in [`Strict`](ComparisonMode::Strict) mode.
    pub fn compare(&self, other: &Term, mode: ComparisonMode) -> Result<Ordering, Incomparable> {
        match (self, other) {
            (Term::Literal(l1), Term::Literal(l2)) => l1.compare(l2, mode),
            _ => Ok(self.cmp(other)),
        }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Term) -> Ordering {
        use Term::*;
        match (self, other) {
            (Iri(i1), Iri(i2)) => i1.cmp(i2),
            (BlankNode(b1), BlankNode(b2)) => b1.cmp(b2),
            (Literal(l1), Literal(l2)) => l1.cmp(l2),
            (Variable(v1), Variable(v2)) => v1.cmp(v2),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Term) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
