//! Variables, as used in SPARQL graph patterns.
//!
//! Variables never appear in stored triples;
//! in a pattern, they match anything.

use crate::{Result, TermError};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

lazy_static! {
    /// Production of SPARQL's VARNAME according to the
    /// [SPARQL spec](https://www.w3.org/TR/sparql11-query/#rVARNAME).
    ///
    /// # Rule
    ///
    /// `VARNAME ::= ( PN_CHARS_U | [0-9] ) ( PN_CHARS_U | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040] )*`
    static ref VARNAME: Regex = Regex::new(r#"(?x)
      ^
      [_A-Za-z0-9\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{10000}-\U{EFFFF}]
      [_A-Za-z0-9\u{B7}\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{300}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{10000}-\U{EFFFF}]*
      $
    "#).unwrap();
}

/// The name of a variable (without the leading `?`).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarName(Arc<str>);

impl VarName {
    /// Return a new variable name,
    /// or an error if `name` does not comply with SPARQL's VARNAME.
    pub fn new<T>(name: T) -> Result<Self>
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        if VARNAME.is_match(name.as_ref()) {
            Ok(VarName(name.into()))
        } else {
            Err(TermError::InvalidVariableName(name.as_ref().to_string()))
        }
    }

    /// Return a new variable name without checking its validity.
    ///
    /// # Pre-condition
    ///
    /// `name` must comply with SPARQL's VARNAME.
    pub fn new_unchecked<T>(name: T) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        debug_assert!(VARNAME.is_match(name.as_ref()));
        VarName(name.into())
    }

    /// Gets a reference to the underlying &str.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn write_fmt<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char('?')?;
        w.write_str(self.as_str())
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("x")]
    #[test_case("_foo")]
    #[test_case("42")]
    #[test_case("hé")]
    fn valid(name: &str) {
        assert!(VarName::new(name).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("?x" ; "leading question mark")]
    #[test_case("a-b" ; "dash")]
    #[test_case("a.b" ; "dot")]
    fn invalid(name: &str) {
        assert!(VarName::new(name).is_err());
    }
}
