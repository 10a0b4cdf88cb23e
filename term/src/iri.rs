//! IRI references, as specified in
//! [RDF](https://www.w3.org/TR/rdf11-concepts/#section-IRIs).
//!
//! An [`IriRef`] may be absolute or relative.
//! Two IRI references are equal iff their text is equal,
//! and they are ordered lexically.

use crate::{Result, TermError};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An IRI reference, checked against
/// [RFC 3987](https://tools.ietf.org/html/rfc3987) at construction time.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IriRef(Arc<str>);

impl IriRef {
    /// Return a new IRI reference,
    /// or an error if `iri` is not a valid IRI reference.
    pub fn new<T>(iri: T) -> Result<Self>
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        if let Err(err) = oxiri::IriRef::parse(iri.as_ref()) {
            return Err(TermError::InvalidIri {
                iri: iri.as_ref().to_string(),
                reason: err.to_string(),
            });
        }
        Ok(IriRef(iri.into()))
    }

    /// Return a new IRI reference without checking its validity.
    ///
    /// # Pre-condition
    ///
    /// `iri` must be a valid IRI reference.
    /// In debug mode this is asserted.
    pub fn new_unchecked<T>(iri: T) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        debug_assert!(
            oxiri::IriRef::parse(iri.as_ref()).is_ok(),
            "invalid IRI {:?}",
            iri.as_ref()
        );
        IriRef(iri.into())
    }

    /// The text of this IRI reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this IRI reference is an absolute IRI.
    pub fn is_absolute(&self) -> bool {
        oxiri::Iri::parse(self.as_str()).is_ok()
    }

    /// Resolve this IRI reference against `base`.
    ///
    /// Returns an error if `base` is not an absolute IRI.
    pub fn resolve(&self, base: &IriRef) -> Result<IriRef> {
        let parsed = oxiri::Iri::parse(base.as_str()).map_err(|err| TermError::InvalidIri {
            iri: base.as_str().to_string(),
            reason: err.to_string(),
        })?;
        let resolved = parsed.resolve(self.as_str()).map_err(|err| TermError::InvalidIri {
            iri: self.as_str().to_string(),
            reason: err.to_string(),
        })?;
        Ok(IriRef(resolved.into_inner().into()))
    }

    pub(crate) fn write_fmt<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char('<')?;
        w.write_str(self.as_str())?;
        w.write_char('>')
    }
}

impl AsRef<str> for IriRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IriRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for IriRef {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for IriRef {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for IriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fmt(f)
    }
}

impl TryFrom<&str> for IriRef {
    type Error = TermError;

    fn try_from(value: &str) -> Result<Self> {
        IriRef::new(value)
    }
}

impl TryFrom<String> for IriRef {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self> {
        IriRef::new(value)
    }
}
