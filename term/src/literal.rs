//! RDF literals like specified in
//! [RDF](https://www.w3.org/TR/rdf11-primer/#section-literal).
//!

use crate::ns::{rdf, xsd};
use crate::{IriRef, LanguageTag, TermConfig};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

mod _number;
pub use self::_number::XsdNumber;
mod _value;
pub use self::_value::{XsdDatatype, XsdValue};
mod _xsd_date_time;
pub use self::_xsd_date_time::{XsdDate, XsdDateTime, XsdTime};

/// An RDF literal.
///
/// Each literal has a lexical form, i.e. a text,
/// and optionally a datatype IRI or a language tag (never both).
/// A literal with neither is a *plain* literal;
/// it is distinct from the same text typed as `xsd:string`,
/// although both sort together.
///
/// # Datatypes
///
/// Datatypes in RDF have a lexical space and a value space. Transformation
/// between them is done by the lexical-to-value mapping of a datatype.
/// For the datatypes listed in [`XsdDatatype`],
/// the value is computed once, when the literal is built,
/// and the lexical form is replaced by its canonical form
/// unless [normalization](TermConfig::normalize) is disabled.
///
/// If the text of a typed literal is not in the lexical space of its datatype,
/// the literal is called ill-typed or malformed. However,
/// [RDF specification](https://www.w3.org/TR/2014/REC-rdf11-concepts-20140225/#section-Graph-Literal)
/// explicitly requires implementations to accept those literals,
/// so building a literal never fails:
/// ill-formed literals keep their lexical form verbatim,
/// and are flagged by [`Literal::is_ill_formed`].
#[derive(Clone, Debug)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: Option<IriRef>,
    language: Option<LanguageTag>,
    xsd: Option<XsdDatatype>,
    value: Option<XsdValue>,
    ill_formed: bool,
}

impl Literal {
    /// Return a new literal, built with the [default configuration](TermConfig::default).
    ///
    /// If both `datatype` and `language` are provided, the language wins.
    pub fn new<T>(lexical: T, datatype: Option<IriRef>, language: Option<LanguageTag>) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        Self::with_config(lexical, datatype, language, &TermConfig::default())
    }

    /// Return a new literal, built with the given configuration.
    ///
    /// If both `datatype` and `language` are provided, the language wins.
    pub fn with_config<T>(
        lexical: T,
        datatype: Option<IriRef>,
        language: Option<LanguageTag>,
        config: &TermConfig,
    ) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        let datatype = match (&language, datatype) {
            (Some(tag), Some(dt)) => {
                if dt != *rdf::langString {
                    log::warn!("Datatype {} dropped from literal with language tag @{}", dt, tag);
                }
                None
            }
            (_, dt) => dt,
        };
        let known = datatype.as_ref().and_then(XsdDatatype::from_iri);
        let value = known.and_then(|dt| dt.parse(lexical.as_ref()));
        let ill_formed = value.is_none() && matches!(known, Some(dt) if dt != XsdDatatype::String);
        let lexical = match &value {
            Some(value) if config.normalize() => value.canonical().into(),
            _ => lexical.into(),
        };
        Literal {
            lexical,
            datatype,
            language,
            xsd: known,
            value,
            ill_formed,
        }
    }

    /// Return a new plain literal (no datatype, no language tag).
    pub fn plain<T>(lexical: T) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        Self::new(lexical, None, None)
    }

    /// Return a new literal typed with `datatype`, with the default configuration.
    pub fn typed<T>(lexical: T, datatype: IriRef) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        Self::new(lexical, Some(datatype), None)
    }

    /// Return a new language-tagged literal.
    pub fn lang<T>(lexical: T, language: LanguageTag) -> Self
    where
        T: AsRef<str> + Into<Arc<str>>,
    {
        Self::new(lexical, None, Some(language))
    }

    /// The lexical form of this literal (canonical if it was normalized).
    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    /// The datatype explicitly given to this literal, if any.
    pub fn datatype(&self) -> Option<&IriRef> {
        self.datatype.as_ref()
    }

    /// The datatype of this literal as defined by RDF 1.1:
    /// `rdf:langString` for language-tagged literals,
    /// `xsd:string` for plain literals.
    pub fn effective_datatype(&self) -> &IriRef {
        match (&self.datatype, &self.language) {
            (Some(dt), _) => dt,
            (None, Some(_)) => &*rdf::langString,
            (None, None) => &*xsd::string,
        }
    }

    /// The language tag of this literal, if any.
    pub fn language(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }

    /// The datatype of this literal, if it is one of the supported XSD datatypes.
    pub fn xsd_datatype(&self) -> Option<XsdDatatype> {
        self.xsd
    }

    /// The value of this literal, if its datatype is supported and its lexical form valid.
    pub fn value(&self) -> Option<&XsdValue> {
        self.value.as_ref()
    }

    /// Whether the lexical form of this literal is invalid for its (supported) datatype.
    pub fn is_ill_formed(&self) -> bool {
        self.ill_formed
    }

    /// Whether this literal is well-formed and of a numeric datatype.
    pub fn is_numeric(&self) -> bool {
        matches!(self.value, Some(XsdValue::Number(_)))
    }

    /// Writes the literal to the `fmt::Write` using the NTriples syntax.
    pub(crate) fn write_fmt<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char('"')?;
        fmt_quoted_string(w, &self.lexical)?;
        w.write_char('"')?;
        match (&self.datatype, &self.language) {
            (_, Some(tag)) => {
                w.write_char('@')?;
                w.write_str(tag.as_str())
            }
            (Some(dt), None) => {
                w.write_str("^^")?;
                dt.write_fmt(w)
            }
            (None, None) => Ok(()),
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Literal) -> bool {
        self.lexical == other.lexical
            && self.datatype == other.datatype
            && self.language == other.language
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lexical.hash(state);
        self.datatype.hash(state);
        self.language.hash(state);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fmt(f)
    }
}

impl From<&str> for Literal {
    fn from(txt: &str) -> Self {
        Literal::plain(txt)
    }
}

impl From<String> for Literal {
    fn from(txt: String) -> Self {
        Literal::plain(txt)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::typed(b.to_string(), xsd::boolean.clone())
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::typed(i.to_string(), xsd::integer.clone())
    }
}

impl From<f64> for Literal {
    fn from(d: f64) -> Self {
        Literal::typed(XsdNumber::from(d).canonical(), xsd::double.clone())
    }
}

fn fmt_quoted_string<W: fmt::Write>(w: &mut W, txt: &str) -> fmt::Result {
    let mut rest = txt;
    while let Some(cut) = rest.find(['\n', '\r', '\\', '"']) {
        w.write_str(&rest[..cut])?;
        match rest.as_bytes()[cut] {
            b'\n' => w.write_str("\\n")?,
            b'\r' => w.write_str("\\r")?,
            b'"' => w.write_str("\\\"")?,
            _ => w.write_str("\\\\")?,
        }
        rest = &rest[cut + 1..];
    }
    w.write_str(rest)
}
