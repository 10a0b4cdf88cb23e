use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

use super::{XsdDate, XsdDateTime, XsdNumber, XsdTime};
use crate::ns::xsd;
use crate::IriRef;

lazy_static! {
    static ref HEX_BINARY: Regex = Regex::new(r"^([0-9A-Fa-f]{2})*$").unwrap();
}

/// The XSD datatypes whose lexical forms are parsed and normalized.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum XsdDatatype {
    String,
    Boolean,
    Decimal,
    Integer,
    NonPositiveInteger,
    NegativeInteger,
    Long,
    Int,
    Short,
    Byte,
    NonNegativeInteger,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    PositiveInteger,
    Float,
    Double,
    DateTime,
    Date,
    Time,
    HexBinary,
}

impl XsdDatatype {
    /// Recognize `iri` as one of the supported datatypes.
    pub fn from_iri(iri: &IriRef) -> Option<Self> {
        let suffix = iri.as_str().strip_prefix(xsd::PREFIX)?;
        use XsdDatatype::*;
        Some(match suffix {
            "string" => String,
            "boolean" => Boolean,
            "decimal" => Decimal,
            "integer" => Integer,
            "nonPositiveInteger" => NonPositiveInteger,
            "negativeInteger" => NegativeInteger,
            "long" => Long,
            "int" => Int,
            "short" => Short,
            "byte" => Byte,
            "nonNegativeInteger" => NonNegativeInteger,
            "unsignedLong" => UnsignedLong,
            "unsignedInt" => UnsignedInt,
            "unsignedShort" => UnsignedShort,
            "unsignedByte" => UnsignedByte,
            "positiveInteger" => PositiveInteger,
            "float" => Float,
            "double" => Double,
            "dateTime" => DateTime,
            "date" => Date,
            "time" => Time,
            "hexBinary" => HexBinary,
            _ => return None,
        })
    }

    /// The IRI of this datatype.
    pub fn iri(&self) -> &'static IriRef {
        use XsdDatatype::*;
        match self {
            String => &*xsd::string,
            Boolean => &*xsd::boolean,
            Decimal => &*xsd::decimal,
            Integer => &*xsd::integer,
            NonPositiveInteger => &*xsd::nonPositiveInteger,
            NegativeInteger => &*xsd::negativeInteger,
            Long => &*xsd::long,
            Int => &*xsd::int,
            Short => &*xsd::short,
            Byte => &*xsd::byte,
            NonNegativeInteger => &*xsd::nonNegativeInteger,
            UnsignedLong => &*xsd::unsignedLong,
            UnsignedInt => &*xsd::unsignedInt,
            UnsignedShort => &*xsd::unsignedShort,
            UnsignedByte => &*xsd::unsignedByte,
            PositiveInteger => &*xsd::positiveInteger,
            Float => &*xsd::float,
            Double => &*xsd::double,
            DateTime => &*xsd::dateTime,
            Date => &*xsd::date,
            Time => &*xsd::time,
            HexBinary => &*xsd::hexBinary,
        }
    }

    /// Whether this datatype denotes numbers.
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            XsdDatatype::String
                | XsdDatatype::Boolean
                | XsdDatatype::DateTime
                | XsdDatatype::Date
                | XsdDatatype::Time
                | XsdDatatype::HexBinary
        )
    }

    /// Parse `lex` into a value of this datatype.
    ///
    /// Returns `None` if `lex` is not in the lexical space of this datatype,
    /// or if this datatype has no value distinct from its lexical form (`xsd:string`).
    /// Leading and trailing whitespace is ignored.
    pub fn parse(&self, lex: &str) -> Option<XsdValue> {
        use XsdDatatype::*;
        let lex = lex.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));
        let integer = || XsdNumber::try_parse_integer(lex);
        let number = match self {
            String => return None,
            Boolean => {
                return match lex {
                    "true" | "1" => Some(XsdValue::Boolean(true)),
                    "false" | "0" => Some(XsdValue::Boolean(false)),
                    _ => None,
                }
            }
            DateTime => return lex.parse().ok().map(XsdValue::DateTime),
            Date => return lex.parse().ok().map(XsdValue::Date),
            Time => return lex.parse().ok().map(XsdValue::Time),
            HexBinary => {
                return HEX_BINARY
                    .is_match(lex)
                    .then(|| XsdValue::HexBinary(lex.to_ascii_uppercase()))
            }
            Decimal => XsdNumber::try_parse_decimal(lex)?,
            Float => XsdNumber::try_parse_float(lex)?,
            Double => XsdNumber::try_parse_double(lex)?,
            Integer => integer()?,
            NonPositiveInteger => integer()?.check(|n| !n.is_positive())?,
            NegativeInteger => integer()?.check(XsdNumber::is_negative)?,
            NonNegativeInteger => integer()?.check(|n| !n.is_negative())?,
            PositiveInteger => integer()?.check(XsdNumber::is_positive)?,
            Long => integer()?.check(|n| n.fits_in(i64::MIN.into(), i64::MAX.into()))?,
            Int => integer()?.check(|n| n.fits_in(i32::MIN.into(), i32::MAX.into()))?,
            Short => integer()?.check(|n| n.fits_in(i16::MIN.into(), i16::MAX.into()))?,
            Byte => integer()?.check(|n| n.fits_in(i8::MIN.into(), i8::MAX.into()))?,
            UnsignedLong => integer()?.check(|n| n.fits_in(0, u64::MAX.into()))?,
            UnsignedInt => integer()?.check(|n| n.fits_in(0, u32::MAX.into()))?,
            UnsignedShort => integer()?.check(|n| n.fits_in(0, u16::MAX.into()))?,
            UnsignedByte => integer()?.check(|n| n.fits_in(0, u8::MAX.into()))?,
        };
        Some(XsdValue::Number(number))
    }
}

/// The value of a well-formed literal of a supported [`XsdDatatype`].
#[derive(Clone, Debug, PartialEq)]
pub enum XsdValue {
    /// `xsd:boolean`
    Boolean(bool),
    /// `xsd:integer` and derived types, `xsd:decimal`, `xsd:float`, `xsd:double`
    Number(XsdNumber),
    /// `xsd:dateTime`
    DateTime(XsdDateTime),
    /// `xsd:date`
    Date(XsdDate),
    /// `xsd:time`
    Time(XsdTime),
    /// `xsd:hexBinary`, as uppercase hexadecimal digits
    HexBinary(String),
}

impl XsdValue {
    /// The canonical lexical form of this value.
    pub fn canonical(&self) -> String {
        match self {
            XsdValue::Boolean(b) => b.to_string(),
            XsdValue::Number(n) => n.canonical(),
            XsdValue::DateTime(d) => d.to_string(),
            XsdValue::Date(d) => d.to_string(),
            XsdValue::Time(t) => t.to_string(),
            XsdValue::HexBinary(h) => h.clone(),
        }
    }

    /// If this value is a number, return it.
    pub fn as_number(&self) -> Option<&XsdNumber> {
        match self {
            XsdValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Order two values of the same kind.
    ///
    /// Values of different kinds never share a collation group;
    /// they are ordered by kind for the sake of totality.
    pub(crate) fn total_cmp(&self, other: &Self) -> Ordering {
        use XsdValue::*;
        match (self, other) {
            (Boolean(b1), Boolean(b2)) => b1.cmp(b2),
            (Number(n1), Number(n2)) => n1.total_cmp(n2),
            (DateTime(d1), DateTime(d2)) => d1.total_cmp(d2),
            (Date(d1), Date(d2)) => d1.total_cmp(d2),
            (Time(t1), Time(t2)) => t1.total_cmp(t2),
            (HexBinary(h1), HexBinary(h2)) => h1.cmp(h2),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            XsdValue::Boolean(_) => 0,
            XsdValue::Number(_) => 1,
            XsdValue::DateTime(_) => 2,
            XsdValue::Date(_) => 3,
            XsdValue::Time(_) => 4,
            XsdValue::HexBinary(_) => 5,
        }
    }
}
