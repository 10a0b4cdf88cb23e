use std::cmp::Ordering;

use bigdecimal::{BigDecimal, Signed, ToPrimitive, Zero};
use lazy_static::lazy_static;
use num_bigint::BigInt;
use regex::Regex;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").unwrap();
    static ref FLOATING: Regex =
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([Ee][+-]?[0-9]+)?$").unwrap();
}

/// The value of a literal whose datatype is `xsd:decimal`, `xsd:float`, `xsd:double`
/// or `xsd:integer` (or one of its derived types).
#[derive(Clone, Debug, PartialEq)]
pub enum XsdNumber {
    /// An integer fitting in an `i64`.
    Int(i64),
    /// An arbitrarily large integer.
    BigInt(BigInt),
    /// An arbitrary precision decimal.
    Decimal(BigDecimal),
    /// A single precision float.
    Float(f32),
    /// A double precision float.
    Double(f64),
}

impl From<i64> for XsdNumber {
    fn from(value: i64) -> Self {
        XsdNumber::Int(value)
    }
}

impl From<BigInt> for XsdNumber {
    fn from(value: BigInt) -> Self {
        match value.to_i64() {
            Some(val) => XsdNumber::Int(val),
            None => XsdNumber::BigInt(value),
        }
    }
}

impl From<BigDecimal> for XsdNumber {
    fn from(value: BigDecimal) -> Self {
        XsdNumber::Decimal(value)
    }
}

impl From<f32> for XsdNumber {
    fn from(value: f32) -> Self {
        XsdNumber::Float(value)
    }
}

impl From<f64> for XsdNumber {
    fn from(value: f64) -> Self {
        XsdNumber::Double(value)
    }
}

impl XsdNumber {
    pub(crate) fn try_parse_integer(lex: &str) -> Option<Self> {
        if !INTEGER.is_match(lex) {
            return None;
        }
        if let Ok(val) = lex.parse::<i64>() {
            Some(val.into())
        } else {
            lex.parse::<BigInt>().ok().map(Self::from)
        }
    }

    pub(crate) fn try_parse_decimal(lex: &str) -> Option<Self> {
        if !DECIMAL.is_match(lex) {
            return None;
        }
        let (negative, unsigned) = match lex.as_bytes()[0] {
            b'-' => (true, &lex[1..]),
            b'+' => (false, &lex[1..]),
            _ => (false, lex),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let mut digits: BigInt = format!("{int_part}{frac_part}").parse().ok()?;
        if negative {
            digits = -digits;
        }
        let scale = i64::try_from(frac_part.len()).ok()?;
        Some(BigDecimal::new(digits, scale).into())
    }

    pub(crate) fn try_parse_float(lex: &str) -> Option<Self> {
        parse_floating::<f32>(lex, f32::INFINITY, f32::NAN).map(Self::from)
    }

    pub(crate) fn try_parse_double(lex: &str) -> Option<Self> {
        parse_floating::<f64>(lex, f64::INFINITY, f64::NAN).map(Self::from)
    }

    pub(crate) fn check<F: FnOnce(&Self) -> bool>(self, predicate: F) -> Option<Self> {
        if predicate(&self) {
            Some(self)
        } else {
            None
        }
    }

    /// Whether this number is NaN.
    pub fn is_nan(&self) -> bool {
        match self {
            XsdNumber::Float(inner) => inner.is_nan(),
            XsdNumber::Double(inner) => inner.is_nan(),
            _ => false,
        }
    }

    /// Whether this number is (positive or negative) zero.
    pub fn is_zero(&self) -> bool {
        match self {
            XsdNumber::Int(inner) => inner.is_zero(),
            XsdNumber::BigInt(inner) => inner.is_zero(),
            XsdNumber::Decimal(inner) => inner.is_zero(),
            XsdNumber::Float(inner) => inner.is_zero(),
            XsdNumber::Double(inner) => inner.is_zero(),
        }
    }

    /// Whether this number is strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            XsdNumber::Int(inner) => inner.is_positive(),
            XsdNumber::BigInt(inner) => inner.is_positive(),
            XsdNumber::Decimal(inner) => inner.is_positive(),
            XsdNumber::Float(inner) => *inner > 0.0,
            XsdNumber::Double(inner) => *inner > 0.0,
        }
    }

    /// Whether this number is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            XsdNumber::Int(inner) => inner.is_negative(),
            XsdNumber::BigInt(inner) => inner.is_negative(),
            XsdNumber::Decimal(inner) => inner.is_negative(),
            XsdNumber::Float(inner) => *inner < 0.0,
            XsdNumber::Double(inner) => *inner < 0.0,
        }
    }

    /// Whether this integer fits in the range `[min, max]`.
    ///
    /// Always false for non-integers.
    pub(crate) fn fits_in(&self, min: i128, max: i128) -> bool {
        let val = match self {
            XsdNumber::Int(inner) => Some(i128::from(*inner)),
            XsdNumber::BigInt(inner) => inner.to_i128(),
            _ => None,
        };
        val.map(|v| min <= v && v <= max).unwrap_or(false)
    }

    /// Coerce to a f64
    ///
    /// Note that the conversion may lose precision, or even result in NaN for some big integers and decimals.
    #[allow(clippy::cast_precision_loss)]
    pub fn coerce_to_double(&self) -> f64 {
        match self {
            XsdNumber::Int(inner) => *inner as f64,
            XsdNumber::BigInt(inner) => inner.to_f64().unwrap_or(f64::NAN),
            XsdNumber::Decimal(inner) => inner.to_f64().unwrap_or(f64::NAN),
            XsdNumber::Float(inner) => f64::from(*inner),
            XsdNumber::Double(inner) => *inner,
        }
    }

    /// The canonical lexical form of this number,
    /// as its own datatype would write it.
    pub fn canonical(&self) -> String {
        match self {
            XsdNumber::Int(inner) => inner.to_string(),
            XsdNumber::BigInt(inner) => inner.to_string(),
            XsdNumber::Decimal(inner) => dec2string(inner),
            XsdNumber::Float(inner) => float2string(f64::from(*inner), format!("{inner:E}")),
            XsdNumber::Double(inner) => float2string(*inner, format!("{inner:E}")),
        }
    }

    /// Compare the values of two numbers, whatever their types.
    ///
    /// The comparison is exact (no rounding happens when promoting),
    /// and NaN is greater than every other number, and equal to itself.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        use XsdNumber::*;
        match (self, other) {
            (Int(lhs), Int(rhs)) => lhs.cmp(rhs),
            (BigInt(lhs), BigInt(rhs)) => lhs.cmp(rhs),
            (Int(lhs), BigInt(rhs)) => num_bigint::BigInt::from(*lhs).cmp(rhs),
            (BigInt(lhs), Int(rhs)) => lhs.cmp(&num_bigint::BigInt::from(*rhs)),
            (Decimal(lhs), Decimal(rhs)) => lhs.cmp(rhs),
            _ => self.key().cmp(&other.key()),
        }
    }

    fn key(&self) -> NumKey {
        match self {
            XsdNumber::Int(inner) => NumKey::Finite(BigDecimal::from(*inner)),
            XsdNumber::BigInt(inner) => NumKey::Finite(BigDecimal::from(inner.clone())),
            XsdNumber::Decimal(inner) => NumKey::Finite(inner.clone()),
            XsdNumber::Float(inner) => NumKey::from_f64(f64::from(*inner)),
            XsdNumber::Double(inner) => NumKey::from_f64(*inner),
        }
    }
}

/// Numbers projected on the extended real line, plus NaN.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum NumKey {
    NegInf,
    Finite(BigDecimal),
    PosInf,
    NaN,
}

impl NumKey {
    fn from_f64(f: f64) -> Self {
        if f.is_nan() {
            NumKey::NaN
        } else if f == f64::INFINITY {
            NumKey::PosInf
        } else if f == f64::NEG_INFINITY {
            NumKey::NegInf
        } else {
            NumKey::Finite(exact_decimal(f))
        }
    }
}

/// The exact decimal value of a finite f64.
fn exact_decimal(f: f64) -> BigDecimal {
    if f == 0.0 {
        return BigDecimal::zero();
    }
    let bits = f.to_bits();
    let exp_bits = i64::try_from((bits >> 52) & 0x7ff).unwrap_or_default();
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    let (mantissa, exp) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), exp_bits - 1075)
    };
    let mut digits = BigInt::from(mantissa);
    if bits >> 63 == 1 {
        digits = -digits;
    }
    if exp >= 0 {
        BigDecimal::new(digits << exp.unsigned_abs(), 0)
    } else {
        // m * 2^-k == m * 5^k * 10^-k
        let k = u32::try_from(exp.unsigned_abs()).unwrap_or(u32::MAX);
        BigDecimal::new(digits * BigInt::from(5).pow(k), i64::from(k))
    }
}

fn parse_floating<T: std::str::FromStr>(lex: &str, inf: T, nan: T) -> Option<T>
where
    T: std::ops::Neg<Output = T>,
{
    match lex {
        "INF" | "+INF" => Some(inf),
        "-INF" => Some(-inf),
        "NaN" => Some(nan),
        _ if FLOATING.is_match(lex) => lex.parse().ok(),
        _ => None,
    }
}

/// Canonical decimal: no exponent, at least one digit on each side of the dot.
fn dec2string(d: &BigDecimal) -> String {
    let (digits, scale) = d.normalized().as_bigint_and_exponent();
    let sign = if digits.is_negative() { "-" } else { "" };
    let mut abs = digits.magnitude().to_string();
    if scale <= 0 {
        for _ in 0..scale.unsigned_abs() {
            abs.push('0');
        }
        return format!("{sign}{abs}.0");
    }
    let scale = usize::try_from(scale).unwrap_or(usize::MAX);
    if abs.len() <= scale {
        let padding = "0".repeat(scale + 1 - abs.len());
        abs.insert_str(0, &padding);
    }
    let (int_part, frac_part) = abs.split_at(abs.len() - scale);
    format!("{sign}{int_part}.{frac_part}")
}

/// Canonical float/double: scientific notation with a dotted mantissa.
fn float2string(f: f64, sci: String) -> String {
    if f.is_nan() {
        "NaN".into()
    } else if f == f64::INFINITY {
        "INF".into()
    } else if f == f64::NEG_INFINITY {
        "-INF".into()
    } else {
        match sci.split_once('E') {
            Some((mantissa, exp)) if !mantissa.contains('.') => format!("{mantissa}.0E{exp}"),
            _ => sci,
        }
    }
}
