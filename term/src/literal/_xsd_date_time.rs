//! Values of `xsd:dateTime`, `xsd:date` and `xsd:time` literals,
//! with or without a timezone.
//! See <https://www.w3.org/TR/xmlschema-2/#dt-dateTime>
//!
//! # Ordering
//!
//! According to [Section 3.2.7.4 Order relation on dateTime of XML Schema Part 2](https://www.w3.org/TR/xmlschema-2/#dt-dateTime)
//! a naive value and a timezoned value may be incomparable.
//! Literals need a total order, so this module refines it:
//! all timezoned values come before all naive values;
//! timezoned values are ordered by instant, naive values by their fields.
use std::cmp::Ordering;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_TIME: Regex = Regex::new(r"(?x)
        ^ (-)?(\d{4,}) - (\d{2}) - (\d{2}) T (\d{2}) : (\d{2}) : (\d{2}) (?:\.(\d+))? ( Z | [-+]\d{2}:\d{2} )? $
    ").unwrap();
    static ref DATE: Regex = Regex::new(r"(?x)
        ^ (-)?(\d{4,}) - (\d{2}) - (\d{2}) ( Z | [-+]\d{2}:\d{2} )? $
    ").unwrap();
    static ref TIME: Regex = Regex::new(r"(?x)
        ^ (\d{2}) : (\d{2}) : (\d{2}) (?:\.(\d+))? ( Z | [-+]\d{2}:\d{2} )? $
    ").unwrap();
}

/// An `xsd:dateTime` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum XsdDateTime {
    /// A dateTime without a timezone.
    Naive(NaiveDateTime),
    /// A dateTime with a timezone.
    Timezoned(DateTime<FixedOffset>),
}

impl XsdDateTime {
    fn new(s: &str) -> Option<Self> {
        let c = DATE_TIME.captures(s)?;
        let ymd = parse_ymd(c.get(1).is_some(), &c[2], &c[3], &c[4])?;
        let (hour, minute, second) = (num(&c[5])?, num(&c[6])?, num(&c[7])?);
        let nano = c.get(8).map(|f| parse_nanos(f.as_str())).unwrap_or(Some(0))?;

        let naive = if (hour, minute, second, nano) != (24, 0, 0, 0) {
            ymd.and_hms_nano_opt(hour, minute, second, nano)?
        } else {
            ymd.and_hms_nano_opt(0, 0, 0, 0)?
                .checked_add_days(Days::new(1))?
        };

        match c.get(9) {
            None => Some(Self::Naive(naive)),
            Some(tz) => {
                let timezoned = naive
                    .and_local_timezone(parse_offset(tz.as_str())?)
                    .single()?;
                Some(Self::Timezoned(timezoned))
            }
        }
    }

    fn naive_local(&self) -> NaiveDateTime {
        match self {
            XsdDateTime::Naive(d) => *d,
            XsdDateTime::Timezoned(d) => d.naive_local(),
        }
    }

    /// Total order on dateTimes; see the module documentation.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (XsdDateTime::Naive(d1), XsdDateTime::Naive(d2)) => d1.cmp(d2),
            (XsdDateTime::Timezoned(_), XsdDateTime::Naive(_)) => Ordering::Less,
            (XsdDateTime::Naive(_), XsdDateTime::Timezoned(_)) => Ordering::Greater,
            (XsdDateTime::Timezoned(d1), XsdDateTime::Timezoned(d2)) => d1.cmp(d2),
        }
    }
}

impl FromStr for XsdDateTime {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("Invalid lexical value for xsd:dateTime")
    }
}

impl Display for XsdDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.naive_local();
        write_date(f, d.date())?;
        f.write_char('T')?;
        write_time(f, d.time())?;
        if let XsdDateTime::Timezoned(d) = self {
            write_offset(f, d.offset())?;
        }
        Ok(())
    }
}

/// An `xsd:date` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XsdDate {
    date: NaiveDate,
    offset: Option<FixedOffset>,
}

impl XsdDate {
    fn new(s: &str) -> Option<Self> {
        let c = DATE.captures(s)?;
        let date = parse_ymd(c.get(1).is_some(), &c[2], &c[3], &c[4])?;
        let offset = match c.get(5) {
            Some(tz) => Some(parse_offset(tz.as_str())?),
            None => None,
        };
        Some(XsdDate { date, offset })
    }

    /// The date, as written in the literal.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The timezone, if any.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Total order on dates: timezoned dates are ordered by their first instant,
    /// and come before naive dates.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.offset, other.offset) {
            (None, None) => self.date.cmp(&other.date),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(o1), Some(o2)) => {
                let d1 = self.date.and_hms_opt(0, 0, 0).and_then(|d| to_utc(d, o1));
                let d2 = other.date.and_hms_opt(0, 0, 0).and_then(|d| to_utc(d, o2));
                d1.cmp(&d2)
            }
        }
    }
}

impl FromStr for XsdDate {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("Invalid lexical value for xsd:date")
    }
}

impl Display for XsdDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.date)?;
        if let Some(offset) = &self.offset {
            write_offset(f, offset)?;
        }
        Ok(())
    }
}

/// An `xsd:time` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XsdTime {
    time: NaiveTime,
    offset: Option<FixedOffset>,
}

impl XsdTime {
    fn new(s: &str) -> Option<Self> {
        let c = TIME.captures(s)?;
        let (hour, minute, second) = (num(&c[1])?, num(&c[2])?, num(&c[3])?);
        let nano = c.get(4).map(|f| parse_nanos(f.as_str())).unwrap_or(Some(0))?;
        let time = if (hour, minute, second, nano) == (24, 0, 0, 0) {
            NaiveTime::from_hms_opt(0, 0, 0)?
        } else {
            NaiveTime::from_hms_nano_opt(hour, minute, second, nano)?
        };
        let offset = match c.get(5) {
            Some(tz) => Some(parse_offset(tz.as_str())?),
            None => None,
        };
        Some(XsdTime { time, offset })
    }

    /// The time, as written in the literal.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The timezone, if any.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Total order on times: timezoned times are ordered by their UTC equivalent
    /// on a reference day, and come before naive times.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.offset, other.offset) {
            (None, None) => self.time.cmp(&other.time),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(o1), Some(o2)) => {
                let d1 = to_utc(REFERENCE_DAY.and_time(self.time), o1);
                let d2 = to_utc(REFERENCE_DAY.and_time(other.time), o2);
                d1.cmp(&d2)
            }
        }
    }
}

impl FromStr for XsdTime {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("Invalid lexical value for xsd:time")
    }
}

impl Display for XsdTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time(f, self.time)?;
        if let Some(offset) = &self.offset {
            write_offset(f, offset)?;
        }
        Ok(())
    }
}

lazy_static! {
    static ref REFERENCE_DAY: NaiveDate = NaiveDate::from_ymd_opt(1972, 12, 31).unwrap_or_default();
}

fn num(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

fn parse_ymd(negative: bool, year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let sign = if negative { -1 } else { 1 };
    NaiveDate::from_ymd_opt(sign * year, num(month)?, num(day)?)
}

fn parse_nanos(fraction: &str) -> Option<u32> {
    if fraction.len() >= 9 {
        fraction[..9].parse().ok()
    } else {
        let digits: u32 = fraction.parse().ok()?;
        let missing = u32::try_from(9 - fraction.len()).ok()?;
        Some(digits * 10_u32.pow(missing))
    }
}

/// Parse `Z` or `±hh:mm`; offsets beyond 14 hours are rejected.
fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = if &tz[..1] == "-" { -1 } else { 1 };
    let hh: i32 = tz[1..3].parse().ok()?;
    let mm: i32 = tz[4..6].parse().ok()?;
    if mm > 59 || hh * 60 + mm > 14 * 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hh * 3600 + mm * 60))
}

fn to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<NaiveDateTime> {
    local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
}

fn write_date<W: Write>(w: &mut W, date: NaiveDate) -> fmt::Result {
    let year = date.year();
    if year < 0 {
        w.write_char('-')?;
    }
    write!(
        w,
        "{:04}-{:02}-{:02}",
        year.unsigned_abs(),
        date.month(),
        date.day()
    )
}

fn write_time<W: Write>(w: &mut W, time: NaiveTime) -> fmt::Result {
    write!(
        w,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )?;
    let nano = time.nanosecond();
    if nano > 0 {
        let fraction = format!("{nano:09}");
        write!(w, ".{}", fraction.trim_end_matches('0'))?;
    }
    Ok(())
}

fn write_offset<W: Write>(w: &mut W, offset: &FixedOffset) -> fmt::Result {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return w.write_char('Z');
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let mins = secs.unsigned_abs() / 60;
    write!(w, "{sign}{:02}:{:02}", mins / 60, mins % 60)
}
