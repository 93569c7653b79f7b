//! Primitive kinds and the text-to-value converter

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta};

use super::duration;
use crate::error::Error;

/// Structural category a destination type reduces to.
///
/// Every type implementing [`Underlying`](super::Underlying) maps to exactly
/// one kind. `Timestamp` and `Duration` are distinct kinds so a duration is
/// never parsed as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `i8`, `i16`, `i32`, `i64`, `isize`
    Signed,
    /// `u8`, `u16`, `u32`, `u64`, `usize`
    Unsigned,
    /// `f32`, `f64`
    Float,
    /// `String`
    Text,
    /// `bool`
    Bool,
    /// `DateTime<FixedOffset>`, `DateTime<Utc>`
    Timestamp,
    /// `std::time::Duration`, `chrono::TimeDelta`
    Duration,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Signed => "signed integer",
            Kind::Unsigned => "unsigned integer",
            Kind::Float => "float",
            Kind::Text => "string",
            Kind::Bool => "bool",
            Kind::Timestamp => "timestamp",
            Kind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Intermediate value produced by [`Kind::parse`], before it is narrowed
/// into the destination's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Canonical {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<FixedOffset>),
    Duration(TimeDelta),
}

impl Kind {
    /// Parse `source` according to this kind's grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when `source` is not valid for the kind.
    /// `Text` never fails.
    pub fn parse(self, source: &str) -> Result<Canonical, Error> {
        let fail = |message: &dyn fmt::Display| Error::parse_error(self, source, message);
        match self {
            Kind::Signed => source
                .parse::<i64>()
                .map(Canonical::Signed)
                .map_err(|e| fail(&e)),
            Kind::Unsigned => {
                // u64's FromStr tolerates a leading '+', the base-10 grammar does not
                if source.starts_with('+') {
                    return Err(fail(&"unexpected sign"));
                }
                source
                    .parse::<u64>()
                    .map(Canonical::Unsigned)
                    .map_err(|e| fail(&e))
            }
            Kind::Float => {
                let value = source.parse::<f64>().map_err(|e| fail(&e))?;
                if value.is_infinite() && !is_infinity_literal(source) {
                    return Err(fail(&"value out of range"));
                }
                Ok(Canonical::Float(value))
            }
            Kind::Text => Ok(Canonical::Text(source.to_string())),
            Kind::Bool => parse_bool(source)
                .map(Canonical::Bool)
                .ok_or_else(|| fail(&"expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")),
            Kind::Timestamp => {
                check_rfc3339_profile(source).map_err(|e| fail(&e))?;
                DateTime::parse_from_rfc3339(source)
                    .map(Canonical::Timestamp)
                    .map_err(|e| fail(&e))
            }
            Kind::Duration => duration::parse(source)
                .map(Canonical::Duration)
                .map_err(|e| fail(&e)),
        }
    }
}

fn parse_bool(source: &str) -> Option<bool> {
    match source {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// `inf`, `infinity` and their signed forms, in any case
fn is_infinity_literal(source: &str) -> bool {
    let unsigned = source.strip_prefix(['+', '-']).unwrap_or(source);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Reject what `parse_from_rfc3339` tolerates beyond `YYYY-MM-DDTHH:MM:SS[.f]Z|±HH:MM`:
/// a lowercase or space date/time separator, a lowercase `z` and leap seconds.
fn check_rfc3339_profile(source: &str) -> Result<(), &'static str> {
    let bytes = source.as_bytes();
    if bytes.get(10) != Some(&b'T') {
        return Err("expected 'T' between date and time");
    }
    if bytes.get(17) == Some(&b'6') {
        return Err("second out of range");
    }
    if bytes.last() == Some(&b'z') {
        return Err("expected 'Z' or a numeric offset");
    }
    Ok(())
}
