//! Duration literals such as `300ms`, `-1.5h` or `2h45m`.
//!
//! A literal is an optional sign followed by one or more decimal numbers,
//! each with an optional fraction and a mandatory unit. Valid units are
//! `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. The bare literal `0`
//! is accepted without a unit. Values are limited to the range of a signed
//! 64-bit nanosecond count.

use std::fmt;

use chrono::TimeDelta;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN` in nanoseconds.
const LIMIT: u64 = 1 << 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DurationError {
    Invalid,
    MissingUnit,
    UnknownUnit(String),
    Overflow,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::Invalid => f.write_str("invalid duration"),
            DurationError::MissingUnit => f.write_str("missing unit in duration"),
            DurationError::UnknownUnit(unit) => write!(f, "unknown unit {unit:?} in duration"),
            DurationError::Overflow => f.write_str("duration out of range"),
        }
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn is_number_byte(b: u8) -> bool {
    b == b'.' || b.is_ascii_digit()
}

/// Consume leading digits. Returns the value and the rest of the input.
fn leading_int(s: &str) -> Result<(u64, &str), DurationError> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= LIMIT)
            .ok_or(DurationError::Overflow)?;
    }
    Ok((value, &s[end..]))
}

/// Consume leading fraction digits. Digits past the point where the value
/// would overflow are dropped. Returns `(value, scale, rest)`.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflowed = false;
    for b in s[..end].bytes() {
        if overflowed {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
        {
            Some(v) if v <= LIMIT => {
                value = v;
                scale *= 10.0;
            }
            _ => overflowed = true,
        }
    }
    (value, scale, &s[end..])
}

pub(crate) fn parse(source: &str) -> Result<TimeDelta, DurationError> {
    let mut s = source;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(DurationError::Invalid);
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !is_number_byte(s.as_bytes()[0]) {
            return Err(DurationError::Invalid);
        }

        let (whole, rest) = leading_int(s)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = (0, 1.0);
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (value, scale, rest_after) = leading_fraction(rest);
            has_fraction = rest_after.len() != rest.len();
            fraction = (value, scale);
            s = rest_after;
        }
        if !has_whole && !has_fraction {
            return Err(DurationError::Invalid);
        }

        let unit_len = s.bytes().take_while(|b| !is_number_byte(*b)).count();
        if unit_len == 0 {
            return Err(DurationError::MissingUnit);
        }
        let (unit, rest) = s.split_at(unit_len);
        s = rest;
        let unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        if whole > LIMIT / unit {
            return Err(DurationError::Overflow);
        }
        let mut value = whole * unit;
        let (frac_value, scale) = fraction;
        if frac_value > 0 {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let extra = (frac_value as f64 * (unit as f64 / scale)) as u64;
            value = value
                .checked_add(extra)
                .filter(|v| *v <= LIMIT)
                .ok_or(DurationError::Overflow)?;
        }
        total = total
            .checked_add(value)
            .filter(|v| *v <= LIMIT)
            .ok_or(DurationError::Overflow)?;
    }

    let nanos = if negative {
        if total == LIMIT {
            i64::MIN
        } else {
            // total < 2^63 here
            -i64::try_from(total).map_err(|_| DurationError::Overflow)?
        }
    } else {
        i64::try_from(total).map_err(|_| DurationError::Overflow)?
    };
    Ok(TimeDelta::nanoseconds(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nanos(s: &str) -> i64 {
        parse(s)
            .unwrap_or_else(|e| panic!("{s:?}: {e}"))
            .num_nanoseconds()
            .unwrap()
    }

    #[test]
    fn test_simple_units() {
        assert_eq!(nanos("0"), 0);
        assert_eq!(nanos("5s"), 5 * SECOND as i64);
        assert_eq!(nanos("30s"), 30 * SECOND as i64);
        assert_eq!(nanos("1478s"), 1478 * SECOND as i64);
        assert_eq!(nanos("-5s"), -5 * SECOND as i64);
        assert_eq!(nanos("+5s"), 5 * SECOND as i64);
        assert_eq!(nanos("-0"), 0);
        assert_eq!(nanos("0s"), 0);
        assert_eq!(nanos("10ns"), 10);
        assert_eq!(nanos("11us"), 11 * MICROSECOND as i64);
        assert_eq!(nanos("12µs"), 12 * MICROSECOND as i64);
        assert_eq!(nanos("12μs"), 12 * MICROSECOND as i64);
        assert_eq!(nanos("13ms"), 13 * MILLISECOND as i64);
        assert_eq!(nanos("15m"), 15 * MINUTE as i64);
        assert_eq!(nanos("16h"), 16 * HOUR as i64);
    }

    #[test]
    fn test_fractions_and_compounds() {
        assert_eq!(nanos("5.0s"), 5 * SECOND as i64);
        assert_eq!(nanos("5.6s"), 5 * SECOND as i64 + 600 * MILLISECOND as i64);
        assert_eq!(nanos("5.s"), 5 * SECOND as i64);
        assert_eq!(nanos(".5s"), 500 * MILLISECOND as i64);
        assert_eq!(nanos("1.004s"), SECOND as i64 + 4 * MILLISECOND as i64);
        assert_eq!(nanos("-1.5h"), -(90 * MINUTE as i64));
        assert_eq!(nanos("3h30m"), (3 * HOUR + 30 * MINUTE) as i64);
        assert_eq!(
            nanos("10.5s4m"),
            (4 * MINUTE + 10 * SECOND + 500 * MILLISECOND) as i64
        );
        assert_eq!(nanos("1h2m3s4ms5us6ns"), 3_723_004_005_006);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(nanos("9223372036854775807ns"), i64::MAX);
        assert!(parse("-9223372036854775808ns").is_ok());
        assert_eq!(parse("9223372036854775808ns"), Err(DurationError::Overflow));
        assert_eq!(parse("9223372036854775.808us"), Err(DurationError::Overflow));
        assert_eq!(parse("3000000h"), Err(DurationError::Overflow));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse(""), Err(DurationError::Invalid));
        assert_eq!(parse("-"), Err(DurationError::Invalid));
        assert_eq!(parse("s"), Err(DurationError::Invalid));
        assert_eq!(parse("."), Err(DurationError::Invalid));
        assert_eq!(parse(".s"), Err(DurationError::Invalid));
        assert_eq!(parse("3"), Err(DurationError::MissingUnit));
        assert_eq!(parse("-3.5"), Err(DurationError::MissingUnit));
        assert_eq!(parse("3d"), Err(DurationError::UnknownUnit("d".to_string())));
        assert_eq!(parse("1h 30m"), Err(DurationError::UnknownUnit("h ".to_string())));
    }
}
