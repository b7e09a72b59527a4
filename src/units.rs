//! Conversion between byte counts and human-readable byte strings.

use thiserror::Error;

/// Errors raised when a byte string cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// A bare number with a fractional part has no defined magnitude.
    #[error("ambiguous byte string without unit: {0}")]
    AmbiguousFraction(String),
    /// The trailing character is not one of the known unit letters.
    #[error("unrecognized byte unit in: {0}")]
    UnknownUnit(String),
    /// The numeric prefix does not parse.
    #[error("invalid byte string: {0}")]
    InvalidNumber(String),
}

const UNIT_FACTORS: [(char, u64); 6] = [
    ('k', 1_000),
    ('m', 1_000_000),
    ('g', 1_000_000_000),
    ('t', 1_000_000_000_000),
    ('p', 1_000_000_000_000_000),
    ('e', 1_000_000_000_000_000_000),
];

/// Converts a string representing bytes to a number of bytes.
///
/// Parsing is case-insensitive and tolerates a trailing `b` or `b/s` after
/// the unit letter: `"500K"` → 500 000, `"2.5M"` → 2 500 000,
/// `"10GB"` → 10 000 000 000, `"30kb/s"` → 30 000. A bare integer passes
/// through unchanged; a bare number with a decimal point is rejected as
/// ambiguous.
pub fn parse_byte_count(byte_string: &str) -> Result<u64, UnitError> {
    let mut s = byte_string.to_lowercase();

    for (unit, _) in UNIT_FACTORS {
        s = s.replace(&format!("{}b/s", unit), &unit.to_string());
        s = s.replace(&format!("{}b", unit), &unit.to_string());
    }

    let last = s.chars().last().ok_or_else(|| UnitError::InvalidNumber(byte_string.to_string()))?;

    if last.is_ascii_digit() {
        if s.contains('.') {
            return Err(UnitError::AmbiguousFraction(byte_string.to_string()));
        }
        return s.parse::<u64>().map_err(|_| UnitError::InvalidNumber(byte_string.to_string()));
    }

    let factor = UNIT_FACTORS
        .iter()
        .find(|(unit, _)| *unit == last)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| UnitError::UnknownUnit(byte_string.to_string()))?;

    let prefix = &s[..s.len() - last.len_utf8()];
    let value: f64 =
        prefix.parse().map_err(|_| UnitError::InvalidNumber(byte_string.to_string()))?;
    Ok((value * factor as f64) as u64)
}

/// Converts an amount of bytes into a human-readable string.
///
/// Divides by 1000 (or 1024 with `base_1024`) from `K` upward until the
/// magnitude drops below the base or `Y` is reached, renders with three
/// decimal digits and optionally trims trailing zeroes and a dangling
/// decimal point. Base-1024 output carries the `i` infix: `"1MiB"`.
pub fn format_byte_count(byte_count: u64, base_1024: bool, trim_zeros: bool) -> String {
    const UNITS: [&str; 8] = ["K", "M", "G", "T", "P", "E", "Z", "Y"];
    let base: f64 = if base_1024 { 1024.0 } else { 1000.0 };
    let mut bytes = byte_count as f64;
    let mut unit_index = 0usize;

    loop {
        bytes /= base;
        if (bytes.trunc() as u64) < base as u64 || unit_index == UNITS.len() - 1 {
            break;
        }
        unit_index += 1;
    }

    let mut rendered = format!("{:.3}", bytes);

    if trim_zeros {
        while rendered.ends_with('0') {
            rendered.pop();
        }
        if rendered.ends_with('.') {
            rendered.pop();
        }
    }

    let infix = if base_1024 { "i" } else { "" };
    format!("{}{}{}B", rendered, UNITS[unit_index], infix)
}
