//! Parsers for the two delimited string inputs accepted by the builders:
//! `"x,y,srid"` coordinate strings and comma-separated bounds.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

// Matches at the start of the string; trailing garbage is ignored. The
// SRID must be exactly four digits.
static POINT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d+\.?\d+),(-?\d+\.?\d+),(\d{4})").unwrap());

/// The three components of a parsed coordinate string.
///
/// Each part is kept as the matched text rather than a parsed number, so
/// the builders can embed the caller's literal spelling into the SQL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointParts {
    pub x: String,
    pub y: String,
    pub srid: String,
}

/// Parses a `"x,y,srid"` coordinate string into its parts.
///
/// Fails with [`Error::InvalidFormat`] when the input does not match,
/// before any SQL is built or sent.
pub fn parse_point(input: &str) -> Result<PointParts> {
    let caps = POINT_PATTERN
        .captures(input)
        .ok_or_else(|| Error::InvalidFormat(input.to_string()))?;

    Ok(PointParts {
        x: caps[1].to_string(),
        y: caps[2].to_string(),
        srid: caps[3].to_string(),
    })
}

/// Splits a comma-delimited bounds string into numbers.
///
/// Returns `None` when the input is absent or empty. Tokens that fail to
/// parse coerce to `NaN` rather than erroring; bounds handling is
/// permissive throughout. Interpretation of the result is left to the
/// builders: length 4 is a rectangular envelope, length 3
/// is a tile coordinate, and anything else produces no spatial predicate.
pub fn parse_bounds(input: Option<&str>) -> Option<Vec<f64>> {
    let input = input.filter(|s| !s.is_empty())?;

    Some(
        input
            .split(',')
            .map(|token| token.trim().parse::<f64>().unwrap_or(f64::NAN))
            .collect(),
    )
}
