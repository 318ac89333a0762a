//! Liquid name normalization.
//!
//! Liquids are often labelled with the stock ratio they were made at,
//! possibly several times over as they are re-diluted: `"10 X Buffer"`,
//! `"1 X 1 X Solution"`. For identity purposes those prefixes are noise.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Normalize a liquid name for identity comparison.
///
/// Surrounding whitespace is dropped and leading `"<number> X "` ratio
/// prefixes are stripped, repeatedly. The `X` marker may be either case.
/// Everything after the prefixes is kept verbatim, including internal
/// whitespace and letter case. A prefix is never stripped if nothing would
/// remain after it.
///
/// ```
/// use wellmatch::compat::normalize_name;
///
/// assert_eq!(normalize_name("1 X 1 X Solution"), "Solution");
/// assert_eq!(normalize_name("  0.5 x LB  "), "LB");
/// assert_eq!(normalize_name("10 X"), "10 X");
/// assert_eq!(normalize_name("Tris  HCl"), "Tris  HCl");
/// ```
pub fn normalize_name(name: &str) -> &str {
    let mut rest = name.trim();
    while let Some(stripped) = strip_ratio_prefix(rest) {
        rest = stripped;
    }
    rest
}

fn strip_ratio_prefix(s: &str) -> Option<&str> {
    let (number, rest) = s.split_once(char::is_whitespace)?;
    if Decimal::from_str(number).is_err() {
        return None;
    }

    let (marker, body) = rest.trim_start().split_once(char::is_whitespace)?;
    if !marker.eq_ignore_ascii_case("x") {
        return None;
    }

    let body = body.trim_start();
    (!body.is_empty()).then_some(body)
}
