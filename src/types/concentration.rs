//! Concentration values.
//!
//! A concentration is an opaque decimal magnitude tagged with a unit label
//! (`"X"`, `"mM"`, `"g/l"`, ...). wellmatch never converts between units;
//! it only asks whether two concentrations are the same at a given relative
//! precision.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Default relative precision for concentration equality: 10^-6
pub const DEFAULT_CONCENTRATION_PRECISION: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// A concentration magnitude with its unit label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Concentration {
    pub value: Decimal,
    pub unit: String,
}

impl Concentration {
    /// Create a concentration
    ///
    /// ```
    /// use wellmatch::types::Concentration;
    /// use rust_decimal::Decimal;
    ///
    /// let c = Concentration::new(Decimal::from(10), "mM");
    /// assert_eq!(c.to_string(), "10 mM");
    /// ```
    pub fn new(value: Decimal, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Whether two concentrations are equal within a relative precision.
    ///
    /// Units must match exactly (case carries the SI prefix), and the magnitudes must
    /// satisfy `|a - b| <= precision * max(|a|, |b|)`.
    pub fn approx_eq(&self, other: &Concentration, precision: Decimal) -> bool {
        if self.unit.trim() != other.unit.trim() {
            return false;
        }

        let a = self.value;
        let b = other.value;
        if a == b {
            return true;
        }

        let diff = (a - b).abs();
        let magnitude = a.abs().max(b.abs());
        match precision.checked_mul(magnitude) {
            Some(bound) => diff <= bound,
            None => false,
        }
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value.normalize(), self.unit)
    }
}

impl FromStr for Concentration {
    type Err = rust_decimal::Error;

    /// Parse `"<number> <unit>"`, e.g. `"10 mM"` or `"1.5X"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let value = Decimal::from_str(number)?;
        Ok(Self::new(value, unit.trim()))
    }
}
