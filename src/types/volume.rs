//! Fixed-point volume utilities.
//!
//! ## Overview
//!
//! All volumes in wellmatch use fixed-point representation so that
//! depletion arithmetic is exact and matching is deterministic. Values are
//! stored as `u64` scaled by 10^8 in a single base unit (the caller picks
//! the unit; conversion between units happens before samples reach the
//! engine).
//!
//! An unsigned representation also means a negative volume can never be
//! constructed.
//!
//! ## Examples
//!
//! ```
//! use wellmatch::types::volume::{to_fixed, from_fixed, from_units};
//!
//! let v = to_fixed("20.5").unwrap();
//! assert_eq!(v, 2_050_000_000);
//! assert_eq!(from_fixed(v), "20.50000000");
//! assert_eq!(from_units(20), 2_000_000_000);
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// A volume in fixed-point base units (scaled by 10^8).
pub type Volume = u64;

/// Scaling factor for fixed-point volumes: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to a fixed-point volume
///
/// Returns `None` if parsing fails, the value is negative, or it is out of range.
///
/// # Example
///
/// ```
/// use wellmatch::types::volume::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<Volume> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to a fixed-point volume
///
/// Returns `None` if the value is negative or out of range.
pub fn decimal_to_fixed(d: Decimal) -> Option<Volume> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert a whole number of base units to fixed-point, saturating at `u64::MAX`
pub fn from_units(units: u64) -> Volume {
    units.saturating_mul(SCALE)
}

/// Convert a fixed-point volume to a Decimal
pub fn fixed_to_decimal(value: Volume) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Format a fixed-point volume with 8 decimal places
///
/// ```
/// use wellmatch::types::volume::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// ```
pub fn from_fixed(value: Volume) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Format a fixed-point volume with trailing zeros trimmed
///
/// ```
/// use wellmatch::types::volume::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(2_000_000_000), "20");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: Volume) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}
