//! Liquid identity and compatibility.
//!
//! Decides whether a source sample can satisfy a destination request, even
//! partially. All functions are pure and total: malformed concentration data
//! is the concern of whoever built the samples, not of this module.
//!
//! ## Rules
//!
//! A source `s` is compatible with a destination `d` when:
//!
//! 1. their names are equal after [`normalize_name`],
//! 2. their compositions are structurally equivalent (see
//!    [`Composition::equivalent`](crate::types::Composition::equivalent)),
//! 3. their top-level concentrations agree: both absent, or both present and
//!    equal at the working precision,
//! 4. `s` has a name, sits in a container and holds a positive volume.
//!
//! The `*_within` variants take the relative concentration precision
//! explicitly; the plain variants use [`DEFAULT_CONCENTRATION_PRECISION`].

mod name;

pub use name::normalize_name;

use rust_decimal::Decimal;

use crate::types::{LiquidSample, DEFAULT_CONCENTRATION_PRECISION};

/// Normalized names are equal
#[inline]
pub fn names_match(d: &LiquidSample, s: &LiquidSample) -> bool {
    normalize_name(&d.name) == normalize_name(&s.name)
}

/// Compositions are equivalent at the default precision
#[inline]
pub fn compositions_equivalent(d: &LiquidSample, s: &LiquidSample) -> bool {
    compositions_equivalent_within(d, s, DEFAULT_CONCENTRATION_PRECISION)
}

/// Compositions are equivalent at `precision`
pub fn compositions_equivalent_within(d: &LiquidSample, s: &LiquidSample, precision: Decimal) -> bool {
    d.composition.equivalent(&s.composition, precision)
}

/// Top-level concentrations are both absent, or both present and equal at `precision`
pub fn concentrations_equivalent_within(d: &LiquidSample, s: &LiquidSample, precision: Decimal) -> bool {
    match (&d.concentration, &s.concentration) {
        (None, None) => true,
        (Some(a), Some(b)) => a.approx_eq(b, precision),
        _ => false,
    }
}

/// Same liquid identity, ignoring how much the source holds and where it is
///
/// This is the test behind the not-found signal: a destination is unsourced
/// when no source is the same liquid, regardless of volume.
pub fn same_liquid_within(d: &LiquidSample, s: &LiquidSample, precision: Decimal) -> bool {
    !normalize_name(&s.name).is_empty()
        && names_match(d, s)
        && concentrations_equivalent_within(d, s, precision)
        && compositions_equivalent_within(d, s, precision)
}

/// `s` can supply at least part of `d`, at the default precision
///
/// ```
/// use wellmatch::compat::compatible;
/// use wellmatch::types::{LiquidSample, Location};
/// use wellmatch::types::volume::from_units;
///
/// let want = LiquidSample::new("1 X water", from_units(20));
/// let have = LiquidSample::new("water", from_units(5)).at(Location::new("src", "A1"));
/// let dry = LiquidSample::new("water", 0).at(Location::new("src", "B1"));
/// let loose = LiquidSample::new("water", from_units(5));
///
/// assert!(compatible(&want, &have));
/// assert!(!compatible(&want, &dry));
/// assert!(!compatible(&want, &loose));
/// ```
#[inline]
pub fn compatible(d: &LiquidSample, s: &LiquidSample) -> bool {
    compatible_within(d, s, DEFAULT_CONCENTRATION_PRECISION)
}

/// `s` can supply at least part of `d`, at `precision`
///
/// A source without a container cannot be reported in a [`Match`](crate::engine::Match),
/// so it is never eligible.
pub fn compatible_within(d: &LiquidSample, s: &LiquidSample, precision: Decimal) -> bool {
    s.volume > 0 && !s.location.group_id.is_empty() && same_liquid_within(d, s, precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::volume::from_units;
    use crate::types::{Component, Composition, Location};

    fn sample(name: &str, units: u64) -> LiquidSample {
        LiquidSample::new(name, from_units(units)).at(Location::new("src", "A1"))
    }

    fn lb(tryptone: &str) -> Composition {
        Composition::from_components([
            ("Tryptone", Component::new(tryptone.parse().unwrap())),
            ("Yeast extract", Component::new("5 g/l".parse().unwrap())),
        ])
        .unwrap()
    }

    #[test]
    fn test_names_match_after_normalization() {
        assert!(names_match(&sample("1 X 1 X Solution", 1), &sample("Solution", 1)));
        assert!(names_match(&sample(" water ", 1), &sample("water", 1)));
        assert!(!names_match(&sample("fishjuice", 1), &sample("water", 1)));
    }

    #[test]
    fn test_location_is_irrelevant() {
        let d = sample("water", 20).at(Location::new("dest", "A1"));
        let s = sample("water", 200).at(Location::new("src", "H12"));
        assert!(compatible(&d, &s));
    }

    #[test]
    fn test_dry_or_nameless_source_ineligible() {
        let d = sample("water", 20);
        assert!(!compatible(&d, &sample("water", 0)));
        assert!(!compatible(&sample("", 20), &sample("", 200)));
    }

    #[test]
    fn test_unplaced_source_ineligible() {
        let d = sample("water", 20);
        let loose = LiquidSample::new("water", from_units(200));
        let slot_only = LiquidSample::new("water", from_units(200)).at(Location::new("", "A1"));

        assert!(!compatible(&d, &loose));
        assert!(!compatible(&d, &slot_only));
        assert!(same_liquid_within(&d, &loose, DEFAULT_CONCENTRATION_PRECISION));
    }

    #[test]
    fn test_top_level_concentration_is_identity() {
        let stock = |c: &str| sample("NaCl", 200).with_concentration(c.parse().unwrap());
        let d = sample("NaCl", 20).with_concentration("10 mM".parse().unwrap());

        assert!(compatible(&d, &stock("10 mM")));
        assert!(!compatible(&d, &stock("5 mM")));
        assert!(!compatible(&d, &stock("10 MM")));
        assert!(!compatible(&d, &sample("NaCl", 200)));
        assert!(!compatible(&sample("NaCl", 20), &stock("10 mM")));
    }

    #[test]
    fn test_mixture_units_are_case_sensitive() {
        let salt = |c: &str| {
            Composition::from_components([("NaCl", Component::new(c.parse().unwrap()))]).unwrap()
        };
        let d = sample("LB", 20).with_composition(salt("10 mM"));
        let mega = sample("LB", 200).with_composition(salt("10 MM"));

        assert!(!compatible(&d, &mega));
    }

    #[test]
    fn test_atomic_both_sides() {
        assert!(compositions_equivalent(&sample("water", 1), &sample("water", 1)));
    }

    #[test]
    fn test_named_mixture_needs_identical_composition() {
        let d = sample("LB", 20).with_composition(lb("10 g/l"));
        let same = sample("LB", 200).with_composition(lb("10.000001 g/l"));
        let diluted = sample("LB", 200).with_composition(lb("5 g/l"));
        let plain = sample("LB", 200);

        assert!(compatible(&d, &same));
        assert!(!compatible(&d, &diluted));
        assert!(!compatible(&d, &plain));
        assert!(!compatible(&plain, &d));
    }

    #[test]
    fn test_precision_is_configurable() {
        let d = sample("LB", 20).with_composition(lb("10 g/l"));
        let close = sample("LB", 200).with_composition(lb("10.5 g/l"));

        assert!(!compatible_within(&d, &close, DEFAULT_CONCENTRATION_PRECISION));
        assert!(compatible_within(&d, &close, Decimal::new(1, 1)));
    }

    #[test]
    fn test_same_liquid_ignores_volume() {
        let d = sample("water", 20);
        assert!(same_liquid_within(&d, &sample("water", 0), DEFAULT_CONCENTRATION_PRECISION));
        assert!(!same_liquid_within(&d, &sample("milk", 0), DEFAULT_CONCENTRATION_PRECISION));
    }
}
