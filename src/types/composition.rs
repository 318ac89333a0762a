//! Nested liquid composition.
//!
//! ## Model
//!
//! A liquid is either **atomic** or a **mixture**: a mapping from
//! sub-liquid name to [`Component`], where each component carries its
//! concentration in the mixture and, recursively, its own composition.
//!
//! ```text
//! LB (mixture)
//!  ├── Tryptone  10 g/l   (atomic)
//!  ├── Yeast      5 g/l   (atomic)
//!  └── Buffer     1 X     (mixture)
//!       ├── NaCl  10 mM   (atomic)
//!       └── Tris  50 mM   (atomic)
//! ```
//!
//! Trees are plain values: every dilution step copies rather than shares,
//! so they are acyclic and comparisons terminate. Nesting is bounded by
//! [`MAX_COMPOSITION_DEPTH`] when built through [`Composition::add_component`].
//!
//! Keys are stored under their normalized name (see
//! [`crate::compat::normalize_name`]) and kept sorted, so structural
//! comparison does not depend on insertion order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::compat::normalize_name;
use crate::error::MatchError;
use crate::types::concentration::{Concentration, DEFAULT_CONCENTRATION_PRECISION};

/// Maximum nesting depth of a composition tree
pub const MAX_COMPOSITION_DEPTH: usize = 8;

/// Makeup of a liquid: atomic, or a mixture of named components.
///
/// An empty mixture is treated exactly like `Atomic`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Composition {
    #[default]
    Atomic,
    Mixture(BTreeMap<String, Component>),
}

/// One sub-liquid inside a mixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Concentration of this sub-liquid in the enclosing mixture
    pub concentration: Concentration,
    /// The sub-liquid's own makeup
    pub composition: Composition,
}

impl Component {
    /// An atomic component
    pub fn new(concentration: Concentration) -> Self {
        Self {
            concentration,
            composition: Composition::Atomic,
        }
    }

    /// A component that is itself a mixture
    pub fn with_composition(concentration: Concentration, composition: Composition) -> Self {
        Self {
            concentration,
            composition,
        }
    }

    /// Structural equivalence at a relative concentration precision
    pub fn equivalent(&self, other: &Component, precision: Decimal) -> bool {
        self.concentration.approx_eq(&other.concentration, precision)
            && self.composition.equivalent(&other.composition, precision)
    }
}

impl Composition {
    /// Build a mixture from `(name, component)` pairs
    ///
    /// # Errors
    ///
    /// Same as [`Composition::add_component`].
    ///
    /// # Example
    ///
    /// ```
    /// use wellmatch::types::{Component, Composition};
    ///
    /// let buffer = Composition::from_components([
    ///     ("NaCl", Component::new("10 mM".parse().unwrap())),
    ///     ("Tris", Component::new("50 mM".parse().unwrap())),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(buffer.len(), 2);
    /// assert_eq!(buffer.depth(), 1);
    /// ```
    pub fn from_components<'a, I>(components: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (&'a str, Component)>,
    {
        let mut composition = Composition::Atomic;
        for (name, component) in components {
            composition.add_component(name, component)?;
        }
        Ok(composition)
    }

    /// `true` for `Atomic` and for an empty mixture
    pub fn is_atomic(&self) -> bool {
        self.components().is_none()
    }

    /// The component map, or `None` when atomic
    pub fn components(&self) -> Option<&BTreeMap<String, Component>> {
        match self {
            Composition::Mixture(map) if !map.is_empty() => Some(map),
            _ => None,
        }
    }

    /// Number of direct components
    pub fn len(&self) -> usize {
        self.components().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a direct component by (normalized) name
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components()?.get(normalize_name(name))
    }

    /// Nesting depth: 0 for atomic, 1 for a mixture of atomics, and so on
    pub fn depth(&self) -> usize {
        match self.components() {
            None => 0,
            Some(map) => 1 + map.values().map(|c| c.composition.depth()).max().unwrap_or(0),
        }
    }

    /// Record a sub-component under its normalized name.
    ///
    /// Re-recording an equivalent component is a no-op.
    ///
    /// # Errors
    ///
    /// - [`MatchError::AlreadyPresent`] if the name is already recorded with
    ///   a different concentration or makeup
    /// - [`MatchError::CompositionTooDeep`] if the result would nest deeper
    ///   than [`MAX_COMPOSITION_DEPTH`]
    pub fn add_component(&mut self, name: &str, component: Component) -> Result<(), MatchError> {
        let depth = 1 + component.composition.depth();
        if depth > MAX_COMPOSITION_DEPTH {
            return Err(MatchError::CompositionTooDeep {
                depth,
                max: MAX_COMPOSITION_DEPTH,
            });
        }

        let key = normalize_name(name);
        if let Some(existing) = self.get(key) {
            if existing.equivalent(&component, DEFAULT_CONCENTRATION_PRECISION) {
                return Ok(());
            }
            return Err(MatchError::AlreadyPresent {
                name: key.to_string(),
            });
        }

        let key = key.to_string();
        match self {
            Composition::Mixture(map) => {
                map.insert(key, component);
            }
            Composition::Atomic => {
                *self = Composition::Mixture(BTreeMap::from([(key, component)]));
            }
        }
        Ok(())
    }

    /// Builder form of [`Composition::add_component`]
    pub fn with_component(mut self, name: &str, component: Component) -> Result<Self, MatchError> {
        self.add_component(name, component)?;
        Ok(self)
    }

    /// Structural equivalence at a relative concentration precision.
    ///
    /// Atomic on both sides matches. Otherwise both sides must be mixtures
    /// with the same keys, and every component must be equivalent.
    pub fn equivalent(&self, other: &Composition, precision: Decimal) -> bool {
        match (self.components(), other.components()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(name, ca)| {
                        b.get(name).is_some_and(|cb| ca.equivalent(cb, precision))
                    })
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atomic(conc: &str) -> Component {
        Component::new(conc.parse().unwrap())
    }

    fn buffer() -> Composition {
        Composition::from_components([("NaCl", atomic("10 mM")), ("Tris", atomic("50 mM"))]).unwrap()
    }

    #[test]
    fn test_empty_mixture_is_atomic() {
        let empty = Composition::Mixture(BTreeMap::new());
        assert!(empty.is_atomic());
        assert_eq!(empty.depth(), 0);
        assert!(empty.equivalent(&Composition::Atomic, DEFAULT_CONCENTRATION_PRECISION));
    }

    #[test]
    fn test_keys_are_normalized() {
        let c = Composition::Atomic
            .with_component(" 1 X Tryptone ", atomic("10 g/l"))
            .unwrap();
        assert!(c.get("Tryptone").is_some());
        assert!(c.get("2 x Tryptone").is_some());
    }

    #[test]
    fn test_add_same_component_twice_is_noop() {
        let mut c = buffer();
        c.add_component("NaCl", atomic("10 mM")).unwrap();
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_conflicting_component_is_already_present() {
        let mut c = buffer();
        let err = c.add_component("NaCl", atomic("20 mM")).unwrap_err();
        assert_eq!(err, MatchError::AlreadyPresent { name: "NaCl".to_string() });
    }

    #[test]
    fn test_nested_depth() {
        let lb = Composition::Atomic
            .with_component("Tryptone", atomic("10 g/l"))
            .unwrap()
            .with_component(
                "Buffer",
                Component::with_composition("1 X".parse().unwrap(), buffer()),
            )
            .unwrap();
        assert_eq!(lb.depth(), 2);
    }

    #[test]
    fn test_depth_bound() {
        let mut tree = Composition::Atomic;
        for level in 0..MAX_COMPOSITION_DEPTH {
            tree = Composition::Atomic
                .with_component(
                    &format!("level{level}"),
                    Component::with_composition("1 X".parse().unwrap(), tree),
                )
                .unwrap();
        }
        assert_eq!(tree.depth(), MAX_COMPOSITION_DEPTH);

        let err = Composition::Atomic
            .with_component("too deep", Component::with_composition("1 X".parse().unwrap(), tree))
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::CompositionTooDeep {
                depth: MAX_COMPOSITION_DEPTH + 1,
                max: MAX_COMPOSITION_DEPTH
            }
        );
    }

    #[test]
    fn test_equivalence_is_order_independent() {
        let a = Composition::from_components([("Tris", atomic("50 mM")), ("NaCl", atomic("10 mM"))]).unwrap();
        assert!(a.equivalent(&buffer(), DEFAULT_CONCENTRATION_PRECISION));
    }

    #[test]
    fn test_equivalence_detects_nested_difference() {
        let other_buffer =
            Composition::from_components([("NaCl", atomic("10 mM")), ("Tris", atomic("25 mM"))]).unwrap();
        let a = Composition::Atomic
            .with_component("Buffer", Component::with_composition("1 X".parse().unwrap(), buffer()))
            .unwrap();
        let b = Composition::Atomic
            .with_component("Buffer", Component::with_composition("1 X".parse().unwrap(), other_buffer))
            .unwrap();
        assert!(!a.equivalent(&b, DEFAULT_CONCENTRATION_PRECISION));
    }

    #[test]
    fn test_mixture_never_matches_atomic() {
        assert!(!buffer().equivalent(&Composition::Atomic, DEFAULT_CONCENTRATION_PRECISION));
        assert!(!Composition::Atomic.equivalent(&buffer(), DEFAULT_CONCENTRATION_PRECISION));
    }

    #[test]
    fn test_missing_key_is_not_equivalent() {
        let partial = Composition::from_components([("NaCl", atomic("10 mM")), ("KCl", atomic("50 mM"))]).unwrap();
        assert!(!partial.equivalent(&buffer(), DEFAULT_CONCENTRATION_PRECISION));
    }
}
