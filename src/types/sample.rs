//! Liquid samples: the unit both destinations and sources are expressed in.
//!
//! A destination is a sample whose `volume` is the amount still needed; a
//! source is a sample whose `volume` is the amount available for withdrawal
//! (the plate's working volume, already net of dead volume).

use std::fmt;

use crate::types::composition::Composition;
use crate::types::concentration::Concentration;
use crate::types::volume::{self, Volume};

/// Physical address of a sample: container plus position within it.
///
/// Empty strings mean "not placed yet".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Location {
    /// Container identifier (e.g. a plate id)
    pub group_id: String,
    /// Position within the container (e.g. a well coordinate)
    pub slot: String,
}

impl Location {
    pub fn new(group_id: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            slot: slot.into(),
        }
    }

    /// `true` when no container has been assigned
    pub fn is_unassigned(&self) -> bool {
        self.group_id.is_empty() && self.slot.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.slot)
    }
}

/// A named liquid at some volume and location.
///
/// ## Example
///
/// ```
/// use wellmatch::types::{LiquidSample, Location};
/// use wellmatch::types::volume::from_units;
///
/// let water = LiquidSample::new("water", from_units(200))
///     .at(Location::new("plate1", "A1"));
///
/// assert_eq!(water.volume, from_units(200));
/// assert!(!water.is_empty_slot());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiquidSample {
    /// Identity label
    pub name: String,

    /// Held (source) or still-required (destination) volume
    pub volume: Volume,

    /// Where the sample lives
    pub location: Location,

    /// Concentration of the liquid as a whole, if known
    ///
    /// Part of the liquid's identity: a source only serves a destination
    /// whose concentration agrees (both absent, or equal at the working
    /// precision).
    pub concentration: Option<Concentration>,

    /// Makeup when the sample is a mixture
    pub composition: Composition,
}

impl LiquidSample {
    /// Create an unplaced, atomic sample
    pub fn new(name: impl Into<String>, volume: Volume) -> Self {
        Self {
            name: name.into(),
            volume,
            ..Self::default()
        }
    }

    /// An empty slot at the given location: no name, no volume
    pub fn empty(location: Location) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Place the sample at `location`
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_concentration(mut self, concentration: Concentration) -> Self {
        self.concentration = Some(concentration);
        self
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    /// `true` for a slot holding nothing (no name and no volume)
    pub fn is_empty_slot(&self) -> bool {
        self.volume == 0 && self.name.is_empty()
    }

    /// `true` once a destination needs nothing more (or a source is dry)
    pub fn is_depleted(&self) -> bool {
        self.volume == 0
    }

    /// Remove up to `amount`, returning what was actually removed
    ///
    /// Saturates at zero, like the depletion step of the allocation loop.
    pub fn withdraw(&mut self, amount: Volume) -> Volume {
        let actual = amount.min(self.volume);
        self.volume -= actual;
        actual
    }
}

impl fmt::Display for LiquidSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) @ {}",
            self.name,
            volume::from_fixed_trimmed(self.volume),
            self.location
        )
    }
}
