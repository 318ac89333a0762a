//! Request-to-source matching.
//!
//! ## Modes
//!
//! - [`MatchMode::Grouped`]: any destination may draw from any source.
//!   Destinations are visited in input order and each takes the **first**
//!   still-unused compatible source in source order. Callers establish that
//!   order through the plate's canonical column-major traversal, so ties
//!   between fungible sources resolve the same way every time.
//! - [`MatchMode::PositionallyLocked`]: destination `i` may only draw from
//!   source `i`, modelling a multichannel head where every channel moves in
//!   lock-step over the well directly beneath it.
//!
//! In both modes a source feeds at most one destination per round (one
//! aspirate per well per round) and the assigned volume is
//! `min(destination.volume, source.volume)`. Anything left over is picked up
//! by a later round once the caller has applied the depletion.
//!
//! ## Complexity
//!
//! Grouped mode is O(destinations × sources); positional mode is linear.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::compat::{compatible_within, normalize_name, same_liquid_within};
use crate::config::MatchConfig;
use crate::engine::assignment::Match;
use crate::error::MatchError;
use crate::types::LiquidSample;

/// How destinations may be paired with sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Any destination may use any source (single-channel / sequential pipetting)
    #[default]
    Grouped,
    /// Destination `i` may only use source `i` (multichannel lock-step)
    PositionallyLocked,
}

impl MatchMode {
    /// Map the boolean "independent" flag onto a mode
    ///
    /// ```
    /// use wellmatch::MatchMode;
    ///
    /// assert_eq!(MatchMode::from_independent(true), MatchMode::PositionallyLocked);
    /// assert_eq!(MatchMode::from_independent(false), MatchMode::Grouped);
    /// ```
    pub fn from_independent(independent: bool) -> Self {
        if independent {
            MatchMode::PositionallyLocked
        } else {
            MatchMode::Grouped
        }
    }
}

/// Stateless matcher carrying its configuration.
///
/// ## Example
///
/// ```
/// use wellmatch::{Matcher, MatchMode};
/// use wellmatch::types::{LiquidSample, Location};
/// use wellmatch::types::volume::from_units;
///
/// let destinations = vec![LiquidSample::new("water", from_units(20)); 2];
/// let sources = vec![
///     LiquidSample::new("water", from_units(200)).at(Location::new("src", "A1")),
///     LiquidSample::new("water", from_units(200)).at(Location::new("src", "B1")),
/// ];
///
/// let round = Matcher::default().run(&destinations, &sources, MatchMode::Grouped).unwrap();
/// assert_eq!(round.source_index, vec![Some(0), Some(1)]);
/// assert_eq!(round.score, from_units(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Create a matcher with a validated configuration
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] if `config` is out of range.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Compute one matching round.
    ///
    /// Inputs are never mutated. The returned [`Match`] always has one entry
    /// per destination; liquids with no compatible source anywhere are listed
    /// in [`Match::unsourced`].
    ///
    /// # Errors
    ///
    /// [`MatchError::LengthMismatch`] in positional mode when the two lists
    /// differ in length.
    pub fn run(
        &self,
        destinations: &[LiquidSample],
        sources: &[LiquidSample],
        mode: MatchMode,
    ) -> Result<Match, MatchError> {
        let mut round = match mode {
            MatchMode::Grouped => self.match_grouped(destinations, sources),
            MatchMode::PositionallyLocked => self.match_positional(destinations, sources)?,
        };

        round.unsourced = self.unsourced(destinations, sources);
        if round.is_not_found() {
            warn!(liquids = ?round.unsourced, "requested liquids have no compatible source");
        }

        trace!(
            ?mode,
            destinations = destinations.len(),
            sources = sources.len(),
            matched = round.matched_count(),
            score = round.score,
            "matching round computed"
        );
        Ok(round)
    }

    fn match_positional(&self, destinations: &[LiquidSample], sources: &[LiquidSample]) -> Result<Match, MatchError> {
        if destinations.len() != sources.len() {
            return Err(MatchError::LengthMismatch {
                destinations: destinations.len(),
                sources: sources.len(),
            });
        }

        let precision = self.config.concentration_precision;
        let mut round = Match::unmatched(destinations.len());

        for (i, (destination, source)) in destinations.iter().zip(sources).enumerate() {
            if destination.volume == 0 {
                continue;
            }
            if compatible_within(destination, source, precision) {
                let volume = destination.volume.min(source.volume);
                trace!(destination = i, source = i, volume, "positional assignment");
                round.assign(i, i, source, volume);
            }
        }

        Ok(round)
    }

    fn match_grouped(&self, destinations: &[LiquidSample], sources: &[LiquidSample]) -> Match {
        let precision = self.config.concentration_precision;
        let mut round = Match::unmatched(destinations.len());
        let mut used = vec![false; sources.len()];

        for (i, destination) in destinations.iter().enumerate() {
            if destination.volume == 0 {
                continue;
            }

            let chosen = sources
                .iter()
                .enumerate()
                .find(|(k, source)| !used[*k] && compatible_within(destination, source, precision));

            if let Some((k, source)) = chosen {
                used[k] = true;
                let volume = destination.volume.min(source.volume);
                trace!(destination = i, source = k, volume, "grouped assignment");
                round.assign(i, k, source, volume);
            }
        }

        round
    }

    /// Names of requested liquids that no source could ever supply.
    ///
    /// Satisfied and nameless destinations are not requests and are skipped.
    fn unsourced(&self, destinations: &[LiquidSample], sources: &[LiquidSample]) -> Vec<String> {
        let precision = self.config.concentration_precision;
        let mut seen = HashSet::new();
        let mut missing = Vec::new();

        for destination in destinations {
            let name = normalize_name(&destination.name);
            if destination.volume == 0 || name.is_empty() {
                continue;
            }
            let has_source = sources
                .iter()
                .any(|source| same_liquid_within(destination, source, precision));
            if !has_source && seen.insert(name) {
                missing.push(name.to_string());
            }
        }

        missing
    }
}

/// Compute one matching round with the default configuration.
///
/// See [`Matcher::run`].
pub fn match_liquids(
    destinations: &[LiquidSample],
    sources: &[LiquidSample],
    mode: MatchMode,
) -> Result<Match, MatchError> {
    Matcher::default().run(destinations, sources, mode)
}
