//! The result of one matching round and how to apply it.
//!
//! ## Layout
//!
//! A [`Match`] is column-oriented: every vector has one entry per
//! destination, in destination order.
//!
//! ```text
//! i  source_index  source_group_ids  source_slots  volumes
//! 0  Some(0)       "src"             "A1"          20
//! 1  None          ""                ""            0
//! 2  Some(3)       "src"             "D1"          15
//! ```
//!
//! For every `i`: `source_index[i].is_none()` ⇔ `volumes[i] == 0` ⇔
//! `source_group_ids[i].is_empty()`. No source index appears twice.

use crate::error::MatchError;
use crate::types::{LiquidSample, Volume};

/// One allocation round: which source feeds which destination, and how much.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Match {
    /// Container of the chosen source per destination (empty if unmatched)
    pub source_group_ids: Vec<String>,

    /// Slot of the chosen source per destination (empty if unmatched)
    pub source_slots: Vec<String>,

    /// Volume assigned per destination (0 if unmatched)
    pub volumes: Vec<Volume>,

    /// Index into the source list per destination
    pub source_index: Vec<Option<usize>>,

    /// Sum of `volumes`
    pub score: Volume,

    /// Normalized names of requested liquids with no compatible source
    /// anywhere in the input, in first-request order
    pub unsourced: Vec<String>,
}

impl Match {
    /// A round with `n` destinations and nothing assigned
    pub fn unmatched(n: usize) -> Self {
        Self {
            source_group_ids: vec![String::new(); n],
            source_slots: vec![String::new(); n],
            volumes: vec![0; n],
            source_index: vec![None; n],
            score: 0,
            unsourced: Vec::new(),
        }
    }

    /// Record that `source` (at index `source_index`) feeds destination `i`.
    ///
    /// A zero volume or an unplaced source records nothing, keeping the
    /// unmatched invariant.
    pub(crate) fn assign(&mut self, i: usize, source_index: usize, source: &LiquidSample, volume: Volume) {
        if volume == 0 || source.location.group_id.is_empty() {
            return;
        }
        self.source_group_ids[i] = source.location.group_id.clone();
        self.source_slots[i] = source.location.slot.clone();
        self.volumes[i] = volume;
        self.source_index[i] = Some(source_index);
        self.score = self.score.saturating_add(volume);
    }

    /// Number of destinations covered by this round
    #[inline]
    pub fn len(&self) -> usize {
        self.source_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source_index.is_empty()
    }

    /// Number of destinations that received a source this round
    pub fn matched_count(&self) -> usize {
        self.source_index.iter().filter(|k| k.is_some()).count()
    }

    /// `(destination, source, volume)` for every matched destination
    pub fn assignments(&self) -> impl Iterator<Item = (usize, usize, Volume)> + '_ {
        self.source_index
            .iter()
            .zip(&self.volumes)
            .enumerate()
            .filter_map(|(i, (k, v))| k.map(|k| (i, k, *v)))
    }

    /// `true` if some requested liquid has no source at all
    pub fn is_not_found(&self) -> bool {
        !self.unsourced.is_empty()
    }

    /// Turn the not-found signal into an error.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotFound`] listing the unsourced liquids.
    pub fn check(&self) -> Result<(), MatchError> {
        if self.unsourced.is_empty() {
            Ok(())
        } else {
            Err(MatchError::NotFound {
                names: self.unsourced.clone(),
            })
        }
    }

    /// Apply this round's depletion to the caller's samples.
    ///
    /// For every matched `i` the assigned volume is withdrawn from
    /// `sources[source_index[i]]` and from `destinations[i]`, both
    /// saturating at zero. Indices outside the given slices are skipped.
    ///
    /// Returns the total volume withdrawn from sources.
    pub fn apply(&self, destinations: &mut [LiquidSample], sources: &mut [LiquidSample]) -> Volume {
        let mut moved: Volume = 0;
        for (i, k, volume) in self.assignments() {
            if let Some(source) = sources.get_mut(k) {
                moved = moved.saturating_add(source.withdraw(volume));
            }
            if let Some(destination) = destinations.get_mut(i) {
                destination.withdraw(volume);
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::volume::from_units;
    use crate::types::Location;

    fn source(slot: &str, units: u64) -> LiquidSample {
        LiquidSample::new("water", from_units(units)).at(Location::new("src", slot))
    }

    #[test]
    fn test_assign_refuses_unplaced_source() {
        let mut m = Match::unmatched(1);
        m.assign(0, 0, &LiquidSample::new("water", from_units(200)), from_units(20));

        assert_eq!(m.source_index, vec![None]);
        assert_eq!(m.volumes, vec![0]);
        assert_eq!(m.score, 0);
    }

    #[test]
    fn test_unmatched() {
        let m = Match::unmatched(3);
        assert_eq!(m.len(), 3);
        assert_eq!(m.matched_count(), 0);
        assert_eq!(m.score, 0);
        assert!(m.source_group_ids.iter().all(String::is_empty));
        assert!(m.check().is_ok());
    }

    #[test]
    fn test_assign_keeps_invariant() {
        let mut m = Match::unmatched(2);
        m.assign(1, 4, &source("E1", 200), from_units(20));

        assert_eq!(m.source_index, vec![None, Some(4)]);
        assert_eq!(m.volumes, vec![0, from_units(20)]);
        assert_eq!(m.source_group_ids, vec!["".to_string(), "src".to_string()]);
        assert_eq!(m.source_slots[1], "E1");
        assert_eq!(m.score, from_units(20));
    }

    #[test]
    fn test_assign_zero_volume_is_ignored() {
        let mut m = Match::unmatched(1);
        m.assign(0, 0, &source("A1", 0), 0);
        assert_eq!(m.source_index, vec![None]);
        assert!(m.source_group_ids[0].is_empty());
    }

    #[test]
    fn test_apply_depletes_both_sides() {
        let mut destinations = vec![LiquidSample::new("water", from_units(20)); 2];
        let mut sources = vec![source("A1", 15), source("B1", 200)];

        let mut m = Match::unmatched(2);
        m.assign(0, 0, &sources[0], from_units(15));
        m.assign(1, 1, &sources[1], from_units(20));

        let moved = m.apply(&mut destinations, &mut sources);
        assert_eq!(moved, from_units(35));
        assert_eq!(destinations[0].volume, from_units(5));
        assert_eq!(destinations[1].volume, 0);
        assert_eq!(sources[0].volume, 0);
        assert_eq!(sources[1].volume, from_units(180));
    }

    #[test]
    fn test_apply_clamps_at_zero() {
        let mut destinations = vec![LiquidSample::new("water", from_units(5))];
        let mut sources = vec![source("A1", 3)];

        let mut m = Match::unmatched(1);
        m.assign(0, 0, &source("A1", 50), from_units(10));

        assert_eq!(m.apply(&mut destinations, &mut sources), from_units(3));
        assert_eq!(destinations[0].volume, 0);
        assert_eq!(sources[0].volume, 0);
    }

    #[test]
    fn test_check_reports_not_found() {
        let mut m = Match::unmatched(1);
        m.unsourced.push("fishjuice".to_string());
        assert!(m.is_not_found());
        assert_eq!(
            m.check(),
            Err(MatchError::NotFound {
                names: vec!["fishjuice".to_string()]
            })
        );
    }
}
