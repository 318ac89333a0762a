//! Minimal plate model feeding the engine.
//!
//! ## Canonical Order
//!
//! Wells are enumerated column-major: down each column top-to-bottom, then
//! across columns left-to-right. For a 96-well plate:
//!
//! ```text
//!      1    2    3  ...  12
//! A    0    8   16       88
//! B    1    9   17       89
//! ...
//! H    7   15   23       95
//! ```
//!
//! Grouped matching breaks ties by source order, so materializing sources
//! through [`Plate::working_samples`] fixes which well gets drawn first.
//!
//! ## Working Volume
//!
//! A well's working volume is its raw volume minus the plate's dead volume
//! (the residual a tip cannot reach), saturating at zero.

mod well;

pub use well::{parse_well, well_name};

use tracing::debug;

use crate::engine::Transfer;
use crate::error::MatchError;
use crate::types::{LiquidSample, Location, Volume};

/// A rectangular plate of wells.
///
/// ## Example
///
/// ```
/// use wellmatch::plate::Plate;
/// use wellmatch::types::LiquidSample;
/// use wellmatch::types::volume::from_units;
///
/// let mut plate = Plate::new("src", 8, 12).with_dead_volume(from_units(5));
/// plate.fill("B1", LiquidSample::new("water", from_units(200))).unwrap();
///
/// let samples = plate.working_samples();
/// assert_eq!(samples.len(), 96);
/// assert_eq!(samples[1].volume, from_units(195));
/// assert_eq!(samples[1].location.slot, "B1");
/// ```
#[derive(Debug, Clone)]
pub struct Plate {
    id: String,
    rows: usize,
    columns: usize,
    dead_volume: Volume,
    /// Contents in canonical (column-major) order
    wells: Vec<LiquidSample>,
}

impl Plate {
    /// Create an empty plate
    pub fn new(id: impl Into<String>, rows: usize, columns: usize) -> Self {
        let id = id.into();
        let wells = (0..rows * columns)
            .map(|index| LiquidSample::empty(Location::new(id.clone(), well_name(index % rows, index / rows))))
            .collect();
        Self {
            id,
            rows,
            columns,
            dead_volume: 0,
            wells,
        }
    }

    /// 8 × 12 plate
    pub fn standard_96(id: impl Into<String>) -> Self {
        Self::new(id, 8, 12)
    }

    /// 16 × 24 plate
    pub fn standard_384(id: impl Into<String>) -> Self {
        Self::new(id, 16, 24)
    }

    /// Reserve `dead_volume` in every well
    pub fn with_dead_volume(mut self, dead_volume: Volume) -> Self {
        self.dead_volume = dead_volume;
        self
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn dead_volume(&self) -> Volume {
        self.dead_volume
    }

    /// Number of wells
    #[inline]
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// `true` if the plate has no wells at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Well identifiers in canonical order
    pub fn wells(&self) -> impl Iterator<Item = &str> + '_ {
        self.wells.iter().map(|w| w.location.slot.as_str())
    }

    /// Canonical index of a well, if it exists on this plate
    pub fn well_index(&self, well: &str) -> Option<usize> {
        let (row, column) = parse_well(well)?;
        (row < self.rows && column < self.columns).then_some(column * self.rows + row)
    }

    fn index_or_err(&self, well: &str) -> Result<usize, MatchError> {
        self.well_index(well).ok_or_else(|| MatchError::UnknownWell {
            plate: self.id.clone(),
            well: well.to_string(),
        })
    }

    // ========================================================================
    // Contents
    // ========================================================================

    /// Replace a well's contents. The sample is relocated to this well.
    ///
    /// # Errors
    ///
    /// [`MatchError::UnknownWell`] if the well is not on the plate.
    pub fn fill(&mut self, well: &str, sample: LiquidSample) -> Result<(), MatchError> {
        let index = self.index_or_err(well)?;
        let location = self.wells[index].location.clone();
        self.wells[index] = sample.at(location);
        Ok(())
    }

    /// Contents of a well
    pub fn get(&self, well: &str) -> Option<&LiquidSample> {
        self.wells.get(self.well_index(well)?)
    }

    /// Raw volume minus dead volume, saturating at zero
    pub fn working_volume(&self, well: &str) -> Option<Volume> {
        self.get(well).map(|s| s.volume.saturating_sub(self.dead_volume))
    }

    /// Raw contents in canonical order
    pub fn samples(&self) -> &[LiquidSample] {
        &self.wells
    }

    /// Contents in canonical order with volumes reduced to working volume,
    /// ready to be used as matcher sources
    pub fn working_samples(&self) -> Vec<LiquidSample> {
        self.wells
            .iter()
            .map(|w| {
                let mut sample = w.clone();
                sample.volume = sample.volume.saturating_sub(self.dead_volume);
                sample
            })
            .collect()
    }

    /// Remove up to `volume` from a well, returning what was removed
    ///
    /// # Errors
    ///
    /// [`MatchError::UnknownWell`] if the well is not on the plate.
    pub fn withdraw(&mut self, well: &str, volume: Volume) -> Result<Volume, MatchError> {
        let index = self.index_or_err(well)?;
        Ok(self.wells[index].withdraw(volume))
    }

    /// Withdraw every transfer drawn from this plate; others are ignored.
    ///
    /// Returns the total volume removed.
    ///
    /// # Errors
    ///
    /// [`MatchError::UnknownWell`] if a transfer names a well not on the plate.
    pub fn apply_transfers(&mut self, transfers: &[Transfer]) -> Result<Volume, MatchError> {
        let id = self.id.clone();
        let mut removed: Volume = 0;
        for transfer in transfers.iter().filter(|t| t.source_location.group_id == id) {
            removed = removed.saturating_add(self.withdraw(&transfer.source_location.slot, transfer.volume)?);
        }
        debug!(plate = %self.id, removed, "applied transfers to plate");
        Ok(removed)
    }

    /// Empty every well
    pub fn clear(&mut self) {
        for well in &mut self.wells {
            *well = LiquidSample::empty(well.location.clone());
        }
    }
}
