//! Allocation driver: repeated matching with depletion.
//!
//! Each round runs the [`Matcher`], records the assignments as
//! [`Transfer`]s and applies the depletion to the caller's samples. The loop
//! stops when every request is satisfied, when a round makes no progress
//! (`score == 0`), or when `max_rounds` is reached.
//!
//! ```text
//! ┌──────────┐  Match   ┌──────────┐  volumes  ┌──────────┐
//! │ Matcher  │ ───────► │  apply   │ ────────► │ samples  │ ──┐
//! └──────────┘          └──────────┘           └──────────┘   │
//!      ▲                                                      │
//!      └──────────────────────── next round ◄─────────────────┘
//! ```

use tracing::{debug, warn};

use crate::compat::normalize_name;
use crate::config::MatchConfig;
use crate::engine::assignment::Match;
use crate::engine::matcher::{MatchMode, Matcher};
use crate::error::MatchError;
use crate::types::{AllocationReceipt, LiquidSample, Location, Volume};

/// One aspirate/dispense pair produced by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Zero-based round the transfer belongs to
    pub round: usize,
    /// Destination index
    pub destination: usize,
    /// Source index
    pub source: usize,
    /// Where the source was at the time of the transfer
    pub source_location: Location,
    /// Volume moved
    pub volume: Volume,
}

/// Why the driver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationStatus {
    /// Every request reached zero remaining need
    Complete,
    /// Sources ran dry with requests still open
    Exhausted { remaining: usize },
    /// Some requested liquids have no compatible source at all
    Unsourced { names: Vec<String> },
    /// The round cap was hit before convergence
    RoundLimit { rounds: usize },
}

/// Everything the driver did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationReport {
    /// Every round that made progress, in order
    pub rounds: Vec<Match>,
    /// Flattened transfers across all rounds
    pub transfers: Vec<Transfer>,
    pub status: AllocationStatus,
    pub receipt: AllocationReceipt,
}

impl AllocationReport {
    /// `true` if every request was satisfied
    pub fn is_complete(&self) -> bool {
        self.status == AllocationStatus::Complete
    }

    /// Total volume moved across all rounds
    pub fn total_volume(&self) -> Volume {
        self.receipt.total_volume
    }

    /// Map an incomplete allocation to an error.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotFound`] for [`AllocationStatus::Unsourced`]
    /// - [`MatchError::Exhausted`] for [`AllocationStatus::Exhausted`]
    /// - [`MatchError::RoundLimit`] for [`AllocationStatus::RoundLimit`]
    pub fn check(&self) -> Result<(), MatchError> {
        match &self.status {
            AllocationStatus::Complete => Ok(()),
            AllocationStatus::Exhausted { remaining } => Err(MatchError::Exhausted { remaining: *remaining }),
            AllocationStatus::Unsourced { names } => Err(MatchError::NotFound { names: names.clone() }),
            AllocationStatus::RoundLimit { rounds } => Err(MatchError::RoundLimit { rounds: *rounds }),
        }
    }
}

/// Drives matching rounds to a fixed point.
///
/// ## Example
///
/// ```
/// use wellmatch::{Allocator, MatchMode};
/// use wellmatch::types::{LiquidSample, Location};
/// use wellmatch::types::volume::from_units;
///
/// let mut destinations = vec![LiquidSample::new("water", from_units(20)); 3];
/// let mut sources = vec![
///     LiquidSample::new("water", from_units(200)).at(Location::new("src", "A1")),
/// ];
///
/// let report = Allocator::default()
///     .allocate(&mut destinations, &mut sources, MatchMode::Grouped)
///     .unwrap();
///
/// assert!(report.is_complete());
/// assert_eq!(report.rounds.len(), 3);
/// assert_eq!(sources[0].volume, from_units(140));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    matcher: Matcher,
}

impl Allocator {
    /// Create a driver with a validated configuration
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] if `config` is out of range.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        Ok(Self {
            matcher: Matcher::new(config)?,
        })
    }

    /// Run rounds until satisfied or stuck, depleting the samples in place.
    ///
    /// Partial outcomes are reported through [`AllocationReport::status`],
    /// not as errors; use [`AllocationReport::check`] to insist on completion.
    ///
    /// # Errors
    ///
    /// [`MatchError::LengthMismatch`] in positional mode with unequal lists.
    pub fn allocate(
        &self,
        destinations: &mut [LiquidSample],
        sources: &mut [LiquidSample],
        mode: MatchMode,
    ) -> Result<AllocationReport, MatchError> {
        let max_rounds = self.matcher.config().max_rounds;
        let mut rounds: Vec<Match> = Vec::new();
        let mut transfers = Vec::new();
        let mut total: Volume = 0;

        let status = loop {
            let remaining = open_requests(destinations);
            if remaining == 0 {
                break AllocationStatus::Complete;
            }
            if rounds.len() >= max_rounds {
                break AllocationStatus::RoundLimit { rounds: rounds.len() };
            }

            let round = self.matcher.run(destinations, sources, mode)?;
            if round.score == 0 {
                if round.is_not_found() {
                    break AllocationStatus::Unsourced { names: round.unsourced };
                }
                break AllocationStatus::Exhausted { remaining };
            }

            let index = rounds.len();
            for (destination, source, volume) in round.assignments() {
                transfers.push(Transfer {
                    round: index,
                    destination,
                    source,
                    source_location: sources[source].location.clone(),
                    volume,
                });
            }

            let moved = round.apply(destinations, sources);
            total = total.saturating_add(moved);
            debug!(
                round = index,
                matched = round.matched_count(),
                score = round.score,
                remaining = open_requests(destinations),
                "allocation round applied"
            );
            rounds.push(round);
        };

        if status != AllocationStatus::Complete {
            warn!(?status, rounds = rounds.len(), "allocation stopped before satisfying every request");
        }

        let receipt = AllocationReceipt::from_state(
            rounds.len() as u64,
            transfers.len() as u64,
            total,
            destinations,
            sources,
        );

        Ok(AllocationReport {
            rounds,
            transfers,
            status,
            receipt,
        })
    }
}

/// Destinations that are real requests and still need liquid
fn open_requests(destinations: &[LiquidSample]) -> usize {
    destinations
        .iter()
        .filter(|d| d.volume > 0 && !normalize_name(&d.name).is_empty())
        .count()
}
