//! # wellmatch
//!
//! Deterministic liquid request-to-source matching for liquid handling.
//!
//! ## Architecture
//!
//! - **Types**: [`LiquidSample`], concentrations, nested compositions,
//!   fixed-point volumes, the allocation receipt
//! - **Compat**: when a source is the same liquid as a request
//! - **Engine**: the matcher (one round) and the allocation driver
//!   (rounds + depletion)
//! - **Plate**: canonical column-major well order and working volumes
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs give identical assignments and
//!    identical receipt state roots
//! 2. **No Floating Point**: volumes are fixed-point `u64` (10^8 scale),
//!    concentrations are `rust_decimal`
//! 3. **Stateless Matching**: the matcher borrows its inputs immutably; only
//!    the driver mutates volumes, through `&mut`
//! 4. **Synchronous Execution**: no I/O, no async, no locking
//!
//! ## Example
//!
//! ```
//! use wellmatch::{Allocator, MatchMode};
//! use wellmatch::plate::Plate;
//! use wellmatch::types::LiquidSample;
//! use wellmatch::types::volume::from_units;
//!
//! let mut plate = Plate::new("src", 8, 1);
//! for well in ["A1", "B1", "C1"] {
//!     plate.fill(well, LiquidSample::new("water", from_units(200))).unwrap();
//! }
//!
//! let mut sources = plate.working_samples();
//! let mut destinations = vec![LiquidSample::new("water", from_units(20)); 4];
//!
//! let report = Allocator::default()
//!     .allocate(&mut destinations, &mut sources, MatchMode::Grouped)
//!     .unwrap();
//!
//! assert!(report.is_complete());
//! assert_eq!(report.rounds.len(), 2);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: LiquidSample, Composition, Concentration, volumes
pub mod types;

/// Liquid identity and compatibility predicates
pub mod compat;

/// Matching engine and allocation driver
pub mod engine;

/// Plate model: canonical well order and working volumes
pub mod plate;

pub mod config;
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::MatchConfig;
pub use engine::{
    match_liquids, AllocationReport, AllocationStatus, Allocator, Match, MatchMode, Matcher, Transfer,
};
pub use error::MatchError;
pub use types::{AllocationReceipt, Component, Composition, Concentration, LiquidSample, Location, Volume};
