//! Core data types for wellmatch
//!
//! ## Types
//!
//! - [`LiquidSample`]: a named liquid at a volume and [`Location`]
//! - [`Concentration`]: decimal magnitude with a unit label
//! - [`Composition`] / [`Component`]: nested makeup of a mixture
//! - [`AllocationReceipt`]: SSZ-encodable summary of an allocation run
//!
//! ## Fixed-Point Volumes
//!
//! Volumes are stored as `u64` scaled by 10^8 (see [`volume`]).
//! Example: 20.5 units is stored as 2_050_000_000u64

mod composition;
mod concentration;
mod receipt;
mod sample;
pub mod volume;

pub use composition::{Component, Composition, MAX_COMPOSITION_DEPTH};
pub use concentration::{Concentration, DEFAULT_CONCENTRATION_PRECISION};
pub use receipt::AllocationReceipt;
pub use sample::{LiquidSample, Location};
pub use volume::Volume;
