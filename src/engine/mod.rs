//! Matching engine module for wellmatch.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: same input always produces the same assignment
//! 2. **Fixed-Point Volumes**: no floating-point in depletion arithmetic
//! 3. **Stateless Matching**: [`Matcher::run`] never mutates its inputs
//! 4. **Enumeration-Order Priority**: ties between fungible sources go to
//!    the one listed first
//!
//! ## Matching Rules
//!
//! - Each source feeds at most one destination per round
//! - Assigned volume is `min(needed, available)`; partial fills are normal
//! - Satisfied destinations and dry or nameless sources never match
//! - Liquids with no compatible source anywhere are reported, not fatal
//!
//! ## Example
//!
//! ```
//! use wellmatch::engine::{match_liquids, MatchMode};
//! use wellmatch::types::{LiquidSample, Location};
//! use wellmatch::types::volume::from_units;
//!
//! let mut destinations = vec![LiquidSample::new("water", from_units(20))];
//! let mut sources = vec![LiquidSample::new("water", from_units(15)).at(Location::new("src", "A1"))];
//!
//! let round = match_liquids(&destinations, &sources, MatchMode::Grouped).unwrap();
//! assert_eq!(round.volumes, vec![from_units(15)]);
//!
//! round.apply(&mut destinations, &mut sources);
//! assert_eq!(destinations[0].volume, from_units(5));
//! assert_eq!(sources[0].volume, 0);
//! ```

pub mod allocator;
pub mod assignment;
pub mod matcher;

pub use allocator::{AllocationReport, AllocationStatus, Allocator, Transfer};
pub use assignment::Match;
pub use matcher::{match_liquids, MatchMode, Matcher};
