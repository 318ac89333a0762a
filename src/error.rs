//! Error type shared by the matcher, the allocation driver and composition
//! management.

use thiserror::Error;

/// Errors surfaced by wellmatch.
///
/// Only [`MatchError::LengthMismatch`] is a caller contract violation; the
/// others describe recoverable outcomes the caller decides how to handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// At least one requested liquid has no compatible source anywhere in the input
    #[error("no compatible source for requested liquid(s): {}", .names.join(", "))]
    NotFound { names: Vec<String> },

    /// A sub-component was recorded twice with conflicting values
    #[error("sub-component `{name}` already present with a different value")]
    AlreadyPresent { name: String },

    /// A composition tree exceeded the nesting bound
    #[error("composition depth {depth} exceeds maximum of {max}")]
    CompositionTooDeep { depth: usize, max: usize },

    /// Positionally locked matching needs one source per destination
    #[error("positional matching needs equal lengths: {destinations} destinations, {sources} sources")]
    LengthMismatch { destinations: usize, sources: usize },

    /// Sources ran dry while destinations still need liquid
    #[error("sources exhausted with {remaining} destination(s) unsatisfied")]
    Exhausted { remaining: usize },

    /// The allocation driver hit its round cap
    #[error("allocation did not converge within {rounds} rounds")]
    RoundLimit { rounds: usize },

    /// A well identifier does not exist on the plate
    #[error("unknown well `{well}` on plate `{plate}`")]
    UnknownWell { plate: String, well: String },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
