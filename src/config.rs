//! Matching configuration.

use rust_decimal::Decimal;

use crate::error::MatchError;
use crate::types::DEFAULT_CONCENTRATION_PRECISION;

/// Default cap on allocation rounds
pub const DEFAULT_MAX_ROUNDS: usize = 1_000;

/// Tunables for the matcher and the allocation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Relative precision used when comparing concentrations inside
    /// compositions. Must be in [0, 1).
    pub concentration_precision: Decimal,

    /// Upper bound on allocation rounds before the driver gives up.
    /// Must be positive.
    pub max_rounds: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            concentration_precision: DEFAULT_CONCENTRATION_PRECISION,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl MatchConfig {
    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.concentration_precision.is_sign_negative() || self.concentration_precision >= Decimal::ONE {
            return Err(MatchError::InvalidConfig(format!(
                "concentration_precision={} must be in [0, 1)",
                self.concentration_precision
            )));
        }
        if self.max_rounds == 0 {
            return Err(MatchError::InvalidConfig("max_rounds must be > 0".to_string()));
        }
        Ok(())
    }

    /// Validate and return self
    pub fn validated(self) -> Result<Self, MatchError> {
        self.validate()?;
        Ok(self)
    }
}
