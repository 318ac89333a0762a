//! Allocation receipt summarizing a completed allocation run.
//!
//! The receipt carries a state root over the final volumes so two runs can
//! be compared byte-for-byte without shipping the samples themselves.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::types::sample::LiquidSample;
use crate::types::volume::Volume;

/// Summary of an allocation run.
///
/// ## State Root
///
/// SHA-256 over the final destination volumes followed by the final source
/// volumes, each as a little-endian `u64`. Identical inputs always produce
/// identical roots.
///
/// ## Example
///
/// ```
/// use wellmatch::types::AllocationReceipt;
///
/// let receipt = AllocationReceipt::new(2, 8, 16_000_000_000, [0u8; 32]);
/// assert_eq!(receipt.rounds, 2);
/// assert!(!receipt.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct AllocationReceipt {
    /// Number of matching rounds executed
    pub rounds: u64,

    /// Number of individual source-to-destination transfers
    pub transfers: u64,

    /// Total volume moved (fixed-point)
    pub total_volume: u64,

    /// SHA-256 of the final volumes
    pub state_root: [u8; 32],
}

impl AllocationReceipt {
    pub fn new(rounds: u64, transfers: u64, total_volume: Volume, state_root: [u8; 32]) -> Self {
        Self {
            rounds,
            transfers,
            total_volume,
            state_root,
        }
    }

    /// Build a receipt whose root is computed from the final sample state
    pub fn from_state(
        rounds: u64,
        transfers: u64,
        total_volume: Volume,
        destinations: &[LiquidSample],
        sources: &[LiquidSample],
    ) -> Self {
        let state_root = Self::compute_state_root(destinations, sources);
        Self::new(rounds, transfers, total_volume, state_root)
    }

    /// Hash the volumes of `destinations` then `sources`
    pub fn compute_state_root(destinations: &[LiquidSample], sources: &[LiquidSample]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((destinations.len() as u64).to_le_bytes());
        for sample in destinations {
            hasher.update(sample.volume.to_le_bytes());
        }
        hasher.update((sources.len() as u64).to_le_bytes());
        for sample in sources {
            hasher.update(sample.volume.to_le_bytes());
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// `true` if nothing was transferred
    pub fn is_empty(&self) -> bool {
        self.transfers == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::volume::from_units;

    fn samples(volumes: &[u64]) -> Vec<LiquidSample> {
        volumes
            .iter()
            .map(|v| LiquidSample::new("water", from_units(*v)))
            .collect()
    }

    #[test]
    fn test_receipt_new() {
        let receipt = AllocationReceipt::new(2, 8, from_units(160), [1u8; 32]);
        assert_eq!(receipt.rounds, 2);
        assert_eq!(receipt.transfers, 8);
        assert_eq!(receipt.total_volume, from_units(160));
        assert_eq!(receipt.state_root, [1u8; 32]);
    }

    #[test]
    fn test_state_root_determinism() {
        let d = samples(&[0, 0, 5]);
        let s = samples(&[180, 200]);
        let a = AllocationReceipt::compute_state_root(&d, &s);
        let b = AllocationReceipt::compute_state_root(&d, &s);
        assert_eq!(a, b);
        assert_ne!(a, [0u8; 32]);
    }

    #[test]
    fn test_state_root_sensitive_to_volumes() {
        let d = samples(&[0, 0]);
        let a = AllocationReceipt::compute_state_root(&d, &samples(&[180, 200]));
        let b = AllocationReceipt::compute_state_root(&d, &samples(&[200, 180]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_state_root_separates_destinations_from_sources() {
        let a = AllocationReceipt::compute_state_root(&samples(&[1]), &samples(&[2, 3]));
        let b = AllocationReceipt::compute_state_root(&samples(&[1, 2]), &samples(&[3]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_state_root_hex() {
        let receipt = AllocationReceipt::new(1, 0, 0, [0xAB; 32]);
        let hex = receipt.state_root_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
        assert!(receipt.is_empty());
    }

    #[test]
    fn test_receipt_ssz_roundtrip() {
        let receipt = AllocationReceipt::from_state(2, 8, from_units(160), &samples(&[0]), &samples(&[40]));
        let bytes = ssz_rs::serialize(&receipt).expect("Failed to serialize");

        // 8 + 8 + 8 + 32
        assert_eq!(bytes.len(), 56);

        let decoded: AllocationReceipt = ssz_rs::deserialize(&bytes).expect("Failed to deserialize");
        assert_eq!(receipt, decoded);
    }
}
