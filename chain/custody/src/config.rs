//! Engine configuration
//!
//! Risk limits are fixed at construction and never adjusted at runtime.
//! Both limits are denominated in the normalized accounting unit.

use serde::{Deserialize, Serialize};
use types::numeric::{NormalizedValue, NORMALIZED_ONE};

/// Decimal precision of the chain's native currency.
pub const NATIVE_DECIMALS: u8 = 18;

/// Risk limits for a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Maximum total normalized value the ledger may hold, across all
    /// users and assets.
    pub capacity_cap: NormalizedValue,
    /// Maximum normalized value a single withdrawal request may carry.
    /// Applies to each request on its own, never to the cumulative
    /// pending amount.
    pub per_request_ceiling: NormalizedValue,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            capacity_cap: 10_000_000 * NORMALIZED_ONE,
            per_request_ceiling: 50_000 * NORMALIZED_ONE,
        }
    }
}
