//! Token registry
//!
//! Tracks which assets the engine accepts and their per-asset
//! configuration. Removal deactivates rather than deletes: balances
//! recorded under an asset stay addressable after it is deregistered.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use types::asset::{AssetId, OracleRef};

use crate::errors::CustodyError;

/// Per-asset configuration owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Price feed the asset is valued through
    pub oracle_ref: OracleRef,
    /// Decimal precision of the asset's smallest unit
    pub native_decimals: u8,
    /// Whether the asset currently accepts deposits and withdrawal requests
    pub active: bool,
}

/// Registry of supported assets.
///
/// Membership is a set: admitting an asset twice is an error, not an
/// upsert. Configuration records outlive deactivation.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    configs: HashMap<AssetId, TokenConfig>,
    active: HashSet<AssetId>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit an asset with its feed and precision.
    ///
    /// Re-admitting a deactivated asset overwrites its old configuration;
    /// an already active asset is rejected.
    pub fn insert(
        &mut self,
        asset: AssetId,
        oracle_ref: OracleRef,
        native_decimals: u8,
    ) -> Result<(), CustodyError> {
        if self.active.contains(&asset) {
            return Err(CustodyError::AlreadySupported { asset });
        }
        self.configs.insert(
            asset.clone(),
            TokenConfig {
                oracle_ref,
                native_decimals,
                active: true,
            },
        );
        self.active.insert(asset);
        Ok(())
    }

    /// Deactivate an asset, keeping its configuration record.
    pub fn deactivate(&mut self, asset: &AssetId) -> Result<(), CustodyError> {
        if !self.active.remove(asset) {
            return Err(CustodyError::NotSupported {
                asset: asset.clone(),
            });
        }
        if let Some(config) = self.configs.get_mut(asset) {
            config.active = false;
        }
        Ok(())
    }

    /// Whether the asset currently accepts new flow.
    pub fn is_supported(&self, asset: &AssetId) -> bool {
        self.active.contains(asset)
    }

    /// Configuration record, active or not.
    pub fn config(&self, asset: &AssetId) -> Option<&TokenConfig> {
        self.configs.get(asset)
    }

    /// Configuration of an active asset.
    pub fn active_config(&self, asset: &AssetId) -> Result<&TokenConfig, CustodyError> {
        if !self.active.contains(asset) {
            return Err(CustodyError::NotSupported {
                asset: asset.clone(),
            });
        }
        self.configs.get(asset).ok_or_else(|| CustodyError::NotSupported {
            asset: asset.clone(),
        })
    }

    /// Currently active assets. Enumeration order carries no meaning.
    pub fn supported(&self) -> Vec<AssetId> {
        self.active.iter().cloned().collect()
    }
}
