//! External transfer rail
//!
//! The engine never moves value itself. Once a withdrawal's ledger change
//! is committed, the amount is handed to this collaborator as the final
//! action of the operation; a failure there rolls the ledger change back.

use std::collections::HashMap;

use types::asset::AssetId;
use types::ids::UserId;
use types::numeric::RawAmount;

use crate::errors::TransferError;

/// External value-transfer collaborator.
///
/// Implementations front the native rail and the token contracts. Token
/// metadata is read through the same seam at registration time.
pub trait TransferService {
    /// Send native units to `to`. `false` means the receiving side
    /// rejected the payment; receivers may run arbitrary logic.
    fn transfer_native(&mut self, to: &UserId, amount: RawAmount) -> bool;

    /// Send token units to `to`. Non-standard tokens fail in their own
    /// ways; a rail that cannot deliver the full amount must report
    /// `UnderDelivered` rather than deliver less silently.
    fn transfer_token(
        &mut self,
        asset: &AssetId,
        to: &UserId,
        amount: RawAmount,
    ) -> Result<(), TransferError>;

    /// Decimal precision advertised by the token's own metadata.
    fn token_decimals(&self, asset: &AssetId) -> Result<u8, TransferError>;
}

/// Recording fixture: remembers every payout and can be scripted to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransfer {
    /// Completed payouts in order
    pub sent: Vec<(AssetId, UserId, RawAmount)>,
    /// When set, every transfer fails
    pub fail_transfers: bool,
    /// Decimal table consulted by `token_decimals`
    pub decimals: HashMap<AssetId, u8>,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_decimals(&mut self, asset: AssetId, decimals: u8) {
        self.decimals.insert(asset, decimals);
    }
}

impl TransferService for RecordingTransfer {
    fn transfer_native(&mut self, to: &UserId, amount: RawAmount) -> bool {
        if self.fail_transfers {
            return false;
        }
        self.sent.push((AssetId::Native, *to, amount));
        true
    }

    fn transfer_token(
        &mut self,
        asset: &AssetId,
        to: &UserId,
        amount: RawAmount,
    ) -> Result<(), TransferError> {
        if self.fail_transfers {
            return Err(TransferError::Rejected {
                reason: "scripted failure".to_string(),
            });
        }
        self.sent.push((asset.clone(), *to, amount));
        Ok(())
    }

    fn token_decimals(&self, asset: &AssetId) -> Result<u8, TransferError> {
        self.decimals
            .get(asset)
            .copied()
            .ok_or_else(|| TransferError::MetadataUnavailable {
                reason: format!("no metadata for {asset}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_transfer_records_payouts() {
        let mut rail = RecordingTransfer::new();
        let user = UserId::new();
        assert!(rail.transfer_native(&user, 500));
        rail.transfer_token(&AssetId::token("usdc"), &user, 70).unwrap();

        assert_eq!(rail.sent.len(), 2);
        assert_eq!(rail.sent[0], (AssetId::Native, user, 500));
        assert_eq!(rail.sent[1], (AssetId::token("usdc"), user, 70));
    }

    #[test]
    fn test_scripted_failure_records_nothing() {
        let mut rail = RecordingTransfer::new();
        rail.fail_transfers = true;
        let user = UserId::new();

        assert!(!rail.transfer_native(&user, 500));
        assert!(rail.transfer_token(&AssetId::token("usdc"), &user, 70).is_err());
        assert!(rail.sent.is_empty());
    }

    #[test]
    fn test_token_decimals_lookup() {
        let mut rail = RecordingTransfer::new();
        rail.set_decimals(AssetId::token("usdc"), 6);

        assert_eq!(rail.token_decimals(&AssetId::token("usdc")).unwrap(), 6);
        let err = rail.token_decimals(&AssetId::token("dai")).unwrap_err();
        assert!(matches!(err, TransferError::MetadataUnavailable { .. }));
    }
}
