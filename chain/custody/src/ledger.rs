//! Balance ledger
//!
//! Per-(user, asset) balance book plus the process-wide totals. Entries
//! are created lazily on first credit and never deleted; a zeroed entry is
//! indistinguishable from an absent one. All balance arithmetic is checked
//! and fails loudly instead of wrapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use types::asset::AssetId;
use types::ids::UserId;
use types::numeric::{NormalizedValue, RawAmount};

use crate::errors::CustodyError;

/// Balance state for one (user, asset) pair.
///
/// `available` only decreases by moving into `pending_withdrawal`, and
/// `pending_withdrawal` only decreases by being zeroed at completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    pub available: RawAmount,
    pub pending_withdrawal: RawAmount,
}

/// Process-wide accounting counters.
///
/// `total_normalized_value` is priced at event time: deposits add at the
/// deposit-time reading, withdrawal requests subtract at the request-time
/// reading, and completion never touches it. It is an event-sourced
/// running total, not a live valuation of custody.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_normalized_value: NormalizedValue,
    pub deposit_count: u64,
    pub withdraw_count: u64,
}

/// Balance book: user -> (asset -> balance), plus running totals.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<UserId, HashMap<AssetId, UserBalance>>,
    totals: LedgerTotals,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Balance queries ─────────────────────────

    /// Balance entry for a pair, zeroes when absent.
    pub fn balance_of(&self, user: &UserId, asset: &AssetId) -> UserBalance {
        self.balances
            .get(user)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or_default()
    }

    pub fn available_of(&self, user: &UserId, asset: &AssetId) -> RawAmount {
        self.balance_of(user, asset).available
    }

    pub fn pending_of(&self, user: &UserId, asset: &AssetId) -> RawAmount {
        self.balance_of(user, asset).pending_withdrawal
    }

    /// Snapshot of the running totals.
    pub fn totals(&self) -> LedgerTotals {
        self.totals
    }

    // ───────────────────────── Balance mutations ─────────────────────────

    /// Credit `amount` to available, returning the new available balance.
    ///
    /// Fails with `Overflow` before any write if the balance cannot hold
    /// the new amount.
    pub fn credit(
        &mut self,
        user: UserId,
        asset: AssetId,
        amount: RawAmount,
    ) -> Result<RawAmount, CustodyError> {
        let entry = self.balances.entry(user).or_default().entry(asset).or_default();
        let new_available = entry
            .available
            .checked_add(amount)
            .ok_or(CustodyError::Overflow)?;
        entry.available = new_available;
        Ok(new_available)
    }

    /// Move `amount` from available into the pending-withdrawal hold.
    ///
    /// Holds accumulate: a second call adds to whatever is already
    /// pending. Either both fields move or neither does.
    pub fn hold(
        &mut self,
        user: UserId,
        asset: AssetId,
        amount: RawAmount,
    ) -> Result<(), CustodyError> {
        let entry = self.balances.entry(user).or_default().entry(asset).or_default();
        if amount > entry.available {
            return Err(CustodyError::InsufficientBalance {
                available: entry.available,
                requested: amount,
            });
        }
        let new_pending = entry
            .pending_withdrawal
            .checked_add(amount)
            .ok_or(CustodyError::Overflow)?;
        entry.available -= amount;
        entry.pending_withdrawal = new_pending;
        Ok(())
    }

    /// Zero the pending hold and return the amount that was held.
    ///
    /// Fails with `NoPendingWithdrawal` when nothing is held.
    pub fn take_pending(
        &mut self,
        user: &UserId,
        asset: &AssetId,
    ) -> Result<RawAmount, CustodyError> {
        let entry = self
            .balances
            .get_mut(user)
            .and_then(|assets| assets.get_mut(asset))
            .ok_or(CustodyError::NoPendingWithdrawal)?;
        if entry.pending_withdrawal == 0 {
            return Err(CustodyError::NoPendingWithdrawal);
        }
        Ok(std::mem::take(&mut entry.pending_withdrawal))
    }

    /// Put a taken hold back after a failed payout.
    pub fn restore_pending(&mut self, user: UserId, asset: AssetId, amount: RawAmount) {
        let entry = self.balances.entry(user).or_default().entry(asset).or_default();
        // The amount was just taken from this field, so adding it back
        // cannot overflow.
        entry.pending_withdrawal += amount;
    }

    // ───────────────────────── Totals mutations ─────────────────────────

    /// Commit a validated deposit's aggregate effects.
    pub fn record_deposit(&mut self, new_total: NormalizedValue) {
        self.totals.total_normalized_value = new_total;
        self.totals.deposit_count += 1;
    }

    /// Commit a validated withdrawal request's aggregate effects.
    pub fn record_withdraw_request(&mut self, new_total: NormalizedValue) {
        self.totals.total_normalized_value = new_total;
        self.totals.withdraw_count += 1;
    }
}
