//! Custody events
//!
//! Events are immutable records appended by engine operations for
//! off-chain bookkeeping. They are notifications, not state: core
//! correctness never depends on them.

use serde::{Deserialize, Serialize};
use types::asset::{AssetId, OracleRef};
use types::ids::UserId;
use types::numeric::{NormalizedValue, RawAmount};

/// Funds credited to a user's available balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub user: UserId,
    pub asset: AssetId,
    pub amount: RawAmount,
    pub normalized_value: NormalizedValue,
    pub new_available: RawAmount,
}

/// Funds moved from available into the pending-withdrawal hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequested {
    pub user: UserId,
    pub asset: AssetId,
    pub amount: RawAmount,
    pub normalized_value: NormalizedValue,
}

/// Pending hold paid out through the transfer rail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawCompleted {
    pub user: UserId,
    pub asset: AssetId,
    pub amount: RawAmount,
}

/// Asset admitted to the supported set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAdded {
    pub asset: AssetId,
    pub oracle_ref: OracleRef,
    pub native_decimals: u8,
}

/// Asset removed from the supported set
///
/// Existing balances stay addressable; only new deposits and withdrawal
/// requests are blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRemoved {
    pub asset: AssetId,
}

/// Enum wrapper for all custody events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyEvent {
    Deposited(Deposited),
    WithdrawRequested(WithdrawRequested),
    WithdrawCompleted(WithdrawCompleted),
    TokenAdded(TokenAdded),
    TokenRemoved(TokenRemoved),
}
