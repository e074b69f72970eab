//! Custody-specific error types
//!
//! Comprehensive error taxonomy for oracle reads, transfers and ledger
//! operations. Variants carry the offending values so callers can log and
//! reconcile without re-reading state.

use thiserror::Error;
use types::asset::AssetId;
use types::numeric::{NormalizedValue, RawAmount};

/// Price feed errors
///
/// Any of these aborts the operation that needed the price; readings are
/// never cached and there is no fallback source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Invalid price reading: answer {answer}, round {round_id}, updated at {updated_at}")]
    InvalidPrice {
        answer: i128,
        round_id: u64,
        updated_at: u64,
    },

    #[error("Stale price reading: answered in round {answered_in_round}, price from round {updated_at_round}")]
    StalePrice {
        answered_in_round: u64,
        updated_at_round: u64,
    },

    #[error("Price feed unavailable: {reason}")]
    FeedUnavailable { reason: String },
}

/// Errors surfaced by the external transfer rail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Transfer rejected: {reason}")]
    Rejected { reason: String },

    #[error("Transfer under-delivered: expected {expected}, delivered {delivered}")]
    UnderDelivered {
        expected: RawAmount,
        delivered: RawAmount,
    },

    #[error("Token metadata unavailable: {reason}")]
    MetadataUnavailable { reason: String },
}

/// Errors returned by the custody engine's caller-facing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CustodyError {
    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Invalid asset identifier: {reason}")]
    InvalidAsset { reason: String },

    #[error("Asset not supported: {asset}")]
    NotSupported { asset: AssetId },

    #[error("Asset already supported: {asset}")]
    AlreadySupported { asset: AssetId },

    #[error("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[error("Reentrant call rejected")]
    Reentrancy,

    #[error("Capacity cap exceeded: new total {attempted} over cap {cap}")]
    CapExceeded {
        attempted: NormalizedValue,
        cap: NormalizedValue,
    },

    #[error("Withdrawal over per-request ceiling: {normalized_value} over limit {limit}")]
    WithdrawLimitExceeded {
        normalized_value: NormalizedValue,
        limit: NormalizedValue,
    },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        available: RawAmount,
        requested: RawAmount,
    },

    #[error("No pending withdrawal to complete")]
    NoPendingWithdrawal,

    #[error("Arithmetic overflow in value calculation")]
    Overflow,

    #[error("Accounting underflow: subtracting {attempted} from running total {total}")]
    Underflow {
        total: NormalizedValue,
        attempted: NormalizedValue,
    },

    #[error("Oracle failure: {0}")]
    Oracle(#[from] OracleError),

    #[error("External transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}
