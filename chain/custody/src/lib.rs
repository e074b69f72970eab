//! Custodial ledger and withdrawal engine
//!
//! Tracks per-user, per-asset balances for deposits priced through
//! external oracles, and pays them out through a two-phase withdrawal
//! state machine. Value only ever moves after the ledger state change
//! that accounts for it has been committed.
//!
//! # Modules
//! - `vault`: Caller-facing engine (deposits, withdrawals, registry admin)
//! - `ledger`: Balance book and process-wide totals
//! - `registry`: Supported-asset set and per-asset configuration
//! - `oracle`: Price feed adapter and validation
//! - `convert`: Fixed-point normalization arithmetic
//! - `transfer`: External value-transfer seam
//! - `security`: Reentrancy guard and role checks
//! - `config`: Risk limits
//! - `events`: Notification records
//! - `errors`: Error taxonomy

pub mod config;
pub mod convert;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod oracle;
pub mod registry;
pub mod security;
pub mod transfer;
pub mod vault;

/// Engine version, bumped on any externally visible behavior change.
pub const ENGINE_VERSION: &str = "0.1.0";
