//! Vault — custodial ledger orchestration
//!
//! The caller-facing engine tying together the token registry, the price
//! adapter, the conversion arithmetic and the balance ledger:
//! - deposits priced through oracles and admitted under the capacity cap
//! - two-phase withdrawals (request holds funds, withdraw pays out)
//! - registry administration gated by the external authorizer
//!
//! External collaborators (authorizer, price source, transfer rail) are
//! passed into each call rather than owned, so a vault can outlive any of
//! them and tests can swap them freely.

use tracing::{info, warn};
use types::asset::{AssetId, OracleRef};
use types::ids::UserId;
use types::numeric::{NormalizedValue, RawAmount};

use crate::config::{VaultConfig, NATIVE_DECIMALS};
use crate::convert;
use crate::errors::{CustodyError, TransferError};
use crate::events::{
    CustodyEvent, Deposited, TokenAdded, TokenRemoved, WithdrawCompleted, WithdrawRequested,
};
use crate::ledger::{Ledger, LedgerTotals, UserBalance};
use crate::oracle::{self, PriceReading, PriceSource};
use crate::registry::{TokenConfig, TokenRegistry};
use crate::security::{Authorizer, ReentrancyGuard, Role};
use crate::transfer::TransferService;

/// Core custody engine.
///
/// Every state-changing operation follows the same ordering:
/// 1. Reentrancy guard
/// 2. Input and registry validation
/// 3. Price fetch and risk-limit checks
/// 4. Ledger mutation
/// 5. External transfer, last, where the operation pays out
///
/// Nothing observable changes unless every check before the mutation step
/// passed, and a failed payout rolls its ledger change back.
#[derive(Debug)]
pub struct Vault {
    /// Risk limits, fixed at construction
    config: VaultConfig,
    /// Supported assets and their feeds
    registry: TokenRegistry,
    /// Balance book and running totals
    ledger: Ledger,
    /// Guard shared by all mutating entry points
    guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<CustodyEvent>,
}

impl Vault {
    /// Create a vault with the given risk limits and an empty registry.
    pub fn new(config: VaultConfig) -> Self {
        info!(
            capacity_cap = config.capacity_cap,
            per_request_ceiling = config.per_request_ceiling,
            "Vault initialized"
        );
        Self {
            config,
            registry: TokenRegistry::new(),
            ledger: Ledger::new(),
            guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Token Registry ─────────────────────────

    /// Admit an asset. Admin-only.
    ///
    /// Probes the feed before admitting: an asset whose oracle cannot
    /// produce a valid reading is never registered. Token precision is
    /// read from the token's own metadata; the native asset uses the
    /// fixed chain precision and needs no metadata call.
    pub fn register_token(
        &mut self,
        auth: &dyn Authorizer,
        oracle: &dyn PriceSource,
        rail: &dyn TransferService,
        caller: &UserId,
        asset: AssetId,
        feed: OracleRef,
    ) -> Result<(), CustodyError> {
        self.with_guard(|vault| {
            if !auth.has_role(caller, Role::Admin) {
                warn!(caller = %caller, asset = %asset, "Registration rejected: not admin");
                return Err(CustodyError::Unauthorized);
            }
            if let AssetId::Token(address) = &asset {
                if address.is_empty() {
                    return Err(CustodyError::InvalidAsset {
                        reason: "empty token identifier".to_string(),
                    });
                }
            }
            if vault.registry.is_supported(&asset) {
                return Err(CustodyError::AlreadySupported { asset });
            }

            oracle::fetch(oracle, &feed)?;
            let native_decimals = match &asset {
                AssetId::Native => NATIVE_DECIMALS,
                token => rail.token_decimals(token)?,
            };

            vault.registry.insert(asset.clone(), feed.clone(), native_decimals)?;
            info!(asset = %asset, feed = %feed, native_decimals, "Token registered");
            vault.events.push(CustodyEvent::TokenAdded(TokenAdded {
                asset,
                oracle_ref: feed,
                native_decimals,
            }));
            Ok(())
        })
    }

    /// Deactivate an asset. Admin-only. The native asset is permanent and
    /// rejects removal like an unknown asset would.
    ///
    /// Blocks new deposits and withdrawal requests; balances already
    /// recorded under the asset stay addressable and pending holds stay
    /// payable.
    pub fn deregister_token(
        &mut self,
        auth: &dyn Authorizer,
        caller: &UserId,
        asset: &AssetId,
    ) -> Result<(), CustodyError> {
        self.with_guard(|vault| {
            if !auth.has_role(caller, Role::Admin) {
                return Err(CustodyError::Unauthorized);
            }
            if asset.is_native() {
                return Err(CustodyError::NotSupported {
                    asset: asset.clone(),
                });
            }

            vault.registry.deactivate(asset)?;
            info!(asset = %asset, "Token deregistered");
            vault.events.push(CustodyEvent::TokenRemoved(TokenRemoved {
                asset: asset.clone(),
            }));
            Ok(())
        })
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Credit `amount` of `asset` to `user`, priced at the current oracle
    /// reading.
    ///
    /// Fails without any state change when the amount is zero, the asset
    /// is not supported, the price cannot be validated, or the new running
    /// total would exceed the capacity cap. Returns the user's new
    /// available balance and emits `Deposited`.
    pub fn deposit(
        &mut self,
        oracle: &dyn PriceSource,
        user: UserId,
        asset: &AssetId,
        amount: RawAmount,
    ) -> Result<RawAmount, CustodyError> {
        self.with_guard(|vault| {
            if amount == 0 {
                return Err(CustodyError::ZeroAmount);
            }
            let normalized = vault.convert_to_normalized(oracle, asset, amount)?;
            let totals = vault.ledger.totals();
            let new_total = totals
                .total_normalized_value
                .checked_add(normalized)
                .ok_or(CustodyError::Overflow)?;
            if new_total > vault.config.capacity_cap {
                warn!(
                    user = %user,
                    asset = %asset,
                    attempted = new_total,
                    cap = vault.config.capacity_cap,
                    "Deposit rejected: capacity cap"
                );
                return Err(CustodyError::CapExceeded {
                    attempted: new_total,
                    cap: vault.config.capacity_cap,
                });
            }

            let new_available = vault.ledger.credit(user, asset.clone(), amount)?;
            vault.ledger.record_deposit(new_total);
            info!(
                user = %user,
                asset = %asset,
                amount,
                normalized_value = normalized,
                new_available,
                "Deposit accepted"
            );
            vault.events.push(CustodyEvent::Deposited(Deposited {
                user,
                asset: asset.clone(),
                amount,
                normalized_value: normalized,
                new_available,
            }));
            Ok(new_available)
        })
    }

    // ───────────────────────── Withdrawal ─────────────────────────

    /// Move `amount` from the user's available balance into the pending
    /// hold, priced at the current oracle reading.
    ///
    /// Requests accumulate: a second request adds to the existing hold.
    /// The per-request ceiling applies to this request's normalized value
    /// alone, never to the cumulative pending amount.
    pub fn request_withdraw(
        &mut self,
        oracle: &dyn PriceSource,
        user: UserId,
        asset: &AssetId,
        amount: RawAmount,
    ) -> Result<(), CustodyError> {
        self.with_guard(|vault| {
            if amount == 0 {
                return Err(CustodyError::ZeroAmount);
            }
            if !vault.registry.is_supported(asset) {
                return Err(CustodyError::NotSupported {
                    asset: asset.clone(),
                });
            }
            let available = vault.ledger.available_of(&user, asset);
            if amount > available {
                return Err(CustodyError::InsufficientBalance {
                    available,
                    requested: amount,
                });
            }
            let normalized = vault.convert_to_normalized(oracle, asset, amount)?;
            if normalized > vault.config.per_request_ceiling {
                warn!(
                    user = %user,
                    asset = %asset,
                    normalized_value = normalized,
                    limit = vault.config.per_request_ceiling,
                    "Withdrawal request rejected: per-request ceiling"
                );
                return Err(CustodyError::WithdrawLimitExceeded {
                    normalized_value: normalized,
                    limit: vault.config.per_request_ceiling,
                });
            }
            let totals = vault.ledger.totals();
            let new_total = totals
                .total_normalized_value
                .checked_sub(normalized)
                .ok_or(CustodyError::Underflow {
                    total: totals.total_normalized_value,
                    attempted: normalized,
                })?;

            vault.ledger.hold(user, asset.clone(), amount)?;
            vault.ledger.record_withdraw_request(new_total);
            info!(
                user = %user,
                asset = %asset,
                amount,
                normalized_value = normalized,
                "Withdrawal requested"
            );
            vault.events.push(CustodyEvent::WithdrawRequested(WithdrawRequested {
                user,
                asset: asset.clone(),
                amount,
                normalized_value: normalized,
            }));
            Ok(())
        })
    }

    /// Pay out the user's entire pending hold through the transfer rail.
    ///
    /// The hold is zeroed before the rail is called, and the call is the
    /// operation's last action. A failed transfer restores the hold and
    /// returns `TransferFailed`, leaving state exactly as before. Works
    /// for deregistered assets: funds already held are always payable.
    pub fn withdraw(
        &mut self,
        rail: &mut dyn TransferService,
        user: UserId,
        asset: &AssetId,
    ) -> Result<RawAmount, CustodyError> {
        self.with_guard(|vault| {
            let amount = vault.ledger.take_pending(&user, asset)?;

            let payout = match asset {
                AssetId::Native => {
                    if rail.transfer_native(&user, amount) {
                        Ok(())
                    } else {
                        Err(TransferError::Rejected {
                            reason: "native transfer rejected by receiver".to_string(),
                        })
                    }
                }
                token => rail.transfer_token(token, &user, amount),
            };

            if let Err(err) = payout {
                vault.ledger.restore_pending(user, asset.clone(), amount);
                warn!(
                    user = %user,
                    asset = %asset,
                    amount,
                    error = %err,
                    "Withdrawal payout failed, hold restored"
                );
                return Err(CustodyError::TransferFailed(err));
            }

            info!(user = %user, asset = %asset, amount, "Withdrawal completed");
            vault.events.push(CustodyEvent::WithdrawCompleted(WithdrawCompleted {
                user,
                asset: asset.clone(),
                amount,
            }));
            Ok(amount)
        })
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Available balance for a (user, asset) pair.
    pub fn balance_of(&self, user: &UserId, asset: &AssetId) -> RawAmount {
        self.ledger.available_of(user, asset)
    }

    /// Pending-withdrawal hold for a (user, asset) pair.
    pub fn pending_withdrawal_of(&self, user: &UserId, asset: &AssetId) -> RawAmount {
        self.ledger.pending_of(user, asset)
    }

    /// Full balance entry for a (user, asset) pair.
    pub fn user_balance(&self, user: &UserId, asset: &AssetId) -> UserBalance {
        self.ledger.balance_of(user, asset)
    }

    /// Whether the asset currently accepts deposits and requests.
    pub fn is_supported(&self, asset: &AssetId) -> bool {
        self.registry.is_supported(asset)
    }

    /// Currently active assets.
    pub fn supported_assets(&self) -> Vec<AssetId> {
        self.registry.supported()
    }

    /// Configuration record for an asset, active or not.
    pub fn token_info(&self, asset: &AssetId) -> Option<&TokenConfig> {
        self.registry.config(asset)
    }

    /// Running totals snapshot.
    pub fn totals(&self) -> LedgerTotals {
        self.ledger.totals()
    }

    /// Configured risk limits.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Normalized value of `amount` of `asset` at the current reading.
    ///
    /// Read-only; fetches a fresh price like the mutating paths do.
    pub fn convert_to_normalized(
        &self,
        oracle: &dyn PriceSource,
        asset: &AssetId,
        amount: RawAmount,
    ) -> Result<NormalizedValue, CustodyError> {
        let config = self.registry.active_config(asset)?;
        let reading = oracle::fetch(oracle, &config.oracle_ref)?;
        convert::normalize_at(amount, &reading, config.native_decimals)
    }

    /// Validated current price for an active asset.
    pub fn current_price(
        &self,
        oracle: &dyn PriceSource,
        asset: &AssetId,
    ) -> Result<PriceReading, CustodyError> {
        let config = self.registry.active_config(asset)?;
        Ok(oracle::fetch(oracle, &config.oracle_ref)?)
    }

    // ───────────────────────── Events ─────────────────────────

    /// All emitted events.
    pub fn events(&self) -> &[CustodyEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<CustodyEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    /// Run `op` inside the reentrancy guard.
    ///
    /// The guard is released on every exit path, success or failure, so a
    /// rejected operation never wedges the vault.
    fn with_guard<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, CustodyError>,
    ) -> Result<T, CustodyError> {
        if !self.guard.try_enter() {
            return Err(CustodyError::Reentrancy);
        }
        let result = op(self);
        self.guard.leave();
        result
    }
}
