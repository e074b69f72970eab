//! Security primitives for the custody engine
//!
//! Reentrancy protection shared by every mutating entry point, and the
//! authorization seam consulted before registry changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::ids::UserId;

/// Guard rejecting nested calls into mutating operations.
///
/// An operation enters the guard before its first state read and leaves it
/// on every exit path, success or failure. A nested attempt is rejected
/// outright rather than queued.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    in_flight: bool,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self { in_flight: false }
    }

    /// Try to enter a protected section. `false` means another call is
    /// already in progress and the nested attempt must be rejected.
    pub fn try_enter(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Leave the protected section.
    pub fn leave(&mut self) {
        self.in_flight = false;
    }

    /// Whether a protected call is currently in progress.
    pub fn entered(&self) -> bool {
        self.in_flight
    }
}

/// Roles recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Registry administration (register and deregister assets)
    Admin,
    /// Reserved for operational tooling
    Operator,
}

/// Authorization collaborator answering role queries.
///
/// Role management lives outside the engine; operations receive an
/// implementation per call and only ever ask membership questions.
pub trait Authorizer {
    /// Whether `principal` currently holds `role`.
    fn has_role(&self, principal: &UserId, role: Role) -> bool;
}

/// In-memory role assignments, the reference `Authorizer`.
///
/// Each principal holds at most one role.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: HashMap<UserId, Role>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a single admin principal.
    pub fn with_admin(admin: UserId) -> Self {
        let mut table = Self::new();
        table.grant(admin, Role::Admin);
        table
    }

    /// Assign `role` to `principal`, replacing any previous role.
    pub fn grant(&mut self, principal: UserId, role: Role) {
        self.roles.insert(principal, role);
    }

    /// Remove whatever role `principal` holds.
    pub fn revoke(&mut self, principal: &UserId) {
        self.roles.remove(principal);
    }
}

impl Authorizer for RoleTable {
    fn has_role(&self, principal: &UserId, role: Role) -> bool {
        self.roles.get(principal).map_or(false, |held| *held == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- ReentrancyGuard tests ---

    #[test]
    fn test_guard_enter_and_leave() {
        let mut guard = ReentrancyGuard::new();
        assert!(!guard.entered());
        assert!(guard.try_enter());
        assert!(guard.entered());
        guard.leave();
        assert!(!guard.entered());
    }

    #[test]
    fn test_guard_rejects_nested_entry() {
        let mut guard = ReentrancyGuard::new();
        assert!(guard.try_enter());
        assert!(!guard.try_enter(), "Nested entry must fail");
    }

    #[test]
    fn test_guard_reentry_after_leave() {
        let mut guard = ReentrancyGuard::new();
        assert!(guard.try_enter());
        guard.leave();
        assert!(guard.try_enter(), "Should succeed after leave");
    }

    // --- RoleTable tests ---

    #[test]
    fn test_role_table_with_admin() {
        let admin = UserId::new();
        let table = RoleTable::with_admin(admin);
        assert!(table.has_role(&admin, Role::Admin));
        assert!(!table.has_role(&admin, Role::Operator));
    }

    #[test]
    fn test_role_table_unknown_principal() {
        let table = RoleTable::new();
        assert!(!table.has_role(&UserId::new(), Role::Admin));
    }

    #[test]
    fn test_role_table_grant_replaces() {
        let user = UserId::new();
        let mut table = RoleTable::new();
        table.grant(user, Role::Admin);
        table.grant(user, Role::Operator);
        assert!(!table.has_role(&user, Role::Admin));
        assert!(table.has_role(&user, Role::Operator));
    }

    #[test]
    fn test_role_table_revoke() {
        let user = UserId::new();
        let mut table = RoleTable::with_admin(user);
        table.revoke(&user);
        assert!(!table.has_role(&user, Role::Admin));
    }
}
