//! Asset addressing types
//!
//! Every custodied asset is either the chain's native currency or a
//! fungible token addressed by an opaque contract identifier. The native
//! asset is a reserved sentinel, not a token with a magic address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a custodied asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The chain's base currency
    Native,
    /// A fungible token, addressed by its contract identifier
    Token(String),
}

impl AssetId {
    /// Create a token identifier
    pub fn token(address: impl Into<String>) -> Self {
        AssetId::Token(address.into())
    }

    /// Whether this is the native asset
    pub fn is_native(&self) -> bool {
        matches!(self, AssetId::Native)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "native"),
            AssetId::Token(address) => write!(f, "{address}"),
        }
    }
}

/// Opaque reference to an external price feed
///
/// The ledger treats this as an address into the oracle collaborator; it
/// carries no meaning beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OracleRef(String);

impl OracleRef {
    pub fn new(feed: impl Into<String>) -> Self {
        Self(feed.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OracleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
