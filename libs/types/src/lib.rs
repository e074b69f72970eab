//! Types library for the custodial ledger
//!
//! This library provides the core type definitions shared by the custody
//! engine, ensuring type safety and a common vocabulary for amounts,
//! assets and identifiers.
//!
//! # Modules
//! - `ids`: Unique identifiers (UserId)
//! - `asset`: Asset addressing (AssetId, OracleRef)
//! - `numeric`: Amount units and fixed-point constants

// Public modules
pub mod asset;
pub mod ids;
pub mod numeric;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
}
