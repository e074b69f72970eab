//! Amount units for custody accounting
//!
//! Raw amounts are unsigned integers denominated in each asset's smallest
//! unit; normalized values are unsigned fixed-point with a fixed number of
//! fractional digits. Both are plain `u128` aliases so all arithmetic on
//! them can be explicitly checked at the call site.

/// Asset-native amount, in the asset's smallest indivisible unit.
pub type RawAmount = u128;

/// Value in the normalized accounting unit.
pub type NormalizedValue = u128;

/// Fractional digits of the normalized accounting unit.
pub const NORMALIZED_DECIMALS: u8 = 6;

/// One whole unit in normalized fixed-point.
pub const NORMALIZED_ONE: NormalizedValue = 1_000_000;
