//! Normalized-value conversion
//!
//! Pure fixed-point arithmetic turning asset-native amounts into the
//! normalized accounting unit. Everything is `u128` with explicitly
//! checked operations: a value that cannot be represented fails with
//! `Overflow` instead of wrapping, and downscaling truncates toward zero.

use types::numeric::{NormalizedValue, RawAmount, NORMALIZED_DECIMALS};

use crate::errors::CustodyError;
use crate::oracle::PriceReading;

// ── Scaling helpers ──────────────────────────────────────────────────────

/// `10^exp`, or `Overflow` when the power leaves `u128`.
fn pow10(exp: u32) -> Result<u128, CustodyError> {
    10u128.checked_pow(exp).ok_or(CustodyError::Overflow)
}

// ── Normalization ────────────────────────────────────────────────────────

/// Convert `amount` of an asset with `native_decimals` precision into the
/// normalized unit at the quoted price.
///
/// The raw product `amount × price` carries
/// `total = native_decimals + price_decimals` fractional digits and is
/// rescaled to `NORMALIZED_DECIMALS`:
///
/// - `total > target`: divide by `10^(total - target)`, truncating
/// - `total < target`: multiply by `10^(target - total)`, checked
/// - `total = target`: the product is already in scale
pub fn normalize(
    amount: RawAmount,
    price: u128,
    price_decimals: u8,
    native_decimals: u8,
) -> Result<NormalizedValue, CustodyError> {
    let product = amount.checked_mul(price).ok_or(CustodyError::Overflow)?;
    let total = native_decimals as u32 + price_decimals as u32;
    let target = NORMALIZED_DECIMALS as u32;

    if total > target {
        let divisor = pow10(total - target)?;
        Ok(product / divisor)
    } else if total < target {
        let factor = pow10(target - total)?;
        product.checked_mul(factor).ok_or(CustodyError::Overflow)
    } else {
        Ok(product)
    }
}

/// `normalize` with the price taken from a validated reading.
pub fn normalize_at(
    amount: RawAmount,
    reading: &PriceReading,
    native_decimals: u8,
) -> Result<NormalizedValue, CustodyError> {
    normalize(amount, reading.price, reading.price_decimals, native_decimals)
}

// ── Tests ────────────────────────────────────────────────────────────────
