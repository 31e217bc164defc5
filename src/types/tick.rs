//! Scalar domain types and tick/decimal conversion.
//!
//! ## Integral prices
//!
//! Prices are integral `Tick` counts of the venue's smallest increment.
//! Quantities are signed so that deltas (in-place size modifies, fill
//! accounting) can be computed without underflow surprises; a negative
//! quantity is never a valid input.
//!
//! ## Empty-side sentinels
//!
//! An empty side of the book is encoded as an extreme tick rather than an
//! option: `EMPTY_BID` (the minimum tick) always compares below any real
//! bid and `EMPTY_ASK` (the maximum tick) above any real ask, so the
//! matcher's crossing comparisons need no special-casing.

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Signed price in venue ticks.
pub type Tick = i64;

/// Signed order size.
pub type Quantity = i64;

/// Unique order identifier.
pub type OrderId = u64;

/// Account/owner identifier.
pub type UserId = u64;

/// Event timestamp (opaque to the matcher; nanoseconds by convention).
pub type Timestamp = u64;

/// Stream sequence number.
pub type SeqNo = u64;

/// Sentinel for "no resting bid": below every representable price.
pub const EMPTY_BID: Tick = Tick::MIN;

/// Sentinel for "no resting ask": above every representable price.
pub const EMPTY_ASK: Tick = Tick::MAX;

// ============================================================================
// Decimal <-> tick conversion
// ============================================================================

/// Convert a decimal price string to ticks for a given tick size.
///
/// Returns `None` when either string fails to parse, the tick size is not
/// positive, or the price is not an integral multiple of the tick size.
///
/// # Example
///
/// ```
/// use lobcore::types::tick::to_tick;
///
/// assert_eq!(to_tick("50000.25", "0.25"), Some(200_001));
/// assert_eq!(to_tick("-3.5", "0.5"), Some(-7));
/// assert_eq!(to_tick("50000.30", "0.25"), None); // off-grid
/// ```
pub fn to_tick(price: &str, tick_size: &str) -> Option<Tick> {
    let px = Decimal::from_str(price).ok()?;
    let ts = Decimal::from_str(tick_size).ok()?;
    if ts <= Decimal::ZERO {
        return None;
    }
    let ratio = px.checked_div(ts)?;
    if !ratio.fract().is_zero() {
        return None;
    }
    ratio.to_i64()
}

/// Render a tick count back to a decimal price string.
///
/// Returns `None` when the tick size fails to parse, is not positive, or
/// the product overflows the decimal range.
pub fn from_tick(px: Tick, tick_size: &str) -> Option<String> {
    let ts = Decimal::from_str(tick_size).ok()?;
    if ts <= Decimal::ZERO {
        return None;
    }
    let v = Decimal::from(px).checked_mul(ts)?;
    Some(v.normalize().to_string())
}

// ============================================================================
// Unit Tests
// ============================================================================
