//! Order event records consumed by the matcher.
//!
//! ## Event stream
//!
//! The book is fed a single ordered stream of [`Event`]s. Each record is a
//! plain in-memory struct; no wire format is implied. Producers are
//! responsible for sequencing (`seq`) and timestamps; the matcher treats
//! both as opaque.
//!
//! ## Flags
//!
//! [`OrderFlags`] is a bitset carried on every order. The matcher honors
//! `STP` (self-trade prevention); the remaining bits are reserved and ride
//! through untouched on resting orders.

use crate::types::{OrderId, Quantity, SeqNo, Tick, Timestamp, UserId};

// ============================================================================
// Side enum
// ============================================================================

/// Book side: resting bids buy, resting asks sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy side of the book.
    Bid,
    /// Sell side of the book.
    Ask,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

// ============================================================================
// Order flags
// ============================================================================

bitflags::bitflags! {
    /// Per-order flag bitset.
    ///
    /// Only `STP` changes matcher behavior. The other bits are reserved:
    /// they ride along on the order and come back out through the logger,
    /// but the matcher never acts on them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OrderFlags: u32 {
        /// Self-trade prevention: on a would-match against the same user's
        /// resting order, cancel the resting order instead of trading.
        const STP = 1 << 0;
        /// Reserved: immediate-or-cancel.
        const IOC = 1 << 1;
        /// Reserved: fill-or-kill.
        const FOK = 1 << 2;
        /// Reserved: reject instead of crossing.
        const POST_ONLY = 1 << 3;
    }
}

// ============================================================================
// Ingress records
// ============================================================================

/// A new order entering the book.
///
/// `price` is ignored when the order is submitted as a market order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    /// Stream sequence number.
    pub seq: SeqNo,
    /// Event timestamp.
    pub ts: Timestamp,
    /// Unique order id.
    pub id: OrderId,
    /// Owning account.
    pub user: UserId,
    /// Book side.
    pub side: Side,
    /// Limit price in ticks.
    pub price: Tick,
    /// Order size; non-positive is treated as a no-op.
    pub qty: Quantity,
    /// Flag bitset.
    pub flags: OrderFlags,
}

/// Replacement for a resting order, addressed by id.
///
/// The side of the original order is retained; a replacement cannot flip
/// an order across the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyOrder {
    pub seq: SeqNo,
    pub ts: Timestamp,
    /// Id of the resting order to replace.
    pub id: OrderId,
    pub new_price: Tick,
    pub new_qty: Quantity,
    pub flags: OrderFlags,
}

/// Cancellation of a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelOrder {
    pub id: OrderId,
}

/// One element of the ordered event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// New limit order: matches what crosses, rests the remainder.
    Limit(NewOrder),
    /// New market order: matches until the book runs out, never rests.
    Market(NewOrder),
    /// Replace a resting order.
    Modify(ModifyOrder),
    /// Remove a resting order.
    Cancel(CancelOrder),
}

// ============================================================================
// Operation result
// ============================================================================

/// Outcome of a submit or modify.
///
/// `filled + remaining` always equals the submitted quantity. For a limit
/// order `remaining` is the quantity now resting; for a market order it is
/// the quantity that went unfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    pub filled: Quantity,
    pub remaining: Quantity,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_flags_are_independent_bits() {
        let f = OrderFlags::STP | OrderFlags::IOC;
        assert!(f.contains(OrderFlags::STP));
        assert!(f.contains(OrderFlags::IOC));
        assert!(!f.contains(OrderFlags::FOK));
        assert!(!f.contains(OrderFlags::POST_ONLY));
    }

    #[test]
    fn test_flags_default_empty() {
        assert_eq!(OrderFlags::default(), OrderFlags::empty());
    }

    #[test]
    fn test_exec_result_default_is_noop() {
        let r = ExecResult::default();
        assert_eq!(r.filled, 0);
        assert_eq!(r.remaining, 0);
    }
}
