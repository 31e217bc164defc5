//! Trade record for an executed match between two orders.

use crate::types::{OrderId, Quantity, Tick, Timestamp, UserId};

/// A single fill between a maker and a taker.
///
/// ## Terminology
///
/// - **Maker**: the resting order that was already in the book
/// - **Taker**: the incoming order that crossed the spread
///
/// The trade always executes at the maker's price; the taker's limit only
/// bounds which levels it is willing to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    /// Trade sequence number, assigned by the book.
    pub id: u64,

    /// Maker (resting) order id.
    pub maker_order_id: OrderId,

    /// Taker (incoming) order id.
    pub taker_order_id: OrderId,

    /// Maker account.
    pub maker_user_id: UserId,

    /// Taker account.
    pub taker_user_id: UserId,

    /// Execution price in ticks; always the maker's price.
    pub price: Tick,

    /// Executed quantity.
    pub quantity: Quantity,

    /// Timestamp of the taker event that produced the fill.
    pub timestamp: Timestamp,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        maker_user_id: UserId,
        taker_user_id: UserId,
        price: Tick,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            maker_order_id,
            taker_order_id,
            maker_user_id,
            taker_user_id,
            price,
            quantity,
            timestamp,
        }
    }

    /// Notional value of this fill in tick-units (price * quantity).
    pub fn notional_raw(&self) -> i128 {
        (self.price as i128) * (self.quantity as i128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
