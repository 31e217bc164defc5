//! Observer hook for book mutations.
//!
//! The matcher itself materializes no trade stream and writes no files; a
//! bound [`BookLogger`] receives each mutation right after it is applied
//! and before the operation returns. With no logger bound, nothing is
//! observed and nothing is paid for.

use crate::orderbook::Ladder;
use crate::types::{OrderId, Quantity, Side, Tick, Timestamp, Trade};

/// Callbacks fired by the book at its mutation points.
///
/// All methods default to no-ops so implementations override only what
/// they record. Callbacks run on the matching thread; implementations
/// should be quick.
pub trait BookLogger {
    /// A residual quantity was queued on the book.
    fn on_accept(&mut self, id: OrderId, side: Side, px: Tick, qty: Quantity, ts: Timestamp) {
        let _ = (id, side, px, qty, ts);
    }

    /// A resting order was removed without trading: an explicit cancel, a
    /// replace-to-zero, the removal leg of a price change, or an STP
    /// knockout. `qty` is the quantity that was still resting.
    fn on_cancel(&mut self, id: OrderId, side: Side, px: Tick, qty: Quantity) {
        let _ = (id, side, px, qty);
    }

    /// A fill was executed at the resting order's price.
    fn on_trade(&mut self, trade: &Trade) {
        let _ = trade;
    }

    /// Called once when the logger is bound to a book. The ladders are the
    /// book's own; implementations may walk them read-only to capture a
    /// starting snapshot.
    fn on_bind(&mut self, bids: &Ladder, asks: &Ladder) {
        let _ = (bids, asks);
    }
}

// ============================================================================
// TradeTape
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// A [`BookLogger`] that collects every trade into a shared vector.
///
/// Clones share the same underlying tape, so a handle kept outside the
/// book still sees trades recorded after the tape is bound:
///
/// ```
/// use lobcore::{Book, NewOrder, OrderFlags, Side, TradeTape};
///
/// let tape = TradeTape::new();
/// let mut book = Book::sparse();
/// book.bind_logger(Box::new(tape.clone()));
///
/// book.submit_limit(&NewOrder {
///     seq: 1, ts: 1, id: 1, user: 7, side: Side::Ask,
///     price: 101, qty: 5, flags: OrderFlags::empty(),
/// });
/// book.submit_limit(&NewOrder {
///     seq: 2, ts: 2, id: 2, user: 8, side: Side::Bid,
///     price: 101, qty: 3, flags: OrderFlags::empty(),
/// });
///
/// assert_eq!(tape.len(), 1);
/// assert_eq!(tape.to_vec()[0].price, 101);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TradeTape {
    trades: Rc<RefCell<Vec<Trade>>>,
}

impl TradeTape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trades recorded so far.
    pub fn len(&self) -> usize {
        self.trades.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.borrow().is_empty()
    }

    /// Snapshot of the recorded trades.
    pub fn to_vec(&self) -> Vec<Trade> {
        self.trades.borrow().clone()
    }

    /// Drop all recorded trades.
    pub fn clear(&self) {
        self.trades.borrow_mut().clear();
    }
}

impl BookLogger for TradeTape {
    fn on_trade(&mut self, trade: &Trade) {
        self.trades.borrow_mut().push(*trade);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
