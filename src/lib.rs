//! # lobcore
//!
//! Single-venue, single-symbol limit order book matching core.
//!
//! ## Architecture
//!
//! - **Types**: integral tick/quantity scalars, order event records, trades
//! - **OrderBook**: slab-backed nodes, intrusive per-price FIFOs, and
//!   per-side price ladders (dense array or ordered map)
//! - **Engine**: [`Book`], the matcher: submit, cancel, modify, and the
//!   cross-the-spread loop under strict price-time priority
//!
//! ## Design principles
//!
//! 1. **Determinism**: the same ordered event stream always yields the
//!    same trades and the same final book; no floating point anywhere
//! 2. **O(1) order handling**: slab keys are stable handles, so cancel and
//!    modify never search
//! 3. **Single-threaded**: operations are synchronous and atomic
//!    with respect to one another; multi-threaded deployments funnel
//!    events through one executor
//!
//! ## Quick start
//!
//! ```
//! use lobcore::{Book, NewOrder, OrderFlags, Side};
//!
//! let mut book = Book::sparse();
//!
//! book.submit_limit(&NewOrder {
//!     seq: 1, ts: 1, id: 1, user: 100, side: Side::Ask,
//!     price: 105, qty: 5, flags: OrderFlags::empty(),
//! });
//!
//! let result = book.submit_limit(&NewOrder {
//!     seq: 2, ts: 2, id: 2, user: 101, side: Side::Bid,
//!     price: 105, qty: 8, flags: OrderFlags::empty(),
//! });
//!
//! assert_eq!(result.filled, 5);
//! assert_eq!(result.remaining, 3);
//! assert_eq!(book.best_bid(), Some(105));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Scalar types, event records, and trade records.
pub mod types;

/// Book structure: nodes, levels, ladders.
pub mod orderbook;

/// The matcher.
pub mod engine;

/// Mutation observer hook.
pub mod logger;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::{Book, RestingOrder};
pub use logger::{BookLogger, TradeTape};
pub use orderbook::{ContigLadder, Ladder, LadderError, Level, OrderNode, PriceBand, SparseLadder};
pub use types::{
    CancelOrder, Event, ExecResult, ModifyOrder, NewOrder, OrderFlags, OrderId, Quantity, SeqNo,
    Side, Tick, Timestamp, Trade, UserId,
};
