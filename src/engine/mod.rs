//! The matching engine.
//!
//! ## Guarantees
//!
//! 1. **Determinism**: an ordered event stream always produces the same
//!    trade sequence and final book
//! 2. **Price-time priority**: better price first; strict FIFO within a
//!    price level
//! 3. **Synchronous execution**: every operation runs to completion; there
//!    are no suspension points anywhere in the matcher
//!
//! ## Example
//!
//! ```
//! use lobcore::{Book, NewOrder, OrderFlags, Side};
//!
//! let mut book = Book::sparse();
//!
//! // Rest a sell, then hit it with a buy.
//! book.submit_limit(&NewOrder {
//!     seq: 1, ts: 1, id: 1, user: 100, side: Side::Ask,
//!     price: 105, qty: 5, flags: OrderFlags::empty(),
//! });
//! let result = book.submit_limit(&NewOrder {
//!     seq: 2, ts: 2, id: 2, user: 101, side: Side::Bid,
//!     price: 105, qty: 5, flags: OrderFlags::empty(),
//! });
//!
//! assert_eq!(result.filled, 5);
//! assert!(book.is_empty());
//! ```

pub mod book;

pub use book::{Book, RestingOrder};
