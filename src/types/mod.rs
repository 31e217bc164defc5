//! Core data types for the matching core.
//!
//! All prices are integral [`Tick`] counts and all sizes are signed
//! [`Quantity`] values; there is no floating point anywhere in the book.
//!
//! ## Types
//!
//! - [`NewOrder`] / [`ModifyOrder`] / [`CancelOrder`]: ingress records
//! - [`Event`]: the ordered stream fed to the book
//! - [`Side`], [`OrderFlags`]: order attributes
//! - [`ExecResult`]: filled/remaining outcome of a submit or modify
//! - [`Trade`]: an executed fill, priced at the resting order

pub mod tick;

mod order;
mod trade;

pub use order::{CancelOrder, Event, ExecResult, ModifyOrder, NewOrder, OrderFlags, Side};
pub use tick::{
    OrderId, Quantity, SeqNo, Tick, Timestamp, UserId, EMPTY_ASK, EMPTY_BID,
};
pub use trade::Trade;
