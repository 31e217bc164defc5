//! The book core: matching, resting, cancel, and replace.
//!
//! ## Matching rules
//!
//! - Incoming bids consume asks from the lowest price upward; incoming
//!   asks consume bids from the highest price downward
//! - Within a price level, strict FIFO: the head is never skipped
//! - Fills execute at the resting order's price
//! - A limit order's residual rests at its price; a market order's
//!   residual is returned unfilled and never rests
//!
//! ## Determinism
//!
//! All state is integral and every operation runs to completion before the
//! next begins, so a given event stream always produces the same trade
//! sequence and the same final book. [`Book::compute_state_digest`] folds
//! the entire resting state into a sha-256 digest for cheap equality
//! checks across runs.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, trace};

use crate::logger::BookLogger;
use crate::orderbook::{Ladder, LadderError, OrderNode, PriceBand};
use crate::types::{
    Event, ExecResult, ModifyOrder, NewOrder, OrderFlags, OrderId, Quantity, Side, Tick,
    Timestamp, Trade, UserId, EMPTY_ASK, EMPTY_BID,
};

/// Where a resting order lives: its side, price, and slab key.
#[derive(Debug, Clone, Copy)]
struct IdEntry {
    side: Side,
    px: Tick,
    key: usize,
}

/// Read-only view of a resting order, returned by [`Book::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestingOrder {
    pub id: OrderId,
    pub user: UserId,
    pub side: Side,
    pub price: Tick,
    pub qty: Quantity,
    pub ts: Timestamp,
    pub flags: OrderFlags,
}

/// A single-symbol limit order book with strict price-time priority.
///
/// Owns the node arena, both price ladders, and the order-id index. All
/// operations are synchronous and single-threaded; feed events through one
/// executor.
///
/// # Example
///
/// ```
/// use lobcore::{Book, NewOrder, OrderFlags, Side};
///
/// let mut book = Book::sparse();
///
/// book.submit_limit(&NewOrder {
///     seq: 1, ts: 1, id: 1, user: 7, side: Side::Ask,
///     price: 101, qty: 5, flags: OrderFlags::empty(),
/// });
/// assert_eq!(book.best_ask(), Some(101));
///
/// // A bid at 101 crosses and trades at the resting price.
/// let r = book.submit_limit(&NewOrder {
///     seq: 2, ts: 2, id: 2, user: 8, side: Side::Bid,
///     price: 101, qty: 3, flags: OrderFlags::empty(),
/// });
/// assert_eq!((r.filled, r.remaining), (3, 0));
/// assert_eq!(book.level_qty(Side::Ask, 101), 2);
/// ```
pub struct Book {
    /// Node arena; slab keys are the handles held by the id index.
    orders: Slab<OrderNode>,

    /// Bid-side ladder.
    bids: Ladder,

    /// Ask-side ladder.
    asks: Ladder,

    /// Order id -> location, for O(1) cancel/modify.
    id_index: HashMap<OrderId, IdEntry>,

    /// Optional mutation observer.
    logger: Option<Box<dyn BookLogger>>,

    /// Next trade sequence number. Advances on every fill whether or not
    /// a logger is bound, so trade ids are stream-deterministic.
    next_trade_id: u64,

    /// Resting bid orders.
    bid_count: usize,

    /// Resting ask orders.
    ask_count: usize,
}

impl Default for Book {
    fn default() -> Self {
        Self::sparse()
    }
}

impl Book {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a book over the given ladders.
    pub fn new(bids: Ladder, asks: Ladder) -> Self {
        Self {
            orders: Slab::new(),
            bids,
            asks,
            id_index: HashMap::new(),
            logger: None,
            next_trade_id: 1,
            bid_count: 0,
            ask_count: 0,
        }
    }

    /// Book with sparse ladders on both sides.
    pub fn sparse() -> Self {
        Self::new(Ladder::sparse(), Ladder::sparse())
    }

    /// Book with contiguous ladders over a bounded tick band.
    pub fn contig(band: PriceBand) -> Result<Self, LadderError> {
        Ok(Self::new(Ladder::contig(band)?, Ladder::contig(band)?))
    }

    /// Pre-allocate arena and index capacity for `order_capacity` resting
    /// orders.
    pub fn with_capacity(bids: Ladder, asks: Ladder, order_capacity: usize) -> Self {
        let mut book = Self::new(bids, asks);
        book.orders = Slab::with_capacity(order_capacity);
        book.id_index = HashMap::with_capacity(order_capacity);
        book
    }

    /// Attach a mutation observer. The logger is handed both ladders for a
    /// read-only starting snapshot before any further event is applied.
    pub fn bind_logger(&mut self, mut logger: Box<dyn BookLogger>) {
        logger.on_bind(&self.bids, &self.asks);
        self.logger = Some(logger);
    }

    // ========================================================================
    // Event stream entry point
    // ========================================================================

    /// Apply one element of the ordered event stream.
    ///
    /// Cancels report through the result as a no-op `{0, 0}`; use
    /// [`Book::cancel`] directly when the boolean outcome matters.
    pub fn apply(&mut self, event: &Event) -> ExecResult {
        match event {
            Event::Limit(o) => self.submit_limit(o),
            Event::Market(o) => self.submit_market(o),
            Event::Modify(m) => self.modify(m),
            Event::Cancel(c) => {
                self.cancel(c.id);
                ExecResult::default()
            }
        }
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Match a limit order against the opposite side, then rest any
    /// residual at its price.
    ///
    /// Non-positive quantity is a no-op returning `{0, 0}`.
    pub fn submit_limit(&mut self, o: &NewOrder) -> ExecResult {
        if o.qty <= 0 {
            return ExecResult::default();
        }

        let filled = self.match_against(o.side, o.user, o.id, o.flags, o.qty, o.price, o.ts);
        let leftover = o.qty - filled;
        if leftover <= 0 {
            return ExecResult {
                filled,
                remaining: 0,
            };
        }

        let Self {
            orders,
            bids,
            asks,
            id_index,
            logger,
            bid_count,
            ask_count,
            ..
        } = self;
        let (same, count) = match o.side {
            Side::Bid => (bids, bid_count),
            Side::Ask => (asks, ask_count),
        };

        let key = orders.insert(OrderNode::new(o.id, o.user, leftover, o.ts, o.flags));
        same.level_mut(o.price).push_back(key, orders);

        // A rest at a strictly better price moves the top of book; the
        // sentinel loses either comparison, so the empty case needs no
        // special handling.
        match o.side {
            Side::Bid => {
                if o.price > same.best_bid() {
                    same.set_best_bid(o.price);
                }
            }
            Side::Ask => {
                if o.price < same.best_ask() {
                    same.set_best_ask(o.price);
                }
            }
        }

        let prev = id_index.insert(
            o.id,
            IdEntry {
                side: o.side,
                px: o.price,
                key,
            },
        );
        debug_assert!(prev.is_none(), "order id {} is already resting", o.id);
        *count += 1;

        trace!(id = o.id, px = o.price, qty = leftover, "order rested");
        if let Some(lg) = logger.as_deref_mut() {
            lg.on_accept(o.id, o.side, o.price, leftover, o.ts);
        }

        ExecResult {
            filled,
            remaining: leftover,
        }
    }

    /// Match a market order until the opposite side is exhausted.
    ///
    /// The residual is returned unfilled; a market order never rests.
    pub fn submit_market(&mut self, o: &NewOrder) -> ExecResult {
        if o.qty <= 0 {
            return ExecResult::default();
        }

        // The worst-possible bound: only level exhaustion stops matching.
        let bound = match o.side {
            Side::Bid => EMPTY_ASK,
            Side::Ask => EMPTY_BID,
        };
        let filled = self.match_against(o.side, o.user, o.id, o.flags, o.qty, bound, o.ts);

        ExecResult {
            filled,
            remaining: o.qty - filled,
        }
    }

    // ========================================================================
    // Cancel / modify
    // ========================================================================

    /// Remove a resting order. Returns false for an unknown (or already
    /// terminated) id.
    pub fn cancel(&mut self, id: OrderId) -> bool {
        let Self {
            orders,
            bids,
            asks,
            id_index,
            logger,
            bid_count,
            ask_count,
            ..
        } = self;

        let Some(e) = id_index.remove(&id) else {
            return false;
        };
        let (book, count) = match e.side {
            Side::Bid => (bids, bid_count),
            Side::Ask => (asks, ask_count),
        };

        let was_best = match e.side {
            Side::Bid => book.best_bid() == e.px,
            Side::Ask => book.best_ask() == e.px,
        };

        book.level_mut(e.px).remove(e.key, orders);
        let node = orders.remove(e.key);
        *count -= 1;

        // Only a cancel that empties the best level moves the top of book,
        // and it must walk to the next non-empty level, not jump straight
        // to the sentinel.
        if was_best && !book.has_level(e.px) {
            match e.side {
                Side::Bid => {
                    let nxt = book.next_bid_before(e.px);
                    book.set_best_bid(nxt);
                }
                Side::Ask => {
                    let nxt = book.next_ask_after(e.px);
                    book.set_best_ask(nxt);
                }
            }
        }

        trace!(id, px = e.px, qty = node.qty, "order canceled");
        if let Some(lg) = logger.as_deref_mut() {
            lg.on_cancel(id, e.side, e.px, node.qty);
        }
        true
    }

    /// Replace a resting order.
    ///
    /// - **Same price**: the size is adjusted in place and time priority is
    ///   preserved; no matching occurs even if the size grows. A
    ///   non-positive new size is a cancel.
    /// - **New price**: the order is canceled and resubmitted as a fresh
    ///   limit at the new price with the same id, user, and side. It loses
    ///   time priority and may cross and trade immediately.
    ///
    /// Unknown ids are a no-op returning `{0, 0}`.
    pub fn modify(&mut self, r: &ModifyOrder) -> ExecResult {
        let Some(&IdEntry { side, px, key }) = self.id_index.get(&r.id) else {
            return ExecResult::default();
        };

        if r.new_price == px {
            if r.new_qty <= 0 {
                self.cancel(r.id);
                return ExecResult::default();
            }

            let Self {
                orders, bids, asks, ..
            } = self;
            let book = match side {
                Side::Bid => bids,
                Side::Ask => asks,
            };

            let node = &mut orders[key];
            let delta = r.new_qty - node.qty;
            node.qty = r.new_qty;
            node.ts = r.ts;
            node.flags = r.flags;
            book.level_mut(px).adjust_quantity(delta);

            trace!(id = r.id, px, qty = r.new_qty, "order resized in place");
            return ExecResult::default();
        }

        // Price change: remove, then re-enter as a fresh limit.
        let user = self.orders[key].user;
        self.cancel(r.id);
        self.submit_limit(&NewOrder {
            seq: r.seq,
            ts: r.ts,
            id: r.id,
            user,
            side,
            price: r.new_price,
            qty: r.new_qty,
            flags: r.flags,
        })
    }

    // ========================================================================
    // The matching loop
    // ========================================================================

    /// Consume from the opposite side while the taker's price bound allows.
    ///
    /// Returns the filled quantity. Fills execute at resting prices, best
    /// level first, FIFO within a level. With `STP` set, a would-match
    /// against the taker's own resting order cancels that order instead of
    /// trading and matching continues at the new head.
    fn match_against(
        &mut self,
        taker_side: Side,
        taker_user: UserId,
        taker_id: OrderId,
        taker_flags: OrderFlags,
        mut want: Quantity,
        px_limit: Tick,
        ts: Timestamp,
    ) -> Quantity {
        let Self {
            orders,
            bids,
            asks,
            id_index,
            logger,
            next_trade_id,
            bid_count,
            ask_count,
        } = self;
        let (opp, resting_count) = match taker_side {
            Side::Bid => (asks, ask_count),
            Side::Ask => (bids, bid_count),
        };
        let resting_side = taker_side.opposite();

        let mut filled: Quantity = 0;

        while want > 0 {
            let best_px = match taker_side {
                Side::Bid => opp.best_ask(),
                Side::Ask => opp.best_bid(),
            };
            let exhausted = match taker_side {
                Side::Bid => best_px == EMPTY_ASK,
                Side::Ask => best_px == EMPTY_BID,
            };
            if exhausted {
                break;
            }

            let crosses = match taker_side {
                Side::Bid => best_px <= px_limit,
                Side::Ask => best_px >= px_limit,
            };
            if !crosses {
                break;
            }

            let head_key = match opp.level_mut(best_px).head {
                Some(key) => key,
                None => {
                    // Stale best: heal by walking to the next non-empty level.
                    advance_best(opp, taker_side, best_px);
                    continue;
                }
            };

            let head = &orders[head_key];
            if taker_flags.contains(OrderFlags::STP) && head.user == taker_user {
                // Same owner on both sides: cancel the resting order, no
                // trade, and keep wanting the full quantity.
                opp.level_mut(best_px).remove(head_key, orders);
                let node = orders.remove(head_key);
                id_index.remove(&node.id);
                *resting_count -= 1;

                debug!(id = node.id, user = taker_user, "self-trade prevented");
                if let Some(lg) = logger.as_deref_mut() {
                    lg.on_cancel(node.id, resting_side, best_px, node.qty);
                }

                if !opp.has_level(best_px) {
                    advance_best(opp, taker_side, best_px);
                }
                continue;
            }

            // Trade with the head; never skip it for a smaller fill deeper
            // in the queue.
            let head = &mut orders[head_key];
            let tr = want.min(head.qty);
            head.qty -= tr;
            let maker_id = head.id;
            let maker_user = head.user;
            let maker_done = head.qty == 0;

            opp.level_mut(best_px).reduce_quantity(tr);
            filled += tr;
            want -= tr;

            trace!(
                maker = maker_id,
                taker = taker_id,
                px = best_px,
                qty = tr,
                "trade"
            );
            if let Some(lg) = logger.as_deref_mut() {
                let trade = Trade::new(
                    *next_trade_id,
                    maker_id,
                    taker_id,
                    maker_user,
                    taker_user,
                    best_px,
                    tr,
                    ts,
                );
                lg.on_trade(&trade);
            }
            *next_trade_id += 1;

            if maker_done {
                opp.level_mut(best_px).remove(head_key, orders);
                orders.remove(head_key);
                id_index.remove(&maker_id);
                *resting_count -= 1;

                if !opp.has_level(best_px) {
                    advance_best(opp, taker_side, best_px);
                }
            }
        }

        filled
    }

    // ========================================================================
    // Top of book and lookup
    // ========================================================================

    /// Best (highest) bid price, if any bid is resting.
    #[inline]
    pub fn best_bid(&self) -> Option<Tick> {
        let px = self.bids.best_bid();
        (px != EMPTY_BID).then_some(px)
    }

    /// Best (lowest) ask price, if any ask is resting.
    #[inline]
    pub fn best_ask(&self) -> Option<Tick> {
        let px = self.asks.best_ask();
        (px != EMPTY_ASK).then_some(px)
    }

    /// `best_ask - best_bid`; `None` if either side is empty.
    pub fn spread(&self) -> Option<Tick> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Look up a resting order by id.
    pub fn get(&self, id: OrderId) -> Option<RestingOrder> {
        let e = self.id_index.get(&id)?;
        let node = self.orders.get(e.key)?;
        Some(RestingOrder {
            id: node.id,
            user: node.user,
            side: e.side,
            price: e.px,
            qty: node.qty,
            ts: node.ts,
            flags: node.flags,
        })
    }

    /// True if an order with this id is currently resting.
    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Aggregate resting quantity at a price; zero for an absent level.
    pub fn level_qty(&self, side: Side, px: Tick) -> Quantity {
        self.side_ladder(side)
            .level(px)
            .map_or(0, |level| level.total_qty)
    }

    /// The `(id, qty)` queue at a price, oldest first.
    pub fn fifo(&self, side: Side, px: Tick) -> Vec<(OrderId, Quantity)> {
        let mut out = Vec::new();
        let Some(level) = self.side_ladder(side).level(px) else {
            return out;
        };
        let mut cur = level.head;
        while let Some(key) = cur {
            let node = &self.orders[key];
            out.push((node.id, node.qty));
            cur = node.next;
        }
        out
    }

    /// Up to `max_levels` of `(price, total_qty)` from the top of one side.
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<(Tick, Quantity)> {
        let ladder = self.side_ladder(side);
        let mut out = Vec::new();
        let mut px = match side {
            Side::Bid => ladder.best_bid(),
            Side::Ask => ladder.best_ask(),
        };
        let sentinel = match side {
            Side::Bid => EMPTY_BID,
            Side::Ask => EMPTY_ASK,
        };
        while px != sentinel && out.len() < max_levels {
            if let Some(level) = ladder.level(px) {
                if !level.is_empty() {
                    out.push((px, level.total_qty));
                }
            }
            px = match side {
                Side::Bid => ladder.next_bid_before(px),
                Side::Ask => ladder.next_ask_after(px),
            };
        }
        out
    }

    /// Read-only access to both ladders (bids, asks), for snapshotting.
    pub fn ladders(&self) -> (&Ladder, &Ladder) {
        (&self.bids, &self.asks)
    }

    // ========================================================================
    // Counts and capacity
    // ========================================================================

    /// Total resting orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Resting bid orders.
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    /// Resting ask orders.
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    /// True when nothing rests on either side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Pre-allocated arena slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Drop every resting order. The trade sequence keeps counting.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.id_index.clear();
        self.bid_count = 0;
        self.ask_count = 0;
    }

    // ========================================================================
    // State digest
    // ========================================================================

    /// Sha-256 digest of the full resting state.
    ///
    /// Walks both sides best-first and each level FIFO-first, folding in
    /// every node's fields little-endian. Two books that processed the
    /// same event stream produce the same digest.
    pub fn compute_state_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        self.digest_side(&mut hasher, Side::Bid);
        self.digest_side(&mut hasher, Side::Ask);
        hasher.finalize().into()
    }

    fn digest_side(&self, hasher: &mut Sha256, side: Side) {
        let ladder = self.side_ladder(side);
        let (mut px, sentinel) = match side {
            Side::Bid => (ladder.best_bid(), EMPTY_BID),
            Side::Ask => (ladder.best_ask(), EMPTY_ASK),
        };
        hasher.update([match side {
            Side::Bid => 0u8,
            Side::Ask => 1u8,
        }]);
        while px != sentinel {
            if let Some(level) = ladder.level(px) {
                hasher.update(px.to_le_bytes());
                hasher.update(level.total_qty.to_le_bytes());
                let mut cur = level.head;
                while let Some(key) = cur {
                    let node = &self.orders[key];
                    hasher.update(node.id.to_le_bytes());
                    hasher.update(node.user.to_le_bytes());
                    hasher.update(node.qty.to_le_bytes());
                    hasher.update(node.ts.to_le_bytes());
                    hasher.update(node.flags.bits().to_le_bytes());
                    cur = node.next;
                }
            }
            px = match side {
                Side::Bid => ladder.next_bid_before(px),
                Side::Ask => ladder.next_ask_after(px),
            };
        }
    }

    #[inline]
    fn side_ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }
}

/// After depleting (or discovering stale) `from_px` on the taker's
/// opposite side, move that side's cached best to the next non-empty
/// level, or to the sentinel when none remains.
fn advance_best(opp: &mut Ladder, taker_side: Side, from_px: Tick) {
    match taker_side {
        Side::Bid => {
            let nxt = opp.next_ask_after(from_px);
            opp.set_best_ask(nxt);
        }
        Side::Ask => {
            let nxt = opp.next_bid_before(from_px);
            opp.set_best_bid(nxt);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
