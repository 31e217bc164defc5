//! Demo binary: build a small book, trade through it, print the result.

use lobcore::{Book, NewOrder, OrderFlags, Side, TradeTape};

fn order(id: u64, user: u64, side: Side, price: i64, qty: i64) -> NewOrder {
    NewOrder {
        seq: id,
        ts: id,
        id,
        user,
        side,
        price,
        qty,
        flags: OrderFlags::empty(),
    }
}

fn main() {
    let tape = TradeTape::new();
    let mut book = Book::sparse();
    book.bind_logger(Box::new(tape.clone()));

    // Seed a few levels on each side.
    book.submit_limit(&order(1, 100, Side::Bid, 104, 10));
    book.submit_limit(&order(2, 100, Side::Bid, 103, 25));
    book.submit_limit(&order(3, 101, Side::Ask, 106, 8));
    book.submit_limit(&order(4, 101, Side::Ask, 107, 30));
    book.submit_limit(&order(5, 102, Side::Ask, 106, 12));

    println!("Top of book:");
    println!("  best bid: {:?}", book.best_bid());
    println!("  best ask: {:?}", book.best_ask());
    println!("  spread:   {:?}", book.spread());

    // A marketable bid sweeps the 106 level and part of 107.
    let r = book.submit_limit(&order(6, 103, Side::Bid, 107, 25));
    println!("\nAggressive bid 25 @ 107 -> filled {}, resting {}", r.filled, r.remaining);

    println!("\nTrades:");
    for t in tape.to_vec() {
        println!(
            "  #{} maker {} x taker {}: {} @ {}",
            t.id, t.maker_order_id, t.taker_order_id, t.quantity, t.price
        );
    }

    println!("\nAsk depth: {:?}", book.depth(Side::Ask, 5));
    println!("Bid depth: {:?}", book.depth(Side::Bid, 5));
    println!("\nState digest: {}", hex(&book.compute_state_digest()));
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
