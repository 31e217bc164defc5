//! Benchmarks for the matching core.
//!
//! ## Running
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run a specific group
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use std::time::Duration;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use lobcore::{Book, Event, NewOrder, OrderFlags, Quantity, Side, Tick};

// ============================================================================
// HELPER FUNCTIONS - Deterministic book construction
// ============================================================================

fn order(id: u64, side: Side, price: Tick, qty: Quantity) -> NewOrder {
    NewOrder {
        seq: id,
        ts: id,
        id,
        user: id % 64,
        side,
        price,
        qty,
        flags: OrderFlags::empty(),
    }
}

/// Rest `count` asks one tick apart starting at `base_price`.
fn populate_asks(book: &mut Book, count: usize, base_price: Tick, qty: Quantity) {
    for i in 0..count {
        book.submit_limit(&order(1_000_000 + i as u64, Side::Ask, base_price + i as Tick, qty));
    }
}

/// Rest `count` bids one tick apart going down from `base_price`.
fn populate_bids(book: &mut Book, count: usize, base_price: Tick, qty: Quantity) {
    for i in 0..count {
        book.submit_limit(&order(2_000_000 + i as u64, Side::Bid, base_price - i as Tick, qty));
    }
}

/// Deterministic mixed event batch for throughput runs.
fn generate_event_batch(count: usize, seed: u64) -> Vec<Event> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut events = Vec::with_capacity(count);
    let base: Tick = 10_000;

    for i in 0..count {
        let id = (i + 1) as u64;
        let side = if rng.gen_bool(0.5) {
            Side::Bid
        } else {
            Side::Ask
        };
        let o = NewOrder {
            seq: id,
            ts: id,
            id,
            user: rng.gen_range(1..=500),
            side,
            price: base + rng.gen_range(-100..=100),
            qty: rng.gen_range(1..=50),
            flags: OrderFlags::empty(),
        };
        if rng.gen_bool(0.1) {
            events.push(Event::Market(o));
        } else {
            events.push(Event::Limit(o));
        }
    }

    events
}

// ============================================================================
// BENCHMARK: Single match latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(1000);

    // Match one buy against the best ask of a 1k-deep book.
    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || {
                let mut book = Book::sparse();
                populate_asks(&mut book, 1_000, 10_000, 10);
                (book, order(1, Side::Bid, 10_000, 10))
            },
            |(mut book, buy)| black_box(book.submit_limit(&buy)),
            BatchSize::SmallInput,
        );
    });

    // Sweep ~10 price levels with one large order.
    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut book = Book::sparse();
                populate_asks(&mut book, 100, 10_000, 10);
                (book, order(1, Side::Bid, 10_010, 100))
            },
            |(mut book, buy)| black_box(book.submit_limit(&buy)),
            BatchSize::SmallInput,
        );
    });

    // No match: the order rests below the best ask.
    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || {
                let mut book = Book::sparse();
                populate_asks(&mut book, 1_000, 10_000, 10);
                (book, order(1, Side::Bid, 9_900, 10))
            },
            |(mut book, buy)| black_box(book.submit_limit(&buy)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");

    group.measurement_time(Duration::from_secs(5));

    group.bench_function("rest_on_empty", |b| {
        b.iter_batched(
            Book::sparse,
            |mut book| black_box(book.submit_limit(&order(1, Side::Bid, 10_000, 10))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rest_on_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = Book::sparse();
                populate_asks(&mut book, 500, 10_001, 10);
                populate_bids(&mut book, 500, 10_000, 10);
                book
            },
            |mut book| black_box(book.submit_limit(&order(1, Side::Bid, 9_700, 10))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_mid_book", |b| {
        b.iter_batched(
            || {
                let mut book = Book::sparse();
                populate_bids(&mut book, 1_000, 10_000, 10);
                book
            },
            // Order 2_000_500 rests 500 ticks below the best bid.
            |mut book| black_box(book.cancel(2_000_500)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("events", batch_size),
            &batch_size,
            |b, &size| {
                let events = generate_event_batch(size, 42);

                b.iter_batched(
                    || Book::with_capacity(lobcore::Ladder::sparse(), lobcore::Ladder::sparse(), size),
                    |mut book| {
                        for event in &events {
                            black_box(book.apply(event));
                        }
                        book.order_count()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_throughput
);
criterion_main!(benches);
