//! Criterion benchmarks for the simulator's hot paths.
//!
//! Benchmarks:
//! 1. Daily price tick over listings of increasing size
//! 2. Buy/sell round trip against the default listing
//! 3. Mark-to-market of a portfolio holding every listed name

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::NaiveDate;
use papertrade_core::domain::{Holding, Instrument, Portfolio, Ticker};
use papertrade_core::{Market, NormalNoise, PriceModel};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_market(n: usize) -> Market {
    let instruments = (0..n)
        .map(|i| Instrument::new(format!("T{i:04}"), format!("Name {i}"), 100.0 + i as f64))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    Market::new(instruments).unwrap()
}

// ── 1. Price tick ────────────────────────────────────────────────────

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_tick");
    let model = PriceModel::default();
    for n in [5usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut market = make_market(n);
            let mut noise = NormalNoise::seeded(42);
            b.iter(|| model.tick(black_box(&mut market), &mut noise));
        });
    }
    group.finish();
}

// ── 2. Buy/sell round trip ───────────────────────────────────────────

fn bench_round_trip(c: &mut Criterion) {
    let market = Market::default_listing();
    let ticker = Ticker::new("AAPL");
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    c.bench_function("buy_sell_round_trip", |b| {
        let mut pf = Portfolio::new(1_000_000.0);
        b.iter(|| {
            pf.buy(&market, black_box(&ticker), 10, date).unwrap();
            pf.sell(&market, black_box(&ticker), 10, date).unwrap();
        });
    });
}

// ── 3. Mark-to-market ────────────────────────────────────────────────

fn bench_market_value(c: &mut Criterion) {
    let market = make_market(1_000);
    let holdings = market
        .instruments()
        .iter()
        .map(|i| Holding::new(i.ticker.clone(), 10, i.price()));
    let pf = Portfolio::from_parts(0.0, holdings, Vec::new(), Vec::new());
    c.bench_function("market_value_1000", |b| {
        b.iter(|| black_box(pf.market_value(&market)));
    });
}

criterion_group!(benches, bench_tick, bench_round_trip, bench_market_value);
criterion_main!(benches);
