//! Benchmarks for the binomial lattice pricer.
//!
//! Run with: cargo bench -p strike-pricing

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use strike_core::{MarketParameters, OptionStyle, OptionType, VanillaOption};
use strike_pricing::lattice::{BinomialLattice, TreeLayout};
use strike_pricing::BlackScholes;

fn market() -> MarketParameters {
    MarketParameters::new(100.0, 0.05, 0.0)
        .and_then(|m| m.with_volatility(0.2))
        .unwrap()
}

fn bench_european(c: &mut Criterion) {
    let mut group = c.benchmark_group("european_closed_sum");
    let option = VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 1.0).unwrap();
    let m = market();

    for steps in [100, 500, 2000] {
        let lattice = BinomialLattice::new(steps).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(steps), &lattice, |b, l| {
            b.iter(|| l.price(black_box(&option), black_box(&m)).unwrap());
        });
    }
    group.finish();

    c.bench_function("black_scholes_valuation", |b| {
        b.iter(|| BlackScholes.valuation(black_box(&option), black_box(&m)).unwrap());
    });
}

fn bench_american(c: &mut Criterion) {
    let mut group = c.benchmark_group("american_put");
    let option = VanillaOption::new(OptionType::Put, OptionStyle::American, 100.0, 1.0).unwrap();
    let m = market();

    for steps in [10, 14, 18] {
        let lattice = BinomialLattice::new(steps).unwrap();
        group.bench_with_input(
            BenchmarkId::new("non_recombining", steps),
            &lattice,
            |b, l| b.iter(|| l.price(black_box(&option), black_box(&m)).unwrap()),
        );

        let lattice = lattice.with_layout(TreeLayout::Recombining);
        group.bench_with_input(BenchmarkId::new("recombining", steps), &lattice, |b, l| {
            b.iter(|| l.price(black_box(&option), black_box(&m)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_european, bench_american);
criterion_main!(benches);
