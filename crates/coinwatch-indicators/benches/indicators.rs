//! Benchmarks for indicator implementations.

use chrono::{Duration, NaiveDate};
use coinwatch_core::traits::{Indicator, ScalarIndicator};
use coinwatch_core::types::PriceMatrix;
use coinwatch_indicators::{correlation_matrix, IndicatorEngine, RollingMean, Rsi, Volatility};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_test_data(size: usize, phase: f64) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1 + phase).sin() * 10.0)
        .collect()
}

fn generate_matrix(size: usize, assets: usize) -> PriceMatrix {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamps = (0..size)
        .map(|i| start + Duration::minutes(i as i64))
        .collect();
    let names = (0..assets).map(|i| format!("asset{}", i)).collect();
    let columns = (0..assets)
        .map(|i| generate_test_data(size, i as f64))
        .collect();
    PriceMatrix::new(names, timestamps, columns).unwrap()
}

fn benchmark_rolling_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("RollingMean");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size, 0.0);

        group.bench_with_input(BenchmarkId::new("window7", size), &data, |b, data| {
            let mean = RollingMean::new(7);
            b.iter(|| mean.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size, 0.0);

        group.bench_with_input(BenchmarkId::new("period14", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_volatility(c: &mut Criterion) {
    let mut group = c.benchmark_group("Volatility");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size, 0.0);

        group.bench_with_input(BenchmarkId::new("returns", size), &data, |b, data| {
            let vol = Volatility::new();
            b.iter(|| vol.compute(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("Snapshot");
    let engine = IndicatorEngine::default();

    for size in [1440, 10080].iter() {
        let matrix = generate_matrix(*size, 6);
        let now = matrix.last_timestamp().unwrap();

        group.bench_with_input(BenchmarkId::new("correlation", size), &matrix, |b, m| {
            b.iter(|| correlation_matrix(black_box(m)))
        });

        group.bench_with_input(BenchmarkId::new("full", size), &matrix, |b, m| {
            b.iter(|| engine.snapshot(black_box(m.clone()), now))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_rolling_mean,
    benchmark_rsi,
    benchmark_volatility,
    benchmark_snapshot
);
criterion_main!(benches);
