//! Performance benchmarks for the Fair Share Calculator.
//!
//! Covers share computation at the row counts the calculator accepts, the
//! legacy link codec, and the `/calculate` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use fair_share::api::{AppState, create_router};
use fair_share::calculation::compute;
use fair_share::codec::{decode_legacy, encode_legacy};
use fair_share::config::AppConfig;
use fair_share::models::{ExpenseEntry, ShareInput};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates an input with a specified number of expense rows.
fn create_input(expense_count: usize) -> ShareInput {
    let expenses = (0..expense_count)
        .map(|i| {
            ExpenseEntry::new(
                format!("{},{:03}.{:02}", i + 1, i * 7 % 1000, i % 100),
                format!("Expense {}", i + 1),
            )
        })
        .collect();
    ShareInput::new("87,500", "52,250.50", expenses)
}

/// Benchmark: computing shares for growing expense lists.
fn bench_compute_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");

    for expense_count in [1, 10, 25, 50].iter() {
        let input = create_input(*expense_count);
        group.throughput(Throughput::Elements(*expense_count as u64));
        group.bench_with_input(
            BenchmarkId::new("expenses", expense_count),
            &input,
            |b, input| b.iter(|| black_box(compute(black_box(input)))),
        );
    }

    group.finish();
}

/// Benchmark: encoding and decoding a full legacy link.
fn bench_legacy_codec(c: &mut Criterion) {
    let input = create_input(50);
    let query = encode_legacy(&input);

    c.bench_function("legacy_encode_50", |b| {
        b.iter(|| black_box(encode_legacy(black_box(&input))))
    });
    c.bench_function("legacy_decode_50", |b| {
        b.iter(|| black_box(decode_legacy(black_box(&query))))
    });
}

/// Benchmark: a single `/calculate` request through the router.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut config = AppConfig::default();
    config.rate_limit.min_interval_ms = 0;
    let router = create_router(AppState::new(config));
    let body = serde_json::to_string(&create_input(10)).unwrap();

    c.bench_function("calculate_endpoint_10", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_compute_scaling,
    bench_legacy_codec,
    bench_calculate_endpoint,
);
criterion_main!(benches);
