//! Narration and Report Benchmarks
//!
//! Benchmarks for the narration delay formula and accessibility report rendering.
//!
//! Run with: `cargo bench --bench narration_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storeprobe::prelude::*;

fn bench_compute_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_delay");
    let profile = NarrationProfile::default();

    let messages = vec![
        ("empty", String::new()),
        ("short", "Cart updated.".to_string()),
        (
            "sentence",
            "This is a longer sentence, with a comma and a period.".to_string(),
        ),
        (
            "paragraph",
            "Searching for air fryers, opening the first result, adding it to the cart. "
                .repeat(20),
        ),
    ];

    for (name, message) in &messages {
        group.bench_with_input(BenchmarkId::from_parameter(name), message, |bench, msg| {
            bench.iter(|| black_box(compute_delay(black_box(msg), &profile)));
        });
    }

    group.finish();
}

fn bench_severity_stats(c: &mut Criterion) {
    let pages = demo_pages();
    c.bench_function("severity_stats_demo", |bench| {
        bench.iter(|| black_box(SeverityStats::from_groups(black_box(&pages))));
    });
}

fn bench_render_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_report");
    let at = Utc.with_ymd_and_hms(2025, 7, 4, 15, 30, 0).unwrap();

    let clean = AccessibilityReporter::new();
    group.bench_function("clean", |bench| {
        bench.iter(|| black_box(clean.render_html_at(DEMO_LABEL, &at)));
    });

    let demo = demo_reporter();
    group.bench_function("demo", |bench| {
        bench.iter(|| black_box(demo.render_html_at(DEMO_LABEL, &at)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_delay,
    bench_severity_stats,
    bench_render_report
);
criterion_main!(benches);
