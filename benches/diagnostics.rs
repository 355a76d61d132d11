//! Benchmarks for the diagnostic pipeline.

use anofox_ews::core::{CanonicalTimeSeries, MonitoringUnit};
use anofox_ews::diagnostics::{CSDSignalAnalyzer, DiagnosticEngine, EwsConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap;

fn generate_series(n: usize, seed: u64) -> CanonicalTimeSeries {
    // Cheap deterministic AR(1)-like wiggle with every 13th entry missing.
    let mut state = seed;
    let mut level = 50.0;
    let values = (0..n)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let shock = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
            level = 0.8 * level + 10.0 + 4.0 * shock;
            if i % 13 == 12 {
                None
            } else {
                Some(level)
            }
        })
        .collect();
    let times = (0..n).map(|i| 1900.0 + i as f64).collect();
    CanonicalTimeSeries::new(times, values).unwrap()
}

fn bench_single_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_series");
    let engine = DiagnosticEngine::default();

    for size in [20, 50, 200, 1000].iter() {
        let series = generate_series(*size, 7);

        group.bench_with_input(BenchmarkId::new("csd", size), size, |b, _| {
            let analyzer = CSDSignalAnalyzer::default();
            b.iter(|| analyzer.analyze(black_box(&series)))
        });

        group.bench_with_input(BenchmarkId::new("engine", size), size, |b, _| {
            b.iter(|| engine.assess(black_box(&series)))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let engine = DiagnosticEngine::new(EwsConfig::default().rolling_window(8)).unwrap();

    for units in [10, 100, 500].iter() {
        let panel: BTreeMap<String, MonitoringUnit> = (0..*units as u64)
            .map(|i| (format!("site-{i:04}"), MonitoringUnit::new(generate_series(40, i))))
            .collect();

        group.bench_with_input(BenchmarkId::new("run_batch", units), units, |b, _| {
            b.iter(|| engine.run_batch(black_box(&panel)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_series, bench_batch);
criterion_main!(benches);
