//! Bin-summarise-smooth benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Condensing throughput (10K to 1M points) for every summary
//! - Smoothing estimators on condensed tables
//! - Factored versus joint smoothing in two dimensions
//! - Bandwidth selection by cross-validation
//! - Dirty data (outliers and missing values)
//!
//! For parallel smoothing, use `cargo bench --features parallel`.

use bigvis::prelude::*;
use bigvis_benchmarks::{
    generate_bivariate_data, generate_dirty_data, generate_normal_data, generate_weights,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn condensed_mean(x: &[f64], z: &[f64], binwidth: f64) -> CondensedTable<f64> {
    Condense::new()
        .binwidth(binwidth)
        .summary(Mean)
        .build()
        .unwrap()
        .condense(x, Some(z), None)
        .unwrap()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_condense_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("condense_scalability");
    group.sample_size(20);

    for size in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));

        let (x, z) = generate_normal_data(size, 42);
        let condenser = Condense::new().binwidth(0.01).summary(Mean).build().unwrap();

        group.bench_with_input(BenchmarkId::new("mean", size), &size, |b, _| {
            b.iter(|| {
                condenser
                    .condense(black_box(&x), Some(black_box(&z)), None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_condense_summaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("condense_summaries");
    group.sample_size(30);

    let size = 100_000;
    group.throughput(Throughput::Elements(size as u64));
    let (x, z) = generate_normal_data(size, 42);
    let w = generate_weights(size, 7);

    for (name, summary) in [
        ("count", Count),
        ("sum", Sum),
        ("mean", Mean),
        ("sd", Sd),
        ("median", Median),
    ] {
        let condenser = Condense::new().binwidth(0.05).summary(summary).build().unwrap();
        let weights = if summary == Median { None } else { Some(&w[..]) };

        group.bench_function(name, |b| {
            b.iter(|| {
                condenser
                    .condense(black_box(&x), Some(black_box(&z)), weights)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_condense_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("condense_2d");
    group.sample_size(20);

    for size in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));

        let (x, y, z) = generate_bivariate_data(size, 42);
        let condenser = Condense::new()
            .axes(vec![AxisSpec::width(0.1), AxisSpec::width(0.1)])
            .summary(Mean)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("mean", size), &size, |b, _| {
            b.iter(|| {
                condenser
                    .condense_nd(&[black_box(&x[..]), black_box(&y[..])], Some(&z), None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_smooth_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth_methods");
    group.sample_size(30);

    let (x, z) = generate_normal_data(100_000, 42);
    let table = condensed_mean(&x, &z, 0.01);

    for (name, method) in [
        ("kernel_mean", KernelMean),
        ("regression", Regression),
        ("robust_regression", RobustRegression),
    ] {
        let smoother = Smooth::new()
            .bandwidth(vec![0.1])
            .method(method)
            .build()
            .unwrap();

        group.bench_function(name, |b| {
            b.iter(|| {
                smoother
                    .smooth_table(black_box(&table), Variable::Mean, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_smooth_bandwidth(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth_bandwidth");
    group.sample_size(30);

    let (x, z) = generate_normal_data(100_000, 42);
    let table = condensed_mean(&x, &z, 0.01);

    for h in [0.02, 0.05, 0.1, 0.25, 0.5] {
        let smoother = Smooth::new()
            .bandwidth(vec![h])
            .method(Regression)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("regression", h), &h, |b, _| {
            b.iter(|| {
                smoother
                    .smooth_table(black_box(&table), Variable::Mean, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_smooth_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth_2d");
    group.sample_size(10);

    let (x, y, z) = generate_bivariate_data(100_000, 42);
    let table = Condense::new()
        .axes(vec![AxisSpec::width(0.1), AxisSpec::width(0.1)])
        .summary(Mean)
        .build()
        .unwrap()
        .condense_nd(&[&x[..], &y[..]], Some(&z), None)
        .unwrap();

    for (name, factored) in [("factored", true), ("joint", false)] {
        let smoother = Smooth::new()
            .bandwidth(vec![0.3, 0.3])
            .method(KernelMean)
            .factored(factored)
            .build()
            .unwrap();

        group.bench_function(name, |b| {
            b.iter(|| {
                smoother
                    .smooth_table(black_box(&table), Variable::Mean, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_cross_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_validation");
    group.sample_size(10);

    let (x, z) = generate_normal_data(100_000, 42);
    let grid = condensed_mean(&x, &z, 0.05).to_grid(Variable::Mean).unwrap();
    let smoother = Smooth::new()
        .bandwidth(vec![0.1])
        .method(Regression)
        .build()
        .unwrap();

    group.bench_function("rmse_cv", |b| {
        b.iter(|| smoother.rmse_cv(black_box(&grid)).unwrap())
    });

    let candidates: Vec<Vec<f64>> = bandwidth_candidates(0.05, 1.0, 8)
        .unwrap()
        .into_iter()
        .map(|h| vec![h])
        .collect();
    group.bench_function("best_bandwidth", |b| {
        b.iter(|| {
            smoother
                .best_bandwidth(black_box(&grid), black_box(&candidates))
                .unwrap()
        })
    });
    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let size = 100_000;

    // Outliers and missing x
    let (x_dirty, z_dirty) = generate_dirty_data(size, 42);
    let dirty = condensed_mean(&x_dirty, &z_dirty, 0.01);
    let robust = Smooth::new()
        .bandwidth(vec![0.1])
        .method(RobustRegression)
        .iterations(5)
        .robustness_method(Bisquare)
        .build()
        .unwrap();
    group.bench_function("dirty_robust", |b| {
        b.iter(|| {
            robust
                .smooth_table(black_box(&dirty), Variable::Mean, None)
                .unwrap()
        })
    });

    // Peeling a long-tailed table
    group.bench_function("peel", |b| b.iter(|| peel(black_box(&dirty), None).unwrap()));

    // All observations in one bin
    let x_const = vec![3.0; size];
    let z_const: Vec<f64> = (0..size).map(|i| i as f64).collect();
    let condenser = Condense::new().binwidth(1.0).summary(Median).build().unwrap();
    group.bench_function("single_bin_median", |b| {
        b.iter(|| {
            condenser
                .condense(black_box(&x_const), Some(black_box(&z_const)), None)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_condense_scalability,
    bench_condense_summaries,
    bench_condense_2d,
    bench_smooth_methods,
    bench_smooth_bandwidth,
    bench_smooth_2d,
    bench_cross_validation,
    bench_pathological,
);

criterion_main!(benches);
