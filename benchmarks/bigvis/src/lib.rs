//! Reproducible data generators for the bigvis benchmarks.
//!
//! Every generator takes a seed so that runs are comparable.

use rand::prelude::*;
use rand_distr::{Normal, Uniform};

// ============================================================================
// One-dimensional Data
// ============================================================================

/// Normal `x` with a sinusoidal response and Gaussian noise.
pub fn generate_normal_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x_dist = Normal::new(0.0, 1.0).unwrap();
    let noise_dist = Normal::new(0.0, 0.2).unwrap();

    let x: Vec<f64> = (0..size).map(|_| x_dist.sample(&mut rng)).collect();
    let z: Vec<f64> = x
        .iter()
        .map(|&xi| (2.0 * xi).sin() + noise_dist.sample(&mut rng))
        .collect();
    (x, z)
}

/// Normal data with heavy outliers and a few missing observations.
///
/// 5% of the responses get a uniform shock and 1% of `x` is NaN.
pub fn generate_dirty_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let (mut x, mut z) = generate_normal_data(size, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let outlier_dist = Uniform::new(-20.0, 20.0).unwrap();

    for _ in 0..size / 20 {
        let idx = rng.random_range(0..size);
        z[idx] += outlier_dist.sample(&mut rng);
    }
    for _ in 0..size / 100 {
        let idx = rng.random_range(0..size);
        x[idx] = f64::NAN;
    }
    (x, z)
}

/// Long-tailed positive weights.
pub fn generate_weights(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1.0).unwrap();
    (0..size)
        .map(|_| {
            let v: f64 = dist.sample(&mut rng);
            v.exp()
        })
        .collect()
}

// ============================================================================
// Two-dimensional Data
// ============================================================================

/// Correlated bivariate normal positions with a planar response.
pub fn generate_bivariate_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1.0).unwrap();
    let noise_dist = Normal::new(0.0, 0.5).unwrap();

    let mut x = Vec::with_capacity(size);
    let mut y = Vec::with_capacity(size);
    let mut z = Vec::with_capacity(size);
    for _ in 0..size {
        let a: f64 = dist.sample(&mut rng);
        let b: f64 = dist.sample(&mut rng);
        let xi = a;
        let yi = 0.6 * a + 0.8 * b;
        x.push(xi);
        y.push(yi);
        z.push(1.0 + 2.0 * xi - yi + noise_dist.sample(&mut rng));
    }
    (x, y, z)
}
