//! Demo workload
//!
//! Fills a large random matrix and prints a handful of statistics, then runs
//! the trigonometric round trip `atan(tan(x))` over a centered random matrix.
//! It is a smoke test for the whole ndarray surface the suites touch rather
//! than a timed benchmark.

use crate::fixtures::{amax, amin, mean, ptp};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::debug;

/// Demo dimensions and seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Matrix rows
    pub rows: usize,
    /// Matrix columns
    pub cols: usize,
    /// How many times to repeat the workload
    pub rounds: usize,
    /// RNG seed; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 1_000_000,
            cols: 50,
            rounds: 10,
            seed: None,
        }
    }
}

/// Statistics printed for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemoSummary {
    /// Smallest element
    pub min: f64,
    /// Largest element
    pub max: f64,
    /// `max - min`
    pub range: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Sum of all elements
    pub sum: f64,
    /// Product of all elements
    pub product: f64,
    /// Largest |atan(tan(x)) - x| over the centered matrix
    pub roundtrip_error: f64,
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |_| rng.gen::<f64>())
}

fn round<W: Write>(out: &mut W, rng: &mut StdRng, config: &DemoConfig) -> io::Result<DemoSummary> {
    let arr = random_matrix(rng, config.rows, config.cols);

    let min = amin(&arr);
    let max = amax(&arr);
    let range = ptp(&arr);
    writeln!(out, "Minimum element: {}", min)?;
    writeln!(out, "Maximum element: {}", max)?;
    writeln!(out, "Range: {}", range)?;

    let avg = mean(&arr);
    let std_dev = arr.std(0.0);
    let sum = arr.sum();
    let product = arr.product();
    writeln!(out, "Mean: {}", avg)?;
    writeln!(out, "Standard Deviation: {}", std_dev)?;
    writeln!(out, "Sum: {}", sum)?;
    writeln!(out, "Product: {}", product)?;

    let centered = random_matrix(rng, config.rows, config.cols) - 0.5;
    let negated = -&centered;
    let positive = centered.to_owned();
    let sin = positive.mapv(f64::sin);
    let cos = positive.mapv(f64::cos);
    let tan = positive.mapv(f64::tan);
    let same = tan.mapv(f64::atan);

    let roundtrip_error = amax(&(&same - &centered).mapv(f64::abs));
    debug!(
        negated_sum = negated.sum(),
        sin_sum = sin.sum(),
        cos_sum = cos.sum(),
        roundtrip_error,
        "demo trig pass"
    );

    writeln!(out)?;

    Ok(DemoSummary {
        min,
        max,
        range,
        mean: avg,
        std_dev,
        sum,
        product,
        roundtrip_error,
    })
}

/// Run the demo for `config.rounds` rounds, writing statistics to `out`.
pub fn run_demo<W: Write>(out: &mut W, config: &DemoConfig) -> io::Result<Vec<DemoSummary>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    (0..config.rounds)
        .map(|_| round(&mut *out, &mut rng, config))
        .collect()
}
