//! Array fixtures and thin reductions over ndarray.
//!
//! Fixtures are rebuilt inside every invocation so allocation cost is part of
//! what gets measured.

use ndarray::{ArrayBase, Data, Dimension};
use rayon::prelude::*;

/// 50 × 50 × 50 grid
pub const MID: [usize; 3] = [50, 50, 50];

/// 50 × 50 × 50 × 50 grid
pub const LARGE: [usize; 4] = [50, 50, 50, 50];

/// 100 × 100 × 100 × 100 grid (10^8 elements)
pub const HUGE: [usize; 4] = [100, 100, 100, 100];

/// Largest element (NaN-ignoring fold)
pub fn amax<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    arr.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x))
}

/// Smallest element (NaN-ignoring fold)
pub fn amin<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    arr.fold(f64::INFINITY, |acc, &x| acc.min(x))
}

/// Range of values, max - min
pub fn ptp<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    amax(arr) - amin(arr)
}

/// Arithmetic mean, NaN for an empty array
pub fn mean<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    arr.mean().unwrap_or(f64::NAN)
}

/// Largest element, reduced in parallel
pub fn par_amax<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    arr.view()
        .into_par_iter()
        .fold(|| f64::NEG_INFINITY, |acc, &x| acc.max(x))
        .reduce(|| f64::NEG_INFINITY, f64::max)
}

/// Smallest element, reduced in parallel
pub fn par_amin<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    arr.view()
        .into_par_iter()
        .fold(|| f64::INFINITY, |acc, &x| acc.min(x))
        .reduce(|| f64::INFINITY, f64::min)
}

/// Arithmetic mean using rayon's parallel sum
pub fn par_mean<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if arr.is_empty() {
        return f64::NAN;
    }
    arr.view().into_par_iter().sum::<f64>() / arr.len() as f64
}

/// Sample variance (one delta degree of freedom) using rayon for both passes
pub fn par_var<S, D>(arr: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if arr.len() < 2 {
        return f64::NAN;
    }
    let avg = par_mean(arr);
    let sq: f64 = arr
        .view()
        .into_par_iter()
        .map(|&x| (x - avg) * (x - avg))
        .sum();
    sq / (arr.len() - 1) as f64
}
