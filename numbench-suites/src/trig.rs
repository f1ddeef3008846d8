//! Trigonometry suite: sin, arcsin, cos and arctan over filled grids.
//!
//! Timed with the timer's default repetition, reporting raw totals in `ns`.

use crate::fixtures::{LARGE, MID};
use ndarray::Array;
use numbench_core::{Expectation, Operation, Outcome, Repetitions, Suite};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

fn sin_bench_mid() -> Outcome {
    let input = Array::from_elem(MID, FRAC_PI_2);
    input.mapv(f64::sin).into()
}

fn sin_bench_mid_rayon() -> Outcome {
    let mut arr = Array::from_elem(MID, FRAC_PI_2);
    arr.par_mapv_inplace(f64::sin);
    arr.into()
}

fn arcsin_bench_large() -> Outcome {
    let input = Array::from_elem(LARGE, 1.0);
    input.mapv(f64::asin).into()
}

fn arcsin_bench_large_rayon() -> Outcome {
    let mut arr = Array::from_elem(LARGE, 1.0);
    arr.par_mapv_inplace(f64::asin);
    arr.into()
}

fn cos_bench_large() -> Outcome {
    let input = Array::from_elem(LARGE, 0.0);
    input.mapv(f64::cos).into()
}

fn cos_bench_large_rayon() -> Outcome {
    let mut arr = Array::from_elem(LARGE, 0.0);
    arr.par_mapv_inplace(f64::cos);
    arr.into()
}

fn arctan_bench_mid() -> Outcome {
    let input = Array::from_elem(MID, 1.0);
    input.mapv(f64::atan).into()
}

fn arctan_bench_mid_rayon() -> Outcome {
    let mut arr = Array::from_elem(MID, 1.0);
    arr.par_mapv_inplace(f64::atan);
    arr.into()
}

static OPERATIONS: [Operation; 8] = [
    Operation {
        name: "sin_bench_mid",
        tags: &["mid"],
        run: sin_bench_mid,
        expect: Expectation::Filled {
            shape: &MID,
            value: 1.0,
        },
    },
    Operation {
        name: "sin_bench_mid_rayon",
        tags: &["mid", "parallel"],
        run: sin_bench_mid_rayon,
        expect: Expectation::Filled {
            shape: &MID,
            value: 1.0,
        },
    },
    Operation {
        name: "arcsin_bench_large",
        tags: &["large"],
        run: arcsin_bench_large,
        expect: Expectation::Filled {
            shape: &LARGE,
            value: FRAC_PI_2,
        },
    },
    Operation {
        name: "arcsin_bench_large_rayon",
        tags: &["large", "parallel"],
        run: arcsin_bench_large_rayon,
        expect: Expectation::Filled {
            shape: &LARGE,
            value: FRAC_PI_2,
        },
    },
    Operation {
        name: "cos_bench_large",
        tags: &["large"],
        run: cos_bench_large,
        expect: Expectation::Filled {
            shape: &LARGE,
            value: 1.0,
        },
    },
    Operation {
        name: "cos_bench_large_rayon",
        tags: &["large", "parallel"],
        run: cos_bench_large_rayon,
        expect: Expectation::Filled {
            shape: &LARGE,
            value: 1.0,
        },
    },
    Operation {
        name: "arctan_bench_mid",
        tags: &["mid"],
        run: arctan_bench_mid,
        expect: Expectation::Filled {
            shape: &MID,
            value: FRAC_PI_4,
        },
    },
    Operation {
        name: "arctan_bench_mid_rayon",
        tags: &["mid", "parallel"],
        run: arctan_bench_mid_rayon,
        expect: Expectation::Filled {
            shape: &MID,
            value: FRAC_PI_4,
        },
    },
];

/// Trigonometry suite
pub static SUITE: Suite = Suite {
    id: "trig",
    title: "Trigonometry",
    repetitions: Repetitions::TimerDefault,
    operations: &OPERATIONS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_operations_check() {
        for op in SUITE.operations {
            op.verify()
                .unwrap_or_else(|e| panic!("{} failed: {}", op.name, e));
        }
    }

    #[test]
    fn test_parallel_variants_match_serial() {
        assert_eq!(sin_bench_mid(), sin_bench_mid_rayon());
        assert_eq!(arctan_bench_mid(), arctan_bench_mid_rayon());
    }

    #[test]
    fn test_declared_order() {
        let names: Vec<_> = SUITE.operations.iter().map(|op| op.name).collect();
        assert_eq!(
            names,
            [
                "sin_bench_mid",
                "sin_bench_mid_rayon",
                "arcsin_bench_large",
                "arcsin_bench_large_rayon",
                "cos_bench_large",
                "cos_bench_large_rayon",
                "arctan_bench_mid",
                "arctan_bench_mid_rayon",
            ]
        );
    }

    #[test]
    fn test_reports_raw_totals() {
        assert_eq!(SUITE.repetitions.unit(), "ns");
    }
}
