//! Arithmetic suite: elementwise negation, sum and product.

use crate::fixtures::{LARGE, MID};
use ndarray::Array;
use numbench_core::{DEFAULT_REPETITIONS, Expectation, Operation, Outcome, Repetitions, Suite};

fn negative_bench_mid() -> Outcome {
    let input = Array::from_elem(MID, 1.0);
    (-&input).into()
}

fn negative_bench_large() -> Outcome {
    let input = Array::from_elem(LARGE, 1.0);
    (-&input).into()
}

fn negative_bench_mid_rayon() -> Outcome {
    let mut arr = Array::from_elem(MID, 1.0);
    arr.par_mapv_inplace(|x: f64| -x);
    arr.into()
}

fn sum_bench_mid() -> Outcome {
    let input = Array::from_elem(MID, 1.0);
    input.sum().into()
}

fn prod_bench_mid() -> Outcome {
    let input = Array::from_elem(MID, 1.0);
    input.product().into()
}

fn prod_bench_large() -> Outcome {
    let input = Array::from_elem(LARGE, 1.0);
    input.product().into()
}

static OPERATIONS: [Operation; 6] = [
    Operation {
        name: "negative_bench_mid",
        tags: &["mid"],
        run: negative_bench_mid,
        expect: Expectation::Filled {
            shape: &MID,
            value: -1.0,
        },
    },
    Operation {
        name: "negative_bench_large",
        tags: &["large"],
        run: negative_bench_large,
        expect: Expectation::Filled {
            shape: &LARGE,
            value: -1.0,
        },
    },
    Operation {
        name: "negative_bench_mid_rayon",
        tags: &["mid", "parallel"],
        run: negative_bench_mid_rayon,
        expect: Expectation::Filled {
            shape: &MID,
            value: -1.0,
        },
    },
    Operation {
        name: "sum_bench_mid",
        tags: &["mid"],
        run: sum_bench_mid,
        expect: Expectation::Scalar(125_000.0),
    },
    Operation {
        name: "prod_bench_mid",
        tags: &["mid"],
        run: prod_bench_mid,
        expect: Expectation::Scalar(1.0),
    },
    Operation {
        name: "prod_bench_large",
        tags: &["large"],
        run: prod_bench_large,
        expect: Expectation::Scalar(1.0),
    },
];

/// Arithmetic suite, 500 repetitions per operation
pub static SUITE: Suite = Suite {
    id: "arith",
    title: "Arithmetic",
    repetitions: Repetitions::PerIteration(DEFAULT_REPETITIONS),
    operations: &OPERATIONS,
};
