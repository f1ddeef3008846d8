//! Statistics suite: max, min, mean and variance over mostly-zero grids.

use crate::fixtures::{LARGE, MID, amax, amin, mean, par_amax, par_amin, par_mean, par_var};
use ndarray::Array;
use numbench_core::{DEFAULT_REPETITIONS, Expectation, Operation, Outcome, Repetitions, Suite};

fn arr_max_mid() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = 15.0;
    amax(&arr).into()
}

fn arr_max_large() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(LARGE);
    arr[[25, 25, 25, 25]] = 15.0;
    amax(&arr).into()
}

fn arr_max_mid_rayon() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = 15.0;
    par_amax(&arr).into()
}

fn arr_max_large_rayon() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(LARGE);
    arr[[25, 25, 25, 25]] = 15.0;
    par_amax(&arr).into()
}

fn arr_min_mid() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = -1.0;
    amin(&arr).into()
}

fn arr_min_mid_rayon() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = -1.0;
    par_amin(&arr).into()
}

fn arr_min_large() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(LARGE);
    arr[[25, 25, 25, 25]] = -1.0;
    amin(&arr).into()
}

fn mean_mid() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = 125_000.0;
    mean(&arr).into()
}

fn mean_mid_rayon() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = 125_000.0;
    par_mean(&arr).into()
}

fn mean_large() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(LARGE);
    arr[[25, 25, 25, 25]] = 6_250_000.0;
    mean(&arr).into()
}

fn arr_min_large_rayon() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(LARGE);
    arr[[25, 25, 25, 25]] = -1.0;
    par_amin(&arr).into()
}

fn mean_large_rayon() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(LARGE);
    arr[[25, 25, 25, 25]] = 6_250_000.0;
    par_mean(&arr).into()
}

fn variance_mid() -> Outcome {
    let arr = Array::<f64, _>::zeros(MID);
    arr.var(1.0).into()
}

fn variance_mid_rayon() -> Outcome {
    let arr = Array::<f64, _>::zeros(MID);
    par_var(&arr).into()
}

fn variance_large() -> Outcome {
    let arr = Array::<f64, _>::zeros(LARGE);
    arr.var(1.0).into()
}

fn variance_large_rayon() -> Outcome {
    let arr = Array::<f64, _>::zeros(LARGE);
    par_var(&arr).into()
}

static OPERATIONS: [Operation; 16] = [
    Operation {
        name: "arr_max_mid",
        tags: &["mid"],
        run: arr_max_mid,
        expect: Expectation::Scalar(15.0),
    },
    Operation {
        name: "arr_max_large",
        tags: &["large"],
        run: arr_max_large,
        expect: Expectation::Scalar(15.0),
    },
    Operation {
        name: "arr_max_mid_rayon",
        tags: &["mid", "parallel"],
        run: arr_max_mid_rayon,
        expect: Expectation::Scalar(15.0),
    },
    Operation {
        name: "arr_max_large_rayon",
        tags: &["large", "parallel"],
        run: arr_max_large_rayon,
        expect: Expectation::Scalar(15.0),
    },
    Operation {
        name: "arr_min_mid",
        tags: &["mid"],
        run: arr_min_mid,
        expect: Expectation::Scalar(-1.0),
    },
    Operation {
        name: "arr_min_mid_rayon",
        tags: &["mid", "parallel"],
        run: arr_min_mid_rayon,
        expect: Expectation::Scalar(-1.0),
    },
    Operation {
        name: "arr_min_large",
        tags: &["large"],
        run: arr_min_large,
        expect: Expectation::Scalar(-1.0),
    },
    Operation {
        name: "arr_min_large_rayon",
        tags: &["large", "parallel"],
        run: arr_min_large_rayon,
        expect: Expectation::Scalar(-1.0),
    },
    Operation {
        name: "mean_mid",
        tags: &["mid"],
        run: mean_mid,
        expect: Expectation::Scalar(1.0),
    },
    Operation {
        name: "mean_mid_rayon",
        tags: &["mid", "parallel"],
        run: mean_mid_rayon,
        expect: Expectation::Scalar(1.0),
    },
    Operation {
        name: "mean_large",
        tags: &["large"],
        run: mean_large,
        expect: Expectation::Scalar(1.0),
    },
    Operation {
        name: "mean_large_rayon",
        tags: &["large", "parallel"],
        run: mean_large_rayon,
        expect: Expectation::Scalar(1.0),
    },
    Operation {
        name: "variance_mid",
        tags: &["mid"],
        run: variance_mid,
        expect: Expectation::Scalar(0.0),
    },
    Operation {
        name: "variance_mid_rayon",
        tags: &["mid", "parallel"],
        run: variance_mid_rayon,
        expect: Expectation::Scalar(0.0),
    },
    Operation {
        name: "variance_large",
        tags: &["large"],
        run: variance_large,
        expect: Expectation::Scalar(0.0),
    },
    Operation {
        name: "variance_large_rayon",
        tags: &["large", "parallel"],
        run: variance_large_rayon,
        expect: Expectation::Scalar(0.0),
    },
];

/// Statistics suite, 500 repetitions per operation
pub static SUITE: Suite = Suite {
    id: "stats",
    title: "Statistics",
    repetitions: Repetitions::PerIteration(DEFAULT_REPETITIONS),
    operations: &OPERATIONS,
};
