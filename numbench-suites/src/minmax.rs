//! Min/max suite, from small literal arrays up to a 10^8-element grid.
//!
//! Timed with the timer's default repetition, reporting raw totals in `ns`.
//! The `large` operations here allocate 800 MB per invocation; skip them with
//! `--skip-tag large` on constrained machines.

use crate::fixtures::{HUGE, MID, amax, amin};
use ndarray::{Array, array};
use numbench_core::{Expectation, Operation, Outcome, Repetitions, Suite};
use rand::Rng;

fn arr_max_1d() -> Outcome {
    let arr = array![5.0, 3.0, 5.0, 2.0, 1.0];
    amax(&arr).into()
}

fn arr_max() -> Outcome {
    let arr = array![[5.0, 3.0, 5.0], [2.0, 1.0, 8.0]];
    amax(&arr).into()
}

fn arr_max_mid() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(MID);
    arr[[25, 25, 25]] = 15.0;
    amax(&arr).into()
}

fn arr_max_large() -> Outcome {
    let mut arr = Array::<f64, _>::zeros(HUGE);
    arr[[25, 25, 25, 25]] = 15.0;
    amax(&arr).into()
}

fn arr_min_small() -> Outcome {
    let arr = array![[5.0, 3.0, 5.0], [2.0, 1.0, 8.0]];
    amin(&arr).into()
}

fn arr_min_large() -> Outcome {
    let mut rng = rand::thread_rng();
    let mut arr = Array::from_shape_fn(HUGE, |_| rng.gen::<f64>());
    arr[[25, 25, 25, 25]] = -1.0;
    amin(&arr).into()
}

static OPERATIONS: [Operation; 6] = [
    Operation {
        name: "arr_max_1d",
        tags: &["small"],
        run: arr_max_1d,
        expect: Expectation::Scalar(5.0),
    },
    Operation {
        name: "arr_max",
        tags: &["small"],
        run: arr_max,
        expect: Expectation::Scalar(8.0),
    },
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
        name: "arr_min_small",
        tags: &["small"],
        run: arr_min_small,
        expect: Expectation::Scalar(1.0),
    },
    Operation {
        name: "arr_min_large",
        tags: &["large"],
        run: arr_min_large,
        expect: Expectation::Scalar(-1.0),
    },
];

/// Min/max suite
pub static SUITE: Suite = Suite {
    id: "minmax",
    title: "Min/Max",
    repetitions: Repetitions::TimerDefault,
    operations: &OPERATIONS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_and_mid_operations_check() {
        for op in SUITE.operations.iter().filter(|op| !op.has_tag("large")) {
            op.verify()
                .unwrap_or_else(|e| panic!("{} failed: {}", op.name, e));
        }
    }

    #[test]
    fn test_large_operations_are_tagged() {
        let large: Vec<_> = SUITE
            .operations
            .iter()
            .filter(|op| op.has_tag("large"))
            .map(|op| op.name)
            .collect();
        assert_eq!(large, ["arr_max_large", "arr_min_large"]);
    }
}
