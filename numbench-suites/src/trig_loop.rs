//! Trigonometry loop suite: a 5-element max and two counting loops.
//!
//! Kept apart from [`trig`](crate::trig) because it measures different
//! work under the same family name. Timed with the timer's default
//! repetition, reporting raw totals in `ns`.

use crate::fixtures::amax;
use ndarray::array;
use numbench_core::{Expectation, Operation, Outcome, Repetitions, Suite};
use std::hint::black_box;

fn count_to(end: u64) -> f64 {
    let mut last = 0;
    for i in 0..end {
        last = black_box(i);
    }
    last as f64
}

fn arr_trig() -> Outcome {
    let arr = array![5.0, 3.0, 5.0, 2.0, 1.0];
    amax(&arr).into()
}

fn arr_inverse_trig() -> Outcome {
    count_to(10_000).into()
}

fn trig_back_forth() -> Outcome {
    count_to(100).into()
}

static OPERATIONS: [Operation; 3] = [
    Operation {
        name: "arr_trig",
        tags: &["small"],
        run: arr_trig,
        expect: Expectation::Scalar(5.0),
    },
    Operation {
        name: "arr_inverse_trig",
        tags: &["small"],
        run: arr_inverse_trig,
        expect: Expectation::Scalar(9999.0),
    },
    Operation {
        name: "trig_back_forth",
        tags: &["small"],
        run: trig_back_forth,
        expect: Expectation::Scalar(99.0),
    },
];

/// Trigonometry loop suite
pub static SUITE: Suite = Suite {
    id: "trig_loop",
    title: "Trigonometry Loop",
    repetitions: Repetitions::TimerDefault,
    operations: &OPERATIONS,
};
