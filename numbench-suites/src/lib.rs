#![warn(missing_docs)]
//! numbench Suites
//!
//! Benchmark suites over `ndarray` primitives. Each suite is a static,
//! ordered list of operations; [`SUITES`] lists them in the order the CLI runs
//! them by default.
//!
//! - [`arith`] - negation, sum, product (500 repetitions, `ns/iter`)
//! - [`stats`] - max, min, mean, variance (500 repetitions, `ns/iter`)
//! - [`trig`] - sin, arcsin, cos, arctan (timer default, `ns`)
//! - [`trig_loop`] - 5-element max and counting loops (timer default, `ns`)
//! - [`minmax`] - max/min from 5 elements to 10^8 (timer default, `ns`)
//! - [`demo`] - untimed random-matrix statistics walkthrough

pub mod arith;
pub mod demo;
pub mod fixtures;
pub mod minmax;
pub mod stats;
pub mod trig;
pub mod trig_loop;

pub use demo::{DemoConfig, DemoSummary, run_demo};

use numbench_core::{Result, Suite, find_suite};

/// Every registered suite, in default run order
pub static SUITES: [&Suite; 5] = [
    &arith::SUITE,
    &stats::SUITE,
    &trig::SUITE,
    &trig_loop::SUITE,
    &minmax::SUITE,
];

/// Look up a suite by id
pub fn suite(id: &str) -> Result<&'static Suite> {
    find_suite(&SUITES, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use numbench_core::BenchError;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order() {
        let ids: Vec<_> = SUITES.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["arith", "stats", "trig", "trig_loop", "minmax"]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(suite("trig").unwrap().title, "Trigonometry");
        assert!(matches!(suite("fft"), Err(BenchError::UnknownSuite(_))));
    }

    #[test]
    fn test_names_unique_within_suite() {
        for s in SUITES {
            let names: HashSet<_> = s.operations.iter().map(|op| op.name).collect();
            assert_eq!(names.len(), s.operations.len(), "duplicate in {}", s.id);
        }
    }
}
