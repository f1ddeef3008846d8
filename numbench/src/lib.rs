#![warn(missing_docs)]
//! # numbench
//!
//! Micro-benchmarks for `ndarray` numeric primitives.
//!
//! - **Suites**: arithmetic, statistics, trigonometry and min/max operations over
//!   fixed grids, each a static ordered list
//! - **One Runner**: times `n` back-to-back calls and writes
//!   `test: <name>  ... bench: <ns> ns/iter` lines to any `Write` sink
//! - **Untimed Checks**: every operation's expected result is verified before
//!   its timing loop, never inside it
//! - **High-Precision Timing**: `Instant` plus RDTSCP / CNTVCT cycle counts
//! - **CLI**: suite selection, regex and tag filters, JSON reports
//!
//! ## Quick Start
//!
//! ```no_run
//! use numbench::{Repetitions, Runner};
//!
//! let mut runner = Runner::new(std::io::stdout());
//! runner.run_suite(&numbench::suites::arith::SUITE).unwrap();
//!
//! // Or a single operation with an explicit repetition count
//! runner
//!     .bench_named(&numbench::suites::stats::SUITE, "mean_mid", Repetitions::PerIteration(50))
//!     .unwrap();
//! ```

use std::io;

// Re-export core types
pub use numbench_core::{
    BenchError, BenchRecord, Clock, DEFAULT_REPETITIONS, Elapsed, Expectation, FixedClock,
    Operation, Outcome, Repetitions, Result, Runner, Suite, SystemClock, TIMER_DEFAULT_REPETITIONS,
    TOLERANCE, Timer, format_thousands, report_line,
};

// Re-export suites
pub use numbench_suites::{DemoConfig, DemoSummary, SUITES, run_demo, suite};

/// Registered suites by module
pub mod suites {
    pub use numbench_suites::{arith, fixtures, minmax, stats, trig, trig_loop};
}

// Re-export reports
pub use numbench_report::{OutputFormat, Report, SuiteReport, SuiteStatus, generate_json_report};

/// Run one suite to stdout with its own repetition policy.
///
/// Each suite's example binary is a call to this.
pub fn run_suite_stdout(suite: &Suite) -> Result<()> {
    let mut runner = Runner::new(io::stdout().lock());
    runner.run_suite(suite)?;
    Ok(())
}

/// Run the numbench CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     numbench::run().unwrap();
/// }
/// ```
pub use numbench_cli::run;
