#![warn(missing_docs)]
//! numbench Core - Timing Runtime
//!
//! This crate provides the pieces every suite shares:
//! - `Operation` / `Suite` definitions with declarative expectations
//! - `Runner` that times N invocations and writes one report line each
//! - High-precision timing (RDTSCP / CNTVCT cycle counts next to `Instant`)
//! - Thousands-grouped report line formatting

mod error;
mod line;
mod measure;
mod operation;
mod runner;

pub use error::{BenchError, Result};
pub use line::{NAME_WIDTH, format_thousands, report_line};
pub use measure::{Clock, Elapsed, FixedClock, HAS_CYCLE_COUNTER, SystemClock, Timer, pin_to_cpu};
pub use operation::{Expectation, Operation, Outcome, Suite, TOLERANCE, find_suite};
pub use runner::{
    BenchRecord, DEFAULT_REPETITIONS, Repetitions, Runner, TIMER_DEFAULT_REPETITIONS,
};
