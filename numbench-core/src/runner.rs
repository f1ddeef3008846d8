//! Runner - The Benchmark Timing API
//!
//! Times a fixed number of back-to-back invocations of an [`Operation`] and
//! writes one report line per operation to an output sink.
//!
//! The timed loop contains nothing but the calls themselves: checking a
//! result against its [`Expectation`](crate::Expectation) happens once,
//! untimed, before the loop starts.

use crate::error::{BenchError, Result};
use crate::line::report_line;
use crate::measure::{Clock, Elapsed, SystemClock};
use crate::operation::{Operation, Suite};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

/// Repetition count used by suites that report a per-iteration mean
pub const DEFAULT_REPETITIONS: u64 = 500;

/// Repetitions the timer performs when no explicit count is requested
pub const TIMER_DEFAULT_REPETITIONS: u64 = 1;

/// How many times to invoke an operation and how to report the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Repetitions {
    /// Run exactly `n` times and report the mean per call (`ns/iter`)
    PerIteration(u64),
    /// Use the timer's default count and report the raw total (`ns`)
    TimerDefault,
}

impl Repetitions {
    /// Number of invocations in the timed loop
    pub fn count(self) -> u64 {
        match self {
            Repetitions::PerIteration(n) => n,
            Repetitions::TimerDefault => TIMER_DEFAULT_REPETITIONS,
        }
    }

    /// Unit suffix of the report line
    pub fn unit(self) -> &'static str {
        match self {
            Repetitions::PerIteration(_) => "ns/iter",
            Repetitions::TimerDefault => "ns",
        }
    }

    /// Value printed on the report line for a measured total
    pub fn reported_ns(self, total_ns: u64) -> f64 {
        match self {
            Repetitions::PerIteration(n) => total_ns as f64 / n as f64,
            Repetitions::TimerDefault => total_ns as f64,
        }
    }

    fn validated_count(self) -> Result<u64> {
        match self.count() {
            0 => Err(BenchError::InvalidRepetitions(0)),
            n => Ok(n),
        }
    }
}

impl Default for Repetitions {
    fn default() -> Self {
        Repetitions::PerIteration(DEFAULT_REPETITIONS)
    }
}

/// Outcome of benchmarking one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRecord {
    /// Operation name
    pub name: String,
    /// Invocations in the timed loop
    pub repetitions: u64,
    /// Total elapsed time of the loop
    pub total_ns: u64,
    /// Mean time per invocation
    pub mean_ns: f64,
    /// Value shown on the report line
    pub reported_ns: f64,
    /// Unit shown on the report line
    pub unit: String,
    /// Counter ticks over the whole loop (0 when unavailable)
    pub cycles: u64,
}

impl BenchRecord {
    fn new(name: &str, reps: Repetitions, elapsed: Elapsed) -> Self {
        let count = reps.count();
        let total_ns = elapsed.as_nanos();
        Self {
            name: name.to_string(),
            repetitions: count,
            total_ns,
            mean_ns: total_ns as f64 / count as f64,
            reported_ns: reps.reported_ns(total_ns),
            unit: reps.unit().to_string(),
            cycles: elapsed.cycles,
        }
    }

    /// The formatted report line for this record
    pub fn line(&self) -> String {
        report_line(&self.name, self.reported_ns, &self.unit)
    }
}

/// Times operations and writes report lines to `W`.
pub struct Runner<W: Write, C: Clock = SystemClock> {
    out: W,
    clock: C,
    verify: bool,
    completed: Vec<BenchRecord>,
}

impl<W: Write> Runner<W, SystemClock> {
    /// Runner on the system clock, checking expectations before timing
    pub fn new(out: W) -> Self {
        Self::with_clock(out, SystemClock)
    }
}

impl<W: Write, C: Clock> Runner<W, C> {
    /// Runner measuring through a custom clock
    pub fn with_clock(out: W, clock: C) -> Self {
        Self {
            out,
            clock,
            verify: true,
            completed: Vec::new(),
        }
    }

    /// Enable or disable the untimed check suite drivers run before timing
    pub fn verify_before_timing(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Time `reps.count()` invocations of `op` and write its report line.
    pub fn bench(&mut self, op: &Operation, reps: Repetitions) -> Result<BenchRecord> {
        let count = reps.validated_count()?;
        let run = op.run;

        let elapsed = self.clock.measure(&mut || {
            for _ in 0..count {
                std::hint::black_box(run());
            }
        });

        let record = BenchRecord::new(op.name, reps, elapsed);
        debug!(
            operation = op.name,
            repetitions = count,
            total_ns = record.total_ns,
            "benchmark complete"
        );

        writeln!(self.out, "{}", record.line())?;
        self.completed.push(record.clone());
        Ok(record)
    }

    /// Resolve `name` in `suite`, then benchmark it.
    ///
    /// Resolution happens before any timing starts.
    pub fn bench_named(
        &mut self,
        suite: &Suite,
        name: &str,
        reps: Repetitions,
    ) -> Result<BenchRecord> {
        let op = suite.operation(name)?;
        self.bench(op, reps)
    }

    /// Run every operation of `suite` with the suite's own repetition policy.
    pub fn run_suite(&mut self, suite: &Suite) -> Result<Vec<BenchRecord>> {
        self.run_operations(suite, suite.operations, suite.repetitions)
    }

    /// Suite driver: banner, one line per operation in order, blank line.
    ///
    /// Stops at the first failing operation; later operations are not run.
    pub fn run_operations<'a, I>(
        &mut self,
        suite: &Suite,
        operations: I,
        reps: Repetitions,
    ) -> Result<Vec<BenchRecord>>
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        let operations: Vec<&Operation> = operations.into_iter().collect();
        info!(
            suite = suite.id,
            operations = operations.len(),
            repetitions = reps.count(),
            "running suite"
        );

        writeln!(self.out, "{}", suite.banner())?;

        let mut records = Vec::with_capacity(operations.len());
        for op in operations {
            if self.verify {
                op.verify()?;
            }
            records.push(self.bench(op, reps)?);
        }

        writeln!(self.out)?;
        self.out.flush()?;
        Ok(records)
    }

    /// Drain every record written since the last call.
    ///
    /// Unlike the return value of [`run_operations`](Self::run_operations),
    /// this includes the records of a suite that stopped on an error.
    pub fn take_records(&mut self) -> Vec<BenchRecord> {
        std::mem::take(&mut self.completed)
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
