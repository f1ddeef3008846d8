//! Plan Execution
//!
//! Drives the [`Runner`] over every suite of an [`ExecutionPlan`] and turns
//! each suite's outcome into a [`SuiteReport`]. Also hosts the untimed
//! `verify` pass.
//!
//! ```text
//! plan ──► suite ──► Runner::run_operations ──► SuiteReport (passed)
//!            │                 │
//!            │                 └── error ──► SuiteReport (failed) ──► stop unless keep_going
//!            └── after a stop ──────────────► SuiteReport (skipped)
//! ```

use crate::planner::ExecutionPlan;
use numbench_core::{BenchError, Clock, Repetitions, Runner, Suite};
use numbench_report::{FailureInfo, ReportConfig, SuiteReport};
use std::io::{self, Write};
use tracing::{error, info};

/// Settings applied to every suite of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Repetition count forced on every suite
    pub repetitions: Option<u64>,
    /// Check expectations before timing
    pub verify: bool,
    /// Continue with the next suite after a failure
    pub keep_going: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            repetitions: None,
            verify: true,
            keep_going: false,
        }
    }
}

impl ExecutionConfig {
    /// Repetition policy for `suite`: the forced count, or the suite's own
    pub fn repetitions_for(&self, suite: &Suite) -> Repetitions {
        self.repetitions
            .map(Repetitions::PerIteration)
            .unwrap_or(suite.repetitions)
    }

    /// Reject a forced repetition count of zero
    pub fn validate(&self) -> numbench_core::Result<()> {
        match self.repetitions {
            Some(0) => Err(BenchError::InvalidRepetitions(0)),
            _ => Ok(()),
        }
    }

    /// The part of the configuration recorded in report metadata
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            repetitions_override: self.repetitions,
            verify: self.verify,
            keep_going: self.keep_going,
        }
    }
}

fn failure_info(err: &BenchError) -> FailureInfo {
    let (operation, kind) = match err {
        BenchError::CheckFailed { operation, .. } => (Some(operation.clone()), "check"),
        BenchError::UnknownOperation { name, .. } => (Some(name.clone()), "resolution"),
        BenchError::UnknownSuite(_) => (None, "resolution"),
        BenchError::InvalidRepetitions(_) => (None, "repetitions"),
        BenchError::Io(_) => (None, "io"),
    };
    FailureInfo {
        operation,
        kind: kind.to_string(),
        message: err.to_string(),
    }
}

/// Run every planned suite in order.
///
/// A failing suite stops the run unless `keep_going` is set; suites after
/// the stop are reported as skipped. Records written before a failure are
/// kept in that suite's report.
pub fn execute_plan<W: Write, C: Clock>(
    runner: &mut Runner<W, C>,
    plan: &ExecutionPlan,
    config: &ExecutionConfig,
) -> Vec<SuiteReport> {
    let mut reports = Vec::with_capacity(plan.suites.len());
    let mut stopped = false;

    for planned in &plan.suites {
        let suite = planned.suite;
        if stopped {
            reports.push(SuiteReport::skipped(suite.id, suite.title));
            continue;
        }

        let reps = config.repetitions_for(suite);
        let result = runner.run_operations(suite, planned.operations.iter().copied(), reps);
        let records = runner.take_records();

        match result {
            Ok(_) => reports.push(SuiteReport::passed(suite.id, suite.title, records)),
            Err(e) => {
                error!(suite = suite.id, "{}", e);
                reports.push(SuiteReport::failed(
                    suite.id,
                    suite.title,
                    records,
                    failure_info(&e),
                ));
                if !config.keep_going {
                    stopped = true;
                }
            }
        }
    }

    reports
}

/// Outcome of a verification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationSummary {
    /// Operations whose result matched
    pub passed: usize,
    /// Operations whose result did not match
    pub failed: usize,
}

impl VerificationSummary {
    /// Operations checked
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// Check every planned operation once, untimed, writing one line per operation.
///
/// Unlike a timed run, this does not stop at the first mismatch.
pub fn verify_plan<W: Write>(out: &mut W, plan: &ExecutionPlan) -> io::Result<VerificationSummary> {
    let mut summary = VerificationSummary::default();

    for planned in &plan.suites {
        writeln!(out, "{}", planned.suite.banner())?;
        for op in &planned.operations {
            match op.verify() {
                Ok(()) => {
                    summary.passed += 1;
                    writeln!(out, "  ✓ {}", op.name)?;
                }
                Err(BenchError::CheckFailed { reason, .. }) => {
                    summary.failed += 1;
                    writeln!(out, "  ✗ {}: {}", op.name, reason)?;
                }
                Err(e) => {
                    summary.failed += 1;
                    writeln!(out, "  ✗ {}: {}", op.name, e)?;
                }
            }
        }
    }

    writeln!(out, "{} passed, {} failed", summary.passed, summary.failed)?;
    info!(passed = summary.passed, failed = summary.failed, "verification complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Filters, build_plan};
    use numbench_core::{Expectation, FixedClock, Operation, Outcome};
    use numbench_report::SuiteStatus;
    use std::time::Duration;

    fn one() -> Outcome {
        Outcome::Scalar(1.0)
    }

    const fn op(name: &'static str, expected: f64) -> Operation {
        Operation {
            name,
            tags: &[],
            run: one,
            expect: Expectation::Scalar(expected),
        }
    }

    static GOOD_OPS: [Operation; 2] = [op("good_a", 1.0), op("good_b", 1.0)];
    static BAD_OPS: [Operation; 3] = [op("ok_first", 1.0), op("wrong", 2.0), op("never", 1.0)];

    static GOOD: Suite = Suite {
        id: "good",
        title: "Good",
        repetitions: Repetitions::PerIteration(4),
        operations: &GOOD_OPS,
    };

    static BAD: Suite = Suite {
        id: "bad",
        title: "Bad",
        repetitions: Repetitions::TimerDefault,
        operations: &BAD_OPS,
    };

    static REGISTRY: [&Suite; 2] = [&GOOD, &BAD];

    fn plan(ids: &[&str]) -> ExecutionPlan {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        build_plan(&REGISTRY, &ids, &Filters::default()).unwrap()
    }

    fn runner() -> Runner<Vec<u8>, FixedClock> {
        Runner::with_clock(Vec::new(), FixedClock::new(Duration::from_micros(8)))
    }

    #[test]
    fn test_passing_suite_reports_all_records() {
        let mut runner = runner();
        let reports = execute_plan(&mut runner, &plan(&["good"]), &ExecutionConfig::default());

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, SuiteStatus::Passed);
        assert_eq!(reports[0].records.len(), 2);
        assert_eq!(reports[0].records[0].reported_ns, 2_000.0);
    }

    #[test]
    fn test_failure_stops_run() {
        let mut runner = runner();
        let reports = execute_plan(&mut runner, &plan(&["bad", "good"]), &ExecutionConfig::default());

        assert_eq!(reports[0].status, SuiteStatus::Failed);
        assert_eq!(reports[0].records.len(), 1);
        let failure = reports[0].failure.as_ref().unwrap();
        assert_eq!(failure.operation.as_deref(), Some("wrong"));
        assert_eq!(failure.kind, "check");
        assert_eq!(reports[1].status, SuiteStatus::Skipped);

        let text = String::from_utf8(runner.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("never"));
    }

    #[test]
    fn test_keep_going_runs_later_suites() {
        let config = ExecutionConfig {
            keep_going: true,
            ..ExecutionConfig::default()
        };
        let mut runner = runner();
        let reports = execute_plan(&mut runner, &plan(&["bad", "good"]), &config);

        assert_eq!(reports[0].status, SuiteStatus::Failed);
        assert_eq!(reports[1].status, SuiteStatus::Passed);
    }

    #[test]
    fn test_repetitions_override() {
        let config = ExecutionConfig {
            repetitions: Some(2),
            ..ExecutionConfig::default()
        };
        assert_eq!(config.repetitions_for(&BAD), Repetitions::PerIteration(2));
        assert_eq!(ExecutionConfig::default().repetitions_for(&BAD), Repetitions::TimerDefault);

        let mut runner = runner();
        let reports = execute_plan(&mut runner, &plan(&["good"]), &config);
        assert_eq!(reports[0].records[0].repetitions, 2);
        assert_eq!(reports[0].records[0].unit, "ns/iter");
    }

    #[test]
    fn test_validate_rejects_zero_repetitions() {
        let zero = ExecutionConfig {
            repetitions: Some(0),
            ..ExecutionConfig::default()
        };
        assert!(matches!(zero.validate(), Err(BenchError::InvalidRepetitions(0))));
        assert!(ExecutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_verify_plan_checks_everything() {
        let mut out = Vec::new();
        let summary = verify_plan(&mut out, &plan(&[])).unwrap();

        assert_eq!(summary.passed, 4);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 5);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  ✓ never\n"));
        assert!(text.contains("  ✗ wrong: expected 2, got 1\n"));
        assert!(text.ends_with("4 passed, 1 failed\n"));
    }
}
