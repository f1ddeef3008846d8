//! Benchmark Planner
//!
//! Builds the execution plan by selecting suites and filtering their
//! operations.
//!
//! Filtering options:
//! - Suite ids (all registered suites when none are given)
//! - Regex pattern matching on operation name
//! - Tag inclusion/exclusion
//! - A single operation by exact name
//!
//! Ordering: suites keep registry order and operations keep declared order.
//! Every name is resolved here, before anything is timed.

use numbench_core::{BenchError, Operation, Result, Suite, find_suite};
use regex::Regex;

/// Operation filters shared by `run`, `list` and `verify`
#[derive(Debug, Default, Clone)]
pub struct Filters<'a> {
    /// Regex on operation names
    pub pattern: Option<&'a Regex>,
    /// Keep only operations carrying this tag
    pub tag: Option<&'a str>,
    /// Drop operations carrying this tag
    pub skip_tag: Option<&'a str>,
    /// Keep only the operation with this exact name
    pub bench: Option<&'a str>,
}

impl Filters<'_> {
    fn accepts(&self, op: &Operation) -> bool {
        if let Some(re) = self.pattern {
            if !re.is_match(op.name) {
                return false;
            }
        }

        if let Some(t) = self.tag {
            if !op.has_tag(t) {
                return false;
            }
        }

        if let Some(st) = self.skip_tag {
            if op.has_tag(st) {
                return false;
            }
        }

        if let Some(name) = self.bench {
            if op.name != name {
                return false;
            }
        }

        true
    }
}

/// A suite together with the operations selected from it
#[derive(Debug, Clone)]
pub struct PlannedSuite {
    /// The suite
    pub suite: &'static Suite,
    /// Selected operations, in declared order
    pub operations: Vec<&'static Operation>,
}

/// Execution plan for benchmarks
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlan {
    /// Suites with at least one selected operation
    pub suites: Vec<PlannedSuite>,
}

impl ExecutionPlan {
    /// Total number of selected operations
    pub fn operation_count(&self) -> usize {
        self.suites.iter().map(|s| s.operations.len()).sum()
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

/// Build execution plan from the registry.
///
/// Unknown suite ids fail with [`BenchError::UnknownSuite`]. A `bench` name
/// that exists in none of the selected suites fails with
/// [`BenchError::UnknownOperation`].
pub fn build_plan(
    registry: &[&'static Suite],
    suite_ids: &[String],
    filters: &Filters<'_>,
) -> Result<ExecutionPlan> {
    let selected: Vec<&'static Suite> = if suite_ids.is_empty() {
        registry.to_vec()
    } else {
        suite_ids
            .iter()
            .map(|id| find_suite(registry, id))
            .collect::<Result<_>>()?
    };

    if let Some(name) = filters.bench {
        if !selected.iter().any(|s| s.operation(name).is_ok()) {
            let searched: Vec<&str> = selected.iter().map(|s| s.id).collect();
            return Err(BenchError::UnknownOperation {
                suite: searched.join(","),
                name: name.to_string(),
            });
        }
    }

    let suites = selected
        .into_iter()
        .map(|suite| PlannedSuite {
            suite,
            operations: suite.operations.iter().filter(|op| filters.accepts(op)).collect(),
        })
        .filter(|planned| !planned.operations.is_empty())
        .collect();

    Ok(ExecutionPlan { suites })
}

#[cfg(test)]
mod tests {
    use super::*;
    use numbench_core::{Expectation, Outcome, Repetitions};

    fn one() -> Outcome {
        Outcome::Scalar(1.0)
    }

    const fn make_op(name: &'static str, tags: &'static [&'static str]) -> Operation {
        Operation {
            name,
            tags,
            run: one,
            expect: Expectation::Scalar(1.0),
        }
    }

    static FIRST_OPS: [Operation; 3] = [
        make_op("c_bench", &["fast"]),
        make_op("a_bench", &["slow"]),
        make_op("b_bench", &["fast", "skip_ci"]),
    ];

    static SECOND_OPS: [Operation; 1] = [make_op("d_bench", &["slow"])];

    static FIRST: Suite = Suite {
        id: "first",
        title: "First",
        repetitions: Repetitions::TimerDefault,
        operations: &FIRST_OPS,
    };

    static SECOND: Suite = Suite {
        id: "second",
        title: "Second",
        repetitions: Repetitions::TimerDefault,
        operations: &SECOND_OPS,
    };

    static REGISTRY: [&Suite; 2] = [&FIRST, &SECOND];

    fn names(plan: &ExecutionPlan) -> Vec<&'static str> {
        plan.suites
            .iter()
            .flat_map(|s| s.operations.iter().map(|op| op.name))
            .collect()
    }

    #[test]
    fn test_no_filter_keeps_declared_order() {
        let plan = build_plan(&REGISTRY, &[], &Filters::default()).unwrap();

        assert_eq!(names(&plan), ["c_bench", "a_bench", "b_bench", "d_bench"]);
        assert_eq!(plan.operation_count(), 4);
    }

    #[test]
    fn test_suite_selection_follows_request_order() {
        let ids = vec!["second".to_string(), "first".to_string()];
        let plan = build_plan(&REGISTRY, &ids, &Filters::default()).unwrap();

        assert_eq!(plan.suites[0].suite.id, "second");
        assert_eq!(plan.suites[1].suite.id, "first");
    }

    #[test]
    fn test_unknown_suite() {
        let err = build_plan(&REGISTRY, &["third".to_string()], &Filters::default()).unwrap_err();
        assert!(matches!(err, BenchError::UnknownSuite(id) if id == "third"));
    }

    #[test]
    fn test_regex_filter() {
        let re = Regex::new("^[ab]_").unwrap();
        let filters = Filters {
            pattern: Some(&re),
            ..Filters::default()
        };
        let plan = build_plan(&REGISTRY, &[], &filters).unwrap();

        assert_eq!(names(&plan), ["a_bench", "b_bench"]);
        // Suites left with nothing selected are dropped
        assert_eq!(plan.suites.len(), 1);
    }

    #[test]
    fn test_tag_filter() {
        let filters = Filters {
            tag: Some("fast"),
            ..Filters::default()
        };
        let plan = build_plan(&REGISTRY, &[], &filters).unwrap();

        assert_eq!(names(&plan), ["c_bench", "b_bench"]);
    }

    #[test]
    fn test_skip_tag() {
        let filters = Filters {
            skip_tag: Some("skip_ci"),
            ..Filters::default()
        };
        let plan = build_plan(&REGISTRY, &[], &filters).unwrap();

        assert_eq!(plan.operation_count(), 3);
        assert!(names(&plan).iter().all(|n| *n != "b_bench"));
    }

    #[test]
    fn test_bench_by_name() {
        let filters = Filters {
            bench: Some("d_bench"),
            ..Filters::default()
        };
        let plan = build_plan(&REGISTRY, &[], &filters).unwrap();
        assert_eq!(names(&plan), ["d_bench"]);
    }

    #[test]
    fn test_unknown_bench_name_fails_planning() {
        let filters = Filters {
            bench: Some("d_bench"),
            ..Filters::default()
        };
        let err = build_plan(&REGISTRY, &["first".to_string()], &filters).unwrap_err();

        match err {
            BenchError::UnknownOperation { suite, name } => {
                assert_eq!(suite, "first");
                assert_eq!(name, "d_bench");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
