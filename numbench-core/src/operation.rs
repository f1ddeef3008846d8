//! Operations and Suites
//!
//! An [`Operation`] is a named, zero-argument computation over a freshly built
//! array fixture. It only computes; what the result should be is declared
//! separately as an [`Expectation`] and checked outside the timing loop.
//!
//! A [`Suite`] is an ordered, statically defined list of operations plus the
//! repetition policy its driver uses.

use crate::error::{BenchError, Result};
use crate::runner::Repetitions;
use ndarray::{Array, ArrayD, Dimension};

/// Absolute tolerance used when comparing results against expectations
pub const TOLERANCE: f64 = 1e-10;

/// Value produced by one operation invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A reduction result
    Scalar(f64),
    /// An elementwise result
    Array(ArrayD<f64>),
}

impl From<f64> for Outcome {
    fn from(value: f64) -> Self {
        Outcome::Scalar(value)
    }
}

impl<D: Dimension> From<Array<f64, D>> for Outcome {
    fn from(arr: Array<f64, D>) -> Self {
        Outcome::Array(arr.into_dyn())
    }
}

/// Expected result of an operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expectation {
    /// Nothing to check; the operation is timed only
    Unchecked,
    /// The operation returns this scalar
    Scalar(f64),
    /// The operation returns an array of `shape` with every element equal to `value`
    Filled {
        /// Expected shape
        shape: &'static [usize],
        /// Expected fill value
        value: f64,
    },
}

#[inline]
fn close(actual: f64, expected: f64) -> bool {
    actual == expected || (actual - expected).abs() <= TOLERANCE
}

impl Expectation {
    /// Compare an outcome against this expectation.
    ///
    /// Returns a human-readable reason on mismatch.
    pub fn check(&self, outcome: &Outcome) -> std::result::Result<(), String> {
        match (self, outcome) {
            (Expectation::Unchecked, _) => Ok(()),
            (Expectation::Scalar(expected), Outcome::Scalar(actual)) => {
                if close(*actual, *expected) {
                    Ok(())
                } else {
                    Err(format!("expected {}, got {}", expected, actual))
                }
            }
            (Expectation::Filled { shape, value }, Outcome::Array(arr)) => {
                if arr.shape() != *shape {
                    return Err(format!(
                        "expected shape {:?}, got {:?}",
                        shape,
                        arr.shape()
                    ));
                }
                match arr.iter().position(|x| !close(*x, *value)) {
                    None => Ok(()),
                    Some(idx) => Err(format!(
                        "element {} is {}, expected {}",
                        idx,
                        arr.iter().nth(idx).copied().unwrap_or(f64::NAN),
                        value
                    )),
                }
            }
            (Expectation::Scalar(_), Outcome::Array(arr)) => {
                Err(format!("expected a scalar, got an array of shape {:?}", arr.shape()))
            }
            (Expectation::Filled { .. }, Outcome::Scalar(actual)) => {
                Err(format!("expected an array, got scalar {}", actual))
            }
        }
    }
}

/// A named benchmark operation
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Display name, used in report lines and for lookups
    pub name: &'static str,
    /// Tags for filtering (`mid`, `large`, `parallel`, ...)
    pub tags: &'static [&'static str],
    /// The computation to time
    pub run: fn() -> Outcome,
    /// What `run` must produce
    pub expect: Expectation,
}

impl Operation {
    /// Whether the operation carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }

    /// Run the operation once, untimed, and check its result.
    pub fn verify(&self) -> Result<()> {
        let outcome = (self.run)();
        self.expect
            .check(&outcome)
            .map_err(|reason| BenchError::CheckFailed {
                operation: self.name.to_string(),
                reason,
            })
    }
}

/// An ordered set of operations benchmarked together
#[derive(Debug, Clone, Copy)]
pub struct Suite {
    /// Short identifier used on the command line
    pub id: &'static str,
    /// Title printed in the banner
    pub title: &'static str,
    /// Repetition policy used by the suite driver
    pub repetitions: Repetitions,
    /// Operations in declared order
    pub operations: &'static [Operation],
}

impl Suite {
    /// Resolve an operation by name.
    pub fn operation(&self, name: &str) -> Result<&'static Operation> {
        self.operations
            .iter()
            .find(|op| op.name == name)
            .ok_or_else(|| BenchError::UnknownOperation {
                suite: self.id.to_string(),
                name: name.to_string(),
            })
    }

    /// Banner line printed before the suite's report lines
    pub fn banner(&self) -> String {
        format!("{} Benchmarks", self.title)
    }
}

/// Resolve a suite by id from a registry.
pub fn find_suite(registry: &[&'static Suite], id: &str) -> Result<&'static Suite> {
    registry
        .iter()
        .copied()
        .find(|s| s.id == id)
        .ok_or_else(|| BenchError::UnknownSuite(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn ones() -> Outcome {
        Array3::from_elem((2, 2, 2), 1.0).into()
    }

    fn seven() -> Outcome {
        Outcome::Scalar(7.0)
    }

    static OPS: [Operation; 2] = [
        Operation {
            name: "ones",
            tags: &["small"],
            run: ones,
            expect: Expectation::Filled {
                shape: &[2, 2, 2],
                value: 1.0,
            },
        },
        Operation {
            name: "seven",
            tags: &[],
            run: seven,
            expect: Expectation::Scalar(8.0),
        },
    ];

    static SUITE: Suite = Suite {
        id: "toy",
        title: "Toy",
        repetitions: Repetitions::PerIteration(3),
        operations: &OPS,
    };

    #[test]
    fn test_scalar_expectation() {
        assert!(Expectation::Scalar(1.0).check(&Outcome::Scalar(1.0)).is_ok());
        assert!(Expectation::Scalar(1.0)
            .check(&Outcome::Scalar(1.0 + 1e-12))
            .is_ok());
        assert!(Expectation::Scalar(1.0).check(&Outcome::Scalar(1.5)).is_err());
        assert!(Expectation::Scalar(1.0)
            .check(&Outcome::Scalar(f64::NAN))
            .is_err());
    }

    #[test]
    fn test_filled_expectation_checks_shape_and_values() {
        let expect = Expectation::Filled {
            shape: &[2, 2, 2],
            value: 1.0,
        };
        assert!(expect.check(&ones()).is_ok());

        let wrong_shape: Outcome = Array3::from_elem((2, 2, 3), 1.0).into();
        let err = expect.check(&wrong_shape).unwrap_err();
        assert!(err.contains("shape"));

        let mut arr = Array3::from_elem((2, 2, 2), 1.0);
        arr[[1, 1, 1]] = 0.0;
        let err = expect.check(&arr.into()).unwrap_err();
        assert!(err.contains("element 7"));
    }

    #[test]
    fn test_kind_mismatch() {
        assert!(Expectation::Scalar(1.0).check(&ones()).is_err());
        assert!(Expectation::Filled {
            shape: &[1],
            value: 1.0
        }
        .check(&Outcome::Scalar(1.0))
        .is_err());
        assert!(Expectation::Unchecked.check(&Outcome::Scalar(1.0)).is_ok());
    }

    #[test]
    fn test_verify_reports_operation_name() {
        assert!(OPS[0].verify().is_ok());
        match OPS[1].verify() {
            Err(BenchError::CheckFailed { operation, reason }) => {
                assert_eq!(operation, "seven");
                assert!(reason.contains("expected 8"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_verify_is_idempotent() {
        for _ in 0..3 {
            assert!(OPS[0].verify().is_ok());
            assert!(OPS[1].verify().is_err());
        }
    }

    #[test]
    fn test_suite_lookup() {
        assert_eq!(SUITE.operation("seven").unwrap().name, "seven");
        assert!(matches!(
            SUITE.operation("missing"),
            Err(BenchError::UnknownOperation { .. })
        ));
        assert_eq!(SUITE.banner(), "Toy Benchmarks");
        assert!(OPS[0].has_tag("small"));
    }

    #[test]
    fn test_find_suite() {
        let registry = [&SUITE];
        assert_eq!(find_suite(&registry, "toy").unwrap().id, "toy");
        assert!(matches!(
            find_suite(&registry, "nope"),
            Err(BenchError::UnknownSuite(_))
        ));
    }
}
