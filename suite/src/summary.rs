use crate::RunIdentity;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// A failure inside a single specification. This is a test result, not a harness error: it is
/// reported and counted, and sibling specifications keep running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationFailure {
    pub message: String,
}

impl SpecificationFailure {
    pub fn new<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
        }
    }

    /// Builds a failure from the payload of a panicking specification, e.g. a failed `assert!`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "specification panicked".to_string()
        };
        Self { message }
    }
}

impl Display for SpecificationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.message, f)
    }
}

impl From<String> for SpecificationFailure {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for SpecificationFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecState {
    Passed,
    /// The specification returned a failure.
    Failed,
    /// The specification panicked, usually from an assertion macro.
    Panicked,
}

/// What a [`Reporter`](crate::Reporter) learns about each completed specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSummary {
    pub name: String,
    pub state: SpecState,
    pub failure: Option<SpecificationFailure>,
    pub duration: Duration,
}

/// Aggregate pass/fail counts of a suite run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SuiteOutcome {
    pub passed: usize,
    pub failed: usize,
}

impl SuiteOutcome {
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// What a [`Reporter`](crate::Reporter) learns when the suite ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSummary {
    pub suite_name: String,
    pub identity: RunIdentity,
    pub outcome: SuiteOutcome,
    pub duration: Duration,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn panic_payloads() {
        let failure = SpecificationFailure::from_panic(Box::new("assertion failed: ready"));
        assert_eq!(failure.message, "assertion failed: ready");
        let failure = SpecificationFailure::from_panic(Box::new(format!("{} pods", 0)));
        assert_eq!(failure.message, "0 pods");
        let failure = SpecificationFailure::from_panic(Box::new(7_u8));
        assert_eq!(failure.message, "specification panicked");
    }

    #[test]
    fn outcome_succeeds_only_without_failures() {
        assert!(SuiteOutcome::default().succeeded());
        assert!(SuiteOutcome {
            passed: 3,
            failed: 0
        }
        .succeeded());
        let outcome = SuiteOutcome {
            passed: 3,
            failed: 1,
        };
        assert!(!outcome.succeeded());
        assert_eq!(outcome.total(), 4);
    }
}
