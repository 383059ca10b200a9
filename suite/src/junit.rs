use crate::error::{self, ReportError};
use crate::summary::{SpecState, SpecSummary, SuiteSummary};
use crate::{Reporter, RunIdentity};
use efs_e2e_model::constants::SUITE_NAME;
use log::debug;
use quick_junit::{NonSuccessKind, Property, Report, TestCase, TestCaseStatus, TestSuite};
use snafu::ResultExt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Collects one JUnit test case per specification and writes the report to `path` when the suite
/// ends.
#[derive(Debug)]
pub struct JUnitReporter {
    path: PathBuf,
    report: Report,
    test_suite: TestSuite,
}

impl JUnitReporter {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            report: Report::new(SUITE_NAME),
            test_suite: TestSuite::new(SUITE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for JUnitReporter {
    fn suite_will_begin(&mut self, _suite_name: &str, identity: &RunIdentity, _total_specs: usize) {
        self.test_suite
            .add_property(Property::new("run-id", identity.run_id()));
        self.test_suite.add_property(Property::new(
            "worker-index",
            identity.worker_index().to_string(),
        ));
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) {
        let mut status = match spec.state {
            SpecState::Passed => TestCaseStatus::success(),
            SpecState::Failed => TestCaseStatus::non_success(NonSuccessKind::Failure),
            SpecState::Panicked => TestCaseStatus::non_success(NonSuccessKind::Error),
        };
        if let Some(failure) = &spec.failure {
            status.set_message(failure.message.as_str());
        }
        let mut test_case = TestCase::new(spec.name.as_str(), status);
        test_case.set_time(spec.duration);
        self.test_suite.add_test_case(test_case);
    }

    fn suite_did_end(&mut self, summary: &SuiteSummary) -> Result<(), ReportError> {
        let mut test_suite = std::mem::replace(&mut self.test_suite, TestSuite::new(SUITE_NAME));
        test_suite.set_time(summary.duration);
        self.report.set_time(summary.duration);
        self.report.add_test_suite(test_suite);

        debug!("Writing JUnit report to '{}'", self.path.display());
        let file = File::create(&self.path).context(error::ReportCreateSnafu {
            path: self.path.clone(),
        })?;
        self.report
            .serialize(file)
            .context(error::ReportSerializeSnafu {
                path: self.path.clone(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::summary::{SpecificationFailure, SuiteOutcome};
    use std::time::Duration;

    #[test]
    fn writes_cases_and_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("junit_01.xml");
        let identity = RunIdentity::new("run-1234", 1);
        let mut reporter = JUnitReporter::new(&path);

        reporter.suite_will_begin(SUITE_NAME, &identity, 2);
        reporter.spec_did_complete(&SpecSummary {
            name: "mounts a volume".to_string(),
            state: SpecState::Passed,
            failure: None,
            duration: Duration::from_millis(5),
        });
        reporter.spec_did_complete(&SpecSummary {
            name: "driver pods are running".to_string(),
            state: SpecState::Failed,
            failure: Some(SpecificationFailure::new("no pods match app=efs-csi-node")),
            duration: Duration::from_millis(7),
        });
        reporter
            .suite_did_end(&SuiteSummary {
                suite_name: SUITE_NAME.to_string(),
                identity,
                outcome: SuiteOutcome {
                    passed: 1,
                    failed: 1,
                },
                duration: Duration::from_millis(12),
            })
            .unwrap();

        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(xml.contains("EFS CSI Suite"));
        assert!(xml.contains("mounts a volume"));
        assert!(xml.contains("driver pods are running"));
        assert!(xml.contains("<failure"));
        assert!(xml.contains("no pods match app=efs-csi-node"));
        assert!(xml.contains("run-1234"));
    }

    #[test]
    fn missing_directory_is_a_report_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut reporter = JUnitReporter::new(tmp.path().join("missing").join("junit_01.xml"));
        let result = reporter.suite_did_end(&SuiteSummary {
            suite_name: SUITE_NAME.to_string(),
            identity: RunIdentity::new("run", 1),
            outcome: SuiteOutcome::default(),
            duration: Duration::default(),
        });
        assert!(matches!(result, Err(ReportError::ReportCreate { .. })));
    }
}
