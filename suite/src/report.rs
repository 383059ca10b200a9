/*!

Report file naming, report directory creation, and the console [`Reporter`].

!*/

use crate::error::ReportError;
use crate::summary::{SpecState, SpecSummary, SuiteSummary};
use crate::{Reporter, RunIdentity};
use efs_e2e_model::constants::{REPORT_FILE_EXTENSION, REPORT_FILE_STEM};
use log::{error, info};
use std::fs::DirBuilder;
use std::path::{Path, PathBuf};

/// Where, if anywhere, JUnit reports are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSettings {
    /// No JUnit report is written when this is `None`.
    pub report_dir: Option<PathBuf>,
    pub report_prefix: String,
}

impl ReportSettings {
    /// The report file this worker writes, if a report directory is configured.
    pub fn report_file(&self, identity: &RunIdentity) -> Option<PathBuf> {
        self.report_dir
            .as_ref()
            .map(|dir| dir.join(report_file_name(&self.report_prefix, identity)))
    }
}

/// `junit_<prefix><worker index, at least two digits>.xml`. A pure function of its inputs so
/// that parallel workers never write the same file.
pub fn report_file_name(prefix: &str, identity: &RunIdentity) -> String {
    format!(
        "{}{}{:02}.{}",
        REPORT_FILE_STEM,
        prefix,
        identity.worker_index(),
        REPORT_FILE_EXTENSION
    )
}

/// Creates `dir` and its parents with mode `0755`. An existing directory is not an error, so
/// every worker may call this.
pub fn ensure_report_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

/// Logs each specification as it completes and a summary at the end.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    total_specs: usize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn suite_will_begin(&mut self, suite_name: &str, identity: &RunIdentity, total_specs: usize) {
        self.total_specs = total_specs;
        info!(
            "Running suite '{}' ({}) with {} specifications",
            suite_name, identity, total_specs
        );
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) {
        let label = match spec.state {
            SpecState::Passed => {
                info!("[PASS] {} ({:?})", spec.name, spec.duration);
                return;
            }
            SpecState::Failed => "FAIL",
            SpecState::Panicked => "PANIC",
        };
        let message = spec
            .failure
            .as_ref()
            .map(|failure| failure.message.as_str())
            .unwrap_or_default();
        error!(
            "[{}] {} ({:?}): {}",
            label, spec.name, spec.duration, message
        );
    }

    fn suite_did_end(&mut self, summary: &SuiteSummary) -> Result<(), ReportError> {
        info!(
            "Ran {} of {} specifications in {:?}: {} passed, {} failed",
            summary.outcome.total(),
            self.total_specs,
            summary.duration,
            summary.outcome.passed,
            summary.outcome.failed
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn empty_prefix() {
        assert_eq!(
            report_file_name("", &RunIdentity::new("run", 3)),
            "junit_03.xml"
        );
    }

    #[test]
    fn prefix_and_wide_worker_index() {
        assert_eq!(
            report_file_name("efs-", &RunIdentity::new("run", 12)),
            "junit_efs-12.xml"
        );
        assert_eq!(
            report_file_name("", &RunIdentity::new("run", 123)),
            "junit_123.xml"
        );
    }

    #[test]
    fn names_are_unique_per_worker() {
        let names: HashSet<String> = (0..200)
            .map(|worker| report_file_name("p", &RunIdentity::new("run", worker)))
            .collect();
        assert_eq!(names.len(), 200);
    }

    #[test]
    fn report_file_only_with_directory() {
        let identity = RunIdentity::new("run", 1);
        assert_eq!(ReportSettings::default().report_file(&identity), None);
        let settings = ReportSettings {
            report_dir: Some(PathBuf::from("/tmp/reports")),
            report_prefix: String::new(),
        };
        assert_eq!(
            settings.report_file(&identity),
            Some(PathBuf::from("/tmp/reports/junit_01.xml"))
        );
    }

    #[test]
    fn report_dir_creation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_report_dir(&dir).unwrap();
        ensure_report_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn report_dir_creation_fails_over_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file");
        std::fs::write(&file, "").unwrap();
        assert!(ensure_report_dir(&file).is_err());
    }
}
