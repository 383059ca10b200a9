use crate::error::{self, Error, Result, SuiteError};
use crate::junit::JUnitReporter;
use crate::report::{ensure_report_dir, ConsoleReporter, ReportSettings};
use crate::summary::SuiteOutcome;
use crate::{log_fail_handler, ExecutionEngine, Reporter, RunIdentity, SpecContext, Specification};
use efs_e2e_model::ResolvedConfiguration;
use log::{error, info};
use snafu::ResultExt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// The lifecycle of a [`SuiteBootstrapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    Unconfigured,
    Configured,
    Running,
    /// The engine returned. Specification failures are counted in the outcome.
    Completed(SuiteOutcome),
    /// Setup failed, or the engine could not finish, so the results are not trustworthy.
    Aborted,
}

impl Display for SuiteState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SuiteState::Unconfigured => "unconfigured",
            SuiteState::Configured => "configured",
            SuiteState::Running => "running",
            SuiteState::Completed(_) => "completed",
            SuiteState::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

struct Setup {
    context: SpecContext,
    report: ReportSettings,
}

/// Wires a [`ResolvedConfiguration`] into an [`ExecutionEngine`] and runs it to completion.
///
/// `new` gives an unconfigured bootstrapper, `configure` supplies the configuration, run identity
/// and report settings, and `run` registers the fail handler, prepares the reporters and hands the
/// specifications to the engine. A bootstrapper runs once.
pub struct SuiteBootstrapper<E>
where
    E: ExecutionEngine,
{
    engine: E,
    setup: Option<Setup>,
    state: SuiteState,
}

impl<E> SuiteBootstrapper<E>
where
    E: ExecutionEngine,
{
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            setup: None,
            state: SuiteState::Unconfigured,
        }
    }

    pub fn state(&self) -> SuiteState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn configure(
        &mut self,
        config: ResolvedConfiguration,
        identity: RunIdentity,
        report: ReportSettings,
    ) -> Result<(), E::E> {
        self.expect_state(SuiteState::Unconfigured, "configure")?;
        self.setup = Some(Setup {
            context: SpecContext::new(config, identity),
            report,
        });
        self.state = SuiteState::Configured;
        Ok(())
    }

    /// The JUnit report this run writes, if a report directory is configured.
    pub fn report_file(&self) -> Option<PathBuf> {
        self.setup
            .as_ref()
            .and_then(|setup| setup.report.report_file(&setup.context.identity))
    }

    /// Runs `specs` and returns the engine's outcome. Specification failures are part of a
    /// successful return; errors mean the suite could not be set up or the engine could not finish.
    pub async fn run(&mut self, specs: Vec<Box<dyn Specification>>) -> Result<SuiteOutcome, E::E> {
        self.expect_state(SuiteState::Configured, "run")?;
        let (context, report) = match &self.setup {
            Some(setup) => (setup.context.clone(), setup.report.clone()),
            None => return Err(self.invalid_state("run")),
        };
        self.state = SuiteState::Running;

        self.engine.register_fail_handler(log_fail_handler());

        let reporters = match Self::reporters(&report, &context.identity) {
            Ok(reporters) => reporters,
            Err(e) => {
                error!("{}", e);
                self.state = SuiteState::Aborted;
                return Err(e.into());
            }
        };

        info!(
            "Starting e2e run \"{}\" on worker {}",
            context.identity.run_id(),
            context.identity.worker_index()
        );
        match self.engine.run_specs(context, specs, reporters).await {
            Ok(outcome) => {
                self.state = SuiteState::Completed(outcome);
                Ok(outcome)
            }
            Err(e) => {
                error!("Execution engine failed: {}", e);
                self.state = SuiteState::Aborted;
                Err(Error::Engine(e))
            }
        }
    }

    /// The console reporter, plus a JUnit reporter when a report directory is configured. The
    /// report directory is created here.
    fn reporters(
        report: &ReportSettings,
        identity: &RunIdentity,
    ) -> std::result::Result<Vec<Box<dyn Reporter>>, SuiteError> {
        let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(ConsoleReporter::new())];
        if let (Some(dir), Some(file)) = (&report.report_dir, report.report_file(identity)) {
            ensure_report_dir(dir).context(error::ReportDirectorySnafu { path: dir })?;
            reporters.push(Box::new(JUnitReporter::new(file)));
        }
        Ok(reporters)
    }

    fn expect_state(&self, expected: SuiteState, action: &str) -> Result<(), E::E> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid_state(action))
        }
    }

    fn invalid_state(&self, action: &str) -> Error<E::E> {
        error::InvalidStateSnafu {
            action,
            state: self.state.to_string(),
        }
        .build()
        .into()
    }
}
