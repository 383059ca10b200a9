/*!

`efs-e2e-suite` bootstraps and runs the EFS CSI driver end-to-end suite against a live cluster.

The [`SuiteBootstrapper`] takes a [`ResolvedConfiguration`], registers a fail handler and the
reporting sinks, and hands a set of [`Specification`]s to an [`ExecutionEngine`]. The engine is a
seam: [`SequentialEngine`] is provided, and tests inject their own.

!*/

mod bootstrap;
mod engine;
pub mod error;
mod identity;
mod junit;
pub mod k8s;
mod report;
pub mod specs;
mod summary;

pub use bootstrap::{SuiteBootstrapper, SuiteState};
pub use efs_e2e_model::ResolvedConfiguration;
pub use engine::SequentialEngine;
pub use identity::RunIdentity;
pub use junit::JUnitReporter;
pub use report::{ensure_report_dir, report_file_name, ConsoleReporter, ReportSettings};
pub use summary::{SpecState, SpecSummary, SpecificationFailure, SuiteOutcome, SuiteSummary};

use async_trait::async_trait;
use error::ReportError;
use log::error;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// What a [`Specification`] gets to work with. Shared read-only by every specification.
#[derive(Debug, Clone)]
pub struct SpecContext {
    pub config: Arc<ResolvedConfiguration>,
    pub identity: RunIdentity,
}

impl SpecContext {
    pub fn new(config: ResolvedConfiguration, identity: RunIdentity) -> Self {
        Self {
            config: Arc::new(config),
            identity,
        }
    }
}

/// A single test case run against the cluster.
///
/// Returning an error, or panicking (e.g. in `assert!`), fails this specification only.
#[async_trait]
pub trait Specification: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, context: &SpecContext) -> Result<(), SpecificationFailure>;
}

/// Receives the progress of a suite run. Implemented by the console and JUnit sinks.
pub trait Reporter: Send {
    fn suite_will_begin(&mut self, suite_name: &str, identity: &RunIdentity, total_specs: usize);

    fn spec_did_complete(&mut self, spec: &SpecSummary);

    /// Called once after the last specification. Sinks that persist a report write it here.
    fn suite_did_end(&mut self, summary: &SuiteSummary) -> Result<(), ReportError>;
}

/// Called with the specification name for every specification failure.
pub type FailHandler = Arc<dyn Fn(&str, &SpecificationFailure) + Send + Sync>;

/// The fail handler the [`SuiteBootstrapper`] registers: every failure is logged.
pub fn log_fail_handler() -> FailHandler {
    Arc::new(|name: &str, failure: &SpecificationFailure| {
        error!("Specification '{}' failed: {}", name, failure)
    })
}

/// Runs specifications and reports on them. The [`SuiteBootstrapper`] calls
/// `register_fail_handler` once and then `run_specs` once.
#[async_trait]
pub trait ExecutionEngine: Send {
    /// The error type returned when the engine itself cannot complete a run.
    type E: Debug + Display + Send + Sync + 'static;

    fn register_fail_handler(&mut self, handler: FailHandler);

    /// Runs every specification, notifying `reporters`, and returns the aggregate outcome.
    /// Specification failures are counted in the outcome, not returned as errors.
    async fn run_specs(
        &mut self,
        context: SpecContext,
        specs: Vec<Box<dyn Specification>>,
        reporters: Vec<Box<dyn Reporter>>,
    ) -> Result<SuiteOutcome, Self::E>;
}
