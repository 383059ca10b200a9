use crate::error::{self, EngineError};
use crate::summary::{SpecState, SpecSummary, SpecificationFailure, SuiteOutcome, SuiteSummary};
use crate::{ExecutionEngine, FailHandler, Reporter, SpecContext, Specification};
use async_trait::async_trait;
use efs_e2e_model::constants::SUITE_NAME;
use futures::FutureExt;
use log::{debug, error};
use snafu::OptionExt;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// The default [`ExecutionEngine`]. Runs specifications one at a time, in order, on the calling
/// task. A failing or panicking specification is recorded and the next one runs. Reporters that
/// fail to persist at suite end are logged and do not affect the returned outcome.
#[derive(Default)]
pub struct SequentialEngine {
    fail_handler: Option<FailHandler>,
}

impl SequentialEngine {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run_spec(&self, spec: &dyn Specification, context: &SpecContext) -> SpecSummary {
        debug!("Running specification '{}'", spec.name());
        let start = Instant::now();
        let result = AssertUnwindSafe(spec.run(context)).catch_unwind().await;
        let (state, failure) = match result {
            Ok(Ok(())) => (SpecState::Passed, None),
            Ok(Err(failure)) => (SpecState::Failed, Some(failure)),
            Err(payload) => (
                SpecState::Panicked,
                Some(SpecificationFailure::from_panic(payload)),
            ),
        };
        SpecSummary {
            name: spec.name().to_string(),
            state,
            failure,
            duration: start.elapsed(),
        }
    }
}

#[async_trait]
impl ExecutionEngine for SequentialEngine {
    type E = EngineError;

    fn register_fail_handler(&mut self, handler: FailHandler) {
        self.fail_handler = Some(handler);
    }

    async fn run_specs(
        &mut self,
        context: SpecContext,
        specs: Vec<Box<dyn Specification>>,
        mut reporters: Vec<Box<dyn Reporter>>,
    ) -> Result<SuiteOutcome, Self::E> {
        let fail_handler = self.fail_handler.clone().context(error::NoFailHandlerSnafu)?;

        for reporter in reporters.iter_mut() {
            reporter.suite_will_begin(SUITE_NAME, &context.identity, specs.len());
        }

        let start = Instant::now();
        let mut outcome = SuiteOutcome::default();
        for spec in &specs {
            let summary = self.run_spec(spec.as_ref(), &context).await;
            match &summary.failure {
                Some(failure) => {
                    fail_handler(summary.name.as_str(), failure);
                    outcome.failed += 1;
                }
                None => outcome.passed += 1,
            }
            for reporter in reporters.iter_mut() {
                reporter.spec_did_complete(&summary);
            }
        }

        let summary = SuiteSummary {
            suite_name: SUITE_NAME.to_string(),
            identity: context.identity.clone(),
            outcome,
            duration: start.elapsed(),
        };
        // The outcome is already decided. A reporter that cannot persist does not change it.
        for reporter in reporters.iter_mut() {
            if let Err(e) = reporter.suite_did_end(&summary) {
                error!("Reporter failed: {}", e);
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RunIdentity;
    use efs_e2e_model::{EnvironmentData, RawConfiguration, ResolvedConfiguration};
    use std::sync::{Arc, Mutex};

    struct Named(&'static str, Result<(), &'static str>);

    #[async_trait]
    impl Specification for Named {
        fn name(&self) -> &str {
            self.0
        }

        async fn run(&self, _: &SpecContext) -> Result<(), SpecificationFailure> {
            self.1.map_err(SpecificationFailure::from)
        }
    }

    struct Panics;

    #[async_trait]
    impl Specification for Panics {
        fn name(&self) -> &str {
            "panics"
        }

        async fn run(&self, context: &SpecContext) -> Result<(), SpecificationFailure> {
            assert_eq!(context.config.driver_namespace(), "efs", "wrong namespace");
            Ok(())
        }
    }

    fn context() -> SpecContext {
        let config =
            ResolvedConfiguration::assemble(RawConfiguration::default(), &EnvironmentData::default())
                .unwrap();
        SpecContext::new(config, RunIdentity::new("run", 1))
    }

    #[tokio::test]
    async fn refuses_to_run_without_fail_handler() {
        let mut engine = SequentialEngine::new();
        let result = engine.run_specs(context(), vec![], vec![]).await;
        assert!(matches!(result, Err(EngineError::NoFailHandler)));
    }

    #[tokio::test]
    async fn failures_go_through_the_fail_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut engine = SequentialEngine::new();
        engine.register_fail_handler(Arc::new(
            move |name: &str, failure: &SpecificationFailure| {
                sink.lock()
                    .unwrap()
                    .push(format!("{}: {}", name, failure.message));
            },
        ));

        let specs: Vec<Box<dyn Specification>> = vec![
            Box::new(Named("first", Ok(()))),
            Box::new(Named("second", Err("volume not mounted"))),
            Box::new(Panics),
            Box::new(Named("last", Ok(()))),
        ];
        let outcome = engine.run_specs(context(), specs, vec![]).await.unwrap();

        assert_eq!(
            outcome,
            SuiteOutcome {
                passed: 2,
                failed: 2
            }
        );
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], "second: volume not mounted");
        assert!(seen[1].starts_with("panics: "));
        assert!(seen[1].contains("wrong namespace"));
    }
}
