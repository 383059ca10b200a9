use snafu::Snafu;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

/// The `Error` type for the [`SuiteBootstrapper`]. Errors originating from the
/// [`ExecutionEngine`] are passed through, preserving their type. Errors originating with the
/// bootstrapper itself are of the [`SuiteError`] type.
///
/// [`SuiteBootstrapper`]: crate::SuiteBootstrapper
/// [`ExecutionEngine`]: crate::ExecutionEngine
#[derive(Debug)]
pub enum Error<E>
where
    E: Debug + Display + Send + Sync + 'static,
{
    /// An error originating from the [`SuiteBootstrapper`](crate::SuiteBootstrapper).
    Suite(SuiteError),
    /// An error originating from the [`ExecutionEngine`](crate::ExecutionEngine).
    Engine(E),
}

/// The `Result` type for the [`SuiteBootstrapper`](crate::SuiteBootstrapper).
pub type Result<T, E> = std::result::Result<T, Error<E>>;

impl<E> std::error::Error for Error<E> where E: Debug + Display + Send + Sync + 'static {}

impl<E> Display for Error<E>
where
    E: Debug + Display + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Suite(e) => write!(f, "suite error: {}", e),
            Error::Engine(e) => write!(f, "engine error: {}", e),
        }
    }
}

impl<E> From<SuiteError> for Error<E>
where
    E: Debug + Display + Send + Sync + 'static,
{
    fn from(e: SuiteError) -> Self {
        Error::Suite(e)
    }
}

/// Errors raised by the bootstrapper before or around the execution engine.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SuiteError {
    #[snafu(display("Failed creating report directory '{}': {}", path.display(), source))]
    ReportDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Cannot {} a suite that is {}", action, state))]
    InvalidState { action: String, state: String },
}

/// Errors raised by a [`Reporter`](crate::Reporter) when it persists its report.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReportError {
    #[snafu(display("Unable to create report file '{}': {}", path.display(), source))]
    ReportCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to write JUnit report '{}': {}", path.display(), source))]
    ReportSerialize {
        path: PathBuf,
        source: quick_junit::SerializeError,
    },
}

/// Errors raised by the [`SequentialEngine`](crate::SequentialEngine).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EngineError {
    #[snafu(display("No fail handler was registered before running specifications"))]
    NoFailHandler,
}

/// Errors building a Kubernetes client from the resolved kubeconfig.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ClientError {
    #[snafu(display("Unable to read kubeconfig '{}': {}", path.display(), source))]
    KubeconfigRead {
        path: PathBuf,
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Unable to load kubeconfig '{}': {}", path.display(), source))]
    KubeconfigLoad {
        path: PathBuf,
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Unable to create Kubernetes client: {}", source))]
    ClientCreate { source: kube::Error },
}
