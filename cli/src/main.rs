/*!

This is the command line entrypoint for the EFS CSI driver end-to-end suite. It resolves the
configuration, then runs the suite against the cluster in the kubeconfig and exits non-zero if the
configuration is invalid, the suite could not be set up, or any specification failed.

!*/

use anyhow::{Context, Result};
use clap::Parser;
use efs_e2e_model::constants::DEFAULT_WORKER_INDEX;
use efs_e2e_model::{export_kubeconfig, EnvironmentData, RawConfiguration, ResolvedConfiguration};
use efs_e2e_suite::specs::default_specs;
use efs_e2e_suite::{
    ReportSettings, RunIdentity, SequentialEngine, SuiteBootstrapper, SuiteOutcome,
};
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use std::path::PathBuf;

/// Runs the EFS CSI driver end-to-end suite against a Kubernetes cluster.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Path to the kubeconfig file. Defaults to the KUBECONFIG environment variable, then
    /// `$HOME/.kube/config`.
    #[clap(long = "kubeconfig")]
    kubeconfig: Option<PathBuf>,

    /// The cluster name.
    #[clap(long = "cluster-name")]
    cluster_name: Option<String>,

    /// The region. Defaults to us-west-2.
    #[clap(long = "region")]
    region: Option<String>,

    /// The id of an existing file system.
    #[clap(long = "file-system-id")]
    file_system_id: Option<String>,

    /// Namespace of EFS driver pods. Defaults to kube-system.
    #[clap(long = "efs-driver-namespace")]
    efs_driver_namespace: Option<String>,

    /// Comma-separated label selectors for EFS driver pods, of the form key1=value1,key2=value2.
    /// Defaults to app=efs-csi-node.
    #[clap(long = "efs-driver-label-selectors")]
    efs_driver_label_selectors: Option<String>,

    /// Directory to write JUnit reports to. No JUnit report is written if omitted.
    #[clap(long = "report-dir")]
    report_dir: Option<PathBuf>,

    /// Prefix for the JUnit report file name.
    #[clap(long = "report-prefix", default_value = "")]
    report_prefix: String,

    /// Index of this parallel worker. Each worker writes its own report file.
    #[clap(long = "worker-index", default_value_t = DEFAULT_WORKER_INDEX)]
    worker_index: u32,

    /// Identifier of this run. A random UUID is used if omitted.
    #[clap(long = "run-id")]
    run_id: Option<String>,
}

impl Args {
    fn raw_configuration(&self) -> RawConfiguration {
        RawConfiguration {
            cluster_name: self.cluster_name.clone(),
            region: self.region.clone(),
            file_system_id: self.file_system_id.clone(),
            driver_namespace: self.efs_driver_namespace.clone(),
            driver_label_selectors: self.efs_driver_label_selectors.clone(),
            kubeconfig: self.kubeconfig.clone(),
        }
    }

    fn run_identity(&self) -> RunIdentity {
        match &self.run_id {
            Some(run_id) => RunIdentity::new(run_id, self.worker_index),
            None => RunIdentity::generate(self.worker_index),
        }
    }

    fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            report_dir: self.report_dir.clone(),
            report_prefix: self.report_prefix.clone(),
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    match run(args) {
        Ok(outcome) if outcome.succeeded() => {}
        Ok(outcome) => {
            eprintln!(
                "{} of {} specifications failed",
                outcome.failed,
                outcome.total()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
    }
}

/// Resolves the configuration on the main thread, then runs the suite on a tokio runtime.
fn run(args: Args) -> Result<SuiteOutcome> {
    let environment = EnvironmentData::from_env();
    let config = ResolvedConfiguration::assemble(args.raw_configuration(), &environment)
        .context("Unable to resolve the suite configuration")?;
    debug!(
        "Resolved configuration:\n{}",
        serde_json::to_string_pretty(&config)
            .unwrap_or_else(|e| format!("Serialization failed: {}", e))
    );
    // Kubernetes clients that only read `KUBECONFIG` must see the resolved path. This happens
    // before the runtime starts any threads.
    export_kubeconfig(config.kubeconfig());
    info!("Using kubeconfig '{}'", config.kubeconfig().display());

    let mut suite = SuiteBootstrapper::new(SequentialEngine::new());
    suite
        .configure(config, args.run_identity(), args.report_settings())
        .context("Unable to configure the suite")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to start the async runtime")?;
    runtime
        .block_on(suite.run(default_specs()))
        .context("The suite was aborted")
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for our crates only.
            Builder::new()
                .filter_level(LevelFilter::Error)
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .filter(Some("efs_e2e_model"), level)
                .filter(Some("efs_e2e_suite"), level)
                .init();
        }
    }
}
