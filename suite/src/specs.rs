/*!

Specifications that ship with the suite.

!*/

use crate::k8s::{driver_pods, k8s_client, pod_phase};
use crate::{SpecContext, Specification, SpecificationFailure};
use async_trait::async_trait;
use kube::ResourceExt;
use log::info;

const RUNNING: &str = "Running";

/// The specifications the `efs-e2e` binary runs.
pub fn default_specs() -> Vec<Box<dyn Specification>> {
    vec![Box::new(DriverPodsRunning)]
}

/// Passes when at least one pod in the driver namespace matches the label selectors and every
/// matching pod is in the `Running` phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct DriverPodsRunning;

#[async_trait]
impl Specification for DriverPodsRunning {
    fn name(&self) -> &str {
        "EFS CSI driver pods matching the label selectors are running"
    }

    async fn run(&self, context: &SpecContext) -> Result<(), SpecificationFailure> {
        let config = &context.config;
        let client = k8s_client(config.kubeconfig())
            .await
            .map_err(|e| SpecificationFailure::new(e.to_string()))?;
        let selectors = config.driver_label_selectors();
        let pods = driver_pods(client, config.driver_namespace(), selectors)
            .await
            .map_err(|e| {
                SpecificationFailure::new(format!(
                    "Unable to list pods in namespace '{}': {}",
                    config.driver_namespace(),
                    e
                ))
            })?;

        if pods.is_empty() {
            return Err(SpecificationFailure::new(format!(
                "No pods in namespace '{}' match '{}'",
                config.driver_namespace(),
                selectors
            )));
        }

        let not_running: Vec<String> = pods
            .iter()
            .filter(|pod| pod_phase(pod) != RUNNING)
            .map(|pod| format!("{} ({})", pod.name_any(), pod_phase(pod)))
            .collect();
        if !not_running.is_empty() {
            return Err(SpecificationFailure::new(format!(
                "Driver pods not running: {}",
                not_running.join(", ")
            )));
        }

        info!(
            "{} driver pods running in namespace '{}'",
            pods.len(),
            config.driver_namespace()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RunIdentity;
    use efs_e2e_model::{EnvironmentData, RawConfiguration, ResolvedConfiguration};
    use std::path::PathBuf;

    #[tokio::test]
    async fn unreachable_cluster_is_a_specification_failure() {
        let raw = RawConfiguration {
            kubeconfig: Some(PathBuf::from("/nonexistent/kubeconfig")),
            ..RawConfiguration::default()
        };
        let config = ResolvedConfiguration::assemble(raw, &EnvironmentData::default()).unwrap();
        let context = SpecContext::new(config, RunIdentity::new("run", 1));
        let failure = DriverPodsRunning.run(&context).await.unwrap_err();
        assert!(failure.message.contains("/nonexistent/kubeconfig"));
    }
}
