use crate::error::{self, ClientError};
use efs_e2e_model::LabelSelectorSet;
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use snafu::ResultExt;
use std::path::Path;

/// Creates a Kubernetes client from the kubeconfig at `path`.
pub async fn k8s_client(path: &Path) -> Result<Client, ClientError> {
    let kubeconfig = Kubeconfig::read_from(path).context(error::KubeconfigReadSnafu { path })?;
    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .context(error::KubeconfigLoadSnafu { path })?;
    Client::try_from(config).context(error::ClientCreateSnafu)
}

/// Lists the pods in `namespace` that carry every label in `selectors`.
pub async fn driver_pods(
    client: Client,
    namespace: &str,
    selectors: &LabelSelectorSet,
) -> Result<Vec<Pod>, kube::Error> {
    let pod_api = Api::<Pod>::namespaced(client, namespace);
    let pods = pod_api
        .list(&ListParams {
            label_selector: Some(selectors.to_label_selector()),
            ..Default::default()
        })
        .await?;
    Ok(pods.items)
}

/// The pod's phase, or an empty string if it has not been reported.
pub fn pod_phase(pod: &Pod) -> &str {
    pod.status
        .as_ref()
        .and_then(|status| status.phase.as_deref())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use k8s_openapi::api::core::v1::PodStatus;

    #[test]
    fn phase_of_pod() {
        let mut pod = Pod::default();
        assert_eq!(pod_phase(&pod), "");
        pod.status = Some(PodStatus {
            phase: Some("Running".to_string()),
            ..Default::default()
        });
        assert_eq!(pod_phase(&pod), "Running");
    }

    #[tokio::test]
    async fn missing_kubeconfig() {
        // `kube::Client` is not `Debug`, so `unwrap_err` is unavailable.
        let err = match k8s_client(Path::new("/nonexistent/kubeconfig")).await {
            Err(e) => e,
            Ok(_) => panic!("a missing kubeconfig produced a client"),
        };
        assert!(matches!(err, ClientError::KubeconfigRead { .. }));
        assert!(err.to_string().contains("/nonexistent/kubeconfig"));
    }
}
