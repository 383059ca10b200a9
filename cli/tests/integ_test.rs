#![cfg(feature = "integ")]
use assert_cmd::Command;
use selftest::Cluster;
use std::collections::BTreeMap;
use tokio::time::Duration;

const POD_TIMEOUT: Duration = Duration::from_secs(300);
const NAMESPACE: &str = "kube-system";

#[tokio::test]
async fn driver_pods_running() {
    let cluster = Cluster::new("efs-e2e-integ").unwrap();
    let labels: BTreeMap<String, String> = [
        ("app".to_string(), "efs-csi-node".to_string()),
        ("tier".to_string(), "storage".to_string()),
    ]
    .into_iter()
    .collect();
    cluster
        .create_labeled_pod(NAMESPACE, "efs-csi-node-integ", labels)
        .await
        .unwrap();
    cluster
        .wait_for_running_pods(NAMESPACE, "app=efs-csi-node,tier=storage", POD_TIMEOUT)
        .await
        .unwrap();

    let report_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("efs-e2e").unwrap();
    cmd.args([
        "--kubeconfig",
        cluster.kubeconfig().to_str().unwrap(),
        "--efs-driver-label-selectors",
        "app=efs-csi-node,tier=storage",
        "--report-dir",
        report_dir.path().to_str().unwrap(),
    ]);
    cmd.assert().success();
    assert!(report_dir.path().join("junit_01.xml").is_file());

    // No pod carries this label, so the run completes with a failure.
    let mut cmd = Command::cargo_bin("efs-e2e").unwrap();
    cmd.args([
        "--kubeconfig",
        cluster.kubeconfig().to_str().unwrap(),
        "--efs-driver-label-selectors",
        "app=not-a-driver",
    ]);
    cmd.assert().failure();
}
