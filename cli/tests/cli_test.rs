use assert_cmd::Command;

fn efs_e2e() -> Command {
    let mut cmd = Command::cargo_bin("efs-e2e").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("KUBECONFIG");
    cmd
}

#[test]
fn help() {
    let output = efs_e2e().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--efs-driver-label-selectors"));
    assert!(stdout.contains("--report-dir"));
}

#[test]
fn malformed_selectors_exit_before_running() {
    let tmp = tempfile::tempdir().unwrap();
    let report_dir = tmp.path().join("reports");
    let output = efs_e2e()
        .args(["--efs-driver-label-selectors", "app=efs-csi-node,badtoken"])
        .arg("--report-dir")
        .arg(&report_dir)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse combined EFS driver label selectors"));
    assert!(stderr.contains("badtoken"));
    // Nothing ran, so not even the report directory exists.
    assert!(!report_dir.exists());
}

#[test]
fn empty_selectors_are_rejected() {
    let output = efs_e2e()
        .args(["--efs-driver-label-selectors", ""])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn report_directory_over_a_file_aborts() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("not-a-dir");
    std::fs::write(&file, "").unwrap();
    let output = efs_e2e()
        .arg("--kubeconfig")
        .arg(tmp.path().join("kubeconfig"))
        .arg("--report-dir")
        .arg(&file)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed creating report directory"));
}

/// Without a reachable cluster the built-in specification fails, but the suite still completes and
/// writes its report.
#[test]
fn unreachable_cluster_fails_the_run_and_writes_a_report() {
    let tmp = tempfile::tempdir().unwrap();
    let report_dir = tmp.path().join("reports");
    let output = efs_e2e()
        .arg("--kubeconfig")
        .arg(tmp.path().join("missing-kubeconfig"))
        .arg("--report-dir")
        .arg(&report_dir)
        .args(["--report-prefix", "efs-", "--worker-index", "3"])
        .args(["--run-id", "cli-test"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 1 specifications failed"));

    let xml = std::fs::read_to_string(report_dir.join("junit_efs-03.xml")).unwrap();
    assert!(xml.contains("EFS CSI Suite"));
    assert!(xml.contains("cli-test"));
    assert!(xml.contains("missing-kubeconfig"));
}
