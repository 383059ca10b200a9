// Flag defaults
pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_DRIVER_NAMESPACE: &str = "kube-system";
pub const DEFAULT_DRIVER_LABEL_SELECTORS: &str = "app=efs-csi-node";
pub const DEFAULT_WORKER_INDEX: u32 = 1;

// Selector syntax
pub const ENTRY_DELIMITER: char = ',';
pub const KEY_VALUE_DELIMITER: char = '=';
pub const EXPECTED_SELECTOR_TOKENS: usize = 2;

// Environment variables
pub const ENV_HOME: &str = "HOME";
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";

// Paths, relative to the user's home directory
pub const KUBE_DIR: &str = ".kube";
pub const KUBECONFIG_FILENAME: &str = "config";

// Reporting
pub const SUITE_NAME: &str = "EFS CSI Suite";
pub const REPORT_FILE_STEM: &str = "junit_";
pub const REPORT_FILE_EXTENSION: &str = "xml";

#[test]
fn default_selectors_use_entry_syntax() {
    let mut parts = DEFAULT_DRIVER_LABEL_SELECTORS.split(KEY_VALUE_DELIMITER);
    assert_eq!(Some("app"), parts.next());
    assert_eq!(Some("efs-csi-node"), parts.next());
    assert_eq!(None, parts.next());
}
