use serde::Deserialize;

/// Test settings provides a way to send arguments into the Rust tests using environment variables.
pub(super) struct TestSettings {}

impl TestSettings {
    /// The path or name of the `kind` binary.
    pub(super) fn kind_path() -> &'static str {
        TEST_SETTINGS.kind_path.as_str()
    }

    /// The image used to stand in for EFS driver pods.
    pub(super) fn pod_image() -> &'static str {
        TEST_SETTINGS.pod_image.as_str()
    }
}

#[derive(Debug, Deserialize)]
struct Inner {
    /// The path to the [kind] binary. Defaults to `kind` (i.e. by default the kind binary is
    /// expected to be found via `$PATH`).
    ///
    /// # Example
    ///
    /// ```text
    /// EFS_E2E_SELFTEST_KIND_PATH=/wherever/kind
    /// ```
    ///
    /// [kind]: https://kind.sigs.k8s.io/
    #[serde(default = "kind")]
    kind_path: String,

    /// The image run by the pods that stand in for the EFS driver. It must already be present on
    /// the kind nodes or be pullable by them.
    #[serde(default = "pause")]
    pod_image: String,
}

lazy_static::lazy_static! {
    static ref TEST_SETTINGS: Inner =
        envy::prefixed("EFS_E2E_SELFTEST_")
            .from_env::<Inner>()
            .expect("Error parsing TestSettings environment variables");
}

/// We need these to provide defaults for serde.
fn kind() -> String {
    String::from("kind")
}

fn pause() -> String {
    String::from("registry.k8s.io/pause:3.9")
}
