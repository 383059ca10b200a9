use crate::constants::{DEFAULT_DRIVER_LABEL_SELECTORS, DEFAULT_DRIVER_NAMESPACE, DEFAULT_REGION};
use crate::environment::EnvironmentData;
use crate::error::Result;
use crate::selector::LabelSelectorSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The unvalidated input collected from command line flags. `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfiguration {
    pub cluster_name: Option<String>,
    pub region: Option<String>,
    pub file_system_id: Option<String>,
    pub driver_namespace: Option<String>,
    /// The combined selector string, e.g. `app=efs-csi-node,tier=storage`.
    pub driver_label_selectors: Option<String>,
    pub kubeconfig: Option<PathBuf>,
}

impl RawConfiguration {
    /// The selector string to parse, falling back to `app=efs-csi-node`.
    pub fn driver_label_selectors(&self) -> &str {
        self.driver_label_selectors
            .as_deref()
            .unwrap_or(DEFAULT_DRIVER_LABEL_SELECTORS)
    }
}

/// The validated configuration shared, read-only, by everything that runs after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfiguration {
    cluster_name: Option<String>,
    region: String,
    file_system_id: Option<String>,
    driver_namespace: String,
    driver_label_selectors: LabelSelectorSet,
    kubeconfig: PathBuf,
}

impl ResolvedConfiguration {
    /// Parses the selector string in `raw` and assembles the configuration. Fails if the selector
    /// string is malformed.
    pub fn assemble(raw: RawConfiguration, environment: &EnvironmentData) -> Result<Self> {
        let selectors = LabelSelectorSet::parse(raw.driver_label_selectors())?;
        Ok(Self::from_parts(raw, selectors, environment))
    }

    /// Assembles the configuration from already-parsed selectors. `raw.driver_label_selectors`
    /// is ignored.
    pub fn from_parts(
        raw: RawConfiguration,
        driver_label_selectors: LabelSelectorSet,
        environment: &EnvironmentData,
    ) -> Self {
        let kubeconfig = environment.resolve_kubeconfig(raw.kubeconfig.as_deref());
        Self {
            cluster_name: raw.cluster_name.filter(|s| !s.is_empty()),
            region: raw.region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            file_system_id: raw.file_system_id.filter(|s| !s.is_empty()),
            driver_namespace: raw
                .driver_namespace
                .unwrap_or_else(|| DEFAULT_DRIVER_NAMESPACE.to_string()),
            driver_label_selectors,
            kubeconfig,
        }
    }

    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn file_system_id(&self) -> Option<&str> {
        self.file_system_id.as_deref()
    }

    pub fn driver_namespace(&self) -> &str {
        &self.driver_namespace
    }

    pub fn driver_label_selectors(&self) -> &LabelSelectorSet {
        &self.driver_label_selectors
    }

    pub fn kubeconfig(&self) -> &Path {
        &self.kubeconfig
    }
}
