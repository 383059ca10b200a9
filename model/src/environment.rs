/*!

The `environment` module reads the process environment once at startup and supplies the default
credential (kubeconfig) path when none was given explicitly.

!*/

use crate::constants::{ENV_HOME, ENV_KUBECONFIG, KUBECONFIG_FILENAME, KUBE_DIR};
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// A snapshot of the environment variables the harness cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentData {
    /// The value of `KUBECONFIG`, if set and non-empty.
    pub kubeconfig: Option<PathBuf>,
    /// The value of `HOME`. Empty when unset, which makes the default kubeconfig path relative.
    pub home: PathBuf,
}

impl EnvironmentData {
    pub fn from_env() -> Self {
        Self {
            kubeconfig: non_empty(std::env::var_os(ENV_KUBECONFIG)).map(PathBuf::from),
            home: std::env::var_os(ENV_HOME)
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    /// Resolves the kubeconfig path, preferring `explicit`, then `KUBECONFIG`, then
    /// `$HOME/.kube/config`.
    pub fn resolve_kubeconfig(&self, explicit: Option<&Path>) -> PathBuf {
        let explicit = explicit
            .filter(|path| !path.as_os_str().is_empty())
            .or(self.kubeconfig.as_deref());
        resolve_kubeconfig(explicit, &self.home)
    }
}

/// Returns `explicit` if it is non-empty, otherwise `home/.kube/config`.
pub fn resolve_kubeconfig(explicit: Option<&Path>, home: &Path) -> PathBuf {
    match explicit {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => default_kubeconfig(home),
    }
}

pub fn default_kubeconfig(home: &Path) -> PathBuf {
    home.join(KUBE_DIR).join(KUBECONFIG_FILENAME)
}

static EXPORT_KUBECONFIG: Once = Once::new();

/// Writes `path` to the `KUBECONFIG` environment variable for cluster clients that only read the
/// environment. Only the first call has an effect; call it once, before any other threads start.
pub fn export_kubeconfig(path: &Path) {
    EXPORT_KUBECONFIG.call_once(|| {
        debug!("Setting {} to '{}'", ENV_KUBECONFIG, path.display());
        std::env::set_var(ENV_KUBECONFIG, path);
    });
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|value| !value.is_empty())
}
