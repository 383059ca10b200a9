/*!

This library resolves the configuration of the EFS CSI driver end-to-end suite: the credential
path, the target cluster and file system, and the label selectors used to find the driver pods.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use configuration::{RawConfiguration, ResolvedConfiguration};
pub use environment::{default_kubeconfig, export_kubeconfig, resolve_kubeconfig, EnvironmentData};
pub use error::{Error, Result};
pub use selector::{LabelSelectorSet, SelectorParser};

mod configuration;
pub mod constants;
mod environment;
mod error;
mod selector;
