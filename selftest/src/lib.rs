/*!

Provides utilities for testing the EFS CSI end-to-end suite against a throwaway `kind` cluster.
We call this testing modality `selftest` to distinguish it from the suite's own specifications.

!*/

pub mod cluster;
mod test_settings;

pub use cluster::Cluster;
