use efs_e2e_model::constants::DEFAULT_WORKER_INDEX;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identifies one worker of one suite run. Report files are namespaced by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunIdentity {
    run_id: String,
    worker_index: u32,
}

impl RunIdentity {
    pub fn new<S>(run_id: S, worker_index: u32) -> Self
    where
        S: Into<String>,
    {
        Self {
            run_id: run_id.into(),
            worker_index,
        }
    }

    /// Creates an identity with a random run id.
    pub fn generate(worker_index: u32) -> Self {
        Self::new(Uuid::new_v4().to_string(), worker_index)
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn worker_index(&self) -> u32 {
        self.worker_index
    }
}

impl Default for RunIdentity {
    fn default() -> Self {
        Self::generate(DEFAULT_WORKER_INDEX)
    }
}

impl Display for RunIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.run_id, self.worker_index)
    }
}

#[test]
fn generated_run_ids_differ() {
    let a = RunIdentity::generate(1);
    let b = RunIdentity::generate(1);
    assert_ne!(a.run_id(), b.run_id());
    assert_eq!(a.worker_index(), 1);
}
