//! Where a stage goes once its command is built.
mod cluster;
mod local;

pub use cluster::{parse_job_id, ClusterBackend};
pub use local::{LocalBackend, STEP_STDERR_LOG, STEP_STDOUT_LOG};

use async_trait::async_trait;

use super::handle::JobHandle;
use crate::error::ChainError;

/// Pieces of one stage invocation after the prefix rule is applied.
#[derive(Debug, Clone, Copy)]
pub struct StepInvocation<'a> {
    pub code: char,
    pub prefix: &'a [String],
    pub payload: &'a [String],
}

#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    /// True when dispatch returns a handle later stages must hold on.
    fn chains_jobs(&self) -> bool;

    /// Full argv for a stage, given the handle of its predecessor.
    fn command_for(&self, step: &StepInvocation<'_>, predecessor: &JobHandle) -> Vec<String>;

    /// Run or submit `command`. Returns the handle the next stage holds on.
    async fn execute(&self, code: char, command: &[String]) -> Result<JobHandle, ChainError>;
}
