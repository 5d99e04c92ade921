use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{Backend, StepInvocation};
use crate::error::ChainError;
use crate::executor::handle::JobHandle;

pub const STEP_STDOUT_LOG: &str = "log.o.steps";
pub const STEP_STDERR_LOG: &str = "log.e.steps";

/// Runs each stage to completion in the foreground.
pub struct LocalBackend {
    log_dir: PathBuf,
}

impl LocalBackend {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    fn open_log(&self, code: char, name: &str) -> Result<File, ChainError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_dir.join(name))
            .map_err(|source| ChainError::Log { code, source })
    }
}

#[async_trait]
impl Backend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    fn chains_jobs(&self) -> bool {
        false
    }

    fn command_for(&self, step: &StepInvocation<'_>, _predecessor: &JobHandle) -> Vec<String> {
        step.payload.to_vec()
    }

    async fn execute(&self, code: char, command: &[String]) -> Result<JobHandle, ChainError> {
        let (program, args) = command
            .split_first()
            .ok_or(ChainError::EmptyCommand { code })?;

        let stdout = self.open_log(code, STEP_STDOUT_LOG)?;
        let stderr = self.open_log(code, STEP_STDERR_LOG)?;

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .await
            .map_err(|source| ChainError::Spawn {
                code,
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ChainError::FatalStep {
                code,
                exit_code: status.code().unwrap_or(-1),
            });
        }
        Ok(JobHandle::NoPredecessor)
    }
}
