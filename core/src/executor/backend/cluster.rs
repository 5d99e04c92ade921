use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use super::{Backend, StepInvocation};
use crate::config::SchedulerConfig;
use crate::error::ChainError;
use crate::executor::handle::JobHandle;

/// Submits stages to the scheduler and returns at once.
pub struct ClusterBackend {
    scheduler: SchedulerConfig,
}

impl ClusterBackend {
    pub fn new(scheduler: SchedulerConfig) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl Backend for ClusterBackend {
    fn name(&self) -> &str {
        "cluster"
    }

    fn chains_jobs(&self) -> bool {
        true
    }

    fn command_for(&self, step: &StepInvocation<'_>, predecessor: &JobHandle) -> Vec<String> {
        let mut cmd = self.scheduler.submit_command.clone();
        cmd.push("-S".to_string());
        cmd.push(self.scheduler.interpreter.clone());
        cmd.extend(step.prefix.iter().cloned());
        if let Some(id) = predecessor.job_id() {
            cmd.push(self.scheduler.hold_flag.clone());
            cmd.push(id.to_string());
        }
        cmd.extend(step.payload.iter().cloned());
        cmd
    }

    async fn execute(&self, code: char, command: &[String]) -> Result<JobHandle, ChainError> {
        let (program, args) = command
            .split_first()
            .ok_or(ChainError::EmptyCommand { code })?;

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| ChainError::Spawn {
                code,
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ChainError::Submission {
                code,
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_job_id(&stdout) {
            Some(id) => Ok(JobHandle::Job(id)),
            None => Err(ChainError::MissingJobId {
                code,
                output: stdout.trim().to_string(),
            }),
        }
    }
}

fn submitted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Your job(?:-array)? (\d+)").expect("valid regex"))
}

fn leading_digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)").expect("valid regex"))
}

/// Job id from a scheduler response.
///
/// Understands `Your job 123 ("name") has been submitted`, the job-array
/// form `Your job-array 123.1-10:1 ...`, and the bare id printed with
/// `-terse`.
pub fn parse_job_id(output: &str) -> Option<String> {
    if let Some(caps) = submitted_re().captures(output) {
        return Some(caps[1].to_string());
    }
    output
        .split_whitespace()
        .find_map(|token| leading_digits_re().captures(token))
        .map(|caps| caps[1].to_string())
}
