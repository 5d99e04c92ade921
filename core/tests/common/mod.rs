#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use pandora_core::api::{
    Backend, ChainError, ConfigResolver, ExecutionFlags, JobHandle, ModeParams, RunConfiguration,
    RunRequest, ScanParams, SchedulerConfig, StageSections,
};
use pandora_core::executor::StepInvocation;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scheduler stand-in: logs its argv and answers like SGE, numbering jobs
/// from 101.
pub fn fake_scheduler(dir: &Path) -> (SchedulerConfig, PathBuf) {
    let log = dir.join("submissions.log");
    let script = dir.join("qsub.sh");
    std::fs::write(
        &script,
        format!(
            "echo \"$*\" >> '{log}'\n\
             n=$(wc -l < '{log}' | tr -d ' ')\n\
             echo \"Your job $((100 + n)) (\\\"pandora\\\") has been submitted\"\n",
            log = log.display()
        ),
    )
    .unwrap();

    let scheduler = SchedulerConfig {
        submit_command: vec!["sh".to_string(), script.to_string_lossy().to_string()],
        ..SchedulerConfig::default()
    };
    (scheduler, log)
}

pub fn submissions(log: &Path) -> Vec<String> {
    std::fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Scan inputs that pass every stage-parameter check without touching disk.
pub fn scan_params() -> ScanParams {
    ScanParams {
        bam: Some("/data/S1.bam".into()),
        blastdb: Some("/db/nt".into()),
        noerror: true,
        ..ScanParams::default()
    }
}

pub fn resolve(
    steps: &str,
    flags: ExecutionFlags,
    params: ModeParams,
    scripts_dir: &Path,
) -> RunConfiguration {
    ConfigResolver::resolve_with_sections(
        RunRequest {
            identifier: "S1".to_string(),
            config_path: None,
            steps: Some(steps.to_string()),
            flags,
            params,
            scripts_dir: scripts_dir.to_path_buf(),
        },
        &StageSections::default(),
    )
    .unwrap()
}

/// Records commands instead of running them.
#[derive(Default)]
pub struct RecordingBackend {
    pub seen: Mutex<Vec<Vec<String>>>,
}

impl RecordingBackend {
    pub fn dispatched(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn chains_jobs(&self) -> bool {
        false
    }

    fn command_for(&self, step: &StepInvocation<'_>, _predecessor: &JobHandle) -> Vec<String> {
        step.payload.to_vec()
    }

    async fn execute(&self, _code: char, command: &[String]) -> Result<JobHandle, ChainError> {
        self.seen.lock().unwrap().push(command.to_vec());
        Ok(JobHandle::NoPredecessor)
    }
}
