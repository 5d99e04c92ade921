use super::backend::{Backend, StepInvocation};
use super::handle::JobHandle;
use super::output::TraceEmitter;
use super::trace::{ExecutionTrace, TraceEntry};
use crate::command::StepDefinition;
use crate::error::ChainError;
use crate::pipeline::RunConfiguration;

/// Prefix a stage is submitted with.
///
/// A `qparam` override from the run config replaces the built prefix
/// entirely. Otherwise the built prefix is used,
/// followed by the resource request under the hpc profile.
pub fn submission_prefix(step: &StepDefinition, config: &RunConfiguration) -> Vec<String> {
    if let Some(custom) = config.scheduler_override(step.code) {
        return custom.to_vec();
    }
    let mut prefix = step.submit_prefix.clone();
    if config.flags().hpc.is_on() {
        if let Some(resources) = &step.resources {
            prefix.extend(resources.iter().cloned());
        }
    }
    prefix
}

/// Walks the selected stages strictly in order, one at a time.
pub struct JobChainExecutor<'a> {
    backend: &'a dyn Backend,
    emitter: TraceEmitter,
    verbose: bool,
}

impl<'a> JobChainExecutor<'a> {
    pub fn new(backend: &'a dyn Backend, emitter: TraceEmitter, verbose: bool) -> Self {
        Self {
            backend,
            emitter,
            verbose,
        }
    }

    pub async fn run(
        &self,
        config: &RunConfiguration,
        steps: &[StepDefinition],
    ) -> Result<ExecutionTrace, ChainError> {
        let mut trace = ExecutionTrace::new();
        let mut predecessor = JobHandle::NoPredecessor;

        for step in steps {
            if step.payload.is_empty() {
                return Err(ChainError::EmptyCommand { code: step.code });
            }
            let prefix = submission_prefix(step, config);
            let invocation = StepInvocation {
                code: step.code,
                prefix: &prefix,
                payload: &step.payload,
            };
            let command = self.backend.command_for(&invocation, &predecessor);

            tracing::info!(
                stage = %step.code,
                job = %step.job_name,
                backend = self.backend.name(),
                "dispatching stage"
            );
            tracing::debug!(command = %command.join(" "), "stage command");
            if self.verbose {
                self.emitter.echo_command(&command);
            }

            let handle = match self.backend.execute(step.code, &command).await {
                Ok(handle) => handle,
                Err(e) => {
                    tracing::error!(stage = %step.code, "aborting run: {}", e);
                    return Err(e);
                }
            };

            if self.backend.chains_jobs() {
                predecessor = handle.clone();
            }
            let entry = TraceEntry {
                stage: step.code,
                job: handle,
                command,
            };
            if self.backend.chains_jobs() {
                self.emitter.emit(&entry);
            }
            trace.push(entry);
        }

        Ok(trace)
    }
}
