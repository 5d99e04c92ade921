//! Engine entry: validate → select → build every command → walk the chain.
use std::path::PathBuf;

use crate::command::CommandBuilder;
use crate::config::SchedulerConfig;
use crate::error::PipelineError;
use crate::executor::{
    Backend, ClusterBackend, ExecutionTrace, JobChainExecutor, LocalBackend, TraceEmitter,
    TraceFormat,
};
use crate::pipeline::{select_steps, validate, RunConfiguration};

/// Settings that shape how a run is carried out but not what it runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub trace_format: TraceFormat,
    /// Where the local backend appends stage output.
    pub log_dir: PathBuf,
    pub scheduler: SchedulerConfig,
    pub run_id: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            trace_format: TraceFormat::default(),
            log_dir: PathBuf::from("."),
            scheduler: SchedulerConfig::default(),
            run_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Run the pipeline on the backend the configuration asks for.
pub async fn run_pipeline(
    config: &RunConfiguration,
    opts: &RunOptions,
) -> Result<ExecutionTrace, PipelineError> {
    if config.flags().no_cluster.is_on() {
        let backend = LocalBackend::new(&opts.log_dir);
        run_pipeline_with_backend(config, opts, &backend).await
    } else {
        let backend = ClusterBackend::new(opts.scheduler.clone());
        run_pipeline_with_backend(config, opts, &backend).await
    }
}

#[tracing::instrument(
    name = "pipeline.run",
    skip_all,
    fields(
        run_id = %opts.run_id,
        mode = %config.mode(),
        identifier = %config.identifier(),
        backend = backend.name()
    )
)]
pub async fn run_pipeline_with_backend(
    config: &RunConfiguration,
    opts: &RunOptions,
    backend: &dyn Backend,
) -> Result<ExecutionTrace, PipelineError> {
    validate(config)?;

    let codes = select_steps(config.steps(), config.mode());
    tracing::info!(steps = ?codes, "selected stages");

    let builder = CommandBuilder::new(config, &opts.scheduler);
    let steps = builder.build_all(&codes)?;

    let emitter = TraceEmitter::new(opts.trace_format, opts.run_id.clone());
    let executor = JobChainExecutor::new(backend, emitter, config.flags().verbose.is_on());
    let trace = executor.run(config, &steps).await?;

    tracing::info!(dispatched = trace.len(), "run finished");
    Ok(trace)
}
