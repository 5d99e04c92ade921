//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `pandora_core::api` instead of reaching into internal modules.

pub use crate::command::{CommandBuilder, StepDefinition};
pub use crate::config::{
    get_pandora_data_dir, load_default, AppConfig, LoggingConfig, PipelineConfig,
    SchedulerConfig, StageSections,
};
pub use crate::engine::{run_pipeline, run_pipeline_with_backend, RunOptions};
pub use crate::error::{
    ChainError, CliError, ConfigError, PipelineError, ValidationError, ValidationReport,
};
pub use crate::executor::{
    Backend, ClusterBackend, ExecutionTrace, JobHandle, LocalBackend, TraceEntry, TraceFormat,
};
pub use crate::pipeline::{
    resolve_scripts_dir, select_steps, validate, AggregateParams, ConfigResolver,
    ExecutionFlags, Mode, ModeParams, RunConfiguration, RunRequest, ScanParams, Switch,
    DEFAULT_SCRIPTS_DIR, DEFAULT_SUFFIX_REPORT, DEFAULT_SUFFIX_STATS,
};
