//! Sequential job-chain execution.
//!
//! ```text
//! Vec<StepDefinition>
//!   ↓
//! submission_prefix()  (qparam override | built prefix + hpc resources)
//!   ↓
//! Backend::command_for()  (cluster: qsub -S .. <prefix> [-hold_jid <prev>] <payload>)
//!   ↓
//! Backend::execute() → JobHandle
//!   ↓
//! ExecutionTrace (+ text / jsonl line per submitted stage)
//! ```
//!
//! Exactly one stage is in flight at a time. The handle of the previous
//! cluster submission is the only state carried between stages.

pub mod backend;
mod chain;
mod handle;
mod output;
mod trace;

pub use backend::{
    parse_job_id, Backend, ClusterBackend, LocalBackend, StepInvocation, STEP_STDERR_LOG,
    STEP_STDOUT_LOG,
};
pub use chain::{submission_prefix, JobChainExecutor};
pub use handle::JobHandle;
pub use output::{format_jsonl, format_text, StepEvent, TraceEmitter, TraceFormat, STEP_SUBMITTED};
pub use trace::{ExecutionTrace, TraceEntry};
