use thiserror::Error;

use super::{ChainError, ConfigError, ValidationReport};

/// Top-level error of the `pandora` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Pipeline(#[from] PipelineError),
    #[error("config error: {0}")]
    Config(String),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything that can stop a pipeline run, from config resolution to the
/// last submitted stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Validation(#[from] ValidationReport),
    #[error("{0}")]
    Chain(#[from] ChainError),
}

impl PipelineError {
    /// Process exit code for this error.
    ///
    /// Pre-execution failures exit with 1. A failed local stage hands its own
    /// exit code back to the caller.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) => 1,
            Self::Chain(e) => e.exit_code(),
        }
    }
}
