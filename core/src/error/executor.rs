use thiserror::Error;

/// Errors raised while walking the job chain. All of them abort the run.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Step {code} failed with exit code {exit_code}")]
    FatalStep { code: char, exit_code: i32 },

    #[error("Step {code}: failed to spawn '{program}': {source}")]
    Spawn {
        code: char,
        program: String,
        source: std::io::Error,
    },

    #[error("Step {code}: scheduler rejected submission (exit {exit_code}): {stderr}")]
    Submission {
        code: char,
        exit_code: i32,
        stderr: String,
    },

    #[error("Step {code}: no job id in scheduler response: {output:?}")]
    MissingJobId { code: char, output: String },

    #[error("Step {code}: log file error: {source}")]
    Log {
        code: char,
        source: std::io::Error,
    },

    #[error("Step {code} is not defined for this mode")]
    UnknownStage { code: char },

    #[error("Step {code} has an empty command")]
    EmptyCommand { code: char },
}

impl ChainError {
    pub fn exit_code(&self) -> i32 {
        // 1..: a local stage's own status
        // 20: spawn / scheduler / IO failures
        match self {
            Self::FatalStep { exit_code, .. } => *exit_code,
            Self::Spawn { .. }
            | Self::Submission { .. }
            | Self::MissingJobId { .. }
            | Self::Log { .. } => 20,
            Self::UnknownStage { .. } | Self::EmptyCommand { .. } => 1,
        }
    }
}
