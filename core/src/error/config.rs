use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config section [{section}] must be a table")]
    NotATable { section: String },

    #[error("[{section}] qparam has unbalanced quotes: {value}")]
    SchedulerOverride { section: String, value: String },

    #[error("cannot resolve path '{path}': {reason}")]
    Path { path: String, reason: String },
}
