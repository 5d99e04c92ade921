use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "pandora_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// How jobs are handed to the cluster scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Program (plus leading arguments) used to submit a job.
    #[serde(default = "default_submit_command")]
    pub submit_command: Vec<String>,

    /// Interpreter passed with `-S`; stage programs are python scripts.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Flag naming the single predecessor a job waits on.
    #[serde(default = "default_hold_flag")]
    pub hold_flag: String,
}

fn default_submit_command() -> Vec<String> {
    vec!["qsub".to_string()]
}

fn default_interpreter() -> String {
    "/usr/bin/python".to_string()
}

fn default_hold_flag() -> String {
    "-hold_jid".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            submit_command: default_submit_command(),
            interpreter: default_interpreter(),
            hold_flag: default_hold_flag(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    /// Install directory holding `scripts/` and `resources/`.
    #[serde(default)]
    pub scripts_dir: Option<String>,
}
