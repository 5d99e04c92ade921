use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::Serialize;

use super::trace::TraceEntry;

/// How dispatched stages are reported on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    /// `Step 3, jid = 4711`
    #[default]
    Text,
    /// One `step.submitted` event per line.
    Jsonl,
}

impl TraceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceFormat::Text => "text",
            TraceFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for TraceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(TraceFormat::Text),
            "jsonl" => Ok(TraceFormat::Jsonl),
            other => Err(format!("unknown trace format '{other}' (expected text|jsonl)")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepEvent<'a> {
    pub v: i32,
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub ts: String,
    pub run_id: &'a str,
    pub stage: String,
    pub job_id: Option<&'a str>,
    pub command: &'a [String],
}

pub const STEP_SUBMITTED: &str = "step.submitted";

pub fn format_text(entry: &TraceEntry) -> String {
    format!("Step {}, jid = {}", entry.stage, entry.job)
}

pub fn format_jsonl(entry: &TraceEntry, run_id: &str) -> String {
    let event = StepEvent {
        v: 1,
        event_type: STEP_SUBMITTED,
        ts: Local::now().to_rfc3339(),
        run_id,
        stage: entry.stage.to_string(),
        job_id: entry.job.job_id(),
        command: &entry.command,
    };
    serde_json::to_string(&event).unwrap_or_else(|e| {
        tracing::warn!("failed to serialize trace event: {}", e);
        format_text(entry)
    })
}

/// Writes trace lines for one run.
#[derive(Debug, Clone)]
pub struct TraceEmitter {
    format: TraceFormat,
    run_id: String,
}

impl TraceEmitter {
    pub fn new(format: TraceFormat, run_id: impl Into<String>) -> Self {
        Self {
            format,
            run_id: run_id.into(),
        }
    }

    pub fn render(&self, entry: &TraceEntry) -> String {
        match self.format {
            TraceFormat::Text => format_text(entry),
            TraceFormat::Jsonl => format_jsonl(entry, &self.run_id),
        }
    }

    pub fn emit(&self, entry: &TraceEntry) {
        println!("{}", self.render(entry));
    }

    /// Echo a command before it runs (verbose mode).
    pub fn echo_command(&self, command: &[String]) {
        if self.format == TraceFormat::Text {
            println!("{}", command.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::JobHandle;

    fn entry() -> TraceEntry {
        TraceEntry {
            stage: '3',
            job: JobHandle::Job("4711".into()),
            command: vec!["qsub".into(), "-hold_jid".into(), "4710".into()],
        }
    }

    #[test]
    fn text_line_matches_classic_output() {
        assert_eq!(format_text(&entry()), "Step 3, jid = 4711");
    }

    #[test]
    fn jsonl_event_carries_stage_and_job() {
        let line = format_jsonl(&entry(), "run-1");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["type"], STEP_SUBMITTED);
        assert_eq!(value["run_id"], "run-1");
        assert_eq!(value["stage"], "3");
        assert_eq!(value["job_id"], "4711");
        assert_eq!(value["command"][1], "-hold_jid");
        assert!(value["ts"].as_str().is_some());
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JSONL".parse::<TraceFormat>().unwrap(), TraceFormat::Jsonl);
        assert_eq!("text".parse::<TraceFormat>().unwrap(), TraceFormat::Text);
        assert!("yaml".parse::<TraceFormat>().is_err());
    }
}
