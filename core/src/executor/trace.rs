use serde::Serialize;

use super::handle::JobHandle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub stage: char,
    pub job: JobHandle,
    /// Exactly what was run or submitted.
    pub command: Vec<String>,
}

/// Stages dispatched by one run, in dispatch order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionTrace {
    entries: Vec<TraceEntry>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stages(&self) -> Vec<char> {
        self.entries.iter().map(|e| e.stage).collect()
    }

    /// Handle of the last dispatched stage.
    pub fn last_job(&self) -> Option<&JobHandle> {
        self.entries.last().map(|e| &e.job)
    }
}
