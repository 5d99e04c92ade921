use std::fmt;

use serde::{Serialize, Serializer};

/// Scheduler token the next submission holds on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobHandle {
    /// First stage, or any stage run locally.
    #[default]
    NoPredecessor,
    Job(String),
}

impl JobHandle {
    pub fn job_id(&self) -> Option<&str> {
        match self {
            JobHandle::NoPredecessor => None,
            JobHandle::Job(id) => Some(id),
        }
    }

    pub fn is_job(&self) -> bool {
        matches!(self, JobHandle::Job(_))
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobHandle::NoPredecessor => f.write_str("0"),
            JobHandle::Job(id) => f.write_str(id),
        }
    }
}

impl Serialize for JobHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JobHandle::NoPredecessor => serializer.serialize_none(),
            JobHandle::Job(id) => serializer.serialize_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_prints_as_zero_and_serializes_as_null() {
        let none = JobHandle::default();
        assert_eq!(none.to_string(), "0");
        assert_eq!(serde_json::to_string(&none).unwrap(), "null");
        assert_eq!(none.job_id(), None);

        let job = JobHandle::Job("4711".into());
        assert_eq!(job.to_string(), "4711");
        assert_eq!(serde_json::to_string(&job).unwrap(), "\"4711\"");
        assert!(job.is_job());
    }
}
