use std::fmt;

use thiserror::Error;

/// One pre-flight finding. Any of these keeps every stage from running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input file {path} is {reason}")]
    MissingInput { path: String, reason: &'static str },

    #[error("{file}: {}", gzip_hint(.declared))]
    GzipMismatch { file: String, declared: bool },

    #[error("{file}: files passed with {flag} must have {expected} extension")]
    BadExtension {
        file: String,
        flag: &'static str,
        expected: &'static str,
    },

    #[error("Step {stage}: {message}")]
    MissingParameter { stage: char, message: String },

    #[error("identifier '{identifier}' must be 1 to {max} characters")]
    InvalidIdentifier { identifier: String, max: usize },

    #[error("'{code}' is not a {mode} step")]
    UnknownStage { code: char, mode: &'static str },
}

fn gzip_hint(declared: &bool) -> &'static str {
    if *declared {
        "with --gzip, input files must have .gz extension"
    } else {
        "file has .gz extension: use --gzip"
    }
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing_input",
            Self::GzipMismatch { .. } => "gzip_mismatch",
            Self::BadExtension { .. } => "bad_extension",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::InvalidIdentifier { .. } => "invalid_identifier",
            Self::UnknownStage { .. } => "unknown_stage",
        }
    }
}

/// All findings of one validation pass, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[ERROR] {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_error_on_its_own_line() {
        let report = ValidationReport::new(vec![
            ValidationError::GzipMismatch {
                file: "x.fastq.gz".into(),
                declared: false,
            },
            ValidationError::MissingParameter {
                stage: '3',
                message: "need --blastdb argument".into(),
            },
        ]);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "[ERROR] x.fastq.gz: file has .gz extension: use --gzip"
        );
        assert_eq!(lines[1], "[ERROR] Step 3: need --blastdb argument");
    }

    #[test]
    fn kinds_are_stable() {
        let err = ValidationError::BadExtension {
            file: "reads.sam".into(),
            flag: "--bam",
            expected: ".bam",
        };
        assert_eq!(err.kind(), "bad_extension");
        assert_eq!(
            err.to_string(),
            "reads.sam: files passed with --bam must have .bam extension"
        );
    }
}
