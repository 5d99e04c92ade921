//! Pre-flight checks. Every finding is collected so the user sees them all
//! at once; none of them lets a stage start.
use std::path::Path;

use super::mode::Mode;
use super::params::{is_set, set_value, AggregateParams, ModeParams, ScanParams};
use super::resolve::RunConfiguration;
use crate::error::{ValidationError, ValidationReport};

/// Job names carry the identifier; the scheduler truncates long names.
pub const MAX_IDENTIFIER_LEN: usize = 5;

pub fn validate(config: &RunConfiguration) -> Result<(), ValidationReport> {
    let mut errors = Vec::new();

    check_identifier(config.identifier(), &mut errors);
    check_stage_codes(config.steps(), config.mode(), &mut errors);

    match config.params() {
        ModeParams::Scan(params) => {
            check_scan_parameters(config.steps(), params, &mut errors);
            if !params.noerror {
                check_scan_inputs(params, &mut errors);
            }
        }
        ModeParams::Aggregate(params) => check_aggregate(params),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for err in &errors {
            tracing::debug!(kind = err.kind(), "{err}");
        }
        Err(ValidationReport::new(errors))
    }
}

fn check_identifier(identifier: &str, errors: &mut Vec<ValidationError>) {
    let len = identifier.chars().count();
    if len == 0 || len > MAX_IDENTIFIER_LEN {
        errors.push(ValidationError::InvalidIdentifier {
            identifier: identifier.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }
}

fn check_stage_codes(steps: &str, mode: Mode, errors: &mut Vec<ValidationError>) {
    let mut reported = Vec::new();
    for code in steps.chars() {
        if mode.stage(code).is_none() && !reported.contains(&code) {
            reported.push(code);
            errors.push(ValidationError::UnknownStage {
                code,
                mode: mode.name(),
            });
        }
    }
}

fn check_scan_parameters(steps: &str, p: &ScanParams, errors: &mut Vec<ValidationError>) {
    let selected = |code: char| steps.contains(code);
    let has_bam = is_set(&p.bam);

    if selected('1') {
        let paired = is_set(&p.mate1) && is_set(&p.mate2);
        let single = p.single.is_on() && (is_set(&p.mate1) || has_bam);
        if !(paired || has_bam || single) {
            errors.push(ValidationError::MissingParameter {
                stage: '1',
                message: "need --mate1 and --mate2 arguments OR --bam argument OR --single argument"
                    .to_string(),
            });
        }
        if !has_bam && !(is_set(&p.refstar) && is_set(&p.refbowtie)) {
            errors.push(ValidationError::MissingParameter {
                stage: '1',
                message: "need --refstar and --refbowtie arguments".to_string(),
            });
        }
    }

    if selected('3') && !is_set(&p.blastdb) {
        errors.push(ValidationError::MissingParameter {
            stage: '3',
            message: "need --blastdb argument".to_string(),
        });
    }

    if selected('4') {
        if p.orfblast.is_on() && !is_set(&p.pblastdb) {
            errors.push(ValidationError::MissingParameter {
                stage: '4',
                message: "need --pblastdb argument if blasting ORFs".to_string(),
            });
        } else if !p.orfblast.is_on() && is_set(&p.pblastdb) {
            tracing::warn!("--pblastdb argument supplied but boolean --orfblast is off");
        }
    }
}

fn check_scan_inputs(p: &ScanParams, errors: &mut Vec<ValidationError>) {
    for file in [&p.mate1, &p.mate2, &p.bam, &p.blacklist]
        .into_iter()
        .filter_map(set_value)
    {
        if let Some(reason) = missing_reason(Path::new(file)) {
            errors.push(ValidationError::MissingInput {
                path: file.to_string(),
                reason,
            });
        }
    }

    let gzip = p.gzip.is_on();
    let mates: Vec<&str> = match (set_value(&p.mate1), set_value(&p.mate2)) {
        (Some(m1), Some(m2)) => vec![m1, m2],
        (Some(m1), None) if p.single.is_on() => vec![m1],
        _ => Vec::new(),
    };
    for mate in mates {
        if mate.ends_with(".gz") != gzip {
            errors.push(ValidationError::GzipMismatch {
                file: mate.to_string(),
                declared: gzip,
            });
        }
    }

    if let Some(bam) = set_value(&p.bam) {
        if !bam.ends_with(".bam") {
            errors.push(ValidationError::BadExtension {
                file: bam.to_string(),
                flag: "--bam",
                expected: ".bam",
            });
        }
    }
}

fn missing_reason(path: &Path) -> Option<&'static str> {
    match std::fs::metadata(path) {
        Err(_) => Some("missing"),
        Ok(meta) if meta.is_file() && meta.len() == 0 => Some("empty"),
        Ok(_) => None,
    }
}

fn check_aggregate(p: &AggregateParams) {
    if !is_set(&p.samples) {
        tracing::warn!("no --samples argument; aggregate stages will run without a sample list");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StageSections;
    use crate::pipeline::params::{ExecutionFlags, Switch};
    use crate::pipeline::resolve::{ConfigResolver, RunRequest};
    use std::path::PathBuf;

    fn resolve(identifier: &str, steps: &str, params: ModeParams) -> RunConfiguration {
        ConfigResolver::resolve_with_sections(
            RunRequest {
                identifier: identifier.to_string(),
                config_path: None,
                steps: Some(steps.to_string()),
                flags: ExecutionFlags::default(),
                params,
                scripts_dir: PathBuf::from("/opt/pandora"),
            },
            &StageSections::default(),
        )
        .unwrap()
    }

    fn unchecked() -> ScanParams {
        ScanParams {
            noerror: true,
            ..ScanParams::default()
        }
    }

    fn kinds(report: &ValidationReport) -> Vec<&'static str> {
        report.errors().iter().map(ValidationError::kind).collect()
    }

    #[test]
    fn blast_stage_without_database_fails() {
        let params = ScanParams {
            mate1: Some("r1.fq".into()),
            mate2: Some("r2.fq".into()),
            refstar: Some("/refs/star".into()),
            refbowtie: Some("/refs/bt2".into()),
            ..unchecked()
        };
        let report = validate(&resolve("S1", "13", ModeParams::Scan(params))).unwrap_err();
        assert_eq!(
            report.errors(),
            &[ValidationError::MissingParameter {
                stage: '3',
                message: "need --blastdb argument".to_string(),
            }]
        );
    }

    #[test]
    fn every_failure_is_reported_together() {
        let report =
            validate(&resolve("TOOLONG", "1x4", ModeParams::Scan(ScanParams {
                orfblast: Switch::ON,
                ..unchecked()
            })))
            .unwrap_err();
        assert_eq!(
            kinds(&report),
            vec![
                "invalid_identifier",
                "unknown_stage",
                "missing_parameter",
                "missing_parameter",
                "missing_parameter",
            ]
        );
    }

    #[test]
    fn bam_replaces_reads_and_references() {
        let params = ScanParams {
            bam: Some("/data/sample.bam".into()),
            ..unchecked()
        };
        assert!(validate(&resolve("S1", "1", ModeParams::Scan(params))).is_ok());
    }

    #[test]
    fn single_end_needs_a_read_source() {
        let params = ScanParams {
            single: Switch::ON,
            refstar: Some("/refs/star".into()),
            refbowtie: Some("/refs/bt2".into()),
            ..unchecked()
        };
        let report = validate(&resolve("S1", "1", ModeParams::Scan(params))).unwrap_err();
        assert_eq!(kinds(&report), vec!["missing_parameter"]);
    }

    #[test]
    fn protein_db_without_orf_search_is_only_a_warning() {
        let params = ScanParams {
            pblastdb: Some("/db/nr".into()),
            ..unchecked()
        };
        assert!(validate(&resolve("S1", "4", ModeParams::Scan(params))).is_ok());
    }

    #[test]
    fn compressed_single_end_input_needs_gzip_flag() {
        let dir = tempfile::tempdir().unwrap();
        let reads = dir.path().join("x.fastq.gz");
        std::fs::write(&reads, b"@r1\nACGT\n+\nIIII\n").unwrap();

        let params = ScanParams {
            mate1: Some(reads.to_string_lossy().to_string()),
            single: Switch::ON,
            refstar: Some("/refs/star".into()),
            refbowtie: Some("/refs/bt2".into()),
            ..ScanParams::default()
        };
        let report = validate(&resolve("S1", "1", ModeParams::Scan(params))).unwrap_err();
        assert_eq!(report.len(), 1);
        match &report.errors()[0] {
            ValidationError::GzipMismatch { file, declared } => {
                assert!(file.ends_with("x.fastq.gz"));
                assert!(!declared);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(report.to_string().contains("x.fastq.gz"));
    }

    #[test]
    fn file_checks_catch_missing_empty_and_misnamed_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("r1.fq.gz");
        std::fs::write(&empty, b"").unwrap();
        let mate2 = dir.path().join("r2.fq");
        std::fs::write(&mate2, b"@r\nA\n+\nI\n").unwrap();
        let bam = dir.path().join("aligned.sam");
        std::fs::write(&bam, b"@HD\n").unwrap();

        let params = ScanParams {
            mate1: Some(empty.to_string_lossy().to_string()),
            mate2: Some(mate2.to_string_lossy().to_string()),
            bam: Some(bam.to_string_lossy().to_string()),
            blacklist: Some(dir.path().join("absent.txt").to_string_lossy().to_string()),
            gzip: Switch::ON,
            ..ScanParams::default()
        };
        let report = validate(&resolve("S1", "2", ModeParams::Scan(params))).unwrap_err();
        assert_eq!(
            kinds(&report),
            vec!["missing_input", "missing_input", "gzip_mismatch", "bad_extension"]
        );
        assert!(matches!(
            &report.errors()[2],
            ValidationError::GzipMismatch { file, declared: true } if file.ends_with("r2.fq")
        ));
    }

    #[test]
    fn noerror_skips_file_checks_only() {
        let params = ScanParams {
            mate1: Some("/nope/r1.fq.gz".into()),
            mate2: Some("/nope/r2.fq".into()),
            ..unchecked()
        };
        let report = validate(&resolve("S1", "13", ModeParams::Scan(params))).unwrap_err();
        // references for stage 1 and the blast database are still required
        assert_eq!(kinds(&report), vec!["missing_parameter", "missing_parameter"]);
    }

    #[test]
    fn aggregate_checks_identifier_and_codes() {
        let ok = resolve("batch", "12", ModeParams::Aggregate(AggregateParams::default()));
        assert!(validate(&ok).is_ok());

        let bad = resolve("", "13", ModeParams::Aggregate(AggregateParams::default()));
        let report = validate(&bad).unwrap_err();
        assert_eq!(kinds(&report), vec!["invalid_identifier", "unknown_stage"]);
    }

    #[test]
    fn aggregate_without_samples_warns_but_passes() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = Captured(buf.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let bare = resolve("batch", "12", ModeParams::Aggregate(AggregateParams::default()));
        let with_samples = resolve(
            "batch",
            "12",
            ModeParams::Aggregate(AggregateParams {
                samples: Some("samples.txt".into()),
                ..AggregateParams::default()
            }),
        );
        tracing::subscriber::with_default(subscriber, || {
            assert!(validate(&bare).is_ok());
        });
        let logged = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("no --samples argument"), "{logged}");

        buf.lock().unwrap().clear();
        let writer = Captured(buf.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(validate(&with_samples).is_ok());
        });
        assert!(buf.lock().unwrap().is_empty());
    }
}
