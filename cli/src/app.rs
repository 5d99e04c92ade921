use std::path::Path;

use pandora_core::api::{
    resolve_scripts_dir, run_pipeline, AggregateParams, AppConfig, CliError, ConfigResolver,
    ExecutionFlags, ModeParams, PipelineError, RunConfiguration, RunOptions, RunRequest,
    ScanParams, Switch, TraceFormat,
};

use crate::commands::cli::{Commands, CommonArgs, TraceFormatArg};

/// Turn parsed arguments into a request for the resolver.
pub fn build_request(cmd: &Commands, cfg: &AppConfig, exe_dir: Option<&Path>) -> RunRequest {
    let common = cmd.common();
    let flags = execution_flags(common);
    let scripts_dir = resolve_scripts_dir(
        common.scripts_dir.as_deref(),
        &cfg.pipeline,
        flags.hpc.is_on(),
        exe_dir,
    );

    let (steps, params) = match cmd {
        Commands::Scan(a) => (
            a.steps.clone(),
            ModeParams::Scan(ScanParams {
                mate1: a.mate1.clone(),
                mate2: a.mate2.clone(),
                bam: a.bam.clone(),
                single: Switch::from(a.single),
                refstar: a.refstar.clone(),
                refbowtie: a.refbowtie.clone(),
                taxid2names: a.taxid2names.clone(),
                blastdb: a.blastdb.clone(),
                map_threads: a.map_threads,
                blast_threads: a.blast_threads,
                blastchunk: a.blastchunk,
                bmem: a.bmem,
                btime: a.btime,
                pblastdb: a.pblastdb.clone(),
                gtf: a.gtf.clone(),
                contigthreshold: a.contigthreshold,
                orfthreshold: a.orfthreshold,
                orfblast: Switch::from(a.orfblast),
                blacklist: a.blacklist.clone(),
                gzip: Switch::from(a.gzip),
                noerror: a.noerror,
                trinitycontigthreshold: a.trinitycontigthreshold,
                trinitymem: a.trinitymem,
                trinitycores: a.trinitycores,
            }),
        ),
        Commands::Aggregate(a) => (
            a.steps.clone(),
            ModeParams::Aggregate(AggregateParams {
                samples: a.samples.clone(),
                taxid2names: a.taxid2names.clone(),
                taxid2nodes: a.taxid2nodes.clone(),
                accblacklist: a.accblacklist.clone(),
                batchdir: a.batchdir.clone(),
                suffixreport: a.suffixreport.clone(),
                suffixstats: a.suffixstats.clone(),
            }),
        ),
    };

    RunRequest {
        identifier: common.identifier.clone(),
        config_path: common.config.clone(),
        steps: Some(steps),
        flags,
        params,
        scripts_dir,
    }
}

fn execution_flags(common: &CommonArgs) -> ExecutionFlags {
    ExecutionFlags {
        no_cluster: Switch::from(common.no_sge),
        verbose: Switch::from(common.verbose),
        keep_temp: Switch::from(common.noclean),
        hpc: Switch::from(common.hpc),
    }
}

fn trace_format(arg: TraceFormatArg) -> TraceFormat {
    match arg {
        TraceFormatArg::Text => TraceFormat::Text,
        TraceFormatArg::Jsonl => TraceFormat::Jsonl,
    }
}

pub async fn run_app(cmd: Commands, cfg: &AppConfig) -> Result<i32, CliError> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    let request = build_request(&cmd, cfg, exe_dir.as_deref());
    let config = ConfigResolver::resolve(request).map_err(PipelineError::from)?;

    let common = cmd.common();
    if config.flags().verbose.is_on() && common.trace_format == TraceFormatArg::Text {
        print_configuration(&config);
    }

    let log_dir = match &common.log_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let opts = RunOptions {
        trace_format: trace_format(common.trace_format),
        log_dir,
        scheduler: cfg.scheduler.clone(),
        ..RunOptions::default()
    };

    run_pipeline(&config, &opts).await?;
    Ok(0)
}

fn print_configuration(config: &RunConfiguration) {
    match serde_json::to_string_pretty(config) {
        Ok(s) => println!("{s}\n"),
        Err(e) => tracing::warn!("failed to render configuration: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli::Args;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> Commands {
        Args::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn scan_flags_become_switches() {
        let cmd = parse(&[
            "pandora", "scan", "--id", "S1", "--bam", "/x.bam", "--noSGE", "--noclean", "--gzip",
        ]);
        let request = build_request(&cmd, &AppConfig::default(), None);
        assert_eq!(request.flags.no_cluster, Switch::ON);
        assert_eq!(request.flags.keep_temp, Switch::ON);
        assert_eq!(request.flags.hpc, Switch::OFF);
        assert_eq!(request.steps.as_deref(), Some("12345"));
        let ModeParams::Scan(p) = request.params else {
            panic!("expected scan params");
        };
        assert_eq!(p.gzip, Switch::ON);
        assert_eq!(p.bam.as_deref(), Some("/x.bam"));
    }

    #[test]
    fn scripts_dir_follows_hpc_and_explicit_flag() {
        let exe = PathBuf::from("/usr/local/pandora");
        let hpc = parse(&["pandora", "aggregate", "--id", "b", "--hpc"]);
        let request = build_request(&hpc, &AppConfig::default(), Some(exe.as_path()));
        assert_eq!(request.scripts_dir, exe);

        let explicit = parse(&["pandora", "aggregate", "--id", "b", "--scripts-dir", "/src/pandora"]);
        let request = build_request(&explicit, &AppConfig::default(), Some(exe.as_path()));
        assert_eq!(request.scripts_dir, PathBuf::from("/src/pandora"));
    }
}
