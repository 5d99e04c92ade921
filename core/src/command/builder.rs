use std::path::Path;

use serde::Serialize;

use super::args::ArgList;
use super::resources::resource_fragment;
use crate::config::SchedulerConfig;
use crate::error::ChainError;
use crate::pipeline::{AggregateParams, ModeParams, RunConfiguration, ScanParams, StageShell};

const BASH: &str = "/bin/bash";

/// Everything needed to run or submit one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub code: char,
    /// `<stem>_<identifier>`, the scheduler job name.
    pub job_name: String,
    /// Stage program followed by its arguments.
    pub payload: Vec<String>,
    /// `-S <shell> -N <job> -V -cwd -o log.out -e log.err`
    pub submit_prefix: Vec<String>,
    /// Only built under the hpc profile.
    pub resources: Option<Vec<String>>,
}

pub struct CommandBuilder<'a> {
    config: &'a RunConfiguration,
    scheduler: &'a SchedulerConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a RunConfiguration, scheduler: &'a SchedulerConfig) -> Self {
        Self { config, scheduler }
    }

    pub fn build(&self, code: char) -> Result<StepDefinition, ChainError> {
        let mode = self.config.mode();
        let spec = mode.stage(code).ok_or(ChainError::UnknownStage { code })?;

        let job_name = format!("{}_{}", spec.job_name, self.config.identifier());
        let shell = match spec.shell {
            StageShell::Interpreter => self.scheduler.interpreter.as_str(),
            StageShell::Bash => BASH,
        };
        let submit_prefix = [
            "-S", shell, "-N", job_name.as_str(), "-V", "-cwd", "-o", "log.out", "-e", "log.err",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let scripts = self.config.scripts_dir();
        let program = scripts.join("scripts").join(spec.program);
        let program = program.to_string_lossy();

        let payload = match self.config.params() {
            ModeParams::Scan(p) => self.scan_payload(code, &program, scripts, p),
            ModeParams::Aggregate(p) => self.aggregate_payload(code, &program, scripts, p),
        }
        .ok_or(ChainError::UnknownStage { code })?;

        let resources = self
            .config
            .flags()
            .hpc
            .is_on()
            .then(|| resource_fragment(spec, self.config.params()));

        Ok(StepDefinition {
            code,
            job_name,
            payload,
            submit_prefix,
            resources,
        })
    }

    /// Build every selected stage before anything runs.
    pub fn build_all(&self, codes: &[char]) -> Result<Vec<StepDefinition>, ChainError> {
        codes.iter().map(|&code| self.build(code)).collect()
    }

    fn scan_payload(
        &self,
        code: char,
        program: &str,
        scripts: &Path,
        p: &ScanParams,
    ) -> Option<Vec<String>> {
        let scripts = scripts.to_string_lossy();
        let id = self.config.identifier();
        let flags = self.config.flags();

        let argv = match code {
            '1' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag_opt("-1", &p.mate1)
                .flag_opt("-2", &p.mate2)
                .flag_opt("--bam", &p.bam)
                .flag("--threads", p.map_threads)
                .flag("--single", p.single)
                .flag_opt("--refstar", &p.refstar)
                .flag_opt("--refbowtie", &p.refbowtie)
                .flag("--gzip", p.gzip)
                .flag("--verbose", flags.verbose)
                .flag("--noclean", flags.keep_temp)
                .flag_opt("--gtf", &p.gtf),
            '2' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag("--single", p.single)
                .flag("--trinitymem", p.trinitymem)
                .flag("--trinitycores", p.trinitycores)
                .flag("--trinitythreshold", p.trinitycontigthreshold)
                .flag("--verbose", flags.verbose)
                .flag("--noclean", flags.keep_temp),
            '3' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag("--threshold", p.contigthreshold)
                .flag_opt("--db", &p.blastdb)
                .flag("--threads", p.blast_threads)
                .flag("--id", id)
                .flag("--filelength", p.blastchunk)
                .flag("--verbose", flags.verbose)
                .flag("--noclean", flags.keep_temp)
                .flag("--nosge", flags.no_cluster)
                .flag("--hpc", flags.hpc)
                .flag("--btime", p.btime)
                .flag("--bmem", p.bmem),
            '4' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag("--id", id)
                .flag("--threshold", p.orfthreshold)
                .flag_opt("--db", &p.pblastdb)
                .flag("--blast", p.orfblast)
                .flag("--verbose", flags.verbose)
                .flag("--noclean", flags.keep_temp),
            '5' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag("--id", id)
                .flag("--verbose", flags.verbose)
                .flag_opt("--blacklist", &p.blacklist)
                .flag_opt("--taxid2names", &p.taxid2names)
                .flag("--hpc", flags.hpc),
            '6' => ArgList::new(program)
                .flag("--outputdir", "report_ifilter")
                .flag("--input", "blast/ifilter.concat.txt")
                .flag("--scripts", &scripts)
                .flag("--id", id)
                .flag("--verbose", flags.verbose)
                .flag_opt("--blacklist", &p.blacklist)
                .flag_opt("--taxid2names", &p.taxid2names)
                .flag("--hpc", flags.hpc),
            '7' => ArgList::new(program)
                .arg("assembly/reads2contigs.bam")
                .arg("blast_unassembled_reads")
                .arg(&scripts)
                .arg_opt(&p.blastdb)
                .arg_opt(&p.blacklist)
                .arg_opt(&p.taxid2names)
                .arg(format!("{scripts}/resources/blast.header")),
            _ => return None,
        };
        Some(argv.finish())
    }

    fn aggregate_payload(
        &self,
        code: char,
        program: &str,
        scripts: &Path,
        p: &AggregateParams,
    ) -> Option<Vec<String>> {
        let scripts = scripts.to_string_lossy();
        let argv = match code {
            '1' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag_opt("--samples", &p.samples)
                .flag_opt("--taxid2names", &p.taxid2names)
                .flag_opt("--taxid2nodes", &p.taxid2nodes)
                .flag_opt("--batchdir", &p.batchdir)
                .flag("--suffixreport", &p.suffixreport)
                .flag("--suffixstats", &p.suffixstats)
                .flag_opt("--accblacklist", &p.accblacklist),
            '2' => ArgList::new(program)
                .flag("--scripts", &scripts)
                .flag_opt("--samples", &p.samples),
            _ => return None,
        };
        Some(argv.finish())
    }
}
