//! Run modes and the stages each of them owns.
use std::fmt;

use serde::Serialize;

/// Reporting stage of a scan; selecting it pulls in [`POST_REPORT_STAGE`].
pub const REPORT_STAGE: char = '5';
/// Second report pass over the filtered blast hits.
pub const POST_REPORT_STAGE: char = '6';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pathogen discovery on one sample.
    Scan,
    /// Report over many finished scans.
    Aggregate,
}

/// Interpreter the scheduler starts a stage program with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageShell {
    /// The configured python interpreter.
    Interpreter,
    Bash,
}

/// Resource request used under the hpc profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRequest {
    Fixed { mem_gb: u32, hours: u32 },
    /// Memory grows with the stage's thread count; also reserves an smp slot
    /// per thread.
    PerThread { gb_per_thread: u32, hours: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    pub code: char,
    /// Job name stem; the sample identifier is appended.
    pub job_name: &'static str,
    /// Program under `<scripts>/scripts/`.
    pub program: &'static str,
    pub shell: StageShell,
    pub resources: ResourceRequest,
}

const SCAN_STAGES: &[StageSpec] = &[
    StageSpec {
        code: '1',
        job_name: "hsep",
        program: "host_separation.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::PerThread {
            gb_per_thread: 16,
            hours: 12,
        },
    },
    StageSpec {
        code: '2',
        job_name: "asm",
        program: "assembly.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::PerThread {
            gb_per_thread: 12,
            hours: 12,
        },
    },
    StageSpec {
        code: '3',
        job_name: "blst",
        program: "blast_wrapper.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::Fixed { mem_gb: 4, hours: 8 },
    },
    StageSpec {
        code: '4',
        job_name: "orf",
        program: "orf_discovery.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::Fixed { mem_gb: 2, hours: 2 },
    },
    StageSpec {
        code: '5',
        job_name: "rep",
        program: "makereport.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::Fixed { mem_gb: 4, hours: 1 },
    },
    StageSpec {
        code: '6',
        job_name: "rep2",
        program: "makereport.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::Fixed { mem_gb: 4, hours: 1 },
    },
    StageSpec {
        code: '7',
        job_name: "blst_unass",
        program: "blast_unassembled_reads.sh",
        shell: StageShell::Bash,
        resources: ResourceRequest::Fixed {
            mem_gb: 1,
            hours: 12,
        },
    },
];

const AGGREGATE_STAGES: &[StageSpec] = &[
    StageSpec {
        code: '1',
        job_name: "agg_preproc",
        program: "aggregate_preprocess.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::Fixed { mem_gb: 4, hours: 4 },
    },
    StageSpec {
        code: '2',
        job_name: "agg_report",
        program: "aggregate_report.py",
        shell: StageShell::Interpreter,
        resources: ResourceRequest::Fixed { mem_gb: 4, hours: 4 },
    },
];

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Scan => "scan",
            Mode::Aggregate => "aggregate",
        }
    }

    /// Selection used when the user does not pass `--steps`.
    pub fn default_steps(self) -> &'static str {
        match self {
            Mode::Scan => "12345",
            Mode::Aggregate => "12",
        }
    }

    pub fn stages(self) -> &'static [StageSpec] {
        match self {
            Mode::Scan => SCAN_STAGES,
            Mode::Aggregate => AGGREGATE_STAGES,
        }
    }

    pub fn stage(self, code: char) -> Option<&'static StageSpec> {
        self.stages().iter().find(|s| s.code == code)
    }

    /// Config-file table holding defaults and the scheduler override for a
    /// stage, e.g. `Step3` or `StepA1`.
    pub fn section(self, code: char) -> String {
        match self {
            Mode::Scan => format!("Step{code}"),
            Mode::Aggregate => format!("StepA{code}"),
        }
    }

    /// Stages whose scheduler prefix may be overridden from the config file.
    pub fn overridable_stages(self) -> &'static [char] {
        match self {
            Mode::Scan => &['1', '2', '3', '4', '5'],
            Mode::Aggregate => &['1', '2'],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
