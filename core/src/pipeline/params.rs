//! Per-mode parameter sets and the config-file merge rule.
use std::fmt;

use serde::Serialize;

use super::mode::Mode;
use crate::config::StageSections;

/// A boolean flag as stage programs receive it: the integer `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Switch(u8);

impl Switch {
    pub const OFF: Switch = Switch(0);
    pub const ON: Switch = Switch(1);

    pub fn is_on(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for Switch {
    fn from(value: bool) -> Self {
        Switch(value as u8)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flags shared by every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExecutionFlags {
    /// Run stages as local subprocesses instead of submitting them.
    pub no_cluster: Switch,
    pub verbose: Switch,
    /// Keep intermediate files (`--noclean`).
    pub keep_temp: Switch,
    /// Add resource requests for the hpc cluster.
    pub hpc: Switch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanParams {
    pub mate1: Option<String>,
    pub mate2: Option<String>,
    pub bam: Option<String>,
    pub single: Switch,
    pub refstar: Option<String>,
    pub refbowtie: Option<String>,
    pub taxid2names: Option<String>,
    pub blastdb: Option<String>,
    pub map_threads: u32,
    pub blast_threads: u32,
    pub blastchunk: u32,
    pub bmem: u32,
    pub btime: u32,
    pub pblastdb: Option<String>,
    pub gtf: Option<String>,
    pub contigthreshold: u32,
    pub orfthreshold: u32,
    pub orfblast: Switch,
    pub blacklist: Option<String>,
    pub gzip: Switch,
    /// Skip the input file checks.
    pub noerror: bool,
    pub trinitycontigthreshold: u32,
    pub trinitymem: u32,
    pub trinitycores: u32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            mate1: None,
            mate2: None,
            bam: None,
            single: Switch::OFF,
            refstar: None,
            refbowtie: None,
            taxid2names: None,
            blastdb: None,
            map_threads: 4,
            blast_threads: 1,
            blastchunk: 100,
            bmem: 8,
            btime: 4,
            pblastdb: None,
            gtf: None,
            contigthreshold: 99,
            orfthreshold: 200,
            orfblast: Switch::OFF,
            blacklist: None,
            gzip: Switch::OFF,
            noerror: false,
            trinitycontigthreshold: 99,
            trinitymem: 50,
            trinitycores: 8,
        }
    }
}

pub const DEFAULT_SUFFIX_REPORT: &str = "/report_ifilter/report.contig.txt";
pub const DEFAULT_SUFFIX_STATS: &str = "/report_ifilter/report.taxon.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateParams {
    /// File listing sample names, one per line.
    pub samples: Option<String>,
    pub taxid2names: Option<String>,
    pub taxid2nodes: Option<String>,
    pub accblacklist: Option<String>,
    /// Directory holding the output of many scan runs.
    pub batchdir: Option<String>,
    pub suffixreport: String,
    pub suffixstats: String,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self {
            samples: None,
            taxid2names: None,
            taxid2nodes: None,
            accblacklist: None,
            batchdir: None,
            suffixreport: DEFAULT_SUFFIX_REPORT.to_string(),
            suffixstats: DEFAULT_SUFFIX_STATS.to_string(),
        }
    }
}

/// The mode together with the parameters only that mode knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ModeParams {
    Scan(ScanParams),
    Aggregate(AggregateParams),
}

impl ModeParams {
    pub fn mode(&self) -> Mode {
        match self {
            ModeParams::Scan(_) => Mode::Scan,
            ModeParams::Aggregate(_) => Mode::Aggregate,
        }
    }

    /// Fill unset keys from the config file.
    ///
    /// A key counts as unset when it is absent *or empty*: an explicit
    /// `--blastdb ""` is silently replaced by the file's value. Keys that hold
    /// a non-empty value are never touched, so running the merge twice changes
    /// nothing the second time.
    pub fn merge_sections(&mut self, sections: &StageSections) {
        let mode = self.mode();
        for &(key, code) in recognized_keys(mode) {
            let Some(slot) = self.slot_mut(key) else {
                continue;
            };
            if is_set(slot) {
                continue;
            }
            if let Some(value) = sections.get(&mode.section(code), key) {
                tracing::debug!(key, section = %mode.section(code), "filled from config file");
                *slot = Some(value.to_string());
            }
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match self {
            ModeParams::Scan(p) => match key {
                "refstar" => Some(&mut p.refstar),
                "refbowtie" => Some(&mut p.refbowtie),
                "gtf" => Some(&mut p.gtf),
                "blastdb" => Some(&mut p.blastdb),
                "pblastdb" => Some(&mut p.pblastdb),
                "blacklist" => Some(&mut p.blacklist),
                "taxid2names" => Some(&mut p.taxid2names),
                _ => None,
            },
            ModeParams::Aggregate(p) => match key {
                "taxid2names" => Some(&mut p.taxid2names),
                "taxid2nodes" => Some(&mut p.taxid2nodes),
                "accblacklist" => Some(&mut p.accblacklist),
                _ => None,
            },
        }
    }
}

/// Keys the config file may fill, with the stage whose table holds them.
pub fn recognized_keys(mode: Mode) -> &'static [(&'static str, char)] {
    match mode {
        Mode::Scan => &[
            ("refstar", '1'),
            ("refbowtie", '1'),
            ("gtf", '1'),
            ("blastdb", '3'),
            ("pblastdb", '4'),
            ("blacklist", '5'),
            ("taxid2names", '5'),
        ],
        Mode::Aggregate => &[
            ("taxid2names", '1'),
            ("taxid2nodes", '1'),
            ("accblacklist", '1'),
        ],
    }
}

/// The value if it is present and non-empty.
pub fn set_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn is_set(value: &Option<String>) -> bool {
    set_value(value).is_some()
}
