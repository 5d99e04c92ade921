use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use pandora_core::api::{DEFAULT_SUFFIX_REPORT, DEFAULT_SUFFIX_STATS};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormatArg {
    Text,
    Jsonl,
}

#[derive(Parser, Debug)]
#[command(
    name = "pandora",
    version,
    about = "microbial detection from paired-end RNAseq"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pathogen discovery pipeline
    Scan(ScanArgs),
    /// Create a report aggregated over multiple sample runs
    Aggregate(AggregateArgs),
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Scan(a) => &a.common,
            Commands::Aggregate(a) => &a.common,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CommonArgs {
    /// Sample ID (5 chars or less)
    #[arg(long, visible_alias = "id")]
    pub identifier: String,

    /// Run config file with [Step1].. tables
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Do not delete temporary intermediate files
    #[arg(long)]
    pub noclean: bool,

    /// Echo commands before they run
    #[arg(long)]
    pub verbose: bool,

    /// Run stages locally instead of submitting them to the grid engine
    #[arg(long = "noSGE", visible_alias = "no-sge")]
    pub no_sge: bool,

    /// Add resource requests for the hpc cluster
    #[arg(long)]
    pub hpc: bool,

    /// Install directory holding scripts/ and resources/
    #[arg(long)]
    pub scripts_dir: Option<PathBuf>,

    /// How submitted stages are reported on stdout
    #[arg(long, value_enum, default_value_t = TraceFormatArg::Text)]
    pub trace_format: TraceFormatArg,

    /// Where local runs append log.o.steps / log.e.steps (default: current directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Mate 1 fastq, or the single-end reads with --single
    #[arg(long, visible_alias = "r1")]
    pub mate1: Option<String>,

    /// Mate 2 fastq
    #[arg(long, visible_alias = "r2")]
    pub mate2: Option<String>,

    /// Bam input, as an alternative to fastq files
    #[arg(long)]
    pub bam: Option<String>,

    /// Single-end read data (use with --mate1 or --bam)
    #[arg(long)]
    pub single: bool,

    /// STAR host reference
    #[arg(long, visible_alias = "sr")]
    pub refstar: Option<String>,

    /// bowtie2 host reference
    #[arg(long, visible_alias = "br")]
    pub refbowtie: Option<String>,

    /// names.dmp mapping taxid to names
    #[arg(long)]
    pub taxid2names: Option<String>,

    /// Blast (nt) database; contigs are the query set
    #[arg(long, visible_alias = "db")]
    pub blastdb: Option<String>,

    /// Threads for the short read alignment
    #[arg(long = "map_threads", visible_alias = "map-threads", default_value_t = 4)]
    pub map_threads: u32,

    /// Threads for blast (-num_threads)
    #[arg(long = "blast_threads", visible_alias = "blast-threads", default_value_t = 1)]
    pub blast_threads: u32,

    /// Rows per split file for blast
    #[arg(long, default_value_t = 100)]
    pub blastchunk: u32,

    /// Memory (G) per blast array task
    #[arg(long, default_value_t = 8)]
    pub bmem: u32,

    /// Time (hours) per blast array task
    #[arg(long, default_value_t = 4)]
    pub btime: u32,

    /// Blast protein (nr) database; ORFs are the query set
    #[arg(long, visible_alias = "pdb")]
    pub pblastdb: Option<String>,

    /// Host gtf for gene coverage after host separation
    #[arg(long)]
    pub gtf: Option<String>,

    /// Minimum contig length for blast
    #[arg(long, default_value_t = 99)]
    pub contigthreshold: u32,

    /// Minimum ORF length for protein blast
    #[arg(long, default_value_t = 200)]
    pub orfthreshold: u32,

    /// Blast the ORFs to the protein database
    #[arg(long)]
    pub orfblast: bool,

    /// Taxids of non-pathogens to ignore
    #[arg(long)]
    pub blacklist: Option<String>,

    /// Input fastq files are gzipped
    #[arg(long)]
    pub gzip: bool,

    /// Skip the input file checks
    #[arg(long)]
    pub noerror: bool,

    /// Steps to run: 1 host separation, 2 assembly, 3 blast contigs,
    /// 4 orf discovery, 5 reporting, 7 blast unassembled reads
    #[arg(long, default_value = "12345")]
    pub steps: String,

    /// Minimum contig length for Trinity
    #[arg(long, default_value_t = 99)]
    pub trinitycontigthreshold: u32,

    /// Max memory for Trinity (G)
    #[arg(long, default_value_t = 50)]
    pub trinitymem: u32,

    /// Cores for Trinity
    #[arg(long, default_value_t = 8)]
    pub trinitycores: u32,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File with sample names, one per line
    #[arg(long)]
    pub samples: Option<String>,

    /// names.dmp mapping taxid to names
    #[arg(long)]
    pub taxid2names: Option<String>,

    /// nodes.dmp
    #[arg(long)]
    pub taxid2nodes: Option<String>,

    /// Accession IDs to ignore
    #[arg(long)]
    pub accblacklist: Option<String>,

    /// Directory holding the output of many scan runs
    #[arg(long)]
    pub batchdir: Option<String>,

    #[arg(long, default_value = DEFAULT_SUFFIX_REPORT)]
    pub suffixreport: String,

    #[arg(long, default_value = DEFAULT_SUFFIX_STATS)]
    pub suffixstats: String,

    /// Steps to run: 1 preprocess, 2 generate report
    #[arg(long, default_value = "12")]
    pub steps: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn scan_accepts_classic_flag_names() {
        let args = Args::try_parse_from([
            "pandora",
            "scan",
            "--id",
            "S1",
            "--r1",
            "a.fq",
            "--r2",
            "b.fq",
            "--db",
            "/db/nt",
            "--map_threads",
            "6",
            "--noSGE",
            "--steps",
            "125",
        ])
        .unwrap();
        let Commands::Scan(scan) = args.command else {
            panic!("expected scan");
        };
        assert_eq!(scan.common.identifier, "S1");
        assert_eq!(scan.mate1.as_deref(), Some("a.fq"));
        assert_eq!(scan.blastdb.as_deref(), Some("/db/nt"));
        assert_eq!(scan.map_threads, 6);
        assert!(scan.common.no_sge);
        assert_eq!(scan.steps, "125");
        assert_eq!(scan.trinitycores, 8);
    }

    #[test]
    fn aggregate_defaults() {
        let args =
            Args::try_parse_from(["pandora", "aggregate", "--identifier", "batch"]).unwrap();
        let Commands::Aggregate(agg) = args.command else {
            panic!("expected aggregate");
        };
        assert_eq!(agg.steps, "12");
        assert_eq!(agg.suffixreport, DEFAULT_SUFFIX_REPORT);
        assert_eq!(agg.common.trace_format, TraceFormatArg::Text);
    }

    #[test]
    fn identifier_is_required() {
        assert!(Args::try_parse_from(["pandora", "scan", "--steps", "1"]).is_err());
    }
}
