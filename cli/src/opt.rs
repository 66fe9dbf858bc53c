use clap::Parser;
use std::path::PathBuf;

use twill::Kernel;

/// Cluster numeric observations with a CRP Gaussian mixture
#[derive(Parser, Debug)]
#[clap(name = "twill", version)]
pub struct Opt {
    /// Path to the csv data source
    #[clap(name = "CSV_IN")]
    pub csv_src: PathBuf,
    /// The data file has no header row
    #[clap(long = "no-header")]
    pub no_header: bool,
    /// The number of sweeps to run
    #[clap(long = "n-sweeps", short = 'n', default_value = "1000")]
    pub n_sweeps: usize,
    /// Sweeps to discard before the trace starts recording
    #[clap(long = "burnin", default_value = "0")]
    pub burnin: usize,
    /// CRP concentration parameter
    #[clap(long = "alpha", default_value = "1.0")]
    pub alpha: f64,
    /// RNG seed
    #[clap(long = "seed")]
    pub seed: Option<u64>,
    /// Run the density and resample passes data-parallel
    #[clap(long = "accelerated", short = 'a')]
    pub accelerated: bool,
    /// Force a specific data-parallel kernel (unrolled | loopy)
    #[clap(long = "kernel", requires = "accelerated")]
    pub kernel: Option<Kernel>,
    /// Keep every post-burn-in sample instead of tracking the best one
    #[clap(long = "no-record-best")]
    pub no_record_best: bool,
    /// Write the label trace to this file
    #[clap(long = "trace", short = 't')]
    pub trace_out: Option<PathBuf>,
    /// Optional yaml run config; overrides the sweep flags
    #[clap(long = "run-config", short = 'c')]
    pub run_config: Option<PathBuf>,
}
