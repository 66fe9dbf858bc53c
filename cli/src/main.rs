mod opt;

use std::fs::File;
use std::io::BufWriter;

use clap::Parser;
use log::info;

use opt::Opt;
use twill::{data, Builder, RunConfig, RunMode};

fn run(opt: Opt) -> i32 {
    let data = match data::read_csv(&opt.csv_src, !opt.no_header) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Could not read '{:?}': {err}", opt.csv_src);
            return 1;
        }
    };

    info!(
        "Loaded {} observations with {} column(s)",
        data.n_rows(),
        data.n_cols()
    );

    let config = match &opt.run_config {
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("Could not open '{path:?}': {err}");
                    return 1;
                }
            };
            match serde_yaml::from_reader(file) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Could not parse '{path:?}': {err}");
                    return 1;
                }
            }
        }
        None => RunConfig {
            n_sweeps: opt.n_sweeps,
            burnin: opt.burnin,
            record_best: !opt.no_record_best,
            ..RunConfig::default()
        },
    };

    let mut builder = Builder::new(data)
        .with_alpha(opt.alpha)
        .with_config(config);

    if opt.accelerated {
        builder = builder.with_mode(RunMode::Accelerated);
    }
    if let Some(kernel) = opt.kernel {
        builder = builder.with_kernel(kernel);
    }
    if let Some(seed) = opt.seed {
        builder = builder.with_seed(seed);
    }

    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Could not build the engine: {err}");
            return 1;
        }
    };

    info!("Running {} sweeps", config.n_sweeps);

    let summary = match &opt.trace_out {
        Some(path) => {
            let file = match File::create(path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("Could not create '{path:?}': {err}");
                    return 1;
                }
            };
            let mut out = BufWriter::new(file);
            engine.run_with_trace(&mut out)
        }
        None => engine.run(),
    };

    let summary = match summary {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Run failed: {err}");
            return 1;
        }
    };

    info!(
        "Done in {:.3}s ({:.3}s on the device)",
        summary.total_time.as_secs_f64(),
        summary.accel_time.as_secs_f64()
    );

    println!("label,count");
    for (label, count) in &summary.cluster_counts {
        println!("{label},{count}");
    }

    0
}

fn main() {
    env_logger::init();

    let opt = Opt::parse();

    let exit_code = run(opt);

    std::process::exit(exit_code);
}
