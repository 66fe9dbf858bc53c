//! A fast collapsed Gibbs sampler for Chinese-Restaurant-Process Gaussian
//! mixtures.
//!
//! `twill` partitions a set of scalar or vector observations into an
//! unknown, data-determined number of Gaussian clusters. Component
//! parameters are analytically marginalized through conjugate priors
//! (Normal-Gamma for scalar data, Normal-Inverse-Wishart for vector data),
//! so each sweep only resamples the cluster label of every observation. The
//! density-and-resample step can optionally run data-parallel on a
//! dedicated thread pool.
//!
//! # Example
//!
//! Cluster a handful of scalar observations and inspect the partition:
//!
//! ```rust
//! use twill::{Builder, RunConfig};
//! use twill_utils::Matrix;
//!
//! let data = Matrix::from_vecs(vec![
//!     vec![0.0], vec![0.1], vec![0.2],
//!     vec![10.0], vec![10.1], vec![10.2],
//! ]);
//!
//! let mut engine = Builder::new(data)
//!     .with_config(RunConfig {
//!         n_sweeps: 100,
//!         ..RunConfig::default()
//!     })
//!     .with_seed(1337)
//!     .build()
//!     .unwrap();
//!
//! let summary = engine.run().unwrap();
//! let n: usize = summary.cluster_counts.iter().map(|(_, ct)| ct).sum();
//! assert_eq!(n, 6);
//! ```
#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone,
    clippy::perf
)]

pub mod alg;
pub mod config;
pub mod data;
pub mod device;
mod engine;
pub mod error;
pub mod prelude;
mod trace;

pub use alg::{Kernel, RunMode};
pub use config::RunConfig;
pub use engine::{Builder, Engine, RunSummary};
pub use error::{DataError, NewEngineError, RunError, ScoreError};

pub use twill_stats as stats;
pub use twill_utils as utils;
