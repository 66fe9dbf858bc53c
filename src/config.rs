//! Run configuration
use serde::{Deserialize, Serialize};

/// Knobs for a single call to [`Engine::run`](crate::Engine::run).
///
/// `burnin` only affects trace output: sweeps before it are never written.
/// When `record_best` is set, candidate label vectors are only committed
/// when they improve the joint log probability, and the run stops early
/// after `patience` sweeps without improvement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub n_sweeps: usize,
    pub burnin: usize,
    pub record_best: bool,
    pub patience: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            n_sweeps: 1000,
            burnin: 0,
            record_best: true,
            patience: 500,
        }
    }
}
