//! The sampler engine and its iteration driver
mod builder;
mod gibbs;
mod parallel;
mod score;

pub use builder::Builder;

use std::io::Write;
use std::time::{Duration, Instant};

use rand_xoshiro::Xoshiro256Plus;
use twill_stats::prior::{NormalGamma, NormalInvWishart};
use twill_stats::{cluster_counts, Crp, LabelTable};
use twill_utils::Matrix;

use crate::alg::Kernel;
use crate::config::RunConfig;
use crate::device::Device;
use crate::error::RunError;
use crate::trace::TraceWriter;

/// Conjugate family, matched to the observation dimensionality at build
/// time
#[derive(Clone, Debug)]
pub(crate) enum Prior {
    Scalar(NormalGamma),
    Vector(NormalInvWishart),
}

/// Execution strategy, resolved once at build time by the device
/// capability check
#[derive(Debug)]
pub(crate) enum Strategy {
    Sequential,
    Parallel { device: Device, kernel: Kernel },
}

/// What a run hands back: timings and the final partition's label→count
/// list, sorted by count descending
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Time spent inside the data-parallel passes; zero on the host path
    pub accel_time: Duration,
    /// Wall-clock time across all sweeps so far
    pub total_time: Duration,
    pub cluster_counts: Vec<(usize, usize)>,
}

/// A collapsed Gibbs sampler for the CRP Gaussian mixture model.
///
/// Each sweep rebuilds the active label set and the per-cluster sufficient
/// statistics, evaluates every (observation, label) posterior-predictive
/// log density against that one shared snapshot, adds the CRP mixing
/// weights, and resamples all labels at once. The candidate label vector
/// replaces the current one wholesale; labels are never mutated mid-sweep.
#[derive(Debug)]
pub struct Engine {
    data: Matrix<f64>,
    asgn: Vec<usize>,
    crp: Crp,
    prior: Prior,
    strategy: Strategy,
    config: RunConfig,
    rng: Xoshiro256Plus,
    best: Option<(Vec<usize>, f64)>,
    sweeps_since_best: usize,
    accel_time: Duration,
    total_time: Duration,
}

impl Engine {
    #[inline]
    pub fn n_obs(&self) -> usize {
        self.data.n_rows()
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.data.n_cols()
    }

    /// The current label vector
    #[inline]
    pub fn asgn(&self) -> &[usize] {
        &self.asgn
    }

    /// The best-scoring label vector seen so far, with its joint log
    /// probability
    pub fn best_sample(&self) -> Option<(&[usize], f64)> {
        self.best.as_ref().map(|(asgn, score)| (asgn.as_slice(), *score))
    }

    /// Run the configured number of sweeps without writing a trace
    pub fn run(&mut self) -> Result<RunSummary, RunError> {
        self.run_inner::<std::io::Sink>(None)
    }

    /// Run the configured number of sweeps, writing the label trace to
    /// `out`: every post-burn-in sweep when best-sample tracking is off,
    /// only the final best vector when it is on
    pub fn run_with_trace<W: Write>(
        &mut self,
        out: &mut W,
    ) -> Result<RunSummary, RunError> {
        self.run_inner(Some(out))
    }

    fn run_inner<W: Write>(
        &mut self,
        out: Option<&mut W>,
    ) -> Result<RunSummary, RunError> {
        let run_start = Instant::now();
        let mut trace = out.map(TraceWriter::new);

        if self.config.record_best {
            let init = self.asgn.clone();
            self.auto_save_sample(&init)?;
        }

        if let Some(trace) = trace.as_mut() {
            trace.header(self.n_obs())?;
        }

        for sweep_ix in 0..self.config.n_sweeps {
            if let Some(trace) = trace.as_mut() {
                if sweep_ix >= self.config.burnin && !self.config.record_best
                {
                    trace.row(&self.asgn)?;
                }
            }

            let candidate = self.sweep();
            debug_assert!(LabelTable::from_asgn(&candidate)
                .validate(&candidate)
                .is_valid());

            if self.config.record_best {
                if self.auto_save_sample(&candidate)? {
                    self.asgn = candidate;
                }
                if self.no_improvement() {
                    break;
                }
            } else {
                self.asgn = candidate;
            }
        }

        if self.config.record_best {
            if let Some(trace) = trace.as_mut() {
                match &self.best {
                    Some((best, _)) => trace.row(best)?,
                    None => trace.row(&self.asgn)?,
                }
            }
        }

        self.total_time += run_start.elapsed();

        Ok(RunSummary {
            accel_time: self.accel_time,
            total_time: self.total_time,
            cluster_counts: cluster_counts(&self.asgn),
        })
    }

    /// Produce a candidate label vector from one full sweep against the
    /// current assignment
    pub(crate) fn sweep(&mut self) -> Vec<usize> {
        let table = LabelTable::from_asgn(&self.asgn);

        match (&self.prior, &self.strategy) {
            (Prior::Scalar(ng), Strategy::Sequential) => gibbs::scalar_sweep(
                &self.data,
                &self.asgn,
                &table,
                ng,
                &self.crp,
                &mut self.rng,
            ),
            (Prior::Vector(niw), Strategy::Sequential) => {
                gibbs::vector_sweep(
                    &self.data,
                    &self.asgn,
                    &table,
                    niw,
                    &self.crp,
                    &mut self.rng,
                )
            }
            (
                Prior::Scalar(ng),
                Strategy::Parallel { device, kernel },
            ) => {
                let (candidate, elapsed) = parallel::scalar_sweep(
                    device,
                    *kernel,
                    &self.data,
                    &self.asgn,
                    &table,
                    ng,
                    &self.crp,
                    &mut self.rng,
                );
                self.accel_time += elapsed;
                candidate
            }
            (
                Prior::Vector(niw),
                Strategy::Parallel { device, kernel },
            ) => {
                let (candidate, elapsed) = parallel::vector_sweep(
                    device,
                    *kernel,
                    &self.data,
                    &self.asgn,
                    &table,
                    niw,
                    &self.crp,
                    &mut self.rng,
                );
                self.accel_time += elapsed;
                candidate
            }
        }
    }

    /// Record `candidate` if it improves the running best joint log
    /// probability. Returns whether it was recorded.
    fn auto_save_sample(
        &mut self,
        candidate: &[usize],
    ) -> Result<bool, RunError> {
        let score = self.ln_score(candidate)?;
        let improved = match &self.best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };

        if improved {
            self.best = Some((candidate.to_vec(), score));
            self.sweeps_since_best = 0;
        } else {
            self.sweeps_since_best += 1;
        }
        Ok(improved)
    }

    /// Early-stop eligibility: no sweep has improved the best sample for
    /// `patience` sweeps
    fn no_improvement(&self) -> bool {
        self.sweeps_since_best >= self.config.patience
    }
}
