use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use twill_stats::prior::{NormalGamma, NormalInvWishart};
use twill_stats::Crp;
use twill_utils::Matrix;

use super::{Engine, Prior, Strategy};
use crate::alg::{Kernel, RunMode};
use crate::config::RunConfig;
use crate::device::Device;
use crate::error::NewEngineError;

/// Builds an [`Engine`].
///
/// The execution strategy is fixed here, once: host mode always resolves to
/// the sequential path, accelerated mode acquires the device and picks the
/// kernel it is best suited to (or validates an explicitly requested one).
/// There is no mid-run fallback between strategies.
///
/// # Example
///
/// ```rust
/// use twill::{Builder, RunMode};
/// use twill_utils::Matrix;
///
/// let data = Matrix::from_vecs(vec![vec![0.1], vec![0.3], vec![7.9]]);
/// let engine = Builder::new(data)
///     .with_alpha(0.5)
///     .with_mode(RunMode::Accelerated)
///     .with_seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(engine.n_obs(), 3);
/// ```
pub struct Builder {
    data: Matrix<f64>,
    alpha: f64,
    scalar_prior: NormalGamma,
    niw_k: Option<f64>,
    mode: RunMode,
    kernel: Option<Kernel>,
    seed: Option<u64>,
    init_labels: Option<Vec<usize>>,
    config: RunConfig,
}

impl Builder {
    pub fn new(data: Matrix<f64>) -> Self {
        Builder {
            data,
            alpha: 1.0,
            scalar_prior: NormalGamma::default(),
            niw_k: None,
            mode: RunMode::Host,
            kernel: None,
            seed: None,
            init_labels: None,
            config: RunConfig::default(),
        }
    }

    /// CRP concentration parameter
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Normal-Gamma hyperparameters for scalar observations
    #[must_use]
    pub fn with_scalar_prior(mut self, prior: NormalGamma) -> Self {
        self.scalar_prior = prior;
        self
    }

    /// Mean pseudo-count of the Normal-Inverse-Wishart prior for vector
    /// observations
    #[must_use]
    pub fn with_niw_k(mut self, k: f64) -> Self {
        self.niw_k = Some(k);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Request a specific data-parallel kernel instead of the device's
    /// preference. Implies accelerated mode; fails the build if the device
    /// cannot run it.
    #[must_use]
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.mode = RunMode::Accelerated;
        self.kernel = Some(kernel);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed the label vector instead of initializing it randomly
    #[must_use]
    pub fn with_init_labels(mut self, labels: Vec<usize>) -> Self {
        self.init_labels = Some(labels);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Engine, NewEngineError> {
        let n_obs = self.data.n_rows();
        if n_obs == 0 || self.data.n_cols() == 0 {
            return Err(NewEngineError::EmptyObservations);
        }

        let prior = if self.data.n_cols() == 1 {
            Prior::Scalar(self.scalar_prior)
        } else {
            let dims = self.data.n_cols();
            Prior::Vector(match self.niw_k {
                Some(k) => NormalInvWishart::with_k(dims, k),
                None => NormalInvWishart::new(dims),
            })
        };

        // Scoring a labeling is only defined for scalar observations, and
        // best-sample tracking needs the score
        if self.config.record_best
            && matches!(prior, Prior::Vector(_))
        {
            return Err(NewEngineError::RecordBestUnsupported);
        }

        let strategy = match self.mode {
            RunMode::Host => Strategy::Sequential,
            RunMode::Accelerated => {
                let device = Device::acquire()?;
                let kernel = match self.kernel {
                    Some(requested) => {
                        if !device.supports(requested) {
                            return Err(NewEngineError::UnsupportedKernel {
                                requested,
                            });
                        }
                        requested
                    }
                    None => device.preferred_kernel(),
                };
                Strategy::Parallel { device, kernel }
            }
        };

        let mut rng = match self.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };

        let asgn = match self.init_labels {
            Some(labels) => {
                if labels.len() != n_obs {
                    return Err(NewEngineError::InitLabelsLengthMismatch {
                        n_labels: labels.len(),
                        n_obs,
                    });
                }
                labels
            }
            None => {
                let high = n_obs.min(10);
                (0..n_obs).map(|_| rng.gen_range(0..high)).collect()
            }
        };

        Ok(Engine {
            data: self.data,
            asgn,
            crp: Crp::new(self.alpha),
            prior,
            strategy,
            config: self.config,
            rng,
            best: None,
            sweeps_since_best: 0,
            accel_time: std::time::Duration::ZERO,
            total_time: std::time::Duration::ZERO,
        })
    }
}
