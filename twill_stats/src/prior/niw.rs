use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::dist::MvStudentT;
use crate::suffstat::MvGaussianSuffStat;

/// Normal-Inverse-Wishart prior on the mean and covariance of a
/// multivariate Gaussian cluster.
///
/// The prior mean is the origin, the Wishart degrees of freedom equal the
/// dimensionality, and the scale matrix is the identity; only the mean
/// pseudo-count `k` is free. With those constants the empty statistic again
/// reduces the predictive to the prior predictive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalInvWishart {
    pub k: f64,
    pub dims: usize,
}

impl NormalInvWishart {
    pub fn new(dims: usize) -> Self {
        NormalInvWishart { k: 0.01, dims }
    }

    pub fn with_k(dims: usize, k: f64) -> Self {
        NormalInvWishart { k, dims }
    }

    /// Predictive degrees of freedom, `v₀ + n − D + 1` with `v₀ = D`
    #[inline]
    pub fn predictive_df(&self, stat: &MvGaussianSuffStat) -> f64 {
        stat.n() as f64 + 1.0
    }

    /// The multivariate-t scale matrix for a cluster:
    /// `(T₀ + S + (k₀·n/kₙ)·(μ₀ − mean)(μ₀ − mean)ᵀ) · (kₙ+1)/(kₙ·(vₙ−D+1))`
    pub fn scale_matrix(&self, stat: &MvGaussianSuffStat) -> DMatrix<f64> {
        let d = self.dims;
        let n = stat.n() as f64;
        let kn = self.k + n;
        let df = self.predictive_df(stat);

        // mu0 is the origin
        let mu0_dev = -stat.mean();
        let mut sigma = DMatrix::identity(d, d) + stat.scatter();
        sigma += (self.k * n / kn) * (&mu0_dev * mu0_dev.transpose());
        sigma * ((kn + 1.0) / (kn * df))
    }

    /// Posterior predictive density of one more observation.
    ///
    /// Inverts the scale matrix once; callers are expected to construct this
    /// once per label per sweep and evaluate it for every observation.
    pub fn predictive(&self, stat: &MvGaussianSuffStat) -> MvStudentT {
        MvStudentT::new(
            self.predictive_df(stat),
            stat.mean().clone_owned(),
            self.scale_matrix(stat),
        )
    }
}
