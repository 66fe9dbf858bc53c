use serde::{Deserialize, Serialize};

use crate::dist::StudentT;
use crate::suffstat::GaussianSuffStat;

/// Normal-Gamma prior on the mean and precision of a scalar Gaussian
/// cluster.
///
/// `m` and `k` are the prior mean and its pseudo-count; `a` and `b` are the
/// Gamma shape and rate on the precision. Applied to the empty sufficient
/// statistic, the posterior is the prior itself, so the sentinel cluster's
/// predictive reduces to the prior predictive with no special casing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalGamma {
    pub m: f64,
    pub k: f64,
    pub a: f64,
    pub b: f64,
}

impl NormalGamma {
    pub fn new(m: f64, k: f64, a: f64, b: f64) -> Self {
        NormalGamma { m, k, a, b }
    }

    /// Closed-form parameter update given a cluster's sufficient statistics
    pub fn posterior(&self, stat: &GaussianSuffStat) -> Self {
        let n = stat.n() as f64;
        let kn = self.k + n;
        let mn = (self.k * self.m + n * stat.mean()) / kn;
        let an = self.a + n / 2.0;
        let bn = self.b
            + 0.5 * stat.sum_sq_dev()
            + self.k * n * (stat.mean() - self.m).powi(2) / (2.0 * kn);
        NormalGamma::new(mn, kn, an, bn)
    }

    /// Posterior predictive density of one more observation: a Student-t
    /// with 2·aₙ degrees of freedom located at the posterior mean
    pub fn predictive(&self, stat: &GaussianSuffStat) -> StudentT {
        let post = self.posterior(stat);
        let lambda = post.a * post.k / (post.b * (post.k + 1.0));
        StudentT::new(2.0 * post.a, post.m, lambda.sqrt().recip())
    }
}

impl Default for NormalGamma {
    fn default() -> Self {
        NormalGamma {
            m: 1.0,
            k: 0.001,
            a: 1.0,
            b: 1.0,
        }
    }
}
