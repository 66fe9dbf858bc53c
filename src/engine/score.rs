//! Joint log probability of the data and a complete labeling
use std::collections::BTreeMap;

use twill_stats::prior::NormalGamma;
use twill_stats::{Crp, GaussianSuffStat};
use twill_utils::Matrix;

use super::{Engine, Prior};
use crate::error::ScoreError;

impl Engine {
    /// Joint log probability of the observations and `asgn` under the CRP
    /// mixture, used to rank candidate samples.
    ///
    /// Only defined for scalar observations; multivariate labelings return
    /// an error rather than silently reusing the scalar formula.
    pub fn ln_score(&self, asgn: &[usize]) -> Result<f64, ScoreError> {
        match &self.prior {
            Prior::Vector(_) => Err(ScoreError::MultivariateUnsupported),
            Prior::Scalar(ng) => {
                Ok(scalar_ln_score(&self.data, asgn, ng, &self.crp))
            }
        }
    }
}

/// One streaming pass over the observations in order. Each point is scored
/// against the statistics of the points already folded into its cluster,
/// plus the CRP term for the seating pattern so far, then added to its
/// cluster's statistics.
fn scalar_ln_score(
    data: &Matrix<f64>,
    asgn: &[usize],
    ng: &NormalGamma,
    crp: &Crp,
) -> f64 {
    assert_eq!(asgn.len(), data.n_rows());

    let mut stats: BTreeMap<usize, GaussianSuffStat> = BTreeMap::new();
    let mut total = 0.0;

    for (n_seen, (&z, x)) in asgn
        .iter()
        .zip((0..data.n_rows()).map(|i| data[(i, 0)]))
        .enumerate()
    {
        let stat = stats.entry(z).or_default();
        let w = if stat.n() > 0 {
            crp.ln_gibbs_weight(stat.n(), n_seen)
        } else {
            crp.ln_singleton_weight(n_seen)
        };
        total += ng.predictive(stat).ln_f(x) + w;
        stat.observe(x);
    }

    total
}
