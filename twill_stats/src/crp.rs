use serde::{Deserialize, Serialize};

/// Chinese Restaurant Process mixing weights in log space.
///
/// `alpha` is the concentration parameter. Malformed values (non-positive,
/// non-finite) are accepted and propagate non-finite log weights rather than
/// erroring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crp {
    pub alpha: f64,
}

impl Crp {
    pub fn new(alpha: f64) -> Self {
        Crp { alpha }
    }

    /// Log weight of joining an existing cluster with `n_k` members out of
    /// `n` observations
    #[inline]
    pub fn ln_gibbs_weight(&self, n_k: usize, n: usize) -> f64 {
        (n_k as f64 / (n as f64 + self.alpha)).ln()
    }

    /// Log weight of seating at a new cluster
    #[inline]
    pub fn ln_singleton_weight(&self, n: usize) -> f64 {
        (self.alpha / (n as f64 + self.alpha)).ln()
    }
}

impl Default for Crp {
    fn default() -> Self {
        Crp { alpha: 1.0 }
    }
}
