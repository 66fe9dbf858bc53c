//! Sufficient statistics for Gaussian clusters
use nalgebra::{DMatrix, DVector};

/// Count, mean, and dispersion of a scalar cluster.
///
/// Supports both one-shot aggregation over a cluster's members and streaming
/// one-point updates, which the joint log-probability evaluator uses to build
/// leave-one-out statistics as observations are folded in.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GaussianSuffStat {
    n: usize,
    mean: f64,
    sum_sq_dev: f64,
}

impl GaussianSuffStat {
    /// The empty statistic. Predictive formulas applied to it reduce to the
    /// prior predictive.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(xs: &[f64]) -> Self {
        let mut stat = Self::new();
        xs.iter().for_each(|&x| stat.observe(x));
        stat
    }

    /// Fold in an observation (Welford update)
    pub fn observe(&mut self, x: f64) {
        self.n += 1;
        let diff = x - self.mean;
        self.mean += diff / self.n as f64;
        self.sum_sq_dev = (x - self.mean).mul_add(diff, self.sum_sq_dev);
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean, `n` times the population
    /// variance
    #[inline]
    pub fn sum_sq_dev(&self) -> f64 {
        self.sum_sq_dev
    }

    /// Population variance of the members; zero for empty and singleton
    /// clusters
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum_sq_dev / self.n as f64
        }
    }
}

/// Count, mean vector, and scatter matrix of a multivariate cluster
#[derive(Clone, Debug, PartialEq)]
pub struct MvGaussianSuffStat {
    n: usize,
    mean: DVector<f64>,
    scatter: DMatrix<f64>,
}

impl MvGaussianSuffStat {
    /// The empty statistic in `dims` dimensions
    pub fn new(dims: usize) -> Self {
        MvGaussianSuffStat {
            n: 0,
            mean: DVector::zeros(dims),
            scatter: DMatrix::zeros(dims, dims),
        }
    }

    /// Aggregate the member rows of a cluster.
    ///
    /// Two passes: the arithmetic mean, then the scatter matrix
    /// `Σ (x − mean)(x − mean)ᵀ` about it.
    pub fn from_rows<'a, I>(dims: usize, rows: I) -> Self
    where
        I: Iterator<Item = &'a [f64]> + Clone,
    {
        let n = rows.clone().count();
        if n == 0 {
            return Self::new(dims);
        }

        let mut mean = DVector::zeros(dims);
        rows.clone().for_each(|row| {
            mean += DVector::from_column_slice(row);
        });
        mean /= n as f64;

        let mut scatter = DMatrix::zeros(dims, dims);
        rows.for_each(|row| {
            let dev = DVector::from_column_slice(row) - &mean;
            scatter += &dev * dev.transpose();
        });

        MvGaussianSuffStat { n, mean, scatter }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    #[inline]
    pub fn scatter(&self) -> &DMatrix<f64> {
        &self.scatter
    }
}
