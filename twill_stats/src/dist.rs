//! Posterior-predictive log densities
use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

/// Location-scale Student-t distribution.
///
/// The normalization constant is computed once at construction; evaluating a
/// column of the density grid then costs one `ln_1p` per observation.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentT {
    df: f64,
    loc: f64,
    scale: f64,
    ln_norm: f64,
}

impl StudentT {
    pub fn new(df: f64, loc: f64, scale: f64) -> Self {
        let ln_norm = ::special::Gamma::ln_gamma((df + 1.0) / 2.0).0
            - ::special::Gamma::ln_gamma(df / 2.0).0
            - 0.5 * (df * PI).ln()
            - scale.ln();
        StudentT {
            df,
            loc,
            scale,
            ln_norm,
        }
    }

    #[inline]
    pub fn df(&self) -> f64 {
        self.df
    }

    #[inline]
    pub fn loc(&self) -> f64 {
        self.loc
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Log density at `x`
    #[inline]
    pub fn ln_f(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        (z * z / self.df).ln_1p().mul_add(-(self.df + 1.0) / 2.0, self.ln_norm)
    }
}

/// Multivariate Student-t distribution.
///
/// The scale matrix is inverted and its determinant taken once at
/// construction, once per label per sweep, never per observation. A
/// singular scale matrix yields non-finite log densities rather than an
/// error.
#[derive(Clone, Debug, PartialEq)]
pub struct MvStudentT {
    df: f64,
    loc: DVector<f64>,
    sigma_inv: DMatrix<f64>,
    ln_norm: f64,
}

impl MvStudentT {
    pub fn new(df: f64, loc: DVector<f64>, sigma: DMatrix<f64>) -> Self {
        let dims = loc.len() as f64;
        let det = sigma.determinant();
        let sigma_inv = sigma.clone().try_inverse().unwrap_or_else(|| {
            DMatrix::from_element(sigma.nrows(), sigma.ncols(), f64::NAN)
        });

        let ln_norm = ::special::Gamma::ln_gamma(df / 2.0 + dims / 2.0).0
            - ::special::Gamma::ln_gamma(df / 2.0).0
            - 0.5 * det.ln()
            - 0.5 * dims * (df * PI).ln();

        MvStudentT {
            df,
            loc,
            sigma_inv,
            ln_norm,
        }
    }

    #[inline]
    pub fn df(&self) -> f64 {
        self.df
    }

    #[inline]
    pub fn loc(&self) -> &DVector<f64> {
        &self.loc
    }

    /// Log density at the observation row `x`
    pub fn ln_f(&self, x: &[f64]) -> f64 {
        let dims = self.loc.len() as f64;
        let dev = DVector::from_column_slice(x) - &self.loc;
        let quad = dev.dot(&(&self.sigma_inv * &dev));
        (quad / self.df)
            .ln_1p()
            .mul_add(-(self.df + dims) / 2.0, self.ln_norm)
    }
}
