//! Sequential sweep implementations.
//!
//! One sweep: rebuild the per-label sufficient statistics from the current
//! assignment, evaluate the posterior-predictive log density of every
//! observation under every active label and the sentinel, add the CRP
//! weights, then draw each observation's new label from its normalized row.
//! All draws use the one statistics snapshot taken at the top of the sweep;
//! the candidate vector is committed by the caller only after the sweep
//! completes.
use rand::Rng;
use twill_stats::dist::MvStudentT;
use twill_stats::prior::{NormalGamma, NormalInvWishart};
use twill_stats::{Crp, GaussianSuffStat, LabelTable, MvGaussianSuffStat};
use twill_utils::{ln_pflip, Matrix};

/// Per-label sufficient statistics aligned with the label table. Entry 0 is
/// the sentinel's empty statistic.
pub(super) fn scalar_stats(
    data: &Matrix<f64>,
    asgn: &[usize],
    table: &LabelTable,
) -> Vec<GaussianSuffStat> {
    table
        .labels()
        .iter()
        .enumerate()
        .map(|(ix, &label)| {
            if ix == 0 {
                GaussianSuffStat::new()
            } else {
                let mut stat = GaussianSuffStat::new();
                asgn.iter().enumerate().for_each(|(i, &z)| {
                    if z == label {
                        stat.observe(data[(i, 0)]);
                    }
                });
                stat
            }
        })
        .collect()
}

pub(super) fn vector_stats(
    data: &Matrix<f64>,
    asgn: &[usize],
    table: &LabelTable,
) -> Vec<MvGaussianSuffStat> {
    let dims = data.n_cols();
    table
        .labels()
        .iter()
        .enumerate()
        .map(|(ix, &label)| {
            if ix == 0 {
                MvGaussianSuffStat::new(dims)
            } else {
                MvGaussianSuffStat::from_rows(
                    dims,
                    asgn.iter()
                        .enumerate()
                        .filter(|&(_, &z)| z == label)
                        .map(|(i, _)| data.row(i)),
                )
            }
        })
        .collect()
}

/// The CRP mixing weight for one statistics record
#[inline]
pub(super) fn crp_weight(
    crp: &Crp,
    n_members: usize,
    n_obs: usize,
) -> f64 {
    if n_members > 0 {
        crp.ln_gibbs_weight(n_members, n_obs)
    } else {
        crp.ln_singleton_weight(n_obs)
    }
}

/// The dense observation-by-label grid of combined log weights
pub(super) fn scalar_logpost(
    data: &Matrix<f64>,
    stats: &[GaussianSuffStat],
    ng: &NormalGamma,
    crp: &Crp,
) -> Matrix<f64> {
    let n_obs = data.n_rows();
    let n_labels = stats.len();
    let mut values = vec![0.0; n_obs * n_labels];

    for (j, stat) in stats.iter().enumerate() {
        let pred = ng.predictive(stat);
        let w = crp_weight(crp, stat.n(), n_obs);
        for i in 0..n_obs {
            values[i * n_labels + j] = pred.ln_f(data[(i, 0)]) + w;
        }
    }

    Matrix::from_raw_parts(values, n_obs)
}

/// Vector analogue of [`scalar_logpost`]. `preds` carry each label's scale
/// matrix already inverted, so filling a column is quadratic-form work
/// only.
pub(super) fn vector_logpost(
    data: &Matrix<f64>,
    stats: &[MvGaussianSuffStat],
    preds: &[MvStudentT],
    crp: &Crp,
) -> Matrix<f64> {
    let n_obs = data.n_rows();
    let n_labels = stats.len();
    let mut values = vec![0.0; n_obs * n_labels];

    for (j, (stat, pred)) in stats.iter().zip(preds).enumerate() {
        let w = crp_weight(crp, stat.n(), n_obs);
        for i in 0..n_obs {
            values[i * n_labels + j] = pred.ln_f(data.row(i)) + w;
        }
    }

    Matrix::from_raw_parts(values, n_obs)
}

/// Draw every observation's new label from its row of log weights
pub(super) fn resample<R: Rng>(
    logpost: &Matrix<f64>,
    table: &LabelTable,
    rng: &mut R,
) -> Vec<usize> {
    (0..logpost.n_rows())
        .map(|i| table.labels()[ln_pflip(logpost.row(i), rng)])
        .collect()
}

pub(super) fn scalar_sweep<R: Rng>(
    data: &Matrix<f64>,
    asgn: &[usize],
    table: &LabelTable,
    ng: &NormalGamma,
    crp: &Crp,
    rng: &mut R,
) -> Vec<usize> {
    let stats = scalar_stats(data, asgn, table);
    let logpost = scalar_logpost(data, &stats, ng, crp);
    resample(&logpost, table, rng)
}

pub(super) fn vector_sweep<R: Rng>(
    data: &Matrix<f64>,
    asgn: &[usize],
    table: &LabelTable,
    niw: &NormalInvWishart,
    crp: &Crp,
    rng: &mut R,
) -> Vec<usize> {
    let stats = vector_stats(data, asgn, table);
    // one inversion per label per sweep
    let preds: Vec<MvStudentT> =
        stats.iter().map(|stat| niw.predictive(stat)).collect();
    let logpost = vector_logpost(data, &stats, &preds, crp);
    resample(&logpost, table, rng)
}
