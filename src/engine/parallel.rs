//! Data-parallel sweep implementations.
//!
//! The aggregation step is branchy and bandwidth-bound, so it stays on the
//! controlling thread, while the density grid and the resample pass run on
//! the engine's device. Each parallel task writes only its own output cell,
//! so no locking is needed. The device has no random state of its own: the
//! controlling thread draws one uniform per observation per sweep and hands
//! the batch to the resample pass. Every sweep is a full barrier; the
//! density grid and statistics buffers are rebuilt each sweep at the
//! sweep's current label count.
use std::time::{Duration, Instant};

use rand::Rng;
use rayon::prelude::*;
use twill_stats::dist::MvStudentT;
use twill_stats::prior::{NormalGamma, NormalInvWishart};
use twill_stats::{
    Crp, GaussianSuffStat, LabelTable, MvGaussianSuffStat,
};
use twill_utils::{ln_pflip_with, Matrix};

use super::gibbs::{crp_weight, scalar_stats, vector_stats};
use crate::alg::Kernel;
use crate::device::Device;

pub(super) fn scalar_sweep<R: Rng>(
    device: &Device,
    kernel: Kernel,
    data: &Matrix<f64>,
    asgn: &[usize],
    table: &LabelTable,
    ng: &NormalGamma,
    crp: &Crp,
    rng: &mut R,
) -> (Vec<usize>, Duration) {
    let stats = scalar_stats(data, asgn, table);
    let us: Vec<f64> = (0..data.n_rows()).map(|_| rng.gen()).collect();

    let start = Instant::now();
    let candidate = match kernel {
        Kernel::Unrolled => device.install(|| {
            let logpost = scalar_density_pass(data, &stats, ng, crp);
            resample_pass(&logpost, table, &us)
        }),
        Kernel::Loopy => device
            .install(|| scalar_loopy_pass(data, table, &stats, ng, crp, &us)),
    };

    (candidate, start.elapsed())
}

pub(super) fn vector_sweep<R: Rng>(
    device: &Device,
    kernel: Kernel,
    data: &Matrix<f64>,
    asgn: &[usize],
    table: &LabelTable,
    niw: &NormalInvWishart,
    crp: &Crp,
    rng: &mut R,
) -> (Vec<usize>, Duration) {
    let stats = vector_stats(data, asgn, table);
    let us: Vec<f64> = (0..data.n_rows()).map(|_| rng.gen()).collect();

    let start = Instant::now();
    // assemble, invert, and factor each label's scale matrix in parallel,
    // one task per label, once per sweep
    let preds: Vec<MvStudentT> = device
        .install(|| stats.par_iter().map(|s| niw.predictive(s)).collect());

    let candidate = match kernel {
        Kernel::Unrolled => device.install(|| {
            let logpost = vector_density_pass(data, &stats, &preds, crp);
            resample_pass(&logpost, table, &us)
        }),
        Kernel::Loopy => device.install(|| {
            vector_loopy_pass(data, table, &stats, &preds, crp, &us)
        }),
    };

    (candidate, start.elapsed())
}

/// One task per (observation, label) cell of the density grid
fn scalar_density_pass(
    data: &Matrix<f64>,
    stats: &[GaussianSuffStat],
    ng: &NormalGamma,
    crp: &Crp,
) -> Matrix<f64> {
    let n_obs = data.n_rows();
    let n_labels = stats.len();
    let mut values = vec![0.0; n_obs * n_labels];

    values.par_iter_mut().enumerate().for_each(|(ix, lp)| {
        let i = ix / n_labels;
        let j = ix % n_labels;
        let stat = &stats[j];
        let pred = ng.predictive(stat);
        *lp = pred.ln_f(data[(i, 0)]) + crp_weight(crp, stat.n(), n_obs);
    });

    Matrix::from_raw_parts(values, n_obs)
}

fn vector_density_pass(
    data: &Matrix<f64>,
    stats: &[MvGaussianSuffStat],
    preds: &[MvStudentT],
    crp: &Crp,
) -> Matrix<f64> {
    let n_obs = data.n_rows();
    let n_labels = stats.len();
    let mut values = vec![0.0; n_obs * n_labels];

    values.par_iter_mut().enumerate().for_each(|(ix, lp)| {
        let i = ix / n_labels;
        let j = ix % n_labels;
        *lp = preds[j].ln_f(data.row(i))
            + crp_weight(crp, stats[j].n(), n_obs);
    });

    Matrix::from_raw_parts(values, n_obs)
}

/// One task per observation, consuming its pre-drawn uniform
fn resample_pass(
    logpost: &Matrix<f64>,
    table: &LabelTable,
    us: &[f64],
) -> Vec<usize> {
    logpost
        .par_rows()
        .zip(us.par_iter())
        .map(|(row, &u)| table.labels()[ln_pflip_with(row, u)])
        .collect()
}

/// One task per observation that iterates the labels itself and draws
/// inline, for devices without efficient fine-grained parallelism
fn scalar_loopy_pass(
    data: &Matrix<f64>,
    table: &LabelTable,
    stats: &[GaussianSuffStat],
    ng: &NormalGamma,
    crp: &Crp,
    us: &[f64],
) -> Vec<usize> {
    let n_obs = data.n_rows();
    us.par_iter()
        .enumerate()
        .map(|(i, &u)| {
            let x = data[(i, 0)];
            let row: Vec<f64> = stats
                .iter()
                .map(|stat| {
                    ng.predictive(stat).ln_f(x)
                        + crp_weight(crp, stat.n(), n_obs)
                })
                .collect();
            table.labels()[ln_pflip_with(&row, u)]
        })
        .collect()
}

fn vector_loopy_pass(
    data: &Matrix<f64>,
    table: &LabelTable,
    stats: &[MvGaussianSuffStat],
    preds: &[MvStudentT],
    crp: &Crp,
    us: &[f64],
) -> Vec<usize> {
    let n_obs = data.n_rows();
    us.par_iter()
        .enumerate()
        .map(|(i, &u)| {
            let x = data.row(i);
            let row: Vec<f64> = stats
                .iter()
                .zip(preds)
                .map(|(stat, pred)| {
                    pred.ln_f(x) + crp_weight(crp, stat.n(), n_obs)
                })
                .collect();
            table.labels()[ln_pflip_with(&row, u)]
        })
        .collect()
}
