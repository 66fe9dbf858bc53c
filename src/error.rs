//! Error types
use thiserror::Error;

use crate::alg::Kernel;
use crate::device::DeviceError;

/// Failures detected while ingesting observation data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("the data source contains no observations")]
    Empty,
    #[error(
        "row {row} has {found} columns but the first row has {expected}"
    )]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("could not parse cell '{value}' at row {row}, column {col}")]
    InvalidCell {
        row: usize,
        col: usize,
        value: String,
    },
}

/// Failures detected when building an [`Engine`](crate::Engine)
#[derive(Debug, Error)]
pub enum NewEngineError {
    #[error("no observations provided")]
    EmptyObservations,
    #[error(
        "initial labels length ({n_labels}) does not match the number of \
         observations ({n_obs})"
    )]
    InitLabelsLengthMismatch { n_labels: usize, n_obs: usize },
    #[error("the device cannot run the {requested} kernel")]
    UnsupportedKernel { requested: Kernel },
    #[error("failed to acquire the compute device: {0}")]
    Device(#[from] DeviceError),
    #[error(
        "best-sample tracking requires scalar observations; joint \
         log probability is not implemented for multivariate data"
    )]
    RecordBestUnsupported,
}

/// Failures while scoring a label vector
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error(
        "joint log probability is not implemented for multivariate \
         observations"
    )]
    MultivariateUnsupported,
}

/// Failures during a sampling run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to write trace output: {0}")]
    TraceIo(#[from] std::io::Error),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
