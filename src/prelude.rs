//! Common import for general use.

pub use crate::{
    data, Builder, Engine, Kernel, RunConfig, RunMode, RunSummary,
};

pub use twill_stats::prior::{NormalGamma, NormalInvWishart};
pub use twill_stats::{Crp, GaussianSuffStat, LabelTable};
pub use twill_utils as utils;
pub use twill_utils::Matrix;
