//! Execution-strategy selectors
use serde::{Deserialize, Serialize};

/// Where the density-and-resample passes execute
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Everything on the controlling thread
    #[default]
    Host,
    /// Density evaluation and resampling on the engine's thread pool
    Accelerated,
}

/// The data-parallel kernel variant.
///
/// `Unrolled` spends one task per (observation, label) cell and resamples in
/// a separate pass; `Loopy` spends one task per observation that iterates
/// over the labels itself, for devices without efficient fine-grained
/// parallelism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    Unrolled,
    Loopy,
}

impl std::str::FromStr for Kernel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unrolled" => Ok(Self::Unrolled),
            "loopy" => Ok(Self::Loopy),
            _ => Err(format!("cannot parse '{s}'")),
        }
    }
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Unrolled => write!(f, "unrolled"),
            Self::Loopy => write!(f, "loopy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_from_str_round_trips() {
        for kernel in [Kernel::Unrolled, Kernel::Loopy] {
            let parsed: Kernel = kernel.to_string().parse().unwrap();
            assert_eq!(parsed, kernel);
        }
    }

    #[test]
    fn kernel_from_str_rejects_unknown() {
        assert!("warp".parse::<Kernel>().is_err());
    }
}
