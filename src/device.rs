//! The data-parallel compute device
use thiserror::Error;

use crate::alg::Kernel;

/// A run-scoped handle on the data-parallel device.
///
/// Acquired once when an accelerated engine is built and held for the life
/// of the engine; the underlying pool is torn down when the engine drops.
/// Per-sweep buffers are rebuilt every sweep, but the pool itself is never
/// recreated mid-run.
#[derive(Debug)]
pub struct Device {
    pool: rayon::ThreadPool,
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("could not build the compute pool: {0}")]
    Acquire(#[from] rayon::ThreadPoolBuildError),
}

impl Device {
    /// Probe and acquire the device. Failure here is fatal for the run;
    /// there is no mid-run fallback to the host path.
    pub fn acquire() -> Result<Self, DeviceError> {
        let pool = rayon::ThreadPoolBuilder::new().build()?;
        Ok(Device { pool })
    }

    /// Number of parallel units the device offers
    #[inline]
    pub fn n_units(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// The kernel variant best suited to this device: `Unrolled` when the
    /// device has fine-grained parallelism, `Loopy` otherwise
    pub fn preferred_kernel(&self) -> Kernel {
        if self.n_units() > 1 {
            Kernel::Unrolled
        } else {
            Kernel::Loopy
        }
    }

    pub fn supports(&self, kernel: Kernel) -> bool {
        match kernel {
            Kernel::Unrolled => self.n_units() > 1,
            Kernel::Loopy => true,
        }
    }

    /// Run `op` on the device
    #[inline]
    pub fn install<F, T>(&self, op: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        self.pool.install(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_yields_at_least_one_unit() {
        let device = Device::acquire().unwrap();
        assert!(device.n_units() >= 1);
    }

    #[test]
    fn loopy_is_always_supported() {
        let device = Device::acquire().unwrap();
        assert!(device.supports(Kernel::Loopy));
    }

    #[test]
    fn preferred_kernel_is_supported() {
        let device = Device::acquire().unwrap();
        assert!(device.supports(device.preferred_kernel()));
    }
}
