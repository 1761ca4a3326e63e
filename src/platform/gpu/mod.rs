//! GPU-specific platform code.
//!
//! Backends are tried in order: NVML, nvidia-smi, rocm-smi, then
//! name-only detection through lspci.

mod amd;
mod lspci;
mod nvidia;

pub use amd::{parse_rocm_smi, RocmSmiProvider};
pub use lspci::{parse_lspci, LspciProvider};
#[cfg(feature = "nvml")]
pub use nvidia::NvmlGpuProvider;
pub use nvidia::{parse_nvidia_smi, NvidiaSmiProvider};

use crate::core::system_monitor::GpuProvider;
use crate::error::{Result, WellzError};

/// Attempt to get an available GPU provider
///
/// Returns error if no GPU is available.
pub fn get_gpu_provider() -> Result<Box<dyn GpuProvider>> {
    #[cfg(feature = "nvml")]
    {
        match NvmlGpuProvider::new() {
            Ok(provider) => return Ok(Box::new(provider)),
            Err(e) => log::debug!("{}", e),
        }
    }

    match NvidiaSmiProvider::new() {
        Ok(provider) => return Ok(Box::new(provider)),
        Err(e) => log::debug!("{}", e),
    }

    match RocmSmiProvider::new() {
        Ok(provider) => return Ok(Box::new(provider)),
        Err(e) => log::debug!("{}", e),
    }

    if cfg!(target_os = "linux") {
        match LspciProvider::new() {
            Ok(provider) => return Ok(Box::new(provider)),
            Err(e) => log::debug!("{}", e),
        }
    }

    Err(WellzError::gpu_not_available("No supported GPU found"))
}
