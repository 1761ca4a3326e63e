use super::metrics::GpuMetrics;
use crate::error::Result;

/// Trait for GPU metrics providers
///
/// Implementations live in the platform layer, one per backend
/// (NVML, nvidia-smi, rocm-smi, lspci).
pub trait GpuProvider: Send {
    /// Get the vendor of the GPU
    fn vendor(&self) -> GpuVendor;

    /// Short backend name, for logs
    fn backend(&self) -> &'static str;

    /// Collect current GPU metrics
    fn collect_metrics(&mut self) -> Result<GpuMetrics>;
}

pub use super::metrics::GpuVendor;
