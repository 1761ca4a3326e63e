#[cfg(feature = "nvml")]
use nvml_wrapper::{enum_wrappers::device::TemperatureSensor, Device, Nvml};

use crate::core::system_monitor::{Availability, GpuMetrics, GpuProvider, GpuVendor};
use crate::error::{Result, WellzError};
use crate::platform::command::{is_tool_available, run_tool};

const MIB: u64 = 1024 * 1024;

/// NVIDIA GPU provider using NVML
#[cfg(feature = "nvml")]
pub struct NvmlGpuProvider {
    nvml: Nvml,
    device_index: u32,
}

#[cfg(feature = "nvml")]
impl NvmlGpuProvider {
    /// Initializes NVML and selects the first GPU.
    pub fn new() -> Result<Self> {
        let nvml = Nvml::init()
            .map_err(|e| WellzError::gpu_not_available(format!("Failed to init NVML: {}", e)))?;

        nvml.device_by_index(0)
            .map_err(|e| WellzError::gpu_not_available(format!("GPU 0 not found: {}", e)))?;

        Ok(Self {
            nvml,
            device_index: 0,
        })
    }

    fn get_device(&self) -> Result<Device<'_>> {
        self.nvml.device_by_index(self.device_index).map_err(|e| {
            WellzError::metric_collection(format!("Failed to get GPU device: {}", e))
        })
    }
}

#[cfg(feature = "nvml")]
impl GpuProvider for NvmlGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn backend(&self) -> &'static str {
        "nvml"
    }

    fn collect_metrics(&mut self) -> Result<GpuMetrics> {
        let device = self.get_device()?;

        let name = device
            .name()
            .unwrap_or_else(|_| "Unknown NVIDIA GPU".to_string());
        let memory = device.memory_info().ok();

        Ok(GpuMetrics {
            vendor: GpuVendor::Nvidia,
            name,
            utilization_percent: device.utilization_rates().ok().map(|u| u.gpu as f32),
            memory_used_bytes: memory.as_ref().map(|m| m.used),
            memory_total_bytes: memory.as_ref().map(|m| m.total),
            temperature_celsius: device
                .temperature(TemperatureSensor::Gpu)
                .ok()
                .map(|t| t as f32),
        })
    }
}

/// NVIDIA GPU provider shelling out to `nvidia-smi`
pub struct NvidiaSmiProvider;

impl NvidiaSmiProvider {
    pub fn new() -> Result<Self> {
        if !is_tool_available("nvidia-smi") {
            return Err(WellzError::gpu_not_available("nvidia-smi not installed"));
        }
        let mut provider = Self;
        provider.collect_metrics()?;
        Ok(provider)
    }
}

impl GpuProvider for NvidiaSmiProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn backend(&self) -> &'static str {
        "nvidia-smi"
    }

    fn collect_metrics(&mut self) -> Result<GpuMetrics> {
        let output = run_tool(
            "nvidia-smi",
            &[
                "--query-gpu=name,utilization.gpu,memory.used,memory.total,temperature.gpu",
                "--format=csv,noheader,nounits",
            ],
        );
        match output {
            Availability::Available(text) => parse_nvidia_smi(&text).ok_or_else(|| {
                WellzError::metric_collection("Unexpected nvidia-smi output")
            }),
            Availability::Unavailable(reason) => {
                Err(WellzError::metric_collection(reason.to_string()))
            }
        }
    }
}

/// Parse the first line of
/// `nvidia-smi --query-gpu=name,utilization.gpu,memory.used,memory.total,temperature.gpu
/// --format=csv,noheader,nounits`. Memory is reported in MiB; fields the
/// driver cannot read come back as `[N/A]` and map to `None`.
pub fn parse_nvidia_smi(output: &str) -> Option<GpuMetrics> {
    let line = output.lines().find(|l| !l.trim().is_empty())?;
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 || fields[0].is_empty() {
        return None;
    }

    let number = |s: &str| s.parse::<f64>().ok();

    Some(GpuMetrics {
        vendor: GpuVendor::Nvidia,
        name: fields[0].to_string(),
        utilization_percent: number(fields[1]).map(|v| v as f32),
        memory_used_bytes: number(fields[2]).map(|v| (v * MIB as f64) as u64),
        memory_total_bytes: number(fields[3]).map(|v| (v * MIB as f64) as u64),
        temperature_celsius: number(fields[4]).map(|v| v as f32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nvidia_smi_line() {
        let gpu = parse_nvidia_smi("NVIDIA GeForce RTX 3070, 37, 2048, 8192, 61\n").unwrap();
        assert_eq!(gpu.name, "NVIDIA GeForce RTX 3070");
        assert_eq!(gpu.utilization_percent, Some(37.0));
        assert_eq!(gpu.memory_used_bytes, Some(2048 * MIB));
        assert_eq!(gpu.memory_total_bytes, Some(8192 * MIB));
        assert_eq!(gpu.temperature_celsius, Some(61.0));
        assert_eq!(gpu.memory_percent(), Some(25.0));
    }

    #[test]
    fn test_parse_nvidia_smi_not_supported_fields() {
        let gpu = parse_nvidia_smi("Tesla T4, [N/A], 0, 15360, [N/A]").unwrap();
        assert_eq!(gpu.utilization_percent, None);
        assert_eq!(gpu.temperature_celsius, None);
    }

    #[test]
    fn test_parse_nvidia_smi_rejects_garbage() {
        assert!(parse_nvidia_smi("").is_none());
        assert!(parse_nvidia_smi("No devices were found").is_none());
    }
}
