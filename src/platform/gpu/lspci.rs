use crate::core::system_monitor::{Availability, GpuMetrics, GpuProvider, GpuVendor};
use crate::error::{Result, WellzError};
use crate::platform::command::run_tool;

/// Name-only detection from `lspci` for GPUs without a metrics tool.
pub struct LspciProvider {
    detected: GpuMetrics,
}

impl LspciProvider {
    pub fn new() -> Result<Self> {
        match run_tool("lspci", &[]) {
            Availability::Available(text) => parse_lspci(&text)
                .map(|detected| Self { detected })
                .ok_or_else(|| WellzError::gpu_not_available("No display controller in lspci")),
            Availability::Unavailable(reason) => {
                Err(WellzError::gpu_not_available(reason.to_string()))
            }
        }
    }
}

impl GpuProvider for LspciProvider {
    fn vendor(&self) -> GpuVendor {
        self.detected.vendor
    }

    fn backend(&self) -> &'static str {
        "lspci"
    }

    fn collect_metrics(&mut self) -> Result<GpuMetrics> {
        Ok(self.detected.clone())
    }
}

/// First VGA or 3D controller line, mapped to a vendor and a short name.
pub fn parse_lspci(output: &str) -> Option<GpuMetrics> {
    let line = output
        .lines()
        .find(|l| l.contains("VGA") || l.contains("3D controller"))?;

    let (vendor, name) = if line.contains("NVIDIA") {
        (GpuVendor::Nvidia, "NVIDIA GPU")
    } else if line.contains("AMD") || line.contains("ATI") {
        (GpuVendor::Amd, "AMD GPU")
    } else if line.contains("Intel") {
        (GpuVendor::Intel, "Intel Graphics")
    } else {
        (GpuVendor::Unknown, "Unknown GPU")
    };

    Some(GpuMetrics::name_only(vendor, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lspci_intel() {
        let out = "00:00.0 Host bridge: Intel Corporation Device 4621\n\
                   00:02.0 VGA compatible controller: Intel Corporation Alder Lake-P GT2\n";
        let gpu = parse_lspci(out).unwrap();
        assert_eq!(gpu.vendor, GpuVendor::Intel);
        assert_eq!(gpu.name, "Intel Graphics");
        assert!(gpu.utilization_percent.is_none());
    }

    #[test]
    fn test_parse_lspci_no_gpu() {
        assert!(parse_lspci("00:1f.3 Audio device: Intel Corporation\n").is_none());
    }
}
