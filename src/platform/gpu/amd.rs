use crate::core::system_monitor::{Availability, GpuMetrics, GpuProvider, GpuVendor};
use crate::error::{Result, WellzError};
use crate::platform::command::{is_tool_available, run_tool};

/// AMD GPU provider shelling out to `rocm-smi`
pub struct RocmSmiProvider;

impl RocmSmiProvider {
    pub fn new() -> Result<Self> {
        if !is_tool_available("rocm-smi") {
            return Err(WellzError::gpu_not_available("rocm-smi not installed"));
        }
        let mut provider = Self;
        provider.collect_metrics()?;
        Ok(provider)
    }
}

impl GpuProvider for RocmSmiProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Amd
    }

    fn backend(&self) -> &'static str {
        "rocm-smi"
    }

    fn collect_metrics(&mut self) -> Result<GpuMetrics> {
        let output = run_tool(
            "rocm-smi",
            &[
                "--showproductname",
                "--showuse",
                "--showtemp",
                "--showmeminfo",
                "vram",
            ],
        );
        match output {
            Availability::Available(text) => parse_rocm_smi(&text)
                .ok_or_else(|| WellzError::metric_collection("Unexpected rocm-smi output")),
            Availability::Unavailable(reason) => {
                Err(WellzError::metric_collection(reason.to_string()))
            }
        }
    }
}

/// Trailing value after the last `:` on a rocm-smi line
fn trailing_value(line: &str) -> Option<&str> {
    line.rsplit(':').next().map(str::trim).filter(|v| !v.is_empty())
}

fn trailing_number(line: &str) -> Option<f64> {
    trailing_value(line)?
        .trim_end_matches(['%', 'c', 'C'])
        .parse()
        .ok()
}

/// Parse `rocm-smi` text output for the first card (`GPU[0]`).
///
/// Returns `None` when no GPU line at all was found.
pub fn parse_rocm_smi(output: &str) -> Option<GpuMetrics> {
    let mut gpu = GpuMetrics::name_only(GpuVendor::Amd, "AMD GPU");
    let mut seen = false;

    for line in output.lines().filter(|l| l.trim_start().starts_with("GPU[0]")) {
        seen = true;
        if line.contains("Card series") || line.contains("Card Series") {
            if let Some(name) = trailing_value(line) {
                gpu.name = name.to_string();
            }
        } else if line.contains("GPU use") {
            gpu.utilization_percent = trailing_number(line).map(|v| v as f32);
        } else if line.contains("Temperature") && gpu.temperature_celsius.is_none() {
            gpu.temperature_celsius = trailing_number(line).map(|v| v as f32);
        } else if line.contains("VRAM Total Used Memory") {
            gpu.memory_used_bytes = trailing_number(line).map(|v| v as u64);
        } else if line.contains("VRAM Total Memory") {
            gpu.memory_total_bytes = trailing_number(line).map(|v| v as u64);
        }
    }

    seen.then_some(gpu)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
========================= ROCm System Management Interface =========================
GPU[0]		: Card series: 		Radeon RX 6800 XT
GPU[0]		: Temperature (Sensor edge) (C): 48.0
GPU[0]		: Temperature (Sensor junction) (C): 55.0
GPU[0]		: GPU use (%): 12
GPU[0]		: VRAM Total Memory (B): 17163091968
GPU[0]		: VRAM Total Used Memory (B): 1073741824
====================================================================================
";

    #[test]
    fn test_parse_rocm_smi() {
        let gpu = parse_rocm_smi(SAMPLE).unwrap();
        assert_eq!(gpu.name, "Radeon RX 6800 XT");
        assert_eq!(gpu.utilization_percent, Some(12.0));
        assert_eq!(gpu.temperature_celsius, Some(48.0));
        assert_eq!(gpu.memory_total_bytes, Some(17_163_091_968));
        assert_eq!(gpu.memory_used_bytes, Some(1_073_741_824));
    }

    #[test]
    fn test_parse_rocm_smi_without_cards() {
        assert!(parse_rocm_smi("WARNING: No AMD GPUs specified\n").is_none());
    }
}
