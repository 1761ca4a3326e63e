use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::os_info::Distro;

/// Text shown in place of a metric the host cannot provide.
pub const PLACEHOLDER: &str = "N/A";

/// Why a metric has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Unavailable {
    UnsupportedPlatform,
    ToolMissing(String),
    NoDevice,
    Failed(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::UnsupportedPlatform => write!(f, "not supported on this platform"),
            Unavailable::ToolMissing(tool) => write!(f, "{} not installed", tool),
            Unavailable::NoDevice => write!(f, "no device detected"),
            Unavailable::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

/// A metric value, or the reason it could not be read.
///
/// Collectors return this instead of an error for expected gaps
/// (no battery, no GPU, tool not on PATH).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::Unavailable(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Availability<U> {
        match self {
            Availability::Available(v) => Availability::Available(f(v)),
            Availability::Unavailable(reason) => Availability::Unavailable(reason),
        }
    }

    /// Format the value, or return [`PLACEHOLDER`].
    pub fn display_or_placeholder<F: FnOnce(&T) -> String>(&self, f: F) -> String {
        match self {
            Availability::Available(v) => f(v),
            Availability::Unavailable(_) => PLACEHOLDER.to_string(),
        }
    }
}

impl<T> Default for Availability<T> {
    fn default() -> Self {
        Availability::Unavailable(Unavailable::NoDevice)
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Availability::Available(v),
            None => Availability::Unavailable(Unavailable::NoDevice),
        }
    }
}

/// A single metric reading at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub value: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Sample<T> {
    pub fn now(value: T) -> Self {
        Self {
            value,
            timestamp: Utc::now(),
        }
    }
}

/// Complete system metrics snapshot for one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub timestamp: DateTime<Utc>,
    pub host: HostInfo,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub gpu: Availability<GpuMetrics>,
    pub disks: Vec<DiskMetrics>,
    pub disk_io: DiskIoCounters,
    pub network: NetworkMetrics,
    pub temperatures: Vec<TemperatureReading>,
    pub battery: Availability<BatteryMetrics>,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            host: HostInfo::default(),
            cpu: CpuMetrics::default(),
            memory: MemoryMetrics::default(),
            gpu: Availability::default(),
            disks: Vec::new(),
            disk_io: DiskIoCounters::default(),
            network: NetworkMetrics::default(),
            temperatures: Vec::new(),
            battery: Availability::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInfo {
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel: String,
    pub arch: String,
    pub uptime_secs: u64,
    pub distro: Distro,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpuMetrics {
    pub brand: String,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub frequency_mhz: u64,
    pub global_usage: f32,
    pub per_core_usage: Vec<f32>,
    pub load_average: (f64, f64, f64), // 1, 5, 15 min
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub usage_percent: f32,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
    pub swap_percent: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuMetrics {
    pub vendor: GpuVendor,
    pub name: String,
    pub utilization_percent: Option<f32>,
    pub memory_used_bytes: Option<u64>,
    pub memory_total_bytes: Option<u64>,
    pub temperature_celsius: Option<f32>,
}

impl GpuMetrics {
    /// Detected by name only, no live readings.
    pub fn name_only(vendor: GpuVendor, name: impl Into<String>) -> Self {
        Self {
            vendor,
            name: name.into(),
            utilization_percent: None,
            memory_used_bytes: None,
            memory_total_bytes: None,
            temperature_celsius: None,
        }
    }

    pub fn memory_percent(&self) -> Option<f32> {
        match (self.memory_used_bytes, self.memory_total_bytes) {
            (Some(used), Some(total)) if total > 0 => Some(used as f32 / total as f32 * 100.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    #[default]
    Unknown,
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GpuVendor::Nvidia => "NVIDIA",
            GpuVendor::Amd => "AMD",
            GpuVendor::Intel => "Intel",
            GpuVendor::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiskMetrics {
    pub name: String,
    pub mount_point: String,
    pub fs_type: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub usage_percent: f32,
}

/// Cumulative disk I/O byte counters, summed over all disks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DiskIoCounters {
    pub read_bytes: u64,
    pub written_bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub hostname: String,
    pub interfaces: Vec<InterfaceMetrics>,
    /// Cumulative totals across every interface.
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub packets_received: u64,
    pub packets_sent: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceMetrics {
    pub name: String,
    pub ipv4: Option<String>,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub label: String,
    pub current_celsius: f32,
    pub max_celsius: Option<f32>,
    pub critical_celsius: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryState {
    Charging,
    Discharging,
    Full,
    Unknown,
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BatteryState::Charging => "Charging",
            BatteryState::Discharging => "Discharging",
            BatteryState::Full => "Full",
            BatteryState::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryMetrics {
    pub percent: f32,
    pub state: BatteryState,
    pub time_remaining_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_renders_placeholder() {
        let gpu: Availability<GpuMetrics> = Availability::Unavailable(Unavailable::NoDevice);
        assert_eq!(gpu.display_or_placeholder(|g| g.name.clone()), PLACEHOLDER);
    }

    #[test]
    fn test_gpu_memory_percent_requires_total() {
        let mut gpu = GpuMetrics::name_only(GpuVendor::Amd, "Radeon");
        assert_eq!(gpu.memory_percent(), None);

        gpu.memory_used_bytes = Some(512);
        gpu.memory_total_bytes = Some(2048);
        assert_eq!(gpu.memory_percent(), Some(25.0));
    }

    #[test]
    fn test_availability_serializes_with_status_tag() {
        let value: Availability<u32> = Availability::Available(7);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"status":"available","value":7}"#);
    }

    #[test]
    fn test_sample_serializes_value_and_timestamp() {
        let sample = Sample::now(42u64);
        let json = serde_json::to_value(sample).unwrap();
        assert_eq!(json["value"], 42);
        assert!(json["timestamp"].is_string());
    }
}
