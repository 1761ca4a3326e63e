use std::collections::HashSet;

use battery::units::ratio::percent;
use battery::units::time::second;
use chrono::Utc;
use sysinfo::{
    Components, Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users,
};

use crate::error::Result;
use crate::platform::gpu::get_gpu_provider;

use super::gpu::GpuProvider;
use super::metrics::*;
use super::os_info::Distro;
use super::process::{send_signal, ProcessEntry, ProcessSignal};
use super::security::{collect_security, SecurityPosture};

/// Pseudo filesystems that never hold user data
const SKIPPED_FILESYSTEMS: [&str; 4] = ["squashfs", "tmpfs", "devtmpfs", "overlay"];

/// Configuration for metrics collection
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub collect_gpu: bool,
    pub collect_disks: bool,
    pub collect_network: bool,
    pub collect_temperatures: bool,
    pub collect_battery: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            collect_gpu: true,
            collect_disks: true,
            collect_network: true,
            collect_temperatures: true,
            collect_battery: true,
        }
    }
}

/// Collects system metrics from various sources.
///
/// Holds only the library handles that need state between refreshes;
/// counter rates are derived by the caller.
pub struct MetricsCollector {
    system: System,
    components: Components,
    disks: Disks,
    networks: Networks,
    users: Users,
    battery: Option<battery::Manager>,
    gpu_provider: Option<Box<dyn GpuProvider>>,
    distro: Distro,
    config: CollectorConfig,
}

impl MetricsCollector {
    /// Create a new MetricsCollector with default configuration
    pub fn new() -> Self {
        Self::with_config(CollectorConfig::default())
    }

    /// Create a new MetricsCollector with custom configuration
    pub fn with_config(config: CollectorConfig) -> Self {
        let gpu_provider = if config.collect_gpu {
            match get_gpu_provider() {
                Ok(provider) => {
                    log::debug!("Using GPU backend {}", provider.backend());
                    Some(provider)
                }
                Err(e) => {
                    log::debug!("{}", e);
                    None
                }
            }
        } else {
            None
        };

        let battery = if config.collect_battery {
            battery::Manager::new()
                .map_err(|e| log::debug!("Battery manager unavailable: {}", e))
                .ok()
        } else {
            None
        };

        Self {
            system: System::new(),
            components: Components::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            users: Users::new_with_refreshed_list(),
            battery,
            gpu_provider,
            distro: Distro::detect(),
            config,
        }
    }

    /// Take a first CPU reading and wait the minimum interval so the next
    /// `collect` reports real usage instead of zero.
    pub fn warm_up(&mut self) {
        self.system.refresh_cpu_all();
        self.refresh_processes();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    }

    /// Collect one snapshot. Unreadable metrics come back as
    /// `Availability::Unavailable` or empty lists, never as errors.
    pub fn collect(&mut self) -> SystemMetrics {
        self.system.refresh_cpu_all();
        self.system.refresh_memory();

        let mut metrics = SystemMetrics {
            timestamp: Utc::now(),
            host: self.collect_host(),
            cpu: self.collect_cpu(),
            memory: self.collect_memory(),
            gpu: self.collect_gpu(),
            ..Default::default()
        };

        if self.config.collect_disks {
            self.disks.refresh(true);
            let (disks, io) = self.collect_disks();
            metrics.disks = disks;
            metrics.disk_io = io;
        }

        if self.config.collect_network {
            self.networks.refresh(true);
            metrics.network = self.collect_network();
        }

        if self.config.collect_temperatures {
            self.components.refresh(true);
            metrics.temperatures = self.collect_temperatures();
        }

        metrics.battery = self.collect_battery();

        metrics
    }

    fn collect_host(&self) -> HostInfo {
        HostInfo {
            hostname: System::host_name().unwrap_or_default(),
            os_name: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            os_version: System::os_version().unwrap_or_default(),
            kernel: System::kernel_version().unwrap_or_default(),
            arch: std::env::consts::ARCH.to_string(),
            uptime_secs: System::uptime(),
            distro: self.distro,
        }
    }

    fn collect_cpu(&self) -> CpuMetrics {
        let cpus = self.system.cpus();
        let load = System::load_average();

        let frequency_mhz = if cpus.is_empty() {
            0
        } else {
            cpus.iter().map(|cpu| cpu.frequency()).sum::<u64>() / cpus.len() as u64
        };

        CpuMetrics {
            brand: cpus
                .first()
                .map(|c| c.brand().trim().to_string())
                .unwrap_or_default(),
            physical_cores: System::physical_core_count(),
            logical_cores: cpus.len(),
            frequency_mhz,
            global_usage: self.system.global_cpu_usage(),
            per_core_usage: cpus.iter().map(|cpu| cpu.cpu_usage()).collect(),
            load_average: (load.one, load.five, load.fifteen),
        }
    }

    fn collect_memory(&self) -> MemoryMetrics {
        let total = self.system.total_memory();
        let used = self.system.used_memory();
        let swap_total = self.system.total_swap();
        let swap_used = self.system.used_swap();

        MemoryMetrics {
            total_bytes: total,
            used_bytes: used,
            available_bytes: self.system.available_memory(),
            usage_percent: percent_of(used, total),
            swap_total_bytes: swap_total,
            swap_used_bytes: swap_used,
            swap_percent: percent_of(swap_used, swap_total),
        }
    }

    fn collect_gpu(&mut self) -> Availability<GpuMetrics> {
        let Some(provider) = self.gpu_provider.as_mut() else {
            return Availability::Unavailable(Unavailable::NoDevice);
        };
        match provider.collect_metrics() {
            Ok(gpu) => Availability::Available(gpu),
            Err(e) => {
                log::warn!("GPU read via {} failed: {}", provider.backend(), e);
                Availability::Unavailable(Unavailable::Failed(e.to_string()))
            }
        }
    }

    fn collect_disks(&self) -> (Vec<DiskMetrics>, DiskIoCounters) {
        let mut io = DiskIoCounters::default();
        let mut counted = HashSet::new();
        let mut disks = Vec::new();

        for disk in self.disks.iter() {
            let fs_type = disk.file_system().to_string_lossy().to_string();
            if SKIPPED_FILESYSTEMS.contains(&fs_type.as_str()) {
                continue;
            }

            // One device mounted in several places counts once
            let name = disk.name().to_string_lossy().to_string();
            if counted.insert(name.clone()) {
                let usage = disk.usage();
                io.read_bytes = io.read_bytes.saturating_add(usage.total_read_bytes);
                io.written_bytes = io.written_bytes.saturating_add(usage.total_written_bytes);
            }

            let total = disk.total_space();
            let available = disk.available_space();
            let used = total.saturating_sub(available);

            disks.push(DiskMetrics {
                name,
                mount_point: disk.mount_point().to_string_lossy().to_string(),
                fs_type,
                total_bytes: total,
                used_bytes: used,
                available_bytes: available,
                usage_percent: percent_of(used, total),
            });
        }

        (disks, io)
    }

    fn collect_network(&self) -> NetworkMetrics {
        let mut network = NetworkMetrics {
            hostname: System::host_name().unwrap_or_default(),
            ..Default::default()
        };

        for (name, data) in self.networks.iter() {
            network.bytes_received = network.bytes_received.saturating_add(data.total_received());
            network.bytes_sent = network.bytes_sent.saturating_add(data.total_transmitted());
            network.packets_received = network
                .packets_received
                .saturating_add(data.total_packets_received());
            network.packets_sent = network
                .packets_sent
                .saturating_add(data.total_packets_transmitted());

            let ipv4 = data
                .ip_networks()
                .iter()
                .find(|ip| ip.addr.is_ipv4() && !ip.addr.is_loopback())
                .map(|ip| ip.addr.to_string());

            if name == "lo" || (ipv4.is_none() && data.total_received() == 0) {
                continue;
            }

            network.interfaces.push(InterfaceMetrics {
                name: name.to_string(),
                ipv4,
                bytes_received: data.total_received(),
                bytes_sent: data.total_transmitted(),
            });
        }

        network.interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        network
    }

    fn collect_temperatures(&self) -> Vec<TemperatureReading> {
        self.components
            .iter()
            .filter_map(|comp| {
                Some(TemperatureReading {
                    label: comp.label().to_string(),
                    current_celsius: comp.temperature()?,
                    max_celsius: comp.max(),
                    critical_celsius: comp.critical(),
                })
            })
            .collect()
    }

    fn collect_battery(&self) -> Availability<BatteryMetrics> {
        let Some(manager) = self.battery.as_ref() else {
            return Availability::Unavailable(Unavailable::NoDevice);
        };

        let first = match manager.batteries() {
            Ok(mut batteries) => batteries.next(),
            Err(e) => {
                log::warn!("Failed to enumerate batteries: {}", e);
                return Availability::Unavailable(Unavailable::Failed(e.to_string()));
            }
        };

        match first {
            Some(Ok(battery)) => {
                let state = match battery.state() {
                    battery::State::Charging => BatteryState::Charging,
                    battery::State::Discharging => BatteryState::Discharging,
                    battery::State::Full => BatteryState::Full,
                    _ => BatteryState::Unknown,
                };
                Availability::Available(BatteryMetrics {
                    percent: battery.state_of_charge().get::<percent>(),
                    state,
                    time_remaining_secs: battery
                        .time_to_empty()
                        .map(|t| t.get::<second>() as u64),
                })
            }
            Some(Err(e)) => {
                log::warn!("Failed to read battery: {}", e);
                Availability::Unavailable(Unavailable::Failed(e.to_string()))
            }
            None => Availability::Unavailable(Unavailable::NoDevice),
        }
    }

    fn refresh_processes(&mut self) {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_user(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );
    }

    /// Refresh and list every process, unsorted.
    pub fn collect_processes(&mut self) -> Vec<ProcessEntry> {
        self.system.refresh_memory();
        self.refresh_processes();
        self.users.refresh();

        let total_memory = self.system.total_memory();
        self.system
            .processes()
            .values()
            .map(|proc| {
                let memory = proc.memory();
                let command = proc
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ");
                ProcessEntry {
                    pid: proc.pid().as_u32(),
                    parent_pid: proc.parent().map(|p| p.as_u32()),
                    user: proc
                        .user_id()
                        .and_then(|uid| self.users.get_user_by_id(uid))
                        .map(|u| u.name().to_string())
                        .unwrap_or_default(),
                    cpu_percent: proc.cpu_usage(),
                    memory_percent: percent_of(memory, total_memory),
                    memory_bytes: memory,
                    status: proc.status().to_string(),
                    name: proc.name().to_string_lossy().to_string(),
                    command,
                }
            })
            .collect()
    }

    /// Run the (slow) security probes.
    pub fn collect_security(&self) -> Availability<SecurityPosture> {
        collect_security()
    }

    /// Send a signal to a process. Failures are returned, never fatal.
    pub fn send_signal(&mut self, pid: u32, signal: ProcessSignal) -> Result<()> {
        send_signal(&mut self.system, pid, signal)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn percent_of(part: u64, total: u64) -> f32 {
    if total > 0 {
        (part as f64 / total as f64 * 100.0) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_zero_total() {
        assert_eq!(percent_of(10, 0), 0.0);
        assert_eq!(percent_of(1, 4), 25.0);
    }
}
