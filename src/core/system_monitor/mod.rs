//! System monitoring core functionality.
//!
//! Collection of CPU, memory, GPU, disk, network, battery, process and
//! security metrics, plus the bounded histories that feed the graphs.

mod collector;
mod gpu;
mod history;
mod metrics;
pub mod os_info;
pub mod process;
pub mod process_tree;
pub mod security;

pub use collector::{CollectorConfig, MetricsCollector};
pub use gpu::{GpuProvider, GpuVendor};
pub use history::{
    DerivedRates, HistoryBuffer, MetricsHistory, RateTracker, DEFAULT_HISTORY_SIZE,
};
pub use metrics::{
    Availability, BatteryMetrics, BatteryState, CpuMetrics, DiskIoCounters, DiskMetrics,
    GpuMetrics, HostInfo, InterfaceMetrics, MemoryMetrics, NetworkMetrics, Sample, SystemMetrics,
    TemperatureReading, Unavailable, PLACEHOLDER,
};
pub use os_info::Distro;
pub use process::{filter_processes, sort_processes, ProcessEntry, ProcessSignal, SortBy};
pub use process_tree::{
    build_process_tree, flatten_tree, format_tree_indent, tree_order, FlattenedProcess,
    ProcessTreeNode,
};
pub use security::{FirewallStatus, LoginRecord, SecurityPosture, UsbDevice};
