use std::collections::VecDeque;
use std::time::Instant;

use serde::Serialize;

use super::metrics::SystemMetrics;

pub const DEFAULT_HISTORY_SIZE: usize = 120;

/// Fixed-capacity ring of the most recent samples, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    capacity: usize,
    values: VecDeque<T>,
}

impl<T> HistoryBuffer<T> {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: T) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Iterate in chronological order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.values.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.values.back()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl HistoryBuffer<f64> {
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn average(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// The last `width` values, left-padded with zeros when short.
    pub fn fit_to_width(&self, width: usize) -> Vec<f64> {
        let skip = self.values.len().saturating_sub(width);
        let mut out = vec![0.0; width.saturating_sub(self.values.len())];
        out.extend(self.values.iter().skip(skip).copied());
        out
    }
}

/// Turns a cumulative counter into a per-second rate.
#[derive(Debug, Clone, Default)]
pub struct RateTracker {
    previous: Option<(u64, Instant)>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, current: u64) -> f64 {
        self.observe_at(current, Instant::now())
    }

    /// Rate since the last observation. The first observation, a zero
    /// interval, and a counter that went backwards all yield 0.
    pub fn observe_at(&mut self, current: u64, at: Instant) -> f64 {
        let rate = match self.previous {
            Some((prev, prev_at)) => {
                let elapsed = at.saturating_duration_since(prev_at).as_secs_f64();
                if elapsed > 0.0 && current >= prev {
                    (current - prev) as f64 / elapsed
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.previous = Some((current, at));
        rate
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Rates derived from cumulative counters on one tick, in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedRates {
    pub upload: f64,
    pub download: f64,
    pub disk_read: f64,
    pub disk_write: f64,
}

/// Per-metric history owned by the render loop
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    capacity: usize,
    pub cpu: HistoryBuffer<f64>,
    pub per_core: Vec<HistoryBuffer<f64>>,
    pub memory: HistoryBuffer<f64>,
    pub swap: HistoryBuffer<f64>,
    pub upload: HistoryBuffer<f64>,
    pub download: HistoryBuffer<f64>,
    pub disk_read: HistoryBuffer<f64>,
    pub disk_write: HistoryBuffer<f64>,
    pub gpu_usage: HistoryBuffer<f64>,
    pub gpu_memory: HistoryBuffer<f64>,
    pub gpu_temperature: HistoryBuffer<f64>,
    sent: RateTracker,
    received: RateTracker,
    read: RateTracker,
    written: RateTracker,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            cpu: HistoryBuffer::new(capacity),
            per_core: Vec::new(),
            memory: HistoryBuffer::new(capacity),
            swap: HistoryBuffer::new(capacity),
            upload: HistoryBuffer::new(capacity),
            download: HistoryBuffer::new(capacity),
            disk_read: HistoryBuffer::new(capacity),
            disk_write: HistoryBuffer::new(capacity),
            gpu_usage: HistoryBuffer::new(capacity),
            gpu_memory: HistoryBuffer::new(capacity),
            gpu_temperature: HistoryBuffer::new(capacity),
            sent: RateTracker::new(),
            received: RateTracker::new(),
            read: RateTracker::new(),
            written: RateTracker::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push one tick of metrics and derive counter rates.
    pub fn record(&mut self, metrics: &SystemMetrics, at: Instant) -> DerivedRates {
        self.cpu.push(metrics.cpu.global_usage as f64);

        let cores = &metrics.cpu.per_core_usage;
        if self.per_core.len() != cores.len() {
            self.per_core = (0..cores.len())
                .map(|_| HistoryBuffer::new(self.capacity))
                .collect();
        }
        for (buffer, usage) in self.per_core.iter_mut().zip(cores) {
            buffer.push(*usage as f64);
        }

        self.memory.push(metrics.memory.usage_percent as f64);
        self.swap.push(metrics.memory.swap_percent as f64);

        let rates = DerivedRates {
            upload: self.sent.observe_at(metrics.network.bytes_sent, at),
            download: self.received.observe_at(metrics.network.bytes_received, at),
            disk_read: self.read.observe_at(metrics.disk_io.read_bytes, at),
            disk_write: self.written.observe_at(metrics.disk_io.written_bytes, at),
        };
        self.upload.push(rates.upload);
        self.download.push(rates.download);
        self.disk_read.push(rates.disk_read);
        self.disk_write.push(rates.disk_write);

        if let Some(gpu) = metrics.gpu.as_option() {
            if let Some(usage) = gpu.utilization_percent {
                self.gpu_usage.push(usage as f64);
            }
            if let Some(mem) = gpu.memory_percent() {
                self.gpu_memory.push(mem as f64);
            }
            if let Some(temp) = gpu.temperature_celsius {
                self.gpu_temperature.push(temp as f64);
            }
        }

        rates
    }
}

impl Default for MetricsHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut buf = HistoryBuffer::new(0);
        buf.push(1);
        buf.push(2);
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.values().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_fit_to_width_pads_front() {
        let mut buf = HistoryBuffer::new(10);
        buf.push(5.0);
        buf.push(6.0);
        assert_eq!(buf.fit_to_width(4), vec![0.0, 0.0, 5.0, 6.0]);
        assert_eq!(buf.fit_to_width(1), vec![6.0]);
    }

    #[test]
    fn test_counter_reset_yields_zero() {
        let start = Instant::now();
        let mut tracker = RateTracker::new();
        tracker.observe_at(500, start);
        assert_eq!(tracker.observe_at(100, start + Duration::from_secs(1)), 0.0);
        assert_eq!(tracker.observe_at(300, start + Duration::from_secs(2)), 200.0);
    }

    #[test]
    fn test_zero_elapsed_yields_zero() {
        let start = Instant::now();
        let mut tracker = RateTracker::new();
        tracker.observe_at(0, start);
        assert_eq!(tracker.observe_at(100, start), 0.0);
    }

    #[test]
    fn test_record_skips_missing_gpu() {
        let mut history = MetricsHistory::with_capacity(4);
        let mut metrics = SystemMetrics::default();
        metrics.memory.swap_percent = 12.5;
        history.record(&metrics, Instant::now());
        assert_eq!(history.swap.latest(), Some(&12.5));
        assert!(history.gpu_usage.is_empty());
        assert!(history.gpu_memory.is_empty());
        assert!(history.gpu_temperature.is_empty());
    }

    #[test]
    fn test_record_resizes_per_core() {
        let mut history = MetricsHistory::with_capacity(4);
        let mut metrics = SystemMetrics::default();
        metrics.cpu.per_core_usage = vec![10.0, 20.0];
        history.record(&metrics, Instant::now());
        assert_eq!(history.per_core.len(), 2);
        assert_eq!(history.per_core[1].latest(), Some(&20.0));

        metrics.cpu.per_core_usage = vec![5.0, 5.0, 5.0, 5.0];
        history.record(&metrics, Instant::now());
        assert_eq!(history.per_core.len(), 4);
        assert_eq!(history.per_core[0].len(), 1);
    }

    #[test]
    fn test_min_max_average() {
        let mut buf = HistoryBuffer::new(3);
        assert_eq!(buf.max(), None);
        assert_eq!(buf.average(), None);
        for v in [4.0, 1.0, 7.0, 10.0] {
            buf.push(v);
        }
        // 4.0 was evicted
        assert_eq!(buf.min(), Some(1.0));
        assert_eq!(buf.max(), Some(10.0));
        assert_eq!(buf.average(), Some(6.0));
    }
}
