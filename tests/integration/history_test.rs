use std::time::{Duration, Instant};

use wellz::core::system_monitor::{HistoryBuffer, MetricsHistory, RateTracker, SystemMetrics};

#[test]
fn test_overflow_keeps_most_recent_in_order() {
    let mut buffer = HistoryBuffer::new(5);
    for i in 0..12 {
        buffer.push(i as f64);
    }

    assert_eq!(buffer.len(), 5);
    let values: Vec<f64> = buffer.values().copied().collect();
    assert_eq!(values, vec![7.0, 8.0, 9.0, 10.0, 11.0]);
}

#[test]
fn test_len_never_exceeds_capacity() {
    let mut buffer = HistoryBuffer::new(3);
    for i in 0..100 {
        buffer.push(i);
        assert!(buffer.len() <= buffer.capacity());
    }
}

#[test]
fn test_zero_capacity_is_raised() {
    let mut buffer = HistoryBuffer::new(0);
    buffer.push(1.0);
    buffer.push(2.0);
    assert_eq!(buffer.capacity(), 1);
    assert_eq!(buffer.latest(), Some(&2.0));
}

#[test]
fn test_counter_rates_per_second() {
    let mut tracker = RateTracker::new();
    let start = Instant::now();

    let rates: Vec<f64> = [0u64, 100, 250]
        .iter()
        .enumerate()
        .map(|(i, &counter)| tracker.observe_at(counter, start + Duration::from_secs(i as u64)))
        .collect();

    assert_eq!(rates, vec![0.0, 100.0, 150.0]);
}

#[test]
fn test_counter_reset_gives_zero() {
    let mut tracker = RateTracker::new();
    let start = Instant::now();
    tracker.observe_at(1_000, start);
    assert_eq!(tracker.observe_at(10, start + Duration::from_secs(1)), 0.0);
}

#[test]
fn test_zero_elapsed_gives_zero() {
    let mut tracker = RateTracker::new();
    let at = Instant::now();
    tracker.observe_at(0, at);
    assert_eq!(tracker.observe_at(500, at), 0.0);
}

#[test]
fn test_record_skips_unavailable_gpu() {
    let mut history = MetricsHistory::with_capacity(10);
    let metrics = SystemMetrics::default();
    history.record(&metrics, Instant::now());

    assert_eq!(history.cpu.len(), 1);
    assert!(history.gpu_usage.is_empty());
}
