//! One-shot and legacy live output: static panels and JSON.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use serde::Serialize;

use crate::core::config::Config;
use crate::core::system_monitor::{
    sort_processes, Availability, DerivedRates, MetricsCollector, MetricsHistory, ProcessEntry,
    Sample, SecurityPosture, SystemMetrics, Unavailable,
};
use crate::core::theme::Theme;
use crate::ui::panels::{render_static, StaticView};

/// Granularity of the Ctrl+C check while waiting between redraws
const STOP_POLL: Duration = Duration::from_millis(50);

/// Take two samples a CPU interval apart so usage and rates are real.
fn sample(collector: &mut MetricsCollector, history: &mut MetricsHistory) -> (SystemMetrics, DerivedRates) {
    collector.warm_up();
    let first = collector.collect();
    history.record(&first, Instant::now());
    thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    let metrics = collector.collect();
    let rates = history.record(&metrics, Instant::now());
    (metrics, rates)
}

fn top_processes(collector: &mut MetricsCollector, config: &Config) -> Vec<ProcessEntry> {
    if !config.display.show_processes {
        return Vec::new();
    }
    let mut processes = collector.collect_processes();
    sort_processes(
        &mut processes,
        config.processes.sort_by,
        config.processes.sort_descending,
    );
    processes.truncate(config.processes.max_processes);
    processes
}

fn security(collector: &MetricsCollector, enabled: bool) -> Availability<SecurityPosture> {
    if enabled {
        collector.collect_security()
    } else {
        Availability::Unavailable(Unavailable::NoDevice)
    }
}

/// Print the static panels once.
pub fn run_static(config: &Config, theme: &Theme) -> Result<()> {
    let mut collector = MetricsCollector::new();
    let mut history = MetricsHistory::with_capacity(config.general.history_size);

    let (metrics, rates) = sample(&mut collector, &mut history);
    let processes = top_processes(&mut collector, config);
    let security = security(&collector, config.display.show_security);

    let view = StaticView {
        metrics: &metrics,
        rates,
        history: None,
        processes: &processes,
        security: &security,
        config,
        theme,
    };
    println!("{}", render_static(&view));
    Ok(())
}

/// Redraw the static panels every `interval` seconds until Ctrl+C.
pub fn run_legacy(config: &Config, theme: &Theme, interval: f64) -> Result<()> {
    let interval = Duration::try_from_secs_f64(interval)
        .with_context(|| format!("Invalid interval {}", interval))?;
    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .context("Failed to install Ctrl+C handler")?;

    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).context("Failed to hide cursor")?;
    let result = legacy_loop(config, theme, interval, &running);
    execute!(stdout, cursor::Show).context("Failed to show cursor")?;
    println!();
    result
}

fn legacy_loop(config: &Config, theme: &Theme, interval: Duration, running: &AtomicBool) -> Result<()> {
    let mut collector = MetricsCollector::new();
    let mut history = MetricsHistory::with_capacity(config.general.history_size);
    let update_every = u64::from(config.processes.update_interval.max(1));

    collector.warm_up();
    let mut processes = Vec::new();
    let mut security_state = security(&collector, config.display.show_security);
    let mut tick: u64 = 0;

    while running.load(Ordering::SeqCst) {
        let started = Instant::now();
        let metrics = collector.collect();
        let rates = history.record(&metrics, started);
        if tick % update_every == 0 {
            processes = top_processes(&mut collector, config);
        }
        // security probes shell out; refresh them rarely
        if tick > 0 && tick % 30 == 0 {
            security_state = security(&collector, config.display.show_security);
        }

        let view = StaticView {
            metrics: &metrics,
            rates,
            history: Some(&history),
            processes: &processes,
            security: &security_state,
            config,
            theme,
        };
        let frame = render_static(&view);

        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))
            .context("Failed to clear screen")?;
        writeln!(stdout, "{}", frame)?;
        writeln!(stdout, "  [LIVE] Press Ctrl+C to exit")?;
        stdout.flush()?;

        tick += 1;
        while running.load(Ordering::SeqCst) && started.elapsed() < interval {
            thread::sleep(STOP_POLL);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Snapshot<'a> {
    version: &'static str,
    metrics: &'a SystemMetrics,
    rates: Sample<DerivedRates>,
    processes: &'a [ProcessEntry],
    security: &'a Availability<SecurityPosture>,
}

/// Print one snapshot as pretty JSON.
pub fn run_json(config: &Config) -> Result<()> {
    let mut collector = MetricsCollector::new();
    let mut history = MetricsHistory::with_capacity(config.general.history_size);

    let (metrics, rates) = sample(&mut collector, &mut history);
    let processes = top_processes(&mut collector, config);
    let security = security(&collector, config.display.show_security);

    let snapshot = Snapshot {
        version: env!("CARGO_PKG_VERSION"),
        metrics: &metrics,
        rates: Sample::now(rates),
        processes: &processes,
        security: &security,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
    );
    Ok(())
}
