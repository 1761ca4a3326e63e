//! Desktop widget: a small always-on-top window with the core stats.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::egui::{self, Color32, RichText};

use crate::core::config::Config;
use crate::core::system_monitor::{
    Availability, DerivedRates, MetricsCollector, MetricsHistory, SystemMetrics, PLACEHOLDER,
};
use crate::ui::formatters::{format_size, format_speed, format_uptime};

const WINDOW_SIZE: [f32; 2] = [320.0, 480.0];
/// Gap between the window and the top-right corner of the monitor
const SCREEN_MARGIN: f32 = 20.0;
const BAR_WIDTH: f32 = 180.0;

/// Fixed dark palette, independent of the terminal themes
struct Palette;

impl Palette {
    const BG: Color32 = Color32::from_rgb(0x0d, 0x11, 0x17);
    const BG_BOX: Color32 = Color32::from_rgb(0x16, 0x1b, 0x22);
    const BORDER: Color32 = Color32::from_rgb(0x30, 0x36, 0x3d);
    const TEXT: Color32 = Color32::from_rgb(0xc9, 0xd1, 0xd9);
    const TEXT_DIM: Color32 = Color32::from_rgb(0x8b, 0x94, 0x9e);
    const TITLE: Color32 = Color32::from_rgb(0x58, 0xa6, 0xff);
    const CPU: Color32 = Color32::from_rgb(0x3f, 0xb9, 0x50);
    const GPU: Color32 = Color32::from_rgb(0xd2, 0x99, 0x22);
    const MEMORY: Color32 = Color32::from_rgb(0x58, 0xa6, 0xff);
    const DISK: Color32 = Color32::from_rgb(0xa3, 0x71, 0xf7);
    const NETWORK: Color32 = Color32::from_rgb(0x39, 0xc5, 0xcf);
    const LOW: Color32 = Color32::from_rgb(0x3f, 0xb9, 0x50);
    const MID: Color32 = Color32::from_rgb(0xd2, 0x99, 0x22);
    const HIGH: Color32 = Color32::from_rgb(0xf8, 0x51, 0x49);

    fn usage(percent: f32) -> Color32 {
        if percent < 50.0 {
            Self::LOW
        } else if percent < 80.0 {
            Self::MID
        } else {
            Self::HIGH
        }
    }
}

pub struct WellzWidget {
    collector: MetricsCollector,
    history: MetricsHistory,
    metrics: SystemMetrics,
    rates: DerivedRates,
    interval: Duration,
    last_refresh: Option<Instant>,
    placed: bool,
}

impl WellzWidget {
    pub fn new(config: &Config) -> Self {
        let mut collector = MetricsCollector::new();
        collector.warm_up();
        Self {
            collector,
            history: MetricsHistory::with_capacity(config.general.history_size),
            metrics: SystemMetrics::default(),
            rates: DerivedRates::default(),
            interval: config.refresh_interval(),
            last_refresh: None,
            placed: false,
        }
    }

    fn refresh_if_due(&mut self) {
        let due = self
            .last_refresh
            .map_or(true, |at| at.elapsed() >= self.interval);
        if due {
            let now = Instant::now();
            self.metrics = self.collector.collect();
            self.rates = self.history.record(&self.metrics, now);
            self.last_refresh = Some(now);
        }
    }

    /// Move to the top-right corner once the monitor size is known.
    fn place_top_right(&mut self, ctx: &egui::Context) {
        if self.placed {
            return;
        }
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let x = (monitor.x - WINDOW_SIZE[0] - SCREEN_MARGIN).max(0.0);
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                x,
                SCREEN_MARGIN,
            )));
            self.placed = true;
        }
    }

    fn title_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("wellz").strong().size(16.0).color(Palette::TITLE));
            ui.label(
                RichText::new(format!(
                    "{} · up {}",
                    self.metrics.host.hostname,
                    format_uptime(self.metrics.host.uptime_secs)
                ))
                .small()
                .color(Palette::TEXT_DIM),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let close = ui.add(
                    egui::Button::new(RichText::new("✕").color(Palette::TEXT_DIM)).frame(false),
                );
                if close.clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }

    fn cpu_section(&self, ui: &mut egui::Ui) {
        let cpu = &self.metrics.cpu;
        section(ui, "CPU", Palette::CPU, |ui| {
            dim_line(ui, &cpu.brand);
            usage_row(ui, "Total", cpu.global_usage);
            dim_line(
                ui,
                &format!(
                    "{} threads · {} MHz · load {:.2}",
                    cpu.logical_cores, cpu.frequency_mhz, cpu.load_average.0
                ),
            );
        });
    }

    fn gpu_section(&self, ui: &mut egui::Ui) {
        section(ui, "GPU", Palette::GPU, |ui| match &self.metrics.gpu {
            Availability::Available(gpu) => {
                dim_line(ui, &gpu.name);
                match gpu.utilization_percent {
                    Some(usage) => usage_row(ui, "Usage", usage),
                    None => dim_line(ui, "Stats unavailable"),
                }
                if let Some(pct) = gpu.memory_percent() {
                    usage_row(ui, "VRAM", pct);
                }
                if let Some(temp) = gpu.temperature_celsius {
                    dim_line(ui, &format!("{:.0}°C", temp));
                }
            }
            Availability::Unavailable(reason) => {
                dim_line(ui, &format!("{} ({})", PLACEHOLDER, reason));
            }
        });
    }

    fn memory_section(&self, ui: &mut egui::Ui) {
        let mem = &self.metrics.memory;
        section(ui, "MEMORY", Palette::MEMORY, |ui| {
            usage_row(ui, "RAM", mem.usage_percent);
            dim_line(
                ui,
                &format!(
                    "{} / {}",
                    format_size(mem.used_bytes),
                    format_size(mem.total_bytes)
                ),
            );
            if mem.swap_total_bytes > 0 {
                usage_row(ui, "Swap", mem.swap_percent);
            }
        });
    }

    fn disk_section(&self, ui: &mut egui::Ui) {
        section(ui, "DISK", Palette::DISK, |ui| {
            if self.metrics.disks.is_empty() {
                dim_line(ui, PLACEHOLDER);
            }
            for disk in self.metrics.disks.iter().take(3) {
                usage_row(ui, &disk.mount_point, disk.usage_percent);
            }
        });
    }

    fn network_section(&self, ui: &mut egui::Ui) {
        section(ui, "NETWORK", Palette::NETWORK, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("▲").color(Palette::LOW));
                ui.label(RichText::new(format_speed(self.rates.upload)).color(Palette::TEXT));
                ui.label(RichText::new("▼").color(Palette::TITLE));
                ui.label(RichText::new(format_speed(self.rates.download)).color(Palette::TEXT));
            });
            if let Some(iface) = self.metrics.network.interfaces.first() {
                dim_line(
                    ui,
                    &format!(
                        "{} {}",
                        iface.name,
                        iface.ipv4.as_deref().unwrap_or(PLACEHOLDER)
                    ),
                );
            }
        });
    }
}

fn section(ui: &mut egui::Ui, title: &str, color: Color32, body: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(Palette::BG_BOX)
        .stroke(egui::Stroke::new(1.0, Palette::BORDER))
        .rounding(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().color(color));
            body(ui);
        });
    ui.add_space(6.0);
}

fn usage_row(ui: &mut egui::Ui, label: &str, percent: f32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{:<6}", label)).monospace().color(Palette::TEXT));
        ui.add(
            egui::ProgressBar::new((percent / 100.0).clamp(0.0, 1.0))
                .desired_width(BAR_WIDTH)
                .fill(Palette::usage(percent)),
        );
        ui.label(RichText::new(format!("{:.0}%", percent)).color(Palette::TEXT));
    });
}

fn dim_line(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).small().color(Palette::TEXT_DIM));
}

impl eframe::App for WellzWidget {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.place_top_right(ctx);
        self.refresh_if_due();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Palette::BG).inner_margin(10.0))
            .show(ctx, |ui| {
                // undecorated window: drag from anywhere
                let drag = ui.interact(ui.max_rect(), ui.id().with("drag"), egui::Sense::drag());
                if drag.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                self.title_bar(ui);
                ui.add_space(6.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.cpu_section(ui);
                    self.gpu_section(ui);
                    self.memory_section(ui);
                    self.disk_section(ui);
                    self.network_section(ui);
                });
            });

        ctx.request_repaint_after(self.interval);
    }
}

/// Open the widget window and block until it is closed.
pub fn run(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("wellz")
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false)
            .with_decorations(false)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "wellz",
        options,
        Box::new(move |_cc| Ok(Box::new(WellzWidget::new(&config)))),
    )
    .map_err(|e| anyhow!("Failed to start desktop widget: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_palette_thresholds() {
        assert_eq!(Palette::usage(10.0), Palette::LOW);
        assert_eq!(Palette::usage(50.0), Palette::MID);
        assert_eq!(Palette::usage(95.0), Palette::HIGH);
    }
}
