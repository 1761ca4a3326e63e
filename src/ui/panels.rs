//! Colored static panels for `--static` and legacy live mode.

use colored::Colorize;

use crate::core::config::Config;
use crate::core::system_monitor::{
    Availability, DerivedRates, HistoryBuffer, MetricsHistory, ProcessEntry, SecurityPosture,
    SystemMetrics, PLACEHOLDER,
};
use crate::core::theme::{Rgb, Role, Theme};

use super::formatters::{
    format_size, format_speed, format_uptime, truncate_to_width, visible_width,
};
use super::graph;

/// Inner width of one panel column
pub const BOX_WIDTH: usize = 38;
const GAP: &str = "  ";
const BAR_WIDTH: usize = 20;

const BANNER: [&str; 6] = [
    "██╗    ██╗███████╗██╗     ██╗     ███████╗",
    "██║    ██║██╔════╝██║     ██║     ╚══███╔╝",
    "██║ █╗ ██║█████╗  ██║     ██║       ███╔╝ ",
    "██║███╗██║██╔══╝  ██║     ██║      ███╔╝  ",
    "╚███╔███╔╝███████╗███████╗███████╗███████╗",
    " ╚══╝╚══╝ ╚══════╝╚══════╝╚══════╝╚══════╝",
];

pub fn paint(text: &str, color: Rgb) -> String {
    text.truecolor(color.0, color.1, color.2).to_string()
}

pub fn paint_bold(text: &str, color: Rgb) -> String {
    text.truecolor(color.0, color.1, color.2).bold().to_string()
}

fn role(theme: &Theme, role: Role, text: &str) -> String {
    paint(text, theme.color(role))
}

/// `[████░░░░]` colored by usage level
pub fn usage_bar(theme: &Theme, percent: f64, width: usize) -> String {
    let (filled, empty) = graph::bar(percent, width);
    format!(
        "[{}{}]",
        paint(&filled, theme.usage_color(percent)),
        role(theme, Role::GraphEmpty, &empty)
    )
}

/// A rounded box with a title, built line by line.
pub struct Panel<'a> {
    theme: &'a Theme,
    width: usize,
    lines: Vec<String>,
}

impl<'a> Panel<'a> {
    pub fn new(title: &str, width: usize, theme: &'a Theme) -> Self {
        let title_width = visible_width(title) + 2;
        let fill = width.saturating_sub(1 + title_width);
        let top = format!(
            "{}{}{}",
            role(theme, Role::Border, "╭─"),
            paint_bold(&format!(" {} ", title), theme.title),
            role(theme, Role::Border, &format!("{}╮", "─".repeat(fill)))
        );
        Self {
            theme,
            width,
            lines: vec![top],
        }
    }

    pub fn line(mut self, content: impl AsRef<str>) -> Self {
        let content = content.as_ref();
        let pad = self.width.saturating_sub(1 + visible_width(content));
        let border = role(self.theme, Role::Border, "│");
        self.lines
            .push(format!("{} {}{}{}", border, content, " ".repeat(pad), border));
        self
    }

    pub fn separator(mut self) -> Self {
        self.lines.push(role(
            self.theme,
            Role::Border,
            &format!("├{}┤", "─".repeat(self.width)),
        ));
        self
    }

    pub fn finish(mut self) -> Vec<String> {
        self.lines.push(role(
            self.theme,
            Role::Border,
            &format!("╰{}╯", "─".repeat(self.width)),
        ));
        self.lines
    }
}

/// Lay two panels out next to each other, padding the shorter one.
pub fn side_by_side(left: Vec<String>, right: Vec<String>) -> Vec<String> {
    let left_width = left.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let rows = left.len().max(right.len());
    (0..rows)
        .map(|i| {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            let pad = left_width.saturating_sub(visible_width(l));
            format!("{}{}{}{}{}", GAP, l, " ".repeat(pad), GAP, r)
        })
        .collect()
}

/// Everything the static view prints
pub struct StaticView<'a> {
    pub metrics: &'a SystemMetrics,
    pub rates: DerivedRates,
    pub history: Option<&'a MetricsHistory>,
    pub processes: &'a [ProcessEntry],
    pub security: &'a Availability<SecurityPosture>,
    pub config: &'a Config,
    pub theme: &'a Theme,
}

impl<'a> StaticView<'a> {
    fn label(&self, text: &str) -> String {
        role(self.theme, Role::Label, text)
    }

    fn dim(&self, text: &str) -> String {
        role(self.theme, Role::Footer, text)
    }

    fn system_panel(&self) -> Vec<String> {
        let host = &self.metrics.host;
        let mut panel = Panel::new("SYSTEM", BOX_WIDTH, self.theme)
            .line(format!(
                "{}      {}",
                self.label("OS"),
                truncate_to_width(&format!("{} {}", host.os_name, host.os_version), 28)
            ))
            .line(format!("{}  {}", self.label("Kernel"), truncate_to_width(&host.kernel, 28)))
            .line(format!("{}    {}", self.label("Host"), truncate_to_width(&host.hostname, 28)))
            .line(format!("{}    {}", self.label("Arch"), host.arch))
            .line(format!("{}  {}", self.label("Uptime"), format_uptime(host.uptime_secs)))
            .separator();
        let (r, g, b) = host.distro.logo_color();
        for logo_line in host.distro.logo() {
            panel = panel.line(paint(logo_line, Rgb(r, g, b)));
        }
        panel.finish()
    }

    fn cpu_panel(&self) -> Vec<String> {
        let cpu = &self.metrics.cpu;
        let cores = cpu
            .physical_cores
            .map(|c| c.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let mut panel = Panel::new("CPU", BOX_WIDTH, self.theme)
            .line(role(self.theme, Role::Value, &truncate_to_width(&cpu.brand, BOX_WIDTH - 2)))
            .line(format!(
                "{} {}  {} {}  {} {}MHz",
                self.label("Cores"),
                cores,
                self.label("Threads"),
                cpu.logical_cores,
                self.label("Freq"),
                cpu.frequency_mhz
            ))
            .line(format!(
                "{}   {:.2} {:.2} {:.2}",
                self.label("Load"),
                cpu.load_average.0,
                cpu.load_average.1,
                cpu.load_average.2
            ))
            .separator()
            .line(format!(
                "{}  {} {:5.1}%",
                self.label("Total"),
                usage_bar(self.theme, cpu.global_usage as f64, BAR_WIDTH),
                cpu.global_usage
            ));

        if self.config.display.show_per_core {
            let shown: Vec<_> = cpu
                .per_core_usage
                .iter()
                .take(self.config.display.max_cores)
                .collect();
            for (row, chunk) in shown.chunks(4).enumerate() {
                let cells: String = chunk
                    .iter()
                    .enumerate()
                    .map(|(i, &&usage)| {
                        let blocks = "█".repeat((usage / 20.0) as usize);
                        format!(
                            "{}{}{}",
                            self.label(&(row * 4 + i).to_string()),
                            paint(&blocks, self.theme.usage_color(usage as f64)),
                            " ".repeat(5usize.saturating_sub(blocks.chars().count()))
                        )
                    })
                    .collect();
                panel = panel.line(cells);
            }
        }

        if let Some(history) = self.graph_history() {
            panel = panel.line(format!("{}   {}", self.label("Hist"), self.trend(&history.cpu, Role::Cpu)));
        }

        panel.finish()
    }

    fn gpu_panel(&self) -> Vec<String> {
        let panel = Panel::new("GPU", BOX_WIDTH, self.theme);
        let Some(gpu) = self.metrics.gpu.as_option() else {
            let reason = match &self.metrics.gpu {
                Availability::Unavailable(reason) => reason.to_string(),
                Availability::Available(_) => String::new(),
            };
            return panel
                .line(self.dim(&format!("{} ({})", PLACEHOLDER, reason)))
                .finish();
        };

        let mut panel = panel.line(role(
            self.theme,
            Role::Value,
            &truncate_to_width(&gpu.name, BOX_WIDTH - 2),
        ));
        match gpu.utilization_percent {
            Some(usage) => {
                panel = panel.line(format!(
                    "{}  {} {:5.1}%",
                    self.label("Usage"),
                    usage_bar(self.theme, usage as f64, BAR_WIDTH),
                    usage
                ))
            }
            None => panel = panel.line(self.dim("Stats unavailable")),
        }
        if let (Some(pct), Some(used), Some(total)) = (
            gpu.memory_percent(),
            gpu.memory_used_bytes,
            gpu.memory_total_bytes,
        ) {
            panel = panel.line(format!(
                "{}   {} {}/{}",
                self.label("VRAM"),
                usage_bar(self.theme, pct as f64, 12),
                format_size(used),
                format_size(total)
            ));
            if let Some(history) = self.graph_history() {
                panel = panel.line(format!("{}  {}", self.label("VRAMH"), self.trend(&history.gpu_memory, Role::Gpu)));
            }
        }
        if let Some(temp) = gpu.temperature_celsius {
            let unit = self.config.advanced.temp_unit;
            panel = panel.line(format!(
                "{}   {}",
                self.label("Temp"),
                paint(&unit.format(temp), self.theme.usage_color(temp as f64))
            ));
        }
        panel.finish()
    }

    fn memory_panel(&self) -> Vec<String> {
        let mem = &self.metrics.memory;
        let mut panel = Panel::new("MEMORY", BOX_WIDTH, self.theme)
            .line(format!(
                "{}    {} {:5.1}%",
                self.label("RAM"),
                usage_bar(self.theme, mem.usage_percent as f64, BAR_WIDTH),
                mem.usage_percent
            ))
            .line(format!(
                "{}   {} / {}",
                self.label("Used"),
                format_size(mem.used_bytes),
                format_size(mem.total_bytes)
            ))
            .line(format!("{}  {}", self.label("Avail"), format_size(mem.available_bytes)));
        if mem.swap_total_bytes > 0 {
            panel = panel.line(format!(
                "{}   {} {:5.1}%",
                self.label("Swap"),
                usage_bar(self.theme, mem.swap_percent as f64, BAR_WIDTH),
                mem.swap_percent
            ));
        }
        if let Some(history) = self.graph_history() {
            panel = panel.line(format!("{}   {}", self.label("Hist"), self.trend(&history.memory, Role::Memory)));
            if mem.swap_total_bytes > 0 {
                panel = panel.line(format!("{}  {}", self.label("SwapH"), self.trend(&history.swap, Role::Memory)));
            }
        }
        panel.finish()
    }

    /// History to draw trends from, when graphs are on and a history exists.
    fn graph_history(&self) -> Option<&'a MetricsHistory> {
        self.history.filter(|_| self.config.display.show_graphs)
    }

    fn trend(&self, buffer: &HistoryBuffer<f64>, color: Role) -> String {
        let values: Vec<f64> = buffer.values().copied().collect();
        role(self.theme, color, &graph::sparkline(&values, BOX_WIDTH - 8, 0.0, 100.0))
    }

    fn disk_panel(&self) -> Vec<String> {
        let mut panel = Panel::new("DISK", BOX_WIDTH, self.theme);
        for disk in self.metrics.disks.iter().take(self.config.display.max_disks) {
            panel = panel.line(format!(
                "{} {} {:>3.0}%",
                self.label(&format!("{:<10}", truncate_to_width(&disk.mount_point, 10))),
                usage_bar(self.theme, disk.usage_percent as f64, 15),
                disk.usage_percent
            ));
        }
        panel
            .separator()
            .line(format!(
                "{} {:<14} {} {}",
                self.label("Read"),
                format_speed(self.rates.disk_read),
                self.label("Write"),
                format_speed(self.rates.disk_write)
            ))
            .finish()
    }

    fn network_panel(&self) -> Vec<String> {
        let net = &self.metrics.network;
        let mut panel = Panel::new("NETWORK", BOX_WIDTH, self.theme)
            .line(format!("{}  {}", self.label("Host"), net.hostname));
        for iface in net.interfaces.iter().take(self.config.display.max_interfaces) {
            panel = panel.line(format!(
                "{} {}",
                self.label(&format!("{:<8}", truncate_to_width(&iface.name, 8))),
                iface.ipv4.as_deref().unwrap_or(PLACEHOLDER)
            ));
        }
        panel
            .separator()
            .line(format!(
                "{} {:<14} {} {}",
                role(self.theme, Role::Normal, "▲"),
                format_speed(self.rates.upload),
                role(self.theme, Role::Accent, "▼"),
                format_speed(self.rates.download)
            ))
            .line(format!(
                "{} {:<12} {} {}",
                self.label("TX"),
                format_size(net.bytes_sent),
                self.label("RX"),
                format_size(net.bytes_received)
            ))
            .finish()
    }

    fn battery_panel(&self) -> Vec<String> {
        let panel = Panel::new("BATTERY", BOX_WIDTH, self.theme);
        match &self.metrics.battery {
            Availability::Available(battery) => {
                let remaining = battery
                    .time_remaining_secs
                    .map(format_uptime)
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                // Low charge is the alarming end
                let level = 100.0 - battery.percent as f64;
                panel
                    .line(format!(
                        "{} {} {:5.1}%",
                        self.label("Charge"),
                        format!(
                            "[{}]",
                            paint(
                                &graph::bar(battery.percent as f64, BAR_WIDTH).0,
                                self.theme.usage_color(level)
                            )
                        ),
                        battery.percent
                    ))
                    .line(format!("{}  {}", self.label("State"), battery.state))
                    .line(format!("{}   {}", self.label("Left"), remaining))
                    .finish()
            }
            Availability::Unavailable(reason) => panel
                .line(self.dim(&format!("{} ({})", PLACEHOLDER, reason)))
                .finish(),
        }
    }

    fn security_panel(&self) -> Vec<String> {
        let panel = Panel::new("SECURITY", BOX_WIDTH, self.theme);
        let posture = match self.security {
            Availability::Available(posture) => posture,
            Availability::Unavailable(reason) => {
                return panel
                    .line(self.dim(&format!("{} ({})", PLACEHOLDER, reason)))
                    .finish()
            }
        };

        let firewall = match &posture.firewall {
            Availability::Available(fw) if fw.active => {
                role(self.theme, Role::Normal, &format!("active ({})", fw.backend))
            }
            Availability::Available(fw) => {
                role(self.theme, Role::Critical, &format!("inactive ({})", fw.backend))
            }
            Availability::Unavailable(_) => self.dim(PLACEHOLDER),
        };
        let failed = match &posture.failed_units {
            Availability::Available(units) if units.is_empty() => {
                role(self.theme, Role::Normal, "none")
            }
            Availability::Available(units) => role(
                self.theme,
                Role::Critical,
                &truncate_to_width(&units.join(", "), BOX_WIDTH - 12),
            ),
            Availability::Unavailable(_) => self.dim(PLACEHOLDER),
        };
        let usb = posture
            .usb_devices
            .display_or_placeholder(|devices| devices.len().to_string());
        let last_login = posture.recent_logins.display_or_placeholder(|logins| {
            logins
                .first()
                .map(|l| truncate_to_width(&format!("{} from {}", l.user, l.host), BOX_WIDTH - 12))
                .unwrap_or_else(|| "none".to_string())
        });

        panel
            .line(format!("{}  {}", self.label("Firewall"), firewall))
            .line(format!("{}    {}", self.label("Failed"), failed))
            .line(format!("{}  {}", self.label("USB devs"), usb))
            .line(format!("{}     {}", self.label("Login"), last_login))
            .finish()
    }

    fn process_panel(&self) -> Vec<String> {
        let width = BOX_WIDTH * 2 + 2;
        let mut panel = Panel::new("PROCESSES", width, self.theme).line(self.label(&format!(
            "{:>7}  {:<10} {:>6} {:>6}  {}",
            "PID", "USER", "CPU%", "MEM%", "NAME"
        )));
        for p in self.processes.iter().take(self.config.processes.max_processes) {
            panel = panel.line(format!(
                "{:>7}  {:<10} {} {:>6.1}  {}",
                p.pid,
                truncate_to_width(&p.user, 10),
                paint(&format!("{:>6.1}", p.cpu_percent), self.theme.usage_color(p.cpu_percent as f64)),
                p.memory_percent,
                truncate_to_width(&p.name, width - 36)
            ));
        }
        panel.finish()
    }
}

/// Render the whole static dashboard as one string.
pub fn render_static(view: &StaticView<'_>) -> String {
    let display = &view.config.display;
    let theme = view.theme;
    let mut out: Vec<String> = vec![String::new()];

    for line in BANNER {
        out.push(format!("{}{}", GAP, paint_bold(line, theme.header)));
    }
    out.push(String::new());

    let pairs: [(Option<Vec<String>>, Option<Vec<String>>); 4] = [
        (Some(view.system_panel()), display.show_cpu.then(|| view.cpu_panel())),
        (
            display.show_gpu.then(|| view.gpu_panel()),
            display.show_memory.then(|| view.memory_panel()),
        ),
        (
            display.show_disk.then(|| view.disk_panel()),
            display.show_network.then(|| view.network_panel()),
        ),
        (
            display.show_battery.then(|| view.battery_panel()),
            display.show_security.then(|| view.security_panel()),
        ),
    ];

    for pair in pairs {
        let rows = match pair {
            (Some(l), Some(r)) => side_by_side(l, r),
            (Some(only), None) | (None, Some(only)) => {
                only.into_iter().map(|l| format!("{}{}", GAP, l)).collect()
            }
            (None, None) => continue,
        };
        out.extend(rows);
        out.push(String::new());
    }

    if display.show_processes && !view.processes.is_empty() {
        out.extend(view.process_panel().into_iter().map(|l| format!("{}{}", GAP, l)));
        out.push(String::new());
    }

    out.push(format!(
        "{}{}",
        GAP,
        role(theme, Role::Footer, &"─".repeat(BOX_WIDTH * 2 + 6))
    ));
    out.push(format!(
        "{}{}",
        GAP,
        role(
            theme,
            Role::Footer,
            &format!(
                "wellz v{} | theme {} | run 'wellz' for interactive mode",
                env!("CARGO_PKG_VERSION"),
                theme.name
            )
        )
    ));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::THEMES;

    #[test]
    fn test_panel_lines_share_width() {
        let lines = Panel::new("CPU", 20, &THEMES[0])
            .line("hello")
            .line(paint("colored", Rgb(1, 2, 3)))
            .separator()
            .finish();
        let widths: Vec<usize> = lines.iter().map(|l| visible_width(l)).collect();
        assert!(widths.iter().all(|&w| w == 22), "{:?}", widths);
    }

    #[test]
    fn test_memory_panel_shows_swap_trend_with_history() {
        let config = Config::default();
        let mut metrics = SystemMetrics::default();
        metrics.memory.swap_total_bytes = 1 << 30;
        metrics.memory.swap_percent = 40.0;
        let mut history = MetricsHistory::with_capacity(8);
        history.swap.push(40.0);
        let security = Availability::Unavailable(crate::core::system_monitor::Unavailable::NoDevice);
        let mut view = StaticView {
            metrics: &metrics,
            rates: DerivedRates::default(),
            history: Some(&history),
            processes: &[],
            security: &security,
            config: &config,
            theme: &THEMES[0],
        };
        assert!(view.memory_panel().iter().any(|l| l.contains("SwapH")));

        view.history = None;
        assert!(!view.memory_panel().iter().any(|l| l.contains("SwapH")));
    }

    #[test]
    fn test_side_by_side_pads_short_column() {
        let rows = side_by_side(vec!["ab".into(), "abcd".into()], vec!["x".into()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(visible_width(&rows[1]), GAP.len() * 2 + 4);
    }
}
