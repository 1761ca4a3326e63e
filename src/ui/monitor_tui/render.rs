use ratatui::{
    prelude::*,
    widgets::{Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use super::app::{App, STATUS_TTL};
use super::event_handler::InputMode;
use super::widgets::{
    dual_graph_paragraph, fg, graph_paragraph, labeled, panel_block, to_color, usage_gauge,
};
use crate::core::system_monitor::{Availability, HistoryBuffer, ProcessSignal, PLACEHOLDER};
use crate::core::theme::{Role, Theme};
use crate::ui::formatters::{format_size, format_speed, format_uptime, truncate_to_width};
use crate::ui::graph;

/// Samples shown per core in the per-core row
const CORE_TREND: usize = 3;
/// Width of the GPU temperature trend next to the reading
const GPU_TEMP_SPARK: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelKind {
    Cpu,
    Memory,
    Network,
    Gpu,
    Disk,
    Security,
    Battery,
}

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = app.theme();

    let panels = visible_panels(app);
    let mut constraints = vec![Constraint::Length(1)];
    let pairs: Vec<&[PanelKind]> = panels.chunks(2).collect();
    for pair in &pairs {
        let height = pair.iter().map(|&k| panel_height(app, k)).max().unwrap_or(0);
        constraints.push(Constraint::Length(height));
    }
    if app.display.show_processes {
        constraints.push(Constraint::Min(5));
    } else {
        constraints.push(Constraint::Min(0));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, chunks[0], app, theme);
    for (i, pair) in pairs.iter().enumerate() {
        let row = chunks[i + 1];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, pair.len() as u32); pair.len()])
            .split(row);
        for (&kind, &column) in pair.iter().zip(columns.iter()) {
            render_panel(frame, column, app, theme, kind);
        }
    }
    if app.display.show_processes {
        render_processes(frame, chunks[pairs.len() + 1], app, theme);
    }
    render_footer(frame, chunks[pairs.len() + 2], app, theme);

    match app.mode {
        InputMode::Help => render_help_overlay(frame, area, theme),
        InputMode::SignalMenu => render_signal_menu(frame, area, app, theme),
        InputMode::Normal | InputMode::Search => {}
    }
}

fn visible_panels(app: &App) -> Vec<PanelKind> {
    let d = &app.display;
    [
        (d.show_cpu, PanelKind::Cpu),
        (d.show_memory, PanelKind::Memory),
        (d.show_network, PanelKind::Network),
        (d.show_gpu, PanelKind::Gpu),
        (d.show_disk, PanelKind::Disk),
        (d.show_security, PanelKind::Security),
        (d.show_battery && app.metrics.battery.is_available(), PanelKind::Battery),
    ]
    .into_iter()
    .filter_map(|(shown, kind)| shown.then_some(kind))
    .collect()
}

fn graph_rows(app: &App) -> u16 {
    if app.display.show_graphs {
        app.display.graph_height
    } else {
        0
    }
}

/// Outer height of a panel, borders included.
fn panel_height(app: &App, kind: PanelKind) -> u16 {
    let body = match kind {
        PanelKind::Cpu => 2 + graph_rows(app) + u16::from(app.display.show_per_core),
        PanelKind::Memory => 3 + graph_rows(app),
        PanelKind::Network => 2 + graph_rows(app),
        PanelKind::Gpu => 3 + graph_rows(app),
        PanelKind::Disk => {
            let disks = app.metrics.disks.len().min(app.display.max_disks).max(1);
            disks as u16 + 1 + graph_rows(app)
        }
        PanelKind::Security => 4,
        PanelKind::Battery => 2,
    };
    body + 2
}

fn render_panel(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, kind: PanelKind) {
    match kind {
        PanelKind::Cpu => render_cpu(frame, area, app, theme),
        PanelKind::Memory => render_memory(frame, area, app, theme),
        PanelKind::Network => render_network(frame, area, app, theme),
        PanelKind::Gpu => render_gpu(frame, area, app, theme),
        PanelKind::Disk => render_disk(frame, area, app, theme),
        PanelKind::Security => render_security(frame, area, app, theme),
        PanelKind::Battery => render_battery(frame, area, app, theme),
    }
}

/// One-row slots followed by an optional graph slot taking the rest.
fn split_lines(area: Rect, lines: u16, graph: bool) -> Vec<Rect> {
    let mut constraints = vec![Constraint::Length(1); lines as usize];
    if graph {
        constraints.push(Constraint::Min(0));
    }
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let host = &app.metrics.host;
    let sep = Span::styled(" │ ", fg(theme, Role::Border));
    let line = Line::from(vec![
        Span::styled(" wellz", fg(theme, Role::Header).add_modifier(Modifier::BOLD)),
        sep.clone(),
        Span::styled(host.hostname.clone(), fg(theme, Role::Value)),
        sep.clone(),
        Span::styled(
            format!("{} {}", host.os_name, host.os_version),
            fg(theme, Role::Value),
        ),
        sep.clone(),
        Span::styled(format!("up {}", format_uptime(host.uptime_secs)), fg(theme, Role::Value)),
        sep.clone(),
        Span::styled(
            format!(
                "load {:.2} {:.2} {:.2}",
                app.metrics.cpu.load_average.0,
                app.metrics.cpu.load_average.1,
                app.metrics.cpu.load_average.2
            ),
            fg(theme, Role::Value),
        ),
        sep,
        Span::styled(
            format!("{} │ {:.1}s", theme.name, app.refresh_rate),
            fg(theme, Role::Footer),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_cpu(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let cpu = &app.metrics.cpu;
    let block = panel_block(format!("CPU {}", cpu.brand.trim()), theme, Role::Cpu);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_graph = app.display.show_graphs;
    let text_lines = 2 + u16::from(app.display.show_per_core);
    let slots = split_lines(inner, text_lines, show_graph);

    let cores = cpu
        .physical_cores
        .map(|c| c.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let mut summary = vec![
        Span::styled("Total ", fg(theme, Role::Label)),
        Span::styled(
            format!("{:5.1}%", cpu.global_usage),
            Style::default().fg(to_color(theme.usage_color(cpu.global_usage as f64))),
        ),
        Span::styled(
            format!("  {}C/{}T  {} MHz", cores, cpu.logical_cores, cpu.frequency_mhz),
            fg(theme, Role::Value),
        ),
    ];
    if let Some(avg) = app.history.cpu.average() {
        summary.push(Span::styled(format!("  avg {:.1}%", avg), fg(theme, Role::Footer)));
    }
    frame.render_widget(Paragraph::new(Line::from(summary)), slots[0]);

    let temps = if app.metrics.temperatures.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        app.metrics
            .temperatures
            .iter()
            .take(4)
            .map(|t| format!("{} {}", t.label, app.config.advanced.temp_unit.format(t.current_celsius)))
            .collect::<Vec<_>>()
            .join(" │ ")
    };
    frame.render_widget(
        Paragraph::new(labeled(theme, "Temp", temps, fg(theme, Role::Value))),
        slots[1],
    );

    if app.display.show_per_core {
        let spans: Vec<Span> = cpu
            .per_core_usage
            .iter()
            .take(app.display.max_cores)
            .enumerate()
            .flat_map(|(i, &usage)| {
                let recent = match app.history.per_core.get(i) {
                    Some(core) => core.fit_to_width(CORE_TREND),
                    None => vec![usage as f64],
                };
                [
                    Span::styled(format!("{}", i), fg(theme, Role::Label)),
                    Span::styled(
                        format!("{} ", graph::sparkline(&recent, CORE_TREND, 0.0, 100.0)),
                        Style::default().fg(to_color(theme.usage_color(usage as f64))),
                    ),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), slots[2]);
    }

    if show_graph {
        if let Some(&graph_area) = slots.last() {
            let rows = graph::render(
                app.display.graph_style,
                &app.history.cpu.fit_to_width(graph_area.width as usize * 2),
                graph_area.width as usize,
                graph_area.height as usize,
                0.0,
                100.0,
            );
            frame.render_widget(graph_paragraph(rows, theme.cpu), graph_area);
        }
    }
}

fn render_memory(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mem = &app.metrics.memory;
    let block = panel_block("Memory".to_string(), theme, Role::Memory);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let slots = split_lines(inner, 3, app.display.show_graphs);

    frame.render_widget(
        usage_gauge(
            theme,
            mem.usage_percent as f64,
            format!("RAM {:.1}%", mem.usage_percent),
        ),
        slots[0],
    );
    let swap_label = if mem.swap_total_bytes > 0 {
        format!("Swap {:.1}%", mem.swap_percent)
    } else {
        format!("Swap {}", PLACEHOLDER)
    };
    frame.render_widget(
        usage_gauge(theme, mem.swap_percent as f64, swap_label),
        slots[1],
    );
    frame.render_widget(
        Paragraph::new(labeled(
            theme,
            "Used",
            format!(
                "{} / {}  avail {}",
                format_size(mem.used_bytes),
                format_size(mem.total_bytes),
                format_size(mem.available_bytes)
            ),
            fg(theme, Role::Value),
        )),
        slots[2],
    );

    if app.display.show_graphs {
        let graph_area = slots[3];
        let rows = graph::render(
            app.display.graph_style,
            &app.history.memory.fit_to_width(graph_area.width as usize * 2),
            graph_area.width as usize,
            graph_area.height as usize,
            0.0,
            100.0,
        );
        frame.render_widget(graph_paragraph(rows, theme.memory), graph_area);
    }
}

fn render_network(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let net = &app.metrics.network;
    let block = panel_block("Network".to_string(), theme, Role::Network);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let slots = split_lines(inner, 2, app.display.show_graphs);

    let rates = Line::from(vec![
        Span::styled("▲ ", fg(theme, Role::Normal)),
        Span::styled(format!("{:<14}", format_speed(app.rates.upload)), fg(theme, Role::Value)),
        Span::styled("▼ ", fg(theme, Role::Accent)),
        Span::styled(format_speed(app.rates.download), fg(theme, Role::Value)),
    ]);
    frame.render_widget(Paragraph::new(rates), slots[0]);

    let interfaces = net
        .interfaces
        .iter()
        .take(app.display.max_interfaces)
        .map(|i| format!("{} {}", i.name, i.ipv4.as_deref().unwrap_or(PLACEHOLDER)))
        .collect::<Vec<_>>()
        .join("  ");
    frame.render_widget(
        Paragraph::new(labeled(
            theme,
            "TX/RX",
            format!(
                "{}/{}  {}",
                format_size(net.bytes_sent),
                format_size(net.bytes_received),
                interfaces
            ),
            fg(theme, Role::Value),
        )),
        slots[1],
    );

    if app.display.show_graphs {
        let graph_area = slots[2];
        let width = graph_area.width as usize;
        let up = app.history.upload.fit_to_width(width);
        let down = app.history.download.fit_to_width(width);
        let peak = series_peak(&app.history.upload, &app.history.download);
        let rows = graph::braille_dual(&up, &down, width, graph_area.height as usize, 0.0, peak);
        frame.render_widget(
            dual_graph_paragraph(rows, theme.normal, theme.accent, theme.value),
            graph_area,
        );
    }
}

fn render_gpu(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Availability::Available(gpu) = &app.metrics.gpu else {
        let block = panel_block("GPU".to_string(), theme, Role::Gpu);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let reason = match &app.metrics.gpu {
            Availability::Unavailable(reason) => reason.to_string(),
            Availability::Available(_) => String::new(),
        };
        frame.render_widget(
            Paragraph::new(format!("{} ({})", PLACEHOLDER, reason)).style(fg(theme, Role::Footer)),
            inner,
        );
        return;
    };

    let block = panel_block(format!("GPU {}", gpu.name), theme, Role::Gpu);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let slots = split_lines(inner, 3, app.display.show_graphs);

    match gpu.utilization_percent {
        Some(usage) => frame.render_widget(
            usage_gauge(theme, usage as f64, format!("Usage {:.1}%", usage)),
            slots[0],
        ),
        None => frame.render_widget(
            Paragraph::new("Stats unavailable").style(fg(theme, Role::Footer)),
            slots[0],
        ),
    }

    match (gpu.memory_percent(), gpu.memory_used_bytes, gpu.memory_total_bytes) {
        (Some(pct), Some(used), Some(total)) => frame.render_widget(
            usage_gauge(
                theme,
                pct as f64,
                format!("VRAM {} / {}", format_size(used), format_size(total)),
            ),
            slots[1],
        ),
        _ => frame.render_widget(
            Paragraph::new(labeled(theme, "VRAM", PLACEHOLDER.to_string(), fg(theme, Role::Footer))),
            slots[1],
        ),
    }

    let temp = gpu
        .temperature_celsius
        .map(|t| app.config.advanced.temp_unit.format(t))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let mut temp_line = labeled(
        theme,
        "Temp",
        format!("{}  ({})  ", temp, gpu.vendor),
        fg(theme, Role::Value),
    );
    let temps = &app.history.gpu_temperature;
    if let (Some(low), Some(high)) = (temps.min(), temps.max()) {
        let values: Vec<f64> = temps.values().copied().collect();
        temp_line.spans.push(Span::styled(
            graph::sparkline(&values, GPU_TEMP_SPARK, low.min(high - 1.0), high),
            fg(theme, Role::Gpu),
        ));
    }
    frame.render_widget(Paragraph::new(temp_line), slots[2]);

    if app.display.show_graphs {
        let graph_area = slots[3];
        let rows = graph::render(
            app.display.graph_style,
            &app.history.gpu_usage.fit_to_width(graph_area.width as usize * 2),
            graph_area.width as usize,
            graph_area.height as usize,
            0.0,
            100.0,
        );
        frame.render_widget(graph_paragraph(rows, theme.gpu), graph_area);
    }
}

fn render_disk(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = panel_block("Disk".to_string(), theme, Role::Disk);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let disks: Vec<_> = app
        .metrics
        .disks
        .iter()
        .take(app.display.max_disks)
        .collect();
    let show_graph = app.display.show_graphs;
    let text_lines = disks.len().max(1) as u16 + 1;
    let slots = split_lines(inner, text_lines, show_graph);

    if disks.is_empty() {
        frame.render_widget(
            Paragraph::new(PLACEHOLDER).style(fg(theme, Role::Footer)),
            slots[0],
        );
    }
    for (disk, &slot) in disks.iter().zip(slots.iter()) {
        frame.render_widget(
            usage_gauge(
                theme,
                disk.usage_percent as f64,
                format!(
                    "{} {} / {}",
                    truncate_to_width(&disk.mount_point, 16),
                    format_size(disk.used_bytes),
                    format_size(disk.total_bytes)
                ),
            ),
            slot,
        );
    }

    let io = Line::from(vec![
        Span::styled("Read ", fg(theme, Role::Label)),
        Span::styled(format!("{:<14}", format_speed(app.rates.disk_read)), fg(theme, Role::Value)),
        Span::styled("Write ", fg(theme, Role::Label)),
        Span::styled(format_speed(app.rates.disk_write), fg(theme, Role::Value)),
    ]);
    frame.render_widget(Paragraph::new(io), slots[text_lines as usize - 1]);

    if show_graph {
        let graph_area = slots[text_lines as usize];
        let width = graph_area.width as usize;
        let read = app.history.disk_read.fit_to_width(width);
        let write = app.history.disk_write.fit_to_width(width);
        let peak = series_peak(&app.history.disk_read, &app.history.disk_write);
        let rows = graph::braille_dual(&read, &write, width, graph_area.height as usize, 0.0, peak);
        frame.render_widget(
            dual_graph_paragraph(rows, theme.normal, theme.accent, theme.value),
            graph_area,
        );
    }
}

/// Shared upper bound for a pair of rate histories, at least 1 B/s.
fn series_peak(first: &HistoryBuffer<f64>, second: &HistoryBuffer<f64>) -> f64 {
    first
        .max()
        .into_iter()
        .chain(second.max())
        .fold(1.0_f64, f64::max)
}

fn render_security(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = panel_block("Security".to_string(), theme, Role::Accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let posture = match &app.security {
        Availability::Available(posture) => posture,
        Availability::Unavailable(reason) => {
            frame.render_widget(
                Paragraph::new(format!("{} ({})", PLACEHOLDER, reason)).style(fg(theme, Role::Footer)),
                inner,
            );
            return;
        }
    };

    let dim = fg(theme, Role::Footer);
    let firewall = match &posture.firewall {
        Availability::Available(fw) if fw.active => labeled(
            theme,
            "Firewall",
            format!("active ({})", fw.backend),
            fg(theme, Role::Normal),
        ),
        Availability::Available(fw) => labeled(
            theme,
            "Firewall",
            format!("inactive ({})", fw.backend),
            fg(theme, Role::Critical),
        ),
        Availability::Unavailable(_) => labeled(theme, "Firewall", PLACEHOLDER.to_string(), dim),
    };
    let failed = match &posture.failed_units {
        Availability::Available(units) if units.is_empty() => {
            labeled(theme, "Failed units", "none".to_string(), fg(theme, Role::Normal))
        }
        Availability::Available(units) => {
            labeled(theme, "Failed units", units.join(", "), fg(theme, Role::Critical))
        }
        Availability::Unavailable(_) => labeled(theme, "Failed units", PLACEHOLDER.to_string(), dim),
    };
    let usb = labeled(
        theme,
        "USB devices",
        posture.usb_devices.display_or_placeholder(|d| d.len().to_string()),
        fg(theme, Role::Value),
    );
    let login = labeled(
        theme,
        "Last login",
        posture.recent_logins.display_or_placeholder(|logins| {
            logins
                .first()
                .map(|l| format!("{} on {} from {} {}", l.user, l.terminal, l.host, l.when))
                .unwrap_or_else(|| "none".to_string())
        }),
        fg(theme, Role::Value),
    );

    frame.render_widget(Paragraph::new(vec![firewall, failed, usb, login]), inner);
}

fn render_battery(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = panel_block("Battery".to_string(), theme, Role::Normal);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Availability::Available(battery) = &app.metrics.battery else {
        return;
    };
    let slots = split_lines(inner, 2, false);
    // low charge is the alarming end, so invert for the color
    frame.render_widget(
        usage_gauge(theme, 100.0 - battery.percent as f64, String::new())
            .ratio((battery.percent as f64 / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", battery.percent)),
        slots[0],
    );
    let remaining = battery
        .time_remaining_secs
        .map(format_uptime)
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    frame.render_widget(
        Paragraph::new(labeled(
            theme,
            "State",
            format!("{}  left {}", battery.state, remaining),
            fg(theme, Role::Value),
        )),
        slots[1],
    );
}

fn render_processes(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let arrow = if app.sort_descending { "▼" } else { "▲" };
    let mut title = format!(
        "Processes ({}) │ sort: {} {}",
        app.rows.len(),
        app.sort_by.label(),
        arrow
    );
    if app.tree_view {
        title.push_str(" │ tree");
    }
    if !app.filter.is_empty() {
        title.push_str(&format!(" │ filter: {}", app.filter));
    }
    let block = panel_block(title, theme, Role::Process);

    let header = Row::new(["PID", "USER", "CPU%", "MEM%", "MEM", "STATE", "NAME"]).style(
        fg(theme, Role::Header).add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|row| {
            let p = &row.entry;
            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(truncate_to_width(&p.user, 10)),
                Cell::from(format!("{:.1}", p.cpu_percent))
                    .style(Style::default().fg(to_color(theme.usage_color(p.cpu_percent as f64)))),
                Cell::from(format!("{:.1}", p.memory_percent)),
                Cell::from(format_size(p.memory_bytes)),
                Cell::from(p.status.clone()),
                Cell::from(format!("{}{}", row.indent, p.name)),
            ])
            .style(fg(theme, Role::Value))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(to_color(theme.selected))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if app.mode == InputMode::Search {
        let line = Line::from(vec![
            Span::styled(" /", fg(theme, Role::Accent)),
            Span::styled(app.search_buffer.clone(), fg(theme, Role::Value)),
            Span::styled("█", fg(theme, Role::Accent)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if let Some(status) = app
        .status
        .as_ref()
        .filter(|s| s.set_at.elapsed() < STATUS_TTL)
    {
        let role = if status.is_error { Role::Critical } else { Role::Normal };
        frame.render_widget(
            Paragraph::new(format!(" {}", status.text)).style(fg(theme, role)),
            area,
        );
        return;
    }

    let help = " q quit │ ? help │ / search │ K term │ s signal │ t tree │ o sort │ c theme │ +/- refresh ";
    frame.render_widget(Paragraph::new(help).style(fg(theme, Role::Footer)), area);
}

const HELP_TEXT: &[(&str, &str)] = &[
    ("q / Ctrl+C", "Quit"),
    ("j k / ↑ ↓", "Move selection"),
    ("g G / Home End", "Top / bottom"),
    ("PgUp PgDn", "Move by 10"),
    ("/", "Filter processes"),
    ("Esc", "Close overlay or clear filter"),
    ("K", "Send SIGTERM to selected"),
    ("s", "Signal menu"),
    ("t", "Toggle tree view"),
    ("o", "Cycle sort column"),
    ("1-6", "Toggle CPU, memory, network, disk, GPU, security"),
    ("p", "Toggle process list"),
    ("c / C", "Next / previous theme"),
    ("+ / -", "Faster / slower refresh"),
    ("r", "Reset view"),
    ("R", "Reload config"),
    ("?", "Toggle this help"),
];

fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = HELP_TEXT
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {:<16}", key), fg(theme, Role::Accent)),
                Span::styled(*what, fg(theme, Role::Value)),
            ])
        })
        .collect();

    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(lines).block(panel_block("Help".to_string(), theme, Role::Title)),
        popup_area,
    );
}

fn render_signal_menu(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let target = app
        .selected_process()
        .map(|p| format!("Signal {} ({})", p.name, p.pid))
        .unwrap_or_else(|| "Signal".to_string());

    let items: Vec<ListItem> = ProcessSignal::ALL
        .iter()
        .map(|signal| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<8} ", signal.name()), fg(theme, Role::Accent)),
                Span::styled(signal.description(), fg(theme, Role::Value)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel_block(target, theme, Role::Warning))
        .highlight_style(
            Style::default()
                .bg(to_color(theme.selected))
                .fg(Color::Black),
        );

    let popup_area = centered_rect(50, 50, area);
    let mut state = ListState::default().with_selected(Some(app.signal_index));
    frame.render_widget(Clear, popup_area);
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, outer);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
    }

    #[test]
    fn test_dashboard_renders_with_empty_metrics() {
        let app = App::new(Config::default(), None);
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).expect("test terminal");
        terminal
            .draw(|frame| render_ui(frame, &app))
            .expect("draw succeeds");

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("wellz"));
        assert!(text.contains("Processes"));
    }

    fn draw_disk_panel(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("test terminal");
        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, 40, panel_height(app, PanelKind::Disk));
                render_disk(frame, area, app, app.theme());
            })
            .expect("draw succeeds");
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    fn has_braille_dots(text: &str) -> bool {
        text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    #[test]
    fn test_disk_panel_draws_io_graph() {
        let mut app = App::new(Config::default(), None);
        for (read, write) in [(0.0, 0.0), (4096.0, 1024.0), (8192.0, 0.0), (2048.0, 16384.0)] {
            app.history.disk_read.push(read);
            app.history.disk_write.push(write);
        }

        let text = draw_disk_panel(&app);
        assert!(text.contains("Read"));
        assert!(has_braille_dots(&text));

        app.display.show_graphs = false;
        assert!(!has_braille_dots(&draw_disk_panel(&app)));
    }

    #[test]
    fn test_panel_heights_follow_graph_setting() {
        let mut app = App::new(Config::default(), None);
        let with_graph = panel_height(&app, PanelKind::Memory);
        app.display.show_graphs = false;
        assert_eq!(panel_height(&app, PanelKind::Memory), with_graph - app.display.graph_height);
        app.display.show_graphs = true;
        let disk_with_graph = panel_height(&app, PanelKind::Disk);
        app.display.show_graphs = false;
        assert_eq!(panel_height(&app, PanelKind::Disk), disk_with_graph - app.display.graph_height);
    }
}
