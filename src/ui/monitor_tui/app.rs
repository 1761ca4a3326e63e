use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::{clamp_refresh_rate, Config, DisplayConfig, REFRESH_STEP};
use crate::core::system_monitor::{
    filter_processes, sort_processes, tree_order, format_tree_indent, Availability,
    CollectorConfig, DerivedRates, MetricsCollector, MetricsHistory, ProcessEntry, ProcessSignal,
    SecurityPosture, SortBy, SystemMetrics, Unavailable,
};
use crate::core::theme::{Theme, ThemeCycle};

use super::event_handler::{map_key, Action, InputMode, Section};
use super::render::render_ui;

/// Security probes shell out to several tools; run them every N ticks
const SECURITY_REFRESH_TICKS: u64 = 30;
const PAGE_SIZE: usize = 10;
/// How long a status line stays on screen
pub const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub set_at: Instant,
}

/// One visible row of the process table
#[derive(Debug, Clone)]
pub struct ProcessRow {
    pub entry: ProcessEntry,
    /// Tree glyphs, empty outside tree view
    pub indent: String,
}

/// Dashboard state
pub struct App {
    pub config: Config,
    config_path: Option<PathBuf>,
    pub collector: MetricsCollector,
    pub history: MetricsHistory,
    pub metrics: SystemMetrics,
    pub rates: DerivedRates,
    pub security: Availability<SecurityPosture>,
    processes: Vec<ProcessEntry>,
    pub rows: Vec<ProcessRow>,
    pub selected: usize,
    pub filter: String,
    pub search_buffer: String,
    pub mode: InputMode,
    pub signal_index: usize,
    pub tree_view: bool,
    pub sort_by: SortBy,
    pub sort_descending: bool,
    pub display: DisplayConfig,
    pub themes: ThemeCycle,
    pub refresh_rate: f64,
    pub status: Option<StatusMessage>,
    pub state: LoopState,
    tick: u64,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let collector = MetricsCollector::with_config(collector_config(&config.display));

        Self {
            history: MetricsHistory::with_capacity(config.general.history_size),
            collector,
            metrics: SystemMetrics::default(),
            rates: DerivedRates::default(),
            security: Availability::Unavailable(Unavailable::NoDevice),
            processes: Vec::new(),
            rows: Vec::new(),
            selected: 0,
            filter: String::new(),
            search_buffer: String::new(),
            mode: InputMode::Normal,
            signal_index: 0,
            tree_view: config.processes.tree_view,
            sort_by: config.processes.sort_by,
            sort_descending: config.processes.sort_descending,
            display: config.display.clone(),
            themes: ThemeCycle::new(&config.theme.name),
            refresh_rate: config.general.refresh_rate,
            status: None,
            state: LoopState::Running,
            tick: 0,
            config,
            config_path,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        self.themes.current()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(self.refresh_rate)
    }

    /// Collect, record history, and refresh the throttled sources.
    pub fn tick(&mut self, now: Instant) {
        self.metrics = self.collector.collect();
        self.rates = self.history.record(&self.metrics, now);

        let process_every = u64::from(self.config.processes.update_interval.max(1));
        if self.display.show_processes && self.tick % process_every == 0 {
            let processes = self.collector.collect_processes();
            self.set_processes(processes);
        }
        if self.display.show_security && self.tick % SECURITY_REFRESH_TICKS == 0 {
            self.security = self.collector.collect_security();
        }
        self.tick += 1;
    }

    pub fn set_processes(&mut self, processes: Vec<ProcessEntry>) {
        self.processes = processes;
        self.rebuild_rows();
    }

    /// Filter, sort, and (in tree view) reorder the process rows, keeping
    /// the selection on the same PID when it is still listed.
    fn rebuild_rows(&mut self) {
        let selected_pid = self.selected_process().map(|p| p.pid);

        let mut visible = filter_processes(&self.processes, &self.filter);
        sort_processes(&mut visible, self.sort_by, self.sort_descending);

        self.rows = if self.tree_view {
            tree_order(&visible)
                .into_iter()
                .map(|flat| ProcessRow {
                    indent: format_tree_indent(&flat),
                    entry: flat.process,
                })
                .collect()
        } else {
            visible
                .into_iter()
                .map(|entry| ProcessRow {
                    entry,
                    indent: String::new(),
                })
                .collect()
        };

        if let Some(pid) = selected_pid {
            if let Some(index) = self.rows.iter().position(|r| r.entry.pid == pid) {
                self.selected = index;
            }
        }
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub fn selected_process(&self) -> Option<&ProcessEntry> {
        self.rows.get(self.selected).map(|r| &r.entry)
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            set_at: Instant::now(),
        });
    }

    pub fn handle(&mut self, action: Action) {
        let last = self.rows.len().saturating_sub(1);
        match action {
            Action::Quit => self.state = LoopState::Stopped,
            Action::Up => self.selected = self.selected.saturating_sub(1),
            Action::Down => self.selected = (self.selected + 1).min(last),
            Action::Top => self.selected = 0,
            Action::Bottom => self.selected = last,
            Action::PageUp => self.selected = self.selected.saturating_sub(PAGE_SIZE),
            Action::PageDown => self.selected = (self.selected + PAGE_SIZE).min(last),
            Action::StartSearch => {
                self.search_buffer = self.filter.clone();
                self.mode = InputMode::Search;
            }
            Action::SearchInput(c) => {
                self.search_buffer.push(c);
                self.apply_filter();
            }
            Action::SearchBackspace => {
                self.search_buffer.pop();
                self.apply_filter();
            }
            Action::SearchSubmit => self.mode = InputMode::Normal,
            Action::Cancel => self.cancel(),
            Action::TerminateSelected => self.signal_selected(ProcessSignal::Term),
            Action::OpenSignalMenu => {
                if self.selected_process().is_some() {
                    self.signal_index = 0;
                    self.mode = InputMode::SignalMenu;
                }
            }
            Action::SignalMenuUp => self.signal_index = self.signal_index.saturating_sub(1),
            Action::SignalMenuDown => {
                self.signal_index = (self.signal_index + 1).min(ProcessSignal::ALL.len() - 1)
            }
            Action::SignalMenuConfirm => {
                self.mode = InputMode::Normal;
                if let Some(&signal) = ProcessSignal::ALL.get(self.signal_index) {
                    self.signal_selected(signal);
                }
            }
            Action::ToggleTree => {
                self.tree_view = !self.tree_view;
                self.rebuild_rows();
            }
            Action::CycleSort => {
                self.sort_by = self.sort_by.next();
                self.rebuild_rows();
            }
            Action::ToggleSection(section) => self.toggle_section(section),
            Action::ToggleProcesses => {
                self.display.show_processes = !self.display.show_processes
            }
            Action::ToggleHelp => {
                self.mode = if self.mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                }
            }
            Action::NextTheme => {
                let theme = self.themes.next();
                self.set_status(format!("Theme: {}", theme.name), false);
            }
            Action::PrevTheme => {
                let theme = self.themes.prev();
                self.set_status(format!("Theme: {}", theme.name), false);
            }
            Action::Faster => self.set_refresh_rate(self.refresh_rate - REFRESH_STEP),
            Action::Slower => self.set_refresh_rate(self.refresh_rate + REFRESH_STEP),
            Action::ResetView => self.reset_view(),
            Action::ReloadConfig => self.reload_config(),
            Action::None => {}
        }
    }

    fn apply_filter(&mut self) {
        self.filter = self.search_buffer.clone();
        self.selected = 0;
        self.rebuild_rows();
    }

    fn cancel(&mut self) {
        match self.mode {
            InputMode::Normal => {
                if !self.filter.is_empty() {
                    self.filter.clear();
                    self.search_buffer.clear();
                    self.rebuild_rows();
                }
            }
            InputMode::Search => {
                self.search_buffer.clear();
                self.apply_filter();
                self.mode = InputMode::Normal;
            }
            InputMode::SignalMenu | InputMode::Help => self.mode = InputMode::Normal,
        }
    }

    fn toggle_section(&mut self, section: Section) {
        let flag = match section {
            Section::Cpu => &mut self.display.show_cpu,
            Section::Memory => &mut self.display.show_memory,
            Section::Network => &mut self.display.show_network,
            Section::Disk => &mut self.display.show_disk,
            Section::Gpu => &mut self.display.show_gpu,
            Section::Security => &mut self.display.show_security,
        };
        *flag = !*flag;

        if section == Section::Security && self.display.show_security && !self.security.is_available() {
            self.security = self.collector.collect_security();
        }
    }

    fn set_refresh_rate(&mut self, seconds: f64) {
        self.refresh_rate = clamp_refresh_rate(seconds);
        self.set_status(format!("Refresh: {:.1}s", self.refresh_rate), false);
    }

    fn signal_selected(&mut self, signal: ProcessSignal) {
        let Some((pid, name)) = self.selected_process().map(|p| (p.pid, p.name.clone())) else {
            return;
        };

        match self.collector.send_signal(pid, signal) {
            Ok(()) => {
                log::info!("Sent {} to {} ({})", signal.name(), pid, name);
                self.set_status(format!("Sent {} to {} ({})", signal.name(), name, pid), false);
            }
            Err(e) => {
                log::warn!("Signal {} to {} failed: {}", signal.name(), pid, e);
                self.set_status(e.to_string(), true);
            }
        }
    }

    /// Back to the configured view: no filter, top row, configured sort,
    /// tree mode, panels and refresh rate.
    fn reset_view(&mut self) {
        self.filter.clear();
        self.search_buffer.clear();
        self.selected = 0;
        self.mode = InputMode::Normal;
        self.tree_view = self.config.processes.tree_view;
        self.sort_by = self.config.processes.sort_by;
        self.sort_descending = self.config.processes.sort_descending;
        self.display = self.config.display.clone();
        self.refresh_rate = self.config.general.refresh_rate;
        self.rebuild_rows();
        self.set_status("View reset", false);
    }

    fn reload_config(&mut self) {
        let loaded = match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };

        match loaded {
            Ok(config) => {
                self.themes = ThemeCycle::new(&config.theme.name);
                self.config = config;
                self.reset_view();
                self.set_status("Config reloaded", false);
            }
            Err(e) => {
                log::warn!("Config reload failed: {}", e);
                self.set_status(format!("Config reload failed: {}", e), true);
            }
        }
    }
}

fn collector_config(display: &DisplayConfig) -> CollectorConfig {
    CollectorConfig {
        collect_gpu: display.show_gpu,
        collect_battery: display.show_battery,
        ..CollectorConfig::default()
    }
}

/// Run the interactive dashboard until the user quits.
///
/// The terminal is restored before any loop error is returned.
pub fn run_dashboard(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal(&mut io::stdout());
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(config, config_path);
    let result = run_loop(&mut terminal, &mut app);

    restore_terminal(terminal.backend_mut())?;
    result
}

/// Leave raw mode and the alternate screen, and show the cursor again.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(out, LeaveAlternateScreen, cursor::Show)
        .context("Failed to leave alternate screen")?;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    app.collector.warm_up();
    app.tick(Instant::now());
    let mut last_tick = Instant::now();

    while app.state == LoopState::Running {
        terminal.draw(|frame| render_ui(frame, app))?;

        let timeout = app
            .refresh_interval()
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let action = map_key(key, app.mode, app.config.keybindings.vim_mode);
                    app.handle(action);
                }
            }
        }

        if last_tick.elapsed() >= app.refresh_interval() {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_restore_terminal_leaves_alternate_screen() {
        let mut out: Vec<u8> = Vec::new();
        restore_terminal(&mut out).expect("restore succeeds outside raw mode");
        let written = String::from_utf8(out).expect("ansi output");
        assert!(written.contains("\x1b[?1049l"), "{:?}", written);
        assert!(written.contains("\x1b[?25h"), "{:?}", written);
    }

    fn entry(pid: u32, parent: Option<u32>, name: &str, cpu: f32) -> ProcessEntry {
        ProcessEntry {
            pid,
            parent_pid: parent,
            user: "root".to_string(),
            cpu_percent: cpu,
            memory_percent: 0.0,
            memory_bytes: 0,
            status: "Run".to_string(),
            name: name.to_string(),
            command: name.to_string(),
        }
    }

    fn app_with_processes() -> App {
        let mut app = App::new(Config::default(), None);
        app.set_processes(vec![
            entry(1, None, "init", 0.5),
            entry(20, Some(1), "sshd", 3.0),
            entry(300, Some(20), "bash", 10.0),
        ]);
        app
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = app_with_processes();
        app.handle(Action::Up);
        assert_eq!(app.selected, 0);
        app.handle(Action::PageDown);
        assert_eq!(app.selected, 2);
        app.handle(Action::Top);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_default_sort_is_cpu_descending() {
        let app = app_with_processes();
        let pids: Vec<u32> = app.rows.iter().map(|r| r.entry.pid).collect();
        assert_eq!(pids, vec![300, 20, 1]);
    }

    #[test]
    fn test_tree_view_puts_parents_first() {
        let mut app = app_with_processes();
        app.handle(Action::ToggleTree);
        let pids: Vec<u32> = app.rows.iter().map(|r| r.entry.pid).collect();
        assert_eq!(pids, vec![1, 20, 300]);
        assert!(app.rows[0].indent.is_empty());
    }

    #[test]
    fn test_search_filters_and_escape_clears() {
        let mut app = app_with_processes();
        app.handle(Action::StartSearch);
        for c in "ssh".chars() {
            app.handle(Action::SearchInput(c));
        }
        app.handle(Action::SearchSubmit);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.mode, InputMode::Normal);

        app.handle(Action::Cancel);
        assert_eq!(app.rows.len(), 3);
    }

    #[test]
    fn test_refresh_rate_steps_are_clamped() {
        let mut app = App::new(Config::default(), None);
        for _ in 0..10 {
            app.handle(Action::Faster);
        }
        assert_eq!(app.refresh_rate, 0.5);
        app.handle(Action::Slower);
        assert_eq!(app.refresh_rate, 1.0);
    }

    #[test]
    fn test_signal_to_missing_process_keeps_running() {
        let mut app = App::new(Config::default(), None);
        app.set_processes(vec![entry(u32::MAX - 1, None, "ghost", 0.0)]);
        app.handle(Action::TerminateSelected);

        assert_eq!(app.state, LoopState::Running);
        let status = app.status.expect("status line set");
        assert!(status.is_error);
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = App::new(Config::default(), None);
        app.handle(Action::Quit);
        assert_eq!(app.state, LoopState::Stopped);
    }
}
