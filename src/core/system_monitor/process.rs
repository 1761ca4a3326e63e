//! Process listing, ordering, filtering and signalling.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, Signal, System};

use crate::error::{Result, WellzError};

/// One row of the process table. Replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub parent_pid: Option<u32>,
    pub user: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub memory_bytes: u64,
    pub status: String,
    pub name: String,
    pub command: String,
}

impl ProcessEntry {
    /// Case-insensitive match on name, user, PID or command line.
    /// `query` must already be lowercase.
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.user.to_lowercase().contains(query)
            || self.pid.to_string().contains(query)
            || self.command.to_lowercase().contains(query)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Cpu,
    Memory,
    Pid,
    Name,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [SortBy::Cpu, SortBy::Memory, SortBy::Pid, SortBy::Name];

    pub fn next(self) -> Self {
        match self {
            SortBy::Cpu => SortBy::Memory,
            SortBy::Memory => SortBy::Pid,
            SortBy::Pid => SortBy::Name,
            SortBy::Name => SortBy::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortBy::Cpu => "cpu",
            SortBy::Memory => "memory",
            SortBy::Pid => "pid",
            SortBy::Name => "name",
        }
    }

    fn compare(self, a: &ProcessEntry, b: &ProcessEntry) -> Ordering {
        match self {
            SortBy::Cpu => a.cpu_percent.total_cmp(&b.cpu_percent),
            SortBy::Memory => a.memory_percent.total_cmp(&b.memory_percent),
            SortBy::Pid => a.pid.cmp(&b.pid),
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sort in place.
///
/// For cpu and memory `descending` puts the heaviest first. For pid and
/// name the flag is inverted so the default shows ascending PIDs and
/// alphabetical names.
pub fn sort_processes(processes: &mut [ProcessEntry], sort_by: SortBy, descending: bool) {
    let reverse = match sort_by {
        SortBy::Cpu | SortBy::Memory => descending,
        SortBy::Pid | SortBy::Name => !descending,
    };
    processes.sort_by(|a, b| {
        let ord = sort_by.compare(a, b);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Keep the processes matching `query`. An empty query keeps everything.
pub fn filter_processes(processes: &[ProcessEntry], query: &str) -> Vec<ProcessEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return processes.to_vec();
    }
    processes
        .iter()
        .filter(|p| p.matches(&query))
        .cloned()
        .collect()
}

/// Signals offered in the signal menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessSignal {
    Term,
    Kill,
    Stop,
    Cont,
    Hup,
    Int,
    Quit,
    Usr1,
    Usr2,
}

impl ProcessSignal {
    pub const ALL: [ProcessSignal; 9] = [
        ProcessSignal::Term,
        ProcessSignal::Kill,
        ProcessSignal::Stop,
        ProcessSignal::Cont,
        ProcessSignal::Hup,
        ProcessSignal::Int,
        ProcessSignal::Quit,
        ProcessSignal::Usr1,
        ProcessSignal::Usr2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProcessSignal::Term => "SIGTERM",
            ProcessSignal::Kill => "SIGKILL",
            ProcessSignal::Stop => "SIGSTOP",
            ProcessSignal::Cont => "SIGCONT",
            ProcessSignal::Hup => "SIGHUP",
            ProcessSignal::Int => "SIGINT",
            ProcessSignal::Quit => "SIGQUIT",
            ProcessSignal::Usr1 => "SIGUSR1",
            ProcessSignal::Usr2 => "SIGUSR2",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProcessSignal::Term => "Terminate gracefully",
            ProcessSignal::Kill => "Force kill (cannot be caught)",
            ProcessSignal::Stop => "Stop/pause process",
            ProcessSignal::Cont => "Continue stopped process",
            ProcessSignal::Hup => "Hangup (reload config)",
            ProcessSignal::Int => "Interrupt (like Ctrl+C)",
            ProcessSignal::Quit => "Quit with core dump",
            ProcessSignal::Usr1 => "User defined signal 1",
            ProcessSignal::Usr2 => "User defined signal 2",
        }
    }

    /// Look up by name, with or without the `SIG` prefix, any case.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        let full = if upper.starts_with("SIG") {
            upper
        } else {
            format!("SIG{}", upper)
        };
        Self::ALL.into_iter().find(|s| s.name() == full)
    }

    fn to_sysinfo(self) -> Signal {
        match self {
            ProcessSignal::Term => Signal::Term,
            ProcessSignal::Kill => Signal::Kill,
            ProcessSignal::Stop => Signal::Stop,
            ProcessSignal::Cont => Signal::Continue,
            ProcessSignal::Hup => Signal::Hangup,
            ProcessSignal::Int => Signal::Interrupt,
            ProcessSignal::Quit => Signal::Quit,
            ProcessSignal::Usr1 => Signal::User1,
            ProcessSignal::Usr2 => Signal::User2,
        }
    }
}

/// Deliver `signal` to `pid`. Fire-and-forget: success means the OS
/// accepted the signal, not that the process reacted to it.
pub fn send_signal(system: &mut System, pid: u32, signal: ProcessSignal) -> Result<()> {
    let target = Pid::from_u32(pid);
    system.refresh_processes(ProcessesToUpdate::Some(&[target]), true);

    let process = system
        .process(target)
        .ok_or(WellzError::ProcessNotFound(pid))?;

    match process.kill_with(signal.to_sysinfo()) {
        Some(true) => {
            log::info!("Sent {} to process {}", signal.name(), pid);
            Ok(())
        }
        Some(false) => Err(WellzError::signal_failed(
            pid,
            signal.name(),
            "permission denied",
        )),
        None => Err(WellzError::signal_failed(
            pid,
            signal.name(),
            "signal not supported on this platform",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pid: u32, name: &str, cpu: f32, mem: f32) -> ProcessEntry {
        ProcessEntry {
            pid,
            name: name.to_string(),
            cpu_percent: cpu,
            memory_percent: mem,
            ..Default::default()
        }
    }

    #[test]
    fn test_signal_lookup_accepts_short_names() {
        assert_eq!(ProcessSignal::from_name("term"), Some(ProcessSignal::Term));
        assert_eq!(ProcessSignal::from_name("SIGKILL"), Some(ProcessSignal::Kill));
        assert_eq!(ProcessSignal::from_name("sigusr2"), Some(ProcessSignal::Usr2));
        assert_eq!(ProcessSignal::from_name("SIGWINCH"), None);
    }

    #[test]
    fn test_sort_name_default_is_alphabetical() {
        let mut procs = vec![entry(1, "zsh", 0.0, 0.0), entry(2, "Bash", 0.0, 0.0)];
        sort_processes(&mut procs, SortBy::Name, true);
        assert_eq!(procs[0].name, "Bash");
    }

    #[test]
    fn test_sort_by_cycles_through_all() {
        let mut s = SortBy::Cpu;
        for _ in 0..SortBy::ALL.len() {
            s = s.next();
        }
        assert_eq!(s, SortBy::Cpu);
    }
}
