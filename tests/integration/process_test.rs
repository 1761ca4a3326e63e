use wellz::core::system_monitor::{
    filter_processes, sort_processes, tree_order, MetricsCollector, ProcessEntry, ProcessSignal,
    SortBy,
};
use wellz::WellzError;

fn entry(pid: u32, parent: Option<u32>, name: &str, cpu: f32, memory: f32) -> ProcessEntry {
    ProcessEntry {
        pid,
        parent_pid: parent,
        user: if pid < 100 { "root" } else { "alice" }.to_string(),
        cpu_percent: cpu,
        memory_percent: memory,
        memory_bytes: (memory * 1024.0) as u64,
        status: "Sleep".to_string(),
        name: name.to_string(),
        command: format!("/usr/bin/{} --flag", name),
    }
}

fn sample() -> Vec<ProcessEntry> {
    vec![
        entry(1, None, "systemd", 0.1, 0.5),
        entry(42, Some(1), "sshd", 2.0, 1.0),
        entry(400, Some(42), "Bash", 5.0, 0.2),
        entry(401, Some(400), "vim", 1.0, 3.0),
    ]
}

fn pids(processes: &[ProcessEntry]) -> Vec<u32> {
    processes.iter().map(|p| p.pid).collect()
}

#[test]
fn test_sort_by_cpu_descending() {
    let mut processes = sample();
    sort_processes(&mut processes, SortBy::Cpu, true);
    assert_eq!(pids(&processes), vec![400, 42, 401, 1]);
}

#[test]
fn test_sort_by_memory_ascending() {
    let mut processes = sample();
    sort_processes(&mut processes, SortBy::Memory, false);
    assert_eq!(pids(&processes), vec![400, 1, 42, 401]);
}

#[test]
fn test_pid_and_name_default_to_ascending() {
    let mut processes = sample();
    sort_processes(&mut processes, SortBy::Pid, true);
    assert_eq!(pids(&processes), vec![1, 42, 400, 401]);

    sort_processes(&mut processes, SortBy::Name, true);
    let names: Vec<&str> = processes.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bash", "sshd", "systemd", "vim"]);
}

#[test]
fn test_filter_matches_name_user_pid_and_command() {
    let processes = sample();
    assert_eq!(pids(&filter_processes(&processes, "SSH")), vec![42]);
    assert_eq!(pids(&filter_processes(&processes, "alice")), vec![400, 401]);
    assert_eq!(pids(&filter_processes(&processes, "401")), vec![401]);
    assert_eq!(pids(&filter_processes(&processes, "--flag")).len(), 4);
    assert_eq!(filter_processes(&processes, "").len(), 4);
}

#[test]
fn test_tree_order_parents_before_children() {
    let mut processes = sample();
    processes.reverse();
    let ordered = tree_order(&processes);

    let order: Vec<u32> = ordered.iter().map(|f| f.process.pid).collect();
    assert_eq!(order, vec![1, 42, 400, 401]);
    let depths: Vec<usize> = ordered.iter().map(|f| f.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 3]);
}

#[test]
fn test_signal_names() {
    assert_eq!(ProcessSignal::from_name("kill"), Some(ProcessSignal::Kill));
    assert_eq!(ProcessSignal::from_name("SIGusr2"), Some(ProcessSignal::Usr2));
    assert_eq!(ProcessSignal::from_name("SIGNOPE"), None);
    assert_eq!(ProcessSignal::ALL.len(), 9);
}

#[test]
fn test_signal_to_missing_pid_is_reported() {
    let mut collector = MetricsCollector::new();
    let result = collector.send_signal(u32::MAX - 7, ProcessSignal::Term);
    assert!(matches!(result, Err(WellzError::ProcessNotFound(_))));
}
