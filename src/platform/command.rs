//! Running external OS tools (nvidia-smi, lsusb, systemctl, ...).

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::system_monitor::{Availability, Unavailable};

/// How long a tool may run before it is killed.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(2);

const POLL_STEP: Duration = Duration::from_millis(20);

pub fn is_tool_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Run `program` and return its stdout.
///
/// A program not on PATH is `ToolMissing`; a non-zero exit, spawn failure
/// or timeout is `Failed`. Never retried.
pub fn run_tool(program: &str, args: &[&str]) -> Availability<String> {
    let path = match which::which(program) {
        Ok(path) => path,
        Err(_) => {
            log::debug!("{} not found on PATH", program);
            return Availability::Unavailable(Unavailable::ToolMissing(program.to_string()));
        }
    };

    let mut child = match Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::warn!("Failed to spawn {}: {}", program, e);
            return Availability::Unavailable(Unavailable::Failed(format!(
                "{} failed to start",
                program
            )));
        }
    };

    // drain stdout while waiting so a full pipe cannot stall the child
    let reader = child.stdout.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            pipe.read_to_string(&mut buf).map(|_| buf)
        })
    });

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if started.elapsed() >= TOOL_TIMEOUT => {
                let _ = child.kill();
                let _ = child.wait();
                log::warn!("{} timed out after {:?}", program, TOOL_TIMEOUT);
                return Availability::Unavailable(Unavailable::Failed(format!(
                    "{} timed out",
                    program
                )));
            }
            Ok(None) => thread::sleep(POLL_STEP),
            Err(e) => {
                log::warn!("Failed to wait for {}: {}", program, e);
                return Availability::Unavailable(Unavailable::Failed(e.to_string()));
            }
        }
    };

    let stdout = match reader.map(|handle| handle.join()) {
        Some(Ok(Ok(out))) => out,
        Some(Ok(Err(e))) => {
            log::warn!("Failed to read {} output: {}", program, e);
            String::new()
        }
        Some(Err(_)) => {
            log::warn!("Output reader for {} panicked", program);
            String::new()
        }
        None => String::new(),
    };

    if status.success() {
        Availability::Available(stdout)
    } else {
        log::debug!("{} exited with {}", program, status);
        Availability::Unavailable(Unavailable::Failed(format!(
            "{} exited with {}",
            program, status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let out = run_tool("wellz-definitely-not-a-real-tool", &[]);
        assert_eq!(
            out,
            Availability::Unavailable(Unavailable::ToolMissing(
                "wellz-definitely-not-a-real-tool".to_string()
            ))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_is_read_fully() {
        let out = run_tool("sh", &["-c", "head -c 200000 /dev/zero | tr '\\0' 'a'"]);
        match out {
            Availability::Available(text) => assert_eq!(text.len(), 200_000),
            other => panic!("expected output, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failed() {
        let out = run_tool("sh", &["-c", "exit 3"]);
        assert!(matches!(out, Availability::Unavailable(Unavailable::Failed(_))));
    }
}
