//! Basic security posture from OS command-line tools (Linux only).

use serde::{Deserialize, Serialize};

use super::metrics::{Availability, Unavailable};
use crate::platform::command::run_tool;

const RECENT_LOGINS: &str = "10";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsbDevice {
    pub bus: String,
    pub device: String,
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallStatus {
    pub backend: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub user: String,
    pub terminal: String,
    pub host: String,
    pub when: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityPosture {
    pub usb_devices: Availability<Vec<UsbDevice>>,
    pub failed_units: Availability<Vec<String>>,
    pub firewall: Availability<FirewallStatus>,
    pub recent_logins: Availability<Vec<LoginRecord>>,
}

/// Probe every source. Each probe fails independently.
pub fn collect_security() -> Availability<SecurityPosture> {
    if !cfg!(target_os = "linux") {
        return Availability::Unavailable(Unavailable::UnsupportedPlatform);
    }

    Availability::Available(SecurityPosture {
        usb_devices: run_tool("lsusb", &[]).map(|out| parse_lsusb(&out)),
        failed_units: run_tool(
            "systemctl",
            &["--failed", "--no-legend", "--plain", "--no-pager"],
        )
        .map(|out| parse_failed_units(&out)),
        firewall: firewall_status(),
        recent_logins: run_tool("last", &["-n", RECENT_LOGINS, "-w"])
            .map(|out| parse_last(&out)),
    })
}

fn firewall_status() -> Availability<FirewallStatus> {
    let ufw = run_tool("ufw", &["status"]);
    if let Availability::Available(out) = &ufw {
        if let Some(status) = parse_ufw(out) {
            return Availability::Available(status);
        }
    }

    match run_tool("firewall-cmd", &["--state"]) {
        Availability::Available(out) => Availability::Available(parse_firewalld(&out)),
        // firewall-cmd exits non-zero when the daemon is stopped
        Availability::Unavailable(Unavailable::Failed(_)) => {
            Availability::Available(FirewallStatus {
                backend: "firewalld".to_string(),
                active: false,
            })
        }
        // Prefer the ufw reason (usually "needs root") when ufw exists
        Availability::Unavailable(reason) => match ufw {
            Availability::Unavailable(Unavailable::ToolMissing(_)) => {
                Availability::Unavailable(reason)
            }
            Availability::Unavailable(ufw_reason) => Availability::Unavailable(ufw_reason),
            Availability::Available(_) => Availability::Unavailable(Unavailable::Failed(
                "unrecognized ufw output".to_string(),
            )),
        },
    }
}

/// `Bus 001 Device 002: ID 8087:0024 Intel Corp. Hub`
pub fn parse_lsusb(output: &str) -> Vec<UsbDevice> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            if parts.next()? != "Bus" {
                return None;
            }
            let bus = parts.next()?.to_string();
            parts.next()?; // "Device"
            let device = parts.next()?.trim_end_matches(':').to_string();
            parts.next()?; // "ID"
            let id = parts.next()?.to_string();
            let description = parts.collect::<Vec<_>>().join(" ");
            Some(UsbDevice {
                bus,
                device,
                id,
                description,
            })
        })
        .collect()
}

/// Unit names from `systemctl --failed --no-legend --plain`.
pub fn parse_failed_units(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            line.split_whitespace()
                .find(|token| *token != "●" && *token != "*")
                .map(str::to_string)
        })
        .collect()
}

pub fn parse_ufw(output: &str) -> Option<FirewallStatus> {
    let status = output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Status:"))?
        .trim();
    Some(FirewallStatus {
        backend: "ufw".to_string(),
        active: status == "active",
    })
}

pub fn parse_firewalld(output: &str) -> FirewallStatus {
    FirewallStatus {
        backend: "firewalld".to_string(),
        active: output.trim() == "running",
    }
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
/// Host shown for logins without a remote address
pub const LOCAL_HOST: &str = "local";

/// Login lines from `last -w`, skipping reboot records and the footer.
pub fn parse_last(output: &str) -> Vec<LoginRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with("wtmp") && !line.starts_with("btmp"))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let user = parts.next()?;
            if user == "reboot" || user == "shutdown" {
                return None;
            }
            let terminal = parts.next()?.to_string();
            let mut rest: Vec<&str> = parts.collect();
            // local logins leave the host column blank
            let host = match rest.first() {
                Some(token) if !WEEKDAYS.contains(token) => rest.remove(0).to_string(),
                _ => LOCAL_HOST.to_string(),
            };
            let when = rest.join(" ");
            Some(LoginRecord {
                user: user.to_string(),
                terminal,
                host,
                when,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lsusb() {
        let out = "Bus 002 Device 001: ID 1d6b:0003 Linux Foundation 3.0 root hub\n\
                   Bus 001 Device 004: ID 046d:c52b Logitech, Inc. Unifying Receiver\n";
        let devices = parse_lsusb(out);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1].device, "004");
        assert_eq!(devices[1].id, "046d:c52b");
        assert_eq!(devices[1].description, "Logitech, Inc. Unifying Receiver");
    }

    #[test]
    fn test_parse_failed_units() {
        let out = "● nginx.service loaded failed failed A high performance web server\n\
                   cups.socket loaded failed failed CUPS Scheduler\n";
        assert_eq!(parse_failed_units(out), vec!["nginx.service", "cups.socket"]);
        assert!(parse_failed_units("").is_empty());
    }

    #[test]
    fn test_parse_ufw() {
        let active = parse_ufw("Status: active\n\nTo Action From\n").unwrap();
        assert!(active.active);
        assert!(!parse_ufw("Status: inactive\n").unwrap().active);
        assert!(parse_ufw("ERROR: You need to be root").is_none());
    }

    #[test]
    fn test_parse_last_skips_reboots() {
        let out = "alice    pts/0        10.0.0.5         Mon Oct 14 10:00   still logged in\n\
                   reboot   system boot  6.8.0-45-generic Mon Oct 14 09:58   still running\n\
                   \n\
                   wtmp begins Tue Oct  1 08:00:01 2024\n";
        let logins = parse_last(out);
        assert_eq!(logins.len(), 1);
        assert_eq!(logins[0].user, "alice");
        assert_eq!(logins[0].host, "10.0.0.5");
        assert!(logins[0].when.starts_with("Mon Oct 14"));
    }

    #[test]
    fn test_parse_last_console_login_without_host() {
        let out = "bob      tty1                          Tue Oct 15 08:12   still logged in
";
        let logins = parse_last(out);
        assert_eq!(logins.len(), 1);
        assert_eq!(logins[0].terminal, "tty1");
        assert_eq!(logins[0].host, LOCAL_HOST);
        assert!(logins[0].when.starts_with("Tue Oct 15 08:12"));
    }
}
