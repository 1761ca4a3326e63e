use std::borrow::Cow;

use humansize::{format_size as human_format_size, FormatSizeOptions, WINDOWS};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static ANSI_ESCAPE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").ok());

/// Format byte count in human-readable form (1024 base: B, KB, MB, GB)
pub fn format_size(bytes: u64) -> String {
    human_format_size(bytes, FormatSizeOptions::from(WINDOWS).decimal_places(1))
}

/// Format a byte rate, e.g. `1.2 MB/s`
pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", format_size(bytes_per_sec.max(0.0) as u64))
}

/// `Xd Yh Zm`, `Yh Zm` or `Zm`
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_percent(value: f32) -> String {
    format!("{:.1}%", value)
}

/// Remove ANSI color escapes.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    match ANSI_ESCAPE.as_ref() {
        Some(re) => re.replace_all(text, ""),
        None => Cow::Borrowed(text),
    }
}

/// Terminal columns `text` occupies, ignoring ANSI escapes.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Cut plain text to at most `max` columns, adding `…` when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > max - 1 {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }

    #[test]
    fn test_visible_width_ignores_escapes() {
        assert_eq!(visible_width("\x1b[38;2;1;2;3mCPU\x1b[0m"), 3);
        assert_eq!(visible_width("█░"), 2);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("firefox", 10), "firefox");
        assert_eq!(truncate_to_width("firefox-bin", 5), "fire…");
    }
}
