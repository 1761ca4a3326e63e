use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::config::Config;
use crate::core::theme::{Theme, THEMES};
use crate::ui::panels::paint;

/// Write the default config to `path` unless one exists.
pub fn init(path: &Path) -> Result<()> {
    let written = Config::init_default(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    if written {
        println!("{} {}", "Created".green().bold(), path.display());
    } else {
        println!(
            "{} {} already exists, leaving it untouched",
            "Skipped".yellow().bold(),
            path.display()
        );
    }
    Ok(())
}

/// Print every built-in theme, marking the active one.
pub fn list_themes(active: &Theme) {
    for theme in THEMES.iter() {
        let marker = if theme.key == active.key { "*" } else { " " };
        let swatch: String = [theme.cpu, theme.memory, theme.gpu, theme.disk, theme.network]
            .iter()
            .map(|&color| paint("██", color))
            .collect();
        println!("{} {:<12} {} {}", marker, theme.key, swatch, theme.name.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wellz").join("config.toml");

        init(&path).unwrap();
        std::fs::write(&path, "[theme]\nname = \"nord\"\n").unwrap();
        init(&path).unwrap();

        let kept = std::fs::read_to_string(&path).unwrap();
        assert!(kept.contains("nord"));
    }
}
