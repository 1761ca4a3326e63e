//! Interactive dashboard command handler.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::config::Config;
use crate::ui::monitor_tui::run_dashboard;

/// Run the TUI until the user quits.
pub fn execute(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    log::debug!(
        "Starting dashboard: refresh {}s, theme {}",
        config.general.refresh_rate,
        config.theme.name
    );
    run_dashboard(config, config_path).context("Failed to run dashboard")
}
