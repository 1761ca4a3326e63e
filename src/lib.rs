// wellz library - public API

pub mod error;
pub use error::{Result, WellzError};

pub mod commands;
pub mod core;
#[cfg(feature = "gui")]
pub mod gui;
pub mod platform;
pub mod ui;

pub use crate::core::config::Config;
pub use crate::core::theme::{Theme, ThemeCycle};

/// Initialize logging.
///
/// Defaults to `warn` so log lines do not tear through the dashboard;
/// `RUST_LOG` overrides it.
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}
