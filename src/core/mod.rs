// Core business logic module

pub mod config;
pub mod system_monitor;
pub mod theme;

// Re-export commonly used items
pub use config::{Config, GraphStyle, TempUnit};
pub use theme::{Rgb, Role, Theme, ThemeCycle, THEMES};
