// UI and formatting module

pub mod formatters;
pub mod graph;
pub mod monitor_tui;
pub mod panels;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_percent, format_size, format_speed, format_uptime, visible_width};
pub use panels::{render_static, StaticView};
