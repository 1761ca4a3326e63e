// Command handlers module
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod snapshot;

// Re-exports for cleaner imports
pub use dashboard::execute as dashboard;
pub use snapshot::{run_json, run_legacy, run_static};
