// Platform-specific code module

pub mod command;
pub mod gpu;

pub use command::{is_tool_available, run_tool, TOOL_TIMEOUT};
pub use gpu::get_gpu_provider;
