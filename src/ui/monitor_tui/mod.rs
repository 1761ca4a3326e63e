//! Interactive terminal dashboard.
//!
//! A single loop collects a tick of metrics, records history, draws the
//! frame with ratatui, and polls crossterm for keys until the next tick.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard, App, LoopState, ProcessRow, StatusMessage};
pub use event_handler::{map_key, Action, InputMode, Section};
