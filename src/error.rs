use std::io;
use thiserror::Error;

/// Custom error type for wellz
#[derive(Error, Debug)]
pub enum WellzError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Process {0} not found")]
    ProcessNotFound(u32),

    #[error("Failed to send {signal} to process {pid}: {reason}")]
    SignalFailed {
        pid: u32,
        signal: String,
        reason: String,
    },

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),
}

/// Result type alias for wellz
pub type Result<T> = std::result::Result<T, WellzError>;

impl WellzError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WellzError::Config(msg.into())
    }

    pub fn signal_failed<S: Into<String>, R: Into<String>>(pid: u32, signal: S, reason: R) -> Self {
        WellzError::SignalFailed {
            pid,
            signal: signal.into(),
            reason: reason.into(),
        }
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        WellzError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        WellzError::MetricCollection(msg.into())
    }
}
