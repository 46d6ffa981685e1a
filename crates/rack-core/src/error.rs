//! Plan-file error types.

use thiserror::Error;

/// Errors raised while loading or validating a rack plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("rack height must be positive")]
    InvalidRackHeight,

    #[error("objective weights must sum to 1.0, got {sum:.4}")]
    InvalidWeights { sum: f64 },

    #[error("duplicate device id: {0}")]
    DuplicateDevice(String),

    #[error("{context} references unknown device id: {device_id}")]
    UnknownDevice {
        context: &'static str,
        device_id: String,
    },
}

pub type PlanResult<T> = Result<T, PlanError>;
