/*
 * Error Module
 *
 * Configuration and setup failures. Stepping a frame cannot fail, so these
 * only surface from construction, resizing and config loading.
 */

use thiserror::Error;

/// Problems loading or validating simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Errors raised when building or resizing a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("world dimensions must be positive and finite, got {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },
}
