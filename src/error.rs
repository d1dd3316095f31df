//! Crate-level error types.

use thiserror::Error;

/// Errors produced while configuring or initializing the controller.
///
/// Everything past initialization is either an animation-track restart or a
/// silently ignored no-op, so these are all setup failures.
#[derive(Debug, Error)]
pub enum HyperzoomError {
    /// The scene has neither a rig camera nor a main camera.
    #[error("no camera found in scene")]
    MissingCamera,

    /// The scene has no input-system root to receive pointer events.
    #[error("no input-system root present in scene")]
    MissingInputRoot,

    /// The camera zoom range is empty or inverted.
    #[error("invalid zoom range: minimum {minimum} must be below maximum {maximum}")]
    InvalidZoomRange { minimum: f32, maximum: f32 },

    /// A fade curve has no keys or unsorted keys.
    #[error("invalid fade curve '{name}': {reason}")]
    InvalidCurve { name: String, reason: String },

    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration files or environment could not be read.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HyperzoomError>;
