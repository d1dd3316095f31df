//! Hyperzoom
//!
//! A camera-focus and gesture-interpretation controller: pointer, touch and
//! controller input become a continuous zoom value that drives the camera
//! projection, fades scene surfaces by focus state and fires scene-transition
//! signals at the zoom extremes.

/// Host application - windowing and raw input feeding
pub mod app;

/// Build-time information (build timestamp, target, compiler)
pub mod build_info;

/// Typed event vocabulary and the publish/subscribe registry
pub mod bus;

/// Configuration profiles
pub mod config;

/// Crate error type
pub mod error;

/// Health check system
pub mod health;

/// The assembled simulation wiring input, registry and controller
pub mod hyperzoom;

/// Raw input, gesture classification and alternate controls
pub mod input;

/// Scene snapshot, focus registry, camera and output boundary
pub mod scene;

/// Host clock and simulation lifecycle
pub mod sim;

/// Scene-transition sink boundary
pub mod transition;

/// Zoom state, fading and the focus controller
pub mod zoom;

pub use crate::config::HyperzoomConfig;
pub use crate::error::{HyperzoomError, Result};
pub use crate::hyperzoom::Hyperzoom;
