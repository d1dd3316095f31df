//! Built-in health checks

pub mod build_info;
pub mod config;
pub mod controller;
pub mod scene;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use controller::ControllerCheck;
pub use scene::SceneCheck;
