//! Demo host application
//!
//! Opens a window, feeds mouse, touch and keyboard input into a
//! [`Hyperzoom`](crate::Hyperzoom) simulation and reloads the scene whenever a
//! transition finishes.

mod runner;
mod window;

pub use runner::App;
pub use window::{status_title, window_attributes_from_config};
