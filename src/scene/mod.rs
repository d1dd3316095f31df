//! Scene boundary
//!
//! Everything the controller knows about the scene comes from a
//! [`SceneGraph`] snapshot taken once at load time, and everything it changes
//! goes out through a [`SceneOutput`].
//!
//! ```text
//! SceneGraph ──scan──▶ FocusRegistry ──▶ ZoomFocusController ──▶ SceneOutput
//!                                                 │
//!                                                 └──▶ Camera (projection, rig)
//! ```

mod camera;
mod graph;
mod output;
mod registry;

pub use camera::{Camera, PitchClamp, ProjectionMode, ZoomRange};
pub use graph::{CameraSpec, EntityId, SceneGraph, SceneNode};
pub use output::{FrameOutput, SceneOutput};
pub use registry::FocusRegistry;
