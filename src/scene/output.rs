//! Writes from the controller back into the scene

use glam::{Quat, Vec3};
use indexmap::IndexMap;

use super::camera::ProjectionMode;
use super::graph::EntityId;

/// Receives every write the controller makes to the scene
pub trait SceneOutput {
    /// Orthographic size or field of view, depending on `mode`
    fn set_projection(&mut self, mode: ProjectionMode, value: f32);

    /// Opacity channel of one visual surface
    fn set_opacity(&mut self, surface: EntityId, alpha: f32);

    /// Position and orientation of the camera rig
    fn set_rig(&mut self, _position: Vec3, _rotation: Quat) {
        // Default: hosts that drive the rig themselves ignore this
    }
}

/// In-memory output retaining the latest write of each kind
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub projection: Option<(ProjectionMode, f32)>,
    pub opacities: IndexMap<EntityId, f32>,
    pub rig_position: Vec3,
    pub rig_rotation: Quat,
    /// Number of opacity writes since creation
    pub opacity_writes: usize,
}

impl FrameOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(&self, surface: EntityId) -> Option<f32> {
        self.opacities.get(&surface).copied()
    }
}

impl SceneOutput for FrameOutput {
    fn set_projection(&mut self, mode: ProjectionMode, value: f32) {
        self.projection = Some((mode, value));
    }

    fn set_opacity(&mut self, surface: EntityId, alpha: f32) {
        self.opacities.insert(surface, alpha);
        self.opacity_writes += 1;
    }

    fn set_rig(&mut self, position: Vec3, rotation: Quat) {
        self.rig_position = position;
        self.rig_rotation = rotation;
    }
}
