//! Scene snapshot consumed at load time

use glam::Vec3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::camera::ProjectionMode;

/// Stable identifier of a scene entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// One entity of the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: EntityId,
    pub name: String,
    pub parent: Option<EntityId>,
    /// World position, used by the rig to follow the selected target
    pub position: Vec3,
    /// Whether this entity can become the zoom target
    pub focusable: bool,
    /// Whether this entity carries a visual surface with an opacity channel
    pub surface: bool,
}

/// Camera found in the scene
#[derive(Debug, Clone, Copy)]
pub struct CameraSpec {
    pub projection: ProjectionMode,
    /// Background colour (linear RGBA)
    pub background: [f32; 4],
    /// Starting rig yaw in degrees
    pub yaw: f32,
    /// Starting rig pitch in degrees
    pub pitch: f32,
}

impl CameraSpec {
    /// A camera looking down at the scene from 30 degrees
    pub fn new(projection: ProjectionMode) -> Self {
        Self {
            projection,
            background: [0.0, 0.0, 0.0, 1.0],
            yaw: 0.0,
            pitch: 30.0,
        }
    }

    pub fn with_background(mut self, background: [f32; 4]) -> Self {
        self.background = background;
        self
    }

    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

/// Snapshot of the scene hierarchy
///
/// Entities keep their insertion order, which is the scan order used by the
/// focus registry.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: IndexMap<EntityId, SceneNode>,
    rig_camera: Option<CameraSpec>,
    main_camera: Option<CameraSpec>,
    input_root: bool,
    next_id: u32,
}

impl SceneGraph {
    /// Creates an empty scene with an input root
    pub fn new() -> Self {
        Self {
            input_root: true,
            ..Self::default()
        }
    }

    /// A ground plane and a ring of `targets` houses, each with a roof and a
    /// door, seen by an orthographic rig camera
    pub fn demo(targets: usize) -> Self {
        let mut scene = Self::new().with_rig_camera(
            CameraSpec::new(ProjectionMode::Orthographic).with_background([0.53, 0.81, 0.92, 1.0]),
        );
        scene.add_surface("ground", None);
        scene.add_surface("sky", None);

        let radius = 2.0 * targets as f32;
        for i in 0..targets {
            let angle = i as f32 / targets as f32 * std::f32::consts::TAU;
            let house = scene.add_focusable(format!("house-{i}"), None);
            scene.add_surface(format!("roof-{i}"), Some(house));
            scene.add_surface(format!("door-{i}"), Some(house));
            scene.set_position(
                house,
                Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius),
            );
        }
        scene
    }

    /// Adds an entity and returns its id
    pub fn add_entity(&mut self, name: impl Into<String>, parent: Option<EntityId>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                id,
                name: name.into(),
                parent,
                position: Vec3::ZERO,
                focusable: false,
                surface: false,
            },
        );
        id
    }

    /// Adds a focusable entity carrying its own surface
    pub fn add_focusable(&mut self, name: impl Into<String>, parent: Option<EntityId>) -> EntityId {
        let id = self.add_entity(name, parent);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.focusable = true;
            node.surface = true;
        }
        id
    }

    /// Adds a plain visual surface
    pub fn add_surface(&mut self, name: impl Into<String>, parent: Option<EntityId>) -> EntityId {
        let id = self.add_entity(name, parent);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.surface = true;
        }
        id
    }

    /// Builder: sets an entity's world position
    pub fn with_position(mut self, id: EntityId, position: Vec3) -> Self {
        self.set_position(id, position);
        self
    }

    /// Sets an entity's world position
    pub fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
        }
    }

    /// Builder: attaches a camera to the zoom rig
    pub fn with_rig_camera(mut self, camera: CameraSpec) -> Self {
        self.rig_camera = Some(camera);
        self
    }

    /// Builder: sets the scene's main camera
    pub fn with_main_camera(mut self, camera: CameraSpec) -> Self {
        self.main_camera = Some(camera);
        self
    }

    /// Builder: sets whether an input-system root exists
    pub fn with_input_root(mut self, present: bool) -> Self {
        self.input_root = present;
        self
    }

    pub fn rig_camera(&self) -> Option<&CameraSpec> {
        self.rig_camera.as_ref()
    }

    pub fn main_camera(&self) -> Option<&CameraSpec> {
        self.main_camera.as_ref()
    }

    pub fn has_input_root(&self) -> bool {
        self.input_root
    }

    pub fn node(&self, id: EntityId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// All entities in scan order
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` is `ancestor` or lies somewhere beneath it
    pub fn is_within(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut current = Some(id);
        // Bounded walk so a malformed parent cycle cannot hang the scan
        for _ in 0..=self.nodes.len() {
            match current {
                Some(node) if node == ancestor => return true,
                Some(node) => current = self.nodes.get(&node).and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    /// `root` and every entity beneath it, in scan order
    pub fn subtree(&self, root: EntityId) -> Vec<EntityId> {
        self.nodes
            .keys()
            .copied()
            .filter(|&id| self.is_within(id, root))
            .collect()
    }
}
