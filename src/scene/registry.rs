//! Focusable targets and fader classification

use std::collections::HashMap;

use glam::Vec3;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::graph::{EntityId, SceneGraph};

/// Ordered focusable targets plus every surface sorted into focused or
/// unfocused faders. Built once per scene load.
#[derive(Debug, Clone, Default)]
pub struct FocusRegistry {
    targets: Vec<EntityId>,
    /// surface -> owning target
    focused: IndexMap<EntityId, EntityId>,
    unfocused: IndexSet<EntityId>,
    /// any entity under a target -> owning target
    members: HashMap<EntityId, EntityId>,
    names: HashMap<EntityId, String>,
    positions: HashMap<EntityId, Vec3>,
}

impl FocusRegistry {
    /// Scans the scene once
    ///
    /// Every surface is first placed in `unfocused`; each focusable subtree
    /// then claims its surfaces, moving them over to `focused`. A nested
    /// target claims its own subtree back from an enclosing one, so each
    /// surface ends up owned by its nearest focusable ancestor.
    pub fn scan(scene: &SceneGraph) -> Self {
        let mut registry = Self::default();

        for node in scene.nodes() {
            if node.surface {
                registry.unfocused.insert(node.id);
            }
            if node.focusable {
                registry.targets.push(node.id);
                registry.names.insert(node.id, node.name.clone());
                registry.positions.insert(node.id, node.position);
            }
        }

        for &target in &registry.targets {
            for member in scene.subtree(target) {
                let claim = match registry.members.get(&member) {
                    // only a deeper target may take over an existing claim
                    Some(&owner) => owner != target && scene.is_within(target, owner),
                    None => true,
                };
                if !claim {
                    continue;
                }
                registry.members.insert(member, target);

                let is_surface = scene.node(member).is_some_and(|n| n.surface);
                if is_surface {
                    registry.unfocused.shift_remove(&member);
                    registry.focused.insert(member, target);
                }
            }
        }

        debug!(
            targets = registry.targets.len(),
            focused = registry.focused.len(),
            unfocused = registry.unfocused.len(),
            "Focus registry scanned"
        );

        registry
    }

    /// Focusable targets in scan order
    pub fn targets(&self) -> &[EntityId] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_target(&self, id: EntityId) -> bool {
        self.names.contains_key(&id)
    }

    /// Position of `id` in the ordered target list
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.targets.iter().position(|&t| t == id)
    }

    /// Surfaces under a focusable subtree, with their owning target
    pub fn focused(&self) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
        self.focused.iter().map(|(&surface, &owner)| (surface, owner))
    }

    /// Surfaces outside every focusable subtree
    pub fn unfocused(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.unfocused.iter().copied()
    }

    pub fn focused_count(&self) -> usize {
        self.focused.len()
    }

    pub fn unfocused_count(&self) -> usize {
        self.unfocused.len()
    }

    /// Owning target of a focused surface
    pub fn owner_of(&self, surface: EntityId) -> Option<EntityId> {
        self.focused.get(&surface).copied()
    }

    /// Resolves a hit entity to the target it belongs to
    ///
    /// Returns `None` for anything outside a focusable subtree (the background).
    pub fn focus_owner(&self, hit: EntityId) -> Option<EntityId> {
        self.members.get(&hit).copied()
    }

    pub fn name_of(&self, target: EntityId) -> Option<&str> {
        self.names.get(&target).map(String::as_str)
    }

    /// Looks a target up by name
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.targets
            .iter()
            .copied()
            .find(|t| self.name_of(*t) == Some(name))
    }

    pub fn position_of(&self, target: EntityId) -> Option<Vec3> {
        self.positions.get(&target).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn village() -> (SceneGraph, [EntityId; 6]) {
        let mut scene = SceneGraph::new();
        let ground = scene.add_surface("ground", None);
        let house = scene.add_focusable("house", None);
        let roof = scene.add_surface("roof", Some(house));
        let group = scene.add_entity("group", Some(house));
        let window = scene.add_surface("window", Some(group));
        let well = scene.add_focusable("well", None);
        (scene, [ground, house, roof, group, window, well])
    }

    #[test]
    fn test_targets_keep_scan_order() {
        let (scene, [_, house, _, _, _, well]) = village();
        let registry = FocusRegistry::scan(&scene);
        assert_eq!(registry.targets(), &[house, well]);
        assert_eq!(registry.index_of(well), Some(1));
        assert_eq!(registry.find_by_name("house"), Some(house));
    }

    #[test]
    fn test_surfaces_are_partitioned() {
        let (scene, [ground, house, roof, _, window, well]) = village();
        let registry = FocusRegistry::scan(&scene);

        assert_eq!(registry.owner_of(house), Some(house));
        assert_eq!(registry.owner_of(roof), Some(house));
        assert_eq!(registry.owner_of(window), Some(house));
        assert_eq!(registry.owner_of(well), Some(well));
        assert_eq!(registry.unfocused().collect::<Vec<_>>(), vec![ground]);
        assert_eq!(registry.focused_count() + registry.unfocused_count(), 5);
    }

    #[test]
    fn test_focus_owner_resolves_non_surface_members() {
        let (scene, [ground, house, _, group, _, _]) = village();
        let registry = FocusRegistry::scan(&scene);

        assert_eq!(registry.focus_owner(group), Some(house));
        assert_eq!(registry.focus_owner(ground), None);
    }

    #[test]
    fn test_nested_target_owns_its_subtree() {
        let mut scene = SceneGraph::new();
        let castle = scene.add_focusable("castle", None);
        let tower = scene.add_focusable("tower", Some(castle));
        let flag = scene.add_surface("flag", Some(tower));
        let wall = scene.add_surface("wall", Some(castle));

        let registry = FocusRegistry::scan(&scene);
        assert_eq!(registry.owner_of(flag), Some(tower));
        assert_eq!(registry.owner_of(tower), Some(tower));
        assert_eq!(registry.owner_of(wall), Some(castle));
        assert_eq!(registry.unfocused_count(), 0);
    }

    #[test]
    fn test_empty_scene() {
        let registry = FocusRegistry::scan(&SceneGraph::new());
        assert_eq!(registry.target_count(), 0);
        assert_eq!(registry.focused_count(), 0);
    }
}
