//! Focus registry health check

use crate::health::check::{CheckResult, Probes, SystemCheck};
use crate::scene::{FocusRegistry, SceneGraph};

/// Scans a demo scene and checks the registry classification
pub struct SceneCheck {
    targets: usize,
}

impl SceneCheck {
    pub fn new() -> Self {
        Self::with_targets(3)
    }

    pub fn with_targets(targets: usize) -> Self {
        Self { targets }
    }
}

impl Default for SceneCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SceneCheck {
    fn name(&self) -> &'static str {
        "Scene"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Scans a demo scene into targets and focused/unfocused faders")
    }

    fn check(&self) -> CheckResult {
        let mut probes = Probes::new();
        let scene = SceneGraph::demo(self.targets);
        let registry = FocusRegistry::scan(&scene);

        probes.expect(
            registry.target_count() == self.targets,
            format!("{} targets found", registry.target_count()),
            format!(
                "expected {} targets, found {}",
                self.targets,
                registry.target_count()
            ),
        );

        let surfaces = scene.nodes().filter(|n| n.surface).count();
        probes.expect(
            registry.focused_count() + registry.unfocused_count() == surfaces,
            format!(
                "{} focused + {} unfocused faders cover {surfaces} surfaces",
                registry.focused_count(),
                registry.unfocused_count()
            ),
            "some surfaces are unclassified or claimed twice",
        );

        let owned = registry
            .focused()
            .all(|(surface, owner)| registry.focus_owner(surface) == Some(owner));
        probes.expect(
            owned,
            "every focused fader resolves to its owner",
            "a focused fader resolves to the wrong owner",
        );

        if self.targets == 0 {
            probes.warn("demo scene has no focusable targets");
        }

        probes.finish(
            &format!("{} targets scanned", registry.target_count()),
            "Scene scanned with warnings",
            "Focus registry scan failed",
        )
    }
}
