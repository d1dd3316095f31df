//! The assembled zoom simulation
//!
//! Wires the gesture tracker, the alternate input mapper and the zoom/focus
//! controller together behind the [`Simulation`] lifecycle. The host feeds
//! raw pointer events and polled controller state in; everything the
//! controller changes goes out through its [`SceneOutput`].

use std::any::Any;

use tracing::{debug, error, info};

use crate::bus::{Subscriber, SubscriptionId};
use crate::config::HyperzoomConfig;
use crate::error::Result;
use crate::input::{
    AlternateInputMapper, ControllerState, GestureTracker, KeyCode, PointerEvent,
};
use crate::scene::{CameraSpec, FrameOutput, SceneGraph, SceneOutput};
use crate::sim::Simulation;
use crate::transition::SceneTransitionSink;
use crate::zoom::ZoomFocusController;

/// Input, registry and controller for one loaded scene
pub struct Hyperzoom<O: SceneOutput + Default + 'static = FrameOutput> {
    config: HyperzoomConfig,
    scene: SceneGraph,
    tracker: GestureTracker,
    mapper: AlternateInputMapper,
    controller_state: ControllerState,
    controller: Option<ZoomFocusController<O>>,
    viewport_width: f32,
}

impl<O: SceneOutput + Default + 'static> Hyperzoom<O> {
    /// Prepares a simulation for `scene`; nothing runs until `initialize`
    pub fn new(scene: SceneGraph, config: &HyperzoomConfig, viewport_width: f32) -> Self {
        Self {
            tracker: GestureTracker::new(&config.gesture),
            mapper: AlternateInputMapper::new(&config.alternate),
            controller_state: ControllerState::new(),
            controller: None,
            viewport_width,
            scene,
            config: config.clone(),
        }
    }

    /// Builds and initializes a simulation outside a world
    pub fn start(scene: SceneGraph, config: &HyperzoomConfig, viewport_width: f32) -> Result<Self> {
        let mut hyperzoom = Self::new(scene, config, viewport_width);
        hyperzoom.initialize()?;
        Ok(hyperzoom)
    }

    /// Tears the controller down and builds a fresh one from the same scene
    ///
    /// Subscribers and transition sinks do not survive a reload.
    pub fn reload(&mut self) -> Result<()> {
        self.shutdown();
        self.controller = None;
        self.tracker = GestureTracker::new(&self.config.gesture);
        self.mapper = AlternateInputMapper::new(&self.config.alternate);
        self.initialize()
    }

    /// Feed one raw pointer event
    ///
    /// The hit entity of a press is resolved to the focusable target that
    /// owns it; hits outside every target count as background.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let event = match (event, &self.controller) {
            (PointerEvent::Down { hit: Some(hit), .. }, Some(controller)) => {
                event.with_hit(controller.registry().focus_owner(hit))
            }
            _ => event,
        };
        self.tracker.handle(&event);
    }

    /// Replace the polled controller state for the next tick
    pub fn set_controller_state(&mut self, state: ControllerState) {
        self.controller_state = state;
    }

    /// Handle a command key press
    pub fn handle_key(&mut self, key: KeyCode) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        match key {
            KeyCode::X => controller.toggle_xray(),
            KeyCode::R => controller.reset_perspective(),
            _ => {}
        }
    }

    /// Viewport resized
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
        if let Some(controller) = self.controller.as_mut() {
            controller.set_viewport_width(width);
        }
    }

    /// Connect a scene-transition sink; `None` until initialized
    pub fn attach_transition_sink<S>(&mut self, sink: S) -> Option<SubscriptionId>
    where
        S: SceneTransitionSink + 'static,
    {
        self.controller
            .as_mut()
            .map(|controller| controller.attach_transition_sink(sink))
    }

    /// Register a bus listener; `None` until initialized
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> Option<SubscriptionId> {
        self.controller
            .as_mut()
            .map(|controller| controller.subscribe(subscriber))
    }

    pub fn controller(&self) -> Option<&ZoomFocusController<O>> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut ZoomFocusController<O>> {
        self.controller.as_mut()
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn config(&self) -> &HyperzoomConfig {
        &self.config
    }

    /// Current zoom value, or the starting value before initialization
    pub fn zoom_target(&self) -> f32 {
        self.controller
            .as_ref()
            .map(|c| c.zoom_target())
            .unwrap_or(0.5)
    }
}

impl<O: SceneOutput + Default + 'static> Simulation for Hyperzoom<O> {
    fn name(&self) -> &str {
        "hyperzoom"
    }

    fn initialize(&mut self) -> Result<()> {
        if self.controller.as_ref().is_some_and(|c| c.is_active()) {
            return Ok(());
        }
        match ZoomFocusController::new(&self.scene, &self.config, self.viewport_width, O::default())
        {
            Ok(controller) => {
                info!(entities = self.scene.len(), "Hyperzoom initialized");
                self.controller = Some(controller);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Hyperzoom failed to initialize, staying inactive");
                self.controller = None;
                Err(e)
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.shutdown();
            debug!("Hyperzoom shut down");
        }
    }

    fn tick(&mut self, delta_time: f32) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };

        self.tracker.tick(delta_time);
        let mut events = self.tracker.take_events();
        events.extend(self.mapper.poll(&self.controller_state, delta_time));
        for event in events {
            controller.publish(event);
        }
        controller.pump();
        controller.tick(delta_time);
    }

    fn fixed_tick(&mut self, _timestep: f32) {
        if let Some(controller) = self.controller.as_mut() {
            controller.fixed_tick();
        }
    }

    fn is_active(&self) -> bool {
        self.controller.as_ref().is_some_and(|c| c.is_active())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The demo scene with its rig camera taken from `config`
pub fn demo_scene(config: &HyperzoomConfig, targets: usize) -> SceneGraph {
    SceneGraph::demo(targets).with_rig_camera(
        CameraSpec::new(config.camera.projection).with_background(config.camera.background),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::error::HyperzoomError;
    use crate::input::{ButtonState, PointerId};
    use crate::scene::{EntityId, ProjectionMode};
    use crate::transition::{RecordingSink, TransitionSignal};

    const DT: f32 = 1.0 / 60.0;

    fn running(targets: usize) -> Hyperzoom {
        Hyperzoom::start(SceneGraph::demo(targets), &HyperzoomConfig::default(), 1000.0).unwrap()
    }

    fn click(hz: &mut Hyperzoom, hit: Option<EntityId>) {
        hz.handle_pointer(PointerEvent::Down {
            id: PointerId::MOUSE,
            position: Vec2::new(10.0, 10.0),
            hit,
        });
        hz.handle_pointer(PointerEvent::Up {
            id: PointerId::MOUSE,
            position: Vec2::new(10.0, 10.0),
        });
        hz.tick(DT);
    }

    #[test]
    fn test_missing_camera_stays_inactive() {
        let mut hz: Hyperzoom = Hyperzoom::new(SceneGraph::new(), &HyperzoomConfig::default(), 800.0);
        assert!(matches!(hz.initialize(), Err(HyperzoomError::MissingCamera)));
        assert!(!hz.is_active());

        // Input before initialization goes nowhere
        hz.handle_key(KeyCode::X);
        hz.tick(DT);
        assert!(hz.controller().is_none());
    }

    #[test]
    fn test_invalid_config_stays_inactive() {
        let mut config = HyperzoomConfig::default();
        config.camera.zoom_maximum = config.camera.zoom_minimum;
        let mut hz: Hyperzoom = Hyperzoom::new(SceneGraph::demo(2), &config, 800.0);
        assert!(matches!(
            hz.initialize(),
            Err(HyperzoomError::InvalidZoomRange { .. })
        ));
        assert!(!hz.is_active());
        hz.tick(DT);
        assert!(hz.controller().is_none());
    }

    #[test]
    fn test_click_on_surface_selects_owning_target() {
        let mut hz = running(3);
        let registry = hz.controller().unwrap().registry().clone();
        let house = registry.targets()[1];
        let roof = hz
            .scene()
            .nodes()
            .find(|n| n.parent == Some(house))
            .map(|n| n.id)
            .unwrap();

        click(&mut hz, Some(roof));
        assert_eq!(hz.controller().unwrap().target(), Some(house));
    }

    #[test]
    fn test_click_on_background_clears_selection() {
        let mut hz = running(3);
        let house = hz.controller().unwrap().registry().targets()[0];
        click(&mut hz, Some(house));
        assert_eq!(hz.controller().unwrap().target(), Some(house));

        let ground = hz.scene().nodes().next().map(|n| n.id).unwrap();
        click(&mut hz, Some(ground));
        assert_eq!(hz.controller().unwrap().target(), None);
    }

    #[test]
    fn test_arrow_keys_walk_targets() {
        let mut hz = running(2);
        let targets = hz.controller().unwrap().registry().targets().to_vec();

        let mut state = ControllerState::new();
        state.arrows.right = ButtonState::from_pressed(true);
        hz.set_controller_state(state);
        hz.tick(DT);
        assert_eq!(hz.controller().unwrap().target(), Some(targets[0]));

        state.advance_frame();
        hz.set_controller_state(state);
        hz.tick(DT);
        assert_eq!(hz.controller().unwrap().target(), Some(targets[0]));
    }

    #[test]
    fn test_scroll_release_settles_into_transition() {
        let mut hz = running(1);
        let sink = hz.attach_transition_sink(RecordingSink::default()).unwrap();
        let target = hz.controller().unwrap().target();
        assert!(target.is_some());

        // Scroll in hard, then let the idle timeout finish the gesture
        for _ in 0..10 {
            hz.handle_pointer(PointerEvent::Scroll {
                delta: Vec2::new(0.0, -10.0),
            });
            hz.tick(DT);
        }
        for _ in 0..200 {
            hz.tick(DT);
            hz.fixed_tick(0.02);
        }

        let signals = hz
            .controller_mut()
            .unwrap()
            .transition_sink_mut::<RecordingSink>(sink)
            .map(|s| s.signals.clone())
            .unwrap();
        assert_eq!(
            signals,
            vec![
                TransitionSignal::ZoomInStarted(target),
                TransitionSignal::ZoomInFinished(target),
            ]
        );
        assert_eq!(hz.zoom_target(), 0.0);
    }

    #[test]
    fn test_x_key_toggles_xray() {
        let mut hz = running(2);
        assert!(!hz.controller().unwrap().xray_on());
        hz.handle_key(KeyCode::X);
        assert!(hz.controller().unwrap().xray_on());
        hz.handle_key(KeyCode::X);
        assert!(!hz.controller().unwrap().xray_on());
    }

    #[test]
    fn test_demo_scene_uses_configured_camera() {
        let mut config = HyperzoomConfig::default();
        config.camera.projection = ProjectionMode::Perspective;
        let hz: Hyperzoom = Hyperzoom::start(demo_scene(&config, 2), &config, 800.0).unwrap();
        let controller = hz.controller().unwrap();
        assert_eq!(controller.camera().mode, ProjectionMode::Perspective);
        assert_eq!(
            controller.output().projection.map(|(mode, _)| mode),
            Some(ProjectionMode::Perspective)
        );
    }

    #[test]
    fn test_reload_unlocks_after_transition() {
        let mut hz = running(1);
        hz.attach_transition_sink(RecordingSink::default()).unwrap();
        hz.controller_mut().unwrap().snap_to(0.0);
        assert!(hz.controller().unwrap().is_snapping());

        hz.reload().unwrap();
        let controller = hz.controller().unwrap();
        assert!(!controller.is_snapping());
        assert!(!controller.has_transition_sink());
        assert_eq!(controller.zoom_target(), 0.5);
    }

    #[test]
    fn test_shutdown_deactivates() {
        let mut hz = running(2);
        hz.shutdown();
        assert!(!hz.is_active());
        assert_eq!(
            hz.controller().unwrap().camera().mode,
            ProjectionMode::Orthographic
        );
    }
}
