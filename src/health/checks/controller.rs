//! Zoom controller health check

use crate::config::HyperzoomConfig;
use crate::health::check::{CheckResult, Probes, SystemCheck};
use crate::scene::{FrameOutput, SceneGraph};
use crate::transition::{RecordingSink, TransitionSignal};
use crate::zoom::ZoomFocusController;

/// Drives a controller over a demo scene: bounds, selection and a terminal snap
pub struct ControllerCheck {
    config: HyperzoomConfig,
}

impl ControllerCheck {
    pub fn new() -> Self {
        Self::with_config(HyperzoomConfig::default())
    }

    pub fn with_config(config: HyperzoomConfig) -> Self {
        Self { config }
    }
}

impl Default for ControllerCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ControllerCheck {
    fn name(&self) -> &'static str {
        "Zoom Controller"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Initializes the controller, checks zoom bounds and the zoom-in transition")
    }

    fn check(&self) -> CheckResult {
        let mut probes = Probes::new();
        let scene = SceneGraph::demo(2);

        let mut controller =
            match ZoomFocusController::new(&scene, &self.config, 1280.0, FrameOutput::new()) {
                Ok(controller) => controller,
                Err(e) => {
                    probes.fail(format!("Initialization: {e}"));
                    return probes.finish("", "", "Controller failed to initialize");
                }
            };
        probes.ok(format!(
            "Initialized at zoom {:.2}",
            controller.zoom_target()
        ));
        let sink = controller.attach_transition_sink(RecordingSink::default());

        let floor = self.config.zoom.gesture_floor;
        let ceiling = self.config.zoom.gesture_ceiling;
        for _ in 0..50 {
            controller.zoom(-1.0);
        }
        let low = controller.zoom_target();
        for _ in 0..50 {
            controller.zoom(1.0);
        }
        let high = controller.zoom_target();
        probes.expect(
            low >= floor && high <= ceiling,
            format!("Gestures stay within [{floor}, {ceiling}] ({low:.3}..{high:.3})"),
            format!("Gestures escaped [{floor}, {ceiling}] ({low:.3}..{high:.3})"),
        );

        controller.select_next();
        let target = controller.target();
        probes.expect(
            target.is_some(),
            "SelectNext picked a target",
            "SelectNext left the selection empty",
        );

        controller.snap_to(0.0);
        for _ in 0..500 {
            if controller.tracks().running().next().is_none() {
                break;
            }
            controller.fixed_tick();
            controller.tick(1.0 / 60.0);
        }
        let signals = controller
            .transition_sink_mut::<RecordingSink>(sink)
            .map(|s| s.signals.clone())
            .unwrap_or_default();
        probes.expect(
            signals
                == [
                    TransitionSignal::ZoomInStarted(target),
                    TransitionSignal::ZoomInFinished(target),
                ],
            "Snap to 0 emitted ZoomInStarted then ZoomInFinished",
            format!("Unexpected transition signals: {signals:?}"),
        );
        probes.expect(
            controller.is_snapping(),
            "Controller locked after the terminal snap",
            "Controller accepted input after the terminal snap",
        );

        probes.finish(
            "Zoom, selection and transitions operational",
            "Controller operational with warnings",
            "Controller misbehaved",
        )
    }
}
