//! Keyboard, d-pad, shoulder and analog stick mapping
//!
//! Discrete axis actions use a two-threshold latch: an axis fires once when it
//! passes the trigger threshold and re-arms only after falling back under the
//! release threshold.

use glam::Vec2;
use tracing::trace;

use crate::bus::HyperzoomEvent;
use crate::config::AlternateInputConfig;

use super::state::ControllerState;

/// Per-direction latches
#[derive(Debug, Clone, Copy, Default)]
struct Latches {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

/// Maps polled controller state to bus events
pub struct AlternateInputMapper {
    config: AlternateInputConfig,
    dpad: Latches,
    shoulders: Latches,
    stick: Latches,
    /// Seconds the left stick must still rest before FinishZoom
    stick_countdown: f32,
}

impl AlternateInputMapper {
    pub fn new(config: &AlternateInputConfig) -> Self {
        Self {
            config: config.clone(),
            dpad: Latches::default(),
            shoulders: Latches::default(),
            stick: Latches::default(),
            stick_countdown: 0.0,
        }
    }

    /// Poll once per frame
    pub fn poll(&mut self, state: &ControllerState, dt: f32) -> Vec<HyperzoomEvent> {
        let mut events = Vec::new();
        Self::keyboard(state, &mut events);
        self.dpad(state, &mut events);
        self.shoulders(state, &mut events);
        self.zoom(state, dt, &mut events);
        self.rotate(state, &mut events);

        if !events.is_empty() {
            trace!(count = events.len(), "Alternate input");
        }
        events
    }

    fn keyboard(state: &ControllerState, events: &mut Vec<HyperzoomEvent>) {
        let arrows = &state.arrows;
        if arrows.left.is_just_pressed() {
            events.push(HyperzoomEvent::SelectPrevious);
        }
        if arrows.right.is_just_pressed() {
            events.push(HyperzoomEvent::SelectNext);
        }
        if arrows.up.is_just_pressed() {
            events.push(HyperzoomEvent::ZoomIn);
        }
        if arrows.down.is_just_pressed() {
            events.push(HyperzoomEvent::ZoomOut);
        }
    }

    fn dpad(&mut self, state: &ControllerState, events: &mut Vec<HyperzoomEvent>) {
        let trigger = self.config.trigger_threshold;
        let release = self.config.release_threshold;
        let dpad = state.dpad;
        let stick = state.left_stick;

        if dpad.y < -trigger {
            if !self.dpad.up {
                self.dpad.up = true;
                events.push(HyperzoomEvent::ZoomIn);
            }
        } else if dpad.y > -release {
            self.dpad.up = false;
        }

        if dpad.y > trigger {
            if !self.dpad.down {
                self.dpad.down = true;
                events.push(HyperzoomEvent::ZoomOut);
            }
        } else if dpad.y < release {
            self.dpad.down = false;
        }

        if stick.x < -trigger || dpad.x < -trigger {
            if !self.dpad.left {
                self.dpad.left = true;
                events.push(HyperzoomEvent::SelectPrevious);
            }
        } else if stick.x > -release && dpad.x > -release {
            self.dpad.left = false;
        }

        if stick.x > trigger || dpad.x > trigger {
            if !self.dpad.right {
                self.dpad.right = true;
                events.push(HyperzoomEvent::SelectNext);
            }
        } else if stick.x < release && dpad.x < release {
            self.dpad.right = false;
        }
    }

    fn shoulders(&mut self, state: &ControllerState, events: &mut Vec<HyperzoomEvent>) {
        if state.shoulder_left && !self.shoulders.left {
            events.push(HyperzoomEvent::SelectPrevious);
        }
        self.shoulders.left = state.shoulder_left;

        if state.shoulder_right && !self.shoulders.right {
            events.push(HyperzoomEvent::SelectNext);
        }
        self.shoulders.right = state.shoulder_right;
    }

    fn zoom(&mut self, state: &ControllerState, dt: f32, events: &mut Vec<HyperzoomEvent>) {
        let y = state.left_stick.y;
        let dead_zone = self.config.stick_dead_zone;

        if y.abs() > dead_zone {
            self.stick_countdown = self.config.zoom_rest_delay;
            events.push(HyperzoomEvent::Zoom(y * self.config.zoom_sensitivity));
            if y < 0.0 {
                self.stick.up = true;
            } else {
                self.stick.down = true;
            }
        } else if y.abs() < dead_zone {
            self.stick_countdown -= dt;
            if self.stick_countdown <= 0.0 && (self.stick.up || self.stick.down) {
                self.stick.up = false;
                self.stick.down = false;
                events.push(HyperzoomEvent::FinishZoom);
            }
        }
    }

    fn rotate(&self, state: &ControllerState, events: &mut Vec<HyperzoomEvent>) {
        let stick = state.right_stick;
        let dead_zone = self.config.stick_dead_zone;
        let mut delta = Vec2::ZERO;

        if stick.x.abs() > dead_zone {
            delta.x = stick.x * self.config.rotate_sensitivity_horizontal;
        }
        if stick.y.abs() > dead_zone {
            delta.y = stick.y * self.config.rotate_sensitivity_vertical;
        }
        // One event per poll carrying both axes
        if delta != Vec2::ZERO {
            events.push(HyperzoomEvent::Rotate {
                entity: None,
                delta,
            });
        }
    }
}
