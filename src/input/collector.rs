//! Raw input collection from winit events

use std::collections::HashMap;

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::{KeyCode, PointerEvent, PointerId};
use super::state::{ButtonState, ControllerState};

/// Pixels per scroll line for trackpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 20.0;

/// Collects raw input from winit events
///
/// Mouse and touch contacts become [`PointerEvent`]s queued in arrival order;
/// keyboard state is folded into a [`ControllerState`] polled once per tick.
pub struct InputCollector {
    controller: ControllerState,
    pointer_events: Vec<PointerEvent>,
    key_presses: Vec<KeyCode>,
    cursor: Vec2,
    mouse_down: bool,
    touches: HashMap<u64, Vec2>,
    scale_factor: f32,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            controller: ControllerState::new(),
            pointer_events: Vec::new(),
            key_presses: Vec::new(),
            cursor: Vec2::ZERO,
            mouse_down: false,
            touches: HashMap::new(),
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    fn logical(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(x as f32, y as f32) / self.scale_factor
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = self.logical(position.x, position.y);
                if self.mouse_down {
                    self.pointer_events.push(PointerEvent::Move {
                        id: PointerId::MOUSE,
                        position,
                        delta: position - self.cursor,
                    });
                }
                self.cursor = position;
            }

            WindowEvent::MouseInput {
                state,
                button: winit::event::MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed if !self.mouse_down => {
                    self.mouse_down = true;
                    self.pointer_events.push(PointerEvent::Down {
                        id: PointerId::MOUSE,
                        position: self.cursor,
                        hit: None,
                    });
                }
                ElementState::Released if self.mouse_down => {
                    self.mouse_down = false;
                    self.pointer_events.push(PointerEvent::Up {
                        id: PointerId::MOUSE,
                        position: self.cursor,
                    });
                }
                _ => {}
            },

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
                    }
                };
                self.pointer_events.push(PointerEvent::Scroll { delta: lines });
            }

            WindowEvent::Touch(touch) => {
                let id = PointerId(touch.id + 1);
                let position = self.logical(touch.location.x, touch.location.y);
                match touch.phase {
                    TouchPhase::Started => {
                        self.touches.insert(touch.id, position);
                        self.pointer_events.push(PointerEvent::Down {
                            id,
                            position,
                            hit: None,
                        });
                    }
                    TouchPhase::Moved => {
                        let last = self.touches.insert(touch.id, position).unwrap_or(position);
                        self.pointer_events.push(PointerEvent::Move {
                            id,
                            position,
                            delta: position - last,
                        });
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        self.touches.remove(&touch.id);
                        self.pointer_events.push(PointerEvent::Up { id, position });
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if pressed && event.repeat {
                        return;
                    }
                    self.handle_key(KeyCode::from(code), pressed);
                }
            }

            WindowEvent::Focused(false) => self.release_all(),

            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let arrows = &mut self.controller.arrows;
        match key {
            KeyCode::Left => arrows.left = ButtonState::from_pressed(pressed),
            KeyCode::Right => arrows.right = ButtonState::from_pressed(pressed),
            KeyCode::Up => arrows.up = ButtonState::from_pressed(pressed),
            KeyCode::Down => arrows.down = ButtonState::from_pressed(pressed),
            KeyCode::Q => self.controller.shoulder_left = pressed,
            KeyCode::E => self.controller.shoulder_right = pressed,
            KeyCode::X | KeyCode::R | KeyCode::Escape if pressed => self.key_presses.push(key),
            _ => {}
        }
    }

    /// Lifts every contact, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        if self.mouse_down {
            self.mouse_down = false;
            self.pointer_events.push(PointerEvent::Up {
                id: PointerId::MOUSE,
                position: self.cursor,
            });
        }
        for (touch, position) in self.touches.drain() {
            self.pointer_events.push(PointerEvent::Up {
                id: PointerId(touch + 1),
                position,
            });
        }
        self.controller = ControllerState::new();
    }

    /// Pointer events since the last call, in arrival order
    pub fn drain_pointer_events(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.pointer_events)
    }

    /// Command keys pressed since the last call
    pub fn drain_key_presses(&mut self) -> Vec<KeyCode> {
        std::mem::take(&mut self.key_presses)
    }

    /// Get current controller state
    pub fn controller_state(&self) -> &ControllerState {
        &self.controller
    }

    /// Borrow controller state mutably (gamepad backends write axes here)
    pub fn controller_state_mut(&mut self) -> &mut ControllerState {
        &mut self.controller
    }

    /// Last known cursor position in logical pixels
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.controller.advance_frame();
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state_edges() {
        let mut collector = InputCollector::new();
        collector.handle_key(KeyCode::Right, true);
        collector.handle_key(KeyCode::E, true);
        collector.handle_key(KeyCode::X, true);

        let state = collector.controller_state();
        assert!(state.arrows.right.is_just_pressed());
        assert!(state.shoulder_right);
        assert_eq!(collector.drain_key_presses(), vec![KeyCode::X]);

        collector.advance_frame();
        assert_eq!(
            collector.controller_state().arrows.right,
            ButtonState::Pressed
        );
    }

    #[test]
    fn test_release_all_lifts_mouse() {
        let mut collector = InputCollector::new();
        collector.mouse_down = true;
        collector.release_all();
        assert_eq!(
            collector.drain_pointer_events(),
            vec![PointerEvent::Up {
                id: PointerId::MOUSE,
                position: Vec2::ZERO,
            }]
        );
        assert!(collector.drain_pointer_events().is_empty());
    }
}
