//! Raw controller and keyboard state

use glam::Vec2;

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }

    /// State after a press or release
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Self::JustPressed
        } else {
            Self::JustReleased
        }
    }
}

/// Arrow keys
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowKeys {
    pub left: ButtonState,
    pub right: ButtonState,
    pub up: ButtonState,
    pub down: ButtonState,
}

/// Gamepad-style state, polled once per tick
///
/// Vertical axes follow the zoom direction: negative values push toward the
/// zoomed-in end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerState {
    /// Horizontal selects, vertical zooms continuously
    pub left_stick: Vec2,
    /// Orbits the rig
    pub right_stick: Vec2,
    /// Horizontal selects, vertical steps the zoom
    pub dpad: Vec2,
    pub shoulder_left: bool,
    pub shoulder_right: bool,
    pub arrows: ArrowKeys,
}

impl ControllerState {
    /// Creates a new resting state
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        self.arrows.left = self.arrows.left.advance();
        self.arrows.right = self.arrows.right.advance();
        self.arrows.up = self.arrows.up.advance();
        self.arrows.down = self.arrows.down.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_settle_after_advance() {
        let mut state = ControllerState::new();
        state.arrows.up = ButtonState::from_pressed(true);
        assert!(state.arrows.up.is_just_pressed());

        state.advance_frame();
        assert_eq!(state.arrows.up, ButtonState::Pressed);
        assert!(state.arrows.up.is_down());

        state.arrows.up = ButtonState::from_pressed(false);
        assert!(state.arrows.up.is_just_released());
        state.advance_frame();
        assert_eq!(state.arrows.up, ButtonState::Released);
    }
}
