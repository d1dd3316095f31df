//! Pointer events and key codes

use glam::Vec2;

use crate::scene::EntityId;

/// Stable identifier of one contact (mouse or finger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The mouse is always contact 0; touches are numbered from 1
    pub const MOUSE: PointerId = PointerId(0);
}

/// Raw pointer input in logical screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Contact pressed
    Down {
        id: PointerId,
        position: Vec2,
        /// Entity under the contact, if the host resolved one
        hit: Option<EntityId>,
    },

    /// Contact moved by `delta` to `position`
    Move {
        id: PointerId,
        position: Vec2,
        delta: Vec2,
    },

    /// Contact released
    Up { id: PointerId, position: Vec2 },

    /// Scroll wheel, in lines
    Scroll { delta: Vec2 },
}

impl PointerEvent {
    /// Builder: attach a hit entity to a press
    pub fn with_hit(self, entity: Option<EntityId>) -> Self {
        match self {
            Self::Down { id, position, .. } => Self::Down {
                id,
                position,
                hit: entity,
            },
            other => other,
        }
    }
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    /// Left shoulder
    Q,
    /// Right shoulder
    E,
    /// Toggle x-ray
    X,
    /// Reset perspective
    R,
    Escape,
    Other,
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,
            WK::KeyQ | WK::PageUp => Self::Q,
            WK::KeyE | WK::PageDown => Self::E,
            WK::KeyX => Self::X,
            WK::KeyR => Self::R,
            WK::Escape => Self::Escape,
            _ => Self::Other,
        }
    }
}
