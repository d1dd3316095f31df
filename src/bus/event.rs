//! Messages carried on the event bus

use glam::Vec2;
use palette::Srgba;

use crate::scene::EntityId;

/// Every message exchanged between input producers, the controller and the
/// scene-transition sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HyperzoomEvent {
    /// Orbit the rig; `entity` is the dragged entity, if any
    Rotate {
        entity: Option<EntityId>,
        delta: Vec2,
    },

    /// Continuous zoom change (positive zooms out)
    Zoom(f32),

    /// A zoom gesture ended or went idle
    FinishZoom,

    /// Number of contacts changed
    TouchCountChanged { count: usize, previous: usize },

    /// A contact crossed the drag activation distance
    Dragged { count: usize },

    /// A press/release without drag, pinch or extra contacts
    Clicked(Option<EntityId>),

    /// Discrete step toward the zoomed-in end
    ZoomIn,

    /// Discrete step toward the zoomed-out end
    ZoomOut,

    /// Walk the focus list forward
    SelectNext,

    /// Walk the focus list backward
    SelectPrevious,

    /// The scene camera's clear colour
    BackgroundColorChanged(Srgba),

    /// Terminal snap into a target began
    ZoomInStarted(Option<EntityId>),

    /// Terminal snap into a target completed
    ZoomInFinished(Option<EntityId>),

    /// Terminal snap out of the scene began
    ZoomOutStarted,

    /// Terminal snap out of the scene completed
    ZoomOutFinished,
}

impl HyperzoomEvent {
    /// True for the four scene-transition lifecycle signals
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::ZoomInStarted(_)
                | Self::ZoomInFinished(_)
                | Self::ZoomOutStarted
                | Self::ZoomOutFinished
        )
    }
}
