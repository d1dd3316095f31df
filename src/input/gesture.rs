//! Pointer gesture classification
//!
//! Turns raw contacts into drag, pinch, scroll, click and hold gestures.
//! Flags set during a contact session stay set until the last contact
//! lifts, so the release that ends a pinch never reads as a click.

use std::collections::HashMap;

use glam::Vec2;
use tracing::{debug, trace};

use crate::bus::HyperzoomEvent;
use crate::config::GestureConfig;
use crate::scene::EntityId;

use super::events::{PointerEvent, PointerId};

/// One live contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    /// Press position
    pub start: Vec2,
    pub position: Vec2,
    pub previous: Vec2,
    /// Last movement delta
    pub delta: Vec2,
    /// Tracker clock at press, in seconds
    pub start_time: f64,
    /// Focus owner of the entity pressed on
    pub hit: Option<EntityId>,
}

/// Flags describing the current contact session
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pub dragging: bool,
    pub zooming: bool,
    pub holding: bool,
    pub multitouching: bool,
    pointers: HashMap<PointerId, Pointer>,
}

impl GestureState {
    fn reset_flags(&mut self) {
        self.dragging = false;
        self.zooming = false;
        self.holding = false;
        self.multitouching = false;
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.get(&id)
    }
}

/// Classifies pointer input into bus events
pub struct GestureTracker {
    config: GestureConfig,
    state: GestureState,
    /// Seconds since creation
    time: f64,
    /// Seconds left before an idle FinishZoom, while armed
    idle_remaining: Option<f32>,
    events: Vec<HyperzoomEvent>,
}

impl GestureTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            config: config.clone(),
            state: GestureState::default(),
            time: 0.0,
            idle_remaining: None,
            events: Vec::new(),
        }
    }

    /// Feed one raw pointer event
    pub fn handle(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { id, position, hit } => self.pointer_down(id, position, hit),
            PointerEvent::Move {
                id,
                position,
                delta,
            } => self.pointer_move(id, position, delta),
            PointerEvent::Up { id, .. } => self.pointer_up(id),
            PointerEvent::Scroll { delta } => self.scroll(delta),
        }
    }

    pub fn pointer_down(&mut self, id: PointerId, position: Vec2, hit: Option<EntityId>) {
        let previous = self.state.pointer_count();
        if previous == 0 {
            self.state.reset_flags();
        }

        self.state.pointers.entry(id).or_insert(Pointer {
            id,
            start: position,
            position,
            previous: position,
            delta: Vec2::ZERO,
            start_time: self.time,
            hit,
        });

        let count = self.state.pointer_count();
        if count > 1 {
            self.state.multitouching = true;
        }
        trace!(?id, count, "Pointer down");
        self.events
            .push(HyperzoomEvent::TouchCountChanged { count, previous });
    }

    pub fn pointer_move(&mut self, id: PointerId, position: Vec2, delta: Vec2) {
        let count = self.state.pointer_count();
        let Some(pointer) = self.state.pointers.get_mut(&id) else {
            return;
        };
        pointer.previous = pointer.position;
        pointer.delta = position - pointer.previous;
        pointer.position = position;
        let moved = *pointer;

        if !self.state.dragging
            && moved.start.distance(position) > self.config.drag_activation_distance
        {
            self.state.dragging = true;
            debug!(count, "Drag started");
            self.events.push(HyperzoomEvent::Dragged { count });
        }
        if !self.state.dragging {
            return;
        }

        if count < 2 {
            self.events.push(HyperzoomEvent::Rotate {
                entity: moved.hit,
                delta,
            });
            self.mark_interaction();
        } else if count == 2 {
            self.pinch(&moved);
            self.mark_interaction();
        }
    }

    /// Zoom by the change in distance between the two contacts
    fn pinch(&mut self, moved: &Pointer) {
        let Some(other) = self.state.pointers.values().find(|p| p.id != moved.id) else {
            return;
        };
        let before = moved.previous.distance(other.position);
        let after = moved.position.distance(other.position);
        let delta = (before - after) * self.config.pinch_sensitivity;

        trace!(before, after, delta, "Pinch");
        self.events.push(HyperzoomEvent::Zoom(delta));
        self.state.zooming = true;
    }

    /// Scroll wheel, in lines; positive `y` zooms out
    pub fn scroll(&mut self, delta: Vec2) {
        let zoom = delta.y * self.config.scroll_sensitivity;
        if zoom.abs() > f32::EPSILON {
            self.events.push(HyperzoomEvent::Zoom(zoom));
            self.mark_interaction();
            self.state.zooming = true;
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        let previous = self.state.pointer_count();
        let released = self.state.pointers.remove(&id);
        if let Some(pointer) = released
            && self.time - pointer.start_time >= f64::from(self.config.hold_delay)
        {
            self.state.holding = true;
        }

        let count = self.state.pointer_count();
        let state = &self.state;
        if !state.dragging && !state.zooming && !state.multitouching && count == 0 {
            let hit = released.and_then(|p| p.hit);
            // A long press on the background does not clear the selection
            if hit.is_some() || !state.holding {
                debug!(?hit, "Clicked");
                self.events.push(HyperzoomEvent::Clicked(hit));
            }
        }
        if self.state.zooming && count == 0 {
            self.events.push(HyperzoomEvent::FinishZoom);
        }
        if count == 0 {
            self.state.reset_flags();
        }

        trace!(?id, count, "Pointer up");
        self.events
            .push(HyperzoomEvent::TouchCountChanged { count, previous });
    }

    /// Restarts the idle countdown
    fn mark_interaction(&mut self) {
        self.idle_remaining = Some(self.config.idle_timeout);
    }

    /// Advance the tracker clock; fires FinishZoom once the idle countdown runs out
    pub fn tick(&mut self, dt: f32) {
        self.time += f64::from(dt);
        if let Some(remaining) = self.idle_remaining {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.idle_remaining = None;
                trace!("Interaction idle");
                self.events.push(HyperzoomEvent::FinishZoom);
            } else {
                self.idle_remaining = Some(remaining);
            }
        }
    }

    /// Events produced since the last call
    pub fn take_events(&mut self) -> Vec<HyperzoomEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether an idle FinishZoom is pending
    pub fn is_idle_armed(&self) -> bool {
        self.idle_remaining.is_some()
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}
