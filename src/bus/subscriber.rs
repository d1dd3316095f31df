//! Subscriber trait for bus listeners

use super::event::HyperzoomEvent;

/// Trait for anything listening on the event bus
///
/// Subscribers are called in priority order (highest first). Every
/// subscriber sees every event; nothing consumes an event.
pub trait Subscriber {
    /// Name of this subscriber for debugging
    fn name(&self) -> &str;

    /// Priority for delivery order (higher = earlier)
    ///
    /// Priority ranges:
    /// - 200+: diagnostics that must observe events before anything reacts
    /// - 100-199: scene-transition sinks
    /// - 0-99: everything else
    fn priority(&self) -> u32 {
        0
    }

    /// Handle one event
    fn handle_event(&mut self, event: &HyperzoomEvent);

    /// Follow-up events to publish after the current one
    ///
    /// Called after every delivery; queued events are dispatched in the same
    /// pump, behind whatever was already queued.
    fn take_events(&mut self) -> Vec<HyperzoomEvent> {
        Vec::new()
    }

    /// Downcast to concrete type for accessing subscriber-specific methods
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
