//! Event bus
//!
//! A synchronous, in-process publish/subscribe registry with typed messages.
//!
//! # Architecture
//!
//! ```text
//! GestureTracker ──┐
//!                  ├──▶ publish ──▶ queue ──▶ ZoomFocusController (applies)
//! AlternateInput ──┘                   │
//!                                      └──▶ Subscribers (by priority)
//!                                             │
//!                                             └──▶ follow-up events ──▶ queue
//! ```
//!
//! The bus is owned by the controller, which applies each event to itself
//! before fanning it out; see `ZoomFocusController::pump`.

mod event;
mod subscriber;

use std::collections::VecDeque;

use tracing::trace;

pub use event::HyperzoomEvent;
pub use subscriber::Subscriber;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// How many delivered events are kept for debugging
const DEBUG_HISTORY: usize = 32;

/// Publish/subscribe registry
pub struct EventBus {
    /// Registered subscribers, sorted by priority (highest first)
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    /// Events waiting for delivery
    queue: VecDeque<HyperzoomEvent>,
    next_id: u64,
    /// Debug: most recently delivered events
    last_events: VecDeque<String>,
}

impl EventBus {
    /// Creates an empty bus
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            queue: VecDeque::new(),
            next_id: 0,
            last_events: VecDeque::new(),
        }
    }

    /// Register a subscriber
    ///
    /// Subscribers are kept sorted by priority (highest first); equal
    /// priorities keep registration order.
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        trace!(name = subscriber.name(), ?id, "Subscribed");
        self.subscribers.push((id, subscriber));
        self.subscribers
            .sort_by_key(|(_, s)| std::cmp::Reverse(s.priority()));
        id
    }

    /// Remove a subscriber, handing it back to the caller
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Option<Box<dyn Subscriber>> {
        let index = self.subscribers.iter().position(|(sid, _)| *sid == id)?;
        let (_, subscriber) = self.subscribers.remove(index);
        trace!(name = subscriber.name(), ?id, "Unsubscribed");
        Some(subscriber)
    }

    /// Remove every subscriber and drop queued events
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.queue.clear();
    }

    /// Queue an event for delivery
    pub fn publish(&mut self, event: HyperzoomEvent) {
        self.queue.push_back(event);
    }

    /// Next queued event, if any
    pub fn pop(&mut self) -> Option<HyperzoomEvent> {
        self.queue.pop_front()
    }

    /// Fan one event out to every subscriber and queue their follow-ups
    pub fn deliver(&mut self, event: &HyperzoomEvent) {
        if self.last_events.len() == DEBUG_HISTORY {
            self.last_events.pop_front();
        }
        self.last_events.push_back(format!("{event:?}"));

        for (_, subscriber) in &mut self.subscribers {
            subscriber.handle_event(event);
        }
        for (_, subscriber) in &mut self.subscribers {
            self.queue.extend(subscriber.take_events());
        }
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Get number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Get a typed mutable reference to a subscriber
    pub fn get_subscriber_typed_mut<T: 'static>(&mut self, id: SubscriptionId) -> Option<&mut T> {
        self.subscribers
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .and_then(|(_, s)| s.as_any_mut().downcast_mut::<T>())
    }

    /// Get the most recently delivered events (for debugging)
    pub fn debug_last_events(&self) -> impl Iterator<Item = &str> {
        self.last_events.iter().map(String::as_str)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
