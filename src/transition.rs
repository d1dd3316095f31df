//! Scene-transition sink
//!
//! The sink performs the actual scene load or unload. It only sees the four
//! lifecycle signals; everything else on the bus is ignored.

use tracing::info;

use crate::bus::{HyperzoomEvent, Subscriber};
use crate::scene::EntityId;

/// Receives begin/finish zoom-in and zoom-out signals
pub trait SceneTransitionSink {
    /// A terminal snap into `target` began; `None` only on a logic error upstream
    fn zoom_in_started(&mut self, target: Option<EntityId>);

    /// The snap into `target` reached the zoomed-in end
    fn zoom_in_finished(&mut self, target: Option<EntityId>);

    /// A terminal snap out of the scene began
    fn zoom_out_started(&mut self);

    /// The snap out of the scene reached the zoomed-out end
    fn zoom_out_finished(&mut self);
}

/// Priority transition sinks subscribe with
pub const TRANSITION_PRIORITY: u32 = 100;

/// Adapts a [`SceneTransitionSink`] to the bus
pub struct TransitionSubscriber<S> {
    sink: S,
}

impl<S: SceneTransitionSink> TransitionSubscriber<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: SceneTransitionSink + 'static> Subscriber for TransitionSubscriber<S> {
    fn name(&self) -> &str {
        "scene_transition"
    }

    fn priority(&self) -> u32 {
        TRANSITION_PRIORITY
    }

    fn handle_event(&mut self, event: &HyperzoomEvent) {
        match *event {
            HyperzoomEvent::ZoomInStarted(target) => {
                info!(?target, "Zoom-in transition started");
                self.sink.zoom_in_started(target);
            }
            HyperzoomEvent::ZoomInFinished(target) => {
                info!(?target, "Zoom-in transition finished");
                self.sink.zoom_in_finished(target);
            }
            HyperzoomEvent::ZoomOutStarted => {
                info!("Zoom-out transition started");
                self.sink.zoom_out_started();
            }
            HyperzoomEvent::ZoomOutFinished => {
                info!("Zoom-out transition finished");
                self.sink.zoom_out_finished();
            }
            _ => {}
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// A transition signal as recorded by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSignal {
    ZoomInStarted(Option<EntityId>),
    ZoomInFinished(Option<EntityId>),
    ZoomOutStarted,
    ZoomOutFinished,
}

/// Sink that records every signal it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub signals: Vec<TransitionSignal>,
}

impl SceneTransitionSink for RecordingSink {
    fn zoom_in_started(&mut self, target: Option<EntityId>) {
        self.signals.push(TransitionSignal::ZoomInStarted(target));
    }

    fn zoom_in_finished(&mut self, target: Option<EntityId>) {
        self.signals.push(TransitionSignal::ZoomInFinished(target));
    }

    fn zoom_out_started(&mut self) {
        self.signals.push(TransitionSignal::ZoomOutStarted);
    }

    fn zoom_out_finished(&mut self) {
        self.signals.push(TransitionSignal::ZoomOutFinished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transition_signals_reach_the_sink() {
        let mut subscriber = TransitionSubscriber::new(RecordingSink::default());
        let target = Some(EntityId(3));

        subscriber.handle_event(&HyperzoomEvent::Zoom(0.1));
        subscriber.handle_event(&HyperzoomEvent::ZoomInStarted(target));
        subscriber.handle_event(&HyperzoomEvent::Clicked(None));
        subscriber.handle_event(&HyperzoomEvent::ZoomInFinished(target));
        subscriber.handle_event(&HyperzoomEvent::ZoomOutStarted);
        subscriber.handle_event(&HyperzoomEvent::ZoomOutFinished);

        assert_eq!(
            subscriber.into_inner().signals,
            vec![
                TransitionSignal::ZoomInStarted(target),
                TransitionSignal::ZoomInFinished(target),
                TransitionSignal::ZoomOutStarted,
                TransitionSignal::ZoomOutFinished,
            ]
        );
    }
}
