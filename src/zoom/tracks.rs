//! Animation tracks
//!
//! Each track kind owns one slot. Starting a track replaces whatever occupies
//! its slot, cancelling is immediate, and a slot's generation counter tells a
//! stepping track whether it was replaced or cancelled while it ran.

use enum_map::{Enum, EnumMap};
use glam::Quat;

/// Identity of a single-occupancy slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum TrackKind {
    ZoomToward,
    SnapTo,
    RotateReset,
    Xray,
    FadeIn,
}

/// Which clock resumes a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Once per rendered frame
    Frame,
    /// Once per fixed simulation step
    Fixed,
}

/// A running animation and its private state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    /// Blend the zoom value toward `goal`, then clean up
    ZoomToward { goal: f32 },
    /// Blend the zoom value to `goal`; 0 and 1 are terminal transitions
    SnapTo { goal: f32 },
    /// Blend the rig orientation back to `goal`
    RotateReset { goal: Quat },
    /// Wait out `delay` seconds, then step the x-ray opacity
    Xray { delay: f32 },
    /// Raise the scene fade-in level to 1
    FadeIn { level: f32 },
}

impl Track {
    pub fn kind(&self) -> TrackKind {
        match self {
            Track::ZoomToward { .. } => TrackKind::ZoomToward,
            Track::SnapTo { .. } => TrackKind::SnapTo,
            Track::RotateReset { .. } => TrackKind::RotateReset,
            Track::Xray { .. } => TrackKind::Xray,
            Track::FadeIn { .. } => TrackKind::FadeIn,
        }
    }

    /// The clock that resumes this track in its current phase
    pub fn cadence(&self) -> Cadence {
        match self {
            Track::SnapTo { .. } => Cadence::Fixed,
            Track::Xray { delay } if *delay <= 0.0 => Cadence::Fixed,
            _ => Cadence::Frame,
        }
    }
}

/// Generation stamp handed out by [`TrackSlots::take`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackToken {
    kind: TrackKind,
    generation: u64,
}

/// One slot per track kind
#[derive(Debug, Default)]
pub struct TrackSlots {
    slots: EnumMap<TrackKind, Option<Track>>,
    generations: EnumMap<TrackKind, u64>,
}

impl TrackSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `track` in its slot, replacing any previous occupant
    pub fn start(&mut self, track: Track) {
        let kind = track.kind();
        self.generations[kind] += 1;
        self.slots[kind] = Some(track);
    }

    /// Stops whatever occupies `kind`'s slot
    pub fn cancel(&mut self, kind: TrackKind) {
        self.generations[kind] += 1;
        self.slots[kind] = None;
    }

    /// Stops every track
    pub fn cancel_all(&mut self) {
        for (_, generation) in self.generations.iter_mut() {
            *generation += 1;
        }
        self.slots = EnumMap::default();
    }

    /// Removes a track for stepping
    pub fn take(&mut self, kind: TrackKind) -> Option<(Track, TrackToken)> {
        let track = self.slots[kind].take()?;
        Some((
            track,
            TrackToken {
                kind,
                generation: self.generations[kind],
            },
        ))
    }

    /// Removes a track for stepping if it runs on `cadence`
    pub fn take_on(&mut self, kind: TrackKind, cadence: Cadence) -> Option<(Track, TrackToken)> {
        if self.slots[kind].is_some_and(|t| t.cadence() == cadence) {
            self.take(kind)
        } else {
            None
        }
    }

    /// Returns a stepped track to its slot
    ///
    /// Does nothing if the slot was started or cancelled in the meantime.
    pub fn restore(&mut self, track: Track, token: TrackToken) {
        if self.generations[token.kind] == token.generation && self.slots[token.kind].is_none() {
            self.slots[token.kind] = Some(track);
        }
    }

    pub fn get(&self, kind: TrackKind) -> Option<&Track> {
        self.slots[kind].as_ref()
    }

    pub fn is_running(&self, kind: TrackKind) -> bool {
        self.slots[kind].is_some()
    }

    /// Kinds with a track in their slot
    pub fn running(&self) -> impl Iterator<Item = TrackKind> + '_ {
        self.slots
            .iter()
            .filter_map(|(kind, slot)| slot.map(|_| kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_replaces_occupant() {
        let mut slots = TrackSlots::new();
        slots.start(Track::ZoomToward { goal: 0.25 });
        slots.start(Track::ZoomToward { goal: 0.75 });
        assert_eq!(
            slots.get(TrackKind::ZoomToward),
            Some(&Track::ZoomToward { goal: 0.75 })
        );
        assert_eq!(slots.running().count(), 1);
    }

    #[test]
    fn test_restore_after_step() {
        let mut slots = TrackSlots::new();
        slots.start(Track::FadeIn { level: 0.0 });

        let (track, token) = slots.take_on(TrackKind::FadeIn, Cadence::Frame).unwrap();
        assert!(!slots.is_running(TrackKind::FadeIn));
        slots.restore(track, token);
        assert!(slots.is_running(TrackKind::FadeIn));
    }

    #[test]
    fn test_restart_during_step_wins() {
        let mut slots = TrackSlots::new();
        slots.start(Track::ZoomToward { goal: 0.25 });

        let (track, token) = slots.take(TrackKind::ZoomToward).unwrap();
        slots.start(Track::ZoomToward { goal: 0.9 });
        slots.restore(track, token);
        assert_eq!(
            slots.get(TrackKind::ZoomToward),
            Some(&Track::ZoomToward { goal: 0.9 })
        );
    }

    #[test]
    fn test_cancel_during_step_is_final() {
        let mut slots = TrackSlots::new();
        slots.start(Track::SnapTo { goal: 0.25 });

        let (track, token) = slots.take_on(TrackKind::SnapTo, Cadence::Fixed).unwrap();
        slots.cancel(TrackKind::SnapTo);
        slots.restore(track, token);
        assert!(!slots.is_running(TrackKind::SnapTo));
    }

    #[test]
    fn test_take_respects_cadence() {
        let mut slots = TrackSlots::new();
        slots.start(Track::Xray { delay: 0.1 });
        assert!(slots.take_on(TrackKind::Xray, Cadence::Fixed).is_none());
        assert!(slots.take_on(TrackKind::Xray, Cadence::Frame).is_some());

        slots.start(Track::Xray { delay: 0.0 });
        assert!(slots.take_on(TrackKind::Xray, Cadence::Frame).is_none());
        assert!(slots.take_on(TrackKind::Xray, Cadence::Fixed).is_some());
    }

    #[test]
    fn test_cancel_all() {
        let mut slots = TrackSlots::new();
        slots.start(Track::FadeIn { level: 0.5 });
        slots.start(Track::RotateReset {
            goal: Quat::IDENTITY,
        });
        slots.cancel_all();
        assert_eq!(slots.running().count(), 0);
    }
}
