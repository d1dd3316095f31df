//! Zoom value, fading and the focus controller

mod controller;
mod curve;
mod fader;
mod state;
mod tracks;

pub use controller::ZoomFocusController;
pub use curve::{CurveKey, FadeCurve};
pub use fader::{FadeCurves, FadeInputs, FadeLevels};
pub use state::{XrayState, ZoomState};
pub use tracks::{Cadence, Track, TrackKind, TrackSlots, TrackToken};
