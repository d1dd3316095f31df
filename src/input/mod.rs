//! Input handling
//!
//! Raw window input is collected into pointer events and a polled controller
//! state. Pointer events go through the [`GestureTracker`]; controller state
//! through the [`AlternateInputMapper`]. Both produce bus events only.

mod alternate;
mod collector;
mod events;
mod gesture;
mod state;

pub use alternate::AlternateInputMapper;
pub use collector::InputCollector;
pub use events::{KeyCode, PointerEvent, PointerId};
pub use gesture::{GestureState, GestureTracker, Pointer};
pub use state::{ArrowKeys, ButtonState, ControllerState};
