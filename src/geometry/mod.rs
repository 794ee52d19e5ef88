// Window geometry: shared types, snap zones, resize maths and the pointer gesture state machine

pub mod controller;
pub mod resize;
pub mod snap;
pub mod types;

pub use controller::{GeometryController, Gesture, GestureOutcome};
pub use types::*;
