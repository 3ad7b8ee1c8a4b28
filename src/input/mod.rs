//! Windowing-system-agnostic pointer input.
//!
//! Applications translate their UI toolkit's native mouse events into
//! [`PointerEvent`] values and feed them to the camera controller, keeping
//! the interaction logic free of any particular windowing dependency.

mod event;

pub use event::PointerEvent;
