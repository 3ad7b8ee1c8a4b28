//! Camera control: the UniCam gesture state machine and the screen↔world
//! projection helpers it is built on.
//!
//! The interaction style is derived from "UniCam" (Zeleznik et al.): a
//! single mouse button drives pan, dolly, trackball rotation, and spin
//! momentum, disambiguated by a multi-phase state machine.

pub mod project;
mod unicam;

pub use unicam::{GestureState, UniCam};

use crate::math::Matrix4;

/// Capability to draw the center-of-rotation marker sphere.
///
/// The crate produces view matrices but owns no GPU resources; an
/// application that wants the pivot visualized implements this with
/// whatever sphere-drawing facility it has. The no-op impl for `()` lets
/// headless callers and tests skip it.
pub trait PivotMarker {
    /// Draws a shaded sphere with the given model/view/projection matrices
    /// and RGB color.
    fn draw_sphere(&mut self, model: Matrix4, view: Matrix4, projection: Matrix4, color: [f32; 3]);
}

impl PivotMarker for () {
    fn draw_sphere(
        &mut self,
        _model: Matrix4,
        _view: Matrix4,
        _projection: Matrix4,
        _color: [f32; 3],
    ) {
    }
}
