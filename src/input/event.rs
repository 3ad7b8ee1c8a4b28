use crate::math::Point2;

/// A pointer event in normalized device coordinates.
///
/// Positions have x and y in [-1, 1] with +y up. Window-pixel to NDC
/// conversion is the application's job since only it knows the viewport
/// size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The primary button was pressed.
    ButtonDown {
        /// Cursor position at the press.
        pos: Point2,
        /// Depth-buffer sample under the cursor in [0, 1]; use 1.0 when no
        /// depth information is available.
        depth: f32,
    },
    /// The cursor moved while the button was held.
    Drag {
        /// Current cursor position.
        pos: Point2,
    },
    /// The primary button was released.
    ButtonUp {
        /// Cursor position at the release.
        pos: Point2,
    },
    /// A frame tick advancing the interaction clock.
    Tick {
        /// Seconds since the previous tick.
        dt: f64,
    },
}
