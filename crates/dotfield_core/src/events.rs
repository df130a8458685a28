//! Input events consumed by the field

use dotfield_math::Vec2;

/// Pointer activity, in field pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to a new position
    Moved(Vec2),
    /// The pointer has not moved for the idle timeout
    Idle,
    /// The pointer left the surface
    Left,
    /// The primary button was pressed at a position
    Clicked(Vec2),
}
