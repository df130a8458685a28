//! Drawing surface abstraction

use dotfield_physics::Square;

/// A 2D surface the field draws onto every frame
///
/// Implementations decide what "drawing" means: a GPU instance batch, a CPU
/// framebuffer, or a recorder in tests.
pub trait DrawSurface {
    /// Clear the rectangle from (0, 0) to (`width`, `height`)
    fn clear(&mut self, width: u32, height: u32);

    /// Fill an axis-aligned square with a straight-alpha colour
    fn fill_square(&mut self, square: &Square);
}
