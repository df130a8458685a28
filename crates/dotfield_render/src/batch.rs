//! Drawing surface that batches squares for the GPU

use dotfield_core::{DrawSurface, Square};

use crate::pipeline::SquareInstance;

/// Collects one frame's squares as GPU instances
///
/// `clear` starts a new frame; every `fill_square` appends an instance.
/// Squares that fall entirely outside the cleared area are dropped.
#[derive(Debug, Default)]
pub struct SquareBatch {
    instances: Vec<SquareInstance>,
    width: u32,
    height: u32,
}

impl SquareBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances drawn since the last clear
    pub fn instances(&self) -> &[SquareInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Size of the area cleared at the start of this frame
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_visible(&self, square: &Square) -> bool {
        let (x, y) = (square.position.x, square.position.y);
        square.color[3] > 0.0
            && x + square.size > 0.0
            && y + square.size > 0.0
            && x < self.width as f32
            && y < self.height as f32
    }
}

impl DrawSurface for SquareBatch {
    fn clear(&mut self, width: u32, height: u32) {
        self.instances.clear();
        self.width = width;
        self.height = height;
    }

    fn fill_square(&mut self, square: &Square) {
        if self.is_visible(square) {
            self.instances.push(SquareInstance::from(square));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotfield_core::Vec2;

    fn square(x: f32, y: f32) -> Square {
        Square {
            position: Vec2::new(x, y),
            size: 3.0,
            color: [1.0, 1.0, 1.0, 0.25],
        }
    }

    #[test]
    fn test_clear_starts_new_frame() {
        let mut batch = SquareBatch::new();
        batch.clear(100, 50);
        batch.fill_square(&square(10.0, 10.0));
        batch.fill_square(&square(20.0, 20.0));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.viewport(), (100, 50));

        batch.clear(100, 50);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_offscreen_squares_dropped() {
        let mut batch = SquareBatch::new();
        batch.clear(100, 100);
        batch.fill_square(&square(-10.0, 5.0));
        batch.fill_square(&square(5.0, 100.0));
        batch.fill_square(&square(-2.0, -2.0));
        // Partially visible square is kept
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.instances()[0].origin, [-2.0, -2.0]);
    }

    #[test]
    fn test_transparent_squares_dropped() {
        let mut batch = SquareBatch::new();
        batch.clear(100, 100);
        let mut sq = square(10.0, 10.0);
        sq.color[3] = 0.0;
        batch.fill_square(&sq);
        assert!(batch.is_empty());
    }
}
