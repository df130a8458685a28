//! CPU rasterizer for particle squares
//!
//! Draws into an RGBA8 buffer with source-over blending. Used for headless
//! rendering and for checking what a frame looks like without a GPU.

use dotfield_core::{Color, DrawSurface, Square};

/// Packed RGBA8 pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    /// Create a buffer filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            background,
            pixels: Vec::new(),
        };
        fb.clear(width, height);
        fb
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Raw row-major pixel data
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn background_pixel(&self) -> [u8; 4] {
        [
            to_byte(self.background.r),
            to_byte(self.background.g),
            to_byte(self.background.b),
            255,
        ]
    }
}

impl DrawSurface for Framebuffer {
    fn clear(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let bg = self.background_pixel();
        self.pixels.clear();
        self.pixels.resize((width as usize) * (height as usize), bg);
    }

    fn fill_square(&mut self, square: &Square) {
        let alpha = square.color[3].clamp(0.0, 1.0);
        if alpha <= 0.0 || square.size <= 0.0 {
            return;
        }

        // Pixel coverage follows the canvas rule: [x, x + size)
        let x0 = square.position.x.max(0.0).floor() as i64;
        let y0 = square.position.y.max(0.0).floor() as i64;
        let x1 = ((square.position.x + square.size).ceil() as i64).min(self.width as i64);
        let y1 = ((square.position.y + square.size).ceil() as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = [square.color[0], square.color[1], square.color[2]];
        for y in y0..y1 {
            let row = (y as usize) * (self.width as usize);
            for x in x0..x1 {
                let dst = &mut self.pixels[row + x as usize];
                for c in 0..3 {
                    let d = dst[c] as f32 / 255.0;
                    dst[c] = to_byte(src[c] * alpha + d * (1.0 - alpha));
                }
                dst[3] = 255;
            }
        }
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotfield_core::Vec2;

    fn square(x: f32, y: f32, size: f32, color: [f32; 4]) -> Square {
        Square {
            position: Vec2::new(x, y),
            size,
            color,
        }
    }

    #[test]
    fn test_clear_fills_background() {
        let fb = Framebuffer::new(4, 3, Color::BLACK);
        assert_eq!(fb.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(fb.pixel(3, 2), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_opaque_square_covers_pixels() {
        let mut fb = Framebuffer::new(10, 10, Color::BLACK);
        fb.fill_square(&square(2.0, 3.0, 2.0, [1.0, 1.0, 1.0, 1.0]));
        assert_eq!(fb.pixel(2, 3), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(3, 4), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(4, 3), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(2, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_square_blends() {
        let mut fb = Framebuffer::new(2, 2, Color::BLACK);
        fb.fill_square(&square(0.0, 0.0, 1.0, [1.0, 1.0, 1.0, 0.25]));
        // 0.25 * 255 = 63.75
        assert_eq!(fb.pixel(0, 0), Some([64, 64, 64, 255]));
    }

    #[test]
    fn test_square_clipped_at_edges() {
        let mut fb = Framebuffer::new(4, 4, Color::BLACK);
        fb.fill_square(&square(-1.0, -1.0, 2.0, [1.0, 0.0, 0.0, 1.0]));
        fb.fill_square(&square(3.0, 3.0, 4.0, [0.0, 1.0, 0.0, 1.0]));
        assert_eq!(fb.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(fb.pixel(1, 1), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(3, 3), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_zero_size_square_draws_nothing() {
        let mut fb = Framebuffer::new(4, 4, Color::BLACK);
        fb.fill_square(&square(1.0, 1.0, 0.0, [1.0, 1.0, 1.0, 1.0]));
        assert!(fb.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_clear_resizes() {
        let mut fb = Framebuffer::new(2, 2, Color::WHITE);
        fb.clear(5, 1);
        assert_eq!(fb.width(), 5);
        assert_eq!(fb.height(), 1);
        assert_eq!(fb.pixel(4, 0), Some([255, 255, 255, 255]));
    }
}
