//! sRGB colour with HSL construction

use serde::{Serialize, Deserialize};

/// An sRGB colour with components in `[0, 1]`
///
/// Values are gamma-encoded, as CSS colours are, and are meant to be blended
/// without conversion to linear space.
///
/// Alpha is tracked separately by the particles, so this type carries only
/// the three colour channels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a colour, clamping each channel to `[0, 1]`
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Build a colour from hue (degrees), saturation and lightness (both `[0, 1]`)
    ///
    /// Hue wraps, so 360 and 0 give the same colour.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self::new(r + m, g + m, b + m)
    }

    /// A fully saturated colour of the given hue (HSL s=100%, l=50%)
    pub fn vivid(hue: f32) -> Self {
        Self::from_hsl(hue, 1.0, 0.5)
    }

    /// RGBA array with the given alpha
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha.clamp(0.0, 1.0)]
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(Color::vivid(0.0), Color::new(1.0, 0.0, 0.0)));
        assert!(approx(Color::vivid(120.0), Color::new(0.0, 1.0, 0.0)));
        assert!(approx(Color::vivid(240.0), Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_secondary_hues() {
        assert!(approx(Color::vivid(60.0), Color::new(1.0, 1.0, 0.0)));
        assert!(approx(Color::vivid(180.0), Color::new(0.0, 1.0, 1.0)));
        assert!(approx(Color::vivid(300.0), Color::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(approx(Color::vivid(360.0), Color::vivid(0.0)));
        assert!(approx(Color::vivid(-120.0), Color::vivid(240.0)));
    }

    #[test]
    fn test_lightness_extremes() {
        assert!(approx(Color::from_hsl(200.0, 1.0, 1.0), Color::WHITE));
        assert!(approx(Color::from_hsl(200.0, 1.0, 0.0), Color::BLACK));
        // Zero saturation is grey regardless of hue
        assert!(approx(Color::from_hsl(77.0, 0.0, 0.5), Color::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Color::new(2.0, -1.0, 0.5), Color { r: 1.0, g: 0.0, b: 0.5 });
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Color::WHITE.with_alpha(0.25), [1.0, 1.0, 1.0, 0.25]);
        assert_eq!(Color::BLACK.with_alpha(3.0), [0.0, 0.0, 0.0, 1.0]);
    }
}
