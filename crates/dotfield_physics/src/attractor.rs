//! Pointer-like attractors that push particles around

use dotfield_math::Vec2;

/// A point of influence acting on nearby particles
///
/// `radius` is compared against the *squared* distance between the
/// attractor and a particle, so a radius of 3000 reaches roughly 55 pixels.
/// A radius of zero disables the attractor without moving it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attractor {
    /// Position in field pixels
    pub position: Vec2,
    /// Influence radius in squared pixels
    pub radius: f32,
}

impl Default for Attractor {
    fn default() -> Self {
        Self::inactive()
    }
}

impl Attractor {
    /// Create an attractor at `position` with the given squared-pixel radius
    ///
    /// Negative radii are treated as zero.
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
        }
    }

    /// An attractor at the origin that reaches nothing
    pub const fn inactive() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 0.0,
        }
    }

    /// Whether this attractor can influence anything
    #[inline]
    pub fn is_active(&self) -> bool {
        self.radius > 0.0
    }

    /// Move the attractor, keeping its radius
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Change the influence radius (clamped to be non-negative)
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    /// Stop influencing particles
    pub fn deactivate(&mut self) {
        self.radius = 0.0;
    }

    /// Whether a particle at squared distance `distance_sq` is inside the radius
    #[inline]
    pub fn reaches(&self, distance_sq: f32) -> bool {
        self.is_active() && distance_sq < self.radius
    }
}
