//! Synthetic attractor circling the field centre

use crate::attractor::Attractor;
use dotfield_math::Vec2;
use std::f32::consts::PI;

/// Configuration for the orbiting attractor
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitParams {
    /// Path radius in pixels while the field is idle
    pub idle_path_radius: f32,
    /// Path radius in pixels while the field is active
    pub active_path_radius: f32,
    /// Angle increment per tick, in radians
    pub speed: f32,
    /// Influence radius of the attractor (squared pixels)
    pub radius: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            idle_path_radius: 15.0,
            active_path_radius: 500.0,
            speed: 0.01,
            radius: 3000.0,
        }
    }
}

/// An attractor that circles a centre point, one step per tick
#[derive(Clone, Debug)]
pub struct Orbit {
    params: OrbitParams,
    angle: f32,
}

impl Orbit {
    pub fn new(params: OrbitParams) -> Self {
        Self { params, angle: 0.0 }
    }

    /// Current angle in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    /// Place the attractor for this tick, then step the angle
    ///
    /// The path starts on the left of `center` and runs counter-clockwise
    /// on screen (y grows downward).
    pub fn advance(&mut self, center: Vec2, active: bool) -> Attractor {
        let path_radius = if active {
            self.params.active_path_radius
        } else {
            self.params.idle_path_radius
        };

        let position = center + Vec2::from_angle(PI - self.angle) * path_radius;
        self.angle = (self.angle + self.params.speed) % (2.0 * PI);

        Attractor::new(position, self.params.radius)
    }
}
