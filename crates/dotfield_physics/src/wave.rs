//! Click ripple parameters

/// Shape of the opacity ripple produced by a click
#[derive(Clone, Debug, PartialEq)]
pub struct WaveParams {
    /// Ripple radius in pixels (true distance, not squared)
    pub radius: f32,
    /// Ticks between the click and the opacity drop
    pub delay_frames: u32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            // ~500ms at 60Hz
            delay_frames: 30,
        }
    }
}

impl WaveParams {
    /// Opacity drop for a particle `distance` pixels from the click
    ///
    /// Returns `None` outside the ripple. The drop is strongest at the
    /// centre and falls off linearly to zero at the edge.
    pub fn strength_at(&self, distance: f32) -> Option<f32> {
        if self.radius > 0.0 && distance < self.radius {
            Some(1.0 - distance / self.radius)
        } else {
            None
        }
    }
}
