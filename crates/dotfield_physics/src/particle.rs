//! Particle records and the functions that advance them
//!
//! A particle is a point mass tied to its rest position by a spring. Each
//! tick it is pushed by any attractor in reach, damped by friction, and
//! eased back toward its origin. Left alone it settles at rest.

use crate::attractor::Attractor;
use crate::wave::WaveParams;
use dotfield_math::{Color, Vec2};
use rand::Rng;

/// Simulation constants shared by every particle in a field
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams {
    /// Fraction of the offset from origin recovered each tick (0..=1)
    pub ease: f32,
    /// Velocity multiplier applied each tick (0..=1)
    pub friction: f32,
    /// Multiplier on the attractor push
    pub force_scale: f32,
    /// Lower bound for squared distance before dividing by it
    pub min_distance_sq: f32,
    /// Ticks a highlight colour is held after the particle leaves an attractor
    pub color_hold_frames: u32,
    /// Alpha a faded particle settles at
    pub alpha_floor: f32,
    /// Alpha multiplier per tick once the hold has expired
    pub alpha_decay: f32,
    /// Opacity regained per tick after a ripple fade
    pub opacity_recovery: f32,
    /// Largest particle size in pixels (sizes are drawn from `0..=max_size`)
    pub max_size: u32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            ease: 0.2,
            friction: 0.95,
            force_scale: 8.0,
            min_distance_sq: 1.0,
            color_hold_frames: 60,
            alpha_floor: 0.25,
            alpha_decay: 0.98,
            opacity_recovery: 0.02,
            max_size: 4,
        }
    }
}

/// Opacity drop waiting to be applied after a ripple
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingFade {
    /// Ticks left before the drop
    pub frames_left: u32,
    /// Opacity removed when the drop happens
    pub amount: f32,
}

/// A single particle
///
/// This is plain data: all behaviour lives in the free functions of this
/// module, so a field can store particles however it likes.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Rest position on the grid
    pub origin: Vec2,
    /// Current position
    pub position: Vec2,
    /// Velocity in pixels per tick
    pub velocity: Vec2,
    /// Edge length of the drawn square in pixels
    pub size: f32,
    /// Current colour
    pub color: Color,
    /// Interaction alpha: 1 while highlighted, decaying to the floor
    pub alpha: f32,
    /// Ripple opacity, multiplied into alpha when drawn
    pub opacity: f32,
    /// Ticks the highlight colour will still be held
    pub color_hold: u32,
    /// Ripple drop waiting to happen
    pub pending_fade: Option<PendingFade>,
}

impl Particle {
    /// Create a particle resting on `origin`
    ///
    /// The origin is floored to whole pixels so squares land on pixel
    /// boundaries.
    pub fn at_rest(origin: Vec2, size: f32, params: &ParticleParams) -> Self {
        let origin = origin.floor();
        Self {
            origin,
            position: origin,
            velocity: Vec2::ZERO,
            size: size.max(0.0),
            color: Color::WHITE,
            alpha: params.alpha_floor,
            opacity: 1.0,
            color_hold: 0,
            pending_fade: None,
        }
    }

    /// Create a particle at rest with a random size in `0..=max_size`
    pub fn random<R: Rng + ?Sized>(origin: Vec2, params: &ParticleParams, rng: &mut R) -> Self {
        let size = rng.random_range(0..=params.max_size) as f32;
        Self::at_rest(origin, size, params)
    }

    /// Whether the particle sits on its origin with (almost) no velocity
    pub fn is_at_rest(&self, tolerance: f32) -> bool {
        self.position.distance(self.origin) <= tolerance && self.velocity.length() <= tolerance
    }
}

/// A filled square ready to be drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    /// Top-left corner in pixels
    pub position: Vec2,
    /// Edge length in pixels
    pub size: f32,
    /// Straight (non-premultiplied) RGBA
    pub color: [f32; 4],
}

/// Apply one attractor to a particle
///
/// Inside the attractor's radius the particle is pushed along the line to
/// the attractor and lit with a random vivid hue. Outside, the highlight is
/// held for `color_hold_frames` ticks and then alpha decays to the floor
/// while the colour returns to white.
///
/// Returns whether the particle was inside the radius.
pub fn interact<R: Rng + ?Sized>(
    particle: &mut Particle,
    attractor: &Attractor,
    params: &ParticleParams,
    rng: &mut R,
) -> bool {
    let delta = attractor.position - particle.position;
    // Clamp before dividing; a particle sitting on the attractor would otherwise blow up
    let distance_sq = delta.length_squared().max(params.min_distance_sq);

    if attractor.reaches(distance_sq) {
        let force = -(attractor.radius / distance_sq) * params.force_scale;
        particle.velocity += Vec2::from_angle(delta.angle()) * force;
        particle.color = Color::vivid(rng.random_range(0.0..360.0));
        particle.alpha = 1.0;
        particle.color_hold = params.color_hold_frames;
        true
    } else if particle.color_hold > 0 {
        particle.color_hold -= 1;
        false
    } else {
        particle.alpha = (particle.alpha * params.alpha_decay).max(params.alpha_floor);
        particle.color = Color::WHITE;
        false
    }
}

/// Damp velocity and spring the particle back toward its origin
pub fn integrate(particle: &mut Particle, params: &ParticleParams) {
    particle.velocity *= params.friction;
    let pull = (particle.origin - particle.position) * params.ease;
    particle.position += particle.velocity + pull;
}

/// Count down a pending ripple fade, or recover opacity after one
fn advance_fade(particle: &mut Particle, params: &ParticleParams) {
    match particle.pending_fade.as_mut() {
        Some(fade) => {
            fade.frames_left = fade.frames_left.saturating_sub(1);
            if fade.frames_left == 0 {
                particle.opacity = (particle.opacity - fade.amount).max(0.0);
                particle.pending_fade = None;
            }
        }
        None if particle.opacity < 1.0 => {
            particle.opacity = (particle.opacity + params.opacity_recovery).min(1.0);
        }
        None => {}
    }
}

/// Advance a particle by one tick against every attractor
pub fn update<R: Rng + ?Sized>(
    particle: &mut Particle,
    attractors: &[Attractor],
    params: &ParticleParams,
    rng: &mut R,
) {
    for attractor in attractors {
        interact(particle, attractor, params, rng);
    }
    integrate(particle, params);
    advance_fade(particle, params);
}

/// Hit a particle with a click ripple centred at `center`
///
/// Particles inside the ripple flash to full opacity, then lose
/// `1 - distance / radius` of it after `delay_frames` ticks. A newer ripple
/// replaces any fade still pending. Returns whether the particle was hit.
pub fn ripple(particle: &mut Particle, center: Vec2, wave: &WaveParams) -> bool {
    let Some(amount) = wave.strength_at(particle.position.distance(center)) else {
        return false;
    };

    particle.opacity = 1.0;
    particle.pending_fade = Some(PendingFade {
        frames_left: wave.delay_frames,
        amount,
    });
    true
}

/// The square this particle draws this frame, or `None` when it has no size
pub fn square(particle: &Particle) -> Option<Square> {
    if particle.size <= 0.0 {
        return None;
    }

    Some(Square {
        position: particle.position,
        size: particle.size,
        color: particle.color.with_alpha(particle.alpha * particle.opacity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle::at_rest(Vec2::new(x, y), 2.0, &ParticleParams::default())
    }

    #[test]
    fn test_at_rest_floors_origin() {
        let p = Particle::at_rest(Vec2::new(10.7, 3.2), 3.0, &ParticleParams::default());
        assert_eq!(p.origin, Vec2::new(10.0, 3.0));
        assert_eq!(p.position, p.origin);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.alpha, 0.25);
        assert_eq!(p.opacity, 1.0);
        assert_eq!(p.color, Color::WHITE);
    }

    #[test]
    fn test_random_size_in_range() {
        let params = ParticleParams::default();
        let mut rng = rng();
        for _ in 0..200 {
            let p = Particle::random(Vec2::ZERO, &params, &mut rng);
            assert!(p.size >= 0.0 && p.size <= 4.0);
            assert_eq!(p.size.fract(), 0.0);
        }
    }

    #[test]
    fn test_interact_inside_pushes_away() {
        let params = ParticleParams::default();
        let mut p = particle_at(0.0, 0.0);
        // Attractor 10px to the right, squared distance 100
        let attractor = Attractor::new(Vec2::new(10.0, 0.0), 3000.0);

        assert!(interact(&mut p, &attractor, &params, &mut rng()));

        // force = -(3000 / 100) * 8 = -240 along +x
        assert!((p.velocity.x + 240.0).abs() < 1e-3);
        assert!(p.velocity.y.abs() < 1e-3);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.color_hold, 60);
        assert_ne!(p.color, Color::WHITE);
    }

    #[test]
    fn test_interact_zero_distance_is_finite() {
        let params = ParticleParams::default();
        let mut p = particle_at(50.0, 50.0);
        let attractor = Attractor::new(Vec2::new(50.0, 50.0), 100.0);

        assert!(interact(&mut p, &attractor, &params, &mut rng()));
        assert!(p.velocity.is_finite());
        assert!(p.velocity.length() > 0.0);

        integrate(&mut p, &params);
        assert!(p.position.is_finite());
    }

    #[test]
    fn test_hold_then_fade() {
        let params = ParticleParams::default();
        let mut p = particle_at(0.0, 0.0);
        let far = Attractor::new(Vec2::new(1000.0, 1000.0), 3000.0);
        p.alpha = 1.0;
        p.color = Color::vivid(120.0);
        p.color_hold = 2;

        interact(&mut p, &far, &params, &mut rng());
        interact(&mut p, &far, &params, &mut rng());
        assert_eq!(p.color_hold, 0);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.color, Color::vivid(120.0));

        interact(&mut p, &far, &params, &mut rng());
        assert_eq!(p.color, Color::WHITE);
        assert!((p.alpha - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_fade_is_monotonic_and_floored() {
        let params = ParticleParams::default();
        let mut p = particle_at(0.0, 0.0);
        p.alpha = 1.0;
        let idle = Attractor::inactive();

        let mut last = p.alpha;
        for _ in 0..500 {
            interact(&mut p, &idle, &params, &mut rng());
            assert!(p.alpha <= last);
            assert!(p.alpha >= params.alpha_floor);
            last = p.alpha;
        }
        assert_eq!(p.alpha, params.alpha_floor);
    }

    #[test]
    fn test_integrate_springs_back() {
        let params = ParticleParams::default();
        let mut p = particle_at(100.0, 100.0);
        p.position = Vec2::new(110.0, 100.0);

        integrate(&mut p, &params);
        // No velocity: position moves 20% of the way home
        assert!((p.position.x - 108.0).abs() < 1e-4);

        for _ in 0..200 {
            integrate(&mut p, &params);
        }
        assert!(p.is_at_rest(1e-3));
    }

    #[test]
    fn test_integrate_at_rest_is_idempotent() {
        let params = ParticleParams::default();
        let mut p = particle_at(40.0, 60.0);
        let before = p.clone();
        integrate(&mut p, &params);
        assert_eq!(p, before);
    }

    #[test]
    fn test_update_with_no_attractors_settles() {
        let params = ParticleParams::default();
        let mut p = particle_at(20.0, 20.0);
        p.velocity = Vec2::new(5.0, -3.0);

        for _ in 0..300 {
            update(&mut p, &[], &params, &mut rng());
        }
        assert!(p.is_at_rest(1e-3));
    }

    #[test]
    fn test_ripple_inside_and_outside() {
        let wave = WaveParams::default();
        let mut near = particle_at(50.0, 0.0);
        let mut far = particle_at(500.0, 0.0);

        assert!(ripple(&mut near, Vec2::ZERO, &wave));
        assert!(!ripple(&mut far, Vec2::ZERO, &wave));

        assert_eq!(near.opacity, 1.0);
        assert_eq!(
            near.pending_fade,
            Some(PendingFade {
                frames_left: 30,
                amount: 0.5
            })
        );
        assert_eq!(far.pending_fade, None);
    }

    #[test]
    fn test_ripple_fade_then_recover() {
        let params = ParticleParams::default();
        let wave = WaveParams {
            radius: 100.0,
            delay_frames: 3,
        };
        let mut p = particle_at(0.0, 0.0);
        ripple(&mut p, Vec2::new(25.0, 0.0), &wave);

        update(&mut p, &[], &params, &mut rng());
        update(&mut p, &[], &params, &mut rng());
        assert_eq!(p.opacity, 1.0);

        update(&mut p, &[], &params, &mut rng());
        assert!((p.opacity - 0.25).abs() < 1e-5);
        assert_eq!(p.pending_fade, None);

        update(&mut p, &[], &params, &mut rng());
        assert!((p.opacity - 0.27).abs() < 1e-5);

        for _ in 0..100 {
            update(&mut p, &[], &params, &mut rng());
        }
        assert_eq!(p.opacity, 1.0);
    }

    #[test]
    fn test_square_uses_alpha_and_opacity() {
        let mut p = particle_at(3.0, 4.0);
        p.alpha = 0.5;
        p.opacity = 0.5;

        let sq = square(&p).unwrap();
        assert_eq!(sq.position, Vec2::new(3.0, 4.0));
        assert_eq!(sq.size, 2.0);
        assert_eq!(sq.color, [1.0, 1.0, 1.0, 0.25]);
    }

    #[test]
    fn test_square_skips_zero_size() {
        let p = Particle::at_rest(Vec2::ZERO, 0.0, &ParticleParams::default());
        assert_eq!(square(&p), None);
    }
}
