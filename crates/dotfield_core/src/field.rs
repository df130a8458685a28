//! The particle field: a grid of particles and the attractors acting on it

use crate::events::PointerEvent;
use crate::render_loop::Tick;
use crate::surface::DrawSurface;
use dotfield_math::Vec2;
use dotfield_physics::{
    particle, Attractor, Orbit, OrbitParams, Particle, ParticleParams, WaveParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default spacing between grid points in pixels
pub const DEFAULT_GAP: u32 = 20;
/// Default pointer influence radius (squared pixels)
pub const DEFAULT_POINTER_RADIUS: f32 = 3000.0;
/// Default pointer influence radius while the field is active (squared pixels)
pub const DEFAULT_ACTIVE_RADIUS: f32 = 150_000.0;

/// Configuration for a particle field
#[derive(Clone, Debug)]
pub struct FieldConfig {
    /// Spacing between grid points in pixels
    pub gap: u32,
    /// Pointer radius while idle-tracking (squared pixels)
    pub pointer_radius: f32,
    /// Pointer radius while the field is active (squared pixels)
    pub active_radius: f32,
    /// Per-particle simulation constants
    pub particle: ParticleParams,
    /// Click ripple shape
    pub wave: WaveParams,
    /// Second, orbiting attractor (disabled when `None`)
    pub orbit: Option<OrbitParams>,
    /// RNG seed for particle sizes and highlight hues (entropy when `None`)
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            pointer_radius: DEFAULT_POINTER_RADIUS,
            active_radius: DEFAULT_ACTIVE_RADIUS,
            particle: ParticleParams::default(),
            wave: WaveParams::default(),
            orbit: None,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Set the grid gap
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the particle parameters
    pub fn with_particle_params(mut self, params: ParticleParams) -> Self {
        self.particle = params;
        self
    }

    /// Enable the orbiting attractor
    pub fn with_orbit(mut self, orbit: OrbitParams) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Use a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.gap == 0 {
            return Err(FieldError::InvalidGap(self.gap));
        }

        let unit_range = [
            ("ease", self.particle.ease),
            ("friction", self.particle.friction),
            ("alpha_floor", self.particle.alpha_floor),
            ("alpha_decay", self.particle.alpha_decay),
        ];
        for (name, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(FieldError::InvalidParameter { name, value });
            }
        }

        let non_negative = [
            ("pointer_radius", self.pointer_radius),
            ("active_radius", self.active_radius),
            ("opacity_recovery", self.particle.opacity_recovery),
            ("wave_radius", self.wave.radius),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(FieldError::InvalidParameter { name, value });
            }
        }

        // The clamp keeps the force finite, so it must be strictly positive
        if !(self.particle.min_distance_sq > 0.0) {
            return Err(FieldError::InvalidParameter {
                name: "min_distance_sq",
                value: self.particle.min_distance_sq,
            });
        }

        Ok(())
    }
}

/// Errors raised when configuring a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Grid gap must be at least one pixel
    InvalidGap(u32),
    /// A numeric parameter is out of range
    InvalidParameter { name: &'static str, value: f32 },
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::InvalidGap(gap) => write!(f, "Invalid grid gap: {} (must be > 0)", gap),
            FieldError::InvalidParameter { name, value } => {
                write!(f, "Invalid field parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// A dense grid of particles drawn onto a surface
///
/// The field owns its surface, so a field cannot exist without something to
/// draw on. Particles are stored column by column: every row of column 0,
/// then every row of column 1, and so on.
pub struct ParticleField<S: DrawSurface> {
    config: FieldConfig,
    surface: S,
    particles: Vec<Particle>,
    width: u32,
    height: u32,
    gap: u32,
    /// Pointer-driven attractor
    pointer: Attractor,
    orbit: Option<Orbit>,
    /// Last position of the orbiting attractor
    orbit_attractor: Attractor,
    active: bool,
    rng: StdRng,
    frames: u64,
}

impl<S: DrawSurface> ParticleField<S> {
    /// Create a field of `width` x `height` pixels and lay out its grid
    pub fn new(
        width: u32,
        height: u32,
        config: FieldConfig,
        surface: S,
    ) -> Result<Self, FieldError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut field = Self {
            gap: config.gap,
            orbit: config.orbit.clone().map(Orbit::new),
            config,
            surface,
            particles: Vec::new(),
            width,
            height,
            // Starts switched off until the pointer first moves
            pointer: Attractor::inactive(),
            orbit_attractor: Attractor::inactive(),
            active: false,
            rng,
            frames: 0,
        };
        field.populate();
        Ok(field)
    }

    /// Replace every particle with a fresh grid of `width` x `height` at `gap` spacing
    pub fn initialize(&mut self, width: u32, height: u32, gap: u32) -> Result<(), FieldError> {
        if gap == 0 {
            return Err(FieldError::InvalidGap(gap));
        }
        self.width = width;
        self.height = height;
        self.gap = gap;
        self.populate();
        Ok(())
    }

    /// Change dimensions and rebuild the grid
    ///
    /// All particle state is lost; every particle restarts at rest on its
    /// grid point.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.populate();
    }

    fn populate(&mut self) {
        self.particles.clear();

        let (columns, rows) = grid_dims(self.width, self.height, self.gap);
        self.particles.reserve(columns * rows);

        for column in 0..columns {
            for row in 0..rows {
                let origin = grid_point(column, row, self.gap);
                self.particles
                    .push(Particle::random(origin, &self.config.particle, &mut self.rng));
            }
        }

        log::debug!(
            "Field laid out {} particles ({}x{} grid, {}x{} px, gap {})",
            self.particles.len(),
            columns,
            rows,
            self.width,
            self.height,
            self.gap
        );
    }

    /// Advance and draw one frame
    ///
    /// Clears the surface, moves the orbiting attractor, then updates and
    /// draws every particle once in grid order.
    pub fn tick(&mut self) {
        self.surface.clear(self.width, self.height);

        let center = self.center();
        if let Some(orbit) = &mut self.orbit {
            self.orbit_attractor = orbit.advance(center, self.active);
        }

        let both = [self.pointer, self.orbit_attractor];
        let attractors = if self.orbit.is_some() { &both[..] } else { &both[..1] };

        for p in &mut self.particles {
            particle::update(p, attractors, &self.config.particle, &mut self.rng);
            if let Some(square) = particle::square(p) {
                self.surface.fill_square(&square);
            }
        }

        self.frames += 1;
    }

    /// Switch the strong "active" field on or off
    ///
    /// Turning it on pulls the pointer attractor to the centre with the
    /// active radius. While active, pointer moves also use the active
    /// radius and the orbit takes its wide path.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if active {
            self.pointer = Attractor::new(self.center(), self.config.active_radius);
        }
        log::debug!("Field active: {}", active);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move the pointer attractor and arm it
    pub fn pointer_moved(&mut self, position: Vec2) {
        let radius = if self.active {
            self.config.active_radius
        } else {
            self.config.pointer_radius
        };
        self.pointer = Attractor::new(position, radius);
    }

    /// Disarm the pointer attractor after a quiet period
    pub fn pointer_idle(&mut self) {
        self.pointer.deactivate();
    }

    /// Disarm the pointer attractor when the pointer leaves the surface
    pub fn pointer_left(&mut self) {
        self.pointer.deactivate();
    }

    /// Send a click ripple out from `center`; returns how many particles it hit
    pub fn ripple(&mut self, center: Vec2) -> usize {
        let wave = &self.config.wave;
        self.particles
            .iter_mut()
            .map(|p| particle::ripple(p, center, wave))
            .filter(|&hit| hit)
            .count()
    }

    /// Route a pointer event to the matching operation
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Moved(position) => self.pointer_moved(position),
            PointerEvent::Idle => self.pointer_idle(),
            PointerEvent::Left => self.pointer_left(),
            PointerEvent::Clicked(position) => {
                let hit = self.ripple(position);
                log::trace!(
                    "Ripple at ({:.0}, {:.0}) hit {} particles",
                    position.x,
                    position.y,
                    hit
                );
            }
        }
    }

    /// Centre of the field in pixels
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to particles (used to seed disturbances)
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// The pointer-driven attractor
    pub fn pointer(&self) -> &Attractor {
        &self.pointer
    }

    /// The orbiting attractor, if enabled
    pub fn orbit_attractor(&self) -> Option<&Attractor> {
        self.orbit.as_ref().map(|_| &self.orbit_attractor)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of ticks since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

/// Whole grid cells that fit in `width` x `height`, as (columns, rows)
fn grid_dims(width: u32, height: u32, gap: u32) -> (usize, usize) {
    ((width / gap) as usize, (height / gap) as usize)
}

/// Pixel position of a grid point
fn grid_point(column: usize, row: usize, gap: u32) -> Vec2 {
    let gap = gap as f32;
    Vec2::new(column as f32 * gap, row as f32 * gap)
}

impl<S: DrawSurface> Tick for ParticleField<S> {
    fn tick(&mut self) {
        ParticleField::tick(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotfield_physics::Square;

    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
        squares: usize,
    }

    impl DrawSurface for CountingSurface {
        fn clear(&mut self, _width: u32, _height: u32) {
            self.clears += 1;
        }

        fn fill_square(&mut self, _square: &Square) {
            self.squares += 1;
        }
    }

    fn field(width: u32, height: u32) -> ParticleField<CountingSurface> {
        let config = FieldConfig::default().with_seed(42);
        ParticleField::new(width, height, config, CountingSurface::default()).unwrap()
    }

    #[test]
    fn test_particle_count_invariant() {
        let mut field = field(100, 100);
        field.initialize(640, 480, 20).unwrap();
        assert_eq!(field.particle_count(), 32 * 24);
        assert_eq!(field.particle_count(), 768);
    }

    #[test]
    fn test_count_floors_partial_cells() {
        let field = field(650, 479);
        // floor(650/20) = 32, floor(479/20) = 23
        assert_eq!(field.particle_count(), 32 * 23);
    }

    #[test]
    fn test_grid_order_is_column_major() {
        let field = field(60, 40);
        let origins: Vec<Vec2> = field.particles().iter().map(|p| p.origin).collect();
        assert_eq!(
            origins,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 20.0),
                Vec2::new(20.0, 0.0),
                Vec2::new(20.0, 20.0),
                Vec2::new(40.0, 0.0),
                Vec2::new(40.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_zero_gap_rejected() {
        let mut field = field(100, 100);
        assert_eq!(field.initialize(100, 100, 0), Err(FieldError::InvalidGap(0)));
        // Failed initialize leaves the old grid alone
        assert_eq!(field.particle_count(), 25);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = FieldConfig::default();
        config.particle.friction = 1.5;
        let result = ParticleField::new(10, 10, config, CountingSurface::default());
        assert!(matches!(
            result,
            Err(FieldError::InvalidParameter { name: "friction", .. })
        ));

        let mut config = FieldConfig::default();
        config.particle.min_distance_sq = 0.0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.pointer_radius = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_clears_then_draws() {
        let mut field = field(200, 200);
        field.tick();

        let drawable = field.particles().iter().filter(|p| p.size > 0.0).count();
        assert_eq!(field.surface().clears, 1);
        assert_eq!(field.surface().squares, drawable);
        assert_eq!(field.frame_count(), 1);
    }

    #[test]
    fn test_grid_dims_do_not_overflow() {
        // 65537 x 65537 cells overflows a u32 product
        let (columns, rows) = grid_dims(u32::MAX, u32::MAX, 65_535);
        assert_eq!((columns, rows), (65_537, 65_537));
        assert_eq!(columns as u64 * rows as u64, 65_537 * 65_537);

        let (columns, rows) = grid_dims(u32::MAX, 2, 1);
        assert_eq!(columns, u32::MAX as usize);
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_grid_point_far_from_origin() {
        let point = grid_point(u32::MAX as usize, 3, 4);
        assert!(point.is_finite());
        assert!(point.x > u32::MAX as f32);
        assert_eq!(point.y, 12.0);
    }

    #[test]
    fn test_pointer_starts_inactive() {
        let field = field(100, 100);
        assert!(!field.pointer().is_active());
        assert!(field.orbit_attractor().is_none());
    }

    #[test]
    fn test_pointer_radius_follows_active_flag() {
        let mut field = field(100, 100);
        field.pointer_moved(Vec2::new(10.0, 10.0));
        assert_eq!(field.pointer().radius, DEFAULT_POINTER_RADIUS);

        field.set_active(true);
        assert_eq!(field.pointer().position, Vec2::new(50.0, 50.0));
        assert_eq!(field.pointer().radius, DEFAULT_ACTIVE_RADIUS);

        field.pointer_moved(Vec2::new(10.0, 10.0));
        assert_eq!(field.pointer().radius, DEFAULT_ACTIVE_RADIUS);

        field.set_active(false);
        field.pointer_moved(Vec2::new(10.0, 10.0));
        assert_eq!(field.pointer().radius, DEFAULT_POINTER_RADIUS);
    }

    #[test]
    fn test_idle_and_leave_disarm_pointer() {
        let mut field = field(100, 100);
        field.handle_pointer(&PointerEvent::Moved(Vec2::new(5.0, 5.0)));
        assert!(field.pointer().is_active());
        field.handle_pointer(&PointerEvent::Idle);
        assert!(!field.pointer().is_active());

        field.handle_pointer(&PointerEvent::Moved(Vec2::new(5.0, 5.0)));
        field.handle_pointer(&PointerEvent::Left);
        assert!(!field.pointer().is_active());
    }

    #[test]
    fn test_ripple_hits_nearby_particles() {
        let mut field = field(400, 400);
        // Particles within 100px of (200, 200): grid points on a 20px lattice
        let hit = field.ripple(Vec2::new(200.0, 200.0));
        let expected = field
            .particles()
            .iter()
            .filter(|p| p.position.distance(Vec2::new(200.0, 200.0)) < 100.0)
            .count();
        assert_eq!(hit, expected);
        assert!(hit > 0);
    }

    #[test]
    fn test_orbit_attractor_moves() {
        let config = FieldConfig::default()
            .with_seed(1)
            .with_orbit(OrbitParams::default());
        let mut field = ParticleField::new(200, 200, config, CountingSurface::default()).unwrap();

        field.tick();
        let first = *field.orbit_attractor().unwrap();
        field.tick();
        let second = *field.orbit_attractor().unwrap();

        assert!(first.is_active());
        assert_ne!(first.position, second.position);
    }
}
