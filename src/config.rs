//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`DOTFIELD_SECTION__KEY`)

use dotfield_core::{Color, FieldConfig, OrbitParams, ParticleParams, WaveParams};
use dotfield_input::TrackedEvents;
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle grid and physics
    #[serde(default)]
    pub field: FieldSettings,
    /// Which pointer events drive the field
    #[serde(default)]
    pub pointer: PointerConfig,
    /// Click ripple
    #[serde(default)]
    pub wave: WaveConfig,
    /// Orbiting attractor
    #[serde(default)]
    pub orbit: OrbitConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`DOTFIELD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // DOTFIELD_FIELD__GAP=30 -> field.gap = 30
        figment = figment.merge(Env::prefixed("DOTFIELD_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build the field configuration, rejecting invalid values
    pub fn to_field_config(&self) -> Result<FieldConfig, ConfigError> {
        let f = &self.field;
        let config = FieldConfig {
            gap: f.gap,
            pointer_radius: f.radius,
            active_radius: f.active_radius,
            particle: ParticleParams {
                ease: f.ease,
                friction: f.friction,
                force_scale: f.force_scale,
                min_distance_sq: f.min_distance_sq,
                color_hold_frames: f.color_hold_frames,
                alpha_floor: f.alpha_floor,
                alpha_decay: f.alpha_decay,
                opacity_recovery: self.wave.recovery,
                max_size: f.max_size,
            },
            wave: WaveParams {
                radius: self.wave.radius,
                delay_frames: self.wave.delay_frames,
            },
            orbit: self.orbit.enabled.then(|| OrbitParams {
                idle_path_radius: self.orbit.idle_path_radius,
                active_path_radius: self.orbit.active_path_radius,
                speed: self.orbit.speed,
                radius: self.orbit.radius,
            }),
            seed: f.seed,
        };

        config
            .validate()
            .map_err(|e| ConfigError::new(e.to_string()))?;
        Ok(config)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dotfield".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Particle grid and physics settings
///
/// Radii are in squared pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Spacing between grid points in pixels
    pub gap: u32,
    pub ease: f32,
    pub friction: f32,
    /// Pointer radius while idle-tracking
    pub radius: f32,
    /// Pointer radius while the field is active
    pub active_radius: f32,
    pub force_scale: f32,
    pub min_distance_sq: f32,
    pub color_hold_frames: u32,
    pub alpha_floor: f32,
    pub alpha_decay: f32,
    /// Largest particle size in pixels
    pub max_size: u32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        let field = FieldConfig::default();
        let particle = field.particle;
        Self {
            gap: field.gap,
            ease: particle.ease,
            friction: particle.friction,
            radius: field.pointer_radius,
            active_radius: field.active_radius,
            force_scale: particle.force_scale,
            min_distance_sq: particle.min_distance_sq,
            color_hold_frames: particle.color_hold_frames,
            alpha_floor: particle.alpha_floor,
            alpha_decay: particle.alpha_decay,
            max_size: particle.max_size,
            seed: None,
        }
    }
}

/// Pointer tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Follow cursor movement
    pub track_move: bool,
    /// Release the pointer when the cursor leaves the window
    pub track_leave: bool,
    /// Ripple on left click
    pub track_click: bool,
    /// Milliseconds without movement before the pointer goes idle
    pub idle_timeout_ms: u64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            track_move: true,
            track_leave: true,
            track_click: true,
            idle_timeout_ms: 1000,
        }
    }
}

impl PointerConfig {
    pub fn tracked_events(&self) -> TrackedEvents {
        let mut tracked = TrackedEvents::empty();
        tracked.set(TrackedEvents::MOVE, self.track_move);
        tracked.set(TrackedEvents::LEAVE, self.track_leave);
        tracked.set(TrackedEvents::CLICK, self.track_click);
        tracked
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

/// Click ripple configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Ripple radius in pixels
    pub radius: f32,
    /// Ticks between the click and the fade
    pub delay_frames: u32,
    /// Opacity regained per tick after a fade
    pub recovery: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        let wave = WaveParams::default();
        Self {
            radius: wave.radius,
            delay_frames: wave.delay_frames,
            recovery: ParticleParams::default().opacity_recovery,
        }
    }
}

/// Orbiting attractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub enabled: bool,
    /// Path radius in pixels while idle
    pub idle_path_radius: f32,
    /// Path radius in pixels while active
    pub active_path_radius: f32,
    /// Radians per tick
    pub speed: f32,
    /// Influence radius (squared pixels)
    pub radius: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let orbit = OrbitParams::default();
        Self {
            enabled: false,
            idle_path_radius: orbit.idle_path_radius,
            active_path_radius: orbit.active_path_radius,
            speed: orbit.speed,
            radius: orbit.radius,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background colour (sRGB, opaque)
    pub background_color: Color,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::new(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
