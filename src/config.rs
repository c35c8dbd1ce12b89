//! Pattern presets and startup configuration
//!
//! Everything here is fixed before the first tick. Overrides can be read
//! from JSON; every config goes through `validate` before a state is built.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::playfield::Playfield;

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PatternPreset {
    /// Five-point ring with accelerating spin, bullets leave from the ring
    #[default]
    Ring,
    /// Accelerating orbiter, bullets leave from the field center
    Orbit,
    /// Movable shooter firing toward the cursor while the trigger is held
    Aimed,
    /// Shooter on the left edge firing straight right
    Forward,
}

impl PatternPreset {
    pub const ALL: [PatternPreset; 4] = [
        PatternPreset::Ring,
        PatternPreset::Orbit,
        PatternPreset::Aimed,
        PatternPreset::Forward,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternPreset::Ring => "ring",
            PatternPreset::Orbit => "orbit",
            PatternPreset::Aimed => "aimed",
            PatternPreset::Forward => "forward",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ring" | "wave" => Some(PatternPreset::Ring),
            "orbit" | "orbiter" => Some(PatternPreset::Orbit),
            "aimed" | "mouse" => Some(PatternPreset::Aimed),
            "forward" | "keyboard" => Some(PatternPreset::Forward),
            _ => None,
        }
    }
}

/// Where a freshly spawned projectile starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnAt {
    /// At the emitter origin (field center or shooter center)
    Origin,
    /// On the target point itself
    Target,
}

/// When the spawn counter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    /// Counter advances every tick
    Always,
    /// Counter advances only on ticks where the trigger is held
    Trigger,
}

/// Emitter model selection and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmitterConfig {
    Ring {
        count: usize,
        radius: f32,
        /// Initial per-tick spin (degrees)
        spin_deg: f32,
        /// Spin growth per tick (degrees)
        spin_accel_deg: f32,
    },
    Orbit {
        radius: f32,
        start_deg: f32,
        step_deg: f32,
        step_accel_deg: f32,
    },
    /// Aim at the input cursor
    Cursor,
    /// Aim along a fixed direction from the shooter
    Heading { direction: Vec2 },
}

/// Movable emitter origin (player rectangle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterConfig {
    /// Initial center position
    pub start: Vec2,
    /// Full width/height of the rectangle
    pub size: Vec2,
    /// Movement speed in field units per second
    pub speed: f32,
    /// Whether left/right input moves the shooter
    pub horizontal: bool,
    /// Whether up/down input moves the shooter
    pub vertical: bool,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub preset: PatternPreset,
    /// Number of pool slots
    pub capacity: usize,
    /// Projectile speed in field units per second
    pub speed: f32,
    pub bounds: Playfield,
    /// Spawn when `frame_counter % shoot_interval == 0`
    pub shoot_interval: u32,
    /// Frame counter wraps back to 1 past this value
    pub frame_period: u32,
    pub spawn_at: SpawnAt,
    pub fire_mode: FireMode,
    /// Fixed emitter origin (ignored when a shooter is configured)
    pub origin: Vec2,
    pub emitter: EmitterConfig,
    #[serde(default)]
    pub shooter: Option<ShooterConfig>,
    /// Allow keyboard tuning of the emitter (orbit step, fire rate)
    #[serde(default)]
    pub live_tuning: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_preset(PatternPreset::default())
    }
}

impl SimConfig {
    /// Build the configuration reproducing one of the classic demos
    pub fn from_preset(preset: PatternPreset) -> Self {
        match preset {
            PatternPreset::Ring => Self {
                preset,
                capacity: RING_CAPACITY,
                speed: PATTERN_SPEED,
                bounds: Playfield::centered(RING_FIELD_WIDTH, RING_FIELD_HEIGHT),
                shoot_interval: 1,
                frame_period: FRAME_PERIOD,
                spawn_at: SpawnAt::Target,
                fire_mode: FireMode::Always,
                origin: Vec2::ZERO,
                emitter: EmitterConfig::Ring {
                    count: RING_TARGETS,
                    radius: 1.0,
                    spin_deg: 0.0,
                    spin_accel_deg: RING_SPIN_ACCEL_DEG,
                },
                shooter: None,
                live_tuning: false,
            },
            PatternPreset::Orbit => {
                let field = Playfield::screen(SCREEN_WIDTH, SCREEN_HEIGHT);
                Self {
                    preset,
                    capacity: ORBIT_CAPACITY,
                    speed: PATTERN_SPEED,
                    bounds: field,
                    shoot_interval: SHOOT_INTERVAL,
                    frame_period: FRAME_PERIOD,
                    spawn_at: SpawnAt::Origin,
                    fire_mode: FireMode::Always,
                    origin: field.center(),
                    emitter: EmitterConfig::Orbit {
                        radius: ORBIT_RADIUS,
                        start_deg: ORBIT_START_DEG,
                        step_deg: ORBIT_STEP_DEG,
                        step_accel_deg: ORBIT_STEP_ACCEL_DEG,
                    },
                    shooter: None,
                    live_tuning: true,
                }
            }
            PatternPreset::Aimed => {
                let field = Playfield::screen(SCREEN_WIDTH, SCREEN_HEIGHT);
                Self {
                    preset,
                    capacity: SHOOTER_CAPACITY,
                    speed: AIMED_SPEED,
                    bounds: field,
                    shoot_interval: SHOOT_INTERVAL,
                    frame_period: FRAME_PERIOD,
                    spawn_at: SpawnAt::Origin,
                    fire_mode: FireMode::Trigger,
                    origin: field.center(),
                    emitter: EmitterConfig::Cursor,
                    shooter: Some(ShooterConfig {
                        start: field.center(),
                        size: Vec2::new(40.0, 40.0),
                        speed: 300.0,
                        horizontal: true,
                        vertical: true,
                    }),
                    live_tuning: false,
                }
            }
            PatternPreset::Forward => {
                let field = Playfield::screen(SCREEN_WIDTH, SCREEN_HEIGHT);
                Self {
                    preset,
                    capacity: SHOOTER_CAPACITY,
                    speed: FORWARD_SPEED,
                    bounds: field,
                    shoot_interval: SHOOT_INTERVAL,
                    frame_period: FRAME_PERIOD,
                    spawn_at: SpawnAt::Origin,
                    fire_mode: FireMode::Trigger,
                    origin: Vec2::new(25.0, field.center().y),
                    emitter: EmitterConfig::Heading { direction: Vec2::X },
                    shooter: Some(ShooterConfig {
                        start: Vec2::new(25.0, field.center().y),
                        size: Vec2::new(40.0, 20.0),
                        speed: 600.0,
                        horizontal: false,
                        vertical: true,
                    }),
                    live_tuning: false,
                }
            }
        }
    }

    /// Where inactive projectiles wait: the shooter center, else the origin
    pub fn parked_anchor(&self) -> Vec2 {
        match &self.shooter {
            Some(shooter) => shooter.start,
            None => self.origin,
        }
    }

    /// Reject configurations that would misbehave silently at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.speed > 0.0 && self.speed.is_finite()) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if self.shoot_interval == 0 {
            return Err(ConfigError::ZeroShootInterval);
        }
        if self.frame_period == 0 {
            return Err(ConfigError::ZeroFramePeriod);
        }
        if !self.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds);
        }

        // An anchor outside the field would be reset every single tick
        let anchor = self.parked_anchor();
        if !self.bounds.contains(anchor) {
            return Err(ConfigError::ParkedOutsideBounds(anchor));
        }

        if let Some(shooter) = &self.shooter {
            // An infinite speed times a disabled axis turns the center into NaN
            if !(shooter.speed >= 0.0 && shooter.speed.is_finite()) {
                return Err(ConfigError::InvalidShooterSpeed(shooter.speed));
            }
            if !shooter.size.is_finite() {
                return Err(ConfigError::NonFinite("shooter.size"));
            }
            if shooter.size.cmpgt(self.bounds.size()).any() || shooter.size.cmplt(Vec2::ZERO).any() {
                return Err(ConfigError::ShooterTooLarge(shooter.size));
            }
        }

        match &self.emitter {
            EmitterConfig::Ring {
                count,
                radius,
                spin_deg,
                spin_accel_deg,
            } => {
                if *count == 0 {
                    return Err(ConfigError::EmptyRing);
                }
                // Ring bullets aim from the origin at each point
                if !(*radius > 0.0 && radius.is_finite()) {
                    return Err(ConfigError::DegenerateRadius(*radius));
                }
                finite("ring.spin_deg", *spin_deg)?;
                finite("ring.spin_accel_deg", *spin_accel_deg)?;
            }
            EmitterConfig::Orbit {
                radius,
                start_deg,
                step_deg,
                step_accel_deg,
            } => {
                if !(*radius > 0.0 && radius.is_finite()) {
                    return Err(ConfigError::DegenerateRadius(*radius));
                }
                finite("orbit.start_deg", *start_deg)?;
                finite("orbit.step_deg", *step_deg)?;
                finite("orbit.step_accel_deg", *step_accel_deg)?;
            }
            EmitterConfig::Heading { direction } => {
                if !(direction.length_squared() > 0.0 && direction.is_finite()) {
                    return Err(ConfigError::DegenerateHeading);
                }
            }
            EmitterConfig::Cursor => {}
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded {} config from {}", config.preset.as_str(), path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(field))
    }
}

/// Configuration rejected at startup
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroCapacity,
    InvalidSpeed(f32),
    ZeroShootInterval,
    ZeroFramePeriod,
    InvalidBounds,
    ParkedOutsideBounds(Vec2),
    ShooterTooLarge(Vec2),
    InvalidShooterSpeed(f32),
    EmptyRing,
    DegenerateRadius(f32),
    DegenerateHeading,
    NonFinite(&'static str),
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "pool capacity must be at least 1"),
            ConfigError::InvalidSpeed(s) => write!(f, "projectile speed must be positive, got {}", s),
            ConfigError::ZeroShootInterval => write!(f, "shoot interval must be at least 1"),
            ConfigError::ZeroFramePeriod => write!(f, "frame period must be at least 1"),
            ConfigError::InvalidBounds => write!(f, "playfield min corner exceeds max corner"),
            ConfigError::ParkedOutsideBounds(p) => {
                write!(f, "parked position {} lies outside the playfield", p)
            }
            ConfigError::ShooterTooLarge(s) => write!(f, "shooter size {} does not fit the playfield", s),
            ConfigError::InvalidShooterSpeed(s) => {
                write!(f, "shooter speed must be finite and non-negative, got {}", s)
            }
            ConfigError::EmptyRing => write!(f, "target ring needs at least one point"),
            ConfigError::DegenerateRadius(r) => {
                write!(f, "emitter radius must be positive, got {} (origin would equal target)", r)
            }
            ConfigError::DegenerateHeading => write!(f, "heading direction must be non-zero"),
            ConfigError::NonFinite(field) => write!(f, "{} must be a finite number", field),
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
