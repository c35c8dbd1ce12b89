//! Simulation state and core types
//!
//! Everything a tick reads or writes lives in `SimState`; there is no
//! process-wide mutable state. Renderers only ever get `&SimState`.

use glam::Vec2;

use super::emitter::{AimPoint, Emitter, Orbiter, TargetRing};
use super::playfield::Playfield;
use super::pool::ProjectilePool;
use crate::config::{ConfigError, EmitterConfig, PatternPreset, ShooterConfig, SimConfig};

/// Movable emitter origin (the player rectangle)
#[derive(Debug, Clone, PartialEq)]
pub struct Shooter {
    pub center: Vec2,
    pub half_size: Vec2,
    /// Field units per second
    pub speed: f32,
    pub horizontal: bool,
    pub vertical: bool,
}

impl Shooter {
    pub fn new(config: &ShooterConfig) -> Self {
        Self {
            center: config.start,
            half_size: config.size / 2.0,
            speed: config.speed,
            horizontal: config.horizontal,
            vertical: config.vertical,
        }
    }

    /// Move along the enabled axes and stay inside the field
    ///
    /// `dir` components are -1, 0 or 1 per axis. Returns true if the center
    /// actually changed.
    pub fn steer(&mut self, dir: Vec2, dt: f32, bounds: &Playfield) -> bool {
        let mask = Vec2::new(
            if self.horizontal { 1.0 } else { 0.0 },
            if self.vertical { 1.0 } else { 0.0 },
        );
        let moved = self.center + dir * mask * self.speed * dt;
        let clamped = bounds.clamp_box(moved, self.half_size);
        let changed = clamped != self.center;
        self.center = clamped;
        changed
    }

    /// Top-left corner, for rectangle renderers
    pub fn corner(&self) -> Vec2 {
        self.center - self.half_size
    }
}

/// Complete simulation state (deterministic)
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: SimConfig,
    pub pool: ProjectilePool,
    pub emitter: Emitter,
    /// Current emitter origin (follows the shooter when there is one)
    pub origin: Vec2,
    pub shooter: Option<Shooter>,
    /// Runs 1..=frame_period, 0 before the first counted tick
    pub frame_counter: u32,
    /// Spawn every `shoot_interval` counted ticks (live-tunable)
    pub shoot_interval: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Projectiles launched so far
    pub shots_fired: u64,
    /// Spawns skipped because the aim point sat on the origin
    pub shots_skipped: u64,
    /// Slots parked after leaving the playfield
    pub reclaimed: u64,
}

impl SimState {
    /// Validate `config` and build the initial state with an all-parked pool
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let shooter = config.shooter.as_ref().map(Shooter::new);
        let origin = shooter.as_ref().map_or(config.origin, |s| s.center);
        let pool = ProjectilePool::new(config.capacity, config.parked_anchor());
        let emitter = build_emitter(&config.emitter, origin);

        log::info!(
            "Simulation ready: {} pattern, {} slots, {} targets",
            config.preset.as_str(),
            pool.capacity(),
            emitter.current_targets().len()
        );

        Ok(Self {
            shoot_interval: config.shoot_interval,
            config,
            pool,
            emitter,
            origin,
            shooter,
            frame_counter: 0,
            time_ticks: 0,
            shots_fired: 0,
            shots_skipped: 0,
            reclaimed: 0,
        })
    }

    /// State for a built-in preset
    pub fn from_preset(preset: PatternPreset) -> Result<Self, ConfigError> {
        Self::new(SimConfig::from_preset(preset))
    }

    #[inline]
    pub fn bounds(&self) -> Playfield {
        self.config.bounds
    }

    /// Advance the frame counter, wrapping to 1 past the period.
    /// Returns true when this tick should spawn.
    pub(crate) fn count_frame(&mut self) -> bool {
        self.frame_counter += 1;
        if self.frame_counter > self.config.frame_period {
            self.frame_counter = 1;
        }
        self.frame_counter % self.shoot_interval == 0
    }
}

fn build_emitter(config: &EmitterConfig, origin: Vec2) -> Emitter {
    match *config {
        EmitterConfig::Ring {
            count,
            radius,
            spin_deg,
            spin_accel_deg,
        } => Emitter::Ring(TargetRing::new(origin, count, radius, spin_deg, spin_accel_deg)),
        EmitterConfig::Orbit {
            radius,
            start_deg,
            step_deg,
            step_accel_deg,
        } => Emitter::Orbit(Orbiter::new(origin, radius, start_deg, step_deg, step_accel_deg)),
        // Until the first input arrives, aim straight right
        EmitterConfig::Cursor => Emitter::Aim(AimPoint::new(origin + Vec2::X)),
        EmitterConfig::Heading { direction } => Emitter::Aim(AimPoint::new(origin + direction)),
    }
}
