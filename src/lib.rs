//! Bullet Patterns - fixed-capacity projectile pools driven by emitter patterns
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pool, emitters, velocity, tick)
//! - `config`: Pattern presets and validated startup configuration
//! - `render`: Read-only snapshot of simulation state for an external renderer

pub mod config;
pub mod render;
pub mod sim;

pub use config::{ConfigError, PatternPreset, SimConfig};

use glam::Vec2;

/// Shared simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Frame counter wraps back to 1 after this many ticks
    pub const FRAME_PERIOD: u32 = 60;

    /// Ring demo field (centered coordinates)
    pub const RING_FIELD_WIDTH: f32 = 1600.0;
    pub const RING_FIELD_HEIGHT: f32 = 900.0;
    pub const RING_CAPACITY: usize = 1200;
    pub const RING_TARGETS: usize = 5;
    /// Ring spin acceleration (degrees added to the per-tick spin each tick)
    pub const RING_SPIN_ACCEL_DEG: f32 = 0.225;

    /// Screen-space demo field shared by the orbit and shooter presets
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 450.0;

    /// Orbiting emitter defaults
    pub const ORBIT_CAPACITY: usize = 500;
    pub const ORBIT_RADIUS: f32 = 50.0;
    pub const ORBIT_START_DEG: f32 = 1.0;
    pub const ORBIT_STEP_DEG: f32 = 10.0;
    pub const ORBIT_STEP_ACCEL_DEG: f32 = 0.025;
    /// Orbit step never drops below this (live tuning floor and reset value)
    pub const ORBIT_MIN_STEP_DEG: f32 = 1.0;

    /// Shooter defaults
    pub const SHOOTER_CAPACITY: usize = 50;
    pub const SHOOT_INTERVAL: u32 = 4;

    /// Bullet speeds, in field units per second (per-frame speed * 60)
    pub const PATTERN_SPEED: f32 = 300.0;
    pub const AIMED_SPEED: f32 = 1500.0;
    pub const FORWARD_SPEED: f32 = 1200.0;
}

/// Wrap an angle in degrees into [0, 360), dropping whole turns
///
/// Keeps the fractional overshoot (357 + 14 becomes 11) so accelerating
/// patterns stay continuous across the seam. Constant time for any finite
/// input; non-finite input comes back as NaN.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // Tiny negative inputs round up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Point on a circle of `radius` at `degrees`
#[inline]
pub fn polar_deg(radius: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(radius * theta.cos(), radius * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_overshoot() {
        assert!((wrap_degrees(357.0 + 14.0) - 11.0).abs() < 1e-4);
        assert!((wrap_degrees(-10.0) - 350.0).abs() < 1e-4);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-1.0e-8), 0.0);
    }

    #[test]
    fn test_wrap_huge_angles_stays_in_range() {
        for angle in [1.0e10, -1.0e10, 8.6e9, f32::MAX, -f32::MAX] {
            let wrapped = wrap_degrees(angle);
            assert!((0.0..360.0).contains(&wrapped), "{} wrapped to {}", angle, wrapped);
        }
        assert!(wrap_degrees(f32::INFINITY).is_nan());
    }
}
