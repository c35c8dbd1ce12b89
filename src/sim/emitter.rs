//! Target/emitter models
//!
//! An emitter owns the point(s) projectiles are aimed at:
//! - `TargetRing`: N points on a circle, rotated in place every tick
//! - `Orbiter`: one point circling a center with an accelerating step
//! - `AimPoint`: one point written from input (cursor or heading)
//!
//! Angles are in degrees. Rotation is applied to the current coordinates,
//! so per-tick rotations compose: after k ticks the ring has turned by the
//! sum of every delta it was given.

use glam::Vec2;

use crate::consts::ORBIT_MIN_STEP_DEG;
use crate::{polar_deg, wrap_degrees};

/// Ring of target points rotating about `center`
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRing {
    center: Vec2,
    points: Vec<Vec2>,
    /// Rotation applied on the next `step`
    pub spin_deg: f32,
    /// Added to `spin_deg` after every `step` (accelerating spin)
    pub spin_accel_deg: f32,
    /// Sum of every rotation applied so far
    total_deg: f32,
}

impl TargetRing {
    /// `count` points evenly spaced at `radius`, the first one on +x
    pub fn new(center: Vec2, count: usize, radius: f32, spin_deg: f32, spin_accel_deg: f32) -> Self {
        let count = count.max(1);
        let points = (0..count)
            .map(|k| center + polar_deg(radius, 360.0 * k as f32 / count as f32))
            .collect();
        Self {
            center,
            points,
            spin_deg,
            spin_accel_deg,
            total_deg: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn total_deg(&self) -> f32 {
        self.total_deg
    }

    /// Rotate every point about the center by `delta_deg`
    pub fn advance(&mut self, delta_deg: f32) {
        let rot = Vec2::from_angle(delta_deg.to_radians());
        for p in &mut self.points {
            *p = self.center + rot.rotate(*p - self.center);
        }
        self.total_deg += delta_deg;
    }

    /// Apply the configured spin, then accelerate it
    pub fn step(&mut self) {
        self.advance(self.spin_deg);
        self.spin_deg += self.spin_accel_deg;
    }
}

/// Single point orbiting `center` at `radius`
#[derive(Debug, Clone, PartialEq)]
pub struct Orbiter {
    center: Vec2,
    radius: f32,
    angle_deg: f32,
    /// Degrees added to the angle on every `step`
    pub step_deg: f32,
    /// Added to `step_deg` after every `step`
    pub step_accel_deg: f32,
    point: Vec2,
}

impl Orbiter {
    pub fn new(center: Vec2, radius: f32, start_deg: f32, step_deg: f32, step_accel_deg: f32) -> Self {
        let angle_deg = wrap_degrees(start_deg);
        Self {
            center,
            radius,
            angle_deg,
            step_deg,
            step_accel_deg,
            point: center + polar_deg(radius, angle_deg),
        }
    }

    #[inline]
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    #[inline]
    pub fn point(&self) -> Vec2 {
        self.point
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Move along the orbit by `delta_deg`
    ///
    /// Crossing 360 subtracts a whole turn and keeps the remainder, so
    /// 357 + 14 lands on 11 rather than snapping back to a fixed angle.
    pub fn advance(&mut self, delta_deg: f32) {
        self.angle_deg = wrap_degrees(self.angle_deg + delta_deg);
        self.point = self.center + polar_deg(self.radius, self.angle_deg);
    }

    /// Advance by the current step, then accelerate the step
    pub fn step(&mut self) {
        self.advance(self.step_deg);
        self.step_deg += self.step_accel_deg;
    }

    /// Live tuning: change the step by `delta_deg`, never below the floor
    pub fn nudge_step(&mut self, delta_deg: f32) {
        self.step_deg = (self.step_deg + delta_deg).max(ORBIT_MIN_STEP_DEG);
    }

    /// Live tuning: drop the step back to the floor
    pub fn reset_step(&mut self) {
        self.step_deg = ORBIT_MIN_STEP_DEG;
    }
}

/// Single externally driven target point
#[derive(Debug, Clone, PartialEq)]
pub struct AimPoint {
    point: Vec2,
}

impl AimPoint {
    pub fn new(point: Vec2) -> Self {
        Self { point }
    }

    #[inline]
    pub fn point(&self) -> Vec2 {
        self.point
    }

    pub fn set(&mut self, point: Vec2) {
        self.point = point;
    }
}

/// Emitter variant chosen per pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Emitter {
    Ring(TargetRing),
    Orbit(Orbiter),
    Aim(AimPoint),
}

impl Emitter {
    /// Rotate/move target points by an explicit delta
    ///
    /// Aim points have no pivot of their own and are left untouched.
    pub fn advance(&mut self, delta_deg: f32) {
        match self {
            Emitter::Ring(ring) => ring.advance(delta_deg),
            Emitter::Orbit(orbit) => orbit.advance(delta_deg),
            Emitter::Aim(_) => {}
        }
    }

    /// Advance by the emitter's own configured delta (and acceleration)
    pub fn step(&mut self) {
        match self {
            Emitter::Ring(ring) => ring.step(),
            Emitter::Orbit(orbit) => orbit.step(),
            Emitter::Aim(_) => {}
        }
    }

    /// Points projectiles are aimed at this tick (length 1 or N)
    pub fn current_targets(&self) -> &[Vec2] {
        match self {
            Emitter::Ring(ring) => ring.points(),
            Emitter::Orbit(orbit) => std::slice::from_ref(&orbit.point),
            Emitter::Aim(aim) => std::slice::from_ref(&aim.point),
        }
    }

    /// Orbit angle, if this emitter has one
    pub fn angle_deg(&self) -> Option<f32> {
        match self {
            Emitter::Orbit(orbit) => Some(orbit.angle_deg()),
            _ => None,
        }
    }
}
